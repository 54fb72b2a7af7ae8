//! Weekly time coordinates.
//!
//! A [`TimeSlot`] is one period on one weekday. Its day-part is derived from
//! the period number by the [`TimeGrid`](super::TimeGrid) that produced it and
//! cannot be set independently.
//!
//! Identity is the `(weekday, period)` pair, exposed as [`SlotKey`]. Teacher
//! and room availability sets are keyed by `SlotKey` so they can be written
//! without a grid at hand.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Day of the week. Ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days in order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday through `last`, inclusive.
    ///
    /// ```
    /// use class_timetable::models::Weekday;
    ///
    /// assert_eq!(Weekday::through(Weekday::Friday).len(), 5);
    /// ```
    pub fn through(last: Weekday) -> Vec<Weekday> {
        Self::ALL.iter().copied().filter(|d| *d <= last).collect()
    }

    /// Zero-based position in the week (Monday = 0).
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lowercase English name.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named segment of a teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
}

impl DayPart {
    pub const ALL: [DayPart; 3] = [DayPart::Morning, DayPart::Afternoon, DayPart::Evening];

    pub fn name(&self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Afternoon => "afternoon",
            DayPart::Evening => "evening",
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `(weekday, period)` identity of a slot.
///
/// Periods are numbered from 1 within each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub weekday: Weekday,
    pub period: u8,
}

impl SlotKey {
    pub fn new(weekday: Weekday, period: u8) -> Self {
        Self { weekday, period }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} period {}", self.weekday, self.period)
    }
}

/// A concrete weekly time slot.
///
/// Equality, hashing, and ordering use `(weekday, period)` only.
/// Construct slots through [`TimeGrid::slot`](super::TimeGrid::slot) or
/// [`TimeGrid::generate`](super::TimeGrid::generate).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeSlot {
    key: SlotKey,
    day_part: DayPart,
}

impl TimeSlot {
    pub(crate) fn new(key: SlotKey, day_part: DayPart) -> Self {
        Self { key, day_part }
    }

    #[inline]
    pub fn key(&self) -> SlotKey {
        self.key
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.key.weekday
    }

    #[inline]
    pub fn period(&self) -> u8 {
        self.key.period
    }

    #[inline]
    pub fn day_part(&self) -> DayPart {
        self.day_part
    }
}

impl PartialEq for TimeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TimeSlot {}

impl Hash for TimeSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.day_part)
    }
}
