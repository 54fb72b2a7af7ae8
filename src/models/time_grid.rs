//! Time grid: periods per day-part and the weekly slot expansion.
//!
//! Periods are numbered from 1 per day. Morning periods come first, then
//! afternoon, then evening:
//!
//! ```text
//! morning = 4, afternoon = 3, evening = 1
//! period:   1 2 3 4 | 5 6 7 | 8
//! part:     M M M M | A A A | E
//! ```
//!
//! The three counts must add up to `daily_periods`, the school's fixed
//! number of periods per day.

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use super::{DayPart, SlotKey, TimeSlot, Weekday};
use crate::error::ConfigError;

/// Periods per day used when nothing else is configured.
pub const DEFAULT_DAILY_PERIODS: u8 = 8;

/// Period layout of a teaching day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeGrid {
    pub periods_per_morning: u8,
    pub periods_per_afternoon: u8,
    pub periods_per_evening: u8,
    /// Required total periods per day.
    pub daily_periods: u8,
    /// Clock times of each period. `None` = periods are abstract.
    pub timing: Option<PeriodTiming>,
}

/// Clock layout for rendering period time ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTiming {
    pub lesson_minutes: u16,
    pub break_minutes: u16,
    pub morning_start: NaiveTime,
    pub afternoon_start: NaiveTime,
    /// Evening start. `None` = evening follows the last earlier block after
    /// one break.
    pub evening_start: Option<NaiveTime>,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            periods_per_morning: 4,
            periods_per_afternoon: 4,
            periods_per_evening: 0,
            daily_periods: DEFAULT_DAILY_PERIODS,
            timing: None,
        }
    }
}

impl TimeGrid {
    /// Creates a grid whose required daily total equals the given split.
    pub fn new(morning: u8, afternoon: u8, evening: u8) -> Self {
        Self {
            periods_per_morning: morning,
            periods_per_afternoon: afternoon,
            periods_per_evening: evening,
            daily_periods: (morning as u16 + afternoon as u16 + evening as u16).min(u8::MAX as u16)
                as u8,
            timing: None,
        }
    }

    /// Sets the required daily total.
    pub fn with_daily_periods(mut self, daily_periods: u8) -> Self {
        self.daily_periods = daily_periods;
        self
    }

    /// Sets the period clock layout.
    pub fn with_timing(mut self, timing: PeriodTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Sum of the three day-part counts.
    pub fn total_periods(&self) -> u16 {
        self.periods_per_morning as u16
            + self.periods_per_afternoon as u16
            + self.periods_per_evening as u16
    }

    /// Checks the day-part split against the required total and that the
    /// timing (if any) stays within one day.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let actual = self.total_periods();
        if actual != self.daily_periods as u16 {
            return Err(ConfigError::PeriodMismatch {
                expected: self.daily_periods,
                actual,
            });
        }
        if self.timing.is_some() {
            for period in 1..=self.daily_periods {
                if self.period_time(period).is_none() {
                    return Err(ConfigError::TimingOverflow { period });
                }
            }
        }
        Ok(())
    }

    /// Whether `period` is a valid period number for this grid.
    pub fn is_valid_period(&self, period: u8) -> bool {
        period >= 1 && (period as u16) <= self.total_periods()
    }

    /// Day-part that owns `period`.
    pub fn day_part(&self, period: u8) -> DayPart {
        let morning_end = self.periods_per_morning as u16;
        let afternoon_end = morning_end + self.periods_per_afternoon as u16;
        if (period as u16) <= morning_end {
            DayPart::Morning
        } else if (period as u16) <= afternoon_end {
            DayPart::Afternoon
        } else {
            DayPart::Evening
        }
    }

    /// Inclusive period range of a day-part. `None` if the part is empty.
    pub fn period_range(&self, part: DayPart) -> Option<(u8, u8)> {
        let (first, count) = match part {
            DayPart::Morning => (1u8, self.periods_per_morning),
            DayPart::Afternoon => (
                self.periods_per_morning.saturating_add(1),
                self.periods_per_afternoon,
            ),
            DayPart::Evening => (
                self.periods_per_morning
                    .saturating_add(self.periods_per_afternoon)
                    .saturating_add(1),
                self.periods_per_evening,
            ),
        };
        (count > 0).then(|| (first, first.saturating_add(count - 1)))
    }

    /// Builds the slot for `(weekday, period)` with its derived day-part.
    pub fn slot(&self, weekday: Weekday, period: u8) -> Result<TimeSlot, ConfigError> {
        if !self.is_valid_period(period) {
            return Err(ConfigError::PeriodOutOfRange {
                period,
                max: self.total_periods().min(u8::MAX as u16) as u8,
            });
        }
        Ok(TimeSlot::new(
            SlotKey::new(weekday, period),
            self.day_part(period),
        ))
    }

    /// Expands the grid over `weekdays` into the ordered weekly slot sequence.
    ///
    /// Order: weekday ascending, then period ascending. Duplicate weekdays are
    /// collapsed.
    ///
    /// # Errors
    /// [`ConfigError::PeriodMismatch`] if the day-part split does not add up
    /// to `daily_periods`, [`ConfigError::NoWeekdays`] if `weekdays` is empty.
    ///
    /// ```
    /// use class_timetable::models::{TimeGrid, Weekday};
    ///
    /// let grid = TimeGrid::new(1, 1, 0);
    /// let slots = grid.generate(&Weekday::through(Weekday::Friday)).unwrap();
    /// assert_eq!(slots.len(), 10);
    /// ```
    pub fn generate(&self, weekdays: &[Weekday]) -> Result<Vec<TimeSlot>, ConfigError> {
        self.validate()?;
        if weekdays.is_empty() {
            return Err(ConfigError::NoWeekdays);
        }

        let mut days = weekdays.to_vec();
        days.sort();
        days.dedup();

        let mut slots = Vec::with_capacity(days.len() * self.daily_periods as usize);
        for weekday in days {
            for period in 1..=self.daily_periods {
                slots.push(TimeSlot::new(
                    SlotKey::new(weekday, period),
                    self.day_part(period),
                ));
            }
        }
        Ok(slots)
    }

    /// Start and end clock time of `period`, if timing is configured.
    pub fn period_time(&self, period: u8) -> Option<(NaiveTime, NaiveTime)> {
        let timing = self.timing.as_ref()?;
        if !self.is_valid_period(period) {
            return None;
        }
        let part = self.day_part(period);
        let (first, _) = self.period_range(part)?;
        let part_start = match part {
            DayPart::Morning => timing.morning_start,
            DayPart::Afternoon => timing.afternoon_start,
            DayPart::Evening => match timing.evening_start {
                Some(start) => start,
                // continue after the last non-empty earlier block
                None if first > 1 => {
                    let (_, end) = self.period_time(first - 1)?;
                    add_minutes(end, u32::from(timing.break_minutes))?
                }
                None => timing.morning_start,
            },
        };
        let stride = u32::from(timing.lesson_minutes) + u32::from(timing.break_minutes);
        let offset = u32::from(period - first) * stride;
        let start = add_minutes(part_start, offset)?;
        let end = add_minutes(start, u32::from(timing.lesson_minutes))?;
        Some((start, end))
    }

    /// `HH:MM-HH:MM` for `period`, if timing is configured.
    pub fn time_range(&self, period: u8) -> Option<String> {
        let (start, end) = self.period_time(period)?;
        Some(format!(
            "{:02}:{:02}-{:02}:{:02}",
            start.hour(),
            start.minute(),
            end.hour(),
            end.minute()
        ))
    }
}

/// Adds minutes without wrapping past midnight.
fn add_minutes(time: NaiveTime, minutes: u32) -> Option<NaiveTime> {
    let (result, wrapped) = time.overflowing_add_signed(TimeDelta::minutes(i64::from(minutes)));
    (wrapped == 0).then_some(result)
}

impl PeriodTiming {
    pub fn new(
        lesson_minutes: u16,
        break_minutes: u16,
        morning_start: NaiveTime,
        afternoon_start: NaiveTime,
    ) -> Self {
        Self {
            lesson_minutes,
            break_minutes,
            morning_start,
            afternoon_start,
            evening_start: None,
        }
    }

    pub fn with_evening_start(mut self, start: NaiveTime) -> Self {
        self.evening_start = Some(start);
        self
    }
}
