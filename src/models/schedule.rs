//! Schedule (solution) model.
//!
//! A schedule is the insertion-ordered list of committed lessons plus the
//! indices that make hard-conflict checks cheap. The indices are keyed by
//! teacher, class, and room per slot and never hold two entries for one key:
//! [`Schedule::add`] refuses any entry that would double-book.
//!
//! Load counters (subject hours per class, daily subject counts, teacher
//! daily and weekly hours) are maintained incrementally on add and remove.

use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};

use super::{SlotKey, TimeSlot, Weekday};

/// One committed lesson. Immutable once built; replace by remove + add.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduleEntry {
    class_id: String,
    subject: String,
    teacher_id: String,
    room_id: Option<String>,
    slot: TimeSlot,
}

impl ScheduleEntry {
    pub fn new(
        class_id: impl Into<String>,
        subject: impl Into<String>,
        teacher_id: impl Into<String>,
        slot: TimeSlot,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            subject: subject.into(),
            teacher_id: teacher_id.into(),
            room_id: None,
            slot,
        }
    }

    /// Places the lesson in a room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn teacher_id(&self) -> &str {
        &self.teacher_id
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }
}

/// Which resource a rejected entry would have double-booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HardConflict {
    Teacher,
    Class,
    Room,
}

/// Per-weekday counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DayCounts([u32; 7]);

impl DayCounts {
    fn get(&self, day: Weekday) -> u32 {
        self.0[day.index()]
    }

    fn bump(&mut self, day: Weekday) {
        self.0[day.index()] += 1;
    }

    fn drop_one(&mut self, day: Weekday) {
        let c = &mut self.0[day.index()];
        *c = c.saturating_sub(1);
    }

    fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

type Occupancy = HashMap<String, HashSet<SlotKey>>;

/// Committed lessons with conflict indices and load counters.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
    teacher_slots: Occupancy,
    class_slots: Occupancy,
    room_slots: Occupancy,
    /// class → subject → per-day count.
    subject_days: HashMap<String, HashMap<String, DayCounts>>,
    /// teacher → per-day hours.
    teacher_days: HashMap<String, DayCounts>,
}

fn occupied(index: &Occupancy, id: &str, key: SlotKey) -> bool {
    index.get(id).is_some_and(|slots| slots.contains(&key))
}

fn release(index: &mut Occupancy, id: &str, key: SlotKey) {
    if let Some(slots) = index.get_mut(id) {
        slots.remove(&key);
        if slots.is_empty() {
            index.remove(id);
        }
    }
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// First hard conflict `entry` would cause, checked teacher, class, room.
    pub fn conflict_for(&self, entry: &ScheduleEntry) -> Option<HardConflict> {
        let key = entry.slot.key();
        if occupied(&self.teacher_slots, &entry.teacher_id, key) {
            return Some(HardConflict::Teacher);
        }
        if occupied(&self.class_slots, &entry.class_id, key) {
            return Some(HardConflict::Class);
        }
        if let Some(room) = &entry.room_id {
            if occupied(&self.room_slots, room, key) {
                return Some(HardConflict::Room);
            }
        }
        None
    }

    /// Whether an existing entry shares the slot and the teacher, the class,
    /// or the room of `entry`.
    pub fn has_conflict(&self, entry: &ScheduleEntry) -> bool {
        self.conflict_for(entry).is_some()
    }

    /// Commits `entry`. Returns `false` and leaves the schedule untouched if
    /// it would double-book.
    pub fn add(&mut self, entry: ScheduleEntry) -> bool {
        if self.has_conflict(&entry) {
            return false;
        }
        let key = entry.slot.key();
        let day = key.weekday;

        self.teacher_slots
            .entry(entry.teacher_id.clone())
            .or_default()
            .insert(key);
        self.class_slots
            .entry(entry.class_id.clone())
            .or_default()
            .insert(key);
        if let Some(room) = &entry.room_id {
            self.room_slots.entry(room.clone()).or_default().insert(key);
        }
        self.subject_days
            .entry(entry.class_id.clone())
            .or_default()
            .entry(entry.subject.clone())
            .or_default()
            .bump(day);
        self.teacher_days
            .entry(entry.teacher_id.clone())
            .or_default()
            .bump(day);

        self.entries.push(entry);
        true
    }

    /// Removes an entry equal to `entry`. Returns `false` if absent.
    pub fn remove(&mut self, entry: &ScheduleEntry) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e == entry) else {
            return false;
        };
        let removed = self.entries.remove(pos);
        let key = removed.slot.key();
        let day = key.weekday;

        release(&mut self.teacher_slots, &removed.teacher_id, key);
        release(&mut self.class_slots, &removed.class_id, key);
        if let Some(room) = &removed.room_id {
            release(&mut self.room_slots, room, key);
        }
        if let Some(subjects) = self.subject_days.get_mut(&removed.class_id) {
            if let Some(counts) = subjects.get_mut(&removed.subject) {
                counts.drop_one(day);
            }
        }
        if let Some(counts) = self.teacher_days.get_mut(&removed.teacher_id) {
            counts.drop_one(day);
        }
        true
    }

    /// Committed entries in insertion order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_for_class(&self, class_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.class_id == class_id)
            .collect()
    }

    pub fn entries_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.teacher_id == teacher_id)
            .collect()
    }

    pub fn entries_for_room(&self, room_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.room_id.as_deref() == Some(room_id))
            .collect()
    }

    /// Entries of one class on one weekday.
    pub fn entries_for_class_on(&self, class_id: &str, weekday: Weekday) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.class_id == class_id && e.slot.weekday() == weekday)
            .collect()
    }

    /// The lesson a class has at `key`, if any.
    pub fn class_entry_at(&self, class_id: &str, key: SlotKey) -> Option<&ScheduleEntry> {
        if !occupied(&self.class_slots, class_id, key) {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.class_id == class_id && e.slot.key() == key)
    }

    pub fn is_teacher_busy(&self, teacher_id: &str, key: SlotKey) -> bool {
        occupied(&self.teacher_slots, teacher_id, key)
    }

    pub fn is_class_busy(&self, class_id: &str, key: SlotKey) -> bool {
        occupied(&self.class_slots, class_id, key)
    }

    pub fn is_room_busy(&self, room_id: &str, key: SlotKey) -> bool {
        occupied(&self.room_slots, room_id, key)
    }

    /// Periods of `subject` committed for `class_id` this week.
    pub fn subject_hours(&self, class_id: &str, subject: &str) -> u32 {
        self.subject_counts(class_id, subject)
            .map(DayCounts::total)
            .unwrap_or(0)
    }

    /// Periods of `subject` committed for `class_id` on `weekday`.
    pub fn daily_subject_count(&self, class_id: &str, weekday: Weekday, subject: &str) -> u32 {
        self.subject_counts(class_id, subject)
            .map(|c| c.get(weekday))
            .unwrap_or(0)
    }

    pub fn teacher_day_hours(&self, teacher_id: &str, weekday: Weekday) -> u32 {
        self.teacher_days
            .get(teacher_id)
            .map(|c| c.get(weekday))
            .unwrap_or(0)
    }

    pub fn teacher_week_hours(&self, teacher_id: &str) -> u32 {
        self.teacher_days
            .get(teacher_id)
            .map(DayCounts::total)
            .unwrap_or(0)
    }

    fn subject_counts(&self, class_id: &str, subject: &str) -> Option<&DayCounts> {
        self.subject_days.get(class_id)?.get(subject)
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
