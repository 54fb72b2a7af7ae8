//! Consumer-facing timetable output.
//!
//! [`format_schedule`] flattens a [`Schedule`] into display rows sorted by
//! `(class_id, weekday, period)`. Downstream report layers rely on that
//! order.

use serde::Serialize;
use std::collections::HashMap;

use super::ScheduleOutcome;
use crate::models::{ClassGroup, DayPart, Schedule, ScheduleEntry, Teacher, TimeGrid, Weekday};

/// One lesson, resolved to display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedEntry {
    pub class_id: String,
    pub class_name: String,
    pub subject: String,
    pub teacher_id: String,
    pub teacher_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub weekday: Weekday,
    pub period: u8,
    pub day_part: DayPart,
    /// `HH:MM-HH:MM`, when the grid carries period timing.
    pub time_range: Option<String>,
}

/// Formats and sorts every entry of `schedule`.
///
/// Unknown class or teacher ids fall back to the id as display name.
pub fn format_schedule(
    schedule: &Schedule,
    grid: &TimeGrid,
    classes: &[ClassGroup],
    teachers: &[Teacher],
) -> Vec<FormattedEntry> {
    let class_names: HashMap<&str, &str> = classes
        .iter()
        .map(|c| (c.id.as_str(), c.display_name()))
        .collect();
    let teacher_names: HashMap<&str, &str> = teachers
        .iter()
        .filter(|t| !t.name.is_empty())
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();

    let mut rows: Vec<FormattedEntry> = schedule
        .entries()
        .iter()
        .map(|entry| format_entry(entry, grid, &class_names, &teacher_names))
        .collect();
    sort_entries(&mut rows);
    rows
}

fn format_entry(
    entry: &ScheduleEntry,
    grid: &TimeGrid,
    class_names: &HashMap<&str, &str>,
    teacher_names: &HashMap<&str, &str>,
) -> FormattedEntry {
    let slot = entry.slot();
    FormattedEntry {
        class_id: entry.class_id().to_string(),
        class_name: class_names
            .get(entry.class_id())
            .copied()
            .unwrap_or(entry.class_id())
            .to_string(),
        subject: entry.subject().to_string(),
        teacher_id: entry.teacher_id().to_string(),
        teacher_name: teacher_names
            .get(entry.teacher_id())
            .copied()
            .unwrap_or(entry.teacher_id())
            .to_string(),
        room: entry.room_id().map(str::to_string),
        weekday: slot.weekday(),
        period: slot.period(),
        day_part: slot.day_part(),
        time_range: grid.time_range(slot.period()),
    }
}

/// Sorts rows by `(class_id, weekday, period)`. Weekdays order Monday first.
///
/// Stable, so re-sorting sorted rows is a no-op.
pub fn sort_entries(rows: &mut [FormattedEntry]) {
    rows.sort_by(|a, b| {
        a.class_id
            .cmp(&b.class_id)
            .then(a.weekday.cmp(&b.weekday))
            .then(a.period.cmp(&b.period))
    });
}

/// Serializable run summary: `{ success, schedule, errors }`.
///
/// `errors` is `null` when the run recorded no issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub success: bool,
    pub schedule: Vec<FormattedEntry>,
    pub errors: Option<Vec<String>>,
}

impl ScheduleReport {
    pub fn new(
        outcome: &ScheduleOutcome,
        grid: &TimeGrid,
        classes: &[ClassGroup],
        teachers: &[Teacher],
    ) -> Self {
        let errors = outcome.error_messages();
        Self {
            success: outcome.is_success(),
            schedule: format_schedule(&outcome.schedule, grid, classes, teachers),
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}
