//! Built-in placement rules.
//!
//! Both rules look at a single class on a single weekday and only at lessons
//! of the candidate's subject. Period adjacency is numeric: period 4 and
//! period 5 are adjacent even when they straddle the lunch break.

use super::{Placement, PlacementRule, Violation, ViolationKind};
use crate::models::{Schedule, SlotKey};

/// Limits runs of adjacent periods of one subject.
///
/// With `allow == false` any adjacent same-subject lesson is rejected.
/// Otherwise the run containing the candidate may be at most `max_run`
/// periods long; `max_run` below 1 is treated as 1.
#[derive(Debug, Clone, Copy)]
pub struct ConsecutiveSubjectRule {
    allow: bool,
    max_run: u32,
}

impl ConsecutiveSubjectRule {
    pub fn new(allow: bool, max_run: u32) -> Self {
        Self { allow, max_run }
    }

    /// Length of the same-subject run the candidate would join, itself included.
    fn run_length(schedule: &Schedule, placement: &Placement<'_>) -> u32 {
        let entry = placement.entry;
        let weekday = entry.slot().weekday();
        let same_subject = |period: u8| {
            schedule
                .class_entry_at(entry.class_id(), SlotKey::new(weekday, period))
                .is_some_and(|e| e.subject() == entry.subject())
        };

        let mut run = 1;
        let mut p = entry.slot().period();
        while p > 1 && same_subject(p - 1) {
            run += 1;
            p -= 1;
        }
        let mut p = entry.slot().period();
        while p < u8::MAX && same_subject(p + 1) {
            run += 1;
            p += 1;
        }
        run
    }
}

impl PlacementRule for ConsecutiveSubjectRule {
    fn name(&self) -> &'static str {
        "consecutive-subject"
    }

    fn check(&self, schedule: &Schedule, placement: &Placement<'_>) -> Option<Violation> {
        let run = Self::run_length(schedule, placement);
        let limit = if self.allow { self.max_run.max(1) } else { 1 };
        if run <= limit {
            return None;
        }
        let entry = placement.entry;
        Some(Violation::hard(
            ViolationKind::ConsecutiveSubject,
            format!(
                "{} would have {} consecutive periods of {} on {} (limit {})",
                placement.class.display_name(),
                run,
                entry.subject(),
                entry.slot().weekday(),
                limit
            ),
        ))
    }

    fn description(&self) -> &'static str {
        "Caps adjacent periods of the same subject"
    }
}

/// Requires a gap between non-adjacent lessons of one subject on one day.
///
/// Two lessons at periods `p` and `q` with `|p - q| >= 2` leave
/// `|p - q| - 1` other periods between them; that count must be at least
/// `min_interval`. Adjacent lessons are left to [`ConsecutiveSubjectRule`].
#[derive(Debug, Clone, Copy)]
pub struct SubjectSpacingRule {
    min_interval: u32,
}

impl SubjectSpacingRule {
    pub fn new(min_interval: u32) -> Self {
        Self { min_interval }
    }
}

impl PlacementRule for SubjectSpacingRule {
    fn name(&self) -> &'static str {
        "subject-spacing"
    }

    fn check(&self, schedule: &Schedule, placement: &Placement<'_>) -> Option<Violation> {
        let entry = placement.entry;
        let period = entry.slot().period();
        let too_close = schedule
            .entries_for_class_on(entry.class_id(), entry.slot().weekday())
            .into_iter()
            .filter(|e| e.subject() == entry.subject())
            .map(|e| e.slot().period().abs_diff(period))
            .find(|&d| d >= 2 && u32::from(d - 1) < self.min_interval)?;

        Some(Violation::soft(
            ViolationKind::SubjectSpacing,
            format!(
                "{} lessons for {} on {} only {} period(s) apart (minimum {})",
                entry.subject(),
                placement.class.display_name(),
                entry.slot().weekday(),
                too_close - 1,
                self.min_interval
            ),
        ))
    }

    fn description(&self) -> &'static str {
        "Keeps same-day lessons of one subject apart"
    }
}
