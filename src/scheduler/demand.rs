//! Demand expansion.
//!
//! Turns each class curriculum into one [`Demand`] per required weekly hour.
//! A class without subjects contributes nothing and yields a
//! [`ScheduleIssue::NoSubjects`] instead.

use crate::error::ScheduleIssue;
use crate::models::{ClassGroup, Subject};

/// One required placement-hour for a (class, subject) pair.
#[derive(Debug, Clone, Copy)]
pub struct Demand<'a> {
    pub class: &'a ClassGroup,
    pub subject: &'a Subject,
    /// 1-based hour index within the subject's weekly quota.
    pub hour: u32,
}

impl<'a> Demand<'a> {
    /// `(class id, subject name)` identity shared by all hours of a pair.
    pub fn pair(&self) -> (&'a str, &'a str) {
        (self.class.id.as_str(), self.subject.name.as_str())
    }
}

/// Expands classes into demands, in class then subject order.
///
/// Each `(class, subject)` pair appears exactly `subject.weekly_hours` times.
pub fn build_demands(classes: &[ClassGroup]) -> (Vec<Demand<'_>>, Vec<ScheduleIssue>) {
    let mut demands = Vec::with_capacity(classes.iter().map(|c| c.weekly_hours() as usize).sum());
    let mut issues = Vec::new();

    for class in classes {
        if class.subjects.is_empty() {
            issues.push(ScheduleIssue::NoSubjects {
                class_id: class.id.clone(),
                class_name: class.display_name().to_string(),
            });
            continue;
        }
        for subject in &class.subjects {
            demands.extend((1..=subject.weekly_hours).map(|hour| Demand {
                class,
                subject,
                hour,
            }));
        }
    }

    (demands, issues)
}
