//! Error taxonomy.
//!
//! Two families:
//! - [`ConfigError`]: structural misconfiguration. Fatal; a run aborts
//!   before any demand is processed.
//! - [`ScheduleIssue`]: scheduling outcomes (missing subjects, missing
//!   resources, unplaceable demands, unmet-demand summary). Accumulated
//!   alongside the partial schedule; a run succeeds iff none were recorded.

use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;

/// Fatal configuration or input error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("time grid has {actual} periods per day, expected {expected}")]
    PeriodMismatch { expected: u8, actual: u16 },

    #[error("no active weekdays configured")]
    NoWeekdays,

    #[error("no classes provided")]
    NoClasses,

    #[error("no teachers provided")]
    NoTeachers,

    #[error("period {period} is outside the daily range 1..={max}")]
    PeriodOutOfRange { period: u8, max: u8 },

    #[error("period timing overflows the day at period {period}")]
    TimingOverflow { period: u8 },

    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Classification of a [`ScheduleIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A class has no subjects; it contributes no demands.
    Demand,
    /// No teacher or room qualifies for a subject.
    Resource,
    /// Every eligible pairing was blocked by hard conflicts or rule violations.
    Conflict,
    /// Summary of unmet demands.
    Warning,
}

/// Non-fatal scheduling outcome recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleIssue {
    #[error("class '{class_name}' has no subjects configured and was skipped")]
    NoSubjects { class_id: String, class_name: String },

    #[error("no qualified teacher for '{subject}' (class '{class_name}', {hours}h unplaced)")]
    NoQualifiedTeacher {
        class_id: String,
        class_name: String,
        subject: String,
        hours: u32,
    },

    #[error("no suitable room for '{subject}' (class '{class_name}', {hours}h unplaced)")]
    NoSuitableRoom {
        class_id: String,
        class_name: String,
        subject: String,
        hours: u32,
    },

    #[error("no free slot and teacher for '{subject}' of class '{class_name}'")]
    Unplaceable {
        class_id: String,
        class_name: String,
        subject: String,
    },

    #[error("{count} lesson hour(s) could not be scheduled")]
    UnmetDemands { count: usize },
}

impl ScheduleIssue {
    pub fn kind(&self) -> IssueKind {
        match self {
            ScheduleIssue::NoSubjects { .. } => IssueKind::Demand,
            ScheduleIssue::NoQualifiedTeacher { .. } | ScheduleIssue::NoSuitableRoom { .. } => {
                IssueKind::Resource
            }
            ScheduleIssue::Unplaceable { .. } => IssueKind::Conflict,
            ScheduleIssue::UnmetDemands { .. } => IssueKind::Warning,
        }
    }

    /// Class the issue refers to, if any.
    pub fn class_id(&self) -> Option<&str> {
        match self {
            ScheduleIssue::NoSubjects { class_id, .. }
            | ScheduleIssue::NoQualifiedTeacher { class_id, .. }
            | ScheduleIssue::NoSuitableRoom { class_id, .. }
            | ScheduleIssue::Unplaceable { class_id, .. } => Some(class_id),
            ScheduleIssue::UnmetDemands { .. } => None,
        }
    }
}
