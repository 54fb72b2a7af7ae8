//! Placement rules and the rule-engine contract.
//!
//! The assignment engine consults a [`RuleEngine`] for every candidate that
//! survived the hard-conflict checks. Any returned [`Violation`] rejects the
//! candidate, whatever its [`Severity`]; severity and priority are
//! bookkeeping for the rule set and for callers inspecting violations.
//!
//! # Usage
//!
//! ```
//! use class_timetable::models::SchedulingPolicy;
//! use class_timetable::rules::{builtin, RuleSet};
//!
//! let defaults = RuleSet::from_policy(&SchedulingPolicy::default());
//! assert_eq!(defaults.rule_names(), vec!["consecutive-subject", "subject-spacing"]);
//!
//! let custom = RuleSet::empty().with_rule(builtin::SubjectSpacingRule::new(2));
//! assert_eq!(custom.len(), 1);
//! ```
//!
//! Closures of shape `Fn(&Schedule, &Placement) -> Vec<Violation>` are rule
//! engines too, which keeps one-off rules out of the type system.

mod engine;
pub mod builtin;

pub use builtin::{ConsecutiveSubjectRule, SubjectSpacingRule};
pub use engine::RuleSet;

use serde::Serialize;
use std::fmt::Debug;

use crate::models::{ClassGroup, Room, Schedule, ScheduleEntry, Subject, Teacher};

/// A candidate lesson together with the domain objects it refers to.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub entry: &'a ScheduleEntry,
    pub class: &'a ClassGroup,
    pub subject: &'a Subject,
    pub teacher: &'a Teacher,
    pub room: Option<&'a Room>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hard,
    Soft,
}

/// Classification of rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    /// Too many adjacent periods of one subject.
    ConsecutiveSubject,
    /// Two lessons of one subject too close together on one day.
    SubjectSpacing,
    /// Rule-specific violation.
    Custom(String),
}

/// A reason a candidate placement is unacceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: Severity,
    /// Higher = more important.
    pub priority: u8,
    pub message: String,
}

impl Violation {
    pub fn hard(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Hard,
            priority: 100,
            message: message.into(),
        }
    }

    pub fn soft(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Soft,
            priority: 50,
            message: message.into(),
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// Evaluates a candidate placement against the current schedule.
///
/// Returns every violation found; an empty list accepts the candidate.
pub trait RuleEngine {
    fn check(&self, schedule: &Schedule, placement: &Placement<'_>) -> Vec<Violation>;
}

impl<F> RuleEngine for F
where
    F: Fn(&Schedule, &Placement<'_>) -> Vec<Violation>,
{
    fn check(&self, schedule: &Schedule, placement: &Placement<'_>) -> Vec<Violation> {
        self(schedule, placement)
    }
}

/// A single placement rule, composable into a [`RuleSet`].
pub trait PlacementRule: Send + Sync + Debug {
    /// Short identifier (e.g. "subject-spacing").
    fn name(&self) -> &'static str;

    /// Returns a violation if `placement` breaks this rule.
    fn check(&self, schedule: &Schedule, placement: &Placement<'_>) -> Option<Violation>;

    fn description(&self) -> &'static str {
        self.name()
    }
}
