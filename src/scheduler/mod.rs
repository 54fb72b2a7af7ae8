//! Timetable assignment, reporting, and KPI evaluation.
//!
//! # Algorithm
//!
//! [`TimetableScheduler`] runs a demand-centric randomized greedy pass: one
//! demand per required weekly hour, each placed at the first acceptable
//! (slot, teacher, room) combination in shuffled order. It is not optimal
//! and never backtracks, but every committed lesson satisfies the hard
//! invariants and the configured rules.
//!
//! # Output
//!
//! - [`format_schedule`] / [`ScheduleReport`]: display rows sorted by
//!   `(class_id, weekday, period)`.
//! - [`ScheduleKpi`]: fulfillment and teacher-load metrics.
//! - [`audit_schedule`]: independent re-check of a finished timetable.

mod demand;
mod engine;
mod kpi;
mod report;

pub use demand::{build_demands, Demand};
pub use engine::{generate_schedule, RunStats, ScheduleOutcome, TimetableScheduler};
pub use kpi::{audit_schedule, AuditFinding, ScheduleKpi};
pub use report::{format_schedule, sort_entries, FormattedEntry, ScheduleReport};
