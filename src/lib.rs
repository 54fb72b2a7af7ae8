//! Weekly class timetable generation.
//!
//! Assigns every required weekly lesson of every class to a time slot and a
//! qualified teacher (and, optionally, a room) without double-booking any
//! of them, consulting a pluggable rule engine for soft pedagogy rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ClassGroup`, `Subject`, `Teacher`, `Room`,
//!   `TimeGrid`, `TimeSlot`, `Schedule`, `ScheduleConfig`
//! - **`rules`**: The `RuleEngine` contract, composable `RuleSet`, and the
//!   default consecutive-subject and spacing rules
//! - **`scheduler`**: The randomized greedy assignment engine, report
//!   formatting, KPIs, and post-hoc audit
//! - **`validation`**: Input integrity checks (duplicate IDs, zero quotas,
//!   out-of-grid availability)
//! - **`error`**: Fatal `ConfigError` and accumulated `ScheduleIssue`
//!
//! # Example
//!
//! ```
//! use class_timetable::models::{ClassGroup, ScheduleConfig, Subject, Teacher};
//! use class_timetable::scheduler::{format_schedule, TimetableScheduler};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let config = ScheduleConfig::new("Grade 1");
//! let classes = vec![
//!     ClassGroup::new("1A")
//!         .with_subject(Subject::new("Math", 5))
//!         .with_subject(Subject::new("Art", 2)),
//! ];
//! let teachers = vec![
//!     Teacher::new("T1").with_subject("Math"),
//!     Teacher::new("T2").with_subject("Art"),
//! ];
//!
//! let scheduler = TimetableScheduler::with_default_rules(config.clone());
//! let outcome = scheduler
//!     .generate(&classes, &teachers, &[], &mut SmallRng::seed_from_u64(1))
//!     .unwrap();
//! assert!(outcome.is_success());
//!
//! let rows = format_schedule(&outcome.schedule, &config.time_grid, &classes, &teachers);
//! assert_eq!(rows.len(), 7);
//! ```
//!
//! # Logging
//!
//! Runs emit `tracing` events (`info` per run, `warn` per recorded issue,
//! `debug`/`trace` per demand). Installing a subscriber is up to the caller.

pub mod error;
pub mod models;
pub mod rules;
pub mod scheduler;
pub mod validation;

pub use error::{ConfigError, IssueKind, ScheduleIssue};
pub use scheduler::{generate_schedule, ScheduleOutcome, TimetableScheduler};
