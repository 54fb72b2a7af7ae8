//! Timetabling domain models.
//!
//! Provides the data types for describing a weekly timetabling problem and
//! its solution. Everything here is read-only to the assignment engine
//! except [`Schedule`], which is its sole write target.
//!
//! # Domain Mappings
//!
//! | Type | School term | Role in search |
//! |------|-------------|----------------|
//! | ClassGroup | Class / form | Demand owner, hard-conflict key |
//! | Subject | Curriculum line | Quota and placement limits |
//! | Teacher | Teacher | Qualified resource, hard-conflict key |
//! | Room | Classroom / lab | Optional resource, hard-conflict key |
//! | TimeSlot | Weekday × period | Search dimension |

mod availability;
mod class_group;
mod config;
mod room;
mod schedule;
mod subject;
mod teacher;
mod time_grid;
mod time_slot;

pub use availability::Availability;
pub use class_group::ClassGroup;
pub use config::{ScheduleConfig, SchedulingPolicy};
pub use room::Room;
pub use schedule::{HardConflict, Schedule, ScheduleEntry};
pub use subject::{Priority, Subject};
pub use teacher::Teacher;
pub use time_grid::{PeriodTiming, TimeGrid, DEFAULT_DAILY_PERIODS};
pub use time_slot::{DayPart, SlotKey, TimeSlot, Weekday};
