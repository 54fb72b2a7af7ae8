//! Run configuration.
//!
//! [`ScheduleConfig`] carries the active weekdays, the [`TimeGrid`], and the
//! [`SchedulingPolicy`] knobs read by the default rule set. The core conflict
//! checks never consult the policy.

use serde::{Deserialize, Serialize};

use super::{TimeGrid, TimeSlot, Weekday};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub name: String,
    pub weekdays: Vec<Weekday>,
    pub time_grid: TimeGrid,
    pub policy: SchedulingPolicy,
}

/// Policy knobs for the placement rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// Whether a class may have the same subject in adjacent periods.
    pub allow_consecutive_same_subject: bool,
    /// Longest run of adjacent periods of one subject.
    pub max_consecutive_same_subject: u32,
    /// Minimum number of other periods between two non-adjacent lessons of
    /// the same subject on the same day.
    pub min_subject_interval: u32,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            allow_consecutive_same_subject: true,
            max_consecutive_same_subject: 2,
            min_subject_interval: 1,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            name: "timetable".to_string(),
            weekdays: Weekday::through(Weekday::Friday),
            time_grid: TimeGrid::default(),
            policy: SchedulingPolicy::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Monday through `last`.
    pub fn with_week_ending(mut self, last: Weekday) -> Self {
        self.weekdays = Weekday::through(last);
        self
    }

    pub fn with_time_grid(mut self, grid: TimeGrid) -> Self {
        self.time_grid = grid;
        self
    }

    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks the grid split and that at least one weekday is active.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time_grid.validate()?;
        if self.weekdays.is_empty() {
            return Err(ConfigError::NoWeekdays);
        }
        Ok(())
    }

    /// The ordered weekly slot sequence for this configuration.
    pub fn time_slots(&self) -> Result<Vec<TimeSlot>, ConfigError> {
        self.time_grid.generate(&self.weekdays)
    }
}

impl SchedulingPolicy {
    pub fn with_consecutive(mut self, allow: bool, max_run: u32) -> Self {
        self.allow_consecutive_same_subject = allow;
        self.max_consecutive_same_subject = max_run;
        self
    }

    pub fn with_min_interval(mut self, periods: u32) -> Self {
        self.min_subject_interval = periods;
        self
    }
}
