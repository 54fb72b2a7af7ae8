//! Subject requirement model.
//!
//! A subject as it appears in a class's curriculum: how many periods per
//! week it needs and where in the day it may go.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::DayPart;

/// Subject ordering weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Numeric weight (HIGH = 3, MEDIUM = 2, LOW = 1).
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// A subject with its weekly quota for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name, unique within a class.
    pub name: String,
    /// Periods required per week (> 0).
    pub weekly_hours: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub requires_consecutive_periods: bool,
    /// Upper bound on periods of this subject per class per day (>= 1).
    #[serde(default = "default_max_periods_per_day")]
    pub max_periods_per_day: u32,
    /// Day-parts this subject may be placed in. `None` = any.
    #[serde(default)]
    pub allowed_day_parts: Option<BTreeSet<DayPart>>,
    /// Room types acceptable for this subject. Empty = any.
    #[serde(default)]
    pub required_room_types: BTreeSet<String>,
}

fn default_max_periods_per_day() -> u32 {
    2
}

impl Subject {
    pub fn new(name: impl Into<String>, weekly_hours: u32) -> Self {
        Self {
            name: name.into(),
            weekly_hours,
            priority: Priority::Medium,
            requires_consecutive_periods: false,
            max_periods_per_day: default_max_periods_per_day(),
            allowed_day_parts: None,
            required_room_types: BTreeSet::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_max_per_day(mut self, max: u32) -> Self {
        self.max_periods_per_day = max;
        self
    }

    pub fn with_consecutive_periods(mut self, required: bool) -> Self {
        self.requires_consecutive_periods = required;
        self
    }

    /// Restricts the subject to the given day-parts.
    pub fn with_allowed_day_parts(mut self, parts: impl IntoIterator<Item = DayPart>) -> Self {
        self.allowed_day_parts = Some(parts.into_iter().collect());
        self
    }

    /// Adds an acceptable room type.
    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.required_room_types.insert(room_type.into());
        self
    }

    /// Whether the subject may be placed in `part`.
    pub fn allows_day_part(&self, part: DayPart) -> bool {
        match &self.allowed_day_parts {
            None => true,
            Some(parts) => parts.contains(&part),
        }
    }

    /// Whether a room of `room_type` is acceptable.
    pub fn accepts_room_type(&self, room_type: &str) -> bool {
        self.required_room_types.is_empty() || self.required_room_types.contains(room_type)
    }
}
