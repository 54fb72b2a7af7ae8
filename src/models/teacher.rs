//! Teacher model.
//!
//! Teachers are the human resource of a timetable: each is qualified for a
//! set of subjects, capped in periods per day and per week, and restricted
//! to an [`Availability`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Availability, TimeSlot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    pub name: String,
    /// Names of subjects this teacher may teach.
    pub subjects: BTreeSet<String>,
    #[serde(default = "default_max_hours_per_day")]
    pub max_hours_per_day: u32,
    #[serde(default = "default_max_hours_per_week")]
    pub max_hours_per_week: u32,
    #[serde(default)]
    pub availability: Availability,
}

fn default_max_hours_per_day() -> u32 {
    6
}

fn default_max_hours_per_week() -> u32 {
    25
}

impl Teacher {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: BTreeSet::new(),
            max_hours_per_day: default_max_hours_per_day(),
            max_hours_per_week: default_max_hours_per_week(),
            availability: Availability::always(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a qualified subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.insert(subject.into());
        self
    }

    /// Sets the daily and weekly period caps.
    pub fn with_limits(mut self, per_day: u32, per_week: u32) -> Self {
        self.max_hours_per_day = per_day;
        self.max_hours_per_week = per_week;
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn can_teach(&self, subject: &str) -> bool {
        self.subjects.contains(subject)
    }

    /// Checks availability at `slot`. An empty availability means always.
    pub fn is_available_at(&self, slot: &TimeSlot) -> bool {
        self.availability.is_available_at(slot)
    }
}
