//! Room model.
//!
//! Rooms are an optional resource dimension. When a run is given rooms,
//! every lesson must also be placed in a room of an acceptable type with
//! enough seats.

use serde::{Deserialize, Serialize};

use super::{Availability, ClassGroup, Subject, TimeSlot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    /// Room classification (e.g. "classroom", "lab", "gym").
    pub room_type: String,
    /// Seats.
    pub capacity: u32,
    #[serde(default)]
    pub availability: Availability,
}

impl Room {
    pub fn new(id: impl Into<String>, room_type: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            room_type: room_type.into(),
            capacity,
            availability: Availability::always(),
        }
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn is_available_at(&self, slot: &TimeSlot) -> bool {
        self.availability.is_available_at(slot)
    }

    /// Whether this room can host `subject` for `class` (type and seats).
    pub fn suits(&self, subject: &Subject, class: &ClassGroup) -> bool {
        subject.accepts_room_type(&self.room_type) && self.capacity >= class.student_count
    }
}
