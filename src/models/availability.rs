//! Weekly availability of a teacher or room.
//!
//! # Precedence
//! Blocked slots override open slots. A slot is available iff:
//! - `open` is empty (always available) or contains the slot, AND
//! - `blocked` does not contain the slot.
//!
//! An empty `open` set is an explicit "always available" sentinel, never
//! "never available".

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{SlotKey, TimeSlot, Weekday};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Availability {
    /// Slots the resource can be used in. Empty = every slot.
    pub open: BTreeSet<SlotKey>,
    /// Slots the resource can never be used in.
    pub blocked: BTreeSet<SlotKey>,
}

impl Availability {
    /// Always available.
    pub fn always() -> Self {
        Self::default()
    }

    /// Available only at the listed slots.
    pub fn only(slots: impl IntoIterator<Item = SlotKey>) -> Self {
        Self {
            open: slots.into_iter().collect(),
            blocked: BTreeSet::new(),
        }
    }

    /// Adds an open slot.
    pub fn with_open(mut self, weekday: Weekday, period: u8) -> Self {
        self.open.insert(SlotKey::new(weekday, period));
        self
    }

    /// Adds a blocked slot.
    pub fn with_blocked(mut self, weekday: Weekday, period: u8) -> Self {
        self.blocked.insert(SlotKey::new(weekday, period));
        self
    }

    /// Whether no restriction is configured at all.
    pub fn is_unrestricted(&self) -> bool {
        self.open.is_empty() && self.blocked.is_empty()
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        if self.blocked.contains(&key) {
            return false;
        }
        self.open.is_empty() || self.open.contains(&key)
    }

    pub fn is_available_at(&self, slot: &TimeSlot) -> bool {
        self.contains(slot.key())
    }

    /// All slot keys mentioned by this availability (open and blocked).
    pub fn mentioned(&self) -> impl Iterator<Item = &SlotKey> {
        self.open.iter().chain(self.blocked.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_always_available() {
        let a = Availability::always();
        assert!(a.is_unrestricted());
        assert!(a.contains(SlotKey::new(Weekday::Monday, 1)));
        assert!(a.contains(SlotKey::new(Weekday::Sunday, 12)));
    }

    #[test]
    fn test_open_slots_restrict() {
        let a = Availability::always()
            .with_open(Weekday::Monday, 1)
            .with_open(Weekday::Tuesday, 3);
        assert!(a.contains(SlotKey::new(Weekday::Monday, 1)));
        assert!(!a.contains(SlotKey::new(Weekday::Monday, 2)));
        assert!(a.contains(SlotKey::new(Weekday::Tuesday, 3)));
    }

    #[test]
    fn test_blocked_overrides_open() {
        let a = Availability::only([SlotKey::new(Weekday::Friday, 2)])
            .with_blocked(Weekday::Friday, 2);
        assert!(!a.contains(SlotKey::new(Weekday::Friday, 2)));

        let b = Availability::always().with_blocked(Weekday::Friday, 4);
        assert!(b.contains(SlotKey::new(Weekday::Friday, 3)));
        assert!(!b.contains(SlotKey::new(Weekday::Friday, 4)));
    }
}
