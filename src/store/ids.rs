//! Event id generation

use crate::types::EventId;
use crate::utils::current_timestamp_millis;

/// Timestamp-derived ids that never repeat within one store.
///
/// Each id is the current epoch millisecond, bumped past the largest id
/// issued or observed so far.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: EventId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the wall clock
    pub fn next_id(&mut self) -> EventId {
        self.next_at(current_timestamp_millis())
    }

    /// Next id given the current time in milliseconds
    pub fn next_at(&mut self, now: EventId) -> EventId {
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Record an id that entered the store from elsewhere
    pub fn observe(&mut self, id: EventId) {
        if id > self.last {
            self.last = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000), 1_000);
        assert_eq!(ids.next_at(1_000), 1_001);
        assert_eq!(ids.next_at(1_000), 1_002);
        assert_eq!(ids.next_at(5_000), 5_000);
    }

    #[test]
    fn test_observed_ids_are_skipped() {
        let mut ids = IdGenerator::new();
        ids.observe(2_000);
        ids.observe(1_500);
        assert_eq!(ids.next_at(1_000), 2_001);
    }

    #[test]
    fn test_wall_clock_ids_increase() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }
}
