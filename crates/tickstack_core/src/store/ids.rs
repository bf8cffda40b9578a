//! Task id allocation.
//!
//! Ids are clock-seeded so they stay time-like and numeric, but each issued id
//! is strictly greater than the previous one even within one millisecond.

use crate::model::task::TaskId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic id source for one store.
#[derive(Debug, Clone)]
pub struct TaskIdGenerator {
    last: u64,
    clock: fn() -> u64,
}

impl TaskIdGenerator {
    /// Generator seeded by the wall clock in epoch milliseconds.
    pub fn new() -> Self {
        Self::with_clock(epoch_millis)
    }

    /// Generator with a caller-provided clock.
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self { last: 0, clock }
    }

    /// Deterministic generator issuing `1, 2, 3, ...`.
    pub fn sequential() -> Self {
        Self::with_clock(|| 0)
    }

    /// Issues the next id.
    pub fn next_id(&mut self) -> TaskId {
        let candidate = (self.clock)().max(self.last.saturating_add(1));
        self.last = candidate;
        TaskId::new(candidate)
    }

    /// Records an externally assigned id so it is never issued again.
    ///
    /// Text ids that do not spell an integer cannot collide with issued ids
    /// and are ignored.
    pub fn observe(&mut self, id: &TaskId) {
        if let Some(value) = id.numeric_value() {
            self.last = self.last.max(value);
        }
    }
}

impl Default for TaskIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::TaskIdGenerator;
    use crate::model::task::TaskId;

    #[test]
    fn frozen_clock_still_yields_increasing_ids() {
        let mut ids = TaskIdGenerator::with_clock(|| 1_700_000_000_000);
        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first, TaskId::new(1_700_000_000_000));
        assert_eq!(second, TaskId::new(1_700_000_000_001));
    }

    #[test]
    fn observed_ids_are_skipped() {
        let mut ids = TaskIdGenerator::sequential();
        ids.observe(&TaskId::new(41));
        ids.observe(&TaskId::text("a1b2-c3"));
        assert_eq!(ids.next_id(), TaskId::new(42));
        ids.observe(&TaskId::text("50"));
        assert_eq!(ids.next_id(), TaskId::new(51));
    }

    #[test]
    fn wall_clock_ids_are_nonzero() {
        let mut ids = TaskIdGenerator::new();
        assert!(ids.next_id().numeric_value().unwrap_or(0) > 0);
    }
}
