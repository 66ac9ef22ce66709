//! In-process reference implementation of the shared slot array.
//!
//! [`RoundArray`] models the contention rules the real environment
//! enforces: each slot accepts at most one committed write per round, and
//! the whole array accepts at most a configured number of writes per
//! round. Rounds advance only when the driving loop calls
//! [`RoundArray::advance_round`]; the protocol core itself never touches
//! the round state.

use crate::channel::SharedChannel;
use crate::{EMPTY, SLOT_COUNT, SlotValue};

/// Default array-wide write budget per round.
///
/// Deliberately smaller than a busy swarm wants, so contention paths are
/// exercised rather than theoretical.
pub const DEFAULT_WRITE_BUDGET: u32 = 8;

/// The shared slot array with round-scoped write contention.
///
/// All slots start at [`EMPTY`] at the beginning of an episode. The array
/// persists for the whole episode; no agent owns it.
#[derive(Debug, Clone)]
pub struct RoundArray {
    /// Committed slot values.
    cells: [SlotValue; SLOT_COUNT],
    /// Which slots have already been committed this round.
    written: [bool; SLOT_COUNT],
    /// Maximum number of committed writes per round, array-wide.
    budget: u32,
    /// Committed writes so far this round.
    writes_this_round: u32,
    /// Current round number (0-indexed).
    round: u64,
}

impl RoundArray {
    /// Create a zeroed array with the default write budget.
    pub const fn new() -> Self {
        Self::with_budget(DEFAULT_WRITE_BUDGET)
    }

    /// Create a zeroed array with an explicit per-round write budget.
    pub const fn with_budget(budget: u32) -> Self {
        Self {
            cells: [EMPTY; SLOT_COUNT],
            written: [false; SLOT_COUNT],
            budget,
            writes_this_round: 0,
            round: 0,
        }
    }

    /// Current round number.
    pub const fn round(&self) -> u64 {
        self.round
    }

    /// Committed writes so far in the current round.
    pub const fn writes_this_round(&self) -> u32 {
        self.writes_this_round
    }

    /// Finish the current round: clear the per-round written set and the
    /// budget usage, and bump the round counter.
    pub fn advance_round(&mut self) {
        self.written = [false; SLOT_COUNT];
        self.writes_this_round = 0;
        self.round = self.round.saturating_add(1);
    }

    /// Snapshot of all committed slot values, in slot order.
    pub fn snapshot(&self) -> Vec<SlotValue> {
        self.cells.to_vec()
    }
}

impl Default for RoundArray {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedChannel for RoundArray {
    fn read(&self, slot: usize) -> SlotValue {
        self.cells.get(slot).copied().unwrap_or(EMPTY)
    }

    fn try_write(&mut self, slot: usize, value: SlotValue) -> bool {
        if self.writes_this_round >= self.budget {
            return false;
        }
        let Some(written) = self.written.get_mut(slot) else {
            return false;
        };
        if *written {
            return false;
        }
        *written = true;
        if let Some(cell) = self.cells.get_mut(slot) {
            *cell = value;
        }
        self.writes_this_round = self.writes_this_round.saturating_add(1);
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let array = RoundArray::new();
        for slot in 0..SLOT_COUNT {
            assert_eq!(array.read(slot), EMPTY);
        }
        assert_eq!(array.round(), 0);
    }

    #[test]
    fn first_writer_wins_within_a_round() {
        let mut array = RoundArray::new();
        assert!(array.try_write(10, 111));
        // Second write to the same slot in the same round loses, and the
        // winner's value stays.
        assert!(!array.try_write(10, 222));
        assert_eq!(array.read(10), 111);
    }

    #[test]
    fn slot_reopens_next_round() {
        let mut array = RoundArray::new();
        assert!(array.try_write(10, 111));
        array.advance_round();
        assert!(array.try_write(10, 222));
        assert_eq!(array.read(10), 222);
        assert_eq!(array.round(), 1);
    }

    #[test]
    fn budget_exhaustion_blocks_distinct_slots() {
        let mut array = RoundArray::with_budget(2);
        assert!(array.try_write(0, 1));
        assert!(array.try_write(1, 2));
        assert!(!array.try_write(2, 3));
        assert_eq!(array.read(2), EMPTY);

        array.advance_round();
        assert!(array.try_write(2, 3));
    }

    #[test]
    fn out_of_range_reads_empty_and_writes_fail() {
        let mut array = RoundArray::new();
        assert_eq!(array.read(SLOT_COUNT), EMPTY);
        assert!(!array.try_write(SLOT_COUNT, 5));
        // A failed out-of-range write must not consume budget.
        assert_eq!(array.writes_this_round(), 0);
    }

    #[test]
    fn same_round_reads_see_committed_writes() {
        let mut array = RoundArray::new();
        assert!(array.try_write(3, 42));
        assert_eq!(array.read(3), 42);
    }
}
