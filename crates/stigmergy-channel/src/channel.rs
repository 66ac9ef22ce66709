//! Traits describing what the environment provides to the protocol core.
//!
//! [`SharedChannel`] is the array itself; [`AgentContext`] is the per-agent
//! oracle (identity, role, position). The two are separate because the
//! array is shared across the swarm while the context is the calling
//! agent's own view, and tests routinely combine one array with many
//! contexts.

use stigmergy_types::{AgentId, Category, GridPos};

use crate::SlotValue;

/// Round-scoped access to the shared slot array.
///
/// Writes obey a first-writer-wins discipline: within one round at most
/// one write to a given slot commits, and implementations may additionally
/// enforce an array-wide per-round write budget. There is no queueing and
/// no retrying -- a failed write is simply `false`.
pub trait SharedChannel {
    /// Read the last committed value of a slot.
    ///
    /// Always succeeds. Out-of-range slots read as [`crate::EMPTY`], the
    /// same as a slot nothing has written yet. Reads observe writes
    /// committed in earlier rounds plus writes already committed earlier
    /// in the current round.
    fn read(&self, slot: usize) -> SlotValue;

    /// Attempt to commit `value` to `slot` this round.
    ///
    /// Returns `true` and commits iff no other write has already been
    /// committed to `slot` this round and the round's write budget is not
    /// exhausted. Otherwise returns `false` and leaves the prior value
    /// untouched. Out-of-range slots always fail.
    fn try_write(&mut self, slot: usize, value: SlotValue) -> bool;
}

/// The calling agent's identity, role, and position, as reported by the
/// environment each round.
pub trait AgentContext {
    /// The agent's environment-assigned identity.
    fn id(&self) -> AgentId;

    /// The agent's category (role), which is also its inbox address.
    fn category(&self) -> Category;

    /// The agent's current map position.
    fn position(&self) -> GridPos;
}
