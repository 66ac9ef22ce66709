//! Shared-array channel boundary for the Stigmergy broadcast core.
//!
//! The whole swarm communicates through one fixed-size array of integer
//! slots owned by the surrounding environment. This crate defines that
//! boundary: the slot primitives, the [`SharedChannel`] and
//! [`AgentContext`] traits the protocol core is written against, and
//! [`RoundArray`], an in-process reference environment with round-scoped
//! write-contention rules, used by every test and by the arena binary.
//!
//! Nothing here blocks or retries. `try_write` either commits immediately
//! or reports `false`; retry policy belongs to agent logic.

pub mod channel;
pub mod round_array;

pub use channel::{AgentContext, SharedChannel};
pub use round_array::RoundArray;

/// Number of slots in the shared array.
pub const SLOT_COUNT: usize = 64;

/// The integer type one slot holds.
///
/// A value of [`EMPTY`] always means "empty/unset"; the codec guarantees
/// no encoded message collides with it.
pub type SlotValue = u16;

/// The reserved "empty/unset" slot value.
pub const EMPTY: SlotValue = 0;
