//! Error types for the `stigmergy-comms` crate.
//!
//! Transient conditions (write contention, no live authority yet) are not
//! errors: they surface as `Ok(false)` or empty results so callers retry
//! on a later round. [`CommsError`] is reserved for misconfiguration and
//! wire corruption.

use stigmergy_channel::SlotValue;
use stigmergy_types::GridPos;

/// Errors that can occur in the broadcast protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommsError {
    /// A position outside the map was asked to cross the wire.
    #[error("position {position} is off the map and cannot be encoded")]
    CoordinateOutOfBounds {
        /// The offending position.
        position: GridPos,
    },

    /// A slot held a coordinate pack outside the valid range.
    ///
    /// Only a writer bypassing the codec can produce this; participants
    /// are trusted, so this is corruption, not contention.
    #[error("slot value {raw} does not decode to an on-map coordinate")]
    CorruptCoordinate {
        /// The raw slot value.
        raw: SlotValue,
    },

    /// A board slot held a status tag outside the catalogue.
    #[error("slot value {raw} carries an unknown authority status tag")]
    CorruptStatusTag {
        /// The raw slot value.
        raw: SlotValue,
    },

    /// Every authority board slot is already claimed.
    ///
    /// Fatal for the excess authority: it can never publish. Kept distinct
    /// from transient contention so operators can spot the
    /// misconfiguration (more authorities than board slots).
    #[error("all authority board slots are claimed; this authority cannot publish")]
    AuthorityBoardFull,
}
