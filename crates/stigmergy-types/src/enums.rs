//! Closed enumeration types for the Stigmergy broadcast core.
//!
//! Every catalogue here is deliberately closed: the protocol dispatches on
//! these enums with exhaustive matches, so adding a variant forces every
//! routing and codec site to be revisited at compile time.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The role of an agent, which doubles as its inbox address.
///
/// Each category owns a statically assigned region of the shared array.
/// [`Category::Authority`] additionally publishes to the authority status
/// board rather than reading it like everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Coordinating entity; publishes latest-wins status to the board.
    Authority,
    /// Collects resources from sites reported over the channel.
    Gatherer,
    /// Engages hostile contacts reported over the channel.
    Striker,
    /// Support role amplifying nearby gatherers.
    Booster,
    /// Support role degrading hostile positions.
    Disruptor,
    /// Relay role extending the swarm's effective range.
    Amplifier,
}

impl Category {
    /// All categories, in inbox-region order.
    pub const ALL: [Self; 6] = [
        Self::Authority,
        Self::Gatherer,
        Self::Striker,
        Self::Booster,
        Self::Disruptor,
        Self::Amplifier,
    ];
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Authority => "authority",
            Self::Gatherer => "gatherer",
            Self::Striker => "striker",
            Self::Booster => "booster",
            Self::Disruptor => "disruptor",
            Self::Amplifier => "amplifier",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// AuthorityStatus
// ---------------------------------------------------------------------------

/// Lifecycle status published by an authority to its board slot.
///
/// The catalogue is sized to fit the 2-bit wire tag. [`AuthorityStatus::Dead`]
/// is terminal: discovery skips dead authorities and consumers bound to one
/// should rebind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AuthorityStatus {
    /// Accumulating agents before production starts.
    Staging,
    /// Steady-state production.
    Producing,
    /// Pushing the swarm outward to new territory.
    Expanding,
    /// Destroyed; consumers must not route toward this authority.
    Dead,
}

impl AuthorityStatus {
    /// All statuses, in wire-tag order.
    pub const ALL: [Self; 4] = [Self::Staging, Self::Producing, Self::Expanding, Self::Dead];

    /// Whether this status is terminal.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Dead)
    }
}

// ---------------------------------------------------------------------------
// MessageKind
// ---------------------------------------------------------------------------

/// Field-less selector for the message catalogue.
///
/// Used on the receive side, where the caller names the kind it wants to
/// drain, and as the key of per-agent receive cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Latest-wins status of a coordinating authority.
    Authority,
    /// Hostile contact sighted at a position.
    Hostile,
    /// Crystal deposit located at a position.
    CrystalSite,
    /// Flux deposit located at a position.
    FluxSite,
    /// Ember deposit located at a position.
    EmberSite,
}

impl MessageKind {
    /// All kinds in the catalogue.
    pub const ALL: [Self; 5] = [
        Self::Authority,
        Self::Hostile,
        Self::CrystalSite,
        Self::FluxSite,
        Self::EmberSite,
    ];
}
