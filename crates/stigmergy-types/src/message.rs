//! The message catalogue exchanged over the shared channel.
//!
//! A message is a tagged value: one variant per kind, carrying exactly the
//! fields relevant to that kind. The representation makes the "exactly the
//! relevant fields are populated" invariant structural -- there is no way
//! to build a hostile sighting with a status, or an authority update with
//! a recipient inbox.

use serde::{Deserialize, Serialize};

use crate::enums::{AuthorityStatus, Category, MessageKind};
use crate::grid::GridPos;

/// A structured fact broadcast through the shared array.
///
/// Messages are created by agent logic each round, encoded to a single
/// `u16` by the codec, and are never persisted beyond that encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Latest-wins status and position of one coordinating authority.
    Authority {
        /// The authority's current lifecycle status.
        status: AuthorityStatus,
        /// The authority's position.
        position: GridPos,
    },
    /// A hostile contact sighted at a position.
    Hostile {
        /// Which category's inbox receives the sighting.
        recipient: Category,
        /// Where the contact was seen.
        position: GridPos,
    },
    /// A crystal deposit located at a position.
    CrystalSite {
        /// Which category's inbox receives the report.
        recipient: Category,
        /// Where the deposit sits.
        position: GridPos,
    },
    /// A flux deposit located at a position.
    FluxSite {
        /// Which category's inbox receives the report.
        recipient: Category,
        /// Where the deposit sits.
        position: GridPos,
    },
    /// An ember deposit located at a position.
    EmberSite {
        /// Which category's inbox receives the report.
        recipient: Category,
        /// Where the deposit sits.
        position: GridPos,
    },
}

impl Message {
    /// The kind selector for this message.
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Authority { .. } => MessageKind::Authority,
            Self::Hostile { .. } => MessageKind::Hostile,
            Self::CrystalSite { .. } => MessageKind::CrystalSite,
            Self::FluxSite { .. } => MessageKind::FluxSite,
            Self::EmberSite { .. } => MessageKind::EmberSite,
        }
    }

    /// The inbox this message targets, if it targets one.
    ///
    /// Authority updates go to the status board, not an inbox, so they
    /// return `None`.
    pub const fn recipient(&self) -> Option<Category> {
        match self {
            Self::Authority { .. } => None,
            Self::Hostile { recipient, .. }
            | Self::CrystalSite { recipient, .. }
            | Self::FluxSite { recipient, .. }
            | Self::EmberSite { recipient, .. } => Some(*recipient),
        }
    }

    /// The position carried by this message.
    pub const fn position(&self) -> GridPos {
        match self {
            Self::Authority { position, .. }
            | Self::Hostile { position, .. }
            | Self::CrystalSite { position, .. }
            | Self::FluxSite { position, .. }
            | Self::EmberSite { position, .. } => *position,
        }
    }
}
