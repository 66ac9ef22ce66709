//! Type-safe wrapper for agent identity.
//!
//! Agent identities are assigned by the surrounding environment as small
//! integers. The newtype prevents accidental mixing with other numeric
//! values (slot indices, counters) at compile time.

use serde::{Deserialize, Serialize};

/// Environment-assigned identity of one agent.
///
/// Identities are opaque to the protocol core: they are never written to
/// the shared array and exist only to label per-agent state and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Return the inner numeric value.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<AgentId> for u32 {
    fn from(id: AgentId) -> Self {
        id.0
    }
}
