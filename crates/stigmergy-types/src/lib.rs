//! Shared type definitions for the Stigmergy broadcast core.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the Stigmergy workspace: agent identity, the closed category and status
//! catalogues, grid positions, and the message catalogue itself.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrapper for environment-assigned agent identity
//! - [`enums`] -- Closed enumerations (categories, authority status, kinds)
//! - [`grid`] -- Bounded map coordinates and squared-distance math
//! - [`message`] -- The tagged message catalogue exchanged over the channel

pub mod enums;
pub mod grid;
pub mod ids;
pub mod message;

// Re-export all public types at crate root for convenience.
pub use enums::{AuthorityStatus, Category, MessageKind};
pub use grid::{GridPos, MAP_HEIGHT, MAP_WIDTH};
pub use ids::AgentId;
pub use message::Message;
