//! Ring-buffer broadcast protocol and authority board for the Stigmergy
//! core.
//!
//! Many memory-constrained agents exchange short structured facts through
//! one 64-slot shared integer array. This crate layers the protocol on
//! that array:
//!
//! - [`layout`] -- the fixed slot partition (status board + six category
//!   regions)
//! - [`codec`] -- the 16-bit wire format, zero reserved for "empty"
//! - [`ring`] -- per-category ring buffers with a write counter and
//!   bounded catch-up
//! - [`authority`] -- the latest-wins status board with closest-live
//!   discovery
//! - [`communicator`] -- the per-agent facade tying it together
//!
//! The protocol tolerates loss under write contention by design; it never
//! blocks, never retries internally, and signals every recoverable
//! condition through return values rather than errors.

pub mod authority;
pub mod codec;
pub mod communicator;
pub mod error;
pub mod layout;
pub mod ring;

pub use communicator::Communicator;
pub use error::CommsError;
