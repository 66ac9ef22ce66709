//! Error types for the arena binary.

/// Top-level error for the arena binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The broadcast protocol reported a non-recoverable condition.
    #[error("comms error: {source}")]
    Comms {
        /// The underlying protocol error.
        #[from]
        source: stigmergy_comms::CommsError,
    },

    /// The episode summary could not be serialized.
    #[error("summary serialization error: {source}")]
    Summary {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
