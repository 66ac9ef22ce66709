//! Configuration loading and typed config structures for the arena.
//!
//! The canonical configuration lives in `stigmergy-arena.yaml` at the
//! project root. This module defines strongly-typed structs mirroring the
//! YAML structure and a loader that falls back to defaults when the file
//! is absent, so `cargo run` works out of the box.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level arena configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArenaConfig {
    /// Episode-level settings (length, seed, channel budget).
    #[serde(default)]
    pub episode: EpisodeConfig,

    /// How many agents of each category to spawn.
    #[serde(default)]
    pub roster: RosterConfig,

    /// How the field of sites and hostiles is generated.
    #[serde(default)]
    pub field: FieldConfig,
}

impl ArenaConfig {
    /// Load configuration from `path`, or defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = serde_yml::from_str(&raw)?;
        Ok(config)
    }
}

/// Episode-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EpisodeConfig {
    /// Number of rounds to run.
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Seed for all randomness in the episode (field layout, walks).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Array-wide committed-write budget per round.
    #[serde(default = "default_write_budget")]
    pub write_budget: u32,

    /// Round at which the first authority starts reporting itself dead,
    /// exercising consumer rebinding. `None` keeps every authority alive.
    #[serde(default = "default_failure_round")]
    pub authority_failure_round: Option<u32>,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            seed: default_seed(),
            write_budget: default_write_budget(),
            authority_failure_round: default_failure_round(),
        }
    }
}

const fn default_rounds() -> u32 {
    120
}

const fn default_seed() -> u64 {
    7
}

const fn default_write_budget() -> u32 {
    8
}

const fn default_failure_round() -> Option<u32> {
    Some(80)
}

/// Number of agents per category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// Coordinating authorities (at most the four board slots can
    /// publish; extras surface the exhaustion error).
    #[serde(default = "default_authorities")]
    pub authorities: u32,

    /// Gatherers consuming site reports.
    #[serde(default = "default_gatherers")]
    pub gatherers: u32,

    /// Strikers consuming hostile reports.
    #[serde(default = "default_strikers")]
    pub strikers: u32,

    /// Scouting amplifiers producing reports.
    #[serde(default = "default_amplifiers")]
    pub amplifiers: u32,

    /// Boosters shadowing gatherer traffic.
    #[serde(default = "default_boosters")]
    pub boosters: u32,

    /// Disruptors shadowing striker traffic.
    #[serde(default = "default_disruptors")]
    pub disruptors: u32,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            authorities: default_authorities(),
            gatherers: default_gatherers(),
            strikers: default_strikers(),
            amplifiers: default_amplifiers(),
            boosters: default_boosters(),
            disruptors: default_disruptors(),
        }
    }
}

const fn default_authorities() -> u32 {
    2
}

const fn default_gatherers() -> u32 {
    4
}

const fn default_strikers() -> u32 {
    3
}

const fn default_amplifiers() -> u32 {
    2
}

const fn default_boosters() -> u32 {
    1
}

const fn default_disruptors() -> u32 {
    1
}

/// Field generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldConfig {
    /// Number of crystal deposits scattered on the map.
    #[serde(default = "default_crystal_sites")]
    pub crystal_sites: u32,

    /// Number of flux deposits.
    #[serde(default = "default_flux_sites")]
    pub flux_sites: u32,

    /// Number of ember deposits.
    #[serde(default = "default_ember_sites")]
    pub ember_sites: u32,

    /// Number of hostile contacts.
    #[serde(default = "default_hostiles")]
    pub hostiles: u32,

    /// Squared sensing radius within which an agent notices a site or
    /// hostile.
    #[serde(default = "default_sense_radius_squared")]
    pub sense_radius_squared: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            crystal_sites: default_crystal_sites(),
            flux_sites: default_flux_sites(),
            ember_sites: default_ember_sites(),
            hostiles: default_hostiles(),
            sense_radius_squared: default_sense_radius_squared(),
        }
    }
}

const fn default_crystal_sites() -> u32 {
    5
}

const fn default_flux_sites() -> u32 {
    4
}

const fn default_ember_sites() -> u32 {
    3
}

const fn default_hostiles() -> u32 {
    4
}

const fn default_sense_radius_squared() -> u32 {
    18
}
