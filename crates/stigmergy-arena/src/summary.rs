//! End-of-episode summary record.
//!
//! Serialized as JSON on stdout when the episode finishes, so runs can be
//! compared and archived without scraping logs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stigmergy_channel::SlotValue;
use uuid::Uuid;

use crate::agent::RoundStats;

/// A serializable record of one finished episode.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    /// Unique identifier for this run.
    pub episode_id: Uuid,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Rounds executed.
    pub rounds: u32,
    /// Agents in the roster.
    pub agents: usize,
    /// Deposits on the generated field.
    pub sites: usize,
    /// Hostile contacts on the generated field.
    pub hostiles: usize,
    /// Communication totals across all rounds and agents.
    pub totals: RoundStats,
    /// Final committed value of every slot, in slot order.
    pub final_slots: Vec<SlotValue>,
}
