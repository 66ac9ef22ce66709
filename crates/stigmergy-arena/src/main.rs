//! Arena binary for the Stigmergy broadcast core.
//!
//! Drives a scripted swarm against one shared [`RoundArray`] for a
//! configured number of rounds: authorities publish status to the board,
//! scouts and strikers feed the category rings, workers consume and
//! react. The point is to exercise the protocol end to end under the
//! real contention rules, not to play well.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `stigmergy-arena.yaml`
//! 3. Seed the episode RNG and generate the field
//! 4. Spawn the roster
//! 5. Create the shared channel with the configured write budget
//! 6. Run the round loop
//! 7. Emit the episode summary as JSON

mod agent;
mod config;
mod error;
mod field;
mod spawner;
mod summary;

use std::path::Path;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use stigmergy_channel::RoundArray;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::agent::RoundStats;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::field::Field;
use crate::summary::EpisodeSummary;

/// Application entry point for the arena.
///
/// # Errors
///
/// Returns an error if configuration loading, the protocol, or summary
/// serialization fails.
fn main() -> Result<(), ArenaError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("stigmergy-arena starting");

    // 2. Load configuration.
    let config = ArenaConfig::load(Path::new("stigmergy-arena.yaml"))?;
    info!(
        rounds = config.episode.rounds,
        seed = config.episode.seed,
        write_budget = config.episode.write_budget,
        "Configuration loaded"
    );

    // 3. Seed the episode RNG and generate the field.
    let mut rng = StdRng::seed_from_u64(config.episode.seed);
    let field = Field::generate(&config.field, &mut rng);
    info!(
        sites = field.site_count(),
        hostiles = field.hostile_count(),
        "Field generated"
    );

    // 4. Spawn the roster.
    let mut roster = spawner::spawn_roster(&config.roster, &config.episode, &mut rng);
    info!(agents = roster.len(), "Roster spawned");

    // 5. Create the shared channel.
    let mut channel = RoundArray::with_budget(config.episode.write_budget);

    // 6. Run the round loop.
    let episode_id = Uuid::new_v4();
    let started_at = Utc::now();
    let mut totals = RoundStats::default();
    for round in 0..config.episode.rounds {
        let mut stats = RoundStats::default();
        for agent in &mut roster {
            agent.act(round, &mut channel, &field, &mut rng, &mut stats)?;
        }
        channel.advance_round();
        debug!(
            round,
            sent = stats.sent,
            deferred = stats.deferred,
            delivered = stats.delivered,
            rebinds = stats.rebinds,
            "round complete"
        );
        totals.merge(stats);
    }

    info!(
        sent = totals.sent,
        deferred = totals.deferred,
        delivered = totals.delivered,
        rebinds = totals.rebinds,
        "episode complete"
    );

    // 7. Emit the episode summary.
    let summary = EpisodeSummary {
        episode_id,
        started_at,
        rounds: config.episode.rounds,
        agents: roster.len(),
        sites: field.site_count(),
        hostiles: field.hostile_count(),
        totals,
        final_slots: channel.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
