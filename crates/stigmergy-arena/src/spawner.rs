//! Roster construction for an episode.
//!
//! Spawns the configured number of agents per category at random map
//! positions and assigns sequential identities. If an authority failure
//! round is scripted, the first authority carries it.

use rand::Rng;
use rand::rngs::StdRng;
use stigmergy_types::{AgentId, Category, GridPos, MAP_HEIGHT, MAP_WIDTH};
use tracing::info;

use crate::agent::Agent;
use crate::config::{EpisodeConfig, RosterConfig};

/// Build the episode roster.
pub fn spawn_roster(
    roster: &RosterConfig,
    episode: &EpisodeConfig,
    rng: &mut StdRng,
) -> Vec<Agent> {
    let plan = [
        (Category::Authority, roster.authorities),
        (Category::Gatherer, roster.gatherers),
        (Category::Striker, roster.strikers),
        (Category::Amplifier, roster.amplifiers),
        (Category::Booster, roster.boosters),
        (Category::Disruptor, roster.disruptors),
    ];

    let mut agents = Vec::new();
    let mut next_id = 1_u32;
    for (category, count) in plan {
        for index in 0..count {
            let position = GridPos::new(
                rng.random_range(0..MAP_WIDTH),
                rng.random_range(0..MAP_HEIGHT),
            );
            let mut agent = Agent::new(AgentId(next_id), category, position);
            if category == Category::Authority
                && index == 0
                && let Some(round) = episode.authority_failure_round
            {
                agent = agent.failing_from(round);
            }
            agents.push(agent);
            next_id = next_id.saturating_add(1);
        }
        info!(%category, count, "spawned");
    }
    agents
}
