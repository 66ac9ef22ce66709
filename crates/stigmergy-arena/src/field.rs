//! Seeded generation of the arena field.
//!
//! The field is the scripted ground truth agents sense against: resource
//! deposits of three flavors and a handful of hostile contacts, scattered
//! uniformly over the map from the episode seed.

use rand::Rng;
use rand::rngs::StdRng;
use stigmergy_types::{GridPos, MAP_HEIGHT, MAP_WIDTH, MessageKind};

use crate::config::FieldConfig;

/// The generated field for one episode.
#[derive(Debug, Clone)]
pub struct Field {
    /// Deposit positions keyed by the report kind they produce.
    sites: Vec<(MessageKind, GridPos)>,
    /// Hostile contact positions.
    hostiles: Vec<GridPos>,
    /// Squared sensing radius for both sites and hostiles.
    sense_radius_squared: u32,
}

impl Field {
    /// Generate a field from configuration and the episode RNG.
    pub fn generate(config: &FieldConfig, rng: &mut StdRng) -> Self {
        let mut sites = Vec::new();
        for _ in 0..config.crystal_sites {
            sites.push((MessageKind::CrystalSite, random_position(rng)));
        }
        for _ in 0..config.flux_sites {
            sites.push((MessageKind::FluxSite, random_position(rng)));
        }
        for _ in 0..config.ember_sites {
            sites.push((MessageKind::EmberSite, random_position(rng)));
        }
        let hostiles = (0..config.hostiles).map(|_| random_position(rng)).collect();
        Self {
            sites,
            hostiles,
            sense_radius_squared: config.sense_radius_squared,
        }
    }

    /// All deposits an agent at `position` currently senses.
    pub fn sensed_sites(&self, position: GridPos) -> Vec<(MessageKind, GridPos)> {
        self.sites
            .iter()
            .copied()
            .filter(|(_, site)| position.distance_squared(*site) <= self.sense_radius_squared)
            .collect()
    }

    /// All hostile contacts an agent at `position` currently senses.
    pub fn sensed_hostiles(&self, position: GridPos) -> Vec<GridPos> {
        self.hostiles
            .iter()
            .copied()
            .filter(|hostile| position.distance_squared(*hostile) <= self.sense_radius_squared)
            .collect()
    }

    /// Total number of deposits on the field.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Total number of hostile contacts on the field.
    pub fn hostile_count(&self) -> usize {
        self.hostiles.len()
    }
}

/// A uniformly random on-map position.
fn random_position(rng: &mut StdRng) -> GridPos {
    GridPos::new(rng.random_range(0..MAP_WIDTH), rng.random_range(0..MAP_HEIGHT))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn generation_is_seed_deterministic() {
        let config = FieldConfig::default();
        let a = Field::generate(&config, &mut StdRng::seed_from_u64(11));
        let b = Field::generate(&config, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.sites, b.sites);
        assert_eq!(a.hostiles, b.hostiles);
    }

    #[test]
    fn sensing_respects_the_radius() {
        let config = FieldConfig {
            crystal_sites: 1,
            flux_sites: 0,
            ember_sites: 0,
            hostiles: 0,
            sense_radius_squared: 4,
        };
        let field = Field::generate(&config, &mut StdRng::seed_from_u64(3));
        let (_, site) = *field.sites.first().unwrap();

        assert_eq!(field.sensed_sites(site).len(), 1);
        let far = if site.x < 30 {
            GridPos::new(site.x.saturating_add(10), site.y)
        } else {
            GridPos::new(site.x.saturating_sub(10), site.y)
        };
        assert!(field.sensed_sites(far).is_empty());
    }
}
