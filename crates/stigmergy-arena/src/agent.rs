//! Scripted agents driving the broadcast protocol.
//!
//! Behaviors are deliberately simple -- the arena exists to exercise the
//! channel, not to win battles. What matters is the communication
//! pattern: scouts produce reports, workers consume them, strikers
//! forward intel to authorities, and everyone tolerates contention by
//! caching unsent messages and retrying on later rounds (retry policy
//! lives here, in agent logic, never inside the protocol core).

use std::collections::{BTreeSet, VecDeque};

use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;
use stigmergy_channel::{AgentContext, RoundArray};
use stigmergy_comms::{Communicator, CommsError};
use stigmergy_types::{AgentId, AuthorityStatus, Category, GridPos, Message, MessageKind};
use tracing::{debug, warn};

use crate::field::Field;

/// Per-round communication tallies, merged into the episode totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoundStats {
    /// Messages committed to the channel this round.
    pub sent: u32,
    /// Send attempts deferred by contention or budget.
    pub deferred: u32,
    /// Messages delivered to receivers this round.
    pub delivered: u32,
    /// Authority rebinds triggered by terminal statuses.
    pub rebinds: u32,
}

impl RoundStats {
    /// Fold another tally into this one.
    pub fn merge(&mut self, other: Self) {
        self.sent = self.sent.saturating_add(other.sent);
        self.deferred = self.deferred.saturating_add(other.deferred);
        self.delivered = self.delivered.saturating_add(other.delivered);
        self.rebinds = self.rebinds.saturating_add(other.rebinds);
    }
}

/// Copyable oracle view of an agent, so protocol calls can borrow the
/// channel mutably alongside the agent's own state.
#[derive(Debug, Clone, Copy)]
struct Oracle {
    id: AgentId,
    category: Category,
    position: GridPos,
}

impl AgentContext for Oracle {
    fn id(&self) -> AgentId {
        self.id
    }

    fn category(&self) -> Category {
        self.category
    }

    fn position(&self) -> GridPos {
        self.position
    }
}

/// One scripted agent.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Identity, stable for the episode.
    id: AgentId,
    /// Role; fixed at spawn.
    category: Category,
    /// Current map position.
    position: GridPos,
    /// The agent's protocol state.
    comms: Communicator,
    /// Messages that could not be committed yet, retried oldest-first.
    pending: VecDeque<Message>,
    /// Site positions this agent knows about (sensed or received).
    known_sites: BTreeSet<GridPos>,
    /// Hostile positions this agent knows about.
    known_hostiles: BTreeSet<GridPos>,
    /// Round from which this authority reports itself dead, if scripted.
    fails_at: Option<u32>,
    /// Set once the board rejected this authority permanently.
    board_full: bool,
}

impl Agent {
    /// Create an agent at a position.
    pub const fn new(id: AgentId, category: Category, position: GridPos) -> Self {
        Self {
            id,
            category,
            position,
            comms: Communicator::new(),
            pending: VecDeque::new(),
            known_sites: BTreeSet::new(),
            known_hostiles: BTreeSet::new(),
            fails_at: None,
            board_full: false,
        }
    }

    /// Script this authority to report itself dead from `round` onward.
    pub const fn failing_from(mut self, round: u32) -> Self {
        self.fails_at = Some(round);
        self
    }

    /// The agent's identity.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's category.
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Messages still waiting to be committed.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Run one round of this agent's script.
    ///
    /// # Errors
    ///
    /// Propagates protocol corruption errors; board exhaustion is handled
    /// internally (logged once, publishing stops).
    pub fn act(
        &mut self,
        round: u32,
        channel: &mut RoundArray,
        field: &Field,
        rng: &mut StdRng,
        stats: &mut RoundStats,
    ) -> Result<(), CommsError> {
        match self.category {
            Category::Authority => self.act_authority(round, channel, stats)?,
            Category::Gatherer => self.act_gatherer(channel, field, rng, stats)?,
            Category::Striker => self.act_striker(channel, field, rng, stats)?,
            Category::Amplifier => self.act_amplifier(channel, field, rng, stats)?,
            Category::Booster => self.act_support(channel, rng, stats, SITE_KINDS)?,
            Category::Disruptor => self.act_support(channel, rng, stats, &[MessageKind::Hostile])?,
        }
        self.flush_pending(channel, stats)?;
        Ok(())
    }

    // -- authority ---------------------------------------------------------

    fn act_authority(
        &mut self,
        round: u32,
        channel: &mut RoundArray,
        stats: &mut RoundStats,
    ) -> Result<(), CommsError> {
        // Strikers forward hostile intel to the authority inbox.
        let intel = self.receive(channel, MessageKind::Hostile)?;
        stats.delivered = stats.delivered.saturating_add(entry_count(&intel));
        for message in intel {
            self.known_hostiles.insert(message.position());
        }

        if self.board_full {
            return Ok(());
        }
        let update = Message::Authority {
            status: self.status_for(round),
            position: self.position,
        };
        let oracle = self.oracle();
        match self.comms.send(channel, &oracle, &update) {
            Ok(true) => stats.sent = stats.sent.saturating_add(1),
            Ok(false) => stats.deferred = stats.deferred.saturating_add(1),
            Err(CommsError::AuthorityBoardFull) => {
                warn!(agent = %self.id, "no board slot for this authority; it will stay silent");
                self.board_full = true;
            }
            Err(error) => return Err(error),
        }
        Ok(())
    }

    /// The status this authority reports at `round`.
    fn status_for(&self, round: u32) -> AuthorityStatus {
        if let Some(fails_at) = self.fails_at
            && round >= fails_at
        {
            return AuthorityStatus::Dead;
        }
        if round < 15 {
            AuthorityStatus::Staging
        } else if round < 75 {
            AuthorityStatus::Producing
        } else {
            AuthorityStatus::Expanding
        }
    }

    // -- workers -----------------------------------------------------------

    fn act_gatherer(
        &mut self,
        channel: &mut RoundArray,
        field: &Field,
        rng: &mut StdRng,
        stats: &mut RoundStats,
    ) -> Result<(), CommsError> {
        self.follow_authority(channel, stats)?;

        for kind in SITE_KINDS {
            let reports = self.receive(channel, *kind)?;
            stats.delivered = stats.delivered.saturating_add(entry_count(&reports));
            for report in reports {
                self.known_sites.insert(report.position());
            }
        }

        // Report sites this agent stumbled on that nobody told it about.
        for (kind, site) in field.sensed_sites(self.position) {
            if self.known_sites.insert(site) {
                self.queue_site_report(kind, site, &[Category::Gatherer]);
            }
        }

        self.move_toward_or_wander(self.nearest(&self.known_sites), rng);
        Ok(())
    }

    fn act_striker(
        &mut self,
        channel: &mut RoundArray,
        field: &Field,
        rng: &mut StdRng,
        stats: &mut RoundStats,
    ) -> Result<(), CommsError> {
        self.follow_authority(channel, stats)?;

        let reports = self.receive(channel, MessageKind::Hostile)?;
        stats.delivered = stats.delivered.saturating_add(entry_count(&reports));
        for report in reports {
            self.known_hostiles.insert(report.position());
        }

        // New contacts go to the striker line and, as intel, upstream.
        for hostile in field.sensed_hostiles(self.position) {
            if self.known_hostiles.insert(hostile) {
                for recipient in [Category::Striker, Category::Authority] {
                    self.pending.push_back(Message::Hostile {
                        recipient,
                        position: hostile,
                    });
                }
            }
        }

        self.move_toward_or_wander(self.nearest(&self.known_hostiles), rng);
        Ok(())
    }

    fn act_amplifier(
        &mut self,
        channel: &mut RoundArray,
        field: &Field,
        rng: &mut StdRng,
        stats: &mut RoundStats,
    ) -> Result<(), CommsError> {
        self.follow_authority(channel, stats)?;

        // Scouts fan reports out to the consuming line and its support.
        for (kind, site) in field.sensed_sites(self.position) {
            if self.known_sites.insert(site) {
                self.queue_site_report(kind, site, &[Category::Gatherer, Category::Booster]);
            }
        }
        for hostile in field.sensed_hostiles(self.position) {
            if self.known_hostiles.insert(hostile) {
                for recipient in [Category::Striker, Category::Disruptor] {
                    self.pending.push_back(Message::Hostile {
                        recipient,
                        position: hostile,
                    });
                }
            }
        }

        self.wander(rng);
        Ok(())
    }

    /// Boosters and disruptors: drain the given kinds from their own
    /// inbox and shadow the reported positions.
    fn act_support(
        &mut self,
        channel: &mut RoundArray,
        rng: &mut StdRng,
        stats: &mut RoundStats,
        kinds: &[MessageKind],
    ) -> Result<(), CommsError> {
        self.follow_authority(channel, stats)?;

        let mut targets = BTreeSet::new();
        for kind in kinds {
            let reports = self.receive(channel, *kind)?;
            stats.delivered = stats.delivered.saturating_add(entry_count(&reports));
            for report in reports {
                targets.insert(report.position());
            }
        }
        self.known_sites.append(&mut targets);

        self.move_toward_or_wander(self.nearest(&self.known_sites), rng);
        Ok(())
    }

    // -- shared plumbing ---------------------------------------------------

    /// Track the closest live authority; rebind when it reports terminal.
    fn follow_authority(
        &mut self,
        channel: &mut RoundArray,
        stats: &mut RoundStats,
    ) -> Result<(), CommsError> {
        let updates = self.receive(channel, MessageKind::Authority)?;
        if let Some(Message::Authority { status, .. }) = updates.first()
            && status.is_terminal()
        {
            debug!(agent = %self.id, "bound authority is dead; rebinding");
            self.comms.unbind_authority();
            stats.rebinds = stats.rebinds.saturating_add(1);
        }
        Ok(())
    }

    fn receive(
        &mut self,
        channel: &RoundArray,
        kind: MessageKind,
    ) -> Result<Vec<Message>, CommsError> {
        let oracle = self.oracle();
        self.comms.receive(channel, &oracle, kind)
    }

    /// Retry cached messages oldest-first until one is deferred again.
    fn flush_pending(
        &mut self,
        channel: &mut RoundArray,
        stats: &mut RoundStats,
    ) -> Result<(), CommsError> {
        let oracle = self.oracle();
        while let Some(message) = self.pending.pop_front() {
            if self.comms.send(channel, &oracle, &message)? {
                stats.sent = stats.sent.saturating_add(1);
            } else {
                stats.deferred = stats.deferred.saturating_add(1);
                self.pending.push_front(message);
                break;
            }
        }
        Ok(())
    }

    fn queue_site_report(&mut self, kind: MessageKind, site: GridPos, recipients: &[Category]) {
        for recipient in recipients {
            let message = match kind {
                MessageKind::CrystalSite => Message::CrystalSite {
                    recipient: *recipient,
                    position: site,
                },
                MessageKind::FluxSite => Message::FluxSite {
                    recipient: *recipient,
                    position: site,
                },
                MessageKind::EmberSite => Message::EmberSite {
                    recipient: *recipient,
                    position: site,
                },
                // The field only yields site flavors.
                MessageKind::Authority | MessageKind::Hostile => continue,
            };
            self.pending.push_back(message);
        }
    }

    const fn oracle(&self) -> Oracle {
        Oracle {
            id: self.id,
            category: self.category,
            position: self.position,
        }
    }

    /// The known position closest to the agent, if it knows any.
    fn nearest(&self, positions: &BTreeSet<GridPos>) -> Option<GridPos> {
        positions
            .iter()
            .copied()
            .min_by_key(|candidate| self.position.distance_squared(*candidate))
    }

    fn move_toward_or_wander(&mut self, target: Option<GridPos>, rng: &mut StdRng) {
        match target {
            Some(target) if target != self.position => self.step_toward(target),
            _ => self.wander(rng),
        }
    }

    /// One axis-wise step toward `target`.
    fn step_toward(&mut self, target: GridPos) {
        let dx = axis_step(self.position.x, target.x);
        let dy = axis_step(self.position.y, target.y);
        if let Some(next) = self.position.offset(dx, dy) {
            self.position = next;
        }
    }

    /// One uniformly random step (possibly staying in place).
    fn wander(&mut self, rng: &mut StdRng) {
        let dx = rng.random_range(-1..=1);
        let dy = rng.random_range(-1..=1);
        if let Some(next) = self.position.offset(dx, dy) {
            self.position = next;
        }
    }
}

/// Site-flavored kinds, in catalogue order.
const SITE_KINDS: &[MessageKind] = &[
    MessageKind::CrystalSite,
    MessageKind::FluxSite,
    MessageKind::EmberSite,
];

/// Message count as a saturating `u32` for stats math.
fn entry_count(messages: &[Message]) -> u32 {
    u32::try_from(messages.len()).unwrap_or(u32::MAX)
}

/// Unit step from `from` toward `to` along one axis.
const fn axis_step(from: u16, to: u16) -> i32 {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use stigmergy_channel::SharedChannel;
    use stigmergy_comms::layout;

    use super::*;
    use crate::config::FieldConfig;

    fn quiet_field() -> Field {
        let config = FieldConfig {
            crystal_sites: 0,
            flux_sites: 0,
            ember_sites: 0,
            hostiles: 0,
            sense_radius_squared: 18,
        };
        Field::generate(&config, &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn authority_publishes_and_claims_a_slot() {
        let mut channel = RoundArray::with_budget(u32::MAX);
        let mut stats = RoundStats::default();
        let mut rng = StdRng::seed_from_u64(2);
        let field = quiet_field();

        let mut authority =
            Agent::new(AgentId(1), Category::Authority, GridPos::new(10, 10));
        authority
            .act(0, &mut channel, &field, &mut rng, &mut stats)
            .unwrap();

        assert_eq!(stats.sent, 1);
        assert_ne!(channel.read(0), 0);
    }

    #[test]
    fn striker_reports_new_contacts_to_two_inboxes() {
        let mut channel = RoundArray::with_budget(u32::MAX);
        let mut stats = RoundStats::default();
        let mut rng = StdRng::seed_from_u64(2);
        let config = FieldConfig {
            crystal_sites: 0,
            flux_sites: 0,
            ember_sites: 0,
            hostiles: 1,
            sense_radius_squared: u32::MAX,
        };
        let field = Field::generate(&config, &mut StdRng::seed_from_u64(9));

        let mut striker = Agent::new(AgentId(3), Category::Striker, GridPos::new(30, 30));
        striker
            .act(0, &mut channel, &field, &mut rng, &mut stats)
            .unwrap();

        // Both queued messages were flushed: striker line + authority intel.
        assert_eq!(stats.sent, 2);
        assert_eq!(striker.pending_len(), 0);
        let striker_region = layout::region_for(Category::Striker);
        let authority_region = layout::region_for(Category::Authority);
        assert_eq!(channel.read(striker_region.counter_slot()), 1);
        assert_eq!(channel.read(authority_region.counter_slot()), 1);
    }

    #[test]
    fn deferred_sends_stay_queued_for_the_next_round() {
        // Budget 1: the first ring write commits, its counter advance is
        // deferred, and the whole message counts as unsent.
        let mut channel = RoundArray::with_budget(1);
        let mut stats = RoundStats::default();
        let mut rng = StdRng::seed_from_u64(2);
        let config = FieldConfig {
            crystal_sites: 0,
            flux_sites: 0,
            ember_sites: 0,
            hostiles: 1,
            sense_radius_squared: u32::MAX,
        };
        let field = Field::generate(&config, &mut StdRng::seed_from_u64(9));

        let mut striker = Agent::new(AgentId(3), Category::Striker, GridPos::new(30, 30));
        striker
            .act(0, &mut channel, &field, &mut rng, &mut stats)
            .unwrap();

        assert_eq!(stats.sent, 0);
        assert!(stats.deferred >= 1);
        assert!(striker.pending_len() >= 1);
    }
}
