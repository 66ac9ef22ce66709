//! Per-agent facade over the ring and board protocols.
//!
//! A [`Communicator`] owns one agent's view of the channel: how far it
//! has read into each kind's stream, which authority it is bound to, and
//! (for authorities) which board slot it publishes to. Every agent holds
//! its own value -- nothing here is global, so many simulated agents can
//! share one process and one channel without aliasing each other's
//! cursors.

use std::collections::BTreeMap;

use stigmergy_channel::{AgentContext, SharedChannel};
use stigmergy_types::{Category, Message, MessageKind};
use tracing::debug;

use crate::error::CommsError;
use crate::{authority, ring};

/// One agent's protocol state and entry points.
#[derive(Debug, Clone, Default)]
pub struct Communicator {
    /// Per-kind count of ring entries already consumed.
    received: BTreeMap<MessageKind, u16>,
    /// Board slot of the authority this agent is bound to, once selected.
    bound_authority: Option<usize>,
    /// Board slot this agent publishes to, for authority agents.
    claimed_board_slot: Option<usize>,
}

impl Communicator {
    /// Create a communicator with fresh cursors and no bindings.
    pub const fn new() -> Self {
        Self {
            received: BTreeMap::new(),
            bound_authority: None,
            claimed_board_slot: None,
        }
    }

    /// Send one message, routed by kind.
    ///
    /// Authority updates go to the status board (only authority agents
    /// may publish; for anyone else this is a no-op reported as
    /// `Ok(false)`). Location kinds go to the recipient category's ring.
    ///
    /// `Ok(false)` means transient contention: cache the message and try
    /// again on a later round.
    ///
    /// # Errors
    ///
    /// Propagates codec errors and [`CommsError::AuthorityBoardFull`].
    pub fn send<C, A>(
        &mut self,
        channel: &mut C,
        ctx: &A,
        message: &Message,
    ) -> Result<bool, CommsError>
    where
        C: SharedChannel,
        A: AgentContext,
    {
        match message {
            Message::Authority { status, position } => {
                if ctx.category() != Category::Authority {
                    debug!(agent = %ctx.id(), "non-authority tried to publish status; dropped");
                    return Ok(false);
                }
                authority::publish(channel, &mut self.claimed_board_slot, *status, *position)
            }
            Message::Hostile { recipient, .. }
            | Message::CrystalSite { recipient, .. }
            | Message::FluxSite { recipient, .. }
            | Message::EmberSite { recipient, .. } => ring::send(channel, *recipient, message),
        }
    }

    /// Receive all new messages of `kind` addressed to this agent.
    ///
    /// For the authority kind: binds to the closest live authority on
    /// first use (empty result while none is discoverable -- retried on
    /// the next call, never cached), then re-reads the bound slot each
    /// call; the board is latest-wins, not a stream. For location kinds:
    /// drains this agent's own category ring from its per-kind cursor,
    /// capped at the nine physical slots.
    ///
    /// # Errors
    ///
    /// Propagates codec corruption errors.
    pub fn receive<C, A>(
        &mut self,
        channel: &C,
        ctx: &A,
        kind: MessageKind,
    ) -> Result<Vec<Message>, CommsError>
    where
        C: SharedChannel,
        A: AgentContext,
    {
        match kind {
            MessageKind::Authority => {
                if self.bound_authority.is_none() {
                    let found = authority::discover(channel, ctx.position())?;
                    self.bound_authority = found.map(|(slot, _)| slot);
                    if let Some(slot) = self.bound_authority {
                        debug!(agent = %ctx.id(), slot, "bound to closest live authority");
                    }
                }
                let Some(slot) = self.bound_authority else {
                    return Ok(Vec::new());
                };
                Ok(authority::read_slot(channel, slot)?.into_iter().collect())
            }
            MessageKind::Hostile
            | MessageKind::CrystalSite
            | MessageKind::FluxSite
            | MessageKind::EmberSite => {
                let cursor = self.received.entry(kind).or_insert(0);
                ring::receive(channel, kind, ctx.category(), cursor)
            }
        }
    }

    /// Drop the sticky authority binding; the next authority receive
    /// rediscovers. Agent logic calls this when its bound authority
    /// reports a terminal status.
    pub fn unbind_authority(&mut self) {
        self.bound_authority = None;
    }

    /// The board slot of the bound authority, if bound.
    pub const fn bound_authority(&self) -> Option<usize> {
        self.bound_authority
    }

    /// The board slot this agent publishes to, if it claimed one.
    pub const fn claimed_board_slot(&self) -> Option<usize> {
        self.claimed_board_slot
    }

    /// How many ring entries of `kind` this agent has consumed.
    pub fn received_count(&self, kind: MessageKind) -> u16 {
        self.received.get(&kind).copied().unwrap_or(0)
    }
}
