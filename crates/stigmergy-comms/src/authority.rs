//! The authority status board.
//!
//! Slots 0-3 of the shared array each hold the latest status and position
//! of one coordinating authority. Unlike ring entries, board slots are
//! overwritten in place: there is no history, only the most recent word.
//! Consumers discover the closest live authority by scanning all four
//! slots and bind to it.

use stigmergy_channel::{EMPTY, SharedChannel};
use stigmergy_types::{AuthorityStatus, GridPos, Message};
use tracing::{debug, warn};

use crate::codec;
use crate::error::CommsError;
use crate::layout::BOARD_SLOTS;

/// Publish an authority's current status, claiming a board slot on first
/// use.
///
/// `claimed` is the publisher's sticky slot cache. On first use the board
/// is scanned for the first empty slot and that index is claimed on the
/// spot, for the rest of the episode; every publish -- the first
/// included -- then writes through the claimed slot. The claim relies on
/// the array being zeroed at episode start.
///
/// Returns `Ok(false)` on write contention ("try again next round").
///
/// # Errors
///
/// Returns [`CommsError::AuthorityBoardFull`] when no board slot is empty
/// and none is claimed yet -- more authorities than the board supports, a
/// fatal configuration condition, deliberately distinct from transient
/// contention. Also returns a codec error for an off-map position.
pub fn publish<C: SharedChannel>(
    channel: &mut C,
    claimed: &mut Option<usize>,
    status: AuthorityStatus,
    position: GridPos,
) -> Result<bool, CommsError> {
    let word = codec::encode(&Message::Authority { status, position })?;

    let slot = match *claimed {
        Some(slot) => slot,
        None => {
            let Some(slot) = first_empty_slot(channel) else {
                warn!("authority board has no empty slot; publisher cannot be placed");
                return Err(CommsError::AuthorityBoardFull);
            };
            debug!(slot, "claimed authority board slot");
            *claimed = Some(slot);
            slot
        }
    };

    if !channel.try_write(slot, word) {
        debug!(slot, "authority board write lost contention");
        return Ok(false);
    }
    Ok(true)
}

/// Scan the board and select the closest live authority to `from`.
///
/// Empty slots and authorities reporting a terminal status are skipped.
/// Returns the winning slot index and its decoded message, or `Ok(None)`
/// when no live authority is on the board yet -- callers retry discovery
/// on a later round rather than caching the absence.
///
/// # Errors
///
/// Returns a corruption variant if a non-empty board slot does not decode.
pub fn discover<C: SharedChannel>(
    channel: &C,
    from: GridPos,
) -> Result<Option<(usize, Message)>, CommsError> {
    let mut closest: Option<(usize, Message, u32)> = None;

    for slot in 0..BOARD_SLOTS {
        let Some(message) = read_slot(channel, slot)? else {
            continue;
        };
        let Message::Authority { status, position } = message else {
            continue;
        };
        if status.is_terminal() {
            continue;
        }
        let distance = from.distance_squared(position);
        let beaten = closest.is_none_or(|(_, _, best)| distance < best);
        if beaten {
            closest = Some((slot, message, distance));
        }
    }

    Ok(closest.map(|(slot, message, _)| (slot, message)))
}

/// Read and decode one board slot. Empty slots yield `Ok(None)`.
///
/// # Errors
///
/// Returns a corruption variant if the slot holds an undecodable word.
pub fn read_slot<C: SharedChannel>(
    channel: &C,
    slot: usize,
) -> Result<Option<Message>, CommsError> {
    let word = channel.read(slot);
    if word == EMPTY {
        return Ok(None);
    }
    codec::decode_authority(word).map(Some)
}

/// The first empty board slot, if any.
fn first_empty_slot<C: SharedChannel>(channel: &C) -> Option<usize> {
    (0..BOARD_SLOTS).find(|slot| channel.read(*slot) == EMPTY)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stigmergy_channel::RoundArray;

    use super::*;

    fn roomy_channel() -> RoundArray {
        RoundArray::with_budget(u32::MAX)
    }

    fn publish_in_own_round(
        channel: &mut RoundArray,
        claimed: &mut Option<usize>,
        status: AuthorityStatus,
        position: GridPos,
    ) {
        assert!(publish(channel, claimed, status, position).unwrap());
        channel.advance_round();
    }

    #[test]
    fn publishers_claim_distinct_slots() {
        let mut channel = roomy_channel();
        let mut first = None;
        let mut second = None;

        publish_in_own_round(
            &mut channel,
            &mut first,
            AuthorityStatus::Staging,
            GridPos::new(0, 0),
        );
        publish_in_own_round(
            &mut channel,
            &mut second,
            AuthorityStatus::Staging,
            GridPos::new(59, 59),
        );

        assert_eq!(first, Some(0));
        assert_eq!(second, Some(1));
    }

    #[test]
    fn republish_overwrites_in_place() {
        let mut channel = roomy_channel();
        let mut claimed = None;
        let position = GridPos::new(10, 10);

        publish_in_own_round(&mut channel, &mut claimed, AuthorityStatus::Staging, position);
        publish_in_own_round(
            &mut channel,
            &mut claimed,
            AuthorityStatus::Producing,
            position,
        );

        // Only the newest status is visible; no history of the first.
        let message = read_slot(&channel, 0).unwrap().unwrap();
        assert_eq!(
            message,
            Message::Authority {
                status: AuthorityStatus::Producing,
                position,
            }
        );
        for slot in 1..BOARD_SLOTS {
            assert_eq!(read_slot(&channel, slot).unwrap(), None);
        }
    }

    #[test]
    fn fifth_publisher_is_rejected_distinctly() {
        let mut channel = roomy_channel();
        for index in 0..4_u16 {
            let mut claimed = None;
            publish_in_own_round(
                &mut channel,
                &mut claimed,
                AuthorityStatus::Staging,
                GridPos::new(index, index),
            );
        }

        let mut excess = None;
        let outcome = publish(
            &mut channel,
            &mut excess,
            AuthorityStatus::Staging,
            GridPos::new(5, 5),
        );
        assert_eq!(outcome, Err(CommsError::AuthorityBoardFull));
        assert_eq!(excess, None);
    }

    #[test]
    fn claim_is_taken_at_scan_time_and_survives_a_lost_write() {
        let mut channel = roomy_channel();
        // Slot 0 is empty but already committed this round by another
        // writer, so the first publish loses its write -- the claim is
        // made at scan time and sticks regardless.
        assert!(channel.try_write(0, EMPTY));

        let mut claimed = None;
        let outcome = publish(
            &mut channel,
            &mut claimed,
            AuthorityStatus::Staging,
            GridPos::new(3, 3),
        )
        .unwrap();
        assert!(!outcome);
        assert_eq!(claimed, Some(0));

        // Next round the publisher writes through the slot it owns.
        channel.advance_round();
        assert!(
            publish(
                &mut channel,
                &mut claimed,
                AuthorityStatus::Staging,
                GridPos::new(3, 3),
            )
            .unwrap()
        );
        assert_eq!(claimed, Some(0));
        assert!(read_slot(&channel, 0).unwrap().is_some());
    }

    #[test]
    fn discovery_binds_to_closest_live_authority() {
        let mut channel = roomy_channel();
        let caller = GridPos::new(0, 0);

        // Distances squared from the caller: 9, 4, 50, and a dead one at 1.
        let boards = [
            (AuthorityStatus::Producing, GridPos::new(3, 0)),
            (AuthorityStatus::Staging, GridPos::new(0, 2)),
            (AuthorityStatus::Expanding, GridPos::new(5, 5)),
            (AuthorityStatus::Dead, GridPos::new(1, 0)),
        ];
        for (status, position) in boards {
            let mut claimed = None;
            publish_in_own_round(&mut channel, &mut claimed, status, position);
        }

        let (slot, message) = discover(&channel, caller).unwrap().unwrap();
        assert_eq!(slot, 1);
        assert_eq!(
            message,
            Message::Authority {
                status: AuthorityStatus::Staging,
                position: GridPos::new(0, 2),
            }
        );
    }

    #[test]
    fn discovery_reports_none_when_board_is_dead_or_empty() {
        let mut channel = roomy_channel();
        assert_eq!(discover(&channel, GridPos::new(0, 0)).unwrap(), None);

        let mut claimed = None;
        publish_in_own_round(
            &mut channel,
            &mut claimed,
            AuthorityStatus::Dead,
            GridPos::new(2, 2),
        );
        assert_eq!(discover(&channel, GridPos::new(0, 0)).unwrap(), None);
    }
}
