//! Per-category ring-buffer protocol.
//!
//! Each category region maps an unbounded logical stream of messages onto
//! nine physical slots plus a write counter. Delivery is broadcast,
//! loss-tolerant, and catch-up-limited: a receiver that falls more than
//! nine entries behind can only ever recover the latest nine, because
//! that is all the physical slots that exist.

use stigmergy_channel::{EMPTY, SharedChannel};
use stigmergy_types::{Category, Message, MessageKind};
use tracing::debug;

use crate::codec;
use crate::error::CommsError;
use crate::layout::{self, RING_SLOTS};

/// Send one message into `recipient`'s ring.
///
/// Reads the region's write counter, targets the counter's current ring
/// position, and commits the encoded payload there. On a committed
/// payload the counter is advanced by its own conditional write so the
/// next sender takes the next position and receivers learn a new entry
/// exists.
///
/// Returns `Ok(true)` only when both writes committed. `Ok(false)` means
/// "try again later": either the payload slot was contended, or the
/// payload landed but the counter advance lost its race. In the latter
/// case the counter undercounts real writes and a later sender may
/// overwrite the entry before any receiver scans it -- an accepted,
/// bounded inconsistency of the lock-free design, not corrected by
/// retries.
///
/// # Errors
///
/// Returns [`CommsError::CoordinateOutOfBounds`] if the message carries an
/// off-map position.
pub fn send<C: SharedChannel>(
    channel: &mut C,
    recipient: Category,
    message: &Message,
) -> Result<bool, CommsError> {
    let encoded = codec::encode(message)?;
    let region = layout::region_for(recipient);
    let write_index = channel.read(region.counter_slot());
    let target = region.ring_slot(write_index);

    if !channel.try_write(target, encoded) {
        debug!(%recipient, target, "ring payload write lost contention");
        return Ok(false);
    }

    let advanced = channel.try_write(region.counter_slot(), write_index.wrapping_add(1));
    if !advanced {
        debug!(
            %recipient,
            write_index, "ring counter advance lost contention; counter lags payload"
        );
    }
    Ok(advanced)
}

/// Drain new entries from `inbox`'s ring under the requested kind.
///
/// Scans logical positions from `cursor` up to the region's write
/// counter, capped at [`RING_SLOTS`] entries -- no more than nine
/// genuinely new entries can exist regardless of how large the gap grew.
/// Empty cells inside the window are skipped (never written, or lost to
/// the counter-lag race). The cursor advances to the end of the scanned
/// window, so a repeated call in the same round returns nothing.
///
/// If the counter has wrapped below the cursor, the cursor is clamped
/// down to the counter and nothing is delivered this call; scanning
/// resumes on the next write.
///
/// # Errors
///
/// Returns a corruption variant if a non-empty cell does not decode under
/// `kind`.
pub fn receive<C: SharedChannel>(
    channel: &C,
    kind: MessageKind,
    inbox: Category,
    cursor: &mut u16,
) -> Result<Vec<Message>, CommsError> {
    let region = layout::region_for(inbox);
    let write_index = channel.read(region.counter_slot());

    let Some(gap) = write_index.checked_sub(*cursor) else {
        debug!(%inbox, write_index, cursor, "ring counter wrapped; clamping cursor");
        *cursor = write_index;
        return Ok(Vec::new());
    };

    let take = gap.min(RING_SLOTS);
    let mut messages = Vec::new();
    for offset in 0..take {
        // cursor + offset <= write_index, so this cannot wrap.
        let count = cursor.wrapping_add(offset);
        let word = channel.read(region.ring_slot(count));
        if word == EMPTY {
            continue;
        }
        messages.push(codec::decode(kind, inbox, word)?);
    }

    *cursor = cursor.wrapping_add(take);
    Ok(messages)
}
