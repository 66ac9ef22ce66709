//! The 16-bit wire format.
//!
//! Every message crosses the shared array as a single `u16`, with `0`
//! reserved for "empty slot". The fixed bit layout:
//!
//! - **Coordinate pack** (all kinds): `coord = 1 + x * 60 + y`, giving a
//!   range of `1..=3600` for the 60x60 map. The `+ 1` keeps every encoded
//!   position clear of the empty value.
//! - **Location kinds** (`Hostile`, `*Site`): the bare coordinate pack.
//!   Twelve bits are used; the high nibble is always zero.
//! - **Authority status**: `(tag << 12) | coord`, with the 2-bit status
//!   tag in bits 12-13. Maximum value 15 888, comfortably inside `u16`,
//!   and never zero because `coord >= 1`.
//!
//! The kind itself is deliberately NOT on the wire: a region's ring
//! carries bare coordinate packs, and decoding is parameterized by the
//! kind the receiver asked to drain (and the receiver's own category for
//! the recipient field). Senders and receivers agree by convention on
//! what a given inbox carries; traffic of two location kinds into one
//! inbox is indistinguishable. That convention is inherited from the
//! system this protocol models and is documented as a limitation rather
//! than widened into a tagged format.

use stigmergy_channel::SlotValue;
use stigmergy_types::{AuthorityStatus, Category, GridPos, MAP_HEIGHT, Message, MessageKind};

use crate::error::CommsError;

/// Bits occupied by the coordinate pack.
const COORD_BITS: u16 = 12;

/// Mask selecting the coordinate pack from an authority word.
const COORD_MASK: SlotValue = (1 << COORD_BITS) - 1;

/// Largest valid coordinate pack: `1 + 59 * 60 + 59`.
const MAX_COORD: SlotValue = 3600;

/// Encode a message to its non-zero wire word.
///
/// # Errors
///
/// Returns [`CommsError::CoordinateOutOfBounds`] if the message carries an
/// off-map position.
pub fn encode(message: &Message) -> Result<SlotValue, CommsError> {
    match message {
        Message::Authority { status, position } => {
            let coord = pack_position(*position)?;
            // Tag <= 3 shifted into bits 12-13 cannot overflow u16.
            #[allow(clippy::arithmetic_side_effects)]
            let word = (status_tag(*status) << COORD_BITS) | coord;
            Ok(word)
        }
        Message::Hostile { position, .. }
        | Message::CrystalSite { position, .. }
        | Message::FluxSite { position, .. }
        | Message::EmberSite { position, .. } => pack_position(*position),
    }
}

/// Decode a wire word under the kind the receiver requested.
///
/// `recipient` fills the recipient field of location kinds and is ignored
/// for the authority kind. The caller must filter the empty word (`0`)
/// before calling; it never decodes to a message.
///
/// # Errors
///
/// Returns a corruption variant if the word is not a valid encoding for
/// the requested kind.
pub fn decode(
    kind: MessageKind,
    recipient: Category,
    raw: SlotValue,
) -> Result<Message, CommsError> {
    match kind {
        MessageKind::Authority => decode_authority(raw),
        MessageKind::Hostile => Ok(Message::Hostile {
            recipient,
            position: unpack_location_word(raw)?,
        }),
        MessageKind::CrystalSite => Ok(Message::CrystalSite {
            recipient,
            position: unpack_location_word(raw)?,
        }),
        MessageKind::FluxSite => Ok(Message::FluxSite {
            recipient,
            position: unpack_location_word(raw)?,
        }),
        MessageKind::EmberSite => Ok(Message::EmberSite {
            recipient,
            position: unpack_location_word(raw)?,
        }),
    }
}

/// Decode an authority board word to its status and position.
///
/// # Errors
///
/// Returns a corruption variant on an unknown status tag or an invalid
/// coordinate pack.
pub fn decode_authority(raw: SlotValue) -> Result<Message, CommsError> {
    let tag = raw >> COORD_BITS;
    let status = match tag {
        0 => AuthorityStatus::Staging,
        1 => AuthorityStatus::Producing,
        2 => AuthorityStatus::Expanding,
        3 => AuthorityStatus::Dead,
        _ => return Err(CommsError::CorruptStatusTag { raw }),
    };
    let position = unpack_coord(raw & COORD_MASK, raw)?;
    Ok(Message::Authority { status, position })
}

/// Pack an on-map position into the `1..=3600` coordinate range.
fn pack_position(position: GridPos) -> Result<SlotValue, CommsError> {
    if !position.in_bounds() {
        return Err(CommsError::CoordinateOutOfBounds { position });
    }
    // x, y < 60, so 1 + x * 60 + y <= 3600: no overflow.
    #[allow(clippy::arithmetic_side_effects)]
    let coord = 1 + position.x * MAP_HEIGHT + position.y;
    Ok(coord)
}

/// Unpack a bare location word (high nibble must be clear).
fn unpack_location_word(raw: SlotValue) -> Result<GridPos, CommsError> {
    if raw > MAX_COORD {
        return Err(CommsError::CorruptCoordinate { raw });
    }
    unpack_coord(raw, raw)
}

/// Invert the coordinate pack. `raw` is carried for error reporting.
fn unpack_coord(coord: SlotValue, raw: SlotValue) -> Result<GridPos, CommsError> {
    if coord == 0 || coord > MAX_COORD {
        return Err(CommsError::CorruptCoordinate { raw });
    }
    // coord >= 1 per the check above; division and modulo by the nonzero
    // map height cannot fail.
    #[allow(clippy::arithmetic_side_effects)]
    let zero_based = coord - 1;
    Ok(GridPos::new(zero_based / MAP_HEIGHT, zero_based % MAP_HEIGHT))
}

/// The 2-bit wire tag of an authority status.
const fn status_tag(status: AuthorityStatus) -> SlotValue {
    match status {
        AuthorityStatus::Staging => 0,
        AuthorityStatus::Producing => 1,
        AuthorityStatus::Expanding => 2,
        AuthorityStatus::Dead => 3,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn location_kinds() -> [(MessageKind, Message); 4] {
        let recipient = Category::Gatherer;
        let position = GridPos::new(12, 34);
        [
            (MessageKind::Hostile, Message::Hostile { recipient, position }),
            (
                MessageKind::CrystalSite,
                Message::CrystalSite { recipient, position },
            ),
            (MessageKind::FluxSite, Message::FluxSite { recipient, position }),
            (
                MessageKind::EmberSite,
                Message::EmberSite { recipient, position },
            ),
        ]
    }

    #[test]
    fn encode_never_produces_zero() {
        for x in [0, 30, 59] {
            for y in [0, 30, 59] {
                let position = GridPos::new(x, y);
                for status in AuthorityStatus::ALL {
                    let word = encode(&Message::Authority { status, position }).unwrap();
                    assert_ne!(word, 0);
                }
                let word = encode(&Message::Hostile {
                    recipient: Category::Striker,
                    position,
                })
                .unwrap();
                assert_ne!(word, 0);
            }
        }
    }

    #[test]
    fn location_round_trip_across_bounds() {
        for x in [0, 1, 29, 58, 59] {
            for y in [0, 1, 29, 58, 59] {
                let message = Message::FluxSite {
                    recipient: Category::Booster,
                    position: GridPos::new(x, y),
                };
                let word = encode(&message).unwrap();
                let back = decode(MessageKind::FluxSite, Category::Booster, word).unwrap();
                assert_eq!(back, message);
            }
        }
    }

    #[test]
    fn every_location_kind_round_trips() {
        for (kind, message) in location_kinds() {
            let word = encode(&message).unwrap();
            let back = decode(kind, Category::Gatherer, word).unwrap();
            assert_eq!(back, message);
        }
    }

    #[test]
    fn authority_round_trip_for_every_status() {
        for status in AuthorityStatus::ALL {
            let message = Message::Authority {
                status,
                position: GridPos::new(59, 0),
            };
            let word = encode(&message).unwrap();
            let back = decode(MessageKind::Authority, Category::Gatherer, word).unwrap();
            assert_eq!(back, message);
        }
    }

    #[test]
    fn off_map_positions_refuse_to_encode() {
        let message = Message::Hostile {
            recipient: Category::Striker,
            position: GridPos::new(60, 0),
        };
        assert_eq!(
            encode(&message),
            Err(CommsError::CoordinateOutOfBounds {
                position: GridPos::new(60, 0)
            })
        );
    }

    #[test]
    fn corrupt_words_are_rejected() {
        // Coordinate pack above the map range.
        assert!(matches!(
            decode(MessageKind::Hostile, Category::Striker, 3601),
            Err(CommsError::CorruptCoordinate { raw: 3601 })
        ));
        // Authority word with a coordinate of zero.
        assert!(matches!(
            decode_authority(2 << 12),
            Err(CommsError::CorruptCoordinate { .. })
        ));
        // Authority word with tag bits above the catalogue.
        assert!(matches!(
            decode_authority((4 << 12) | 1),
            Err(CommsError::CorruptStatusTag { .. })
        ));
    }

    #[test]
    fn wire_maximum_fits_sixteen_bits() {
        let message = Message::Authority {
            status: AuthorityStatus::Dead,
            position: GridPos::new(59, 59),
        };
        assert_eq!(encode(&message).unwrap(), (3 << 12) | 3600);
    }
}
