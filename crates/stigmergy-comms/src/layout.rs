//! The fixed partition of the 64-slot shared array.
//!
//! Slots 0-3 form the authority status board. The remaining sixty slots
//! are divided into six 10-slot regions, one per category: the first slot
//! of a region holds that region's write counter, the other nine form the
//! ring buffer. The partition is a compile-time constant; nothing about it
//! is negotiated at runtime.
//!
//! | Range | Purpose                                  |
//! |-------|------------------------------------------|
//! | 0-3   | Authority status board                   |
//! | 4-13  | Authority inbox (counter + 9 ring slots) |
//! | 14-23 | Gatherer inbox                           |
//! | 24-33 | Striker inbox                            |
//! | 34-43 | Booster inbox                            |
//! | 44-53 | Disruptor inbox                          |
//! | 54-63 | Amplifier inbox                          |

use stigmergy_types::Category;

/// Number of slots in the authority status board.
pub const BOARD_SLOTS: usize = 4;

/// Number of ring slots in each category region.
pub const RING_SLOTS: u16 = 9;

/// Total slots per category region: one counter plus the ring.
pub const REGION_SLOTS: usize = 10;

/// One category's span of the shared array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Slot index of the region's write counter.
    counter: usize,
}

impl Region {
    /// The slot holding this region's write counter: the total number of
    /// successful ring writes ever made, wrapping on overflow.
    pub const fn counter_slot(self) -> usize {
        self.counter
    }

    /// The physical slot for logical write position `write_index`.
    ///
    /// Ring positions cycle through the nine slots after the counter.
    // counter <= 54 and the ring offset <= 9, so the sum stays within the
    // 64-slot array.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_lossless)]
    pub const fn ring_slot(self, write_index: u16) -> usize {
        self.counter + 1 + (write_index % RING_SLOTS) as usize
    }
}

/// The region statically assigned to a category's inbox.
pub const fn region_for(category: Category) -> Region {
    let counter = match category {
        Category::Authority => 4,
        Category::Gatherer => 14,
        Category::Striker => 24,
        Category::Booster => 34,
        Category::Disruptor => 44,
        Category::Amplifier => 54,
    };
    Region { counter }
}
