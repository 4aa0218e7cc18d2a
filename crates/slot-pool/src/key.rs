//! Packed slot keys.
//!
//! A key is a single `u32`: the slot index lives in the high 16 bits and the
//! slot generation in the low 16 bits.
//!
//! ```text
//! 31              16 15               0
//! [     index      ][   generation    ]
//! ```

use std::fmt;

/// Number of bits reserved for each half of the key.
pub const INDEX_BITS: u32 = 16;

/// Mask applied to both halves before packing.
pub const GENERATION_MASK: u32 = 0x0000_FFFF;

/// Largest index the key can represent.
pub const MAX_INDEX: usize = GENERATION_MASK as usize;

/// Generation value that no allocation ever hands out.
pub const NEVER_ISSUED: u16 = 0;

/// Generation every slot starts with.
pub const FIRST_GENERATION: u16 = 1;

/// Index/generation pair packed into one integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotKey(u32);

impl SlotKey {
    /// Pack `index` and `generation`, masking each to 16 bits.
    #[inline]
    pub const fn encode(index: u32, generation: u32) -> Self {
        Self(((index & GENERATION_MASK) << INDEX_BITS) | (generation & GENERATION_MASK))
    }

    /// Split the key back into `(index, generation)`.
    #[inline]
    pub const fn decode(self) -> (u16, u16) {
        (self.index(), self.generation())
    }

    /// Slot index stored in the high half.
    #[inline]
    pub const fn index(self) -> u16 {
        ((self.0 >> INDEX_BITS) & GENERATION_MASK) as u16
    }

    /// Generation stored in the low half.
    #[inline]
    pub const fn generation(self) -> u16 {
        (self.0 & GENERATION_MASK) as u16
    }

    /// Same index, generation plus one.
    ///
    /// The generation wraps from 65535 back to [`NEVER_ISSUED`]; callers that
    /// hand keys out must treat a wrapped key as unusable.
    #[inline]
    pub const fn increment_generation(self) -> Self {
        Self::encode(self.index() as u32, self.generation() as u32 + 1)
    }

    /// Rebuild a key from its raw integer form.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer form.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotKey({}, gen {})", self.index(), self.generation())
    }
}

impl From<SlotKey> for u32 {
    fn from(key: SlotKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let key = SlotKey::encode(3, 7);
        assert_eq!(key.to_raw(), 0x0003_0007);
        assert_eq!(key.decode(), (3, 7));
    }

    #[test]
    fn test_encode_masks_overflowing_fields() {
        let key = SlotKey::encode(0x1_0002, 0x3_0004);
        assert_eq!(key.decode(), (2, 4));
    }

    #[test]
    fn test_increment_keeps_index() {
        let key = SlotKey::encode(41, 1).increment_generation();
        assert_eq!(key.decode(), (41, 2));
    }

    #[test]
    fn test_generation_wrapping() {
        let key = SlotKey::encode(9, 0xFFFF).increment_generation();
        assert_eq!(key.index(), 9);
        assert_eq!(key.generation(), NEVER_ISSUED);
    }

    #[test]
    fn test_extremes_round_trip() {
        for (i, g) in [(0, 0), (0xFFFF, 0xFFFF), (0, 0xFFFF), (0xFFFF, 0)] {
            assert_eq!(SlotKey::encode(i, g).decode(), (i as u16, g as u16));
        }
    }

    #[test]
    fn test_debug_format() {
        let s = format!("{:?}", SlotKey::encode(1, 2));
        assert_eq!(s, "SlotKey(1, gen 2)");
    }
}
