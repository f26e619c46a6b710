//! On-region record headers and the field-initialisation bitmap.
//!
//! Every live block starts with a [`RecordHeader`] tagging the record
//! with its type key, generation, and live state, followed by one bit
//! per field recording whether that field has been written. The bitmap
//! is how const-once enforcement and "unset" const reads work without
//! widening the payload itself — the payload stays exactly
//! `TypeDescriptor::total_size` bytes.

use vellum_core::TypeKey;

use crate::bytes::{align_up, read_u32, write_u32};

/// Size of the on-region record header in bytes.
pub const RECORD_HEADER_SIZE: u32 = 16;

/// State word of a live record. Deliberately not 0 or 1 so that stray
/// payload bytes rarely masquerade as a live header.
pub const STATE_LIVE: u32 = u32::from_le_bytes(*b"LIVE");

/// State word of a freed block.
pub const STATE_FREE: u32 = 0;

/// Decoded record header.
///
/// On-region layout relative to the block offset: block length at 0,
/// type key at 4, generation at 8, state at 12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    /// Total block length in bytes, header and padding included.
    pub block_len: u32,
    /// Registry key of the record's type.
    pub type_key: TypeKey,
    /// Generation stamped at allocation.
    pub generation: u32,
    /// [`STATE_LIVE`] or [`STATE_FREE`].
    pub state: u32,
}

impl RecordHeader {
    /// Decode the header at `offset`.
    pub fn load(region: &[u8], offset: u32) -> Self {
        Self {
            block_len: read_u32(region, offset),
            type_key: TypeKey(read_u32(region, offset + 4)),
            generation: read_u32(region, offset + 8),
            state: read_u32(region, offset + 12),
        }
    }

    /// Encode this header at `offset`.
    pub fn store(&self, region: &mut [u8], offset: u32) {
        write_u32(region, offset, self.block_len);
        write_u32(region, offset + 4, self.type_key.0);
        write_u32(region, offset + 8, self.generation);
        write_u32(region, offset + 12, self.state);
    }
}

/// Bytes needed for an initialisation bitmap of `field_count` fields.
pub fn bitmap_bytes(field_count: usize) -> u32 {
    field_count.div_ceil(8) as u32
}

/// Offset of the payload relative to the block start, for a record
/// with `field_count` fields. 8-aligned, which satisfies every
/// primitive kind's natural alignment.
pub fn payload_offset(field_count: usize) -> u32 {
    align_up(RECORD_HEADER_SIZE + bitmap_bytes(field_count), 8)
}

/// Whether field `index`'s initialisation bit is set.
pub fn bit_get(region: &[u8], bitmap_offset: u32, index: usize) -> bool {
    let byte = region[bitmap_offset as usize + index / 8];
    byte & (1 << (index % 8)) != 0
}

/// Set field `index`'s initialisation bit.
pub fn bit_set(region: &mut [u8], bitmap_offset: u32, index: usize) {
    region[bitmap_offset as usize + index / 8] |= 1 << (index % 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trip() {
        let mut region = vec![0u8; 64];
        let header = RecordHeader {
            block_len: 48,
            type_key: TypeKey(3),
            generation: 17,
            state: STATE_LIVE,
        };
        header.store(&mut region, 16);
        assert_eq!(RecordHeader::load(&region, 16), header);
    }

    #[test]
    fn bitmap_sizing() {
        assert_eq!(bitmap_bytes(0), 0);
        assert_eq!(bitmap_bytes(1), 1);
        assert_eq!(bitmap_bytes(8), 1);
        assert_eq!(bitmap_bytes(9), 2);
        assert_eq!(bitmap_bytes(64), 8);
    }

    #[test]
    fn payload_offset_is_8_aligned() {
        for field_count in 0..40 {
            let off = payload_offset(field_count);
            assert_eq!(off % 8, 0, "field_count={field_count}");
            assert!(off >= RECORD_HEADER_SIZE + bitmap_bytes(field_count));
        }
    }

    #[test]
    fn small_schemas_fit_in_one_padding_word() {
        // Up to 8 fields: header 16 + bitmap 1 → payload at 24.
        assert_eq!(payload_offset(2), 24);
        assert_eq!(payload_offset(8), 24);
        // 9 fields need two bitmap bytes, still 24.
        assert_eq!(payload_offset(9), 24);
    }

    #[test]
    fn bits_set_and_get_independently() {
        let mut region = vec![0u8; 32];
        bit_set(&mut region, 16, 0);
        bit_set(&mut region, 16, 9);
        assert!(bit_get(&region, 16, 0));
        assert!(!bit_get(&region, 16, 1));
        assert!(bit_get(&region, 16, 9));
        assert!(!bit_get(&region, 16, 8));
    }

    #[test]
    fn live_state_is_not_a_plausible_small_integer() {
        assert_ne!(STATE_LIVE, 0);
        assert_ne!(STATE_LIVE, 1);
        assert_eq!(STATE_FREE, 0);
    }
}
