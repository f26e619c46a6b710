//! The persisted arena header at offset 0.
//!
//! The header is what makes a region recognisable after remapping:
//! magic, format version, total capacity, the free-list head, and the
//! next generation number. Everything else in the region is reachable
//! from the free-list head plus the record headers.

use crate::bytes::{read_u32, write_u32};
use crate::error::ArenaError;

/// Magic tag at offset 0: `"VLMA"` as little-endian bytes.
pub const ARENA_MAGIC: u32 = u32::from_le_bytes(*b"VLMA");

/// On-region format version. Bumped on any layout change.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the serialised header in bytes. 8-aligned so the first
/// block lands on an aligned offset.
pub const HEADER_SIZE: u32 = 24;

/// Null link in the free list. Offset 0 is the header itself, so it
/// can never be a real block offset.
pub const NIL: u32 = 0;

/// Decoded arena header.
///
/// Field offsets within the region: magic at 0, format version at 4,
/// capacity at 8, free-list head at 12, next generation at 16, and
/// 4 reserved bytes at 20.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaHeader {
    /// Total region capacity in bytes.
    pub capacity: u32,
    /// Offset of the first free block, or [`NIL`].
    pub free_head: u32,
    /// Generation to stamp on the next allocation.
    pub next_generation: u32,
}

impl ArenaHeader {
    /// Write a fresh header for a newly initialised region.
    pub fn init(region: &mut [u8], capacity: u32, free_head: u32) {
        write_u32(region, 0, ARENA_MAGIC);
        write_u32(region, 4, FORMAT_VERSION);
        write_u32(region, 8, capacity);
        write_u32(region, 12, free_head);
        write_u32(region, 16, 1);
        write_u32(region, 20, 0);
    }

    /// Decode and validate the header of a region.
    pub fn load(region: &[u8]) -> Result<Self, ArenaError> {
        if region.len() < HEADER_SIZE as usize {
            return Err(ArenaError::InvalidConfig {
                reason: format!("region too small for header ({} bytes)", region.len()),
            });
        }
        let magic = read_u32(region, 0);
        if magic != ARENA_MAGIC {
            return Err(ArenaError::InvalidConfig {
                reason: format!("bad magic {magic:#010x}"),
            });
        }
        let version = read_u32(region, 4);
        if version != FORMAT_VERSION {
            return Err(ArenaError::InvalidConfig {
                reason: format!("unsupported format version {version}"),
            });
        }
        let capacity = read_u32(region, 8);
        if capacity as usize != region.len() {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "header capacity {capacity} disagrees with region length {}",
                    region.len()
                ),
            });
        }
        Ok(Self {
            capacity,
            free_head: read_u32(region, 12),
            next_generation: read_u32(region, 16),
        })
    }

    /// Read the free-list head.
    pub fn free_head(region: &[u8]) -> u32 {
        read_u32(region, 12)
    }

    /// Update the free-list head.
    pub fn set_free_head(region: &mut [u8], offset: u32) {
        write_u32(region, 12, offset);
    }

    /// Take the next generation number, advancing the counter.
    pub fn bump_generation(region: &mut [u8]) -> u32 {
        let generation = read_u32(region, 16);
        write_u32(region, 16, generation.wrapping_add(1));
        generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_load_round_trips() {
        let mut region = vec![0u8; 256];
        ArenaHeader::init(&mut region, 256, HEADER_SIZE);
        let header = ArenaHeader::load(&region).unwrap();
        assert_eq!(header.capacity, 256);
        assert_eq!(header.free_head, HEADER_SIZE);
        assert_eq!(header.next_generation, 1);
    }

    #[test]
    fn load_rejects_bad_magic() {
        let region = vec![0u8; 256];
        assert!(matches!(
            ArenaHeader::load(&region),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn load_rejects_capacity_mismatch() {
        let mut region = vec![0u8; 256];
        ArenaHeader::init(&mut region, 512, HEADER_SIZE);
        assert!(matches!(
            ArenaHeader::load(&region),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn bump_generation_is_monotonic() {
        let mut region = vec![0u8; 256];
        ArenaHeader::init(&mut region, 256, HEADER_SIZE);
        assert_eq!(ArenaHeader::bump_generation(&mut region), 1);
        assert_eq!(ArenaHeader::bump_generation(&mut region), 2);
        assert_eq!(ArenaHeader::bump_generation(&mut region), 3);
    }

    #[test]
    fn free_head_updates_in_place() {
        let mut region = vec![0u8; 256];
        ArenaHeader::init(&mut region, 256, HEADER_SIZE);
        ArenaHeader::set_free_head(&mut region, 64);
        assert_eq!(ArenaHeader::free_head(&region), 64);
    }
}
