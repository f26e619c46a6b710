//! Little-endian scalar access into the arena region.
//!
//! All on-region integers are stored little-endian regardless of host
//! byte order, matching the field-value encoding in `vellum-core`.

/// Read a `u32` at `offset`.
pub(crate) fn read_u32(region: &[u8], offset: u32) -> u32 {
    let o = offset as usize;
    u32::from_le_bytes([region[o], region[o + 1], region[o + 2], region[o + 3]])
}

/// Write a `u32` at `offset`.
pub(crate) fn write_u32(region: &mut [u8], offset: u32, value: u32) {
    let o = offset as usize;
    region[o..o + 4].copy_from_slice(&value.to_le_bytes());
}

/// Round `offset` up to the next multiple of `align` (a power of two).
pub(crate) fn align_up(offset: u32, align: u32) -> u32 {
    debug_assert!(align.is_power_of_two());
    (offset + align - 1) & !(align - 1)
}
