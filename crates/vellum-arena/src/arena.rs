//! The arena allocator: block allocation, reclamation, and typed
//! field access.
//!
//! Allocation is first-fit over an address-ordered free list threaded
//! through the region. Freed blocks coalesce with adjacent free
//! neighbours immediately, so fragmentation stays bounded by the live
//! set rather than by allocation history.

use vellum_core::{FieldValue, Liveness, Mutability, RecordRef, TypeKey};
use vellum_schema::TypeDescriptor;

use crate::bytes::{align_up, read_u32, write_u32};
use crate::config::ArenaConfig;
use crate::error::{ArenaError, FieldError};
use crate::header::{ArenaHeader, HEADER_SIZE, NIL};
use crate::record::{
    bit_get, bit_set, payload_offset, RecordHeader, RECORD_HEADER_SIZE, STATE_FREE, STATE_LIVE,
};

/// Smallest block the allocator will carve: big enough for a record
/// header, and therefore for the 8-byte free-block header too.
const MIN_BLOCK: u32 = 16;

/// A fixed-size managed region holding record instances.
///
/// All offsets handed out ([`RecordRef`]) and stored internally are
/// region-relative. The arena exclusively owns the record memory;
/// namespace bindings and forwarding entries hold weak references that
/// are validated against record generations on every access.
pub struct Arena {
    region: Vec<u8>,
}

impl Arena {
    /// Create and initialise a fresh region.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        let capacity = config.capacity;
        if capacity % 8 != 0 {
            return Err(ArenaError::InvalidConfig {
                reason: format!("capacity {capacity} is not a multiple of 8"),
            });
        }
        if capacity < HEADER_SIZE + MIN_BLOCK {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity {capacity} below minimum {}",
                    HEADER_SIZE + MIN_BLOCK
                ),
            });
        }

        let mut region = vec![0u8; capacity as usize];
        // One free block spanning everything after the header.
        write_u32(&mut region, HEADER_SIZE, capacity - HEADER_SIZE);
        write_u32(&mut region, HEADER_SIZE + 4, NIL);
        ArenaHeader::init(&mut region, capacity, HEADER_SIZE);
        Ok(Self { region })
    }

    /// Adopt an existing region (e.g. read back from a file or mapped
    /// from shared memory). The header is validated; record contents
    /// are trusted as-is.
    pub fn from_bytes(region: Vec<u8>) -> Result<Self, ArenaError> {
        ArenaHeader::load(&region)?;
        Ok(Self { region })
    }

    /// Consume the arena, yielding the raw region for persistence.
    pub fn into_bytes(self) -> Vec<u8> {
        self.region
    }

    /// Total region capacity in bytes.
    pub fn capacity(&self) -> u32 {
        self.region.len() as u32
    }

    /// Sum of free-list block sizes in bytes.
    pub fn free_bytes(&self) -> u32 {
        let mut total = 0;
        let mut cursor = ArenaHeader::free_head(&self.region);
        while cursor != NIL {
            total += read_u32(&self.region, cursor);
            cursor = read_u32(&self.region, cursor + 4);
        }
        total
    }

    /// Allocate a zero-initialised record of the given type.
    ///
    /// `type_key` is the registry key for `descriptor`; it is stamped
    /// into the record header so the type can be recovered from the
    /// reference alone. All fields start unset: mutable fields read as
    /// their zero default, const fields read as `None` until first
    /// written.
    pub fn allocate(
        &mut self,
        descriptor: &TypeDescriptor,
        type_key: TypeKey,
    ) -> Result<RecordRef, ArenaError> {
        let payload = payload_offset(descriptor.field_count());
        let wanted = align_up(payload + descriptor.total_size(), 8).max(MIN_BLOCK);

        let (offset, block_len) = self.take_block(wanted)?;
        self.region[offset as usize..(offset + block_len) as usize].fill(0);
        let generation = ArenaHeader::bump_generation(&mut self.region);
        RecordHeader {
            block_len,
            type_key,
            generation,
            state: STATE_LIVE,
        }
        .store(&mut self.region, offset);
        Ok(RecordRef::new(offset, generation))
    }

    /// Release a record's block back to the free list.
    ///
    /// Bindings and forwarding entries pointing at the record are not
    /// touched; they dangle, and resolve to "not found" through the
    /// liveness check. Fails with [`ArenaError::StaleRef`] if the
    /// reference is already dead.
    pub fn free(&mut self, record: RecordRef) -> Result<(), ArenaError> {
        let header = self.live_header(record)?;
        let offset = record.offset();
        // Kill the state word first so stale refs fail from here on.
        write_u32(&mut self.region, offset + 12, STATE_FREE);
        self.insert_free(offset, header.block_len);
        Ok(())
    }

    /// The registry key stamped on a live record.
    pub fn type_key_of(&self, record: RecordRef) -> Result<TypeKey, ArenaError> {
        Ok(self.live_header(record)?.type_key)
    }

    /// Write one field of a live record.
    ///
    /// The first write to a const field succeeds; any further write to
    /// it is a [`FieldError::ConstFieldViolation`]. Mutable fields
    /// accept unlimited writes.
    pub fn write_field(
        &mut self,
        record: RecordRef,
        descriptor: &TypeDescriptor,
        name: &str,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        self.check_descriptor_fits(record, descriptor)?;
        let (index, fd) = descriptor
            .field(name)
            .ok_or_else(|| FieldError::UnknownField {
                name: name.to_string(),
            })?;
        if value.kind() != fd.kind {
            return Err(FieldError::KindMismatch {
                field: fd.name.clone(),
                expected: fd.kind,
                found: value.kind(),
            });
        }

        let bitmap = record.offset() + RECORD_HEADER_SIZE;
        if fd.mutability == Mutability::Const && bit_get(&self.region, bitmap, index) {
            return Err(FieldError::ConstFieldViolation {
                field: fd.name.clone(),
            });
        }

        let at = record.offset() + payload_offset(descriptor.field_count()) + fd.offset;
        value.encode(&mut self.region[at as usize..(at + fd.size) as usize]);
        bit_set(&mut self.region, bitmap, index);
        Ok(())
    }

    /// Read one field of a live record.
    ///
    /// Returns `Ok(None)` for a const field that has never been
    /// written; mutable fields read their zero default immediately.
    pub fn read_field(
        &self,
        record: RecordRef,
        descriptor: &TypeDescriptor,
        name: &str,
    ) -> Result<Option<FieldValue>, FieldError> {
        self.check_descriptor_fits(record, descriptor)?;
        let (index, fd) = descriptor
            .field(name)
            .ok_or_else(|| FieldError::UnknownField {
                name: name.to_string(),
            })?;

        let bitmap = record.offset() + RECORD_HEADER_SIZE;
        if fd.mutability == Mutability::Const && !bit_get(&self.region, bitmap, index) {
            return Ok(None);
        }

        let at = record.offset() + payload_offset(descriptor.field_count()) + fd.offset;
        Ok(Some(FieldValue::decode(
            fd.kind,
            &self.region[at as usize..(at + fd.size) as usize],
        )))
    }

    /// Validate a reference and check that `descriptor`'s layout fits
    /// inside the record's block.
    ///
    /// The fit check is the guard against descriptor drift: a peer
    /// process that registered a differently shaped descriptor under
    /// this record's identifier must get an error, not an
    /// out-of-bounds access.
    fn check_descriptor_fits(
        &self,
        record: RecordRef,
        descriptor: &TypeDescriptor,
    ) -> Result<(), FieldError> {
        let header = self
            .live_header(record)
            .map_err(|_| FieldError::StaleRecord { record })?;
        let needed = payload_offset(descriptor.field_count()) + descriptor.total_size();
        if needed > header.block_len {
            return Err(FieldError::LayoutMismatch { record });
        }
        Ok(())
    }

    /// Validate a reference and decode its record header.
    fn live_header(&self, record: RecordRef) -> Result<RecordHeader, ArenaError> {
        let offset = record.offset();
        let capacity = self.capacity();
        // Widened arithmetic: a forged offset near u32::MAX must come
        // back as stale, not overflow.
        if offset < HEADER_SIZE
            || offset % 8 != 0
            || u64::from(offset) + u64::from(RECORD_HEADER_SIZE) > u64::from(capacity)
        {
            return Err(ArenaError::StaleRef { record });
        }
        let header = RecordHeader::load(&self.region, offset);
        if header.state != STATE_LIVE
            || header.generation != record.generation()
            || header.block_len < MIN_BLOCK
            || u64::from(offset) + u64::from(header.block_len) > u64::from(capacity)
        {
            return Err(ArenaError::StaleRef { record });
        }
        Ok(header)
    }

    /// First-fit search. Returns the block offset and its actual
    /// length (the requested length, or more if the tail remainder was
    /// too small to split off).
    fn take_block(&mut self, wanted: u32) -> Result<(u32, u32), ArenaError> {
        let mut prev = NIL;
        let mut cursor = ArenaHeader::free_head(&self.region);
        while cursor != NIL {
            let len = read_u32(&self.region, cursor);
            let next = read_u32(&self.region, cursor + 4);
            if len >= wanted {
                let remainder = len - wanted;
                if remainder >= MIN_BLOCK {
                    let rest = cursor + wanted;
                    write_u32(&mut self.region, rest, remainder);
                    write_u32(&mut self.region, rest + 4, next);
                    self.link(prev, rest);
                    return Ok((cursor, wanted));
                }
                self.link(prev, next);
                return Ok((cursor, len));
            }
            prev = cursor;
            cursor = next;
        }
        Err(ArenaError::Exhausted {
            requested: wanted,
            capacity: self.capacity(),
        })
    }

    /// Insert a block into the address-ordered free list, coalescing
    /// with adjacent free neighbours.
    fn insert_free(&mut self, offset: u32, len: u32) {
        let mut prev = NIL;
        let mut next = ArenaHeader::free_head(&self.region);
        while next != NIL && next < offset {
            prev = next;
            next = read_u32(&self.region, next + 4);
        }

        // Merge backwards into `prev` if the blocks touch.
        let (merged, mut merged_len) = if prev != NIL {
            let prev_len = read_u32(&self.region, prev);
            if prev + prev_len == offset {
                (prev, prev_len + len)
            } else {
                write_u32(&mut self.region, offset, len);
                write_u32(&mut self.region, offset + 4, next);
                self.link(prev, offset);
                (offset, len)
            }
        } else {
            write_u32(&mut self.region, offset, len);
            write_u32(&mut self.region, offset + 4, next);
            self.link(NIL, offset);
            (offset, len)
        };

        // Merge forwards into `next` if the blocks touch.
        if next != NIL && merged + merged_len == next {
            let next_len = read_u32(&self.region, next);
            let next_next = read_u32(&self.region, next + 4);
            merged_len += next_len;
            write_u32(&mut self.region, merged + 4, next_next);
        }
        write_u32(&mut self.region, merged, merged_len);
    }

    /// Point `prev`'s link (or the list head) at `target`.
    fn link(&mut self, prev: u32, target: u32) {
        if prev == NIL {
            ArenaHeader::set_free_head(&mut self.region, target);
        } else {
            write_u32(&mut self.region, prev + 4, target);
        }
    }
}

impl Liveness for Arena {
    fn is_live(&self, record: RecordRef) -> bool {
        self.live_header(record).is_ok()
    }
}
