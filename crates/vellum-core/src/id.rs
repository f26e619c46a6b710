//! Strongly-typed identifiers and the [`RecordRef`] handle.

use std::fmt;

/// Globally unique string identifier for a record type.
///
/// Supplied by user code at registration time (e.g. `"Game::Lobby"`).
/// Two independently compiled consumers of the same shared region agree
/// on a type by agreeing on its identifier string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdent(String);

impl TypeIdent {
    /// Create an identifier from any string-like value.
    pub fn new(ident: impl Into<String>) -> Self {
        Self(ident.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeIdent {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeIdent {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Compact tag for a registered type, stamped into record headers in
/// the arena, where the full identifier string would be too large.
///
/// Derived from the identifier (32-bit FNV-1a), never from registration
/// order, so every process that maps the region computes the same tag
/// for the same identifier — record headers written by one process
/// decode to the same type in every other, whatever order each process
/// registered its types in. The registry rejects two identifiers whose
/// tags collide within one store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(pub u32);

impl TypeKey {
    /// Derive the tag for an identifier.
    pub fn of(ident: &TypeIdent) -> Self {
        const OFFSET_BASIS: u32 = 0x811c_9dc5;
        const PRIME: u32 = 0x0100_0193;
        let mut hash = OFFSET_BASIS;
        for byte in ident.as_str().bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(PRIME);
        }
        Self(hash)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<u32> for TypeKey {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Version number baked into a compiled descriptor.
///
/// Schema evolution means a new identifier or an explicit bump of this
/// number before first registration; a registered descriptor never
/// changes shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaVersion(pub u32);

impl SchemaVersion {
    /// The initial version for a freshly declared schema.
    pub const INITIAL: SchemaVersion = SchemaVersion(1);
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u32> for SchemaVersion {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Reference to a record instance inside a managed arena.
///
/// The offset is arena-relative, never a native address, so the same
/// reference is valid in every process that maps the region (at any
/// base address). The generation allows O(1) staleness checks: a ref
/// whose generation no longer matches the record header at its offset
/// points at freed (possibly reused) memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct RecordRef {
    offset: u32,
    generation: u32,
}

impl RecordRef {
    /// Create a reference from an arena-relative offset and a generation.
    pub fn new(offset: u32, generation: u32) -> Self {
        Self { offset, generation }
    }

    /// Arena-relative byte offset of the record's header.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Arena generation at which the record was allocated.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordRef(off={}, gen={})", self.offset, self.generation)
    }
}
