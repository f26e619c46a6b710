//! Compiled type and field descriptors.
//!
//! A [`TypeDescriptor`] is the immutable, fully laid-out description of
//! a record type: every field's byte offset, size, and mutability, plus
//! the total instance size and alignment. Once a descriptor is
//! registered its shape never changes; the registry shares it behind
//! `Arc`.

use std::fmt;

use vellum_core::{FieldKind, Mutability, SchemaVersion, TypeIdent};

/// A single field within a compiled descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, unique within the descriptor.
    pub name: String,
    /// Primitive kind.
    pub kind: FieldKind,
    /// Byte offset from the start of the record payload.
    pub offset: u32,
    /// Storage size in bytes (`kind.size()`, denormalised for readers).
    pub size: u32,
    /// Const or mutable.
    pub mutability: Mutability,
}

/// Compiled memory layout of a record type.
///
/// Field order follows declaration order; offsets are monotonically
/// increasing and non-overlapping. Equality compares the full shape,
/// which is what makes registry idempotence checks exact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    ident: TypeIdent,
    version: SchemaVersion,
    fields: Vec<FieldDescriptor>,
    total_size: u32,
    align: u32,
}

impl TypeDescriptor {
    /// Assemble a descriptor from compiler output.
    ///
    /// Only the layout compiler constructs these; see
    /// [`compile`](crate::layout::compile).
    pub(crate) fn new(
        ident: TypeIdent,
        version: SchemaVersion,
        fields: Vec<FieldDescriptor>,
        total_size: u32,
        align: u32,
    ) -> Self {
        Self {
            ident,
            version,
            fields,
            total_size,
            align,
        }
    }

    /// The globally unique type identifier.
    pub fn ident(&self) -> &TypeIdent {
        &self.ident
    }

    /// The schema version baked in at compile time.
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Total payload size of one record instance in bytes.
    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    /// Required alignment of the record payload in bytes.
    pub fn align(&self) -> u32 {
        self.align
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field by name.
    ///
    /// Returns the field's index (used for the arena's initialisation
    /// bitmap) alongside its descriptor. Name resolution happens once
    /// per access path; all subsequent reads and writes go through the
    /// returned offset.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, fd)| fd.name == name)
    }

    /// Iterate over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} fields, {} bytes, align {})",
            self.ident,
            self.version,
            self.fields.len(),
            self.total_size,
            self.align
        )
    }
}
