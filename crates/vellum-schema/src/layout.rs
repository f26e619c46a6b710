//! The layout compiler: ordered declarations → compiled descriptor.
//!
//! Layout follows natural alignment: each field is placed at the next
//! offset aligned to its kind's alignment, and the total size is
//! rounded up to the largest member alignment (so arrays of the record
//! would tile correctly). The algorithm is a pure function of the
//! ordered declaration list — no hashing, no reordering — which is what
//! guarantees byte-identical layouts across independently compiled
//! consumers of the same shared region.

use std::collections::HashSet;

use vellum_core::{SchemaVersion, TypeIdent};

use crate::decl::FieldDecl;
use crate::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::error::SchemaError;

/// Round `offset` up to the next multiple of `align`.
///
/// `align` must be a power of two (all primitive alignments are).
pub(crate) fn align_up(offset: u32, align: u32) -> u32 {
    debug_assert!(align.is_power_of_two());
    (offset + align - 1) & !(align - 1)
}

/// Compile an ordered declaration list into a [`TypeDescriptor`].
///
/// Fails with [`SchemaError::EmptyDeclaration`] for zero fields and
/// [`SchemaError::DuplicateFieldName`] for a repeated name. Unknown
/// kinds are rejected earlier, when the declaration is parsed from the
/// binding surface ([`FieldDecl::parse`]).
pub fn compile(
    ident: TypeIdent,
    version: SchemaVersion,
    decls: &[FieldDecl],
) -> Result<TypeDescriptor, SchemaError> {
    if decls.is_empty() {
        return Err(SchemaError::EmptyDeclaration);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(decls.len());
    let mut fields = Vec::with_capacity(decls.len());
    let mut offset = 0u32;
    let mut max_align = 1u32;

    for decl in decls {
        if !seen.insert(decl.name.as_str()) {
            return Err(SchemaError::DuplicateFieldName {
                name: decl.name.clone(),
            });
        }

        let align = decl.kind.align();
        let size = decl.kind.size();
        offset = align_up(offset, align);
        fields.push(FieldDescriptor {
            name: decl.name.clone(),
            kind: decl.kind,
            offset,
            size,
            mutability: decl.mutability,
        });
        offset += size;
        max_align = max_align.max(align);
    }

    let total_size = align_up(offset, max_align);
    Ok(TypeDescriptor::new(
        ident, version, fields, total_size, max_align,
    ))
}
