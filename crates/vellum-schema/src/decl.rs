//! Field declarations: the input to the schema compiler.

use vellum_core::{FieldKind, Mutability};

use crate::error::SchemaError;

/// A single field declaration, before layout.
///
/// Declarations arrive ordered from the binding layer; order determines
/// layout, so it is preserved all the way into the descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name, unique within the declaration list.
    pub name: String,
    /// Primitive kind.
    pub kind: FieldKind,
    /// Const or mutable.
    pub mutability: Mutability,
}

impl FieldDecl {
    /// Declare a mutable field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            mutability: Mutability::Mutable,
        }
    }

    /// Declare a const (write-once) field.
    pub fn constant(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            mutability: Mutability::Const,
        }
    }

    /// Declare a field from a binding-surface kind name.
    ///
    /// The binding layer ships kinds as strings (`"ushort"`, `"double"`,
    /// …); an unknown name is a [`SchemaError::UnknownKind`].
    pub fn parse(
        name: impl Into<String>,
        kind: &str,
        mutability: Mutability,
    ) -> Result<Self, SchemaError> {
        let kind = FieldKind::parse(kind).ok_or_else(|| SchemaError::UnknownKind {
            kind: kind.to_string(),
        })?;
        Ok(Self {
            name: name.into(),
            kind,
            mutability,
        })
    }
}
