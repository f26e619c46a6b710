//! Schema compilation and registry error types.

use std::error::Error;
use std::fmt;

use vellum_core::{TypeIdent, TypeKey};

/// Errors from compiling a field declaration list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A field name appears more than once in the declaration list.
    DuplicateFieldName {
        /// The repeated name.
        name: String,
    },
    /// A declared kind name is not a known primitive.
    UnknownKind {
        /// The unrecognised kind name as declared.
        kind: String,
    },
    /// The declaration list is empty.
    EmptyDeclaration,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateFieldName { name } => {
                write!(f, "duplicate field name '{name}'")
            }
            Self::UnknownKind { kind } => {
                write!(f, "unknown field kind '{kind}'")
            }
            Self::EmptyDeclaration => {
                write!(f, "schema declares no fields")
            }
        }
    }
}

impl Error for SchemaError {}

/// Errors from registering a compiled descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The identifier is already registered with a different descriptor.
    ///
    /// Re-registration with an identical descriptor is idempotent and
    /// does not raise this.
    DuplicateIdentifier {
        /// The contested identifier.
        ident: TypeIdent,
    },
    /// The identifier passed to `register` does not match the
    /// identifier compiled into the descriptor.
    IdentifierMismatch {
        /// Identifier supplied at registration.
        registered: TypeIdent,
        /// Identifier inside the descriptor.
        declared: TypeIdent,
    },
    /// Two distinct identifiers derive the same compact tag. Record
    /// headers carry the tag, so both cannot live in one store; the
    /// later registration must choose another identifier.
    KeyCollision {
        /// The contested tag.
        key: TypeKey,
        /// The identifier being registered.
        ident: TypeIdent,
        /// The identifier already holding the tag.
        existing: TypeIdent,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateIdentifier { ident } => {
                write!(
                    f,
                    "type '{ident}' already registered with a different descriptor"
                )
            }
            Self::IdentifierMismatch {
                registered,
                declared,
            } => {
                write!(
                    f,
                    "registering as '{registered}' but descriptor declares '{declared}'"
                )
            }
            Self::KeyCollision {
                key,
                ident,
                existing,
            } => {
                write!(
                    f,
                    "type tag {key} of '{ident}' collides with registered '{existing}'"
                )
            }
        }
    }
}

impl Error for RegistryError {}
