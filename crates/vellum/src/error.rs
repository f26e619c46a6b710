//! The unified store error.

use std::error::Error;
use std::fmt;

use vellum_arena::{ArenaError, FieldError};
use vellum_core::{TypeIdent, TypeKey};
use vellum_namespace::{ForwardingError, NamespaceError};
use vellum_schema::{RegistryError, SchemaError};

/// Any error a [`Store`](crate::Store) operation can return.
///
/// Wraps the per-subsystem enums so callers can match broadly or drill
/// into the underlying cause via `source()`. Nothing in the engine
/// aborts the process — shared resources make every failure a value.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// Schema compilation failed.
    Schema(SchemaError),
    /// Type registration failed.
    Registry(RegistryError),
    /// Arena allocation or reclamation failed.
    Arena(ArenaError),
    /// Typed field access failed.
    Field(FieldError),
    /// Namespace binding or path handling failed.
    Namespace(NamespaceError),
    /// Forwarding installation or resolution failed.
    Forwarding(ForwardingError),
    /// `create` was asked for an identifier no one registered.
    UnknownType {
        /// The unregistered identifier.
        ident: TypeIdent,
    },
    /// A record header carries a type key this process never
    /// registered — the region came from a peer whose types were not
    /// re-registered here.
    UnregisteredTypeKey {
        /// The key stamped on the record.
        key: TypeKey,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::Registry(e) => write!(f, "registry error: {e}"),
            Self::Arena(e) => write!(f, "arena error: {e}"),
            Self::Field(e) => write!(f, "field error: {e}"),
            Self::Namespace(e) => write!(f, "namespace error: {e}"),
            Self::Forwarding(e) => write!(f, "forwarding error: {e}"),
            Self::UnknownType { ident } => {
                write!(f, "type '{ident}' is not registered")
            }
            Self::UnregisteredTypeKey { key } => {
                write!(f, "record carries unregistered type key {key}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            Self::Registry(e) => Some(e),
            Self::Arena(e) => Some(e),
            Self::Field(e) => Some(e),
            Self::Namespace(e) => Some(e),
            Self::Forwarding(e) => Some(e),
            Self::UnknownType { .. } | Self::UnregisteredTypeKey { .. } => None,
        }
    }
}

impl From<SchemaError> for StoreError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

impl From<RegistryError> for StoreError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<ArenaError> for StoreError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<FieldError> for StoreError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

impl From<NamespaceError> for StoreError {
    fn from(e: NamespaceError) -> Self {
        Self::Namespace(e)
    }
}

impl From<ForwardingError> for StoreError {
    fn from(e: ForwardingError) -> Self {
        Self::Forwarding(e)
    }
}
