//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use vellum_core::{FieldKind, RecordRef};

/// Errors from arena construction, allocation, and reclamation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The arena configuration is unusable.
    InvalidConfig {
        /// What was wrong with it.
        reason: String,
    },
    /// No free block can satisfy the request. The arena never grows —
    /// address stability across processes forbids relocation.
    Exhausted {
        /// Block size requested, in bytes (header and padding included).
        requested: u32,
        /// Total region capacity in bytes.
        capacity: u32,
    },
    /// A reference to a freed (or never-allocated) record.
    StaleRef {
        /// The offending reference.
        record: RecordRef,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
            Self::Exhausted {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
            Self::StaleRef { record } => {
                write!(f, "stale record reference: {record}")
            }
        }
    }
}

impl Error for ArenaError {}

/// Errors from typed field access on a record instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// The record reference no longer points at a live allocation.
    StaleRecord {
        /// The offending reference.
        record: RecordRef,
    },
    /// The descriptor has no field with this name.
    UnknownField {
        /// The name as requested.
        name: String,
    },
    /// The value's kind does not match the field's declared kind.
    KindMismatch {
        /// The field being written or read.
        field: String,
        /// Kind declared in the schema.
        expected: FieldKind,
        /// Kind of the supplied value.
        found: FieldKind,
    },
    /// A second write to an already-set const field.
    ConstFieldViolation {
        /// The const field.
        field: String,
    },
    /// The supplied descriptor does not fit the record's block — the
    /// record was written by a process whose descriptor for this type
    /// had a different shape.
    LayoutMismatch {
        /// The record whose block is too small for the descriptor.
        record: RecordRef,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleRecord { record } => {
                write!(f, "stale record reference: {record}")
            }
            Self::UnknownField { name } => {
                write!(f, "unknown field '{name}'")
            }
            Self::KindMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field '{field}' holds {expected}, got {found}"
                )
            }
            Self::ConstFieldViolation { field } => {
                write!(f, "const field '{field}' is already set")
            }
            Self::LayoutMismatch { record } => {
                write!(f, "descriptor does not fit the block of {record}")
            }
        }
    }
}

impl Error for FieldError {}
