//! Namespace and forwarding error types.

use std::error::Error;
use std::fmt;

use vellum_core::RecordRef;

/// Errors from namespace binding and path handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamespaceError {
    /// The path is already bound to a different record, or a record
    /// binding and a subtree would share a name.
    PathCollision {
        /// The contested path.
        path: String,
    },
    /// A path string with no segments, or with an empty segment
    /// (`"a//b"`, leading or trailing `/`).
    InvalidPath {
        /// The path as supplied.
        path: String,
    },
}

impl fmt::Display for NamespaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathCollision { path } => {
                write!(f, "path '{path}' is already bound")
            }
            Self::InvalidPath { path } => {
                write!(f, "invalid path '{path}'")
            }
        }
    }
}

impl Error for NamespaceError {}

/// Errors from forwarding installation and resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardingError {
    /// Installing the entry would make the chain loop back on itself.
    CycleDetected {
        /// The reference being redirected.
        old: RecordRef,
        /// The proposed target that reaches back to `old`.
        new: RecordRef,
    },
    /// A resolve walk exceeded the hop bound. Cycles are rejected at
    /// insertion, so this indicates external corruption of the table.
    LoopSuspected {
        /// The reference whose chain would not terminate.
        start: RecordRef,
        /// The bound that was exceeded.
        max_hops: u32,
    },
}

impl fmt::Display for ForwardingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleDetected { old, new } => {
                write!(f, "redirect {old} -> {new} would create a cycle")
            }
            Self::LoopSuspected { start, max_hops } => {
                write!(
                    f,
                    "forwarding chain from {start} exceeded {max_hops} hops"
                )
            }
        }
    }
}

impl Error for ForwardingError {}
