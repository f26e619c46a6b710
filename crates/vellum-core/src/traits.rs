//! Core abstraction traits shared across the workspace.

use crate::id::RecordRef;

/// Liveness oracle for record references.
///
/// Implemented by the arena. The namespace binder and forwarding
/// resolver consult liveness through this trait rather than depending
/// on the arena crate directly, so a dangling binding degrades to
/// "not found" without the tree knowing anything about allocation.
pub trait Liveness {
    /// Whether `record` still refers to a live allocation.
    ///
    /// A ref is live when the record at its offset has not been freed
    /// and its generation matches the ref's generation.
    fn is_live(&self, record: RecordRef) -> bool;
}
