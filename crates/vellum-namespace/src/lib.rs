//! Namespace binding and forwarding resolution for the Vellum record
//! engine.
//!
//! Two independent name services live here. The [`Namespace`] maps
//! hierarchical human-readable paths (`"games/lobby1"`) to record
//! references; bindings are weak, so resolution consults liveness and
//! reports a dangling binding as "not found" instead of returning a
//! stale pointer. The [`ForwardingTable`] maps old record references to
//! their current live successors, so that holders of a pre-relocation
//! reference keep reaching the live data without being rewritten
//! individually.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod forward;
pub mod path;
pub mod tree;

pub use error::{ForwardingError, NamespaceError};
pub use forward::{ForwardingTable, MAX_FORWARD_HOPS};
pub use path::NamePath;
pub use tree::Namespace;
