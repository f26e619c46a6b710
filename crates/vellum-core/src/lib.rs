//! Core types and traits for the Vellum managed record engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Vellum workspace:
//! type identifiers, record references, primitive field kinds and
//! runtime values, and the liveness trait seam that decouples the
//! namespace and forwarding layers from the arena implementation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod kind;
pub mod traits;

pub use id::{RecordRef, SchemaVersion, TypeIdent, TypeKey};
pub use kind::{FieldKind, FieldValue, Mutability};
pub use traits::Liveness;
