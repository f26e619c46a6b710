//! Schema compilation and type registration for the Vellum record engine.
//!
//! A record type starts life as an ordered list of [`FieldDecl`]s. The
//! compiler ([`compile`]) turns that list into an immutable
//! [`TypeDescriptor`]: deterministic byte offsets by natural alignment,
//! padding where needed, total size rounded up to the largest member
//! alignment. The [`TypeRegistry`] then owns the descriptor, keyed by
//! its globally unique identifier string, and hands out compact
//! [`TypeKey`](vellum_core::TypeKey)s for tagging record headers in the
//! arena.
//!
//! Determinism is load-bearing: two independently compiled consumers of
//! the same shared region must derive byte-identical layouts from the
//! same ordered declarations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decl;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod registry;

pub use decl::FieldDecl;
pub use descriptor::{FieldDescriptor, TypeDescriptor};
pub use error::{RegistryError, SchemaError};
pub use layout::compile;
pub use registry::TypeRegistry;
