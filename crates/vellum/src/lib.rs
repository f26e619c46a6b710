//! Vellum: typed records in a managed shared-memory region.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Vellum sub-crates. For most users, adding `vellum` as a
//! single dependency is sufficient.
//!
//! A [`Store`] owns one managed region plus the process-local services
//! around it: the type registry, the namespace, and the forwarding
//! table. Record types are declared as ordered field lists, compiled
//! into deterministic layouts, and instantiated inside the region;
//! records are reached by reference, by namespace path, or through
//! forwarding entries left behind by relocation.
//!
//! # Quick start
//!
//! ```rust
//! use vellum::prelude::*;
//!
//! let store = Store::new(ArenaConfig::default()).unwrap();
//!
//! // Declare and register a record type.
//! let ident = TypeIdent::new("Example::Record");
//! let descriptor = compile_schema(
//!     ident.clone(),
//!     SchemaVersion::INITIAL,
//!     &[
//!         FieldDecl::constant("is_active", FieldKind::Bool),
//!         FieldDecl::new("number_of_players", FieldKind::U16),
//!     ],
//! )
//! .unwrap();
//! store.register_type(&ident, descriptor).unwrap();
//!
//! // Create an instance, fill it in, and publish it by name.
//! let rec = store.create(&ident).unwrap();
//! store.set_field(rec, "is_active", FieldValue::Bool(true)).unwrap();
//! store.set_field(rec, "number_of_players", FieldValue::U16(4)).unwrap();
//! store.bind("games/lobby1", rec).unwrap();
//!
//! // Any holder of the path reaches the same record.
//! let found = store.resolve("games/lobby1").unwrap().unwrap();
//! assert_eq!(found, rec);
//! assert_eq!(
//!     store.get_field(found, "number_of_players").unwrap(),
//!     Some(FieldValue::U16(4)),
//! );
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vellum-core` | IDs, field kinds and values, the liveness trait |
//! | [`schema`] | `vellum-schema` | Field declarations, layout compilation, the registry |
//! | [`arena`] | `vellum-arena` | The managed region, allocation, typed field access |
//! | [`namespace`] | `vellum-namespace` | Path bindings and the forwarding table |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod store;

/// Core types and traits (`vellum-core`).
///
/// Contains [`types::TypeIdent`], [`types::RecordRef`], the field kind
/// and value enums, and the [`types::Liveness`] trait.
pub use vellum_core as types;

/// Schema compilation and type registration (`vellum-schema`).
///
/// Declare fields with [`schema::FieldDecl`], compile them with
/// [`compile_schema`], and hold the results in a
/// [`schema::TypeRegistry`].
pub use vellum_schema as schema;

/// The managed memory region (`vellum-arena`).
///
/// Most users only need [`arena::ArenaConfig`] from this module; the
/// [`Store`] drives the arena itself.
pub use vellum_arena as arena;

/// Namespace bindings and forwarding (`vellum-namespace`).
///
/// The [`Store`] wraps both services; reach in here for standalone use
/// of [`namespace::Namespace`] or [`namespace::ForwardingTable`].
pub use vellum_namespace as namespace;

pub use error::StoreError;
pub use store::Store;

/// Compile an ordered field declaration list into a [`schema::TypeDescriptor`].
///
/// Re-export of [`vellum_schema::compile`] under the name the rest of
/// the documentation uses.
pub use vellum_schema::compile as compile_schema;

/// Common imports for typical Vellum usage.
///
/// ```rust
/// use vellum::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{compile_schema, Store, StoreError};

    pub use vellum_core::{
        FieldKind, FieldValue, Mutability, RecordRef, SchemaVersion, TypeIdent, TypeKey,
    };

    pub use vellum_schema::{FieldDecl, TypeDescriptor, TypeRegistry};

    pub use vellum_arena::ArenaConfig;

    pub use vellum_namespace::NamePath;
}
