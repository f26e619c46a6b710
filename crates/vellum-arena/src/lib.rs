//! Fixed-size managed record arena for the Vellum record engine.
//!
//! The arena is a contiguous byte region with a persisted header and an
//! address-ordered free list threaded through the region itself. Every
//! structural pointer inside — free-list links, record references — is
//! an arena-relative offset, never a native address, so the same region
//! can be remapped at a different base in every cooperating process.
//!
//! # Region layout
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────┐
//! │ ArenaHeader  │ blocks…                                      │
//! │ (24 bytes)   │                                              │
//! └──────────────┴──────────────────────────────────────────────┘
//!
//! live block:  RecordHeader (16) │ init bitmap │ pad │ payload │ pad
//! free block:  len (4) │ next (4) │ …unused…
//! ```
//!
//! The arena never grows and never relocates a block: exhaustion is an
//! error ([`ArenaError::Exhausted`]), because growth would invalidate
//! the cross-process address stability the rest of the system depends
//! on. Relocation is handled one level up, by the forwarding resolver.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
mod bytes;
pub mod config;
pub mod error;
pub mod header;
pub mod record;

pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::{ArenaError, FieldError};
