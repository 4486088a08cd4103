#![deny(unsafe_code)]
#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

//! The identity-preserving tree morph engine.
//!
//! This crate implements the matching algorithm, form-state preservation
//! discipline, and observer/veto contract described for Morphlex: given a
//! *current* tree and a *reference* tree of matching kind, it mutates the
//! current tree in place so its structure and attributes become equivalent
//! to the reference, while preserving node identity wherever possible and
//! performing the minimum number of structural edits compatible with the
//! reference shape.
//!
//! The engine is generic over the host tree via the [`tree::Tree`] trait —
//! it never constructs a concrete node type itself. See `morphlex-dom` for
//! a ready-to-use in-memory tree and HTML parser, or `morphlex-wasm` for a
//! binding over the real browser DOM.
//!
//! # Single-threaded, synchronous
//!
//! A morph call runs to completion before returning; there are no
//! suspension points. Observer callbacks are invoked synchronously and must
//! not trigger a nested morph on an overlapping subtree — doing so would
//! corrupt the ID index and the matching pools for the outer call.

mod attrs;
mod child_match;
mod dirty;
mod entry;
mod error;
mod id_index;
mod model;
mod options;
mod pair;
mod reorder;
mod textarea;
mod tree;

pub use entry::{morph, morph_document, morph_inner, Reference};
pub use error::MorphError;
pub use options::MorphOptions;
pub use tree::{NodeKind, Property, PropertyValue, Tree};

pub use dirty::mark_dirty;
pub use id_index::IdIndex;
