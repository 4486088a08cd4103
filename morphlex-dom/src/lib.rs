#![deny(unsafe_code)]
#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

//! An owned, reference-counted tree and HTML5 fragment parser implementing
//! `morphlex_core::Tree`.
//!
//! ```
//! use morphlex_core::{morph, MorphOptions, Reference};
//! use morphlex_dom::{DomNode, OwnedDom};
//!
//! let tree = OwnedDom;
//! let current = DomNode::element("p");
//! current.append_child(DomNode::text("old"));
//!
//! let reference = DomNode::element("p");
//! reference.append_child(DomNode::text("new"));
//!
//! let mut options = MorphOptions::new();
//! morph(&tree, &current, Reference::Node(&reference), &mut options).unwrap();
//!
//! assert_eq!(current.to_html(), "<p>new</p>");
//! ```

mod dom;
mod error;
mod node;
mod parser;

pub use dom::OwnedDom;
pub use error::DomParseError;
pub use node::{DomNode, ElementProperties, NodeData};
pub use parser::parse_fragment;

pub use morphlex_core::{NodeKind, Property, PropertyValue, Tree};
