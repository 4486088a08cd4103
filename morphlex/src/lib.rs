#![deny(unsafe_code)]
#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

//! Identity-preserving, minimal-diff tree morphing.
//!
//! This crate is the public facade: [`morphlex_core`] implements the
//! matching algorithm generically over any [`morphlex_core::Tree`], and
//! [`morphlex_dom`] supplies a ready-to-use owned tree and HTML5 parser. The
//! functions here bind the two together so common callers never need to
//! name either crate directly.
//!
//! ```
//! use morphlex::{morph_html, MorphOptions};
//! use morphlex_dom::DomNode;
//!
//! let current = DomNode::element("ul");
//! for item in ["a", "b"] {
//!     let li = DomNode::element("li");
//!     li.append_child(DomNode::text(item));
//!     current.append_child(li);
//! }
//!
//! morph_html(&current, "<ul><li>b</li><li>a</li></ul>", &mut MorphOptions::new()).unwrap();
//! assert_eq!(current.to_html(), "<ul><li>b</li><li>a</li></ul>");
//! ```

pub use morphlex_core::{mark_dirty, MorphError, NodeKind, Property, PropertyValue, Tree};
pub use morphlex_dom::{DomNode, DomParseError, ElementProperties, OwnedDom};

/// Options for a single morph call, bound to [`DomNode`].
pub type MorphOptions<'a> = morphlex_core::MorphOptions<'a, DomNode>;

/// The reference side of a morph call, bound to [`DomNode`].
pub type Reference<'a> = morphlex_core::Reference<'a, DomNode>;

/// Morph `current` (and its subtree) to match a single reference node.
pub fn morph(
    current: &DomNode,
    reference: &DomNode,
    options: &mut MorphOptions<'_>,
) -> Result<(), MorphError> {
    morphlex_core::morph(&OwnedDom, current, Reference::Node(reference), options)
}

/// Morph `current` to match an ordered sequence of reference nodes (dispatch:
/// empty removes `current`, one element is the single-node case,
/// more than one inserts the remainder as siblings after `current`).
pub fn morph_sequence(
    current: &DomNode,
    reference: &[DomNode],
    options: &mut MorphOptions<'_>,
) -> Result<(), MorphError> {
    morphlex_core::morph(&OwnedDom, current, Reference::Sequence(reference), options)
}

/// Parse `markup` and morph `current` to match it.
pub fn morph_html(
    current: &DomNode,
    markup: &str,
    options: &mut MorphOptions<'_>,
) -> Result<(), MorphError> {
    morphlex_core::morph(&OwnedDom, current, Reference::Markup(markup), options)
}

/// Reconcile only `current`'s children against a reference node's children,
/// leaving `current`'s own attributes untouched.
pub fn morph_inner(
    current: &DomNode,
    reference: &DomNode,
    options: &mut MorphOptions<'_>,
) -> Result<(), MorphError> {
    morphlex_core::morph_inner(&OwnedDom, current, Reference::Node(reference), options)
}

/// Reconcile only `current`'s children against parsed markup.
pub fn morph_inner_html(
    current: &DomNode,
    markup: &str,
    options: &mut MorphOptions<'_>,
) -> Result<(), MorphError> {
    morphlex_core::morph_inner(&OwnedDom, current, Reference::Markup(markup), options)
}

/// Morph the root elements of two parsed documents (both `current` and
/// `reference` are fragment/document nodes; their first element child is
/// taken as the document root).
pub fn morph_document(
    current_document: &DomNode,
    reference_document: &DomNode,
    options: &mut MorphOptions<'_>,
) -> Result<(), MorphError> {
    morphlex_core::morph_document(&OwnedDom, current_document, reference_document, options)
}

/// Parse an HTML fragment into a [`DomNode`] whose children are the parsed
/// roots.
pub fn parse_fragment(markup: &str) -> Result<DomNode, DomParseError> {
    morphlex_dom::parse_fragment(markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morph_replaces_text_content() {
        let current = DomNode::element("p");
        current.append_child(DomNode::text("old"));

        let reference = DomNode::element("p");
        reference.append_child(DomNode::text("new"));

        morph(&current, &reference, &mut MorphOptions::new()).unwrap();
        assert_eq!(current.to_html(), "<p>new</p>");
    }

    #[test]
    fn morph_sequence_removes_current_on_empty_reference() {
        let parent = DomNode::element("div");
        let current = DomNode::element("span");
        parent.append_child(current.clone());

        morph_sequence(&current, &[], &mut MorphOptions::new()).unwrap();
        assert_eq!(parent.to_html(), "<div></div>");
    }

    #[test]
    fn morph_inner_preserves_outer_attributes() {
        let current = DomNode::element("div");
        morphlex_dom::OwnedDom.set_attribute(&current, "class", "keep-me");
        current.append_child(DomNode::text("old"));

        let reference = DomNode::element("div");
        morphlex_dom::OwnedDom.set_attribute(&reference, "class", "discarded");
        reference.append_child(DomNode::text("new"));

        morph_inner(&current, &reference, &mut MorphOptions::new()).unwrap();
        assert_eq!(current.to_html(), r#"<div class="keep-me">new</div>"#);
    }

    #[test]
    fn morph_inner_rejects_mismatched_tag_names() {
        let current = DomNode::element("div");
        let reference = DomNode::element("span");

        let err = morph_inner(&current, &reference, &mut MorphOptions::new()).unwrap_err();
        assert!(matches!(err, MorphError::InvalidInnerMorph { .. }));
    }
}
