//! Node-pair classification shared by the matcher and the pair morpher.

use crate::tree::{NodeKind, Tree};

/// The transient marker attribute set by the dirty-flag pre-pass. Removed at
/// the start of the attribute-morph pass on any element visited; elements
/// never visited retain it, which is intentional and observable.
pub const DIRTY_ATTR: &str = "morphlex-dirty";

/// Local names of elements whose typed properties (`value`, `checked`,
/// `selected`, ...) the engine manages directly instead of only through the
/// attribute map.
const FORM_STATE_ELEMENTS: &[&str] = &["input", "option", "textarea", "select"];

/// Whether `element`'s local name makes it a form-state element.
pub fn is_form_state_element<T: Tree + ?Sized>(tree: &T, element: &T::Node) -> bool {
    FORM_STATE_ELEMENTS.contains(&tree.local_name(element).as_str())
}

/// Whether the attribute name is one the attribute morpher treats specially
/// because it mirrors a live, user-editable property.
pub fn is_form_state_attribute(name: &str) -> bool {
    matches!(name, "value" | "checked" | "selected")
}

/// Whether `a` and `b` form a matching pair: both elements, equal local
/// name, and (for form controls) equal input type so a text input never
/// matches a checkbox.
pub fn elements_match<T: Tree + ?Sized>(tree: &T, a: &T::Node, b: &T::Node) -> bool {
    if tree.kind(a) != NodeKind::Element || tree.kind(b) != NodeKind::Element {
        return false;
    }
    if tree.local_name(a) != tree.local_name(b) {
        return false;
    }
    if is_form_state_element(tree, a) && is_form_state_element(tree, b) {
        return tree.input_type(a) == tree.input_type(b);
    }
    true
}

/// Whether a text node's value is whitespace-only.
pub fn is_whitespace_text<T: Tree + ?Sized>(tree: &T, node: &T::Node) -> bool {
    tree.kind(node) == NodeKind::Text && tree.text_value(node).trim().is_empty()
}
