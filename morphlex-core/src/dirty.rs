//! The dirty-flag pre-pass.
//!
//! Runs once, before any mutation, over the *current* tree only. Marks every
//! form-state element with a `name` whose live value/checked/selected state
//! differs from its declared default, so the attribute morpher can later
//! tell "the reference wants a value change" apart from "the user already
//! changed this; preserve it if `preserve_changes` is set".

use crate::model::{is_form_state_element, DIRTY_ATTR};
use crate::tree::{NodeKind, Property, Tree};

#[cfg(feature = "tracing")]
use tracing::trace;

/// Walk `root`'s subtree and set [`DIRTY_ATTR`] on every dirty form control.
pub fn mark_dirty<T: Tree + ?Sized>(tree: &T, root: &T::Node) {
    if tree.kind(root) == NodeKind::Element {
        if is_form_state_element(tree, root)
            && tree.has_attribute(root, "name")
            && is_dirty(tree, root)
        {
            #[cfg(feature = "tracing")]
            trace!(name = %tree.local_name(root), "marking dirty");
            tree.set_attribute(root, DIRTY_ATTR, "");
        }
    }

    if tree.kind(root).is_parent_capable() {
        for child in tree.children(root) {
            mark_dirty(tree, &child);
        }
    }
}

/// Whether `element`'s live state differs from its declared default along
/// value, checked, or selected.
fn is_dirty<T: Tree + ?Sized>(tree: &T, element: &T::Node) -> bool {
    if let (Some(value), Some(default)) = (
        tree.get_property(element, Property::Value),
        tree.get_property(element, Property::DefaultValue),
    ) {
        if value != default {
            return true;
        }
    }

    if let (Some(checked), Some(default)) = (
        tree.get_property(element, Property::Checked),
        tree.get_property(element, Property::DefaultChecked),
    ) {
        if checked.as_bool() != default.as_bool() {
            return true;
        }
    }

    if let (Some(selected), Some(default)) = (
        tree.get_property(element, Property::Selected),
        tree.get_property(element, Property::DefaultSelected),
    ) {
        if selected.as_bool() != default.as_bool() {
            return true;
        }
    }

    false
}
