//! The text-area morpher.

use crate::options::MorphOptions;
use crate::tree::{Property, PropertyValue, Tree};

/// Replace `current`'s textual content with `reference`'s, re-seeding the
/// control's default value. Unless `preserve_changes` is set and the
/// control was dirty at pre-pass time, the live value is reset to match.
/// `was_dirty` is the element's dirty-pre-pass state, captured by the
/// caller before the attribute morpher (run before this function, per
/// `pair::morph_pair`) clears the marker attribute.
pub fn morph_textarea<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    was_dirty: bool,
    options: &mut MorphOptions<'_, T::Node>,
) {
    let new_text = textual_content(tree, reference);

    replace_text_children(tree, current, reference, options);
    tree.set_property(
        current,
        Property::DefaultValue,
        PropertyValue::Text(new_text.clone()),
    );

    if !(options.preserve_changes && was_dirty) {
        tree.set_property(current, Property::Value, PropertyValue::Text(new_text));
    }
}

fn textual_content<T: Tree + ?Sized>(tree: &T, node: &T::Node) -> String {
    let mut out = String::new();
    for child in tree.children(node) {
        if tree.kind(&child).is_textual() {
            out.push_str(&tree.text_value(&child));
        }
    }
    out
}

/// Drop `current`'s existing children and clone `reference`'s textual
/// children in their place, so the control's child text nodes mirror the
/// reference exactly as well as its `value` property.
fn replace_text_children<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    options: &mut MorphOptions<'_, T::Node>,
) {
    for child in tree.children(current) {
        if options.before_node_removed(&child) {
            tree.remove(&child);
            options.after_node_removed(&child);
        }
    }

    for reference_child in tree.children(reference) {
        if !tree.kind(&reference_child).is_textual() {
            continue;
        }
        let clone = tree.clone_deep(&reference_child);
        if options.before_node_added(current, &clone, None) {
            tree.insert_before(current, clone.clone(), None);
            options.after_node_added(&clone);
        }
    }
}
