//! The pair morpher: given one matched `(current, reference)`
//! pair, bring `current` in line with `reference` and recurse into children.

use crate::child_match::match_children;
use crate::id_index::IdIndex;
use crate::model::{elements_match, DIRTY_ATTR};
use crate::options::MorphOptions;
use crate::reorder::reorder_and_commit;
use crate::tree::Tree;

#[cfg(feature = "tracing")]
use tracing::trace_span;

/// Morph `current` in place so it is equivalent to `reference`, recursing
/// into children as needed. `current_ids`/`reference_ids` are the
/// whole-call ID indexes built once up front; they are only
/// ever read here, never rebuilt.
pub fn morph_pair<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    current_ids: &IdIndex<T::Node>,
    reference_ids: &IdIndex<T::Node>,
    options: &mut MorphOptions<'_, T::Node>,
) {
    #[cfg(feature = "tracing")]
    let _span = trace_span!("morph_pair").entered();

    if current == reference {
        return;
    }
    if tree.deep_equal(current, reference) {
        return;
    }

    if !options.before_node_visited(current, reference) {
        return;
    }

    if !elements_match(tree, current, reference) {
        replace_or_update_text(tree, current, reference, options);
        options.after_node_visited(current, reference);
        return;
    }

    // Captured before `morph_attributes` clears the marker, so `preserve_changes`
    // can still tell whether this element was dirty at pre-pass time.
    let was_dirty = tree.has_attribute(current, DIRTY_ATTR);
    crate::attrs::morph_attributes(tree, current, reference, was_dirty, options);

    if tree.local_name(current) == "textarea" {
        crate::textarea::morph_textarea(tree, current, reference, was_dirty, options);
    } else {
        let current_children = tree.children(current);
        let reference_children = tree.children(reference);

        if !current_children.is_empty() || !reference_children.is_empty() {
            morph_children(
                tree,
                current,
                &current_children,
                &reference_children,
                current_ids,
                reference_ids,
                options,
            );
        }
    }

    options.after_node_visited(current, reference);
}

fn morph_children<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    current_children: &[T::Node],
    reference_children: &[T::Node],
    current_ids: &IdIndex<T::Node>,
    reference_ids: &IdIndex<T::Node>,
    options: &mut MorphOptions<'_, T::Node>,
) {
    if !options.before_children_visited(current) {
        return;
    }

    let child_match = match_children(
        tree,
        current_children,
        reference_children,
        current_ids,
        reference_ids,
    );

    reorder_and_commit(
        tree,
        current,
        reference_children,
        current_children,
        &child_match,
        options,
        |tree, c, r, opts| morph_pair(tree, c, r, current_ids, reference_ids, opts),
    );

    options.after_children_visited(current);
}

/// Handles the non-matching branch: same-kind textual
/// update, or a full replace.
fn replace_or_update_text<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    options: &mut MorphOptions<'_, T::Node>,
) {
    let same_textual_kind =
        tree.kind(current) == tree.kind(reference) && tree.kind(current).is_textual();

    if same_textual_kind {
        tree.set_text_value(current, &tree.text_value(reference));
        return;
    }

    replace_node(tree, current, reference, options);
}

/// Replace `current` with a clone of `reference` in `current`'s parent.
/// Requires both `before_node_removed` and `before_node_added` to approve;
/// either refusal cancels the whole replacement.
fn replace_node<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    options: &mut MorphOptions<'_, T::Node>,
) {
    let Some(parent) = tree.parent(current) else {
        return;
    };

    let clone = tree.clone_deep(reference);

    let removal_ok = options.before_node_removed(current);
    let addition_ok = options.before_node_added(&parent, &clone, Some(current));

    if !(removal_ok && addition_ok) {
        return;
    }

    tree.insert_before(&parent, clone.clone(), Some(current));
    tree.remove(current);

    options.after_node_removed(current);
    options.after_node_added(&clone);
}
