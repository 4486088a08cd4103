//! The attribute morpher: a forward (add/update) pass over the reference's
//! attributes followed by a backward (remove) pass over the current
//! element's attributes.

use crate::model::{is_form_state_attribute, DIRTY_ATTR};
use crate::options::MorphOptions;
use crate::tree::{Property, PropertyValue, Tree};

#[cfg(feature = "tracing")]
use tracing::trace;

/// Morph `current`'s attributes (and the live properties they shadow) to
/// match `reference`'s. `was_dirty` is the element's dirty-pre-pass state,
/// captured by the caller *before* this call clears the marker attribute —
/// reading it here would always see `false`, since the marker is removed
/// below before either pass runs.
pub fn morph_attributes<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    was_dirty: bool,
    options: &mut MorphOptions<'_, T::Node>,
) {
    tree.remove_attribute(current, DIRTY_ATTR);

    forward_pass(tree, current, reference, was_dirty, options);
    backward_pass(tree, current, reference, was_dirty, options);
}

fn forward_pass<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    was_dirty: bool,
    options: &mut MorphOptions<'_, T::Node>,
) {
    for (name, value) in tree.attributes(reference) {
        if is_form_state_attribute(&name) {
            sync_live_property_on_add(tree, current, &name, &value, was_dirty, options);
        }

        let previous = tree.get_attribute(current, &name);
        if previous.as_deref() != Some(value.as_str()) {
            #[cfg(feature = "tracing")]
            trace!(name = %name, value = %value, "attribute update");

            if options.before_attribute_updated(current, &name, Some(&value)) {
                tree.set_attribute(current, &name, &value);
                options.after_attribute_updated(current, &name, previous.as_deref());
            }
        }
    }
}

fn backward_pass<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    reference: &T::Node,
    was_dirty: bool,
    options: &mut MorphOptions<'_, T::Node>,
) {
    let mut current_attrs = tree.attributes(current);
    current_attrs.reverse();

    for (name, previous_value) in current_attrs {
        if tree.has_attribute(reference, &name) {
            continue;
        }

        if is_form_state_attribute(&name) {
            sync_live_property_on_remove(tree, current, &name, was_dirty, options);
        }

        if options.before_attribute_updated(current, &name, None) {
            tree.remove_attribute(current, &name);
            options.after_attribute_updated(current, &name, Some(previous_value.as_str()));
        }
    }
}

/// Update the live property a form-state attribute shadows, when the
/// reference declares a new value for it during the forward pass.
/// `was_dirty` is the element's dirty-pre-pass state, captured before the
/// marker attribute was cleared at the start of [`morph_attributes`].
fn sync_live_property_on_add<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    name: &str,
    value: &str,
    was_dirty: bool,
    options: &MorphOptions<'_, T::Node>,
) {
    match name {
        "value" => {
            let live = tree.get_property(current, Property::Value);
            let live_str = live.as_ref().and_then(PropertyValue::as_str);
            if live_str != Some(value) {
                if !options.preserve_changes || !was_dirty {
                    tree.set_property(current, Property::Value, PropertyValue::Text(value.to_string()));
                }
            }
        }
        "checked" => set_live_bool_on_add(tree, current, Property::Checked, was_dirty, options),
        "selected" => set_live_bool_on_add(tree, current, Property::Selected, was_dirty, options),
        _ => {}
    }
}

fn set_live_bool_on_add<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    property: Property,
    was_dirty: bool,
    options: &MorphOptions<'_, T::Node>,
) {
    if options.preserve_changes && was_dirty {
        return;
    }
    tree.set_property(current, property, PropertyValue::Bool(true));
}

/// Clear the live property a form-state attribute shadows, when the
/// reference no longer declares it during the backward pass. `was_dirty` is
/// the element's dirty-pre-pass state, captured before the marker attribute
/// was cleared at the start of [`morph_attributes`].
fn sync_live_property_on_remove<T: Tree + ?Sized>(
    tree: &T,
    current: &T::Node,
    name: &str,
    was_dirty: bool,
    options: &MorphOptions<'_, T::Node>,
) {
    let property = match name {
        "checked" => Property::Checked,
        "selected" => Property::Selected,
        _ => return,
    };

    let live_differs_from_default = tree
        .get_property(current, property)
        .and_then(|v| v.as_bool())
        != tree
            .get_property(
                current,
                match property {
                    Property::Checked => Property::DefaultChecked,
                    Property::Selected => Property::DefaultSelected,
                    _ => unreachable!(),
                },
            )
            .and_then(|v| v.as_bool());

    if options.preserve_changes && was_dirty && live_differs_from_default {
        return;
    }

    tree.set_property(current, property, PropertyValue::Bool(false));
}
