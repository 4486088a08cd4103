//! Entry dispatch: `morph`, `morph_inner`, `morph_document`.

use crate::dirty::mark_dirty;
use crate::error::MorphError;
use crate::id_index::IdIndex;
use crate::options::MorphOptions;
use crate::pair::morph_pair;
use crate::tree::{NodeKind, Tree};

#[cfg(feature = "tracing")]
use tracing::{debug, trace_span};

/// The reference side of a [`morph`] call: a single node, a flat ordered
/// list of nodes, or markup to be parsed into one.
pub enum Reference<'a, N> {
    /// A single reference node.
    Node(&'a N),
    /// An ordered sequence of reference nodes.
    Sequence(&'a [N]),
    /// Markup to be parsed into a fragment; its children become the
    /// sequence.
    Markup(&'a str),
}

/// Morph `from` (and, transitively, its subtree) to match `to`.
///
/// Dispatch:
/// - an empty sequence removes `from`;
/// - a one-element sequence is the single-node case;
/// - a sequence of two or more morphs `from` against the first element,
///   then inserts the remainder after `from` in its parent, in order.
pub fn morph<T: Tree + ?Sized>(
    tree: &T,
    from: &T::Node,
    to: Reference<'_, T::Node>,
    options: &mut MorphOptions<'_, T::Node>,
) -> Result<(), MorphError> {
    match to {
        Reference::Node(node) => morph_single(tree, from, node, options),
        Reference::Sequence(nodes) => morph_sequence(tree, from, nodes, options),
        Reference::Markup(markup) => {
            let fragment = tree
                .parse_fragment(markup)
                .map_err(MorphError::ParseError)?;
            let children = tree.children(&fragment);
            morph_sequence(tree, from, &children, options)
        }
    }
}

fn morph_sequence<T: Tree + ?Sized>(
    tree: &T,
    from: &T::Node,
    to: &[T::Node],
    options: &mut MorphOptions<'_, T::Node>,
) -> Result<(), MorphError> {
    match to.len() {
        0 => {
            if options.before_node_removed(from) {
                tree.remove(from);
                options.after_node_removed(from);
            }
            Ok(())
        }
        1 => morph_single(tree, from, &to[0], options),
        _ => {
            morph_single(tree, from, &to[0], options)?;

            if let Some(parent) = tree.parent(from) {
                let mut anchor = next_sibling(tree, &parent, from);
                for extra in &to[1..] {
                    let clone = tree.clone_deep(extra);
                    if options.before_node_added(&parent, &clone, anchor.as_ref()) {
                        tree.insert_before(&parent, clone.clone(), anchor.as_ref());
                        options.after_node_added(&clone);
                    }
                    anchor = next_sibling(tree, &parent, &clone);
                }
            }
            Ok(())
        }
    }
}

fn morph_single<T: Tree + ?Sized>(
    tree: &T,
    from: &T::Node,
    to: &T::Node,
    options: &mut MorphOptions<'_, T::Node>,
) -> Result<(), MorphError> {
    #[cfg(feature = "tracing")]
    let _span = trace_span!("morph").entered();

    mark_dirty(tree, from);
    let current_ids = IdIndex::build(tree, from);
    let reference_ids = IdIndex::build(tree, to);

    #[cfg(feature = "tracing")]
    debug!(current_ids = current_ids.len(), reference_ids = reference_ids.len(), "id index built");

    morph_pair(tree, from, to, &current_ids, &reference_ids, options);
    Ok(())
}

/// Reconcile only `from`'s children against `to`'s children, leaving
/// `from`'s own attributes untouched.
///
/// Fails with [`MorphError::InvalidInnerMorph`] unless both sides are
/// elements with the same local name (after `to` is parsed, if it was
/// markup).
pub fn morph_inner<T: Tree + ?Sized>(
    tree: &T,
    from: &T::Node,
    to: Reference<'_, T::Node>,
    options: &mut MorphOptions<'_, T::Node>,
) -> Result<(), MorphError> {
    let to_node = match to {
        Reference::Node(node) => node.clone(),
        Reference::Sequence(nodes) if nodes.len() == 1 => nodes[0].clone(),
        Reference::Sequence(_) => {
            return Err(MorphError::InvalidInnerMorph {
                from: describe(tree, from),
                to: "<sequence>".to_string(),
            })
        }
        Reference::Markup(markup) => {
            let fragment = tree
                .parse_fragment(markup)
                .map_err(MorphError::ParseError)?;
            let mut children = tree.children(&fragment);
            if children.len() != 1 {
                return Err(MorphError::InvalidInnerMorph {
                    from: describe(tree, from),
                    to: format!("<{}-node fragment>", children.len()),
                });
            }
            children.remove(0)
        }
    };

    if tree.kind(from) != NodeKind::Element
        || tree.kind(&to_node) != NodeKind::Element
        || tree.local_name(from) != tree.local_name(&to_node)
    {
        return Err(MorphError::InvalidInnerMorph {
            from: describe(tree, from),
            to: describe(tree, &to_node),
        });
    }

    mark_dirty(tree, from);
    let current_ids = IdIndex::build(tree, from);
    let reference_ids = IdIndex::build(tree, &to_node);

    let current_children = tree.children(from);
    let reference_children = tree.children(&to_node);

    let child_match = crate::child_match::match_children(
        tree,
        &current_children,
        &reference_children,
        &current_ids,
        &reference_ids,
    );

    crate::reorder::reorder_and_commit(
        tree,
        from,
        &reference_children,
        &current_children,
        &child_match,
        options,
        |tree, c, r, opts| morph_pair(tree, c, r, &current_ids, &reference_ids, opts),
    );

    Ok(())
}

/// Morph the root elements of two documents, delegating to [`morph`] on the
/// documents' root elements.
pub fn morph_document<T: Tree + ?Sized>(
    tree: &T,
    from_document: &T::Node,
    to_document: &T::Node,
    options: &mut MorphOptions<'_, T::Node>,
) -> Result<(), MorphError> {
    let from_root = tree
        .children(from_document)
        .into_iter()
        .find(|n| tree.kind(n) == NodeKind::Element);
    let to_root = tree
        .children(to_document)
        .into_iter()
        .find(|n| tree.kind(n) == NodeKind::Element);

    match (from_root, to_root) {
        (Some(from_root), Some(to_root)) => morph(tree, &from_root, Reference::Node(&to_root), options),
        _ => Ok(()),
    }
}

fn describe<T: Tree + ?Sized>(tree: &T, node: &T::Node) -> String {
    if tree.kind(node) == NodeKind::Element {
        tree.local_name(node)
    } else {
        format!("<non-element:{:?}>", tree.kind(node))
    }
}

fn next_sibling<T: Tree + ?Sized>(tree: &T, parent: &T::Node, node: &T::Node) -> Option<T::Node> {
    let children = tree.children(parent);
    let position = children.iter().position(|c| c == node)?;
    children.into_iter().nth(position + 1)
}
