//! ID indexing.
//!
//! For every element in a tree that carries a non-empty `id`, the ID is
//! recorded against every ancestor (inclusive of the element itself) up to
//! the indexed root. Entries are only created for nodes whose subtree
//! contributes at least one ID — this keeps the index small for the common
//! case of mostly-unidentified markup.
//!
//! This is an arena-shaped identity map: a flat `Vec<(Node, ids)>` rather
//! than a `HashMap`, since host node handles aren't required to implement
//! `Hash`. ID sets themselves are sorted `Vec<String>`s, which keeps the
//! matcher's overlap test a hashless linear-merge intersection instead of a
//! second hash structure per node.

use crate::tree::{NodeKind, Tree};

/// A per-call mapping from node identity to the set of non-empty IDs found
/// anywhere in that node's descendant subtree (inclusive of the node
/// itself). Built once at the start of a call and only ever queried after
/// that: it is never mutated or rebuilt mid-morph, even as nodes move.
pub struct IdIndex<N> {
    entries: Vec<(N, Vec<String>)>,
}

impl<N: PartialEq> IdIndex<N> {
    /// Build an ID index over `root`'s subtree.
    pub fn build<T: Tree<Node = N> + ?Sized>(tree: &T, root: &N) -> Self {
        let mut index = IdIndex { entries: Vec::new() };
        index.walk(tree, root);
        index
    }

    /// The number of nodes with a recorded ID set (not the number of IDs).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no node in the walked subtree carried an ID.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk `node` and its descendants, recording each encountered ID
    /// against every ancestor from that element up to `node`'s own
    /// ancestors within this call's walk (implemented by accumulating
    /// bottom-up as the recursion unwinds).
    fn walk<T: Tree<Node = N> + ?Sized>(&mut self, tree: &T, node: &N) -> Vec<String> {
        let mut ids_here = Vec::new();

        if tree.kind(node) == NodeKind::Element {
            if let Some(id) = tree.get_attribute(node, "id") {
                if !id.is_empty() {
                    ids_here.push(id);
                }
            }
        }

        if tree.kind(node).is_parent_capable() {
            for child in tree.children(node) {
                let child_ids = self.walk(tree, &child);
                for id in child_ids {
                    if !ids_here.contains(&id) {
                        ids_here.push(id);
                    }
                }
            }
        }

        if !ids_here.is_empty() {
            ids_here.sort_unstable();
            ids_here.dedup();
            self.entries.push((node.clone(), ids_here.clone()));
        }

        ids_here
    }
}

impl<N: PartialEq> IdIndex<N>
where
    N: Clone,
{
    /// The sorted ID set recorded for `node`, if any ID occurs in its
    /// subtree.
    pub fn ids_of(&self, node: &N) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, ids)| ids.as_slice())
    }
}

/// Whether two sorted ID slices share at least one member. Linear merge,
/// since both sides are already sorted.
pub fn ids_overlap(a: &[String], b: &[String]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return true,
        }
    }
    false
}
