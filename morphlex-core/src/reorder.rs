//! LIS move-minimization and the reorder-and-commit walk.

use std::collections::HashSet;

use crate::child_match::ChildMatch;
use crate::options::MorphOptions;
use crate::tree::Tree;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Remove every unmatched candidate, compute the LIS of the matched
/// sequence, then walk reference positions left to right, moving or
/// inserting as needed and recursing into `visit_pair` for every matched
/// pair. Returns the number of move operations actually emitted (useful for
/// tests asserting minimality).
pub fn reorder_and_commit<T, F>(
    tree: &T,
    parent_current: &T::Node,
    reference_children: &[T::Node],
    current_children: &[T::Node],
    child_match: &ChildMatch,
    options: &mut MorphOptions<'_, T::Node>,
    mut visit_pair: F,
) -> usize
where
    T: Tree + ?Sized,
    F: FnMut(&T, &T::Node, &T::Node, &mut MorphOptions<'_, T::Node>),
{
    // Removals happen before LIS/insertion-point walking so that the walk
    // is never confused by soon-to-be-removed siblings.
    for &i in &child_match.unmatched_current {
        let node = &current_children[i];
        if options.before_node_removed(node) {
            tree.remove(node);
            options.after_node_removed(node);
        }
    }

    let fixed_points = lis_fixed_points(&child_match.match_of);

    let mut insertion_point = tree.children(parent_current).into_iter().next();
    let mut moves = 0usize;

    for (j, reference_child) in reference_children.iter().enumerate() {
        let placed = match child_match.match_of[j] {
            Some(i) => {
                let node = current_children[i].clone();

                if !fixed_points.contains(&i) {
                    #[cfg(feature = "tracing")]
                    trace!(j, i, "moving matched child");
                    tree.move_before(parent_current, &node, insertion_point.as_ref());
                    moves += 1;
                }

                visit_pair(tree, &node, reference_child, options);
                node
            }
            None => {
                let clone = tree.clone_deep(reference_child);
                if options.before_node_added(parent_current, &clone, insertion_point.as_ref()) {
                    tree.insert_before(parent_current, clone.clone(), insertion_point.as_ref());
                    options.after_node_added(&clone);
                }
                clone
            }
        };

        insertion_point = next_sibling(tree, parent_current, &placed);
    }

    moves
}

fn next_sibling<T: Tree + ?Sized>(tree: &T, parent: &T::Node, node: &T::Node) -> Option<T::Node> {
    let children = tree.children(parent);
    let position = children.iter().position(|c| c == node)?;
    children.into_iter().nth(position + 1)
}

/// The set of current-child indices (values of `match_of`, not reference
/// positions) that belong to the longest strictly-increasing subsequence of
/// the matched sequence, ignoring unmatched (`None`) positions. These are
/// the "fixed points" that the reorder walk leaves in place.
///
/// Classic patience-sort LIS with binary search and predecessor links;
/// absent positions are skipped rather than treated as a value.
pub fn lis_fixed_points(match_of: &[Option<usize>]) -> HashSet<usize> {
    let entries: Vec<(usize, usize)> = match_of
        .iter()
        .enumerate()
        .filter_map(|(j, v)| v.map(|value| (j, value)))
        .collect();

    if entries.is_empty() {
        return HashSet::new();
    }

    // `tails[k]` holds the index into `entries` of the smallest possible
    // tail value for an increasing subsequence of length `k + 1`.
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; entries.len()];

    for idx in 0..entries.len() {
        let value = entries[idx].1;
        let pos = tails.partition_point(|&tail_idx| entries[tail_idx].1 < value);

        if pos > 0 {
            predecessors[idx] = Some(tails[pos - 1]);
        }

        if pos == tails.len() {
            tails.push(idx);
        } else {
            tails[pos] = idx;
        }
    }

    let mut fixed = HashSet::new();
    let mut cursor = tails.last().copied();
    while let Some(idx) = cursor {
        fixed.insert(entries[idx].1);
        cursor = predecessors[idx];
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lis_of_reversed_sequence_has_length_one() {
        let seq: Vec<Option<usize>> = vec![4, 3, 2, 1, 0].into_iter().map(Some).collect();
        let fixed = lis_fixed_points(&seq);
        assert_eq!(fixed.len(), 1);
    }

    #[test]
    fn lis_skips_absent_positions() {
        // [1, 2, None, 4, 5, 3] -> LIS is [1,2,4,5], fixed = {1,2,4,5}
        let seq: Vec<Option<usize>> = vec![Some(1), Some(2), None, Some(4), Some(5), Some(3)];
        let fixed = lis_fixed_points(&seq);
        let mut sorted: Vec<_> = fixed.into_iter().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 4, 5]);
    }

    #[test]
    fn identity_sequence_is_entirely_fixed() {
        let seq: Vec<Option<usize>> = (0..5).map(Some).collect();
        let fixed = lis_fixed_points(&seq);
        assert_eq!(fixed.len(), 5);
    }
}
