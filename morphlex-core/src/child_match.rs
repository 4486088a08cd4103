//! The seven-pass child matcher.
//!
//! Produces a partial function from reference-child position to
//! current-child position, using each current child at most once, plus the
//! set of current indices left unmatched (candidates for removal).

use crate::id_index::{ids_overlap, IdIndex};
use crate::model::is_form_state_element;
use crate::tree::{NodeKind, Tree};

#[cfg(feature = "tracing")]
use tracing::trace;

/// The result of matching one parent's current children against its
/// reference children.
pub struct ChildMatch {
    /// `match_of[j] == Some(i)` means reference child `j` is matched to
    /// current child `i`; `None` means a new node must be inserted for it.
    pub match_of: Vec<Option<usize>>,
    /// Current-child indices that matched nothing, in original order —
    /// these are removed before the reorder walk begins.
    pub unmatched_current: Vec<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Element,
    Whitespace,
    Node,
}

fn classify<T: Tree + ?Sized>(tree: &T, node: &T::Node) -> Candidate {
    if tree.kind(node) == NodeKind::Element {
        Candidate::Element
    } else if tree.kind(node) == NodeKind::Text && tree.text_value(node).trim().is_empty() {
        Candidate::Whitespace
    } else {
        Candidate::Node
    }
}

/// Match `current` against `reference` for one `(parent_current,
/// parent_reference)` resolution.
#[allow(clippy::too_many_arguments)]
pub fn match_children<T: Tree + ?Sized>(
    tree: &T,
    current: &[T::Node],
    reference: &[T::Node],
    current_ids: &IdIndex<T::Node>,
    reference_ids: &IdIndex<T::Node>,
) -> ChildMatch {
    let n = current.len();
    let m = reference.len();

    let mut available = vec![true; n];
    let mut match_of: Vec<Option<usize>> = vec![None; m];

    let classes: Vec<Candidate> = current.iter().map(|c| classify(tree, c)).collect();

    for pass in 1..=7u8 {
        for j in 0..m {
            if match_of[j].is_some() {
                continue;
            }
            for i in 0..n {
                if !available[i] {
                    continue;
                }
                if pass == 7 && classes[i] == Candidate::Whitespace {
                    // Whitespace never matches by kind-equality alone; only
                    // passes 1 and 6 (both deep-equality) can match it.
                    continue;
                }
                if pass_matches(
                    pass,
                    tree,
                    &current[i],
                    &reference[j],
                    classes[i],
                    current_ids,
                    reference_ids,
                ) {
                    #[cfg(feature = "tracing")]
                    trace!(pass, j, i, "child matched");
                    match_of[j] = Some(i);
                    available[i] = false;
                    break;
                }
            }
        }
    }

    let unmatched_current: Vec<usize> = (0..n).filter(|&i| available[i]).collect();

    #[cfg(feature = "tracing")]
    trace!(
        matched = match_of.iter().filter(|m| m.is_some()).count(),
        unmatched = unmatched_current.len(),
        "child matching complete"
    );

    ChildMatch {
        match_of,
        unmatched_current,
    }
}

#[allow(clippy::too_many_arguments)]
fn pass_matches<T: Tree + ?Sized>(
    pass: u8,
    tree: &T,
    candidate: &T::Node,
    reference: &T::Node,
    candidate_class: Candidate,
    current_ids: &IdIndex<T::Node>,
    reference_ids: &IdIndex<T::Node>,
) -> bool {
    match pass {
        1 => candidate_class == Candidate::Element
            && tree.kind(reference) == NodeKind::Element
            && tree.deep_equal(candidate, reference),

        2 => {
            candidate_class == Candidate::Element
                && tree.kind(reference) == NodeKind::Element
                && tree.local_name(candidate) == tree.local_name(reference)
                && non_empty_id(tree, candidate).is_some()
                && non_empty_id(tree, candidate) == non_empty_id(tree, reference)
        }

        3 => {
            if candidate_class != Candidate::Element || tree.kind(reference) != NodeKind::Element {
                return false;
            }
            match (current_ids.ids_of(candidate), reference_ids.ids_of(reference)) {
                (Some(a), Some(b)) => ids_overlap(a, b),
                _ => false,
            }
        }

        4 => {
            if candidate_class != Candidate::Element
                || tree.kind(reference) != NodeKind::Element
                || tree.local_name(candidate) != tree.local_name(reference)
            {
                return false;
            }
            ["name", "href", "src"].iter().any(|attr| {
                let a = tree.get_attribute(candidate, attr);
                let b = tree.get_attribute(reference, attr);
                matches!((a, b), (Some(a), Some(b)) if !a.is_empty() && a == b)
            })
        }

        5 => {
            if candidate_class != Candidate::Element
                || tree.kind(reference) != NodeKind::Element
                || tree.local_name(candidate) != tree.local_name(reference)
            {
                return false;
            }
            if is_form_state_element(tree, candidate) && is_form_state_element(tree, reference) {
                tree.input_type(candidate) == tree.input_type(reference)
            } else {
                true
            }
        }

        6 => {
            candidate_class != Candidate::Element
                && tree.kind(reference) != NodeKind::Element
                && tree.deep_equal(candidate, reference)
        }

        7 => {
            candidate_class != Candidate::Element
                && tree.kind(reference) != NodeKind::Element
                && tree.kind(candidate) == tree.kind(reference)
        }

        _ => unreachable!("only seven passes are defined"),
    }
}

fn non_empty_id<T: Tree + ?Sized>(tree: &T, element: &T::Node) -> Option<String> {
    tree.get_attribute(element, "id")
        .filter(|id| !id.is_empty())
}
