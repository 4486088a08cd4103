//! The options surface: `preserveChanges` and the
//! before/after hook pairs that let a caller veto or observe every
//! structural mutation.

/// Configuration for a single morph call.
///
/// Every callback is optional; an absent callback behaves as if it always
/// returned `true` (for `before*` hooks) or did nothing (for `after*`
/// hooks). Construct with [`MorphOptions::new`] and chain the `with_*`
/// setters.
pub struct MorphOptions<'a, N> {
    /// When `true`, a form control whose live state differs from its
    /// default (i.e. the dirty-flag pre-pass marked it) keeps that live
    /// state during the attribute and textarea morph passes instead of
    /// being overwritten by the reference's declared value.
    pub preserve_changes: bool,

    pub(crate) before_node_visited: Option<Box<dyn FnMut(&N, &N) -> bool + 'a>>,
    pub(crate) after_node_visited: Option<Box<dyn FnMut(&N, &N) + 'a>>,

    pub(crate) before_node_added: Option<Box<dyn FnMut(&N, &N, Option<&N>) -> bool + 'a>>,
    pub(crate) after_node_added: Option<Box<dyn FnMut(&N) + 'a>>,

    pub(crate) before_node_removed: Option<Box<dyn FnMut(&N) -> bool + 'a>>,
    pub(crate) after_node_removed: Option<Box<dyn FnMut(&N) + 'a>>,

    pub(crate) before_attribute_updated:
        Option<Box<dyn FnMut(&N, &str, Option<&str>) -> bool + 'a>>,
    pub(crate) after_attribute_updated:
        Option<Box<dyn FnMut(&N, &str, Option<&str>) + 'a>>,

    pub(crate) before_children_visited: Option<Box<dyn FnMut(&N) -> bool + 'a>>,
    pub(crate) after_children_visited: Option<Box<dyn FnMut(&N) + 'a>>,
}

impl<'a, N> Default for MorphOptions<'a, N> {
    fn default() -> Self {
        MorphOptions {
            preserve_changes: false,
            before_node_visited: None,
            after_node_visited: None,
            before_node_added: None,
            after_node_added: None,
            before_node_removed: None,
            after_node_removed: None,
            before_attribute_updated: None,
            after_attribute_updated: None,
            before_children_visited: None,
            after_children_visited: None,
        }
    }
}

impl<'a, N> MorphOptions<'a, N> {
    /// An options set with every hook absent and `preserve_changes = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `preserve_changes`.
    pub fn with_preserve_changes(mut self, preserve: bool) -> Self {
        self.preserve_changes = preserve;
        self
    }

    /// Veto hook invoked before visiting a matched pair. Returning `false`
    /// skips attribute updates, child reconciliation, and `after_node_visited`.
    pub fn with_before_node_visited(
        mut self,
        f: impl FnMut(&N, &N) -> bool + 'a,
    ) -> Self {
        self.before_node_visited = Some(Box::new(f));
        self
    }

    /// Notification invoked after a pair has been fully visited.
    pub fn with_after_node_visited(mut self, f: impl FnMut(&N, &N) + 'a) -> Self {
        self.after_node_visited = Some(Box::new(f));
        self
    }

    /// Veto hook invoked before inserting a new node (clone of a reference
    /// node) into `parent` before `insertion_point`.
    pub fn with_before_node_added(
        mut self,
        f: impl FnMut(&N, &N, Option<&N>) -> bool + 'a,
    ) -> Self {
        self.before_node_added = Some(Box::new(f));
        self
    }

    /// Notification invoked after a node has been inserted.
    pub fn with_after_node_added(mut self, f: impl FnMut(&N) + 'a) -> Self {
        self.after_node_added = Some(Box::new(f));
        self
    }

    /// Veto hook invoked before removing a node.
    pub fn with_before_node_removed(mut self, f: impl FnMut(&N) -> bool + 'a) -> Self {
        self.before_node_removed = Some(Box::new(f));
        self
    }

    /// Notification invoked after a node has been removed.
    pub fn with_after_node_removed(mut self, f: impl FnMut(&N) + 'a) -> Self {
        self.after_node_removed = Some(Box::new(f));
        self
    }

    /// Veto hook invoked before an attribute is added, updated, or removed
    /// (`None` means removal).
    pub fn with_before_attribute_updated(
        mut self,
        f: impl FnMut(&N, &str, Option<&str>) -> bool + 'a,
    ) -> Self {
        self.before_attribute_updated = Some(Box::new(f));
        self
    }

    /// Notification invoked after an attribute has been added, updated, or
    /// removed, carrying the previous value (`None` if it didn't exist).
    pub fn with_after_attribute_updated(
        mut self,
        f: impl FnMut(&N, &str, Option<&str>) + 'a,
    ) -> Self {
        self.after_attribute_updated = Some(Box::new(f));
        self
    }

    /// Veto hook invoked before the child-matching phase for `parent`.
    /// Returning `false` skips child reconciliation for that parent entirely.
    pub fn with_before_children_visited(mut self, f: impl FnMut(&N) -> bool + 'a) -> Self {
        self.before_children_visited = Some(Box::new(f));
        self
    }

    /// Notification invoked after the child-matching phase for `parent`.
    pub fn with_after_children_visited(mut self, f: impl FnMut(&N) + 'a) -> Self {
        self.after_children_visited = Some(Box::new(f));
        self
    }

    pub(crate) fn before_node_visited(&mut self, from: &N, to: &N) -> bool {
        match &mut self.before_node_visited {
            Some(f) => f(from, to),
            None => true,
        }
    }

    pub(crate) fn after_node_visited(&mut self, from: &N, to: &N) {
        if let Some(f) = &mut self.after_node_visited {
            f(from, to);
        }
    }

    pub(crate) fn before_node_added(
        &mut self,
        parent: &N,
        node: &N,
        insertion_point: Option<&N>,
    ) -> bool {
        match &mut self.before_node_added {
            Some(f) => f(parent, node, insertion_point),
            None => true,
        }
    }

    pub(crate) fn after_node_added(&mut self, node: &N) {
        if let Some(f) = &mut self.after_node_added {
            f(node);
        }
    }

    pub(crate) fn before_node_removed(&mut self, node: &N) -> bool {
        match &mut self.before_node_removed {
            Some(f) => f(node),
            None => true,
        }
    }

    pub(crate) fn after_node_removed(&mut self, node: &N) {
        if let Some(f) = &mut self.after_node_removed {
            f(node);
        }
    }

    pub(crate) fn before_attribute_updated(
        &mut self,
        element: &N,
        name: &str,
        new_value: Option<&str>,
    ) -> bool {
        match &mut self.before_attribute_updated {
            Some(f) => f(element, name, new_value),
            None => true,
        }
    }

    pub(crate) fn after_attribute_updated(
        &mut self,
        element: &N,
        name: &str,
        previous_value: Option<&str>,
    ) {
        if let Some(f) = &mut self.after_attribute_updated {
            f(element, name, previous_value);
        }
    }

    pub(crate) fn before_children_visited(&mut self, parent: &N) -> bool {
        match &mut self.before_children_visited {
            Some(f) => f(parent),
            None => true,
        }
    }

    pub(crate) fn after_children_visited(&mut self, parent: &N) {
        if let Some(f) = &mut self.after_children_visited {
            f(parent);
        }
    }
}
