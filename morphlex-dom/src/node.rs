//! The owned, reference-counted tree node type.
//!
//! Nodes own their children; parents are held as weak references, so a
//! [`DomNode`] handle keeps its own subtree alive but never its ancestors
//! (the same ownership shape as html5ever's `rcdom`).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The typed form-control properties an element may carry.
#[derive(Debug, Clone, Default)]
pub struct ElementProperties {
    /// Live `value`.
    pub value: Option<String>,
    /// Live `checked`.
    pub checked: Option<bool>,
    /// Live `selected`.
    pub selected: Option<bool>,
    /// Live `indeterminate`.
    pub indeterminate: Option<bool>,
    /// Live `disabled`.
    pub disabled: Option<bool>,
    /// Declared default `value`.
    pub default_value: Option<String>,
    /// Declared default `checked`.
    pub default_checked: Option<bool>,
    /// Declared default `selected`.
    pub default_selected: Option<bool>,
}

/// What kind of node this is, and the data specific to that kind.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// A document root; only ever a parent.
    Document,
    /// A document fragment; only ever a parent.
    Fragment,
    /// An element with a local name, attributes, and (for form controls)
    /// typed properties.
    Element {
        /// Lowercased local name.
        name: String,
        /// Ordered `(name, value)` attribute pairs.
        attrs: Vec<(String, String)>,
        /// Typed form-control properties (unused/`None` on non-form elements).
        props: ElementProperties,
    },
    /// A text node.
    Text(String),
    /// A comment node.
    Comment(String),
    /// A CDATA section.
    Cdata(String),
}

struct NodeInner {
    parent: RefCell<Option<Weak<NodeInner>>>,
    children: RefCell<Vec<DomNode>>,
    data: RefCell<NodeData>,
}

/// A handle to a node in an owned, arena-backed tree.
///
/// Cloning a `DomNode` clones the handle (cheap `Rc` bump), not the
/// subtree; use [`crate::OwnedDom::clone_deep`] (exposed through
/// `morphlex_core::Tree`) for a structural copy.
#[derive(Clone)]
pub struct DomNode(Rc<NodeInner>);

impl PartialEq for DomNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for DomNode {}

impl std::fmt::Debug for DomNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.data() {
            NodeData::Document => write!(f, "DomNode(document)"),
            NodeData::Fragment => write!(f, "DomNode(fragment)"),
            NodeData::Element { name, .. } => write!(f, "DomNode(<{name}>, ptr={:p})", Rc::as_ptr(&self.0)),
            NodeData::Text(text) => write!(f, "DomNode(text={text:?})"),
            NodeData::Comment(text) => write!(f, "DomNode(comment={text:?})"),
            NodeData::Cdata(text) => write!(f, "DomNode(cdata={text:?})"),
        }
    }
}

impl DomNode {
    fn new(data: NodeData) -> Self {
        DomNode(Rc::new(NodeInner {
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
            data: RefCell::new(data),
        }))
    }

    /// A new, parentless document node.
    pub fn document() -> Self {
        DomNode::new(NodeData::Document)
    }

    /// A new, parentless fragment node.
    pub fn fragment() -> Self {
        DomNode::new(NodeData::Fragment)
    }

    /// A new, parentless, childless element.
    pub fn element(name: impl Into<String>) -> Self {
        DomNode::new(NodeData::Element {
            name: name.into(),
            attrs: Vec::new(),
            props: ElementProperties::default(),
        })
    }

    /// A new, parentless text node.
    pub fn text(value: impl Into<String>) -> Self {
        DomNode::new(NodeData::Text(value.into()))
    }

    /// A new, parentless comment node.
    pub fn comment(value: impl Into<String>) -> Self {
        DomNode::new(NodeData::Comment(value.into()))
    }

    /// A new, parentless CDATA node.
    pub fn cdata(value: impl Into<String>) -> Self {
        DomNode::new(NodeData::Cdata(value.into()))
    }

    pub(crate) fn data(&self) -> std::cell::Ref<'_, NodeData> {
        self.0.data.borrow()
    }

    pub(crate) fn data_mut(&self) -> std::cell::RefMut<'_, NodeData> {
        self.0.data.borrow_mut()
    }

    pub(crate) fn children_vec(&self) -> std::cell::Ref<'_, Vec<DomNode>> {
        self.0.children.borrow()
    }

    pub(crate) fn children_vec_mut(&self) -> std::cell::RefMut<'_, Vec<DomNode>> {
        self.0.children.borrow_mut()
    }

    pub(crate) fn parent_handle(&self) -> Option<DomNode> {
        self.0
            .parent
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade())
            .map(DomNode)
    }

    pub(crate) fn set_parent(&self, parent: Option<&DomNode>) {
        *self.0.parent.borrow_mut() = parent.map(|p| Rc::downgrade(&p.0));
    }

    /// Append `child` to this node's children, taking ownership of it.
    /// Detaches `child` from any previous parent first.
    pub fn append_child(&self, child: DomNode) {
        self.insert_child_before(child, None);
    }

    /// Insert `child` immediately before `anchor` (appended if `anchor` is
    /// `None` or not actually a child of `self`). Detaches `child` from any
    /// previous parent first.
    pub fn insert_child_before(&self, child: DomNode, anchor: Option<&DomNode>) {
        child.detach();

        let mut children = self.0.children.borrow_mut();
        let index = match anchor {
            Some(anchor) => children.iter().position(|c| c == anchor).unwrap_or(children.len()),
            None => children.len(),
        };
        children.insert(index, child.clone());
        drop(children);
        child.set_parent(Some(self));
    }

    /// A snapshot of this node's current children, in order.
    pub fn children(&self) -> Vec<DomNode> {
        self.0.children.borrow().clone()
    }

    /// Detach this node from its parent, if any.
    pub fn detach(&self) {
        if let Some(parent) = self.parent_handle() {
            let mut siblings = parent.0.children.borrow_mut();
            if let Some(pos) = siblings.iter().position(|c| c == self) {
                siblings.remove(pos);
            }
        }
        self.set_parent(None);
    }

    /// A deep (structural) clone: same data, fresh children, no parent.
    pub fn clone_deep(&self) -> DomNode {
        let data = self.data().clone();
        let cloned = DomNode::new(data);
        for child in self.children_vec().iter() {
            cloned.append_child(child.clone_deep());
        }
        cloned
    }

    /// Structural equality ignoring parent/identity: same variant, same
    /// attributes (as sets), same children recursively.
    pub fn deep_equal(&self, other: &DomNode) -> bool {
        match (&*self.data(), &*other.data()) {
            (NodeData::Document, NodeData::Document) | (NodeData::Fragment, NodeData::Fragment) => {
                self.children_deep_equal(other)
            }
            (NodeData::Text(a), NodeData::Text(b)) => a == b,
            (NodeData::Comment(a), NodeData::Comment(b)) => a == b,
            (NodeData::Cdata(a), NodeData::Cdata(b)) => a == b,
            (
                NodeData::Element {
                    name: n1, attrs: a1, ..
                },
                NodeData::Element {
                    name: n2, attrs: a2, ..
                },
            ) => {
                if n1 != n2 || a1.len() != a2.len() {
                    return false;
                }
                let mut sorted_a1 = a1.clone();
                let mut sorted_a2 = a2.clone();
                sorted_a1.sort();
                sorted_a2.sort();
                if sorted_a1 != sorted_a2 {
                    return false;
                }
                self.children_deep_equal(other)
            }
            _ => false,
        }
    }

    /// Whether `self` and `other` have the same number of children, each
    /// pairwise deep-equal in order. Shared by the element, document, and
    /// fragment arms of [`Self::deep_equal`].
    fn children_deep_equal(&self, other: &DomNode) -> bool {
        let self_children = self.children_vec();
        let other_children = other.children_vec();
        self_children.len() == other_children.len()
            && self_children
                .iter()
                .zip(other_children.iter())
                .all(|(a, b)| a.deep_equal(b))
    }

    /// Serialize this node (and its subtree) back to an HTML string.
    /// Intended for tests and examples, not part of the `Tree` contract.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match &*self.data() {
            NodeData::Document | NodeData::Fragment => {
                for child in self.children_vec().iter() {
                    child.write_html(out);
                }
            }
            NodeData::Text(text) => out.push_str(&escape(text)),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Cdata(text) => {
                out.push_str("<![CDATA[");
                out.push_str(text);
                out.push_str("]]>");
            }
            NodeData::Element { name, attrs, .. } => {
                out.push('<');
                out.push_str(name);
                for (k, v) in attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    out.push_str(&escape(v));
                    out.push('"');
                }
                out.push('>');
                for child in self.children_vec().iter() {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
