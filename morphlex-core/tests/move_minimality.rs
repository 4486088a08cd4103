//! Exercises the "minimal moves" property end to end: for a
//! pure permutation of same-identity children, the number of `move_before`
//! calls the reorder-and-commit phase emits equals `matched_count - |LIS|`.
//!
//! `morphlex-core` has no concrete tree of its own (that's `morphlex-dom`),
//! so this test brings a minimal mock `Tree` just complete enough to run a
//! `<ul>` of identified `<li>`s through a real `morph` call and count the
//! moves the engine actually performs.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use morphlex_core::{morph, MorphOptions, NodeKind, Property, PropertyValue, Reference, Tree};

#[derive(Clone)]
enum Data {
    Element { name: String, id: Option<String> },
    Text(String),
}

struct Inner {
    data: Data,
    parent: RefCell<Option<Weak<Inner>>>,
    children: RefCell<Vec<MockNode>>,
}

#[derive(Clone)]
struct MockNode(Rc<Inner>);

impl PartialEq for MockNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MockNode {
    fn element(name: &str, id: Option<&str>) -> Self {
        MockNode(Rc::new(Inner {
            data: Data::Element {
                name: name.to_string(),
                id: id.map(str::to_string),
            },
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
        }))
    }

    fn text(s: &str) -> Self {
        MockNode(Rc::new(Inner {
            data: Data::Text(s.to_string()),
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
        }))
    }

    fn append(&self, child: MockNode) {
        *child.0.parent.borrow_mut() = Some(Rc::downgrade(&self.0));
        self.0.children.borrow_mut().push(child);
    }
}

/// A `Tree` that does just enough to run `morph` over a `<ul>` of identified
/// `<li>` children, counting every `move_before` call.
#[derive(Default)]
struct MockTree {
    moves: Cell<usize>,
}

impl Tree for MockTree {
    type Node = MockNode;

    fn kind(&self, node: &Self::Node) -> NodeKind {
        match &node.0.data {
            Data::Element { .. } => NodeKind::Element,
            Data::Text(_) => NodeKind::Text,
        }
    }

    fn local_name(&self, element: &Self::Node) -> String {
        match &element.0.data {
            Data::Element { name, .. } => name.clone(),
            Data::Text(_) => String::new(),
        }
    }

    fn input_type(&self, _element: &Self::Node) -> String {
        String::new()
    }

    fn children(&self, parent: &Self::Node) -> Vec<Self::Node> {
        parent.0.children.borrow().clone()
    }

    fn attributes(&self, element: &Self::Node) -> Vec<(String, String)> {
        match &element.0.data {
            Data::Element { id: Some(id), .. } => vec![("id".to_string(), id.clone())],
            _ => Vec::new(),
        }
    }

    fn get_attribute(&self, element: &Self::Node, name: &str) -> Option<String> {
        match &element.0.data {
            Data::Element { id, .. } if name == "id" => id.clone(),
            _ => None,
        }
    }

    fn set_attribute(&self, _element: &Self::Node, _name: &str, _value: &str) {}

    fn remove_attribute(&self, _element: &Self::Node, _name: &str) {}

    fn get_property(&self, _node: &Self::Node, _property: Property) -> Option<PropertyValue> {
        None
    }

    fn set_property(&self, _node: &Self::Node, _property: Property, _value: PropertyValue) {}

    fn text_value(&self, node: &Self::Node) -> String {
        match &node.0.data {
            Data::Text(s) => s.clone(),
            _ => String::new(),
        }
    }

    fn set_text_value(&self, _node: &Self::Node, _value: &str) {}

    fn insert_before(&self, parent: &Self::Node, node: Self::Node, anchor: Option<&Self::Node>) {
        let mut children = parent.0.children.borrow_mut();
        children.retain(|c| c != &node);
        let index = match anchor {
            Some(anchor) => children.iter().position(|c| c == anchor).unwrap_or(children.len()),
            None => children.len(),
        };
        children.insert(index, node.clone());
        drop(children);
        *node.0.parent.borrow_mut() = Some(Rc::downgrade(&parent.0));
    }

    fn move_before(&self, parent: &Self::Node, node: &Self::Node, anchor: Option<&Self::Node>) {
        self.moves.set(self.moves.get() + 1);
        self.insert_before(parent, node.clone(), anchor);
    }

    fn supports_move_before(&self) -> bool {
        true
    }

    fn remove(&self, node: &Self::Node) {
        if let Some(parent) = self.parent(node) {
            parent.0.children.borrow_mut().retain(|c| c != node);
        }
    }

    fn deep_equal(&self, a: &Self::Node, b: &Self::Node) -> bool {
        match (&a.0.data, &b.0.data) {
            (Data::Text(x), Data::Text(y)) => x == y,
            (Data::Element { name: n1, id: i1 }, Data::Element { name: n2, id: i2 }) => {
                n1 == n2 && i1 == i2 && {
                    let ca = a.0.children.borrow();
                    let cb = b.0.children.borrow();
                    ca.len() == cb.len() && ca.iter().zip(cb.iter()).all(|(x, y)| self.deep_equal(x, y))
                }
            }
            _ => false,
        }
    }

    fn clone_deep(&self, node: &Self::Node) -> Self::Node {
        match &node.0.data {
            Data::Text(s) => MockNode::text(s),
            Data::Element { name, id } => {
                let clone = MockNode::element(name, id.as_deref());
                for child in node.0.children.borrow().iter() {
                    clone.append(self.clone_deep(child));
                }
                clone
            }
        }
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        node.0.parent.borrow().as_ref().and_then(Weak::upgrade).map(MockNode)
    }

    fn parse_fragment(&self, _markup: &str) -> Result<Self::Node, String> {
        Err("MockTree does not parse markup".to_string())
    }
}

fn li_with_id(id: &str) -> MockNode {
    MockNode::element("li", Some(id))
}

fn ul_of(children: &[MockNode]) -> MockNode {
    let ul = MockNode::element("ul", None);
    for child in children {
        ul.append(child.clone());
    }
    ul
}

/// A reference `<ul>` of freshly-built `<li id="..">` elements in `order`
/// (distinct node instances from `current`'s, matched by id alone — the
/// realistic shape of a morph call, never sharing identity with `current`).
fn reference_ul(order: &[&str]) -> MockNode {
    ul_of(&order.iter().map(|id| li_with_id(id)).collect::<Vec<_>>())
}

/// Reversing a 5-item identified list moves
/// exactly 4 of the 5 children (LIS of the reversed sequence has length 1).
#[test]
fn reversing_five_identified_items_moves_exactly_four() {
    let tree = MockTree::default();
    let items: Vec<MockNode> = (1..=5).map(|i| li_with_id(&i.to_string())).collect();
    let current = ul_of(&items);
    let reference = reference_ul(&["5", "4", "3", "2", "1"]);

    let mut options = MorphOptions::new();
    morph(&tree, &current, Reference::Node(&reference), &mut options).unwrap();

    assert_eq!(tree.moves.get(), 4);

    let result = tree.children(&current);
    for (position, original) in items.iter().rev().enumerate() {
        assert_eq!(&result[position], original, "identity not preserved at position {position}");
    }
}

/// `[1,2,3,4,5] -> [1,2,4,5,3]` moves only the
/// single displaced node; the four-element LIS `[1,2,4,5]` stays fixed.
#[test]
fn partial_reorder_moves_only_the_displaced_node() {
    let tree = MockTree::default();
    let items: Vec<MockNode> = (1..=5).map(|i| li_with_id(&i.to_string())).collect();
    let current = ul_of(&items);
    let reference = reference_ul(&["1", "2", "4", "5", "3"]);

    let mut options = MorphOptions::new();
    morph(&tree, &current, Reference::Node(&reference), &mut options).unwrap();

    assert_eq!(tree.moves.get(), 1);

    let result = tree.children(&current);
    for (position, original_index) in [0usize, 1, 3, 4, 2].iter().enumerate() {
        assert_eq!(&result[position], &items[*original_index]);
    }
}

/// A reference in the same order as current requires zero moves.
#[test]
fn identical_order_moves_nothing() {
    let tree = MockTree::default();
    let items: Vec<MockNode> = (1..=3).map(|i| li_with_id(&i.to_string())).collect();
    let current = ul_of(&items);
    let reference = reference_ul(&["1", "2", "3"]);

    let mut options = MorphOptions::new();
    morph(&tree, &current, Reference::Node(&reference), &mut options).unwrap();

    assert_eq!(tree.moves.get(), 0);
}
