//! The capability set the morph engine requires from a host tree.
//!
//! Morphlex never constructs a concrete node type itself. Every mutation,
//! comparison and accessor it needs is expressed as a method on [`Tree`], so
//! the same engine runs unmodified over an in-memory arena (`morphlex-dom`),
//! a real browser DOM (`morphlex-wasm`), or a test double.

/// The kind of a node, as distinguished by the engine.
///
/// Document and fragment nodes are parents but never appear as one side of a
/// matching pair; only `Element` pairs can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An element with a local name, attributes and children.
    Element,
    /// A text node.
    Text,
    /// A comment node.
    Comment,
    /// A CDATA section.
    Cdata,
    /// A document or document fragment node; only ever a parent, never matched.
    Parent,
}

impl NodeKind {
    /// Whether this kind can own children.
    pub fn is_parent_capable(self) -> bool {
        matches!(self, NodeKind::Element | NodeKind::Parent)
    }

    /// Whether this kind carries a plain textual value (text/comment/CDATA).
    pub fn is_textual(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::Comment | NodeKind::Cdata)
    }
}

/// The typed form-control properties the engine reads and writes directly,
/// bypassing the attribute map, so that live user state is never clobbered by
/// a declarative attribute write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The live `value` of an input or textarea.
    Value,
    /// The live `checked` state of a checkbox/radio input.
    Checked,
    /// The live `selected` state of an option.
    Selected,
    /// The live `indeterminate` state of a checkbox input.
    Indeterminate,
    /// The live `disabled` state.
    Disabled,
    /// The declared default `value` (what the control resets to).
    DefaultValue,
    /// The declared default `checked`.
    DefaultChecked,
    /// The declared default `selected`.
    DefaultSelected,
}

/// A typed property value: strings for `value`/`defaultValue`, booleans for
/// everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A string-valued property.
    Text(String),
    /// A boolean-valued property.
    Bool(bool),
}

impl PropertyValue {
    /// View this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Bool(_) => None,
        }
    }

    /// View this value as a bool, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            PropertyValue::Text(_) => None,
        }
    }
}

/// The capability set required from a host tree implementation.
///
/// `Node` is an opaque handle (a pointer, an arena index, a `web_sys::Node`
/// clone-handle, ...); the engine never interprets it beyond identity
/// (`==`) and the operations below.
pub trait Tree {
    /// Opaque node handle. Must support equality so the engine can detect
    /// `a === b` fast paths and track "already matched" pools by identity.
    type Node: Clone + PartialEq;

    /// The kind of `node`.
    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// The lowercased local name of an element. Panics/unspecified on a
    /// non-element; callers only invoke this after checking `kind`.
    fn local_name(&self, element: &Self::Node) -> String;

    /// The input `type` of a form-control element (`input`/`select`), empty
    /// string if absent or not applicable. Used to keep form controls of
    /// different input types from matching each other.
    fn input_type(&self, element: &Self::Node) -> String;

    /// Ordered, snapshot child list of `parent`.
    fn children(&self, parent: &Self::Node) -> Vec<Self::Node>;

    /// Ordered `(name, value)` attribute pairs of `element`.
    fn attributes(&self, element: &Self::Node) -> Vec<(String, String)>;

    /// The current value of a single named attribute, if present.
    fn get_attribute(&self, element: &Self::Node, name: &str) -> Option<String>;

    /// Set (add or update) a named attribute.
    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str);

    /// Remove a named attribute. No-op if absent.
    fn remove_attribute(&self, element: &Self::Node, name: &str);

    /// Whether a named attribute is present.
    fn has_attribute(&self, element: &Self::Node, name: &str) -> bool {
        self.get_attribute(element, name).is_some()
    }

    /// Read a typed property (live DOM state, not the attribute map).
    fn get_property(&self, node: &Self::Node, property: Property) -> Option<PropertyValue>;

    /// Write a typed property (live DOM state, not the attribute map).
    fn set_property(&self, node: &Self::Node, property: Property, value: PropertyValue);

    /// The textual value of a text/comment/CDATA node.
    fn text_value(&self, node: &Self::Node) -> String;

    /// Set the textual value of a text/comment/CDATA node.
    fn set_text_value(&self, node: &Self::Node, value: &str);

    /// Insert `node` into `parent`'s children, immediately before `anchor`
    /// (appended if `anchor` is `None`).
    fn insert_before(&self, parent: &Self::Node, node: Self::Node, anchor: Option<&Self::Node>);

    /// Reposition `node` (already a child of `parent`, or not) so that it
    /// sits immediately before `anchor`, preserving state if the host
    /// supports a state-preserving in-parent move. Falls back to
    /// `insert_before` semantics when no such primitive exists.
    fn move_before(&self, parent: &Self::Node, node: &Self::Node, anchor: Option<&Self::Node>) {
        self.insert_before(parent, node.clone(), anchor);
    }

    /// Whether the host provides a genuinely state-preserving `move_before`.
    /// Queried once per call; a `false` value doesn't change correctness,
    /// only whether state survives a same-parent reposition.
    fn supports_move_before(&self) -> bool {
        false
    }

    /// Detach `node` from its parent.
    fn remove(&self, node: &Self::Node);

    /// Structural equality: same kind, same local name/attributes (for
    /// elements, in any order), same children recursively (for elements),
    /// same text (for text/comment/CDATA). Ignores parent and identity.
    fn deep_equal(&self, a: &Self::Node, b: &Self::Node) -> bool;

    /// Deep-copy `node` (and its subtree) into a fresh, parentless node,
    /// used when inserting reference nodes that must not be moved out of
    /// the reference tree.
    fn clone_deep(&self, node: &Self::Node) -> Self::Node;

    /// The parent of `node`, if any.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Parse a markup string into a fragment node whose children are the
    /// parsed roots. Returns an
    /// error message on malformed input; the entry points wrap it in
    /// [`crate::error::MorphError::ParseError`].
    fn parse_fragment(&self, markup: &str) -> Result<Self::Node, String>;
}
