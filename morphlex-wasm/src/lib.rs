#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

//! Binding of `morphlex-core`'s [`morphlex_core::Tree`] trait to the real
//! browser DOM via `web-sys`, exposed to JavaScript through `wasm-bindgen`.
//!
//! Unlike `morphlex-dom`, there is no owned arena here: the "tree" is
//! whatever `web_sys::Node` graph the host page already has, and every
//! accessor is a thin, fallible-cast wrapper over the DOM API. Parsing goes
//! through a detached `<template>` element rather than an HTML5 tokenizer,
//! since the browser's own parser is both faster and authoritative.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTemplateElement, HtmlTextAreaElement, Node,
};

use morphlex_core::{MorphOptions, NodeKind, Property, PropertyValue, Reference, Tree};

/// Install a `tracing` subscriber that forwards events to the browser
/// console. Call once, near application startup.
#[wasm_bindgen]
pub fn init_tracing() {
    wasm_tracing::set_as_global_default();
}

/// A [`Tree`] implementation over `web_sys::Node`, scoped to a single
/// `Document` (used to create detached fragments during parsing and
/// insertion).
pub struct WebTree {
    document: Document,
}

impl WebTree {
    /// Bind to `document`. Typically `web_sys::window().unwrap().document().unwrap()`.
    pub fn new(document: Document) -> Self {
        WebTree { document }
    }

    fn as_element(node: &Node) -> Option<Element> {
        node.clone().dyn_into::<Element>().ok()
    }
}

const ELEMENT_NODE: u16 = 1;
const TEXT_NODE: u16 = 3;
const CDATA_SECTION_NODE: u16 = 4;
const COMMENT_NODE: u16 = 8;

impl Tree for WebTree {
    type Node = Node;

    fn kind(&self, node: &Self::Node) -> NodeKind {
        match node.node_type() {
            ELEMENT_NODE => NodeKind::Element,
            TEXT_NODE => NodeKind::Text,
            CDATA_SECTION_NODE => NodeKind::Cdata,
            COMMENT_NODE => NodeKind::Comment,
            _ => NodeKind::Parent,
        }
    }

    fn local_name(&self, element: &Self::Node) -> String {
        Self::as_element(element)
            .map(|el| el.local_name().to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn input_type(&self, element: &Self::Node) -> String {
        Self::as_element(element)
            .and_then(|el| el.get_attribute("type"))
            .unwrap_or_default()
    }

    fn children(&self, parent: &Self::Node) -> Vec<Self::Node> {
        let list = parent.child_nodes();
        let mut out = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(child) = list.get(i) {
                out.push(child);
            }
        }
        out
    }

    fn attributes(&self, element: &Self::Node) -> Vec<(String, String)> {
        let Some(el) = Self::as_element(element) else {
            return Vec::new();
        };
        let attrs = el.attributes();
        let mut out = Vec::with_capacity(attrs.length() as usize);
        for i in 0..attrs.length() {
            if let Some(attr) = attrs.item(i) {
                out.push((attr.name(), attr.value()));
            }
        }
        out
    }

    fn get_attribute(&self, element: &Self::Node, name: &str) -> Option<String> {
        Self::as_element(element)?.get_attribute(name)
    }

    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str) {
        if let Some(el) = Self::as_element(element) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn remove_attribute(&self, element: &Self::Node, name: &str) {
        if let Some(el) = Self::as_element(element) {
            let _ = el.remove_attribute(name);
        }
    }

    fn has_attribute(&self, element: &Self::Node, name: &str) -> bool {
        Self::as_element(element)
            .map(|el| el.has_attribute(name))
            .unwrap_or(false)
    }

    fn get_property(&self, node: &Self::Node, property: Property) -> Option<PropertyValue> {
        let el = Self::as_element(node)?;
        match property {
            Property::Value => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    Some(PropertyValue::Text(input.value()))
                } else if let Ok(textarea) = el.clone().dyn_into::<HtmlTextAreaElement>() {
                    Some(PropertyValue::Text(textarea.value()))
                } else {
                    None
                }
            }
            Property::Checked => el
                .clone()
                .dyn_into::<HtmlInputElement>()
                .ok()
                .map(|input| PropertyValue::Bool(input.checked())),
            Property::Selected => el
                .clone()
                .dyn_into::<HtmlOptionElement>()
                .ok()
                .map(|option| PropertyValue::Bool(option.selected())),
            Property::Indeterminate => el
                .clone()
                .dyn_into::<HtmlInputElement>()
                .ok()
                .map(|input| PropertyValue::Bool(input.indeterminate())),
            Property::Disabled => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    Some(PropertyValue::Bool(input.disabled()))
                } else if let Ok(select) = el.clone().dyn_into::<HtmlSelectElement>() {
                    Some(PropertyValue::Bool(select.disabled()))
                } else {
                    None
                }
            }
            Property::DefaultValue => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    Some(PropertyValue::Text(input.default_value()))
                } else if let Ok(textarea) = el.clone().dyn_into::<HtmlTextAreaElement>() {
                    Some(PropertyValue::Text(textarea.default_value()))
                } else {
                    None
                }
            }
            Property::DefaultChecked => el
                .clone()
                .dyn_into::<HtmlInputElement>()
                .ok()
                .map(|input| PropertyValue::Bool(input.default_checked())),
            Property::DefaultSelected => el
                .clone()
                .dyn_into::<HtmlOptionElement>()
                .ok()
                .map(|option| PropertyValue::Bool(option.default_selected())),
        }
    }

    fn set_property(&self, node: &Self::Node, property: Property, value: PropertyValue) {
        let Some(el) = Self::as_element(node) else {
            return;
        };
        match (property, value) {
            (Property::Value, PropertyValue::Text(v)) => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    input.set_value(&v);
                } else if let Ok(textarea) = el.clone().dyn_into::<HtmlTextAreaElement>() {
                    textarea.set_value(&v);
                }
            }
            (Property::Checked, PropertyValue::Bool(v)) => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    input.set_checked(v);
                }
            }
            (Property::Selected, PropertyValue::Bool(v)) => {
                if let Ok(option) = el.clone().dyn_into::<HtmlOptionElement>() {
                    option.set_selected(v);
                }
            }
            (Property::Indeterminate, PropertyValue::Bool(v)) => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    input.set_indeterminate(v);
                }
            }
            (Property::Disabled, PropertyValue::Bool(v)) => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    input.set_disabled(v);
                } else if let Ok(select) = el.clone().dyn_into::<HtmlSelectElement>() {
                    select.set_disabled(v);
                }
            }
            (Property::DefaultValue, PropertyValue::Text(v)) => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    input.set_default_value(&v);
                } else if let Ok(textarea) = el.clone().dyn_into::<HtmlTextAreaElement>() {
                    textarea.set_default_value(&v);
                }
            }
            (Property::DefaultChecked, PropertyValue::Bool(v)) => {
                if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
                    input.set_default_checked(v);
                }
            }
            (Property::DefaultSelected, PropertyValue::Bool(v)) => {
                if let Ok(option) = el.clone().dyn_into::<HtmlOptionElement>() {
                    option.set_default_selected(v);
                }
            }
            _ => {}
        }
    }

    fn text_value(&self, node: &Self::Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_value(&self, node: &Self::Node, value: &str) {
        node.set_text_content(Some(value));
    }

    fn insert_before(&self, parent: &Self::Node, node: Self::Node, anchor: Option<&Self::Node>) {
        let _ = parent.insert_before(&node, anchor);
    }

    fn move_before(&self, parent: &Self::Node, node: &Self::Node, anchor: Option<&Self::Node>) {
        // `Element.moveBefore` (state-preserving same-tree move) is a
        // recent DOM addition not yet covered by stable web-sys bindings;
        // reach it through `Reflect` and fall back to `insertBefore` when
        // it's unavailable (older engines).
        let has_move_before = js_sys::Reflect::has(parent, &JsValue::from_str("moveBefore"))
            .unwrap_or(false);

        if has_move_before {
            let anchor_value: JsValue = anchor.cloned().map(JsValue::from).unwrap_or(JsValue::NULL);
            let node_value: JsValue = node.clone().into();
            if let Ok(move_before) = js_sys::Reflect::get(parent, &JsValue::from_str("moveBefore"))
            {
                if let Ok(func) = move_before.dyn_into::<js_sys::Function>() {
                    if func.call2(parent, &node_value, &anchor_value).is_ok() {
                        return;
                    }
                }
            }
        }

        let _ = parent.insert_before(node, anchor);
    }

    fn supports_move_before(&self) -> bool {
        // Queried once per call by `morphlex-core`; the honest per-call
        // availability check lives in `move_before` above, so this is a
        // conservative `false` (the fallback is always correct, just not
        // always state-preserving).
        false
    }

    fn remove(&self, node: &Self::Node) {
        if let Some(parent) = node.parent_node() {
            let _ = parent.remove_child(node);
        }
    }

    fn deep_equal(&self, a: &Self::Node, b: &Self::Node) -> bool {
        if self.kind(a) != self.kind(b) {
            return false;
        }
        match self.kind(a) {
            NodeKind::Text | NodeKind::Comment | NodeKind::Cdata => {
                self.text_value(a) == self.text_value(b)
            }
            NodeKind::Element => {
                if self.local_name(a) != self.local_name(b) {
                    return false;
                }
                let mut attrs_a = self.attributes(a);
                let mut attrs_b = self.attributes(b);
                attrs_a.sort();
                attrs_b.sort();
                if attrs_a != attrs_b {
                    return false;
                }
                let children_a = self.children(a);
                let children_b = self.children(b);
                children_a.len() == children_b.len()
                    && children_a
                        .iter()
                        .zip(children_b.iter())
                        .all(|(x, y)| self.deep_equal(x, y))
            }
            NodeKind::Parent => {
                let children_a = self.children(a);
                let children_b = self.children(b);
                children_a.len() == children_b.len()
                    && children_a
                        .iter()
                        .zip(children_b.iter())
                        .all(|(x, y)| self.deep_equal(x, y))
            }
        }
    }

    fn clone_deep(&self, node: &Self::Node) -> Self::Node {
        node.clone_node_with_deep(true)
            .expect("cloneNode(true) is infallible per the DOM spec")
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        node.parent_node()
    }

    fn parse_fragment(&self, markup: &str) -> Result<Self::Node, String> {
        let template = self
            .document
            .create_element("template")
            .map_err(|e| format!("{e:?}"))?
            .dyn_into::<HtmlTemplateElement>()
            .map_err(|_| "created element was not a template".to_string())?;
        template.set_inner_html(markup);
        Ok(template.content().into())
    }
}

/// Morph `current` so it matches the element produced by parsing `markup`,
/// using `document` to create any detached nodes required along the way.
#[wasm_bindgen]
pub fn morph_html(document: Document, current: Node, markup: &str) -> Result<(), JsValue> {
    let tree = WebTree::new(document);
    let mut options = MorphOptions::new();
    morphlex_core::morph(&tree, &current, Reference::Markup(markup), &mut options)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Morph only `current`'s children to match the children of the element
/// produced by parsing `markup`, leaving `current`'s own attributes alone.
#[wasm_bindgen]
pub fn morph_inner_html(document: Document, current: Node, markup: &str) -> Result<(), JsValue> {
    let tree = WebTree::new(document);
    let mut options = MorphOptions::new();
    morphlex_core::morph_inner(&tree, &current, Reference::Markup(markup), &mut options)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
