//! The [`morphlex_core::Tree`] implementation over [`DomNode`].

use morphlex_core::{NodeKind, Property, PropertyValue, Tree};

use crate::node::{DomNode, ElementProperties, NodeData};
use crate::parser::parse_fragment;

/// A stateless handle granting `morphlex_core::Tree` access to a [`DomNode`]
/// arena. All mutable state lives inside the `DomNode` handles themselves, so
/// there is nothing to construct; `OwnedDom` exists only to carry the trait
/// implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedDom;

fn node_kind(data: &NodeData) -> NodeKind {
    match data {
        NodeData::Document | NodeData::Fragment => NodeKind::Parent,
        NodeData::Element { .. } => NodeKind::Element,
        NodeData::Text(_) => NodeKind::Text,
        NodeData::Comment(_) => NodeKind::Comment,
        NodeData::Cdata(_) => NodeKind::Cdata,
    }
}

fn property_of(props: &ElementProperties, property: Property) -> Option<PropertyValue> {
    match property {
        Property::Value => props.value.clone().map(PropertyValue::Text),
        Property::Checked => props.checked.map(PropertyValue::Bool),
        Property::Selected => props.selected.map(PropertyValue::Bool),
        Property::Indeterminate => props.indeterminate.map(PropertyValue::Bool),
        Property::Disabled => props.disabled.map(PropertyValue::Bool),
        Property::DefaultValue => props.default_value.clone().map(PropertyValue::Text),
        Property::DefaultChecked => props.default_checked.map(PropertyValue::Bool),
        Property::DefaultSelected => props.default_selected.map(PropertyValue::Bool),
    }
}

fn set_property_of(props: &mut ElementProperties, property: Property, value: PropertyValue) {
    match (property, value) {
        (Property::Value, PropertyValue::Text(v)) => props.value = Some(v),
        (Property::Checked, PropertyValue::Bool(v)) => props.checked = Some(v),
        (Property::Selected, PropertyValue::Bool(v)) => props.selected = Some(v),
        (Property::Indeterminate, PropertyValue::Bool(v)) => props.indeterminate = Some(v),
        (Property::Disabled, PropertyValue::Bool(v)) => props.disabled = Some(v),
        (Property::DefaultValue, PropertyValue::Text(v)) => props.default_value = Some(v),
        (Property::DefaultChecked, PropertyValue::Bool(v)) => props.default_checked = Some(v),
        (Property::DefaultSelected, PropertyValue::Bool(v)) => props.default_selected = Some(v),
        (property, value) => {
            unreachable!("property/value kind mismatch: {property:?} vs {value:?}")
        }
    }
}

impl Tree for OwnedDom {
    type Node = DomNode;

    fn kind(&self, node: &Self::Node) -> NodeKind {
        node_kind(&node.data())
    }

    fn local_name(&self, element: &Self::Node) -> String {
        match &*element.data() {
            NodeData::Element { name, .. } => name.clone(),
            _ => String::new(),
        }
    }

    fn input_type(&self, element: &Self::Node) -> String {
        match &*element.data() {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == "type")
                .map(|(_, v)| v.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn children(&self, parent: &Self::Node) -> Vec<Self::Node> {
        parent.children_vec().clone()
    }

    fn attributes(&self, element: &Self::Node) -> Vec<(String, String)> {
        match &*element.data() {
            NodeData::Element { attrs, .. } => attrs.clone(),
            _ => Vec::new(),
        }
    }

    fn get_attribute(&self, element: &Self::Node, name: &str) -> Option<String> {
        match &*element.data() {
            NodeData::Element { attrs, .. } => {
                attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
            }
            _ => None,
        }
    }

    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut *element.data_mut() {
            match attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn remove_attribute(&self, element: &Self::Node, name: &str) {
        if let NodeData::Element { attrs, .. } = &mut *element.data_mut() {
            attrs.retain(|(k, _)| k != name);
        }
    }

    fn get_property(&self, node: &Self::Node, property: Property) -> Option<PropertyValue> {
        match &*node.data() {
            NodeData::Element { props, .. } => property_of(props, property),
            _ => None,
        }
    }

    fn set_property(&self, node: &Self::Node, property: Property, value: PropertyValue) {
        if let NodeData::Element { props, .. } = &mut *node.data_mut() {
            set_property_of(props, property, value);
        }
    }

    fn text_value(&self, node: &Self::Node) -> String {
        match &*node.data() {
            NodeData::Text(s) | NodeData::Comment(s) | NodeData::Cdata(s) => s.clone(),
            _ => String::new(),
        }
    }

    fn set_text_value(&self, node: &Self::Node, value: &str) {
        match &mut *node.data_mut() {
            NodeData::Text(s) | NodeData::Comment(s) | NodeData::Cdata(s) => {
                *s = value.to_string();
            }
            _ => {}
        }
    }

    fn insert_before(&self, parent: &Self::Node, node: Self::Node, anchor: Option<&Self::Node>) {
        parent.insert_child_before(node, anchor);
    }

    fn remove(&self, node: &Self::Node) {
        node.detach();
    }

    fn deep_equal(&self, a: &Self::Node, b: &Self::Node) -> bool {
        a.deep_equal(b)
    }

    fn clone_deep(&self, node: &Self::Node) -> Self::Node {
        node.clone_deep()
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        node.parent_handle()
    }

    fn parse_fragment(&self, markup: &str) -> Result<Self::Node, String> {
        parse_fragment(markup).map_err(|e| e.to_string())
    }
}
