//! HTML5 fragment parsing into [`DomNode`] trees.
//!
//! A stack-based tree builder over [`html5gum`]'s tokenizer, in the manner
//! of a browser's "insert an HTML element" algorithm reduced to the parts
//! that matter for fragment parsing: open-tag/close-tag matching, void
//! elements, and raw-text tokenizer-state switches for `script`/`style`/
//! `textarea`/`title`. Unlike a minimal document parser, comments and CDATA
//! sections are preserved as nodes rather than discarded, since the morph
//! engine treats them as first-class matchable kinds.

use html5gum::{State, Token, Tokenizer};

use crate::error::DomParseError;
use crate::node::DomNode;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Parse `markup` into a fragment node whose children are the parsed roots.
pub fn parse_fragment(markup: &str) -> Result<DomNode, DomParseError> {
    let fragment = DomNode::fragment();
    let mut stack: Vec<DomNode> = vec![fragment.clone()];

    let mut tokenizer = Tokenizer::new(markup);

    while let Some(token_result) = tokenizer.next() {
        let token =
            token_result.map_err(|err| DomParseError::Tokenizer(format!("{err:?}")))?;

        match token {
            Token::StartTag(tag) => {
                let name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
                let element = DomNode::element(name.clone());
                for (k, v) in tag.attributes.iter() {
                    let key = String::from_utf8_lossy(k).to_ascii_lowercase();
                    let value = String::from_utf8_lossy(v).into_owned();
                    set_attribute(&element, &key, &value);
                }

                let parent = stack.last().expect("fragment root never popped");
                parent.append_child(element.clone());

                if !(tag.self_closing || is_void_element(&name)) {
                    match name.as_str() {
                        "script" | "style" => tokenizer.set_state(State::ScriptData),
                        "textarea" | "title" => tokenizer.set_state(State::RcData),
                        _ => {}
                    }
                    stack.push(element);
                }
            }
            Token::EndTag(tag) => {
                let end_name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
                let matching_index = stack
                    .iter()
                    .enumerate()
                    .skip(1)
                    .rev()
                    .find(|(_, node)| is_element_named(node, &end_name))
                    .map(|(index, _)| index);

                if let Some(index) = matching_index {
                    stack.truncate(index);
                }
                // A stray end tag with no matching open element is ignored.
            }
            Token::String(text) => {
                let text_str = String::from_utf8_lossy(&text);
                let parent = stack.last().expect("fragment root never popped");
                append_text(parent, &text_str);
            }
            Token::Comment(comment) => {
                let text = String::from_utf8_lossy(&comment).into_owned();
                let parent = stack.last().expect("fragment root never popped");
                parent.append_child(DomNode::comment(text));
            }
            Token::Doctype(_) => {
                // Doctypes carry no morphable state; fragments never need one.
            }
            Token::Error(_) => {
                // html5gum already recovered per the WHATWG tokenizer state
                // machine; parse errors here are not fatal to fragment use.
            }
        }
    }

    Ok(fragment)
}

fn is_element_named(node: &DomNode, name: &str) -> bool {
    matches!(&*node.data(), crate::node::NodeData::Element { name: n, .. } if n == name)
}

fn append_text(parent: &DomNode, text: &str) {
    if text.is_empty() {
        return;
    }
    let children = parent.children_vec();
    let last_is_text = matches!(
        children.last().map(|c| c.data()),
        Some(d) if matches!(&*d, crate::node::NodeData::Text(_))
    );
    drop(children);

    if last_is_text {
        let mut children = parent.children_vec_mut();
        let last = children.last_mut().expect("checked above");
        if let crate::node::NodeData::Text(existing) = &mut *last.data_mut() {
            existing.push_str(text);
        }
    } else {
        parent.append_child(DomNode::text(text));
    }
}

fn set_attribute(element: &DomNode, name: &str, value: &str) {
    if let crate::node::NodeData::Element { attrs, props, .. } = &mut *element.data_mut() {
        attrs.push((name.to_string(), value.to_string()));
        match name {
            "value" => {
                props.value = Some(value.to_string());
                props.default_value = Some(value.to_string());
            }
            "checked" => {
                props.checked = Some(true);
                props.default_checked = Some(true);
            }
            "selected" => {
                props.selected = Some(true);
                props.default_selected = Some(true);
            }
            "disabled" => props.disabled = Some(true),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeData;

    #[test]
    fn parses_simple_element() {
        let fragment = parse_fragment("<div>hello</div>").unwrap();
        let children = fragment.children_vec();
        assert_eq!(children.len(), 1);
        match &*children[0].data() {
            NodeData::Element { name, .. } => assert_eq!(name, "div"),
            other => panic!("expected element, got {other:?}"),
        }
        let grandchildren = children[0].children_vec();
        assert_eq!(grandchildren.len(), 1);
        match &*grandchildren[0].data() {
            NodeData::Text(text) => assert_eq!(text, "hello"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn preserves_comments() {
        let fragment = parse_fragment("<p>a<!-- hi -->b</p>").unwrap();
        let children = fragment.children_vec();
        let p_children = children[0].children_vec();
        assert_eq!(p_children.len(), 3);
        assert!(matches!(&*p_children[1].data(), NodeData::Comment(c) if c == " hi "));
    }

    #[test]
    fn closes_void_elements_without_a_stack_push() {
        let fragment = parse_fragment("<input><span>x</span>").unwrap();
        let children = fragment.children_vec();
        assert_eq!(children.len(), 2);
        assert!(is_element_named(&children[0], "input"));
        assert!(is_element_named(&children[1], "span"));
    }

    #[test]
    fn sets_checked_attribute_as_default_and_live_property() {
        let fragment = parse_fragment(r#"<input type="checkbox" checked>"#).unwrap();
        let children = fragment.children_vec();
        match &*children[0].data() {
            NodeData::Element { props, .. } => {
                assert_eq!(props.checked, Some(true));
                assert_eq!(props.default_checked, Some(true));
            }
            other => panic!("expected element, got {other:?}"),
        }
    }
}
