//! End-to-end scenarios over the owned DOM, exercising the morph engine
//! through the public facade.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Once;

use morphlex::{morph, morph_html, morph_inner_html, parse_fragment, MorphOptions};
use morphlex_dom::{DomNode, OwnedDom, Property, PropertyValue, Tree};

static INIT_TRACING: Once = Once::new();

/// Install a tracing subscriber once, so a run with `--features tracing`
/// surfaces the engine's spans/events under `--nocapture`. A no-op observer
/// when the feature is off, since the macros it would catch compile away.
fn init_tracing() {
    INIT_TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .with_target(false)
            .init();
    });
}

fn li_with_id(id: &str) -> DomNode {
    let li = DomNode::element("li");
    OwnedDom.set_attribute(&li, "id", id);
    li
}

fn ul_of(children: &[DomNode]) -> DomNode {
    let ul = DomNode::element("ul");
    for child in children {
        ul.append_child(child.clone());
    }
    ul
}

#[test]
fn reverses_a_five_item_list_preserving_identity() {
    init_tracing();
    let items: Vec<DomNode> = (1..=5).map(|i| li_with_id(&i.to_string())).collect();
    let current = ul_of(&items);

    morph_html(
        &current,
        r#"<ul><li id="5"/><li id="4"/><li id="3"/><li id="2"/><li id="1"/></ul>"#,
        &mut MorphOptions::new(),
    )
    .unwrap();

    let result = current.children();
    assert_eq!(result.len(), 5);
    for (position, expected_id) in ["5", "4", "3", "2", "1"].iter().enumerate() {
        assert_eq!(result[position], items[expected_id.parse::<usize>().unwrap() - 1]);
    }
}

#[test]
fn removes_one_item_from_the_middle() {
    let a = DomNode::element("li");
    a.append_child(DomNode::text("A"));
    let b = DomNode::element("li");
    b.append_child(DomNode::text("B"));
    let c = DomNode::element("li");
    c.append_child(DomNode::text("C"));
    let current = ul_of(&[a.clone(), b.clone(), c.clone()]);

    let removed: Rc<RefCell<Vec<DomNode>>> = Rc::new(RefCell::new(Vec::new()));
    let removed_sink = removed.clone();

    let mut options =
        MorphOptions::new().with_after_node_removed(move |node| removed_sink.borrow_mut().push(node.clone()));

    morph_html(&current, "<ul><li>A</li><li>C</li></ul>", &mut options).unwrap();

    let result = current.children();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0], a);
    assert_eq!(result[1], c);

    let removed = removed.borrow();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0], b);
}

#[test]
fn partial_reorder_moves_only_the_displaced_node() {
    let items: Vec<DomNode> = (1..=5).map(|i| li_with_id(&i.to_string())).collect();
    let current = ul_of(&items);

    morph_html(
        &current,
        r#"<ul><li id="1"/><li id="2"/><li id="4"/><li id="5"/><li id="3"/></ul>"#,
        &mut MorphOptions::new(),
    )
    .unwrap();

    let result = current.children();
    let expected_order = ["1", "2", "4", "5", "3"];
    for (position, expected_id) in expected_order.iter().enumerate() {
        assert_eq!(result[position], items[expected_id.parse::<usize>().unwrap() - 1]);
    }
}

#[test]
fn text_input_value_preservation_with_preserve_changes() {
    let current = DomNode::element("input");
    OwnedDom.set_attribute(&current, "type", "text");
    OwnedDom.set_attribute(&current, "name", "q");
    OwnedDom.set_attribute(&current, "value", "a");
    OwnedDom.set_property(&current, Property::Value, PropertyValue::Text("a".into()));
    OwnedDom.set_property(&current, Property::DefaultValue, PropertyValue::Text("a".into()));

    // Simulate the user editing the live value without touching the attribute.
    OwnedDom.set_property(&current, Property::Value, PropertyValue::Text("c".into()));

    let reference = DomNode::element("input");
    OwnedDom.set_attribute(&reference, "type", "text");
    OwnedDom.set_attribute(&reference, "name", "q");
    OwnedDom.set_attribute(&reference, "value", "b");

    morph(
        &current,
        &reference,
        &mut MorphOptions::new().with_preserve_changes(true),
    )
    .unwrap();

    assert_eq!(OwnedDom.get_attribute(&current, "value"), Some("b".to_string()));
    assert_eq!(
        OwnedDom.get_property(&current, Property::Value),
        Some(PropertyValue::Text("c".to_string()))
    );
}

#[test]
fn text_input_value_overwritten_without_preserve_changes() {
    let current = DomNode::element("input");
    OwnedDom.set_attribute(&current, "type", "text");
    OwnedDom.set_attribute(&current, "name", "q");
    OwnedDom.set_attribute(&current, "value", "a");
    OwnedDom.set_property(&current, Property::Value, PropertyValue::Text("a".into()));
    OwnedDom.set_property(&current, Property::DefaultValue, PropertyValue::Text("a".into()));
    OwnedDom.set_property(&current, Property::Value, PropertyValue::Text("c".into()));

    let reference = DomNode::element("input");
    OwnedDom.set_attribute(&reference, "type", "text");
    OwnedDom.set_attribute(&reference, "name", "q");
    OwnedDom.set_attribute(&reference, "value", "b");

    morph(&current, &reference, &mut MorphOptions::new()).unwrap();

    assert_eq!(
        OwnedDom.get_property(&current, Property::Value),
        Some(PropertyValue::Text("b".to_string()))
    );
}

#[test]
fn input_type_mismatch_forces_a_replace() {
    let parent = DomNode::element("div");
    let current = DomNode::element("input");
    OwnedDom.set_attribute(&current, "type", "text");
    parent.append_child(current.clone());

    let reference = DomNode::element("input");
    OwnedDom.set_attribute(&reference, "type", "checkbox");

    let added_count = Rc::new(Cell::new(0));
    let removed_count = Rc::new(Cell::new(0));
    let added_sink = added_count.clone();
    let removed_sink = removed_count.clone();

    let mut options = MorphOptions::new()
        .with_after_node_added(move |_| added_sink.set(added_sink.get() + 1))
        .with_after_node_removed(move |_| removed_sink.set(removed_sink.get() + 1));

    morph(&current, &reference, &mut options).unwrap();

    assert_eq!(added_count.get(), 1);
    assert_eq!(removed_count.get(), 1);

    let result = parent.children();
    assert_eq!(result.len(), 1);
    assert_ne!(result[0], current);
    assert_eq!(OwnedDom.get_attribute(&result[0], "type"), Some("checkbox".to_string()));
}

#[test]
fn string_reference_empties_the_current_node() {
    let parent = DomNode::element("div");
    let span = DomNode::element("span");
    parent.append_child(span.clone());

    morph_html(&span, "", &mut MorphOptions::new()).unwrap();

    assert_eq!(parent.children().len(), 0);
}

#[test]
fn idempotent_on_a_deep_clone_of_itself() {
    let current = parse_fragment("<div class=\"a\"><p>one</p><p>two</p></div>")
        .unwrap()
        .children()[0]
        .clone();
    let reference = current.clone_deep();

    let attribute_updates = Rc::new(Cell::new(0));
    let additions = Rc::new(Cell::new(0));
    let removals = Rc::new(Cell::new(0));
    let attr_sink = attribute_updates.clone();
    let add_sink = additions.clone();
    let rem_sink = removals.clone();

    let mut options = MorphOptions::new()
        .with_after_attribute_updated(move |_, _, _| attr_sink.set(attr_sink.get() + 1))
        .with_after_node_added(move |_| add_sink.set(add_sink.get() + 1))
        .with_after_node_removed(move |_| rem_sink.set(rem_sink.get() + 1));

    morph(&current, &reference, &mut options).unwrap();

    assert_eq!(attribute_updates.get(), 0);
    assert_eq!(additions.get(), 0);
    assert_eq!(removals.get(), 0);
    assert_eq!(current.to_html(), r#"<div class="a"><p>one</p><p>two</p></div>"#);
}

#[test]
fn veto_on_node_removed_keeps_the_node_in_place() {
    let current = ul_of(&[
        {
            let li = DomNode::element("li");
            li.append_child(DomNode::text("A"));
            li
        },
        {
            let li = DomNode::element("li");
            li.append_child(DomNode::text("B"));
            li
        },
    ]);

    let mut options = MorphOptions::new().with_before_node_removed(|_| false);
    morph_html(&current, "<ul><li>A</li></ul>", &mut options).unwrap();

    // The veto refused removal of the unmatched `B`; it survives, even
    // though it is no longer in reference position.
    assert_eq!(current.children().len(), 2);
}

#[test]
fn morph_inner_leaves_outer_attributes_untouched() {
    let current = DomNode::element("div");
    OwnedDom.set_attribute(&current, "class", "keep");
    current.append_child(DomNode::text("old"));

    morph_inner_html(&current, "<div class=\"discarded\">new</div>", &mut MorphOptions::new()).unwrap();

    assert_eq!(current.to_html(), r#"<div class="keep">new</div>"#);
}
