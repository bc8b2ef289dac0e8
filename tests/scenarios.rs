use std::cell::RefCell;
use std::rc::Rc;

use lightdom::{
    ClosingType, Command, CommandQueue, DisplayType, ElementNode, MinifiedRender, Node,
    NodeRef, NormalRender, PrettyRender, RenderStrategy, Renderer, Staging, TextNode,
};

fn element(tag: &str) -> ElementNode {
    ElementNode::new(tag, DisplayType::Block, ClosingType::Pair)
}

fn list() -> ElementNode {
    let mut ul = element("ul");
    ul.add_css_class("list");

    let mut li1 = element("li");
    li1.add_child(TextNode::new("Item 1"));
    let mut li2 = element("li");
    li2.add_child(TextNode::new("Item 2"));

    ul.add_child(li1);
    ul.add_child(li2);
    ul
}

// <article><h1>Title</h1><section><p>one two</p><p>three</p><hr/></section>tail</article>
fn article() -> ElementNode {
    let mut h1 = element("h1");
    h1.add_child(TextNode::new("Title"));

    let mut first = element("p");
    first.add_child(TextNode::new("one two"));
    let mut second = element("p");
    second.add_child(TextNode::new("three"));

    let mut section = element("section");
    section.add_child(first);
    section.add_child(second);
    section.add_child(ElementNode::new("hr", DisplayType::Block, ClosingType::Single));

    let mut root = element("article");
    root.add_child(h1);
    root.add_child(section);
    root.add_child(TextNode::new("tail"));
    root
}

fn labels<'a>(nodes: impl Iterator<Item = NodeRef<'a>>) -> Vec<String> {
    nodes.map(|node| node.label()).collect()
}

#[test]
fn list_renders_as_expected() {
    let ul = Node::from(list());
    let renderer = Renderer::default();

    assert_eq!(
        renderer.outer_html(&ul),
        "<ul class=\"list\"><li>Item 1</li><li>Item 2</li></ul>"
    );
    assert_eq!(renderer.outer_html(&ul), renderer.outer_html(&ul));
}

#[test]
fn list_traversal_orders() {
    let ul = list();

    assert_eq!(
        labels(ul.depth_first()),
        vec!["Element(ul)", "Element(li)", "Text", "Element(li)", "Text"]
    );
    assert_eq!(
        labels(ul.breadth_first()),
        vec!["Element(ul)", "Element(li)", "Element(li)", "Text", "Text"]
    );
}

#[test]
fn command_batch_builds_the_same_list() {
    let mut queue = CommandQueue::new();
    queue.enqueue(Command::add_css_class("ul", "list"));
    queue.enqueue(Command::add_text("li1", "Item 1"));
    queue.enqueue(Command::add_text("li2", "Item 2"));
    queue.enqueue(Command::add_child("ul", "li1"));
    queue.enqueue(Command::add_child("ul", "li2"));

    let mut staging = Staging::new();
    staging.insert("ul", element("ul")).unwrap();
    staging.insert("li1", element("li")).unwrap();
    staging.insert("li2", element("li")).unwrap();

    assert_eq!(queue.run_all(&mut staging).unwrap(), 5);
    assert!(queue.is_empty());
    assert_eq!(staging.take("ul").unwrap(), list());
}

#[test]
fn click_listeners_fire_once_each_in_order() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut button = element("button");

    for name in ["first", "second"] {
        let calls = calls.clone();
        button.add_listener("click", move |_, payload| {
            calls.borrow_mut().push(format!("{}:{}", name, payload));
        });
    }

    button.trigger("click", "payload");
    assert_eq!(*calls.borrow(), vec!["first:payload", "second:payload"]);
}

#[test]
fn self_closing_never_renders_children() {
    let mut hr = ElementNode::new("hr", DisplayType::Block, ClosingType::Single);
    for i in 0..5 {
        hr.add_child(TextNode::new(format!("child {}", i)));
    }

    let pretty = PrettyRender::default();
    for strategy in [&NormalRender as &dyn RenderStrategy, &MinifiedRender, &pretty] {
        let html = strategy.render_element(&hr);
        assert_eq!(html.trim_end(), "<hr/>");
        assert!(!html.contains("</hr>"));
        assert!(!html.contains("child"));
    }
}

#[test]
fn traversals_cover_every_node() {
    let root = article();
    let total = 10;

    assert_eq!(root.depth_first().count(), total);
    assert_eq!(root.breadth_first().count(), total);
    assert_eq!(root.depth_first().next().unwrap().as_element(), Some(&root));
    assert_eq!(root.breadth_first().next().unwrap().as_element(), Some(&root));
}

#[test]
fn breadth_first_is_level_ordered() {
    let root = article();
    let depths: Vec<usize> = root.breadth_first().with_depth().map(|(depth, _)| depth).collect();

    assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(depths.iter().max(), Some(&3));
}

#[test]
fn minified_equals_collapsed_normal() {
    let root = article();
    let normal = NormalRender.render_element(&root);

    assert_eq!(
        MinifiedRender.render_element(&root),
        MinifiedRender::collapse_whitespace(&normal)
    );
}
