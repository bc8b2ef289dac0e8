use lightdom::{
    book_page, ClosingType, Command, CommandQueue, DescriptorPool, DisplayType, DomError,
    ElementNode, MinifiedRender, Node, NodeRef, PrettyRender, RenderOptions, Renderer, Staging,
    TextNode,
};
use tracing_subscriber::EnvFilter;

const BOOK: [&str; 6] = [
    "The Great Adventure",
    "",
    "Chapter 1",
    "  It was a dark and stormy night.",
    "The wind howled through the trees.",
    "Suddenly, a shot rang out!",
];

fn list_item(text: &str) -> ElementNode {
    let mut li = ElementNode::new("li", DisplayType::Block, ClosingType::Pair);
    li.add_child(TextNode::traced(text));
    li
}

fn build_list() -> ElementNode {
    let mut ul = ElementNode::new("ul", DisplayType::Block, ClosingType::Pair);
    ul.add_css_class("list");
    ul.add_child(list_item("Item 1"));
    ul.add_child(list_item("Item 2"));
    ul
}

fn build_list_with_commands() -> Result<ElementNode, DomError> {
    let mut queue = CommandQueue::new();
    queue.enqueue(Command::add_css_class("ul", "list"));
    queue.enqueue(Command::add_text("li1", "Item 1"));
    queue.enqueue(Command::add_text("li2", "Item 2"));
    queue.enqueue(Command::add_child("ul", "li1"));
    queue.enqueue(Command::add_child("ul", "li2"));

    let mut staging = Staging::new();
    staging.insert("ul", ElementNode::new("ul", DisplayType::Block, ClosingType::Pair))?;
    staging.insert("li1", ElementNode::new("li", DisplayType::Block, ClosingType::Pair))?;
    staging.insert("li2", ElementNode::new("li", DisplayType::Block, ClosingType::Pair))?;

    let applied = queue.run_all(&mut staging)?;
    tracing::info!(applied, "command batch applied");

    staging.take("ul")
}

fn describe<'a>(nodes: impl Iterator<Item = NodeRef<'a>>) -> String {
    nodes.map(|node| node.label()).collect::<Vec<_>>().join(", ")
}

fn load_options() -> Result<RenderOptions, DomError> {
    match std::env::args().nth(1) {
        Some(path) => RenderOptions::from_toml_str(&std::fs::read_to_string(path)?),
        None => Ok(RenderOptions::default()),
    }
}

fn main() -> Result<(), DomError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = load_options()?;
    let mut renderer = Renderer::from_options(&options);
    let ul = Node::from(build_list());

    println!("=== OuterHTML ({:?}) ===", renderer.kind());
    println!("{}", renderer.outer_html(&ul));

    renderer.set_strategy(MinifiedRender);
    println!("\n=== Minified ===");
    println!("{}", renderer.outer_html(&ul));

    renderer.set_strategy(PrettyRender::new(options.indent_width));
    println!("\n=== Pretty ===");
    print!("{}", renderer.outer_html(&ul));

    println!("\n=== InnerHTML ===");
    println!("{}", ul.inner_html());

    println!("\n=== Depth-first ===");
    println!("{}", describe(ul.depth_first()));

    println!("\n=== Breadth-first ===");
    println!("{}", describe(ul.breadth_first()));

    let queued = build_list_with_commands()?;
    println!("\n=== Built from command queue ===");
    println!("{}", queued.outer_html());
    println!("matches direct construction: {}", Node::from(queued) == ul);

    let mut button = ElementNode::new("button", DisplayType::Inline, ClosingType::Pair);
    button.add_child(TextNode::new("Click me"));
    button.add_listener("click", |node, payload| {
        println!("first listener on <{}>: {}", node.tag_name(), payload);
    });
    button.add_listener("click", |node, _| {
        println!("second listener sees {}", node.outer_html());
    });
    println!("\n=== Events ===");
    button.trigger("click", "x=10,y=20");
    button.trigger("hover", "ignored");

    let mut pool = DescriptorPool::new();
    println!("\n=== Book page (flyweight) ===");
    for element in book_page(&BOOK, Some(&mut pool)) {
        println!("{}", element.outer_html());
    }
    println!("shared descriptors: {}", pool.len());

    Ok(())
}
