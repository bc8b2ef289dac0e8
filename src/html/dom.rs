use std::fmt;
use std::rc::Rc;

use super::error::{DomError, Result};
use super::events::{Listener, ListenerRegistry};
use super::render::{NormalRender, RenderStrategy};
use super::traversal::{BreadthFirst, DepthFirst, NodeRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayType {
    Block,
    Inline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClosingType {
    Pair,
    Single,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Node {
        Node::Text(TextNode::new(content))
    }

    pub fn element(tag_name: impl Into<String>, closing: ClosingType) -> Node {
        Node::Element(ElementNode::new(tag_name, DisplayType::Block, closing))
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn outer_html(&self) -> String {
        NormalRender.outer_html(self)
    }

    pub fn inner_html(&self) -> String {
        match self {
            Node::Element(element) => element.inner_html(),
            Node::Text(text) => text.inner_html(),
        }
    }

    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(NodeRef::from(self))
    }

    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst::new(NodeRef::from(self))
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Node::Text(text)
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

/// Called with the text payload every time a [`TextNode`] is rendered as outer HTML.
pub type RenderHook = Rc<dyn Fn(&str)>;

#[derive(Clone)]
pub struct TextNode {
    content: String,
    hook: Option<RenderHook>,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> TextNode {
        TextNode {
            content: content.into(),
            hook: None,
        }
    }

    pub fn with_hook(content: impl Into<String>, hook: impl Fn(&str) + 'static) -> TextNode {
        TextNode {
            content: content.into(),
            hook: Some(Rc::new(hook)),
        }
    }

    /// A text leaf that reports each outer render as a `tracing` event.
    pub fn traced(content: impl Into<String>) -> TextNode {
        TextNode::with_hook(content, |text| {
            tracing::trace!(text, "rendering text node");
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }

    pub fn outer_html(&self) -> String {
        if let Some(hook) = &self.hook {
            hook(&self.content);
        }

        self.content.clone()
    }

    pub fn inner_html(&self) -> String {
        self.content.clone()
    }
}

impl PartialEq for TextNode {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl fmt::Debug for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNode")
            .field("content", &self.content)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// The constant part of an element: what it is, not what it holds.
///
/// Descriptors never change after construction, so any number of element
/// instances can point at the same one (see `DescriptorPool`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementDescriptor {
    tag_name: String,
    display: DisplayType,
    closing: ClosingType,
}

impl ElementDescriptor {
    pub fn new(tag_name: impl Into<String>, display: DisplayType, closing: ClosingType) -> Self {
        ElementDescriptor {
            tag_name: tag_name.into(),
            display,
            closing,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn display(&self) -> DisplayType {
        self.display
    }

    pub fn closing(&self) -> ClosingType {
        self.closing
    }
}

pub type ElementChildren = Vec<Node>;
pub type CssClasses = Vec<String>;

#[derive(Clone)]
pub struct ElementNode {
    descriptor: Rc<ElementDescriptor>,
    css_classes: CssClasses,
    children: ElementChildren,
    listeners: ListenerRegistry,
}

impl ElementNode {
    pub fn new(tag_name: impl Into<String>, display: DisplayType, closing: ClosingType) -> Self {
        ElementNode::from_descriptor(Rc::new(ElementDescriptor::new(tag_name, display, closing)))
    }

    pub fn from_descriptor(descriptor: Rc<ElementDescriptor>) -> Self {
        ElementNode {
            descriptor,
            css_classes: CssClasses::new(),
            children: ElementChildren::new(),
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn descriptor(&self) -> &Rc<ElementDescriptor> {
        &self.descriptor
    }

    pub fn tag_name(&self) -> &str {
        self.descriptor.tag_name()
    }

    pub fn display(&self) -> DisplayType {
        self.descriptor.display()
    }

    pub fn closing(&self) -> ClosingType {
        self.descriptor.closing()
    }

    pub fn is_self_closing(&self) -> bool {
        self.closing() == ClosingType::Single
    }

    pub fn css_classes(&self) -> &[String] {
        &self.css_classes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Raw access for callers that have already checked the closing mode.
    pub(crate) fn children_mut(&mut self) -> &mut ElementChildren {
        &mut self.children
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    /// Appends a child. Self-closing elements accept children too, but never
    /// render them; use [`ElementNode::try_add_child`] to reject that case.
    pub fn add_child(&mut self, node: impl Into<Node>) {
        if self.is_self_closing() {
            tracing::warn!(
                tag = self.tag_name(),
                "child appended to self-closing element will not be rendered"
            );
        }

        self.children.push(node.into());
    }

    pub fn try_add_child(&mut self, node: impl Into<Node>) -> Result<()> {
        if self.is_self_closing() {
            return Err(DomError::SelfClosingChild {
                tag: self.tag_name().to_owned(),
            });
        }

        self.children.push(node.into());

        Ok(())
    }

    pub fn add_css_class(&mut self, name: impl Into<String>) {
        self.css_classes.push(name.into());
    }

    /// The ` class="..."` fragment of the opening tag, or an empty string.
    pub fn class_attribute(&self) -> String {
        if self.css_classes.is_empty() {
            return String::new();
        }

        format!(" class=\"{}\"", self.css_classes.join(" "))
    }

    pub fn outer_html(&self) -> String {
        NormalRender.render_element(self)
    }

    pub fn inner_html(&self) -> String {
        NormalRender.inner_html(self)
    }

    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(NodeRef::Element(self))
    }

    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst::new(NodeRef::Element(self))
    }

    pub fn add_listener(&mut self, event: impl Into<String>, listener: impl Fn(&ElementNode, &str) + 'static) {
        self.listeners.add(event, Rc::new(listener) as Listener);
    }

    /// Runs every listener registered for `event`, in registration order.
    /// Returns how many were invoked.
    pub fn trigger(&self, event: &str, payload: &str) -> usize {
        self.listeners.dispatch(self, event, payload)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}

impl PartialEq for ElementNode {
    fn eq(&self, other: &Self) -> bool {
        *self.descriptor == *other.descriptor
            && self.css_classes == other.css_classes
            && self.children == other.children
    }
}

impl fmt::Debug for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementNode")
            .field("tag_name", &self.tag_name())
            .field("display", &self.display())
            .field("closing", &self.closing())
            .field("css_classes", &self.css_classes)
            .field("children", &self.children)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn list_item(text: &str) -> ElementNode {
        let mut li = ElementNode::new("li", DisplayType::Block, ClosingType::Pair);
        li.add_child(TextNode::new(text));
        li
    }

    #[test]
    fn test_class_attribute_omitted_when_empty() {
        let mut div = ElementNode::new("div", DisplayType::Block, ClosingType::Pair);
        assert_eq!(div.class_attribute(), "");

        div.add_css_class("a");
        div.add_css_class("b");
        div.add_css_class("a");
        assert_eq!(div.class_attribute(), " class=\"a b a\"");
    }

    #[test]
    fn test_outer_and_inner_html() {
        let mut ul = ElementNode::new("ul", DisplayType::Block, ClosingType::Pair);
        ul.add_css_class("list");
        ul.add_child(list_item("Item 1"));
        ul.add_child(list_item("Item 2"));

        assert_eq!(
            ul.outer_html(),
            "<ul class=\"list\"><li>Item 1</li><li>Item 2</li></ul>"
        );
        assert_eq!(ul.inner_html(), "<li>Item 1</li><li>Item 2</li>");
    }

    #[test]
    fn test_self_closing_hides_children() {
        let mut img = ElementNode::new("img", DisplayType::Inline, ClosingType::Single);
        img.add_css_class("avatar");
        img.add_child(TextNode::new("ignored"));
        img.add_child(list_item("also ignored"));

        assert_eq!(img.children().len(), 2);
        assert_eq!(img.outer_html(), "<img class=\"avatar\"/>");
    }

    #[test]
    fn test_try_add_child_rejects_self_closing() {
        let mut br = ElementNode::new("br", DisplayType::Inline, ClosingType::Single);
        let result = br.try_add_child(TextNode::new("x"));

        assert!(matches!(result, Err(DomError::SelfClosingChild { ref tag }) if tag == "br"));
        assert!(br.children().is_empty());
    }

    #[test]
    fn test_text_hook_runs_once_per_outer_render() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let text = TextNode::with_hook("hello", move |_| counter.set(counter.get() + 1));
        assert!(text.has_hook());
        assert!(!TextNode::new("plain").has_hook());

        let mut p = ElementNode::new("p", DisplayType::Block, ClosingType::Pair);
        p.add_child(text);

        p.outer_html();
        assert_eq!(calls.get(), 1);
        p.outer_html();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_equality_ignores_listeners_and_hooks() {
        let mut a = list_item("x");
        let b = list_item("x");
        a.add_listener("click", |_, _| {});

        assert_eq!(a, b);
        assert_eq!(Node::from(TextNode::traced("t")), Node::text("t"));
        assert_ne!(a, list_item("y"));
    }
}
