use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::dom::{ElementNode, Node, TextNode};

/// Borrowed view of a tree node, yielded by the traversal iterators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeRef<'a> {
    Element(&'a ElementNode),
    Text(&'a TextNode),
}

impl<'a> NodeRef<'a> {
    pub fn is_element(&self) -> bool {
        matches!(self, NodeRef::Element(_))
    }

    pub fn as_element(&self) -> Option<&'a ElementNode> {
        match *self {
            NodeRef::Element(element) => Some(element),
            NodeRef::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a TextNode> {
        match *self {
            NodeRef::Text(text) => Some(text),
            NodeRef::Element(_) => None,
        }
    }

    pub fn children(&self) -> &'a [Node] {
        match *self {
            NodeRef::Element(element) => element.children(),
            NodeRef::Text(_) => &[],
        }
    }

    /// Short label such as `Element(ul)` or `Text`.
    pub fn label(&self) -> String {
        match self {
            NodeRef::Element(element) => format!("Element({})", element.tag_name()),
            NodeRef::Text(_) => "Text".to_owned(),
        }
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Element(element) => NodeRef::Element(element),
            Node::Text(text) => NodeRef::Text(text),
        }
    }
}

impl<'a> From<&'a ElementNode> for NodeRef<'a> {
    fn from(element: &'a ElementNode) -> Self {
        NodeRef::Element(element)
    }
}

/// Pre-order walk: a node comes before its children, siblings in order.
#[derive(Clone, Debug)]
pub struct DepthFirst<'a> {
    stack: Vec<(NodeRef<'a>, usize)>,
}

impl<'a> DepthFirst<'a> {
    pub fn new(root: NodeRef<'a>) -> Self {
        DepthFirst {
            stack: vec![(root, 0)],
        }
    }

    pub fn has_more(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn next_with_depth(&mut self) -> Option<(usize, NodeRef<'a>)> {
        let (node, depth) = self.stack.pop()?;

        // Reversed so the first child is popped next.
        for child in node.children().iter().rev() {
            self.stack.push((NodeRef::from(child), depth + 1));
        }

        Some((depth, node))
    }

    pub fn with_depth(mut self) -> impl Iterator<Item = (usize, NodeRef<'a>)> {
        std::iter::from_fn(move || self.next_with_depth())
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_depth().map(|(_, node)| node)
    }
}

impl FusedIterator for DepthFirst<'_> {}

/// Level-order walk driven by a FIFO frontier.
#[derive(Clone, Debug)]
pub struct BreadthFirst<'a> {
    queue: VecDeque<(NodeRef<'a>, usize)>,
}

impl<'a> BreadthFirst<'a> {
    pub fn new(root: NodeRef<'a>) -> Self {
        BreadthFirst {
            queue: VecDeque::from([(root, 0)]),
        }
    }

    pub fn has_more(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn next_with_depth(&mut self) -> Option<(usize, NodeRef<'a>)> {
        let (node, depth) = self.queue.pop_front()?;

        self.queue.extend(
            node.children()
                .iter()
                .map(|child| (NodeRef::from(child), depth + 1)),
        );

        Some((depth, node))
    }

    pub fn with_depth(mut self) -> impl Iterator<Item = (usize, NodeRef<'a>)> {
        std::iter::from_fn(move || self.next_with_depth())
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_depth().map(|(_, node)| node)
    }
}

impl FusedIterator for BreadthFirst<'_> {}
