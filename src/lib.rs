//! A lightweight in-memory markup tree.
//!
//! Trees are built from [`TextNode`] leaves and [`ElementNode`] containers,
//! either directly or through a [`CommandQueue`] batch, then rendered with a
//! swappable [`RenderStrategy`], walked depth- or breadth-first, or sent
//! synthetic events through per-element listeners.
//!
//! ```
//! use lightdom::{ClosingType, DisplayType, ElementNode, TextNode};
//!
//! let mut li = ElementNode::new("li", DisplayType::Block, ClosingType::Pair);
//! li.add_child(TextNode::new("Item 1"));
//! assert_eq!(li.outer_html(), "<li>Item 1</li>");
//! ```

pub mod html;

pub use html::command::{ChildSource, Command, CommandQueue, Staging};
pub use html::dom::{
    ClosingType, CssClasses, DisplayType, ElementChildren, ElementDescriptor, ElementNode, Node,
    RenderHook, TextNode,
};
pub use html::error::{DomError, Result};
pub use html::events::{Listener, ListenerRegistry};
pub use html::flyweight::{book_page, DescriptorPool};
pub use html::render::{
    MinifiedRender, NormalRender, PrettyRender, RenderOptions, RenderStrategy, Renderer,
    StrategyKind,
};
pub use html::traversal::{BreadthFirst, DepthFirst, NodeRef};
