use std::collections::HashMap;
use std::rc::Rc;

use super::dom::{ClosingType, DisplayType, ElementDescriptor, ElementNode, TextNode};

const HEADING_MAX_CHARS: usize = 20;

/// Interns element descriptors so repeated tags share one allocation.
#[derive(Debug, Default)]
pub struct DescriptorPool {
    descriptors: HashMap<ElementDescriptor, Rc<ElementDescriptor>>,
}

impl DescriptorPool {
    pub fn new() -> Self {
        DescriptorPool::default()
    }

    pub fn descriptor(
        &mut self,
        tag_name: &str,
        display: DisplayType,
        closing: ClosingType,
    ) -> Rc<ElementDescriptor> {
        let key = ElementDescriptor::new(tag_name, display, closing);

        if let Some(shared) = self.descriptors.get(&key) {
            return Rc::clone(shared);
        }

        tracing::debug!(
            tag = tag_name,
            display = ?key.display(),
            closing = ?key.closing(),
            "interning element descriptor"
        );
        let shared = Rc::new(key.clone());
        self.descriptors.insert(key, Rc::clone(&shared));

        shared
    }

    /// A new element instance with its own children and classes, backed by a
    /// shared descriptor.
    pub fn element(&mut self, tag_name: &str, display: DisplayType, closing: ClosingType) -> ElementNode {
        ElementNode::from_descriptor(self.descriptor(tag_name, display, closing))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn tag_for_line(line: &str, is_first: bool) -> &'static str {
    if is_first {
        "h1"
    } else if line.chars().count() < HEADING_MAX_CHARS {
        "h2"
    } else if line.starts_with(char::is_whitespace) {
        "blockquote"
    } else {
        "p"
    }
}

/// Turns plain text lines into block elements, one per non-blank line.
///
/// The first line becomes `h1`, short lines `h2`, indented lines
/// `blockquote` and everything else `p`. With a pool, elements of the same
/// tag share their descriptor.
pub fn book_page<S: AsRef<str>>(lines: &[S], mut pool: Option<&mut DescriptorPool>) -> Vec<ElementNode> {
    let mut page = Vec::new();

    for line in lines.iter().map(AsRef::as_ref) {
        if line.trim().is_empty() {
            continue;
        }

        let tag = tag_for_line(line, page.is_empty());
        let mut element = match pool.as_deref_mut() {
            Some(pool) => pool.element(tag, DisplayType::Block, ClosingType::Pair),
            None => ElementNode::new(tag, DisplayType::Block, ClosingType::Pair),
        };

        element.add_child(TextNode::new(line));
        page.push(element);
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: [&str; 7] = [
        "The Great Adventure",
        "",
        "Chapter 1",
        "  It was a dark and stormy night.",
        "The wind howled through the trees.",
        "Suddenly, a shot rang out!",
        "Chapter 2",
    ];

    #[test]
    fn test_book_page_tags() {
        let page = book_page(&BOOK, None);
        let tags: Vec<&str> = page.iter().map(|element| element.tag_name()).collect();

        assert_eq!(tags, vec!["h1", "h2", "blockquote", "p", "p", "h2"]);
        assert_eq!(
            page[2].outer_html(),
            "<blockquote>  It was a dark and stormy night.</blockquote>"
        );
    }

    #[test]
    fn test_pool_shares_descriptors() {
        let mut pool = DescriptorPool::new();
        let page = book_page(&BOOK, Some(&mut pool));

        assert_eq!(pool.len(), 4);
        assert!(Rc::ptr_eq(page[1].descriptor(), page[5].descriptor()));
        assert!(!Rc::ptr_eq(page[1].descriptor(), page[0].descriptor()));
        assert_eq!(page, book_page(&BOOK, None));
    }

    #[test]
    fn test_pooled_instances_keep_own_children() {
        let mut pool = DescriptorPool::new();
        let mut first = pool.element("li", DisplayType::Block, ClosingType::Pair);
        let second = pool.element("li", DisplayType::Block, ClosingType::Pair);
        first.add_child(TextNode::new("only here"));
        first.add_css_class("active");

        assert_eq!(pool.len(), 1);
        assert_eq!(first.outer_html(), "<li class=\"active\">only here</li>");
        assert_eq!(second.outer_html(), "<li></li>");

        pool.element("li", DisplayType::Inline, ClosingType::Pair);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_interning_with_debug_logging() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut pool = DescriptorPool::new();
            assert!(pool.is_empty());

            let img = pool.descriptor("img", DisplayType::Inline, ClosingType::Single);
            let again = pool.descriptor("img", DisplayType::Inline, ClosingType::Single);

            assert!(Rc::ptr_eq(&img, &again));
            assert_eq!(img.display(), DisplayType::Inline);
            assert_eq!(img.closing(), ClosingType::Single);
            assert!(!pool.is_empty());
        });
    }
}
