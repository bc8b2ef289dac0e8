//! Deferred construction.
//!
//! Commands name their nodes by key rather than by reference, so a batch can
//! mention nodes that are only registered in a [`Staging`] table later, as long
//! as they are there by the time [`CommandQueue::run_all`] executes.

use std::collections::{HashMap, VecDeque};

use super::dom::{ElementNode, Node, TextNode};
use super::error::{DomError, Result};

#[derive(Clone, Debug)]
enum Slot {
    /// Owned by the table; the root of its own tree.
    Detached(ElementNode),
    /// Moved into `parent`, at a fixed position among its children.
    Attached { parent: String, index: usize },
}

/// Keyed nodes a command batch operates on.
///
/// Attaching a staged element moves it into its parent; it stays addressable
/// by key afterwards, so later commands can keep adding to it.
#[derive(Clone, Debug, Default)]
pub struct Staging {
    slots: HashMap<String, Slot>,
}

impl Staging {
    pub fn new() -> Self {
        Staging::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, element: ElementNode) -> Result<()> {
        let key = key.into();
        if self.slots.contains_key(&key) {
            return Err(DomError::DuplicateKey(key));
        }

        self.slots.insert(key, Slot::Detached(element));

        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn is_attached(&self, key: &str) -> bool {
        matches!(self.slots.get(key), Some(Slot::Attached { .. }))
    }

    /// Child indices leading from the detached root down to `key`.
    fn path_to(&self, key: &str) -> Result<(String, Vec<usize>)> {
        let mut path = Vec::new();
        let mut current = key;

        loop {
            match self.slots.get(current) {
                None => return Err(DomError::UnknownTarget(current.to_owned())),
                Some(Slot::Detached(_)) => {
                    path.reverse();
                    return Ok((current.to_owned(), path));
                }
                Some(Slot::Attached { parent, index }) => {
                    path.push(*index);
                    current = parent.as_str();
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ElementNode> {
        let (root, path) = self.path_to(key).ok()?;
        let mut element = match self.slots.get(&root)? {
            Slot::Detached(element) => element,
            Slot::Attached { .. } => return None,
        };

        for index in path {
            element = element.children().get(index)?.as_element()?;
        }

        Some(element)
    }

    fn get_mut(&mut self, key: &str) -> Result<&mut ElementNode> {
        let (root, path) = self.path_to(key)?;
        let missing = || DomError::UnknownTarget(key.to_owned());

        let mut element = match self.slots.get_mut(&root) {
            Some(Slot::Detached(element)) => element,
            _ => return Err(missing()),
        };

        for index in path {
            element = match element.child_mut(index) {
                Some(Node::Element(child)) => child,
                _ => return Err(missing()),
            };
        }

        Ok(element)
    }

    fn attach(&mut self, parent: &str, child: &str) -> Result<()> {
        match self.slots.get(child) {
            None => return Err(DomError::UnknownTarget(child.to_owned())),
            Some(Slot::Attached { .. }) => return Err(DomError::AlreadyAttached(child.to_owned())),
            Some(Slot::Detached(_)) => {}
        }

        let (parent_root, _) = self.path_to(parent)?;
        if parent_root == child {
            return Err(DomError::WouldCycle {
                parent: parent.to_owned(),
                child: child.to_owned(),
            });
        }

        let target = self
            .get(parent)
            .ok_or_else(|| DomError::UnknownTarget(parent.to_owned()))?;
        if target.is_self_closing() {
            return Err(DomError::SelfClosingChild {
                tag: target.tag_name().to_owned(),
            });
        }

        let Some(Slot::Detached(node)) = self.slots.remove(child) else {
            return Err(DomError::UnknownTarget(child.to_owned()));
        };

        let target = match self.get_mut(parent) {
            Ok(target) => target,
            Err(error) => {
                self.slots.insert(child.to_owned(), Slot::Detached(node));
                return Err(error);
            }
        };
        let index = target.children().len();
        target.children_mut().push(Node::Element(node));

        self.slots.insert(
            child.to_owned(),
            Slot::Attached {
                parent: parent.to_owned(),
                index,
            },
        );

        Ok(())
    }

    /// Removes a detached tree from the table, together with the keys of every
    /// staged element inside it.
    pub fn take(&mut self, key: &str) -> Result<ElementNode> {
        match self.slots.get(key) {
            None => return Err(DomError::UnknownTarget(key.to_owned())),
            Some(Slot::Attached { .. }) => return Err(DomError::AlreadyAttached(key.to_owned())),
            Some(Slot::Detached(_)) => {}
        }

        let inside: Vec<String> = self
            .slots
            .keys()
            .filter(|other| {
                self.path_to(other)
                    .map(|(root, _)| root == key)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        for other in inside.iter().filter(|other| other.as_str() != key) {
            self.slots.remove(other);
        }

        match self.slots.remove(key) {
            Some(Slot::Detached(element)) => Ok(element),
            _ => Err(DomError::UnknownTarget(key.to_owned())),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ChildSource {
    /// A staged element, moved out of the table on execution.
    Staged(String),
    /// A node supplied inline, typically text.
    Node(Node),
}

#[derive(Clone, Debug)]
pub enum Command {
    AddChild { parent: String, child: ChildSource },
    AddCssClass { target: String, class: String },
}

impl Command {
    pub fn add_child(parent: impl Into<String>, child: impl Into<String>) -> Command {
        Command::AddChild {
            parent: parent.into(),
            child: ChildSource::Staged(child.into()),
        }
    }

    pub fn add_node(parent: impl Into<String>, node: impl Into<Node>) -> Command {
        Command::AddChild {
            parent: parent.into(),
            child: ChildSource::Node(node.into()),
        }
    }

    pub fn add_text(parent: impl Into<String>, text: impl Into<String>) -> Command {
        Command::add_node(parent, TextNode::new(text))
    }

    pub fn add_css_class(target: impl Into<String>, class: impl Into<String>) -> Command {
        Command::AddCssClass {
            target: target.into(),
            class: class.into(),
        }
    }

    pub fn execute(self, staging: &mut Staging) -> Result<()> {
        match self {
            Command::AddChild {
                parent,
                child: ChildSource::Staged(child),
            } => staging.attach(&parent, &child),
            Command::AddChild {
                parent,
                child: ChildSource::Node(node),
            } => staging.get_mut(&parent)?.try_add_child(node),
            Command::AddCssClass { target, class } => {
                staging.get_mut(&target)?.add_css_class(class);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        CommandQueue::default()
    }

    pub fn enqueue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Executes every pending command in enqueue order and empties the queue.
    ///
    /// All or nothing: if any command fails, `staging` is left as it was and
    /// the first error is returned. Returns the number of commands applied.
    pub fn run_all(&mut self, staging: &mut Staging) -> Result<usize> {
        let mut work = staging.clone();
        let mut applied = 0;

        while let Some(command) = self.pending.pop_front() {
            tracing::debug!(?command, "executing command");

            if let Err(error) = command.execute(&mut work) {
                let dropped = self.pending.len();
                self.pending.clear();
                tracing::debug!(%error, applied, dropped, "command batch rolled back");
                return Err(error);
            }

            applied += 1;
        }

        *staging = work;

        Ok(applied)
    }
}
