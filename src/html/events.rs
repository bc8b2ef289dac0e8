use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::dom::ElementNode;

/// Listener callback: receives the element the event was triggered on and the payload.
pub type Listener = Rc<dyn Fn(&ElementNode, &str)>;

/// Event name to listener list, one registry per element.
///
/// Dispatch is synchronous and local: triggering an event on an element
/// never reaches its parent or children.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: HashMap<String, Vec<Listener>>,
}

impl ListenerRegistry {
    pub fn add(&mut self, event: impl Into<String>, listener: Listener) {
        self.listeners.entry(event.into()).or_default().push(listener);
    }

    pub fn dispatch(&self, node: &ElementNode, event: &str, payload: &str) -> usize {
        let Some(listeners) = self.listeners.get(event) else {
            return 0;
        };

        tracing::debug!(
            tag = node.tag_name(),
            event,
            count = listeners.len(),
            "dispatching event"
        );

        for listener in listeners {
            listener(node, payload);
        }

        listeners.len()
    }

    pub fn count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(event, list)| (event.as_str(), list.len()))
            .collect();
        counts.sort();

        f.debug_map().entries(counts).finish()
    }
}
