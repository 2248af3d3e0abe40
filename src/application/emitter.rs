//! Named-topic event emitter
//!
//! Listeners are plain callables invoked synchronously, in registration
//! order. Emitting to a topic nobody listens on is not an error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A registered listener
pub type Listener<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Handle returned by [`EventEmitter::on`], used to detach the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Emitter of named events carrying a `P` payload
pub struct EventEmitter<P: ?Sized> {
    next_id: u64,
    listeners: HashMap<String, Vec<(ListenerId, Listener<P>)>>,
}

impl<P: ?Sized> EventEmitter<P> {
    /// Create an emitter with no listeners
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: HashMap::new(),
        }
    }

    /// Register a listener for `topic`
    pub fn on<F>(&mut self, topic: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.on_shared(topic, Arc::new(listener))
    }

    /// Register an already shared listener for `topic`
    pub fn on_shared(&mut self, topic: impl Into<String>, listener: Listener<P>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(topic.into())
            .or_default()
            .push((id, listener));
        id
    }

    /// Detach a listener. Returns false if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        self.listeners.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|(entry_id, _)| *entry_id != id);
            removed |= entries.len() != before;
            !entries.is_empty()
        });
        removed
    }

    /// Invoke every listener of `topic` with `payload`.
    ///
    /// # Returns
    /// The number of listeners invoked (zero when nobody listens)
    pub fn emit(&self, topic: &str, payload: &P) -> usize {
        let Some(entries) = self.listeners.get(topic) else {
            return 0;
        };
        for (_, listener) in entries {
            listener(payload);
        }
        entries.len()
    }

    /// Number of listeners on `topic`
    pub fn listener_count(&self, topic: &str) -> usize {
        self.listeners.get(topic).map_or(0, Vec::len)
    }

    /// Detach every listener on every topic
    pub fn remove_all(&mut self) {
        self.listeners.clear();
    }
}

impl<P: ?Sized> Default for EventEmitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for EventEmitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut topics: Vec<_> = self
            .listeners
            .iter()
            .map(|(topic, entries)| (topic.as_str(), entries.len()))
            .collect();
        topics.sort_unstable();
        f.debug_struct("EventEmitter")
            .field("topics", &topics)
            .finish_non_exhaustive()
    }
}
