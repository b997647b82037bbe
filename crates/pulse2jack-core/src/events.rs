//! Change notifications for the bridge list.

use std::fmt;

/// What changed in the bridge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// List replaced by the built-in defaults
    Reset,
    /// Unsaved edits discarded, list reloaded from settings
    Reverted,
    /// A row was appended
    RowAdded { index: usize },
    /// A row was removed
    RowRemoved { index: usize },
    /// A row was edited
    RowEdited { index: usize },
    /// The list was written to settings and the connection file
    Saved { count: usize },
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&BridgeEvent)>;

/// Listeners called synchronously, in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    /// Register a listener.
    pub fn subscribe(&mut self, callback: impl FnMut(&BridgeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Deliver `event` to every listener.
    pub fn notify(&mut self, event: &BridgeEvent) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("count", &self.entries.len()).finish()
    }
}
