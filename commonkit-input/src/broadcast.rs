//! Input method change notification.
//!
//! Two independent delivery paths fire on every committed change:
//! direct callbacks run on the arbiter's call stack, and channel
//! subscribers receive an [`InputMethodChanged`] they may drain anywhere.
//!
//! Callbacks must not call back into the arbiter that is notifying them.

use std::sync::mpsc;

use commonkit_config::InputMethod;

/// Handle returned by [`ChangeBroadcaster::subscribe`].
pub type ListenerId = u64;

/// Payload delivered to channel subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputMethodChanged {
    pub previous: InputMethod,
    pub current: InputMethod,
}

type Listener = Box<dyn FnMut(InputMethod)>;

pub struct ChangeBroadcaster {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Listener)>,
    channels: Vec<mpsc::Sender<InputMethodChanged>>,
}

impl ChangeBroadcaster {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            listeners: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Register a callback fired with the new method on every change.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(InputMethod) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Open a channel that receives every future change.
    ///
    /// Dropping the receiver unsubscribes it on the next broadcast.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<InputMethodChanged> {
        let (tx, rx) = mpsc::channel();
        self.channels.push(tx);
        rx
    }

    /// Deliver a change to callbacks first, then to channels.
    pub fn broadcast(&mut self, change: InputMethodChanged) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(change.current);
        }
        self.channels.retain(|tx| tx.send(change).is_ok());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl Default for ChangeBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBroadcaster")
            .field("listeners", &self.listeners.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}
