//! Named input method locks.
//!
//! A lock forces the effective input method regardless of which device
//! produced input. Each reason holds at most one lock; the most recently
//! added (or re-added) lock decides the effective method.

use commonkit_config::InputMethod;

/// Registry of reason → forced input method, kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct LockRegistry {
    /// Oldest first; the last entry wins resolution
    locks: Vec<(String, InputMethod)>,
}

impl LockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or overwrite) the lock for `reason`, or remove it.
    ///
    /// Overwriting moves the reason to the most-recent position. Removing an
    /// absent reason does nothing.
    pub fn add_or_remove_lock(&mut self, reason: &str, method: InputMethod, add: bool) {
        self.locks.retain(|(existing, _)| existing != reason);
        if add {
            self.locks.push((reason.to_string(), method));
        }
    }

    /// The method every request is forced to, if any lock is held.
    pub fn resolve(&self) -> Option<InputMethod> {
        self.locks.last().map(|(_, method)| *method)
    }

    /// Whether `reason` currently holds a lock.
    pub fn contains(&self, reason: &str) -> bool {
        self.locks.iter().any(|(existing, _)| existing == reason)
    }

    /// Iterate over `(reason, method)` pairs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, InputMethod)> {
        self.locks
            .iter()
            .map(|(reason, method)| (reason.as_str(), *method))
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }
}
