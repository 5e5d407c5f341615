//! Per-method activity filters.
//!
//! A filtered method may still be the current method; it is only reported
//! as inactive by activity queries. Each method keeps the set of reasons
//! filtering it, so independent callers cannot clear each other's filter.

use std::collections::{HashMap, HashSet};

use commonkit_config::InputMethod;

#[derive(Debug, Default, Clone)]
pub struct FilterRegistry {
    reasons: HashMap<InputMethod, HashSet<String>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether `reason` filters `method`.
    pub fn set_filter(&mut self, method: InputMethod, reason: &str, filtered: bool) {
        if filtered {
            self.reasons
                .entry(method)
                .or_default()
                .insert(reason.to_string());
        } else if let Some(set) = self.reasons.get_mut(&method) {
            set.remove(reason);
            if set.is_empty() {
                self.reasons.remove(&method);
            }
        }
    }

    /// True while at least one reason filters `method`.
    pub fn get_filter(&self, method: InputMethod) -> bool {
        self.reasons.get(&method).is_some_and(|set| !set.is_empty())
    }
}
