//! Tab list bookkeeping.
//!
//! Tabs are identified by name and kept in registration order. Exactly one
//! tab is selected whenever any tab exists. Selecting a tab with content
//! switches a linked [`AnimatedSwitcher`] to that content.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::switcher::AnimatedSwitcher;
use crate::widget::{Event, Visibility, WidgetId};

/// A registered tab and the state of its button.
#[derive(Debug, Clone, PartialEq)]
pub struct TabInfo {
    pub id: String,
    /// Position in registration order
    pub index: usize,
    /// Widget shown in the linked switcher when this tab is selected
    pub content: Option<WidgetId>,
    pub visibility: Visibility,
    pub enabled: bool,
    pub interaction_enabled: bool,
    pub disabled_reason: Option<String>,
}

impl TabInfo {
    fn new(id: &str, index: usize, content: Option<WidgetId>) -> Self {
        Self {
            id: id.to_string(),
            index,
            content,
            visibility: Visibility::Visible,
            enabled: true,
            interaction_enabled: true,
            disabled_reason: None,
        }
    }

    /// Whether tab navigation may land on this tab.
    pub fn is_selectable(&self) -> bool {
        self.enabled && self.interaction_enabled && self.visibility.is_visible()
    }
}

#[derive(Debug, Default)]
pub struct TabList {
    /// Registered tabs, in order
    tabs: Vec<TabInfo>,
    selected: Option<String>,
    linked_switcher: Option<Weak<RefCell<AnimatedSwitcher>>>,
    /// Start listening for next/previous input on construct
    auto_listen_for_input: bool,
    listening_for_input: bool,
    on_tab_selected: Event<String>,
    on_tab_button_creation: Event<String>,
    on_tab_button_removal: Event<String>,
}

impl TabList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_listen_for_input(mut self, auto_listen: bool) -> Self {
        self.auto_listen_for_input = auto_listen;
        self
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    pub fn construct(&mut self) {
        if self.auto_listen_for_input {
            self.set_listening_for_input(true);
        }
    }

    /// Stop listening and drop every tab.
    pub fn destruct(&mut self) {
        self.set_listening_for_input(false);
        self.remove_all_tabs();
    }

    // ── Registration ───────────────────────────────────────────────────────

    /// Register a tab. Returns false if `id` is already registered.
    ///
    /// The first tab registered becomes selected.
    pub fn register_tab(&mut self, id: &str, content: Option<WidgetId>) -> bool {
        if self.position(id).is_some() {
            log::warn!("Tab '{}' is already registered", id);
            return false;
        }

        let index = self.tabs.len();
        self.tabs.push(TabInfo::new(id, index, content));
        log::debug!("Registered tab '{}' (total: {})", id, self.tabs.len());

        if self.selected.is_none() {
            self.handle_tab_selected(index);
        }
        self.on_tab_button_creation.broadcast(&id.to_string());
        true
    }

    /// Remove a tab. Returns false if `id` is not registered.
    ///
    /// Removing the selected tab selects the tab that takes its place (or the
    /// new last tab).
    pub fn remove_tab(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let removed = self.tabs.remove(index);
        for (i, tab) in self.tabs.iter_mut().enumerate().skip(index) {
            tab.index = i;
        }
        log::debug!("Removed tab '{}' (index {})", id, index);

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
            if !self.tabs.is_empty() {
                self.handle_tab_selected(index.min(self.tabs.len() - 1));
            }
        }

        self.on_tab_button_removal.broadcast(&removed.id);
        true
    }

    pub fn remove_all_tabs(&mut self) {
        // Clear first so no replacement selection is made along the way
        self.selected = None;
        let ids: Vec<String> = self.tabs.iter().map(|tab| tab.id.clone()).collect();
        for id in ids {
            self.remove_tab(&id);
        }
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tabs(&self) -> &[TabInfo] {
        &self.tabs
    }

    pub fn tab(&self, id: &str) -> Option<&TabInfo> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    fn tab_mut(&mut self, id: &str) -> Option<&mut TabInfo> {
        let tab = self.tabs.iter_mut().find(|tab| tab.id == id);
        if tab.is_none() {
            log::debug!("No tab '{}' registered", id);
        }
        tab
    }

    // ── Selection ──────────────────────────────────────────────────────────

    /// Select a tab by id. Returns false if `id` is not registered.
    ///
    /// Programmatic selection ignores whether the tab is enabled.
    pub fn select_tab_by_id(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.selected.as_deref() != Some(id) {
            self.handle_tab_selected(index);
        }
        true
    }

    pub fn selected_tab_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn tab_id_at_index(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|tab| tab.id.as_str())
    }

    /// Select the next selectable tab, wrapping around.
    ///
    /// Returns true if the selection changed.
    pub fn select_next_tab(&mut self) -> bool {
        self.step_selection(true)
    }

    /// Select the previous selectable tab, wrapping around.
    pub fn select_previous_tab(&mut self) -> bool {
        self.step_selection(false)
    }

    fn step_selection(&mut self, forward: bool) -> bool {
        let count = self.tabs.len();
        if count == 0 {
            return false;
        }

        let current = self
            .selected
            .as_deref()
            .and_then(|id| self.position(id));
        let start = current.unwrap_or(if forward { count - 1 } else { 0 });

        for step in 1..=count {
            let index = if forward {
                (start + step) % count
            } else {
                (start + count - step % count) % count
            };
            if Some(index) == current {
                break;
            }
            if self.tabs[index].is_selectable() {
                self.handle_tab_selected(index);
                return true;
            }
        }
        false
    }

    fn handle_tab_selected(&mut self, index: usize) {
        let tab = &self.tabs[index];
        let id = tab.id.clone();
        let content = tab.content;
        self.selected = Some(id.clone());
        log::debug!("Selected tab '{}' (index {})", id, index);

        let switcher = self.linked_switcher();
        match (content, switcher) {
            (Some(content), Some(switcher)) => switcher.borrow_mut().set_active_widget(content),
            (Some(_), None) => log::warn!(
                "Tab '{}' has content but no linked switcher; call set_linked_switcher first",
                id
            ),
            (None, Some(_)) => log::warn!("Tab '{}' has no content for the linked switcher", id),
            (None, None) => {}
        }

        self.on_tab_selected.broadcast(&id);
    }

    // ── Tab button state ───────────────────────────────────────────────────

    /// Set a tab's visibility. Hidden and collapsed tabs cannot be interacted with.
    pub fn set_tab_visibility(&mut self, id: &str, visibility: Visibility) {
        if let Some(tab) = self.tab_mut(id) {
            tab.visibility = visibility;
            tab.interaction_enabled = visibility.is_visible();
        }
    }

    pub fn set_tab_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(tab) = self.tab_mut(id) {
            tab.enabled = enabled;
            if enabled {
                tab.disabled_reason = None;
            }
        }
    }

    pub fn set_tab_interaction_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(tab) = self.tab_mut(id) {
            tab.interaction_enabled = enabled;
        }
    }

    /// Disable a tab and record why, for display in its tooltip.
    pub fn disable_tab_with_reason(&mut self, id: &str, reason: &str) {
        if let Some(tab) = self.tab_mut(id) {
            tab.enabled = false;
            tab.disabled_reason = Some(reason.to_string());
        }
    }

    // ── Linked switcher ────────────────────────────────────────────────────

    pub fn set_linked_switcher(&mut self, switcher: Option<Weak<RefCell<AnimatedSwitcher>>>) {
        let unchanged = match (&self.linked_switcher, &switcher) {
            (Some(old), Some(new)) => old.ptr_eq(new),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            log::debug!("Tab list linked switcher changed");
            self.linked_switcher = switcher;
        }
    }

    /// The linked switcher, if one is set and still alive.
    pub fn linked_switcher(&self) -> Option<Rc<RefCell<AnimatedSwitcher>>> {
        self.linked_switcher.as_ref().and_then(Weak::upgrade)
    }

    // ── Input ──────────────────────────────────────────────────────────────

    pub fn set_listening_for_input(&mut self, listen: bool) {
        if self.listening_for_input != listen {
            log::debug!("Tab list listening for input: {}", listen);
            self.listening_for_input = listen;
        }
    }

    pub fn is_listening_for_input(&self) -> bool {
        self.listening_for_input
    }

    /// Next-tab input action. Ignored unless listening and the linked
    /// switcher is idle.
    pub fn handle_next_tab_input(&mut self) -> bool {
        self.accepts_navigation_input() && self.select_next_tab()
    }

    /// Previous-tab input action. Same gating as [`handle_next_tab_input`](Self::handle_next_tab_input).
    pub fn handle_previous_tab_input(&mut self) -> bool {
        self.accepts_navigation_input() && self.select_previous_tab()
    }

    fn accepts_navigation_input(&self) -> bool {
        self.listening_for_input
            && !self
                .linked_switcher()
                .is_some_and(|switcher| switcher.borrow().is_transitioning())
    }

    // ── Events ─────────────────────────────────────────────────────────────

    pub fn on_tab_selected(&mut self) -> &mut Event<String> {
        &mut self.on_tab_selected
    }

    pub fn on_tab_button_creation(&mut self) -> &mut Event<String> {
        &mut self.on_tab_button_creation
    }

    pub fn on_tab_button_removal(&mut self) -> &mut Event<String> {
        &mut self.on_tab_button_removal
    }
}
