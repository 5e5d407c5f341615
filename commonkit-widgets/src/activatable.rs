//! Activation lifecycle for menus, dialogs and other stackable widgets.
//!
//! An [`ActivatableWidget`] is either activated (receiving focus and input)
//! or not. Activation can optionally request an input method lock on the
//! arbiter for as long as the widget stays active; the widget's name is the
//! lock reason.

use commonkit_config::InputMethod;
use commonkit_input::{InputArbiter, PlatformCapabilities};

use crate::widget::{Event, Visibility, WidgetId};

#[derive(Debug)]
pub struct ActivatableWidget {
    id: WidgetId,
    name: String,
    /// Activate as soon as the widget is constructed
    auto_activate: bool,
    /// Back action deactivates this widget
    is_back_handler: bool,
    supports_activation_focus: bool,
    is_modal: bool,
    auto_restore_focus: bool,
    activated_visibility: Option<Visibility>,
    deactivated_visibility: Option<Visibility>,
    desired_input_lock: Option<InputMethod>,
    visibility: Visibility,
    is_active: bool,
    on_activated: Event<()>,
    on_deactivated: Event<()>,
    on_request_refresh_focus: Event<()>,
}

impl ActivatableWidget {
    pub fn new(id: WidgetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            auto_activate: false,
            is_back_handler: false,
            supports_activation_focus: true,
            is_modal: false,
            auto_restore_focus: false,
            activated_visibility: None,
            deactivated_visibility: None,
            desired_input_lock: None,
            visibility: Visibility::default(),
            is_active: false,
            on_activated: Event::new(),
            on_deactivated: Event::new(),
            on_request_refresh_focus: Event::new(),
        }
    }

    pub fn with_auto_activate(mut self, auto_activate: bool) -> Self {
        self.auto_activate = auto_activate;
        self
    }

    pub fn with_back_handler(mut self, is_back_handler: bool) -> Self {
        self.is_back_handler = is_back_handler;
        self
    }

    pub fn with_activation_focus(mut self, supports: bool) -> Self {
        self.supports_activation_focus = supports;
        self
    }

    pub fn with_modal(mut self, is_modal: bool) -> Self {
        self.is_modal = is_modal;
        self
    }

    pub fn with_auto_restore_focus(mut self, auto_restore: bool) -> Self {
        self.auto_restore_focus = auto_restore;
        self
    }

    /// Visibility applied on every activation.
    pub fn with_activated_visibility(mut self, visibility: Visibility) -> Self {
        self.activated_visibility = Some(visibility);
        self
    }

    /// Visibility applied on every deactivation.
    pub fn with_deactivated_visibility(mut self, visibility: Visibility) -> Self {
        self.deactivated_visibility = Some(visibility);
        self
    }

    /// Input method to lock while active (see [`activate_with`](Self::activate_with)).
    pub fn with_desired_input_lock(mut self, method: InputMethod) -> Self {
        self.desired_input_lock = Some(method);
        self
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    /// Activate the widget. Returns false if it was already active.
    pub fn activate(&mut self) -> bool {
        if self.is_active {
            return false;
        }
        self.is_active = true;
        if let Some(visibility) = self.activated_visibility {
            self.visibility = visibility;
        }
        log::debug!("Widget '{}' activated", self.name);
        self.on_activated.broadcast(&());
        true
    }

    /// Deactivate the widget. Returns false if it was not active.
    pub fn deactivate(&mut self) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_active = false;
        if let Some(visibility) = self.deactivated_visibility {
            self.visibility = visibility;
        }
        log::debug!("Widget '{}' deactivated", self.name);
        self.on_deactivated.broadcast(&());
        true
    }

    /// Activate and take the desired input lock on `arbiter`.
    pub fn activate_with<P: PlatformCapabilities>(&mut self, arbiter: &mut InputArbiter<P>) -> bool {
        if !self.activate() {
            return false;
        }
        self.sync_input_lock(arbiter, true);
        true
    }

    /// Deactivate and release the desired input lock on `arbiter`.
    pub fn deactivate_with<P: PlatformCapabilities>(
        &mut self,
        arbiter: &mut InputArbiter<P>,
    ) -> bool {
        if !self.deactivate() {
            return false;
        }
        self.sync_input_lock(arbiter, false);
        true
    }

    fn sync_input_lock<P: PlatformCapabilities>(&self, arbiter: &mut InputArbiter<P>, add: bool) {
        if let Some(method) = self.desired_input_lock {
            arbiter.add_or_remove_input_type_lock(&self.name, method, add);
        }
    }

    /// Called when the host builds the widget.
    pub fn construct(&mut self) {
        if self.auto_activate {
            self.activate();
        }
    }

    pub fn construct_with<P: PlatformCapabilities>(&mut self, arbiter: &mut InputArbiter<P>) {
        if self.auto_activate {
            self.activate_with(arbiter);
        }
    }

    /// Called when the host tears the widget down.
    pub fn destruct(&mut self) {
        self.deactivate();
    }

    pub fn destruct_with<P: PlatformCapabilities>(&mut self, arbiter: &mut InputArbiter<P>) {
        self.deactivate_with(arbiter);
    }

    /// Returns true if the back action was handled.
    pub fn handle_back_action(&mut self) -> bool {
        if self.is_back_handler {
            log::debug!("Widget '{}' handled back action", self.name);
            self.deactivate();
            true
        } else {
            false
        }
    }

    pub fn handle_back_action_with<P: PlatformCapabilities>(
        &mut self,
        arbiter: &mut InputArbiter<P>,
    ) -> bool {
        if self.is_back_handler {
            self.deactivate_with(arbiter);
            true
        } else {
            false
        }
    }

    /// Ask the host to re-evaluate focus. Only fires while activated.
    pub fn request_refresh_focus(&mut self) -> bool {
        if self.is_active {
            self.on_request_refresh_focus.broadcast(&());
            true
        } else {
            false
        }
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_activated(&self) -> bool {
        self.is_active
    }

    pub fn is_modal(&self) -> bool {
        self.is_modal
    }

    pub fn is_back_handler(&self) -> bool {
        self.is_back_handler
    }

    pub fn supports_activation_focus(&self) -> bool {
        self.supports_activation_focus
    }

    pub fn auto_restores_focus(&self) -> bool {
        self.supports_activation_focus && self.auto_restore_focus
    }

    pub fn sets_visibility_on_activated(&self) -> bool {
        self.activated_visibility.is_some()
    }

    pub fn sets_visibility_on_deactivated(&self) -> bool {
        self.deactivated_visibility.is_some()
    }

    pub fn desired_input_lock(&self) -> Option<InputMethod> {
        self.desired_input_lock
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    // ── Events ─────────────────────────────────────────────────────────────

    pub fn on_activated(&mut self) -> &mut Event<()> {
        &mut self.on_activated
    }

    pub fn on_deactivated(&mut self) -> &mut Event<()> {
        &mut self.on_deactivated
    }

    pub fn on_request_refresh_focus(&mut self) -> &mut Event<()> {
        &mut self.on_request_refresh_focus
    }
}
