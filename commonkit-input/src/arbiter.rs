//! Per-player input method arbiter.
//!
//! [`InputArbiter`] owns the effective input method and mediates every change
//! to it. A requested method goes through four gates in order:
//!
//! 1. platform support (unsupported methods become the platform default)
//! 2. locks (the most recent lock overrides everything)
//! 3. equality (requesting the current method is a no-op)
//! 4. thrash detection (rapid oscillation is dropped silently)
//!
//! Surviving requests are committed and broadcast synchronously.

use std::sync::mpsc;

use commonkit_config::{Config, InputMethod};

use crate::broadcast::{ChangeBroadcaster, InputMethodChanged, ListenerId};
use crate::cursor::{CursorState, Viewport};
use crate::filter::FilterRegistry;
use crate::lock::LockRegistry;
use crate::platform::{PlatformCapabilities, PlatformProfile};
use crate::thrash::{ThrashDetector, ThrashVerdict};

/// What happened to a single change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The resolved method was already current.
    Unchanged,
    /// The change was dropped by thrash protection.
    Suppressed,
    /// The change was committed and broadcast.
    Changed(InputMethod),
}

impl RequestOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, RequestOutcome::Changed(_))
    }
}

#[derive(Debug)]
pub struct InputArbiter<P = PlatformProfile> {
    platform: P,
    current: InputMethod,
    last: InputMethod,
    /// Controller profile name, meaningful while `current` is Gamepad
    gamepad_input_type: String,
    /// Current click was synthesized from a gamepad face button
    is_gamepad_simulated_click: bool,
    show_input_keys: bool,
    locks: LockRegistry,
    filters: FilterRegistry,
    thrash: ThrashDetector,
    broadcaster: ChangeBroadcaster,
    cursor: CursorState,
    viewport: Option<Viewport>,
}

impl InputArbiter<PlatformProfile> {
    /// Build an arbiter whose platform profile and tuning come from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_config(PlatformProfile::from_config(&config.platform), config)
    }
}

impl<P: PlatformCapabilities> InputArbiter<P> {
    /// Create an arbiter with default tuning, starting in the platform default.
    pub fn new(platform: P) -> Self {
        Self::with_config(platform, &Config::default())
    }

    /// Create an arbiter for `platform` with thrash, gamepad and display
    /// settings taken from `config` (its platform section is ignored).
    pub fn with_config(platform: P, config: &Config) -> Self {
        let initial = platform.default_input_method();
        log::info!("Input arbiter created, initial input method: {}", initial);
        Self {
            platform,
            current: initial,
            last: initial,
            gamepad_input_type: config.gamepad.default_name.clone(),
            is_gamepad_simulated_click: false,
            show_input_keys: config.show_input_keys,
            locks: LockRegistry::new(),
            filters: FilterRegistry::new(),
            thrash: ThrashDetector::from_config(&config.thrash),
            broadcaster: ChangeBroadcaster::new(),
            cursor: CursorState::new(),
            viewport: None,
        }
    }

    /// Replace the thrash detector.
    pub fn with_thrash_detector(mut self, detector: ThrashDetector) -> Self {
        self.thrash = detector;
        self
    }

    // ── Change requests ────────────────────────────────────────────────────

    /// Ask for `requested` to become the current method at time `now` (seconds).
    ///
    /// Best effort: read back [`current_input_type`](Self::current_input_type)
    /// if the outcome matters.
    pub fn request_input_method(&mut self, requested: InputMethod, now: f64) -> RequestOutcome {
        let resolved = self.resolve(requested);

        if resolved == self.current {
            return RequestOutcome::Unchanged;
        }

        if self.thrash.record_change(now) == ThrashVerdict::Suppress {
            log::debug!(
                "Suppressed input method change {} -> {} at {:.3}s (thrashing)",
                self.current,
                resolved,
                now
            );
            return RequestOutcome::Suppressed;
        }

        self.commit(resolved);
        RequestOutcome::Changed(resolved)
    }

    /// Apply platform substitution, then locks.
    fn resolve(&self, requested: InputMethod) -> InputMethod {
        let supported = if self.platform.supports_input_method(requested) {
            requested
        } else {
            let fallback = self.platform.default_input_method();
            log::debug!(
                "Input method {} unsupported on this platform, using {}",
                requested,
                fallback
            );
            fallback
        };
        self.locks.resolve().unwrap_or(supported)
    }

    fn commit(&mut self, method: InputMethod) {
        debug_assert_ne!(method, self.current);
        self.last = self.current;
        self.current = method;
        log::info!("Input method changed: {} -> {}", self.last, self.current);
        self.broadcaster.broadcast(InputMethodChanged {
            previous: self.last,
            current: self.current,
        });
    }

    /// Re-announce the current method without changing it.
    fn rebroadcast(&mut self) {
        self.broadcaster.broadcast(InputMethodChanged {
            previous: self.current,
            current: self.current,
        });
    }

    // ── Locks and filters ──────────────────────────────────────────────────

    /// Add or remove the lock held by `reason`.
    ///
    /// Adding a lock forces the current method immediately (bypassing thrash
    /// protection). Removing one leaves the current method as it is; later
    /// requests arbitrate normally.
    pub fn add_or_remove_input_type_lock(&mut self, reason: &str, method: InputMethod, add: bool) {
        self.locks.add_or_remove_lock(reason, method, add);
        log::debug!(
            "Input lock '{}' {} ({} active)",
            reason,
            if add { "added" } else { "removed" },
            self.locks.len()
        );

        if let Some(locked) = self.locks.resolve()
            && locked != self.current
        {
            self.commit(locked);
        }
    }

    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    /// Record whether `reason` filters `method` out of activity queries.
    pub fn set_input_type_filter(&mut self, method: InputMethod, reason: &str, filtered: bool) {
        self.filters.set_filter(method, reason, filtered);
    }

    pub fn input_type_filter(&self, method: InputMethod) -> bool {
        self.filters.get_filter(method)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// True if `method` is current and not filtered.
    pub fn is_input_method_active(&self, method: InputMethod) -> bool {
        method == self.current && !self.filters.get_filter(method)
    }

    /// The current input type based on the last input received.
    pub fn current_input_type(&self) -> InputMethod {
        self.current
    }

    pub fn last_input_type(&self) -> InputMethod {
        self.last
    }

    /// The default input type for the current platform.
    pub fn default_input_type(&self) -> InputMethod {
        self.platform.default_input_method()
    }

    /// True while a pointer (real or gamepad-simulated) drives the UI.
    pub fn is_using_pointer_input(&self) -> bool {
        match self.current {
            InputMethod::MouseAndKeyboard => !self.is_gamepad_simulated_click,
            InputMethod::Gamepad => self.is_gamepad_simulated_click,
            InputMethod::Touch => true,
        }
    }

    /// Whether on-screen glyphs for the active device should be displayed.
    pub fn should_show_input_keys(&self) -> bool {
        self.show_input_keys
    }

    pub fn set_show_input_keys(&mut self, show: bool) {
        if self.show_input_keys != show {
            log::info!("Show input keys: {}", show);
            self.show_input_keys = show;
        }
    }

    pub fn platform_supports_hardware_cursor(&self) -> bool {
        self.platform.supports_hardware_cursor()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn is_thrashing(&self, now: f64) -> bool {
        self.thrash.is_thrashing(now)
    }

    // ── Gamepad sub-state ──────────────────────────────────────────────────

    /// Record the controller profile in use.
    ///
    /// While a gamepad is current, a new name is re-broadcast so glyphs refresh.
    pub fn set_gamepad_input_type(&mut self, name: &str) {
        if self.gamepad_input_type == name {
            return;
        }
        log::debug!("Gamepad input type: {} -> {}", self.gamepad_input_type, name);
        self.gamepad_input_type = name.to_string();
        if self.current == InputMethod::Gamepad {
            self.rebroadcast();
        }
    }

    pub fn current_gamepad_name(&self) -> &str {
        &self.gamepad_input_type
    }

    pub fn set_is_gamepad_simulated_click(&mut self, simulated: bool) {
        self.is_gamepad_simulated_click = simulated;
    }

    pub fn is_gamepad_simulated_click(&self) -> bool {
        self.is_gamepad_simulated_click
    }

    // ── Scheduling ─────────────────────────────────────────────────────────

    /// Periodic callback: closes an elapsed thrash window eagerly.
    pub fn tick(&mut self, now: f64) {
        self.thrash.expire(now);
    }

    // ── Subscribers ────────────────────────────────────────────────────────

    /// Register a callback fired with the new method on every committed change.
    ///
    /// The callback runs on the caller's stack and must not re-enter this arbiter.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(InputMethod) + 'static,
    {
        self.broadcaster.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    /// Receive every future change on a channel.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<InputMethodChanged> {
        self.broadcaster.subscribe_channel()
    }

    // ── Cursor ─────────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Move the cursor, clamped to the viewport. Returns true if it moved.
    pub fn set_cursor_position(&mut self, position: (f64, f64), force: bool) -> bool {
        self.cursor.update(position, force, self.viewport.as_ref())
    }

    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor.position()
    }
}
