//! Platform input capabilities.
//!
//! Contains:
//! - The `PlatformCapabilities` trait the arbiter consults before committing a change
//! - `PlatformProfile`, the config-driven implementation with desktop,
//!   console and mobile presets plus per-method overrides

use commonkit_config::{InputMethod, PlatformConfig, PlatformKind};

/// What the host platform can do with each input method.
pub trait PlatformCapabilities {
    /// Whether `method` can drive the UI on this platform.
    fn supports_input_method(&self, method: InputMethod) -> bool;

    /// Method the arbiter starts in and substitutes for unsupported requests.
    fn default_input_method(&self) -> InputMethod;

    /// Whether the OS draws the mouse cursor.
    fn supports_hardware_cursor(&self) -> bool;
}

/// Capabilities resolved from a [`PlatformConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformProfile {
    kind: PlatformKind,
    mouse_and_keyboard: bool,
    gamepad: bool,
    touch: bool,
    hardware_cursor: bool,
}

impl PlatformProfile {
    /// Preset capabilities for a platform family (`Auto` is resolved first).
    pub fn preset(kind: PlatformKind) -> Self {
        let kind = kind.resolve();
        let (mouse_and_keyboard, gamepad, touch, hardware_cursor) = match kind {
            PlatformKind::Desktop | PlatformKind::Auto => (true, true, false, true),
            PlatformKind::Console => (true, true, false, false),
            PlatformKind::Mobile => (false, true, true, false),
        };
        Self {
            kind,
            mouse_and_keyboard,
            gamepad,
            touch,
            hardware_cursor,
        }
    }

    /// Preset for the configured family with the configured overrides applied.
    pub fn from_config(config: &PlatformConfig) -> Self {
        let mut profile = Self::preset(config.kind);
        for method in [
            InputMethod::MouseAndKeyboard,
            InputMethod::Gamepad,
            InputMethod::Touch,
        ] {
            if let Some(value) = config.support_override(method) {
                *profile.support_mut(method) = value;
            }
        }
        if let Some(value) = config.supports_hardware_cursor {
            profile.hardware_cursor = value;
        }
        log::debug!("Resolved platform profile: {:?}", profile);
        profile
    }

    fn support_mut(&mut self, method: InputMethod) -> &mut bool {
        match method {
            InputMethod::MouseAndKeyboard => &mut self.mouse_and_keyboard,
            InputMethod::Gamepad => &mut self.gamepad,
            InputMethod::Touch => &mut self.touch,
        }
    }

    /// Preset for the current compile target.
    pub fn current() -> Self {
        Self::preset(PlatformKind::Auto)
    }

    pub fn kind(&self) -> PlatformKind {
        self.kind
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::current()
    }
}

impl PlatformCapabilities for PlatformProfile {
    fn supports_input_method(&self, method: InputMethod) -> bool {
        // The fallback method must always be usable, whatever the overrides say.
        if method == self.default_input_method() {
            return true;
        }
        match method {
            InputMethod::MouseAndKeyboard => self.mouse_and_keyboard,
            InputMethod::Gamepad => self.gamepad,
            InputMethod::Touch => self.touch,
        }
    }

    fn default_input_method(&self) -> InputMethod {
        match self.kind {
            PlatformKind::Console => InputMethod::Gamepad,
            PlatformKind::Mobile => InputMethod::Touch,
            PlatformKind::Desktop | PlatformKind::Auto => InputMethod::MouseAndKeyboard,
        }
    }

    fn supports_hardware_cursor(&self) -> bool {
        self.hardware_cursor
    }
}
