//! Core `Config` struct and its section structs.
//!
//! Every field carries a `#[serde(default = ...)]` so partial YAML files
//! load cleanly; missing sections fall back to their `Default` impls.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{GamepadButton, InputMethod, LogLevel, PlatformKind};

/// Top-level configuration for an input arbiter and its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level used by the replay tool when neither `--log-level` nor
    /// `RUST_LOG` is given
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Show on-screen glyphs for the active input device.
    ///
    /// Turn off while capturing footage so the capture device is not revealed.
    #[serde(default = "crate::defaults::bool_true")]
    pub show_input_keys: bool,

    /// Platform capability settings
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Input method thrashing protection
    #[serde(default)]
    pub thrash: ThrashConfig,

    /// Gamepad classification settings
    #[serde(default)]
    pub gamepad: GamepadConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: crate::defaults::log_level(),
            show_input_keys: crate::defaults::bool_true(),
            platform: PlatformConfig::default(),
            thrash: ThrashConfig::default(),
            gamepad: GamepadConfig::default(),
        }
    }
}

/// Platform preset plus optional per-method overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Platform family; `auto` resolves from the compile target
    #[serde(default = "crate::defaults::platform_kind")]
    pub kind: PlatformKind,

    /// Override the preset's mouse and keyboard support
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_mouse_and_keyboard: Option<bool>,

    /// Override the preset's gamepad support
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_gamepad: Option<bool>,

    /// Override the preset's touch support
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_touch: Option<bool>,

    /// Override the preset's hardware cursor support
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_hardware_cursor: Option<bool>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            kind: crate::defaults::platform_kind(),
            supports_mouse_and_keyboard: None,
            supports_gamepad: None,
            supports_touch: None,
            supports_hardware_cursor: None,
        }
    }
}

impl PlatformConfig {
    /// Override for a single input method, if one is configured.
    pub fn support_override(&self, method: InputMethod) -> Option<bool> {
        match method {
            InputMethod::MouseAndKeyboard => self.supports_mouse_and_keyboard,
            InputMethod::Gamepad => self.supports_gamepad,
            InputMethod::Touch => self.supports_touch,
        }
    }
}

/// Thrash detection tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrashConfig {
    /// Enable suppression of rapid input method oscillation
    #[serde(default = "crate::defaults::bool_true")]
    pub enabled: bool,

    /// Changes tolerated inside one window before suppression
    #[serde(default = "crate::defaults::thrash_limit")]
    pub limit: u32,

    /// Length of the trailing window, in seconds
    #[serde(default = "crate::defaults::thrash_window_seconds")]
    pub window_seconds: f64,
}

impl Default for ThrashConfig {
    fn default() -> Self {
        Self {
            enabled: crate::defaults::bool_true(),
            limit: crate::defaults::thrash_limit(),
            window_seconds: crate::defaults::thrash_window_seconds(),
        }
    }
}

/// Gamepad naming and classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamepadConfig {
    /// Controller profile name reported before any gamepad input arrives
    #[serde(default = "crate::defaults::gamepad_name")]
    pub default_name: String,

    /// Face button that synthesizes a pointer click
    #[serde(default = "crate::defaults::accept_button")]
    pub accept_button: GamepadButton,

    /// Stick/trigger deflection below which analog input is ignored (0.0..1.0)
    #[serde(default = "crate::defaults::analog_deadzone")]
    pub analog_deadzone: f32,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            default_name: crate::defaults::gamepad_name(),
            accept_button: crate::defaults::accept_button(),
            analog_deadzone: crate::defaults::analog_deadzone(),
        }
    }
}

impl Config {
    /// Create a config with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the platform family.
    pub fn with_platform(mut self, kind: PlatformKind) -> Self {
        self.platform.kind = kind;
        self
    }

    /// Builder: set the thrash limit and window.
    pub fn with_thrash(mut self, limit: u32, window_seconds: f64) -> Self {
        self.thrash.limit = limit;
        self.thrash.window_seconds = window_seconds;
        self
    }

    /// Builder: enable or disable thrash protection.
    pub fn with_thrash_protection(mut self, enabled: bool) -> Self {
        self.thrash.enabled = enabled;
        self
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.thrash.window_seconds.is_finite() && self.thrash.window_seconds > 0.0) {
            return Err(ConfigError::Validation(format!(
                "thrash.window_seconds must be a positive number, got {}",
                self.thrash.window_seconds
            )));
        }
        if self.thrash.limit == 0 {
            return Err(ConfigError::Validation(
                "thrash.limit must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.gamepad.analog_deadzone) {
            return Err(ConfigError::Validation(format!(
                "gamepad.analog_deadzone must be in [0.0, 1.0), got {}",
                self.gamepad.analog_deadzone
            )));
        }
        if self.gamepad.default_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gamepad.default_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
