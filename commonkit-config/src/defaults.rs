//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on config
//! fields and by the `Default` impls, so both paths agree.

use crate::types::{GamepadButton, LogLevel, PlatformKind};

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── General ────────────────────────────────────────────────────────────────

pub fn log_level() -> LogLevel {
    LogLevel::Warn
}

pub fn platform_kind() -> PlatformKind {
    PlatformKind::Auto
}

// ── Thrash protection ──────────────────────────────────────────────────────

/// Accepted changes allowed inside one window before suppression kicks in.
pub fn thrash_limit() -> u32 {
    3
}

pub fn thrash_window_seconds() -> f64 {
    1.0
}

// ── Gamepad ────────────────────────────────────────────────────────────────

pub fn gamepad_name() -> String {
    "Generic".to_string()
}

pub fn accept_button() -> GamepadButton {
    // Face-button-right confirms on some regional console layouts; those
    // hosts override this in their config.
    GamepadButton::FaceBottom
}

pub fn analog_deadzone() -> f32 {
    0.25
}
