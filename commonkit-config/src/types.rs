//! Shared enums used by the config file and by the input/widget crates.

use serde::{Deserialize, Serialize};

/// The class of device currently driving UI interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputMethod {
    /// Pointer plus keyboard
    #[default]
    MouseAndKeyboard,
    /// Any gamepad or controller profile
    Gamepad,
    /// Touch screen
    Touch,
}

impl InputMethod {
    /// Display name for logs and CLI output
    pub fn display_name(&self) -> &'static str {
        match self {
            InputMethod::MouseAndKeyboard => "Mouse & Keyboard",
            InputMethod::Gamepad => "Gamepad",
            InputMethod::Touch => "Touch",
        }
    }

    /// All input methods, in declaration order
    pub fn all() -> &'static [InputMethod] {
        &[
            InputMethod::MouseAndKeyboard,
            InputMethod::Gamepad,
            InputMethod::Touch,
        ]
    }
}

impl std::fmt::Display for InputMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Platform family used to derive input capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    /// Detect from the compile target
    #[default]
    Auto,
    /// Desktop PC: mouse, keyboard and gamepads, hardware cursor
    Desktop,
    /// Console: gamepad first, no hardware cursor
    Console,
    /// Phone or tablet: touch first, mobile gamepads allowed
    Mobile,
}

impl PlatformKind {
    /// Resolve `Auto` to a concrete platform for the current target.
    pub fn resolve(self) -> PlatformKind {
        match self {
            PlatformKind::Auto => {
                #[cfg(any(target_os = "android", target_os = "ios"))]
                {
                    PlatformKind::Mobile
                }
                #[cfg(not(any(target_os = "android", target_os = "ios")))]
                {
                    PlatformKind::Desktop
                }
            }
            other => other,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformKind::Auto => "Auto",
            PlatformKind::Desktop => "Desktop",
            PlatformKind::Console => "Console",
            PlatformKind::Mobile => "Mobile",
        }
    }
}

/// Gamepad buttons, named by position rather than by vendor glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamepadButton {
    /// Bottom face button (A / Cross)
    FaceBottom,
    /// Right face button (B / Circle)
    FaceRight,
    /// Left face button (X / Square)
    FaceLeft,
    /// Top face button (Y / Triangle)
    FaceTop,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    /// Back / Select / View
    Select,
    /// Start / Options / Menu
    Start,
    LeftThumb,
    RightThumb,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

/// Analog gamepad axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

/// Log level for the replay tool and any host that wires the config into `log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
