//! Configuration and shared input types for commonkit.
//!
//! This crate provides:
//!
//! - The shared enums every other crate speaks (`InputMethod`, gamepad
//!   buttons and axes, platform family, log level)
//! - The `Config` struct with serde defaults and validation
//! - YAML load/save with atomic writes

pub mod config;
pub mod defaults;
pub mod error;
mod persistence;
pub mod types;

pub use config::{Config, GamepadConfig, PlatformConfig, ThrashConfig};
pub use error::ConfigError;
pub use types::{GamepadAxis, GamepadButton, InputMethod, LogLevel, PlatformKind};
