//! Input method arbitration for commonkit.
//!
//! Tracks which class of device (mouse and keyboard, gamepad, touch) is
//! driving the UI for one player, and mediates every change to it.
//!
//! Features:
//! - Named locks that force the input method
//! - Per-method filters that hide a method from activity queries
//! - Thrash protection against rapid oscillation between devices
//! - Platform capability substitution
//! - Synchronous change broadcast to callbacks and channels
//! - Raw device input classification and cursor clamping

pub mod arbiter;
pub mod broadcast;
pub mod cursor;
pub mod filter;
pub mod lock;
pub mod platform;
pub mod preprocessor;
pub mod thrash;

pub use arbiter::{InputArbiter, RequestOutcome};
pub use broadcast::{ChangeBroadcaster, InputMethodChanged, ListenerId};
pub use cursor::{CursorState, Viewport};
pub use filter::FilterRegistry;
pub use lock::LockRegistry;
pub use platform::{PlatformCapabilities, PlatformProfile};
pub use preprocessor::{InputPreprocessor, RawInput, is_mobile_gamepad_key};
pub use thrash::{ThrashDetector, ThrashVerdict};

// Re-exported so hosts need only this crate for the common types
pub use commonkit_config::{GamepadAxis, GamepadButton, InputMethod};
