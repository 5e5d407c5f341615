// Library exports for the commonkit binary and its tests.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod logging;
pub mod replay;

pub use commonkit_config as config;
pub use commonkit_input as input;
pub use commonkit_widgets as widgets;
