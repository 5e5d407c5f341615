//! Engine-free widget logic for commonkit.
//!
//! The host UI layer owns rendering and the widget tree; this crate keeps the
//! state machines that decide what is active:
//!
//! - [`ActivatableWidget`]: activation lifecycle with optional input locks
//! - [`AnimatedSwitcher`]: one active child with timed transitions
//! - [`TabList`]: named tabs driving a linked switcher

pub mod activatable;
pub mod switcher;
pub mod tab_list;
pub mod widget;

pub use activatable::ActivatableWidget;
pub use switcher::{AnimatedSwitcher, SwitcherTransition, TransitionCurve};
pub use tab_list::{TabInfo, TabList};
pub use widget::{Event, HandlerId, Visibility, WidgetId};
