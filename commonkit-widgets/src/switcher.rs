//! Widget switcher with animated transitions.
//!
//! Exactly one child is active at a time. Changing the active child starts a
//! timed transition that the host renders using [`AnimatedSwitcher::transition_progress`];
//! while it runs, [`AnimatedSwitcher::is_transitioning`] tells input handlers
//! to hold off.

use serde::{Deserialize, Serialize};

use crate::widget::{Event, WidgetId};

/// Visual style of a switcher transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitcherTransition {
    #[default]
    FadeOnly,
    Horizontal,
    Vertical,
    Zoom,
}

/// Easing applied to transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCurve {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    #[default]
    CubicInOut,
}

impl TransitionCurve {
    /// Map linear progress `t` in 0.0..=1.0 onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TransitionCurve::Linear => t,
            TransitionCurve::QuadIn => t * t,
            TransitionCurve::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            TransitionCurve::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            TransitionCurve::CubicIn => t * t * t,
            TransitionCurve::CubicOut => 1.0 - (1.0 - t).powi(3),
            TransitionCurve::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Default transition length in seconds.
pub const DEFAULT_TRANSITION_DURATION: f32 = 0.4;

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: usize,
    elapsed: f32,
}

#[derive(Debug)]
pub struct AnimatedSwitcher {
    id: WidgetId,
    children: Vec<WidgetId>,
    active_index: usize,
    transition_type: SwitcherTransition,
    transition_curve: TransitionCurve,
    transition_duration: f32,
    instant_transition: bool,
    transition: Option<Transition>,
    on_active_widget_index_changed: Event<(WidgetId, usize)>,
    on_transitioning_changed: Event<bool>,
}

impl AnimatedSwitcher {
    pub fn new(id: WidgetId) -> Self {
        Self {
            id,
            children: Vec::new(),
            active_index: 0,
            transition_type: SwitcherTransition::default(),
            transition_curve: TransitionCurve::default(),
            transition_duration: DEFAULT_TRANSITION_DURATION,
            instant_transition: false,
            transition: None,
            on_active_widget_index_changed: Event::new(),
            on_transitioning_changed: Event::new(),
        }
    }

    pub fn with_transition(
        mut self,
        transition_type: SwitcherTransition,
        curve: TransitionCurve,
        duration: f32,
    ) -> Self {
        debug_assert!(duration >= 0.0, "transition duration must be non-negative");
        self.transition_type = transition_type;
        self.transition_curve = curve;
        self.transition_duration = duration.max(0.0);
        self
    }

    // ── Children ───────────────────────────────────────────────────────────

    /// Append a child. Returns false if it is already present.
    pub fn add_child(&mut self, child: WidgetId) -> bool {
        if self.children.contains(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Remove a child. Returns false if it was not present.
    ///
    /// Removing the active child activates its successor (or the new last
    /// child) without a transition.
    pub fn remove_child(&mut self, child: WidgetId) -> bool {
        let Some(index) = self.children.iter().position(|c| *c == child) else {
            return false;
        };
        self.children.remove(index);
        self.finish_transition();

        if index < self.active_index {
            self.active_index -= 1;
        } else if index == self.active_index {
            self.active_index = self.active_index.min(self.children.len().saturating_sub(1));
            if let Some(&widget) = self.children.get(self.active_index) {
                self.on_active_widget_index_changed
                    .broadcast(&(widget, self.active_index));
            }
        }
        true
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_widgets(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn index_of(&self, child: WidgetId) -> Option<usize> {
        self.children.iter().position(|c| *c == child)
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn active_widget_index(&self) -> usize {
        self.active_index
    }

    pub fn active_widget(&self) -> Option<WidgetId> {
        self.children.get(self.active_index).copied()
    }

    /// Make the child at `index` active. Out-of-range indices are ignored.
    pub fn set_active_widget_index(&mut self, index: usize) {
        if index >= self.children.len() || index == self.active_index {
            return;
        }

        let from = self.active_index;
        self.active_index = index;

        if self.instant_transition || self.transition_duration <= 0.0 {
            self.finish_transition();
        } else {
            let was_transitioning = self.transition.is_some();
            self.transition = Some(Transition { from, elapsed: 0.0 });
            if !was_transitioning {
                self.on_transitioning_changed.broadcast(&true);
            }
        }

        log::debug!(
            "Switcher {} active index {} -> {} ({:?})",
            self.id,
            from,
            index,
            self.transition_type
        );
        self.on_active_widget_index_changed
            .broadcast(&(self.children[index], index));
    }

    /// Make `child` active. Unknown widgets are ignored.
    pub fn set_active_widget(&mut self, child: WidgetId) {
        match self.index_of(child) {
            Some(index) => self.set_active_widget_index(index),
            None => log::debug!("Switcher {} has no child {}", self.id, child),
        }
    }

    pub fn activate_next_widget(&mut self, can_wrap: bool) {
        if self.children.is_empty() {
            return;
        }
        if self.active_index + 1 < self.children.len() {
            self.set_active_widget_index(self.active_index + 1);
        } else if can_wrap {
            self.set_active_widget_index(0);
        }
    }

    pub fn activate_previous_widget(&mut self, can_wrap: bool) {
        if self.children.is_empty() {
            return;
        }
        if self.active_index > 0 {
            self.set_active_widget_index(self.active_index - 1);
        } else if can_wrap {
            self.set_active_widget_index(self.children.len() - 1);
        }
    }

    // ── Transition ─────────────────────────────────────────────────────────

    /// Skip animation for future changes; a running transition completes at once.
    pub fn set_disable_transition_animation(&mut self, disable: bool) {
        self.instant_transition = disable;
        if disable {
            self.finish_transition();
        }
    }

    /// Advance a running transition by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition.elapsed += delta.max(0.0);
        if transition.elapsed >= self.transition_duration {
            self.finish_transition();
        }
    }

    fn finish_transition(&mut self) {
        if self.transition.take().is_some() {
            self.on_transitioning_changed.broadcast(&false);
        }
    }

    /// True while a transition runs; input should be ignored meanwhile.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Eased progress of the running transition, 1.0 when idle.
    pub fn transition_progress(&self) -> f32 {
        match self.transition {
            Some(transition) => self
                .transition_curve
                .apply(transition.elapsed / self.transition_duration),
            None => 1.0,
        }
    }

    /// The child being transitioned away from.
    pub fn outgoing_widget(&self) -> Option<WidgetId> {
        self.transition
            .and_then(|transition| self.children.get(transition.from).copied())
    }

    pub fn transition_type(&self) -> SwitcherTransition {
        self.transition_type
    }

    pub fn transition_curve(&self) -> TransitionCurve {
        self.transition_curve
    }

    pub fn transition_duration(&self) -> f32 {
        self.transition_duration
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    // ── Events ─────────────────────────────────────────────────────────────

    /// Fired with `(widget, index)` whenever the active child changes.
    pub fn on_active_widget_index_changed(&mut self) -> &mut Event<(WidgetId, usize)> {
        &mut self.on_active_widget_index_changed
    }

    pub fn on_transitioning_changed(&mut self) -> &mut Event<bool> {
        &mut self.on_transitioning_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn switcher_with(children: &[WidgetId]) -> AnimatedSwitcher {
        let mut switcher = AnimatedSwitcher::new(100);
        for &child in children {
            switcher.add_child(child);
        }
        switcher
    }

    #[test]
    fn test_curve_endpoints() {
        let curves = [
            TransitionCurve::Linear,
            TransitionCurve::QuadIn,
            TransitionCurve::QuadOut,
            TransitionCurve::QuadInOut,
            TransitionCurve::CubicIn,
            TransitionCurve::CubicOut,
            TransitionCurve::CubicInOut,
        ];
        for curve in curves {
            assert_eq!(curve.apply(0.0), 0.0, "{:?}", curve);
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", curve);
        }
        assert!(TransitionCurve::QuadIn.apply(0.5) < 0.5);
        assert!(TransitionCurve::QuadOut.apply(0.5) > 0.5);
    }

    #[test]
    fn test_add_and_remove_children() {
        let mut switcher = switcher_with(&[1, 2]);
        assert!(!switcher.add_child(1));
        assert_eq!(switcher.child_count(), 2);
        assert!(switcher.has_widgets());
        assert_eq!(switcher.active_widget(), Some(1));

        assert!(switcher.remove_child(1));
        assert!(!switcher.remove_child(1));
        assert_eq!(switcher.active_widget(), Some(2));
        assert!(switcher.remove_child(2));
        assert!(!switcher.has_widgets());
        assert_eq!(switcher.active_widget(), None);
    }

    #[test]
    fn test_set_index_fires_event_and_transitions() {
        let mut switcher = switcher_with(&[10, 20, 30]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        switcher
            .on_active_widget_index_changed()
            .add(move |change| sink.borrow_mut().push(*change));

        switcher.set_active_widget_index(2);
        assert_eq!(*seen.borrow(), vec![(30, 2)]);
        assert!(switcher.is_transitioning());
        assert_eq!(switcher.outgoing_widget(), Some(10));
        assert_eq!(switcher.transition_progress(), 0.0);

        switcher.tick(0.25);
        assert!(switcher.is_transitioning());
        switcher.tick(0.25);
        assert!(!switcher.is_transitioning());
        assert_eq!(switcher.transition_progress(), 1.0);
    }

    #[test]
    fn test_out_of_range_and_same_index_ignored() {
        let mut switcher = switcher_with(&[10, 20]);
        switcher.set_active_widget_index(5);
        assert_eq!(switcher.active_widget_index(), 0);
        switcher.set_active_widget_index(0);
        assert!(!switcher.is_transitioning());
    }

    #[test]
    fn test_instant_transition() {
        let mut switcher = switcher_with(&[10, 20]);
        switcher.set_disable_transition_animation(true);
        switcher.set_active_widget(20);
        assert_eq!(switcher.active_widget(), Some(20));
        assert!(!switcher.is_transitioning());

        let mut zero = AnimatedSwitcher::new(1).with_transition(
            SwitcherTransition::Horizontal,
            TransitionCurve::Linear,
            0.0,
        );
        zero.add_child(1);
        zero.add_child(2);
        zero.set_active_widget_index(1);
        assert!(!zero.is_transitioning());
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut switcher = switcher_with(&[1, 2, 3]);
        switcher.set_disable_transition_animation(true);

        switcher.activate_previous_widget(false);
        assert_eq!(switcher.active_widget_index(), 0);
        switcher.activate_previous_widget(true);
        assert_eq!(switcher.active_widget_index(), 2);
        switcher.activate_next_widget(false);
        assert_eq!(switcher.active_widget_index(), 2);
        switcher.activate_next_widget(true);
        assert_eq!(switcher.active_widget_index(), 0);
    }

    #[test]
    fn test_transitioning_event() {
        let mut switcher = switcher_with(&[1, 2]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        switcher
            .on_transitioning_changed()
            .add(move |state| sink.borrow_mut().push(*state));

        switcher.set_active_widget_index(1);
        switcher.tick(1.0);
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_transition_settings_yaml() {
        let transition: SwitcherTransition = serde_yaml_ng::from_str("vertical").unwrap();
        assert_eq!(transition, SwitcherTransition::Vertical);
        let curve: TransitionCurve = serde_yaml_ng::from_str("quad_in_out").unwrap();
        assert_eq!(curve, TransitionCurve::QuadInOut);
    }
}
