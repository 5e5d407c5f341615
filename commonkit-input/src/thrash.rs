//! Input method thrash detection.
//!
//! Alternating signals from two devices (a resting gamepad stick and a
//! jittering mouse, for example) would otherwise flip the UI between layouts
//! every frame. The detector counts accepted changes that land within
//! `window` seconds of the previous one; once the count exceeds `limit`,
//! every change is suppressed until `window` seconds have passed since
//! thrashing began.

use commonkit_config::ThrashConfig;

/// Decision for a single attempted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrashVerdict {
    Accept,
    Suppress,
}

#[derive(Debug, Clone)]
pub struct ThrashDetector {
    enabled: bool,
    limit: u32,
    window: f64,
    /// Consecutive changes that each followed the previous one within `window`
    recent_changes: u32,
    last_change_time: Option<f64>,
    thrash_began: Option<f64>,
}

impl ThrashDetector {
    /// Create a detector that tolerates `limit` rapid changes per `window` seconds.
    pub fn new(limit: u32, window: f64) -> Self {
        debug_assert!(limit >= 1, "thrash limit must be at least 1");
        debug_assert!(window > 0.0, "thrash window must be positive");
        Self {
            enabled: true,
            limit,
            window,
            recent_changes: 0,
            last_change_time: None,
            thrash_began: None,
        }
    }

    pub fn from_config(config: &ThrashConfig) -> Self {
        let mut detector = Self::new(config.limit, config.window_seconds);
        detector.enabled = config.enabled;
        detector
    }

    /// A detector that accepts every change.
    pub fn disabled() -> Self {
        let mut detector = Self::new(1, 1.0);
        detector.enabled = false;
        detector
    }

    /// Account for a change attempted at `now` (seconds).
    pub fn record_change(&mut self, now: f64) -> ThrashVerdict {
        if !self.enabled {
            return ThrashVerdict::Accept;
        }

        if !now.is_finite() {
            return self.record_untimed_change();
        }

        if self.is_thrashing(now) {
            return ThrashVerdict::Suppress;
        }
        self.expire(now);

        match self.last_change_time {
            Some(last) if now - last < self.window => {
                self.recent_changes += 1;
                if self.recent_changes > self.limit {
                    log::warn!(
                        "Input method thrashing detected ({} changes within {:.2}s), suppressing changes",
                        self.recent_changes,
                        self.window
                    );
                    self.thrash_began = Some(now);
                    self.recent_changes = 0;
                    return ThrashVerdict::Suppress;
                }
            }
            _ => self.recent_changes = 0,
        }

        self.last_change_time = Some(now);
        ThrashVerdict::Accept
    }

    /// A change without a usable timestamp counts as rapid and never ends
    /// a thrash window.
    fn record_untimed_change(&mut self) -> ThrashVerdict {
        log::warn!("Input method change at a non-finite time, treating it as rapid");
        if self.thrash_began.is_some() {
            return ThrashVerdict::Suppress;
        }
        self.recent_changes = self.recent_changes.saturating_add(1);
        if self.recent_changes > self.limit {
            ThrashVerdict::Suppress
        } else {
            ThrashVerdict::Accept
        }
    }

    /// True while a thrash window that began less than `window` seconds ago is open.
    pub fn is_thrashing(&self, now: f64) -> bool {
        self.thrash_began
            .is_some_and(|began| now - began < self.window)
    }

    /// Leave the thrashing state once its window has elapsed.
    ///
    /// Returns true if thrashing ended on this call.
    pub fn expire(&mut self, now: f64) -> bool {
        match self.thrash_began {
            Some(began) if now - began >= self.window => {
                log::info!("Input method thrashing ended after {:.2}s", now - began);
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Forget all history.
    pub fn reset(&mut self) {
        self.recent_changes = 0;
        self.last_change_time = None;
        self.thrash_began = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> f64 {
        self.window
    }
}

impl Default for ThrashDetector {
    fn default() -> Self {
        Self::from_config(&ThrashConfig::default())
    }
}
