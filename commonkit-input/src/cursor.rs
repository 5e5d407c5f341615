//! Cursor position tracking.
//!
//! Requested positions are clamped to the viewport and only applied when the
//! whole-pixel position actually changes (or the move is forced), so
//! sub-pixel jitter from a synthesized cursor never produces redundant moves.

/// Viewport rectangle in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "viewport size must be non-negative");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamp a position into the viewport rectangle.
    ///
    /// A negative extent spans back from the origin and a NaN extent collapses
    /// to the origin. A NaN origin leaves that coordinate untouched.
    pub fn clamp(&self, position: (f64, f64)) -> (f64, f64) {
        (
            clamp_axis(position.0, self.x, self.width),
            clamp_axis(position.1, self.y, self.height),
        )
    }
}

fn clamp_axis(value: f64, origin: f64, extent: f64) -> f64 {
    let end = origin + extent;
    let (low, high) = (origin.min(end), origin.max(end));
    if low <= high {
        value.clamp(low, high)
    } else {
        value
    }
}

#[derive(Debug, Clone, Default)]
pub struct CursorState {
    position: (f64, f64),
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Move the cursor toward `position`, clamped to `viewport` when known.
    ///
    /// Returns true if the cursor moved.
    pub fn update(
        &mut self,
        position: (f64, f64),
        force: bool,
        viewport: Option<&Viewport>,
    ) -> bool {
        let clamped = match viewport {
            Some(viewport) => viewport.clamp(position),
            None => position,
        };

        let old = (self.position.0 as i64, self.position.1 as i64);
        let new = (clamped.0 as i64, clamped.1 as i64);
        if force || old != new {
            log::trace!("Cursor moved to ({:.1}, {:.1})", clamped.0, clamped.1);
            self.position = clamped;
            true
        } else {
            false
        }
    }
}
