//! Overscroll rendering
//!
//! The surface's native scroll position cannot leave `[0, max]`, so the part
//! of the simulated position beyond an edge is shown as a transform on top of
//! the native scroll. Differences of a unit or less are rounding noise and are
//! dropped, so a surface at rest never carries a stray sub-pixel translate.

use flick_core::geometry::Point;

/// Visual correction applied on top of the native scroll position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverscrollOffset {
    pub dx: f64,
    pub dy: f64,
}

impl OverscrollOffset {
    pub const ZERO: OverscrollOffset = OverscrollOffset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Maps simulator position to an [`OverscrollOffset`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverscrollRenderer {
    /// Per-axis differences at or below this are suppressed
    threshold: f64,
}

impl Default for OverscrollRenderer {
    fn default() -> Self {
        Self { threshold: 1.0 }
    }
}

impl OverscrollRenderer {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.abs(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compute the offset for a simulator position and the native position,
    /// both in native coordinates
    pub fn render(&self, simulator: Point, native: Point) -> OverscrollOffset {
        OverscrollOffset {
            dx: self.axis(simulator.x, native.x),
            dy: self.axis(simulator.y, native.y),
        }
    }

    fn axis(&self, simulator: f64, native: f64) -> f64 {
        let d = native - simulator;
        if d.abs() > self.threshold {
            d
        } else {
            0.0
        }
    }
}
