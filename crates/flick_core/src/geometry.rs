//! Geometry primitives
//!
//! Scrolling works in surface units (CSS-pixel-like) with `f64` precision so
//! sub-pixel simulator output survives until the renderer rounds it.

use serde::{Deserialize, Serialize};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both coordinates to the nearest whole unit
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Negate both coordinates
    ///
    /// Converts between simulator space (content offset, `<= 0` inside bounds)
    /// and native scroll space (`scrollLeft`/`scrollTop`, `>= 0`).
    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Replace a non-finite value with zero
///
/// Input layers occasionally deliver NaN or infinite deltas (division by a
/// zero time step, device glitches). Those are treated as no displacement.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
