//! Scroll boundaries
//!
//! Simulator space puts the top-left edge at `0` and scrolls content toward
//! negative offsets. The boundaries are the most negative offsets the content
//! may rest at, so they are always `<= 0`.

use flick_core::geometry::{finite_or_zero, Point, Size};

/// Most negative permissible scroll offset per axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Boundaries {
    /// Right edge (`<= 0`)
    pub right_boundary: f64,
    /// Bottom edge (`<= 0`)
    pub bottom_boundary: f64,
}

impl Boundaries {
    /// Boundaries of content that fits its viewport on both axes
    pub const NONE: Boundaries = Boundaries {
        right_boundary: 0.0,
        bottom_boundary: 0.0,
    };

    /// Compute boundaries from the viewport bounding box and content extent
    ///
    /// `right = min(0, width - scroll_width)`,
    /// `bottom = min(0, height - scroll_height)`.
    pub fn calculate(viewport: Size, content: Size) -> Self {
        Self {
            right_boundary: edge(viewport.width, content.width),
            bottom_boundary: edge(viewport.height, content.height),
        }
    }

    /// Check whether an offset lies inside `[boundary, 0]` on both axes
    pub fn contains(&self, offset: Point) -> bool {
        (self.right_boundary..=0.0).contains(&offset.x)
            && (self.bottom_boundary..=0.0).contains(&offset.y)
    }

    /// Clamp an offset into `[boundary, 0]` on both axes
    pub fn clamp(&self, offset: Point) -> Point {
        Point::new(
            offset.x.clamp(self.right_boundary, 0.0),
            offset.y.clamp(self.bottom_boundary, 0.0),
        )
    }

    /// Largest native scroll position (`scrollLeft`, `scrollTop`)
    pub fn max_native(&self) -> Point {
        Point::new(-self.right_boundary, -self.bottom_boundary)
    }
}

fn edge(viewport: f64, content: f64) -> f64 {
    (finite_or_zero(viewport) - finite_or_zero(content)).min(0.0)
}
