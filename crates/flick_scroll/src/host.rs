//! Host surface capabilities
//!
//! A [`TouchScroller`](crate::TouchScroller) never measures layout or touches
//! a visual surface directly. It consumes measurement results through
//! [`ScrollMeasure`] and pushes overscroll transforms through
//! [`OverscrollSink`]. Anything implementing both is a [`ScrollHost`].

use flick_core::geometry::{Point, Size};

use crate::boundary::Boundaries;
use crate::overscroll::OverscrollOffset;

/// Layout and native scroll position of a scrollable surface
pub trait ScrollMeasure {
    /// Viewport size
    fn bounding_box(&self) -> Size;

    /// Full content extent (`scrollWidth`, `scrollHeight`)
    fn content_extent(&self) -> Size;

    /// Native scroll position (`scrollLeft`, `scrollTop`), always inside
    /// `[0, content - viewport]`
    fn native_scroll_position(&self) -> Point;

    /// Set the native scroll position
    ///
    /// The surface clamps out-of-range values the way a native scroll
    /// container does.
    fn set_native_scroll_position(&mut self, x: f64, y: f64);
}

/// Receives visual transforms
pub trait OverscrollSink {
    /// Apply the overscroll transform on top of the native scroll
    fn apply_overscroll(&mut self, offset: OverscrollOffset);

    /// Size the scroll container to its parent
    fn set_fit_to_container(&mut self, _fit: bool) {}
}

/// A surface the scroller can drive
pub trait ScrollHost: ScrollMeasure + OverscrollSink {}

impl<T: ScrollMeasure + OverscrollSink> ScrollHost for T {}

/// Native scroll extents plus the current overscroll
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollBounds {
    /// Native scroll left
    pub left: f64,
    /// Native scroll top
    pub top: f64,
    /// Largest native scroll left
    pub max_left: f64,
    /// Largest native scroll top
    pub max_top: f64,
    /// Viewport width
    pub width: f64,
    /// Viewport height
    pub height: f64,
    /// Horizontal overscroll, whole units (negative past the left edge)
    pub over_left: f64,
    /// Vertical overscroll, whole units (negative past the top edge)
    pub over_top: f64,
}

impl ScrollBounds {
    /// Build bounds from measurements and the simulator position
    pub fn measure(viewport: Size, boundaries: Boundaries, native: Point, simulator: Point) -> Self {
        let max = boundaries.max_native();
        Self {
            left: native.x,
            top: native.y,
            max_left: max.x,
            max_top: max.y,
            width: viewport.width,
            height: viewport.height,
            over_left: -(native.x + simulator.x).floor(),
            over_top: -(native.y + simulator.y).floor(),
        }
    }

    pub fn is_overscrolled(&self) -> bool {
        self.over_left != 0.0 || self.over_top != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundaries() -> Boundaries {
        Boundaries::calculate(Size::new(300.0, 200.0), Size::new(300.0, 500.0))
    }

    #[test]
    fn test_bounds_at_rest() {
        let bounds = ScrollBounds::measure(
            Size::new(300.0, 200.0),
            boundaries(),
            Point::new(0.0, 120.0),
            Point::new(0.0, -120.0),
        );
        assert_eq!(bounds.top, 120.0);
        assert_eq!(bounds.max_top, 300.0);
        assert_eq!(bounds.max_left, 0.0);
        assert_eq!(bounds.height, 200.0);
        assert_eq!(bounds.over_top, 0.0);
        assert!(!bounds.is_overscrolled());
    }

    #[test]
    fn test_bounds_report_overscroll() {
        // Pulled 25.4 past the top
        let top = ScrollBounds::measure(
            Size::new(300.0, 200.0),
            boundaries(),
            Point::ZERO,
            Point::new(0.0, 25.4),
        );
        assert_eq!(top.over_top, -25.0);

        // Pushed 10 past the bottom
        let bottom = ScrollBounds::measure(
            Size::new(300.0, 200.0),
            boundaries(),
            Point::new(0.0, 300.0),
            Point::new(0.0, -310.0),
        );
        assert_eq!(bottom.over_top, 10.0);
        assert!(bottom.is_overscrolled());
    }
}
