//! Headless scroll surface
//!
//! An in-memory [`ScrollHost`](crate::ScrollHost) that clamps its native
//! scroll position like a browser scroll container and records the most
//! recently applied overscroll offsets. Used for replaying gesture scenarios
//! and in tests.

use flick_core::geometry::{finite_or_zero, Point, Size};

use crate::boundary::Boundaries;
use crate::host::{OverscrollSink, ScrollMeasure};
use crate::overscroll::OverscrollOffset;

/// Applied offsets retained by a [`HeadlessSurface`]
pub const APPLIED_HISTORY: usize = 256;

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    viewport: Size,
    content: Size,
    native: Point,
    overscroll: OverscrollOffset,
    applied: Vec<OverscrollOffset>,
    fit_to_container: bool,
}

impl HeadlessSurface {
    pub fn new(viewport: Size, content: Size) -> Self {
        Self {
            viewport,
            content,
            native: Point::ZERO,
            overscroll: OverscrollOffset::ZERO,
            applied: Vec::new(),
            fit_to_container: false,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn content(&self) -> Size {
        self.content
    }

    /// Resize the viewport, re-clamping the native position
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.clamp_native();
    }

    /// Replace the content extent, re-clamping the native position
    pub fn set_content(&mut self, content: Size) {
        self.content = content;
        self.clamp_native();
    }

    /// Currently applied overscroll transform
    pub fn overscroll(&self) -> OverscrollOffset {
        self.overscroll
    }

    /// Recently applied offsets, oldest first, at most [`APPLIED_HISTORY`]
    pub fn applied_offsets(&self) -> &[OverscrollOffset] {
        &self.applied
    }

    pub fn fit_to_container(&self) -> bool {
        self.fit_to_container
    }

    fn clamp_native(&mut self) {
        let max = Boundaries::calculate(self.viewport, self.content).max_native();
        self.native = Point::new(
            finite_or_zero(self.native.x).clamp(0.0, max.x),
            finite_or_zero(self.native.y).clamp(0.0, max.y),
        );
    }
}

impl ScrollMeasure for HeadlessSurface {
    fn bounding_box(&self) -> Size {
        self.viewport
    }

    fn content_extent(&self) -> Size {
        self.content
    }

    fn native_scroll_position(&self) -> Point {
        self.native
    }

    fn set_native_scroll_position(&mut self, x: f64, y: f64) {
        self.native = Point::new(x, y);
        self.clamp_native();
    }
}

impl OverscrollSink for HeadlessSurface {
    fn apply_overscroll(&mut self, offset: OverscrollOffset) {
        self.overscroll = offset;
        if self.applied.len() == APPLIED_HISTORY {
            self.applied.drain(..APPLIED_HISTORY / 2);
        }
        self.applied.push(offset);
    }

    fn set_fit_to_container(&mut self, fit: bool) {
        self.fit_to_container = fit;
    }
}
