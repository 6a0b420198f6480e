//! Scroll notifications

use flick_core::geometry::Point;

/// Motion notifications emitted by a [`TouchScroller`](crate::TouchScroller)
///
/// Positions are native scroll coordinates of the simulated position, so
/// they may leave `[0, max]` while overscrolled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// Motion began (drag, flick or wheel)
    Start { position: Point },
    /// The position changed
    Scroll { position: Point },
    /// Motion ended and the surface is at rest
    Stop { position: Point },
}

impl ScrollEvent {
    pub fn position(&self) -> Point {
        match self {
            ScrollEvent::Start { position }
            | ScrollEvent::Scroll { position }
            | ScrollEvent::Stop { position } => *position,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScrollEvent::Start { .. } => "scroll-start",
            ScrollEvent::Scroll { .. } => "scroll",
            ScrollEvent::Stop { .. } => "scroll-stop",
        }
    }
}

/// Callback receiving [`ScrollEvent`]s
pub type ScrollListener = Box<dyn FnMut(&ScrollEvent)>;
