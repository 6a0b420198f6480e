//! Gesture events
//!
//! The input layer normalizes raw touch and mouse input into [`GestureEvent`]
//! values. A scroller consumes each one synchronously and answers with an
//! [`EventResult`] telling the input layer whether to suppress default handling.

use crate::geometry::finite_or_zero;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Drag threshold crossed (pointer down + move)
    pub const DRAG_START: EventType = 1;
    pub const DRAG: EventType = 2;
    /// Pointer released after a drag
    pub const DRAG_FINISH: EventType = 3;
    /// Fast release interpreted as a velocity impulse
    pub const FLICK: EventType = 4;
    /// Press and hold without movement
    pub const HOLD: EventType = 5;
    pub const WHEEL: EventType = 6;
    /// Programmatic or external stop request
    pub const STOP: EventType = 10;
    /// Kinetic motion came to rest
    pub const SETTLED: EventType = 11;
    /// Kinetic motion crossed a boundary
    pub const HIT_EDGE: EventType = 12;
}

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Dominant axis of a 2D vector
    ///
    /// The component with the strictly larger magnitude wins; ties resolve to
    /// vertical, the default touch scrolling axis.
    pub fn dominant(x: f64, y: f64) -> Axis {
        if x.abs() > y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

/// A gesture delivered by the input layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A drag began. `x`/`y` is the displacement that crossed the drag
    /// threshold; its dominant axis is the axis the drag requests.
    DragStart { x: f64, y: f64 },
    /// Incremental displacement since the previous drag event
    Drag { dx: f64, dy: f64 },
    DragFinish,
    /// Release velocity in units per second
    Flick { velocity_x: f64, velocity_y: f64 },
    Hold,
    /// Wheel delta in native scroll direction (positive scrolls toward the end)
    Wheel { delta_x: f64, delta_y: f64 },
}

impl GestureEvent {
    /// Get the event type identifier used for state transitions
    pub fn event_type(&self) -> EventType {
        use event_types::*;
        match self {
            GestureEvent::DragStart { .. } => DRAG_START,
            GestureEvent::Drag { .. } => DRAG,
            GestureEvent::DragFinish => DRAG_FINISH,
            GestureEvent::Flick { .. } => FLICK,
            GestureEvent::Hold => HOLD,
            GestureEvent::Wheel { .. } => WHEEL,
        }
    }

    /// Replace non-finite payload values with zero
    pub fn sanitized(self) -> Self {
        match self {
            GestureEvent::DragStart { x, y } => GestureEvent::DragStart {
                x: finite_or_zero(x),
                y: finite_or_zero(y),
            },
            GestureEvent::Drag { dx, dy } => GestureEvent::Drag {
                dx: finite_or_zero(dx),
                dy: finite_or_zero(dy),
            },
            GestureEvent::Flick {
                velocity_x,
                velocity_y,
            } => GestureEvent::Flick {
                velocity_x: finite_or_zero(velocity_x),
                velocity_y: finite_or_zero(velocity_y),
            },
            GestureEvent::Wheel { delta_x, delta_y } => GestureEvent::Wheel {
                delta_x: finite_or_zero(delta_x),
                delta_y: finite_or_zero(delta_y),
            },
            other => other,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            GestureEvent::DragStart { .. } => "drag_start",
            GestureEvent::Drag { .. } => "drag",
            GestureEvent::DragFinish => "drag_finish",
            GestureEvent::Flick { .. } => "flick",
            GestureEvent::Hold => "hold",
            GestureEvent::Wheel { .. } => "wheel",
        }
    }
}

/// Outcome of delivering a gesture to a consumer
///
/// Claiming is exclusive: once a consumer returns [`EventResult::Claimed`] no
/// other consumer may act on the same event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResult {
    /// The event was handled and its native default must be suppressed
    Claimed {
        /// Ancestor gesture handlers must not see the event
        stop_propagation: bool,
        /// A pending tap must not be recognized for this pointer sequence
        prevent_tap: bool,
    },
    /// Not handled; native and ancestor handling proceed
    PassThrough,
}

impl EventResult {
    /// Claimed, stopping propagation
    pub const CLAIMED: EventResult = EventResult::Claimed {
        stop_propagation: true,
        prevent_tap: false,
    };

    /// Claimed, but ancestors still see the event
    pub const CLAIMED_PROPAGATING: EventResult = EventResult::Claimed {
        stop_propagation: false,
        prevent_tap: false,
    };

    /// Create a claimed result
    pub fn claimed(stop_propagation: bool) -> Self {
        EventResult::Claimed {
            stop_propagation,
            prevent_tap: false,
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, EventResult::Claimed { .. })
    }

    pub fn stops_propagation(&self) -> bool {
        matches!(
            self,
            EventResult::Claimed {
                stop_propagation: true,
                ..
            }
        )
    }

    pub fn prevents_tap(&self) -> bool {
        matches!(
            self,
            EventResult::Claimed {
                prevent_tap: true,
                ..
            }
        )
    }
}
