//! Physics simulator port
//!
//! The interface a [`TouchScroller`](crate::TouchScroller) drives. The
//! simulator owns the authoritative scroll position and all continuous-time
//! integration (friction, edge springs); the scroller only feeds it input and
//! reads the position back.
//!
//! Coordinates are content offsets: `0` at the top/left edge, the
//! [`Boundaries`] value at the bottom/right edge. Offsets above `0` or below
//! the boundary are overscroll.
//!
//! # Convergence
//!
//! Implementations must guarantee that overshoot beyond `[boundary, 0]` is
//! bounded and decays, and that [`ScrollSimulator::is_active`] becomes false
//! within a finite number of [`ScrollSimulator::advance`] calls after the last
//! impulse. The scroller relies on this to stop requesting frames; it does not
//! cap the number of ticks itself.

use flick_core::geometry::Point;

use crate::boundary::Boundaries;
use crate::orientation::ResolvedAxes;

/// Kinetic scroll simulation driven by a gesture state machine
pub trait ScrollSimulator {
    /// Whether the simulation is moving (or being dragged)
    fn is_active(&self) -> bool;

    /// Whether the position is currently outside the boundaries
    fn is_overscrolling(&self) -> bool;

    /// A drag began at displacement `(x, y)` from the pointer-down point
    ///
    /// Any running motion stops.
    fn begin_drag(&mut self, x: f64, y: f64);

    /// Apply incremental drag displacement
    fn update_drag(&mut self, dx: f64, dy: f64);

    /// The pointer was released; start settling (snap-back if overscrolled)
    fn end_drag(&mut self);

    /// Apply a release velocity in units per second
    fn apply_flick(&mut self, velocity_x: f64, velocity_y: f64);

    /// Halt all motion, freezing the position
    fn stop(&mut self);

    /// Apply a wheel delta in native scroll direction
    ///
    /// Returns whether the delta was consumed (the surface had room to move).
    fn handle_wheel(&mut self, delta_x: f64, delta_y: f64) -> bool;

    /// Resynchronize the position after an external scroll
    fn set_position(&mut self, x: f64, y: f64);

    /// Current position
    fn position(&self) -> Point;

    /// Update the clamping range
    fn set_boundaries(&mut self, boundaries: Boundaries);

    /// Update which axes may move
    fn set_axes(&mut self, axes: ResolvedAxes);

    /// Advance the simulation by `dt` seconds
    ///
    /// Returns whether the simulation is still active afterwards.
    fn advance(&mut self, dt: f64) -> bool;
}
