//! Kinetic scroll simulator
//!
//! The default [`ScrollSimulator`]: webkit-style momentum with spring-based
//! edge bounce, similar to iOS/macOS native scroll behavior.
//!
//! # Features
//!
//! - **Rubber-band drag**: Past an edge, drag deltas are damped more the
//!   further the content is stretched
//! - **Momentum**: Flick velocity decays linearly under constant deceleration
//! - **Edge bounce**: Crossing an edge hands the remaining velocity to a stiff
//!   spring that returns the content to the edge
//! - **Animated wheel**: Wheel deltas glide to their target with a short spring
//! - **FSM-based state**: Idle, Dragging, Decelerating, Bouncing

use flick_animation::{Spring, SpringConfig};
use flick_core::events::event_types::*;
use flick_core::fsm::{StateCell, StateTransitions};
use flick_core::geometry::{finite_or_zero, Point};
use serde::{Deserialize, Serialize};

use crate::boundary::Boundaries;
use crate::orientation::ResolvedAxes;
use crate::simulator::ScrollSimulator;

/// Displacement at which an edge spring counts as settled
const SPRING_REST_DELTA: f64 = 0.1;
/// Speed at which an edge spring counts as settled
const SPRING_REST_SPEED: f64 = 1.0;
/// Overscroll smaller than this is rounding noise, not a real excursion
const OVERSCROLL_EPSILON: f64 = 1e-6;
/// Drag resistance at full stretch
const MIN_DRAG_RESISTANCE: f64 = 0.1;

// ============================================================================
// Configuration
// ============================================================================

/// Tuning for the kinetic simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticConfig {
    /// Momentum deceleration in units/second²
    pub deceleration: f64,
    /// Momentum stops below this speed (units/second)
    pub velocity_threshold: f64,
    /// Flick velocities are clamped to this speed (units/second)
    pub max_velocity: f64,
    /// Fraction of a drag delta applied when first stretching past an edge
    pub drag_resistance: f64,
    /// Largest drag overscroll distance in units
    pub max_overscroll: f64,
    /// Spring returning overscrolled content to the edge
    pub bounce_spring: SpringConfig,
    /// Spring gliding to a wheel target
    pub wheel_spring: SpringConfig,
}

impl Default for KineticConfig {
    fn default() -> Self {
        Self {
            deceleration: 1500.0,
            velocity_threshold: 10.0,
            max_velocity: 6000.0,
            drag_resistance: 0.55,
            max_overscroll: 150.0,
            bounce_spring: SpringConfig::snappy(),
            // Critically damped: glides onto the target without overshoot
            wheel_spring: SpringConfig::new(400.0, 40.0, 1.0),
        }
    }
}

// ============================================================================
// State
// ============================================================================

/// Simulator phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KineticPhase {
    #[default]
    Idle,
    /// Position follows drag deltas
    Dragging,
    /// Momentum or wheel glide inside bounds
    Decelerating,
    /// At least one axis is springing back to an edge
    Bouncing,
}

impl KineticPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, KineticPhase::Idle)
    }
}

impl StateTransitions for KineticPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use KineticPhase::*;
        match (self, event) {
            (Idle | Decelerating | Bouncing, DRAG_START) => Some(Dragging),
            (Dragging, DRAG_FINISH) => Some(Decelerating),
            (Idle | Decelerating, FLICK) => Some(Decelerating),
            (Idle | Decelerating | Bouncing, WHEEL) => Some(Decelerating),
            (Dragging | Decelerating, HIT_EDGE) => Some(Bouncing),
            (Decelerating | Bouncing, SETTLED) => Some(Idle),
            (Dragging | Decelerating | Bouncing, STOP) => Some(Idle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpringKind {
    /// Returning overscrolled content to an edge
    Edge,
    /// Gliding to a wheel target inside bounds
    Wheel,
}

/// Motion along one axis
#[derive(Debug, Clone)]
struct AxisMotion {
    offset: f64,
    velocity: f64,
    /// Most negative resting offset (`<= 0`)
    boundary: f64,
    enabled: bool,
    spring: Option<(SpringKind, Spring)>,
}

impl AxisMotion {
    fn new() -> Self {
        Self {
            offset: 0.0,
            velocity: 0.0,
            boundary: 0.0,
            enabled: false,
            spring: None,
        }
    }

    /// Signed overscroll: positive past the top/left edge, negative past the
    /// bottom/right edge, zero inside bounds
    fn overscroll(&self) -> f64 {
        if self.offset > 0.0 {
            self.offset
        } else if self.offset < self.boundary {
            self.offset - self.boundary
        } else {
            0.0
        }
    }

    fn is_overscrolling(&self) -> bool {
        self.overscroll().abs() > OVERSCROLL_EPSILON
            || matches!(self.spring, Some((SpringKind::Edge, _)))
    }

    fn nearest_edge(&self) -> f64 {
        self.offset.clamp(self.boundary, 0.0)
    }

    fn is_moving(&self) -> bool {
        self.spring.is_some() || self.velocity != 0.0
    }

    /// Move the far edge, pulling any running spring target back into range
    fn set_boundary(&mut self, boundary: f64) {
        self.boundary = boundary.min(0.0);
        let (lower, offset) = (self.boundary, self.offset);
        if let Some((kind, spring)) = self.spring.as_mut() {
            let target = match kind {
                SpringKind::Wheel => spring.target().clamp(lower, 0.0),
                SpringKind::Edge => offset.clamp(lower, 0.0),
            };
            spring.set_target(target);
        }
    }

    fn halt(&mut self) {
        self.velocity = 0.0;
        self.spring = None;
    }

    /// Apply a drag delta with rubber-band resistance past the edges
    fn drag(&mut self, delta: f64, config: &KineticConfig) {
        if !self.enabled || delta == 0.0 {
            return;
        }
        let target = self.offset + delta;
        if (self.boundary..=0.0).contains(&target) {
            self.offset = target;
            return;
        }

        let edge = if target > 0.0 { 0.0 } else { self.boundary };
        let direction = if target > edge { 1.0 } else { -1.0 };
        let max_over = config.max_overscroll.max(0.0);

        let previous = ((self.offset - edge) * direction).max(0.0);
        let requested = (target - edge) * direction;

        let stretched = if requested > previous {
            // Resistance increases as we stretch further - natural rubber-band feel
            let ratio = if max_over > 0.0 {
                (previous / max_over).min(1.0)
            } else {
                1.0
            };
            let resistance =
                config.drag_resistance - ratio * (config.drag_resistance - MIN_DRAG_RESISTANCE);
            previous + (requested - previous) * resistance.max(0.0)
        } else {
            requested
        };

        self.offset = edge + direction * stretched.min(max_over);
    }

    /// Start an edge spring if the axis rests outside its bounds
    fn bounce_if_outside(&mut self, config: &KineticConfig) -> bool {
        if self.overscroll() == 0.0 {
            return false;
        }
        self.start_spring(SpringKind::Edge, self.nearest_edge(), config.bounce_spring);
        true
    }

    fn start_spring(&mut self, kind: SpringKind, target: f64, config: SpringConfig) {
        let mut spring = Spring::new(config, self.offset)
            .with_velocity(self.velocity)
            .with_rest(SPRING_REST_DELTA, SPRING_REST_SPEED);
        spring.set_target(target);
        self.velocity = 0.0;
        self.spring = Some((kind, spring));
    }

    /// One integration step. Returns true when an edge was hit this step.
    fn step(&mut self, dt: f64, config: &KineticConfig) -> bool {
        if let Some((_, spring)) = self.spring.as_mut() {
            spring.step(dt);
            self.offset = spring.value();
            if !spring.is_settled() {
                return false;
            }
            self.offset = spring.target();
            self.spring = None;
            // Target may predate a boundary change
            return self.bounce_if_outside(config);
        }

        if self.velocity == 0.0 {
            return self.bounce_if_outside(config);
        }

        // Apply velocity to position
        let next = self.offset + self.velocity * dt;

        // Apply deceleration (friction)
        let decel = config.deceleration * dt;
        if self.velocity > 0.0 {
            self.velocity = (self.velocity - decel).max(0.0);
        } else {
            self.velocity = (self.velocity + decel).min(0.0);
        }

        self.offset = next;

        // Hit edge - remaining velocity carries into the bounce spring
        if self.bounce_if_outside(config) {
            return true;
        }

        if self.velocity.abs() < config.velocity_threshold {
            self.velocity = 0.0;
        }
        false
    }
}

// ============================================================================
// Simulator
// ============================================================================

/// Default kinetic scroll simulator
#[derive(Debug, Clone)]
pub struct KineticScroll {
    x: AxisMotion,
    y: AxisMotion,
    phase: StateCell<KineticPhase>,
    config: KineticConfig,
}

impl Default for KineticScroll {
    fn default() -> Self {
        Self::new(KineticConfig::default())
    }
}

impl KineticScroll {
    /// Create a simulator with given config
    pub fn new(config: KineticConfig) -> Self {
        Self {
            x: AxisMotion::new(),
            y: AxisMotion::new(),
            phase: StateCell::default(),
            config,
        }
    }

    pub fn config(&self) -> &KineticConfig {
        &self.config
    }

    /// Current FSM phase
    pub fn phase(&self) -> KineticPhase {
        self.phase.get()
    }

    /// Current momentum velocity (units/second)
    pub fn velocity(&self) -> Point {
        Point::new(self.x.velocity, self.y.velocity)
    }

    /// Signed overscroll per axis (positive past the top/left edge)
    pub fn overscroll(&self) -> Point {
        Point::new(self.x.overscroll(), self.y.overscroll())
    }

    fn send(&mut self, event: u32) {
        self.phase.send(event);
    }

    fn halt_axes(&mut self) {
        self.x.halt();
        self.y.halt();
    }

    fn wheel_axis(axis: &mut AxisMotion, delta: f64, spring: SpringConfig) -> bool {
        if !axis.enabled || delta == 0.0 {
            return false;
        }
        // Accumulate onto an in-flight wheel glide
        let base = match &axis.spring {
            Some((SpringKind::Wheel, s)) => s.target(),
            _ => axis.offset,
        };
        // Native direction: positive scrolls toward the end, which is a more
        // negative content offset
        let target = (base - delta).clamp(axis.boundary, 0.0);
        if (target - base).abs() <= f64::EPSILON {
            return false;
        }
        axis.velocity = 0.0;
        axis.start_spring(SpringKind::Wheel, target, spring);
        true
    }
}

impl ScrollSimulator for KineticScroll {
    fn is_active(&self) -> bool {
        self.phase.get().is_active()
    }

    fn is_overscrolling(&self) -> bool {
        self.x.is_overscrolling() || self.y.is_overscrolling()
    }

    fn begin_drag(&mut self, x: f64, y: f64) {
        tracing::trace!(x, y, phase = ?self.phase(), "kinetic drag start");
        self.halt_axes();
        self.send(DRAG_START);
    }

    fn update_drag(&mut self, dx: f64, dy: f64) {
        if !self.phase.is(KineticPhase::Dragging) {
            return;
        }
        let config = self.config;
        self.x.drag(finite_or_zero(dx), &config);
        self.y.drag(finite_or_zero(dy), &config);
        tracing::trace!(
            dx,
            dy,
            x = self.x.offset,
            y = self.y.offset,
            "kinetic drag"
        );
    }

    fn end_drag(&mut self) {
        if !self.phase.is(KineticPhase::Dragging) {
            return;
        }
        self.send(DRAG_FINISH);
        // If overscrolling, start the bounce immediately for snappy feedback
        let config = self.config;
        let bounced_x = self.x.enabled && self.x.bounce_if_outside(&config);
        let bounced_y = self.y.enabled && self.y.bounce_if_outside(&config);
        if bounced_x || bounced_y {
            self.send(HIT_EDGE);
        }
    }

    fn apply_flick(&mut self, velocity_x: f64, velocity_y: f64) {
        if self.phase.send(FLICK).is_none() {
            tracing::trace!(phase = ?self.phase(), "flick ignored");
            return;
        }
        let max = self.config.max_velocity.abs();
        if self.x.enabled {
            self.x.spring = None;
            self.x.velocity = finite_or_zero(velocity_x).clamp(-max, max);
        }
        if self.y.enabled {
            self.y.spring = None;
            self.y.velocity = finite_or_zero(velocity_y).clamp(-max, max);
        }
        tracing::trace!(vx = self.x.velocity, vy = self.y.velocity, "kinetic flick");
    }

    fn stop(&mut self) {
        self.halt_axes();
        self.send(STOP);
    }

    fn handle_wheel(&mut self, delta_x: f64, delta_y: f64) -> bool {
        if self.phase.is(KineticPhase::Dragging) {
            return false;
        }
        // Overscrolled content keeps its snap-back; the wheel passes through
        if self.is_overscrolling() {
            return false;
        }
        let spring = self.config.wheel_spring;
        let moved_x = Self::wheel_axis(&mut self.x, finite_or_zero(delta_x), spring);
        let moved_y = Self::wheel_axis(&mut self.y, finite_or_zero(delta_y), spring);
        let consumed = moved_x || moved_y;
        if consumed {
            self.send(WHEEL);
        }
        consumed
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.x.offset = finite_or_zero(x);
        self.y.offset = finite_or_zero(y);
        self.halt_axes();
        self.phase.force(STOP, KineticPhase::Idle);
    }

    fn position(&self) -> Point {
        Point::new(self.x.offset, self.y.offset)
    }

    fn set_boundaries(&mut self, boundaries: Boundaries) {
        self.x.set_boundary(boundaries.right_boundary);
        self.y.set_boundary(boundaries.bottom_boundary);
    }

    fn set_axes(&mut self, axes: ResolvedAxes) {
        self.x.enabled = axes.horizontal;
        self.y.enabled = axes.vertical;
    }

    fn advance(&mut self, dt: f64) -> bool {
        match self.phase.get() {
            KineticPhase::Idle => false,
            // Dragging is driven by drag events, not ticks
            KineticPhase::Dragging => true,
            KineticPhase::Decelerating | KineticPhase::Bouncing => {
                let dt = finite_or_zero(dt).max(0.0);
                let config = self.config;

                let hit_x = self.x.step(dt, &config);
                let hit_y = self.y.step(dt, &config);
                if hit_x || hit_y {
                    tracing::trace!(x = self.x.offset, y = self.y.offset, "kinetic hit edge");
                    self.send(HIT_EDGE);
                }

                if !self.x.is_moving() && !self.y.is_moving() {
                    self.send(SETTLED);
                    return false;
                }
                true
            }
        }
    }
}
