//! Touch scroller
//!
//! The gesture state machine. Each [`GestureEvent`] is arbitrated against the
//! orientation policy, forwarded to the [`ScrollSimulator`], and answered with
//! an [`EventResult`]. While the simulator is in motion the embedder calls
//! [`TouchScroller::on_frame`] once per animation frame; the scroller advances
//! the simulator and applies its position to the host surface.
//!
//! # States
//!
//! ```text
//!            DragStart (axis permitted)
//!   Idle ───────────────────────────────▶ Dragging ◀──┐ Drag
//!    ▲  ▲                                   │  └──────┘
//!    │  │ Wheel (consumed, instantaneous)   │ DragFinish
//!    │  └──────────┐                        ▼
//!    │ settled,    └──────────────────── Simulating ◀── Flick / Wheel
//!    │ Hold, stop                           │
//!    └──────────────────────────────────────┘
//! ```
//!
//! A `DragStart` during `Simulating` interrupts the motion and begins a new
//! drag. Flicks are ignored while `Dragging`.

use std::sync::{Arc, Weak};

use flick_animation::{AnimationScheduler, FrameRequestId, MAX_FRAME_DELTA};
use flick_core::events::{event_types::*, Axis, EventResult, EventType, GestureEvent};
use flick_core::fsm::{StateCell, StateTransitions};
use flick_core::geometry::{finite_or_zero, Point};
use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::boundary::Boundaries;
use crate::config::ScrollConfig;
use crate::events::{ScrollEvent, ScrollListener};
use crate::host::{ScrollBounds, ScrollHost};
use crate::kinetic::KineticScroll;
use crate::orientation::{AxisMode, ResolvedAxes};
use crate::overscroll::{OverscrollOffset, OverscrollRenderer};
use crate::simulator::ScrollSimulator;

/// Label attached to the scroller's frame requests
const FRAME_REQUEST_LABEL: &str = "touch-scroller";

/// Gesture phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pointer down and moving the content
    Dragging,
    /// The simulator is moving the content
    Simulating,
}

impl StateTransitions for GesturePhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use GesturePhase::*;
        match (self, event) {
            (Idle | Simulating, DRAG_START) => Some(Dragging),
            (Dragging, DRAG_FINISH) => Some(Simulating),
            (Idle | Simulating, FLICK) => Some(Simulating),
            (Idle | Simulating, WHEEL) => Some(Simulating),
            (Simulating, HOLD) => Some(Idle),
            (Simulating, SETTLED) => Some(Idle),
            (Dragging | Simulating, STOP) => Some(Idle),
            _ => None,
        }
    }
}

/// Snapshot of the scroller's motion state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Simulator position (content offset, `<= 0` inside bounds)
    pub position: Point,
    pub phase: GesturePhase,
}

impl ScrollState {
    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    pub fn is_simulating(&self) -> bool {
        self.phase == GesturePhase::Simulating
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GesturePhase::Idle
    }
}

/// Gesture-driven kinetic scroll controller for one surface
pub struct TouchScroller<H: ScrollHost, S: ScrollSimulator = KineticScroll> {
    host: H,
    simulator: S,
    config: ScrollConfig,
    phase: StateCell<GesturePhase>,
    /// Cached simulator position
    position: Point,
    boundaries: Boundaries,
    axes: ResolvedAxes,
    renderer: OverscrollRenderer,
    listeners: SmallVec<[ScrollListener; 2]>,
    /// Weak reference to the frame scheduler
    scheduler: Weak<Mutex<AnimationScheduler>>,
    frame_request: Option<FrameRequestId>,
}

impl<H: ScrollHost> TouchScroller<H, KineticScroll> {
    /// Create a scroller driving the default kinetic simulator
    pub fn new(host: H, config: ScrollConfig) -> Self {
        Self::with_simulator(host, KineticScroll::new(config.kinetic), config)
    }
}

impl<H: ScrollHost, S: ScrollSimulator> TouchScroller<H, S> {
    /// Create a scroller driving a custom simulator
    pub fn with_simulator(mut host: H, simulator: S, config: ScrollConfig) -> Self {
        host.set_fit_to_container(config.fit_to_container);
        let mut scroller = Self {
            host,
            simulator,
            config,
            phase: StateCell::default(),
            position: Point::ZERO,
            boundaries: Boundaries::NONE,
            axes: ResolvedAxes::NONE,
            renderer: OverscrollRenderer::default(),
            listeners: SmallVec::new(),
            scheduler: Weak::new(),
            frame_request: None,
        };
        scroller.refresh_layout();
        scroller.sync_from_native();
        scroller
    }

    /// Set the animation scheduler that receives frame requests
    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<AnimationScheduler>>) {
        self.cancel_frames();
        self.scheduler = Arc::downgrade(scheduler);
        if self.phase.is(GesturePhase::Simulating) {
            self.request_frames();
        }
    }

    /// Register a listener for scroll start/scroll/stop notifications
    pub fn on_scroll_event<F>(&mut self, listener: F)
    where
        F: FnMut(&ScrollEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> ScrollState {
        ScrollState {
            position: self.position,
            phase: self.phase.get(),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase.get()
    }

    /// Cached simulator position
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    pub fn axes(&self) -> ResolvedAxes {
        self.axes
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access
    ///
    /// Call [`on_layout_changed`](Self::on_layout_changed) after changing
    /// sizes through it.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    /// Whether the scroller wants [`on_frame`](Self::on_frame) calls
    pub fn wants_frame(&self) -> bool {
        self.phase.is(GesturePhase::Simulating)
    }

    /// Native scroll extents plus the current overscroll
    pub fn scroll_bounds(&self) -> ScrollBounds {
        ScrollBounds::measure(
            self.host.bounding_box(),
            self.boundaries,
            self.host.native_scroll_position(),
            self.simulator.position(),
        )
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle one gesture event
    pub fn handle(&mut self, event: GestureEvent) -> EventResult {
        let event = event.sanitized();
        tracing::trace!(event = event.name(), phase = ?self.phase(), "gesture event");

        let result = match event {
            GestureEvent::DragStart { x, y } => self.drag_start(x, y),
            GestureEvent::Drag { dx, dy } => self.drag(dx, dy),
            GestureEvent::DragFinish => self.drag_finish(),
            GestureEvent::Flick {
                velocity_x,
                velocity_y,
            } => self.flick(velocity_x, velocity_y),
            GestureEvent::Hold => self.hold(),
            GestureEvent::Wheel { delta_x, delta_y } => self.wheel(delta_x, delta_y),
        };

        tracing::debug!(
            event = event.name(),
            claimed = result.is_claimed(),
            phase = ?self.phase(),
            "gesture handled"
        );
        result
    }

    fn drag_start(&mut self, x: f64, y: f64) -> EventResult {
        if self.phase.is(GesturePhase::Dragging) {
            return EventResult::PassThrough;
        }

        // Extents may have changed since the last gesture
        self.refresh_layout();

        let axis = Axis::dominant(x, y);
        if !self.axes.allows(axis) {
            tracing::debug!(?axis, axes = ?self.axes, "drag start on locked axis");
            return EventResult::PassThrough;
        }

        if !self.simulator.is_active() {
            self.sync_from_native();
        }
        self.simulator.begin_drag(x, y);
        self.transition(DRAG_START);
        self.refresh_position();

        EventResult::claimed(self.config.prevent_drag_propagation)
    }

    fn drag(&mut self, dx: f64, dy: f64) -> EventResult {
        if !self.phase.is(GesturePhase::Dragging) {
            return EventResult::PassThrough;
        }
        self.simulator.update_drag(dx, dy);
        self.apply_position();
        self.emit(ScrollEvent::Scroll {
            position: self.position.negate(),
        });
        EventResult::CLAIMED_PROPAGATING
    }

    fn drag_finish(&mut self) -> EventResult {
        if !self.phase.is(GesturePhase::Dragging) {
            return EventResult::PassThrough;
        }
        self.simulator.end_drag();
        self.transition(DRAG_FINISH);
        EventResult::Claimed {
            stop_propagation: false,
            prevent_tap: true,
        }
    }

    fn flick(&mut self, velocity_x: f64, velocity_y: f64) -> EventResult {
        if self.phase.is(GesturePhase::Dragging) {
            tracing::trace!("flick ignored while dragging");
            return EventResult::PassThrough;
        }

        if self.phase.is(GesturePhase::Idle) {
            self.refresh_layout();
            self.sync_from_native();
        }

        let axis = Axis::dominant(velocity_x, velocity_y);
        if !self.axes.allows(axis) {
            return EventResult::PassThrough;
        }

        match axis {
            Axis::Horizontal => self.simulator.apply_flick(velocity_x, 0.0),
            Axis::Vertical => self.simulator.apply_flick(0.0, velocity_y),
        }
        if self.simulator.is_active() {
            self.transition(FLICK);
        }

        EventResult::claimed(self.config.prevent_drag_propagation)
    }

    fn hold(&mut self) -> EventResult {
        // Holds during an overscroll snap-back are ignored
        if self.phase.is(GesturePhase::Simulating)
            && self.simulator.is_active()
            && !self.simulator.is_overscrolling()
        {
            self.simulator.stop();
            self.transition(HOLD);
            return EventResult::CLAIMED;
        }
        EventResult::PassThrough
    }

    fn wheel(&mut self, delta_x: f64, delta_y: f64) -> EventResult {
        if self.phase.is(GesturePhase::Dragging) {
            return EventResult::PassThrough;
        }

        if self.phase.is(GesturePhase::Idle) {
            self.refresh_layout();
            self.sync_from_native();
        }

        if !self.simulator.handle_wheel(delta_x, delta_y) {
            return EventResult::PassThrough;
        }

        if self.simulator.is_active() {
            self.transition(WHEEL);
        } else if self.phase.is(GesturePhase::Idle) {
            // Applied in one step: bracket it as a complete motion
            let start = self.position.negate();
            self.emit(ScrollEvent::Start { position: start });
            self.apply_position();
            self.emit(ScrollEvent::Scroll {
                position: self.position.negate(),
            });
            self.finish_motion();
        }

        EventResult::CLAIMED
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance the simulation by `dt` seconds and apply the new position
    ///
    /// `dt` is clamped to [`MAX_FRAME_DELTA`] so a stalled frame cannot
    /// teleport the content. Returns whether more frames are wanted.
    pub fn on_frame(&mut self, dt: f64) -> bool {
        if !self.phase.is(GesturePhase::Simulating) {
            return false;
        }

        let dt = finite_or_zero(dt).clamp(0.0, MAX_FRAME_DELTA);
        let active = self.simulator.advance(dt);
        self.apply_position();
        tracing::trace!(
            dt,
            x = self.position.x,
            y = self.position.y,
            active,
            "scroll frame"
        );
        self.emit(ScrollEvent::Scroll {
            position: self.position.negate(),
        });

        if !active {
            self.transition(SETTLED);
        }
        active
    }

    // =========================================================================
    // External control
    // =========================================================================

    /// Cancel any kinetic motion immediately
    pub fn stop(&mut self) {
        if self.phase.is(GesturePhase::Idle) {
            return;
        }
        self.simulator.stop();
        // Never freeze outside the bounds: rest at the edge the surface shows
        if self.simulator.is_overscrolling() {
            self.sync_from_native();
        }
        self.transition(STOP);
    }

    /// Programmatically scroll to a native position
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.stop();
        self.host.set_native_scroll_position(x, y);
        self.refresh_layout();
        self.sync_from_native();
        tracing::debug!(x, y, position = ?self.position, "scroll to");
    }

    /// The surface was scrolled by something other than this scroller
    pub fn on_native_scroll(&mut self) {
        self.refresh_layout();
        if !self.simulator.is_active() {
            self.sync_from_native();
        }
    }

    /// The viewport or content size changed
    pub fn on_layout_changed(&mut self) {
        self.refresh_layout();
        if self.phase.is(GesturePhase::Idle) {
            self.sync_from_native();
        }
    }

    pub fn set_vertical(&mut self, mode: AxisMode) {
        self.config.vertical = mode;
        self.refresh_layout();
    }

    pub fn set_horizontal(&mut self, mode: AxisMode) {
        self.config.horizontal = mode;
        self.refresh_layout();
    }

    pub fn set_fit_to_container(&mut self, fit: bool) {
        self.config.fit_to_container = fit;
        self.host.set_fit_to_container(fit);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Recompute boundaries and axis flags and push them to the simulator
    fn refresh_layout(&mut self) {
        let viewport = self.host.bounding_box();
        let content = self.host.content_extent();
        self.boundaries = Boundaries::calculate(viewport, content);
        self.axes = ResolvedAxes::resolve(
            self.config.horizontal,
            self.config.vertical,
            viewport,
            content,
        );
        self.simulator.set_boundaries(self.boundaries);
        self.simulator.set_axes(self.axes);
        tracing::trace!(
            boundaries = ?self.boundaries,
            axes = ?self.axes,
            "layout refreshed"
        );
    }

    /// Resynchronize the simulator from the native scroll position
    fn sync_from_native(&mut self) {
        let native = self.host.native_scroll_position();
        self.simulator.set_position(-native.x, -native.y);
        self.refresh_position();
    }

    fn refresh_position(&mut self) {
        self.position = self.simulator.position();
    }

    /// Apply the simulator position to the surface
    fn apply_position(&mut self) {
        self.refresh_position();
        let target = self.position.round().negate();
        self.host.set_native_scroll_position(target.x, target.y);
        let native = self.host.native_scroll_position();
        let offset = self.renderer.render(target, native);
        self.host.apply_overscroll(offset);
    }

    /// Run a phase transition and its side effects
    fn transition(&mut self, event: EventType) {
        let from = self.phase.get();
        let Some(to) = self.phase.send(event) else {
            return;
        };
        tracing::debug!(?from, ?to, event, "gesture phase");

        if from == GesturePhase::Idle {
            self.emit(ScrollEvent::Start {
                position: self.position.negate(),
            });
        }

        match to {
            GesturePhase::Simulating => self.request_frames(),
            GesturePhase::Dragging => self.cancel_frames(),
            GesturePhase::Idle => {
                self.cancel_frames();
                self.apply_position();
                self.finish_motion();
            }
        }
    }

    /// Clear the overscroll transform and announce rest
    fn finish_motion(&mut self) {
        self.host.apply_overscroll(OverscrollOffset::ZERO);
        self.emit(ScrollEvent::Stop {
            position: self.position.negate(),
        });
    }

    fn emit(&mut self, event: ScrollEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn request_frames(&mut self) {
        if self.frame_request.is_some() {
            return;
        }
        if let Some(scheduler) = self.scheduler.upgrade() {
            self.frame_request = Some(scheduler.lock().request_frames(FRAME_REQUEST_LABEL));
        }
    }

    fn cancel_frames(&mut self) {
        let Some(id) = self.frame_request.take() else {
            return;
        };
        if let Some(scheduler) = self.scheduler.upgrade() {
            scheduler.lock().cancel_frames(id);
        }
    }
}

impl<H: ScrollHost, S: ScrollSimulator> Drop for TouchScroller<H, S> {
    fn drop(&mut self) {
        self.cancel_frames();
    }
}
