//! Integration tests for the touch scroller's contract with its simulator
//!
//! These tests verify that:
//! - Gestures are claimed or passed through according to the axis policy
//! - The simulator receives the expected call sequence
//! - Holds respect overscroll snap-back
//! - Motion is bracketed by start/stop notifications and ends with a zero offset

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use flick_animation::{AnimationScheduler, MAX_FRAME_DELTA};
use flick_core::{EventResult, GestureEvent, Point, Size};
use flick_scroll::{
    AxisMode, Boundaries, GesturePhase, HeadlessSurface, OverscrollOffset, ResolvedAxes,
    ScrollConfig, ScrollEvent, ScrollMeasure, ScrollSimulator, TouchScroller,
};
use parking_lot::Mutex;

const DT: f64 = 1.0 / 60.0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

// ============================================================================
// Recording simulator
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    BeginDrag(f64, f64),
    UpdateDrag(f64, f64),
    EndDrag,
    Flick(f64, f64),
    Stop,
    Wheel(f64, f64),
    SetPosition(f64, f64),
    SetBoundaries(Boundaries),
    SetAxes(ResolvedAxes),
    Advance,
}

impl Call {
    fn is_gesture(&self) -> bool {
        !matches!(
            self,
            Call::SetPosition(..) | Call::SetBoundaries(_) | Call::SetAxes(_) | Call::Advance
        )
    }
}

/// Simulator that records every call and settles after a fixed frame count
#[derive(Debug, Default)]
struct RecordingSimulator {
    calls: Vec<Call>,
    position: Point,
    active: bool,
    frames_left: u32,
    overscrolling: Cell<bool>,
    last_dt: Option<f64>,
}

impl RecordingSimulator {
    const SETTLE_FRAMES: u32 = 3;

    fn gesture_calls(&self) -> Vec<Call> {
        self.calls.iter().filter(|c| c.is_gesture()).cloned().collect()
    }

    fn position_of(&self, call: &Call) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    fn start_motion(&mut self) {
        self.active = true;
        self.frames_left = Self::SETTLE_FRAMES;
    }
}

impl ScrollSimulator for RecordingSimulator {
    fn is_active(&self) -> bool {
        self.active
    }

    fn is_overscrolling(&self) -> bool {
        self.overscrolling.get()
    }

    fn begin_drag(&mut self, x: f64, y: f64) {
        self.calls.push(Call::BeginDrag(x, y));
        self.active = true;
    }

    fn update_drag(&mut self, dx: f64, dy: f64) {
        self.calls.push(Call::UpdateDrag(dx, dy));
        self.position.x += dx;
        self.position.y += dy;
    }

    fn end_drag(&mut self) {
        self.calls.push(Call::EndDrag);
        self.start_motion();
    }

    fn apply_flick(&mut self, velocity_x: f64, velocity_y: f64) {
        self.calls.push(Call::Flick(velocity_x, velocity_y));
        self.start_motion();
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.active = false;
    }

    fn handle_wheel(&mut self, delta_x: f64, delta_y: f64) -> bool {
        self.calls.push(Call::Wheel(delta_x, delta_y));
        self.position.x -= delta_x;
        self.position.y -= delta_y;
        true
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.calls.push(Call::SetPosition(x, y));
        self.position = Point::new(x, y);
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_boundaries(&mut self, boundaries: Boundaries) {
        self.calls.push(Call::SetBoundaries(boundaries));
    }

    fn set_axes(&mut self, axes: ResolvedAxes) {
        self.calls.push(Call::SetAxes(axes));
    }

    fn advance(&mut self, dt: f64) -> bool {
        self.calls.push(Call::Advance);
        self.last_dt = Some(dt);
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.active = false;
        }
        self.active
    }
}

fn recording(
    viewport: Size,
    content: Size,
    config: ScrollConfig,
) -> TouchScroller<HeadlessSurface, RecordingSimulator> {
    TouchScroller::with_simulator(
        HeadlessSurface::new(viewport, content),
        RecordingSimulator::default(),
        config,
    )
}

fn tall_surface() -> TouchScroller<HeadlessSurface, RecordingSimulator> {
    recording(
        Size::new(300.0, 200.0),
        Size::new(300.0, 500.0),
        ScrollConfig::default(),
    )
}

fn record_events<H, S>(scroller: &mut TouchScroller<H, S>) -> Rc<RefCell<Vec<ScrollEvent>>>
where
    H: flick_scroll::ScrollHost,
    S: ScrollSimulator,
{
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    scroller.on_scroll_event(move |event| sink.borrow_mut().push(*event));
    events
}

// ============================================================================
// Drag
// ============================================================================

#[test]
fn test_drag_then_finish_enters_simulating() {
    init_tracing();
    let mut s = tall_surface();

    assert!(s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 }).is_claimed());
    assert!(s.handle(GestureEvent::Drag { dx: 0.0, dy: -50.0 }).is_claimed());
    assert_eq!(s.phase(), GesturePhase::Dragging);

    let finished = s.handle(GestureEvent::DragFinish);
    assert!(finished.prevents_tap());
    assert_eq!(s.phase(), GesturePhase::Simulating);

    assert_eq!(
        s.simulator().gesture_calls(),
        vec![
            Call::BeginDrag(0.0, -5.0),
            Call::UpdateDrag(0.0, -50.0),
            Call::EndDrag,
        ]
    );
}

#[test]
fn test_drag_finish_without_movement_still_simulates() {
    let mut s = tall_surface();
    s.handle(GestureEvent::DragStart { x: 0.0, y: 4.0 });
    s.handle(GestureEvent::DragFinish);
    assert_eq!(s.phase(), GesturePhase::Simulating);
}

#[test]
fn test_hidden_surface_never_claims_drag_start() {
    let config = ScrollConfig {
        vertical: AxisMode::Hidden,
        horizontal: AxisMode::Hidden,
        ..Default::default()
    };
    let mut s = recording(Size::new(300.0, 200.0), Size::new(900.0, 900.0), config);

    for (x, y) in [(0.0, -10.0), (10.0, 0.0), (-7.0, 7.0)] {
        assert_eq!(
            s.handle(GestureEvent::DragStart { x, y }),
            EventResult::PassThrough
        );
        assert_eq!(s.phase(), GesturePhase::Idle);
    }
    assert!(s.simulator().gesture_calls().is_empty());
    assert_eq!(s.position(), Point::ZERO);
}

#[test]
fn test_fitting_content_with_auto_axes_never_claims() {
    let config = ScrollConfig {
        vertical: AxisMode::AutoScroll,
        horizontal: AxisMode::AutoScroll,
        ..Default::default()
    };
    let mut s = recording(Size::new(100.0, 100.0), Size::new(100.0, 100.0), config);

    assert_eq!(s.axes(), ResolvedAxes::NONE);
    assert_eq!(
        s.handle(GestureEvent::DragStart { x: 0.0, y: -10.0 }),
        EventResult::PassThrough
    );
    assert_eq!(
        s.handle(GestureEvent::DragStart { x: -10.0, y: 0.0 }),
        EventResult::PassThrough
    );
    assert_eq!(s.phase(), GesturePhase::Idle);
}

#[test]
fn test_boundaries_recomputed_before_drag_start() {
    let mut s = tall_surface();
    s.host_mut().set_content(Size::new(300.0, 1200.0));
    s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 });

    let expected = Boundaries::calculate(Size::new(300.0, 200.0), Size::new(300.0, 1200.0));
    assert_eq!(s.boundaries(), expected);

    let sim = s.simulator();
    let pushed = sim
        .position_of(&Call::SetBoundaries(expected))
        .expect("boundaries pushed");
    let began = sim
        .position_of(&Call::BeginDrag(0.0, -5.0))
        .expect("drag began");
    assert!(pushed < began);
}

#[test]
fn test_drag_start_ignored_while_dragging() {
    let mut s = tall_surface();
    s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 });
    assert_eq!(
        s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 }),
        EventResult::PassThrough
    );
    assert_eq!(s.simulator().gesture_calls().len(), 1);
}

#[test]
fn test_drag_start_interrupts_simulation() {
    let mut s = tall_surface();
    s.handle(GestureEvent::Flick {
        velocity_x: 0.0,
        velocity_y: -900.0,
    });
    assert_eq!(s.phase(), GesturePhase::Simulating);

    assert!(s.handle(GestureEvent::DragStart { x: 0.0, y: 6.0 }).is_claimed());
    assert_eq!(s.phase(), GesturePhase::Dragging);
    // Still active: the running position is kept, not resynchronized
    assert!(!s
        .simulator()
        .calls
        .iter()
        .skip_while(|c| **c != Call::Flick(0.0, -900.0))
        .any(|c| matches!(c, Call::SetPosition(..))));
}

#[test]
fn test_non_finite_drag_is_clamped() {
    let mut s = tall_surface();
    s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 });
    s.handle(GestureEvent::Drag {
        dx: f64::NAN,
        dy: f64::INFINITY,
    });
    assert_eq!(
        s.simulator().gesture_calls().last(),
        Some(&Call::UpdateDrag(0.0, 0.0))
    );
}

// ============================================================================
// Flick
// ============================================================================

#[test]
fn test_flick_selects_horizontal_when_enabled() {
    let config = ScrollConfig {
        vertical: AxisMode::Hidden,
        ..Default::default()
    };
    let mut s = recording(Size::new(300.0, 200.0), Size::new(900.0, 200.0), config);
    assert!(s.axes().horizontal);

    let result = s.handle(GestureEvent::Flick {
        velocity_x: 800.0,
        velocity_y: 100.0,
    });
    assert!(result.is_claimed());
    assert_eq!(
        s.simulator().gesture_calls(),
        vec![Call::Flick(800.0, 0.0)]
    );
    assert_eq!(s.phase(), GesturePhase::Simulating);
}

#[test]
fn test_flick_on_disabled_axis_is_not_redirected() {
    // Vertical enabled, horizontal disabled
    let mut s = tall_surface();
    assert!(s.axes().vertical && !s.axes().horizontal);

    let result = s.handle(GestureEvent::Flick {
        velocity_x: 800.0,
        velocity_y: 300.0,
    });
    assert_eq!(result, EventResult::PassThrough);
    assert!(s.simulator().gesture_calls().is_empty());
    assert_eq!(s.phase(), GesturePhase::Idle);
}

#[test]
fn test_flick_tie_goes_vertical() {
    let mut s = tall_surface();
    s.handle(GestureEvent::Flick {
        velocity_x: -500.0,
        velocity_y: 500.0,
    });
    assert_eq!(
        s.simulator().gesture_calls(),
        vec![Call::Flick(0.0, 500.0)]
    );
}

#[test]
fn test_flick_ignored_while_dragging() {
    let mut s = tall_surface();
    s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 });
    let result = s.handle(GestureEvent::Flick {
        velocity_x: 0.0,
        velocity_y: -900.0,
    });
    assert_eq!(result, EventResult::PassThrough);
    assert_eq!(s.phase(), GesturePhase::Dragging);
    assert!(!s
        .simulator()
        .gesture_calls()
        .iter()
        .any(|c| matches!(c, Call::Flick(..))));
}

#[test]
fn test_flick_from_idle_resyncs_native_position() {
    let mut s = tall_surface();
    // Scrolled externally without a native scroll notification
    s.host_mut().set_native_scroll_position(0.0, 120.0);

    s.handle(GestureEvent::Flick {
        velocity_x: 0.0,
        velocity_y: -900.0,
    });

    let sim = s.simulator();
    let synced = sim.position_of(&Call::SetPosition(0.0, -120.0)).unwrap();
    let flicked = sim.position_of(&Call::Flick(0.0, -900.0)).unwrap();
    assert!(synced < flicked);
    assert_eq!(s.position(), Point::new(0.0, -120.0));
}

// ============================================================================
// Hold
// ============================================================================

#[test]
fn test_hold_during_overscroll_is_ignored() {
    let mut s = tall_surface();
    s.handle(GestureEvent::DragStart { x: 0.0, y: 5.0 });
    s.handle(GestureEvent::Drag { dx: 0.0, dy: 30.0 });
    s.handle(GestureEvent::DragFinish);
    s.simulator().overscrolling.set(true);

    assert_eq!(s.handle(GestureEvent::Hold), EventResult::PassThrough);
    assert_eq!(s.phase(), GesturePhase::Simulating);
    assert!(!s.simulator().gesture_calls().contains(&Call::Stop));
}

#[test]
fn test_hold_stops_active_simulation() {
    let mut s = tall_surface();
    let events = record_events(&mut s);
    s.handle(GestureEvent::Flick {
        velocity_x: 0.0,
        velocity_y: -900.0,
    });
    s.on_frame(DT);

    assert_eq!(s.handle(GestureEvent::Hold), EventResult::CLAIMED);
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert_eq!(s.simulator().gesture_calls().last(), Some(&Call::Stop));
    assert_eq!(
        s.host().applied_offsets().last(),
        Some(&OverscrollOffset::ZERO)
    );
    assert!(matches!(events.borrow().last(), Some(ScrollEvent::Stop { .. })));
}

#[test]
fn test_hold_while_idle_passes_through() {
    let mut s = tall_surface();
    assert_eq!(s.handle(GestureEvent::Hold), EventResult::PassThrough);
    assert!(s.simulator().gesture_calls().is_empty());
}

// ============================================================================
// Wheel
// ============================================================================

#[test]
fn test_wheel_ignored_while_dragging() {
    let mut s = tall_surface();
    s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 });
    assert_eq!(
        s.handle(GestureEvent::Wheel {
            delta_x: 0.0,
            delta_y: 40.0
        }),
        EventResult::PassThrough
    );
    assert!(!s
        .simulator()
        .gesture_calls()
        .iter()
        .any(|c| matches!(c, Call::Wheel(..))));
}

#[test]
fn test_instant_wheel_is_a_complete_motion() {
    let mut s = tall_surface();
    let events = record_events(&mut s);

    let result = s.handle(GestureEvent::Wheel {
        delta_x: 0.0,
        delta_y: 40.0,
    });
    assert_eq!(result, EventResult::CLAIMED);
    // The recording simulator applies wheel deltas without animating
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert_eq!(s.host().native_scroll_position(), Point::new(0.0, 40.0));

    let events = events.borrow();
    assert!(matches!(events.first(), Some(ScrollEvent::Start { .. })));
    assert!(matches!(events.last(), Some(ScrollEvent::Stop { .. })));
}

// ============================================================================
// Frames and notifications
// ============================================================================

#[test]
fn test_frames_until_simulator_settles() {
    let mut s = tall_surface();
    let events = record_events(&mut s);
    s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 });
    s.handle(GestureEvent::Drag { dx: 0.0, dy: -50.0 });
    s.handle(GestureEvent::DragFinish);

    let mut frames = 0;
    while s.on_frame(DT) {
        frames += 1;
    }
    assert_eq!(frames + 1, RecordingSimulator::SETTLE_FRAMES);
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert!(!s.on_frame(DT));

    let events = events.borrow();
    let starts = events
        .iter()
        .filter(|e| matches!(e, ScrollEvent::Start { .. }))
        .count();
    let stops = events
        .iter()
        .filter(|e| matches!(e, ScrollEvent::Stop { .. }))
        .count();
    assert_eq!((starts, stops), (1, 1));
    assert!(matches!(events.first(), Some(ScrollEvent::Start { .. })));
    assert_eq!(
        events.last(),
        Some(&ScrollEvent::Stop {
            position: Point::new(0.0, 50.0)
        })
    );
}

#[test]
fn test_frame_delta_is_clamped() {
    let mut s = tall_surface();
    s.handle(GestureEvent::Flick {
        velocity_x: 0.0,
        velocity_y: -900.0,
    });

    s.on_frame(1000.0);
    assert_eq!(s.simulator().last_dt, Some(MAX_FRAME_DELTA));

    s.on_frame(f64::NAN);
    assert_eq!(s.simulator().last_dt, Some(0.0));
}

#[test]
fn test_stalled_frame_does_not_jump_kinetic_scroll() {
    let flicked = || {
        let mut s = TouchScroller::new(
            HeadlessSurface::new(Size::new(300.0, 200.0), Size::new(300.0, 5000.0)),
            ScrollConfig::default(),
        );
        s.handle(GestureEvent::Flick {
            velocity_x: 0.0,
            velocity_y: -2000.0,
        });
        s
    };

    let mut stalled = flicked();
    stalled.on_frame(30.0);
    let mut steady = flicked();
    steady.on_frame(MAX_FRAME_DELTA);

    assert_eq!(stalled.position(), steady.position());
}

#[test]
fn test_native_scroll_resyncs_idle_simulator() {
    let mut s = tall_surface();
    s.host_mut().set_native_scroll_position(0.0, 120.0);
    s.on_native_scroll();
    assert_eq!(s.position(), Point::new(0.0, -120.0));
    assert_eq!(
        s.simulator().calls.last(),
        Some(&Call::SetPosition(-0.0, -120.0))
    );
}

#[test]
fn test_layout_change_updates_axes() {
    let mut s = recording(
        Size::new(300.0, 200.0),
        Size::new(300.0, 200.0),
        ScrollConfig {
            horizontal: AxisMode::AutoScroll,
            ..Default::default()
        },
    );
    assert!(!s.axes().horizontal);

    s.host_mut().set_content(Size::new(800.0, 200.0));
    s.on_layout_changed();
    assert!(s.axes().horizontal);
    assert_eq!(s.boundaries().right_boundary, -500.0);
}

#[test]
fn test_content_shrink_during_wheel_glide_rests_inside_bounds() {
    init_tracing();
    let mut s = TouchScroller::new(
        HeadlessSurface::new(Size::new(300.0, 200.0), Size::new(300.0, 500.0)),
        ScrollConfig::default(),
    );
    assert!(s
        .handle(GestureEvent::Wheel {
            delta_x: 0.0,
            delta_y: 300.0,
        })
        .is_claimed());
    assert!(s.on_frame(DT));
    assert_eq!(s.phase(), GesturePhase::Simulating);

    s.host_mut().set_content(Size::new(300.0, 250.0));
    s.on_layout_changed();

    let mut frames = 0;
    while s.on_frame(DT) {
        frames += 1;
        assert!(frames <= 600, "scroller never settled");
    }

    assert_eq!(s.phase(), GesturePhase::Idle);
    assert!(!s.simulator().is_overscrolling());
    assert_eq!(s.position().y, -50.0);
    assert_eq!(s.host().native_scroll_position(), Point::new(0.0, 50.0));
    assert_eq!(s.host().overscroll(), OverscrollOffset::ZERO);
    assert_eq!(s.scroll_bounds().over_top, 0.0);
}

#[test]
fn test_external_stop_settles_immediately() {
    let mut s = tall_surface();
    s.handle(GestureEvent::Flick {
        velocity_x: 0.0,
        velocity_y: -900.0,
    });
    s.stop();
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert_eq!(s.simulator().gesture_calls().last(), Some(&Call::Stop));
    assert!(!s.wants_frame());
}

#[test]
fn test_frame_requests_follow_simulation() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let mut s = tall_surface();
    s.set_scheduler(&scheduler);
    assert!(!scheduler.lock().wants_frame());

    s.handle(GestureEvent::DragStart { x: 0.0, y: -5.0 });
    assert!(!scheduler.lock().wants_frame());

    s.handle(GestureEvent::DragFinish);
    assert_eq!(scheduler.lock().request_count(), 1);

    let mut frames = 0;
    while scheduler.lock().wants_frame() {
        let dt = scheduler.lock().tick_with(DT);
        s.on_frame(dt);
        frames += 1;
        assert!(frames <= 10, "frame request never cancelled");
    }
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert_eq!(scheduler.lock().request_count(), 0);
}

#[test]
fn test_dropping_scroller_cancels_frames() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let mut s = tall_surface();
    s.set_scheduler(&scheduler);
    s.handle(GestureEvent::Flick {
        velocity_x: 0.0,
        velocity_y: -900.0,
    });
    assert!(scheduler.lock().wants_frame());

    drop(s);
    assert!(!scheduler.lock().wants_frame());
}
