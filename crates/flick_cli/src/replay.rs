//! Scenario replay against a headless surface

use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Result};
use flick_animation::AnimationScheduler;
use flick_core::{EventResult, Point, Size};
use flick_scroll::{
    GesturePhase, HeadlessSurface, OverscrollOffset, ScrollConfig, ScrollMeasure, TouchScroller,
};
use parking_lot::Mutex;

use crate::scenario::{Scenario, ScenarioStep};

/// Outcome of one replayed step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub label: &'static str,
    /// Claim decision for input steps
    pub result: Option<EventResult>,
    /// Frames delivered by tick/settle steps
    pub frames: u32,
    pub phase: GesturePhase,
    /// Simulator position in native coordinates
    pub position: Point,
    pub native: Point,
    pub overscroll: OverscrollOffset,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.result {
            Some(result) => describe(result).to_string(),
            None => format!("{} frames", self.frames),
        };
        write!(
            f,
            "{:>3} {:<12} {:<16} {:<10} pos=({:.1}, {:.1}) native=({:.0}, {:.0}) over=({:.0}, {:.0})",
            self.index,
            self.label,
            outcome,
            format!("{:?}", self.phase),
            self.position.x,
            self.position.y,
            self.native.x,
            self.native.y,
            self.overscroll.dx,
            self.overscroll.dy,
        )
    }
}

fn describe(result: EventResult) -> &'static str {
    match result {
        EventResult::PassThrough => "pass-through",
        EventResult::Claimed {
            prevent_tap: true, ..
        } => "claimed, no tap",
        EventResult::Claimed {
            stop_propagation: true,
            ..
        } => "claimed, stop",
        EventResult::Claimed { .. } => "claimed",
    }
}

/// Drives a [`TouchScroller`] through a scenario at a fixed frame rate
pub struct Replay {
    scroller: TouchScroller<HeadlessSurface>,
    scheduler: Arc<Mutex<AnimationScheduler>>,
    frame_interval: f64,
}

impl Replay {
    pub fn new(scenario: &Scenario, config: ScrollConfig, fps: u32) -> Self {
        let mut scheduler = AnimationScheduler::new();
        scheduler.set_target_fps(fps);
        let frame_interval = scheduler.frame_interval();
        let scheduler = Arc::new(Mutex::new(scheduler));

        let surface = HeadlessSurface::new(scenario.viewport, scenario.content);
        let mut scroller = TouchScroller::new(surface, config);
        scroller.set_scheduler(&scheduler);

        Self {
            scroller,
            scheduler,
            frame_interval,
        }
    }

    pub fn scroller(&self) -> &TouchScroller<HeadlessSurface> {
        &self.scroller
    }

    /// Replay one step
    pub fn step(&mut self, index: usize, step: &ScenarioStep) -> Result<StepReport> {
        let mut result = None;
        let mut frames = 0;

        if let Some(gesture) = step.gesture() {
            result = Some(self.scroller.handle(gesture));
        } else {
            match *step {
                ScenarioStep::Tick { frames: budget } => {
                    while frames < budget && self.frame() {
                        frames += 1;
                    }
                }
                ScenarioStep::Settle { max_frames } => {
                    while self.frame() {
                        frames += 1;
                        if frames > max_frames {
                            bail!(
                                "step {index}: scroller still moving after {max_frames} frames"
                            );
                        }
                    }
                }
                ScenarioStep::Resize { width, height } => {
                    self.scroller.host_mut().resize(Size::new(width, height));
                    self.scroller.on_layout_changed();
                }
                ScenarioStep::Content { width, height } => {
                    self.scroller
                        .host_mut()
                        .set_content(Size::new(width, height));
                    self.scroller.on_layout_changed();
                }
                ScenarioStep::ScrollTo { x, y } => self.scroller.scroll_to(x, y),
                _ => {}
            }
        }

        let report = StepReport {
            index,
            label: step.label(),
            result,
            frames,
            phase: self.scroller.phase(),
            position: self.scroller.position().negate(),
            native: self.scroller.host().native_scroll_position(),
            overscroll: self.scroller.host().overscroll(),
        };
        tracing::debug!(%report, "replayed step");
        Ok(report)
    }

    /// Deliver one frame if one was requested
    fn frame(&mut self) -> bool {
        if !self.scheduler.lock().wants_frame() {
            return false;
        }
        let dt = self.scheduler.lock().tick_with(self.frame_interval);
        self.scroller.on_frame(dt);
        true
    }
}
