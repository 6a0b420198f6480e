//! Animation scheduler
//!
//! Tracks which components want animation frames. A scroller requests frames
//! when kinetic motion starts and cancels its request once the motion comes
//! to rest; the embedder keeps its frame loop running while
//! [`AnimationScheduler::wants_frame`] is true.

use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct FrameRequestId;
}

/// Longest frame delta handed out by [`AnimationScheduler::tick`], in seconds
///
/// A frame loop that was suspended (window hidden, debugger pause) must not
/// feed a multi-second step into the physics.
pub const MAX_FRAME_DELTA: f64 = 0.1;

struct FrameRequest {
    label: &'static str,
    frames: u64,
}

/// The animation scheduler that paces frame-driven animations
pub struct AnimationScheduler {
    requests: SlotMap<FrameRequestId, FrameRequest>,
    last_frame: Instant,
    target_fps: u32,
    frame_count: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            requests: SlotMap::with_key(),
            last_frame: Instant::now(),
            target_fps: 60,
            frame_count: 0,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Nominal frame duration in seconds
    pub fn frame_interval(&self) -> f64 {
        1.0 / self.target_fps as f64
    }

    /// Register interest in animation frames
    pub fn request_frames(&mut self, label: &'static str) -> FrameRequestId {
        if self.requests.is_empty() {
            // Loop was idle: don't count the idle time as the first frame's delta
            self.last_frame = Instant::now();
        }
        let id = self.requests.insert(FrameRequest { label, frames: 0 });
        tracing::trace!(label, active = self.requests.len(), "frames requested");
        id
    }

    /// Cancel a frame request. Returns false if it was already cancelled.
    pub fn cancel_frames(&mut self, id: FrameRequestId) -> bool {
        match self.requests.remove(id) {
            Some(request) => {
                tracing::trace!(
                    label = request.label,
                    frames = request.frames,
                    "frames cancelled"
                );
                true
            }
            None => false,
        }
    }

    /// Check whether a request is still registered
    pub fn is_requested(&self, id: FrameRequestId) -> bool {
        self.requests.contains_key(id)
    }

    /// Check if anything still wants animation frames
    pub fn wants_frame(&self) -> bool {
        !self.requests.is_empty()
    }

    /// Get the number of outstanding frame requests
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Number of frames delivered to a request so far
    pub fn frames_delivered(&self, id: FrameRequestId) -> Option<u64> {
        self.requests.get(id).map(|r| r.frames)
    }

    /// Total frames ticked since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Begin a frame, returning seconds elapsed since the previous frame
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.tick_with(dt)
    }

    /// Begin a frame with an externally supplied delta (fixed-step loops, replay)
    pub fn tick_with(&mut self, dt: f64) -> f64 {
        self.frame_count += 1;
        for (_, request) in self.requests.iter_mut() {
            request.frames += 1;
        }
        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
