//! Frame clock for hosts in [`LoopMode::Independent`](crate::LoopMode).
//!
//! Frame callbacks receive a multiplier instead of a raw duration: `1.0`
//! means the frame took exactly one 60 Hz interval, `2.0` means one frame
//! was dropped, and so on.

use std::time::{Duration, Instant};

/// Frame rate the multiplier is normalised against.
pub const REFERENCE_FPS: f32 = 60.0;

/// Measures the interval between consecutive host frames.
#[derive(Debug, Clone)]
pub struct Timer {
    previous: Instant,
    /// Interval covered by the latest frame.
    pub delta: Duration,
    /// Frames driven so far.
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Starts a new frame and returns its multiplier.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.previous);
        self.previous = now;
        self.frame_count += 1;
        self.multiplier()
    }

    /// Multiplier of the latest frame.
    #[must_use]
    pub fn multiplier(&self) -> f32 {
        self.delta.as_secs_f32() * REFERENCE_FPS
    }
}
