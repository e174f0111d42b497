//! Frame clock abstraction
//!
//! Drivers integrate in terms of `dt` seconds and never talk to the host's
//! frame callback API directly. Production code wraps a monotonic clock;
//! tests advance a [`ManualClock`] by hand so settling behavior is
//! deterministic.
//!
//! The pacing contract is pull-based: the host calls `tick(dt)` on a driver
//! once per frame and keeps scheduling frames while the driver returns
//! `true`. A driver "pauses" by returning `false`; it "resumes" when a
//! qualifying input event makes the host schedule again.

use std::time::Instant;

/// Source of monotonic time for frame pacing
pub trait FrameClock {
    /// Milliseconds elapsed since the clock was created
    fn now_ms(&self) -> f64;

    /// Seconds since `last_ms`, clamped to `max_step` to avoid unstable
    /// integration after long pauses (background tabs, debugger stops).
    fn delta_secs(&self, last_ms: f64, max_step: f32) -> f32 {
        let dt = ((self.now_ms() - last_ms) / 1000.0) as f32;
        dt.clamp(0.0, max_step)
    }
}

/// Real clock backed by `std::time::Instant`
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ms` milliseconds
    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}
