//! Momentum strips
//!
//! Flick-scroll driver for scrollable strips (tab bars, chip rows,
//! carousels). Wraps [`MomentumPhysics`] with the same event/tick contract
//! interaction sessions use, so a host can drive both from one frame loop.

use tactile_core::events::InputEvent;
use tactile_core::geometry::Vec2;
use tactile_physics::momentum::{MomentumConfig, MomentumPhysics, MomentumState};

/// A scrollable strip with inertial scrolling, boundary bounce, and
/// alignment snapping
pub struct MomentumStrip {
    physics: MomentumPhysics,
}

impl MomentumStrip {
    pub fn new(config: MomentumConfig) -> Self {
        Self {
            physics: MomentumPhysics::new(config),
        }
    }

    /// Inclusive scroll bounds per axis
    pub fn set_bounds(&mut self, x: (f32, f32), y: (f32, f32)) {
        self.physics.set_bounds(x, y);
    }

    /// Alignment points (e.g. tab offsets) the strip settles onto
    pub fn set_snap_offsets(&mut self, x: Vec<f32>, y: Vec<f32>) {
        self.physics.set_snap_offsets(x, y);
    }

    /// Route a scroll gesture event. `dt` is the time since the previous
    /// event, used for the velocity estimate.
    pub fn handle_event(&mut self, event: &InputEvent, dt: f32) {
        match *event {
            InputEvent::Scroll(delta) => self.physics.track(delta.dx, delta.dy, dt),
            InputEvent::ScrollEnd => self.physics.release(),
            _ => {}
        }
    }

    /// One frame of deceleration. Returns true while still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.physics.tick(dt)
    }

    pub fn offset(&self) -> Vec2 {
        self.physics.offset()
    }

    pub fn velocity(&self) -> Vec2 {
        self.physics.velocity()
    }

    pub fn state(&self) -> MomentumState {
        self.physics.state()
    }

    pub fn is_animating(&self) -> bool {
        self.physics.state() == MomentumState::Decelerating
    }

    /// Stop immediately at the current offset
    pub fn halt(&mut self) {
        self.physics.halt();
    }
}
