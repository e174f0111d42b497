//! Momentum / inertial scroll physics
//!
//! A second frame-driven loop, independent of the spring model, used by
//! scrollable strips (tab bars, carousels): velocity capture while the
//! gesture is live, frictional decay after release, a damped bounce at the
//! scroll bounds, and a proximity snap that nudges the strip onto the
//! nearest alignment point once it is moving slowly enough.
//!
//! Velocity is expressed in pixels per frame at a 60 fps reference; all
//! integration is scaled by `dt·60` so decay and travel are frame-rate
//! independent.

use tactile_core::events::event_types;
use tactile_core::geometry::Vec2;
use tactile_core::stateful::StateTransitions;

/// Momentum driver states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MomentumState {
    #[default]
    Idle,
    /// A gesture is live; deltas feed the velocity estimate
    Tracking,
    /// Gesture released; friction and snap drive the offset
    Decelerating,
}

impl StateTransitions for MomentumState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (MomentumState::Idle, SCROLL) => Some(MomentumState::Tracking),
            (MomentumState::Tracking, SCROLL_END) => Some(MomentumState::Decelerating),
            (MomentumState::Decelerating, SCROLL) => Some(MomentumState::Tracking),
            (MomentumState::Decelerating, SETTLED) => Some(MomentumState::Idle),
            (MomentumState::Tracking, SETTLED) => Some(MomentumState::Idle),
            _ => None,
        }
    }
}

/// Momentum tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumConfig {
    /// Friction exponent; higher decays faster (`v *= 0.95^(friction·dt·60)`)
    pub friction: f32,
    /// Fraction of velocity reflected when a bound is hit
    pub bounce_damping: f32,
    /// Fraction of the offset-to-snap added to velocity per tick
    pub snap_strength: f32,
    /// Snap force only engages below this speed (px/frame)
    pub snap_speed_threshold: f32,
    /// Loop terminates below this speed on both axes (px/frame)
    pub stop_threshold: f32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            friction: 1.0,
            bounce_damping: 0.3,
            snap_strength: 0.04,
            snap_speed_threshold: 2.0,
            stop_threshold: 0.1,
        }
    }
}

/// Maximum integration step in seconds. A long frame gap (background tab)
/// decays like one clamped step instead of annihilating the velocity
/// before any travel happens.
pub const MAX_STEP: f32 = 0.064;

/// Per-frame decay base; friction raises the effective exponent
const DECAY_BASE: f32 = 0.95;

/// Smoothing factor for the velocity estimate during tracking
const VELOCITY_EMA_ALPHA: f32 = 0.3;

/// Inertial scroll state for one scrollable strip
#[derive(Clone, Debug)]
pub struct MomentumPhysics {
    offset: Vec2,
    velocity: Vec2,
    /// Inclusive offset bounds per axis
    bounds_x: (f32, f32),
    bounds_y: (f32, f32),
    /// Alignment points the strip settles onto, per axis
    snap_offsets_x: Vec<f32>,
    snap_offsets_y: Vec<f32>,
    state: MomentumState,
    config: MomentumConfig,
    /// Bounces since the last release, for consumers that want haptics
    bounce_count: u32,
}

impl MomentumPhysics {
    pub fn new(config: MomentumConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            bounds_x: (0.0, 0.0),
            bounds_y: (0.0, 0.0),
            snap_offsets_x: Vec::new(),
            snap_offsets_y: Vec::new(),
            state: MomentumState::Idle,
            config,
            bounce_count: 0,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn state(&self) -> MomentumState {
        self.state
    }

    pub fn bounce_count(&self) -> u32 {
        self.bounce_count
    }

    /// Set inclusive scroll bounds per axis
    pub fn set_bounds(&mut self, x: (f32, f32), y: (f32, f32)) {
        self.bounds_x = (x.0.min(x.1), x.0.max(x.1));
        self.bounds_y = (y.0.min(y.1), y.0.max(y.1));
    }

    /// Replace the alignment points the snap pass targets
    pub fn set_snap_offsets(&mut self, x: Vec<f32>, y: Vec<f32>) {
        self.snap_offsets_x = x;
        self.snap_offsets_y = y;
    }

    /// Feed a gesture delta. Updates the offset directly and folds an
    /// instantaneous velocity estimate into an exponential moving average,
    /// so a jittery final event does not dominate the release velocity.
    pub fn track(&mut self, dx: f32, dy: f32, dt: f32) {
        if let Some(next) = self.state.on_event(event_types::SCROLL) {
            self.state = next;
        }

        if dt > 0.0 && dt < 0.5 {
            // px/frame at the 60fps reference
            let instant_x = dx / (dt * 60.0);
            let instant_y = dy / (dt * 60.0);
            self.velocity.x =
                self.velocity.x * (1.0 - VELOCITY_EMA_ALPHA) + instant_x * VELOCITY_EMA_ALPHA;
            self.velocity.y =
                self.velocity.y * (1.0 - VELOCITY_EMA_ALPHA) + instant_y * VELOCITY_EMA_ALPHA;
        }

        self.offset.x = (self.offset.x + dx).clamp(self.bounds_x.0, self.bounds_x.1);
        self.offset.y = (self.offset.y + dy).clamp(self.bounds_y.0, self.bounds_y.1);
    }

    /// Gesture ended; start decelerating from the captured velocity
    pub fn release(&mut self) {
        self.bounce_count = 0;
        if self.speed_below(self.config.stop_threshold) {
            self.velocity = Vec2::ZERO;
            self.state = MomentumState::Idle;
            return;
        }
        if let Some(next) = self.state.on_event(event_types::SCROLL_END) {
            self.state = next;
        } else {
            self.state = MomentumState::Decelerating;
        }
    }

    /// Release with an explicit velocity, in px/frame. Used by hosts that
    /// track velocity themselves.
    pub fn release_with_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity = Vec2::new(vx, vy);
        self.state = MomentumState::Tracking;
        self.release();
    }

    /// One integration step. Returns true while still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != MomentumState::Decelerating {
            return false;
        }
        let frames = dt.clamp(0.0, MAX_STEP) * 60.0;
        if frames <= 0.0 {
            return true;
        }

        // Frictional decay, frame-rate independent
        let decay = DECAY_BASE.powf(self.config.friction * frames);
        self.velocity.x *= decay;
        self.velocity.y *= decay;

        // Advance and bounce
        let (x, vx, bounced_x) = advance_axis(
            self.offset.x,
            self.velocity.x,
            frames,
            self.bounds_x,
            self.config.bounce_damping,
        );
        let (y, vy, bounced_y) = advance_axis(
            self.offset.y,
            self.velocity.y,
            frames,
            self.bounds_y,
            self.config.bounce_damping,
        );
        self.offset = Vec2::new(x, y);
        self.velocity = Vec2::new(vx, vy);
        if bounced_x || bounced_y {
            self.bounce_count += 1;
        }

        // Snap pass: once slow enough, nudge toward the nearest alignment
        // point instead of stopping wherever friction ran out
        let mut snap_converged = true;
        if self.speed_below(self.config.snap_speed_threshold) {
            if let Some(snap) = nearest(&self.snap_offsets_x, self.offset.x) {
                self.velocity.x += (snap - self.offset.x) * self.config.snap_strength;
                snap_converged &= (snap - self.offset.x).abs() < 0.5;
            }
            if let Some(snap) = nearest(&self.snap_offsets_y, self.offset.y) {
                self.velocity.y += (snap - self.offset.y) * self.config.snap_strength;
                snap_converged &= (snap - self.offset.y).abs() < 0.5;
            }
        }

        // A snap in progress keeps the loop alive even through the zero
        // velocity crossing at an oscillation peak
        if self.speed_below(self.config.stop_threshold) && snap_converged {
            self.velocity = Vec2::ZERO;
            if let Some(next) = self.state.on_event(event_types::SETTLED) {
                self.state = next;
            }
            return false;
        }
        true
    }

    /// Stop immediately, keeping the current offset
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.state = MomentumState::Idle;
    }

    fn speed_below(&self, threshold: f32) -> bool {
        self.velocity.x.abs() < threshold && self.velocity.y.abs() < threshold
    }
}

/// Advance one axis, clamping to bounds and reflecting velocity with the
/// damping factor on contact. Returns (offset, velocity, bounced).
fn advance_axis(
    offset: f32,
    velocity: f32,
    frames: f32,
    bounds: (f32, f32),
    bounce_damping: f32,
) -> (f32, f32, bool) {
    let next = offset + velocity * frames;
    if next < bounds.0 {
        (bounds.0, -velocity * bounce_damping, velocity.abs() > 0.0)
    } else if next > bounds.1 {
        (bounds.1, -velocity * bounce_damping, velocity.abs() > 0.0)
    } else {
        (next, velocity, false)
    }
}

/// Nearest alignment point to `offset`, if any are configured
fn nearest(snaps: &[f32], offset: f32) -> Option<f32> {
    snaps
        .iter()
        .copied()
        .min_by(|a, b| {
            (a - offset)
                .abs()
                .partial_cmp(&(b - offset).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run_to_rest(physics: &mut MomentumPhysics, max_ticks: usize) -> usize {
        for i in 0..max_ticks {
            if !physics.tick(DT) {
                return i + 1;
            }
        }
        max_ticks
    }

    #[test]
    fn decays_to_rest_within_bounds() {
        let mut physics = MomentumPhysics::new(MomentumConfig::default());
        physics.set_bounds((0.0, 500.0), (0.0, 0.0));
        physics.release_with_velocity(10.0, 0.0);

        let mut max_seen = 0.0_f32;
        for _ in 0..2000 {
            let moving = physics.tick(DT);
            let offset = physics.offset().x;
            assert!((0.0..=500.0).contains(&offset));
            max_seen = max_seen.max(offset);
            if !moving {
                break;
            }
        }
        assert_eq!(physics.state(), MomentumState::Idle);
        // v0=10 px/frame with 5% decay travels ~200px, well inside bounds
        assert!(max_seen < 500.0);
        assert_eq!(physics.bounce_count(), 0);
    }

    #[test]
    fn bounces_exactly_once_when_reaching_bound() {
        let mut physics = MomentumPhysics::new(MomentumConfig::default());
        physics.set_bounds((0.0, 500.0), (0.0, 0.0));
        // 30 px/frame travels ~600px unconstrained: must hit the 500 bound
        physics.release_with_velocity(30.0, 0.0);

        let mut bounced_at = None;
        for tick in 0..2000 {
            let moving = physics.tick(DT);
            assert!((0.0..=500.0).contains(&physics.offset().x));
            if physics.bounce_count() > 0 && bounced_at.is_none() {
                bounced_at = Some(tick);
                // Velocity reversed and damped
                assert!(physics.velocity().x < 0.0);
            }
            if !moving {
                break;
            }
        }
        assert!(bounced_at.is_some(), "never reached the bound");
        assert_eq!(physics.bounce_count(), 1);
        assert_eq!(physics.state(), MomentumState::Idle);
    }

    #[test]
    fn long_pause_is_clamped_and_the_flick_survives() {
        let mut physics = MomentumPhysics::new(MomentumConfig::default());
        physics.set_bounds((0.0, 500.0), (0.0, 0.0));
        // 30 px/frame travels ~570px unconstrained and must bounce once
        physics.release_with_velocity(30.0, 0.0);

        // A 5-second stall integrates like one MAX_STEP step: the flick
        // keeps most of its velocity and travel instead of dying in place
        assert!(physics.tick(5.0));
        assert!(physics.offset().x > 50.0, "stalled at {}", physics.offset().x);
        assert!(physics.velocity().x > 10.0);

        run_to_rest(&mut physics, 4000);
        assert_eq!(physics.bounce_count(), 1);
        assert_eq!(physics.state(), MomentumState::Idle);
    }

    #[test]
    fn higher_friction_stops_sooner() {
        let mut slick = MomentumPhysics::new(MomentumConfig::default());
        let mut grippy = MomentumPhysics::new(MomentumConfig {
            friction: 3.0,
            ..Default::default()
        });
        for physics in [&mut slick, &mut grippy] {
            physics.set_bounds((0.0, 10_000.0), (0.0, 0.0));
            physics.release_with_velocity(20.0, 0.0);
        }
        let slick_ticks = run_to_rest(&mut slick, 4000);
        let grippy_ticks = run_to_rest(&mut grippy, 4000);
        assert!(grippy_ticks < slick_ticks);
        assert!(grippy.offset().x < slick.offset().x);
    }

    #[test]
    fn snaps_to_nearest_alignment_point() {
        let mut physics = MomentumPhysics::new(MomentumConfig::default());
        physics.set_bounds((0.0, 500.0), (0.0, 0.0));
        physics.set_snap_offsets(vec![0.0, 120.0, 240.0, 360.0], vec![]);
        physics.release_with_velocity(8.0, 0.0);

        run_to_rest(&mut physics, 4000);
        // 8 px/frame travels ~160px; the snap pass pulls it onto 120
        let nearest_snap = 120.0;
        assert!(
            (physics.offset().x - nearest_snap).abs() < 3.0,
            "settled at {} instead of {}",
            physics.offset().x,
            nearest_snap
        );
    }

    #[test]
    fn tracking_captures_release_velocity() {
        let mut physics = MomentumPhysics::new(MomentumConfig::default());
        physics.set_bounds((0.0, 500.0), (0.0, 0.0));

        // Steady 5px-per-frame drag
        for _ in 0..10 {
            physics.track(5.0, 0.0, DT);
        }
        assert_eq!(physics.state(), MomentumState::Tracking);
        assert!(physics.velocity().x > 2.0);

        physics.release();
        assert_eq!(physics.state(), MomentumState::Decelerating);
        assert!(physics.tick(DT));
    }

    #[test]
    fn release_without_velocity_goes_idle() {
        let mut physics = MomentumPhysics::new(MomentumConfig::default());
        physics.set_bounds((0.0, 500.0), (0.0, 0.0));
        physics.track(0.0, 0.0, DT);
        physics.release();
        assert_eq!(physics.state(), MomentumState::Idle);
        assert!(!physics.tick(DT));
    }

    #[test]
    fn new_gesture_interrupts_deceleration() {
        let mut physics = MomentumPhysics::new(MomentumConfig::default());
        physics.set_bounds((0.0, 500.0), (0.0, 0.0));
        physics.release_with_velocity(10.0, 0.0);
        physics.tick(DT);
        assert_eq!(physics.state(), MomentumState::Decelerating);

        physics.track(-2.0, 0.0, DT);
        assert_eq!(physics.state(), MomentumState::Tracking);
    }

    #[test]
    fn state_machine_transitions() {
        use tactile_core::events::event_types::*;
        let idle = MomentumState::Idle;
        assert_eq!(idle.on_event(SCROLL), Some(MomentumState::Tracking));
        assert_eq!(idle.on_event(SCROLL_END), None);
        assert_eq!(
            MomentumState::Tracking.on_event(SCROLL_END),
            Some(MomentumState::Decelerating)
        );
        assert_eq!(
            MomentumState::Decelerating.on_event(SETTLED),
            Some(MomentumState::Idle)
        );
    }
}
