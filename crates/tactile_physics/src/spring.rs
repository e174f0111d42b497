//! Spring physics
//!
//! A single-body mass-spring-damper integrated per axis. Springs are
//! constructed once per interactive element and re-parameterized in place
//! when configuration changes; the integration state (value, velocity)
//! survives re-parameterization so motion never jumps.

use tactile_core::geometry::Vec3;

/// Floor applied to mass and stiffness. Non-positive values are a caller
/// bug but never fatal (spec: recovered silently).
const MIN_PARAM: f32 = 0.1;

/// Maximum integration step in seconds. Longer frame gaps (background
/// tabs) are clamped rather than integrated in one unstable step.
pub const MAX_STEP: f32 = 0.032;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Spring stiffness (restoring force per unit displacement)
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
    /// Mass of the simulated body
    pub mass: f32,
    /// Rest detection threshold for displacement and velocity
    pub precision: f32,
}

impl SpringConfig {
    /// Create a config, flooring mass/stiffness above zero
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness: stiffness.max(MIN_PARAM),
            damping: damping.max(0.0),
            mass: mass.max(MIN_PARAM),
            precision: 0.01,
        }
    }

    /// Create a config from a damping ratio instead of a raw coefficient.
    ///
    /// `ratio` is clamped to [0, 2]: 1.0 is critical damping
    /// (`c = 2·√(k·m)`), below 1 underdamped, above 1 overdamped.
    pub fn with_damping_ratio(stiffness: f32, ratio: f32, mass: f32) -> Self {
        let stiffness = stiffness.max(MIN_PARAM);
        let mass = mass.max(MIN_PARAM);
        let ratio = ratio.clamp(0.0, 2.0);
        let damping = ratio * 2.0 * (stiffness * mass).sqrt();
        Self {
            stiffness,
            damping,
            mass,
            precision: 0.01,
        }
    }

    /// Override the rest-detection threshold
    pub fn precision(mut self, precision: f32) -> Self {
        self.precision = precision.max(f32::EPSILON);
        self
    }

    /// Critically damped, moderate speed
    pub fn gentle() -> Self {
        Self::with_damping_ratio(120.0, 1.0, 1.0)
    }

    /// Underdamped with visible overshoot
    pub fn wobbly() -> Self {
        Self::with_damping_ratio(180.0, 0.55, 1.0)
    }

    /// Stiff and critically damped, fast settle with no rebound
    pub fn stiff() -> Self {
        Self::with_damping_ratio(400.0, 1.0, 1.0)
    }

    /// Quick response with a hint of overshoot
    pub fn snappy() -> Self {
        Self::with_damping_ratio(250.0, 0.85, 1.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::with_damping_ratio(180.0, 1.0, 1.0)
    }
}

/// A 3-axis spring animating a value toward a target
#[derive(Clone, Debug)]
pub struct Spring {
    value: Vec3,
    velocity: Vec3,
    target: Vec3,
    config: SpringConfig,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: Vec3) -> Self {
        Self {
            value: initial,
            velocity: Vec3::ZERO,
            target: initial,
            config,
        }
    }

    /// Integrate one step of `force = −k·(x − target) − c·v` per axis.
    ///
    /// `dt` is in seconds and clamped to [`MAX_STEP`]. Returns the new value.
    pub fn step(&mut self, dt: f32) -> Vec3 {
        let dt = dt.clamp(0.0, MAX_STEP);
        if dt == 0.0 {
            return self.value;
        }

        let k = self.config.stiffness;
        let c = self.config.damping;
        let inv_mass = 1.0 / self.config.mass;

        let displacement = self.value - self.target;
        let force = -(displacement * k) - self.velocity * c;
        let acceleration = force * inv_mass;

        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;
        self.value
    }

    /// True when displacement and velocity are below the precision
    /// threshold on every axis. Sole termination condition for frame loops.
    pub fn is_settled(&self) -> bool {
        let p = self.config.precision;
        let d = self.value - self.target;
        d.x.abs() < p
            && d.y.abs() < p
            && d.z.abs() < p
            && self.velocity.x.abs() < p
            && self.velocity.y.abs() < p
            && self.velocity.z.abs() < p
    }

    /// Kinetic + potential energy of the system. Debug/test aid.
    pub fn energy(&self) -> f32 {
        let v2 = self.velocity.length_squared();
        let d2 = (self.value - self.target).length_squared();
        0.5 * self.config.mass * v2 + 0.5 * self.config.stiffness * d2
    }

    pub fn value(&self) -> Vec3 {
        self.value
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_value(&mut self, value: Vec3) {
        self.value = value;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Re-parameterize in place. Value/velocity/target are preserved so a
    /// config change mid-motion does not jump.
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Zero everything: value, velocity, and target return to the origin
    pub fn reset(&mut self) {
        self.value = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
        self.target = Vec3::ZERO;
    }
}
