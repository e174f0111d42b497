//! Per-element interaction sessions
//!
//! A session owns everything one interactive element needs: its spring, its
//! force-field resolver, the resolved configuration, and the read-only
//! physics state the visual layer consumes. Sessions never share state;
//! linked-element coupling goes through the engine's published-target
//! lookup, resolved into plain [`LinkedContribution`]s before a tick.
//!
//! Lifecycle per element:
//!
//! - **Idle**: listeners attached (host-side), no motion, no frame demand
//! - **Active**: pointer inside the activation radius; every tick resolves
//!   a fresh force-field target before integrating
//! - **Settling**: pointer left; the spring runs home to the origin, then
//!   the session returns to Idle

use smallvec::SmallVec;
use tactile_core::events::{event_types, InputEvent};
use tactile_core::geometry::{Point, Rect, Vec3};
use tactile_core::stateful::StateTransitions;
use tactile_physics::config::{
    resolve, InteractionConfig, MotionOverrides, SensitivityLevel,
};
use tactile_physics::field::{
    DirectionalField, FieldGeometry, ForceField, LinkMode, LinkedContribution, SnapPoint,
};
use tactile_physics::spring::{Spring, SpringConfig};

use crate::engine::SessionId;

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    /// At rest; no frame demand
    #[default]
    Idle,
    /// Pointer engaged; target recomputed every tick
    Active,
    /// Pointer gone; spring returning to origin
    Settling,
}

impl StateTransitions for SessionPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (SessionPhase::Idle, POINTER_ENTER) => Some(SessionPhase::Active),
            (SessionPhase::Settling, POINTER_ENTER) => Some(SessionPhase::Active),
            (SessionPhase::Active, POINTER_LEAVE) => Some(SessionPhase::Settling),
            (SessionPhase::Settling, SETTLED) => Some(SessionPhase::Idle),
            (SessionPhase::Active, DISABLED) => Some(SessionPhase::Idle),
            (SessionPhase::Settling, DISABLED) => Some(SessionPhase::Idle),
            _ => None,
        }
    }
}

/// Link from one session to another. A weak association: the peer is a
/// handle lookup, never ownership, so tearing the peer down cannot dangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkedElement {
    pub peer: SessionId,
    pub strength: f32,
    pub mode: LinkMode,
    /// Coupling ignored beyond this distance
    pub max_distance: f32,
}

/// Live physics output, read-only to consumers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Pointer position normalized to element half-extent, in [-1, 1].
    /// Zero whenever the session is not active.
    pub relative_x: f32,
    pub relative_y: f32,
    /// Rotation delta in degrees
    pub rotation: f32,
    /// Absolute scale factor (1.0 = unscaled)
    pub scale: f32,
    /// True while the pointer is engaged
    pub active: bool,
    /// Current speed (velocity magnitude)
    pub velocity: f32,
    /// Pointer distance from the element center; zero when inactive
    pub distance: f32,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            relative_x: 0.0,
            relative_y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            active: false,
            velocity: 0.0,
            distance: 0.0,
        }
    }
}

/// Transform descriptor handed to the visual layer every frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub translate_z: f32,
    /// Degrees
    pub rotate_z: f32,
    pub scale: f32,
}

/// Options for creating a session
#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    /// Element bounds in host coordinates. The host re-supplies these on
    /// layout changes via the engine; the session never queries layout.
    pub bounds: Rect,
    /// Direct caller overrides (highest priority layer)
    pub overrides: MotionOverrides,
    /// Ambient/context defaults (middle layer)
    pub ambient: Option<MotionOverrides>,
    pub sensitivity: SensitivityLevel,
    pub reduced_motion: bool,
    pub disabled: bool,
    pub directional: Option<DirectionalField>,
    pub snap_points: Vec<SnapPoint>,
}

impl SessionOptions {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn overrides(mut self, overrides: MotionOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn ambient(mut self, ambient: MotionOverrides) -> Self {
        self.ambient = Some(ambient);
        self
    }

    pub fn sensitivity(mut self, level: SensitivityLevel) -> Self {
        self.sensitivity = level;
        self
    }

    pub fn reduced_motion(mut self, on: bool) -> Self {
        self.reduced_motion = on;
        self
    }

    pub fn disabled(mut self, on: bool) -> Self {
        self.disabled = on;
        self
    }

    pub fn directional(mut self, field: DirectionalField) -> Self {
        self.directional = Some(field);
        self
    }

    pub fn snap_points(mut self, points: Vec<SnapPoint>) -> Self {
        self.snap_points = points;
        self
    }
}

/// One interactive element's simulation state
pub struct InteractionSession {
    pub(crate) bounds: Rect,
    pub(crate) config: InteractionConfig,
    overrides: MotionOverrides,
    ambient: Option<MotionOverrides>,
    sensitivity: SensitivityLevel,
    reduced_motion: bool,
    disabled: bool,
    spring: Spring,
    field: ForceField,
    pointer: Option<Point>,
    phase: SessionPhase,
    elapsed: f32,
    directional: Option<DirectionalField>,
    snap_points: Vec<SnapPoint>,
    pub(crate) links: SmallVec<[LinkedElement; 2]>,
    state: PhysicsState,
    /// Latest scale boost from the field (gravity only)
    scale_boost: f32,
}

impl InteractionSession {
    pub fn new(options: SessionOptions) -> Self {
        let config = resolve(
            Some(&options.overrides),
            options.ambient.as_ref(),
            options.sensitivity,
            options.reduced_motion,
        );
        let spring = Spring::new(spring_config(&config), Vec3::ZERO);
        Self {
            bounds: options.bounds,
            config,
            overrides: options.overrides,
            ambient: options.ambient,
            sensitivity: options.sensitivity,
            reduced_motion: options.reduced_motion,
            disabled: options.disabled,
            spring,
            field: ForceField::new(),
            pointer: None,
            phase: SessionPhase::Idle,
            elapsed: 0.0,
            directional: options.directional,
            snap_points: options.snap_points,
            links: SmallVec::new(),
            state: PhysicsState::default(),
            scale_boost: 0.0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn physics_state(&self) -> &PhysicsState {
        &self.state
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translate_x: self.state.x,
            translate_y: self.state.y,
            translate_z: self.state.z,
            rotate_z: self.state.rotation,
            scale: self.state.scale,
        }
    }

    /// True while the session demands frames
    pub fn is_animating(&self) -> bool {
        match self.phase {
            SessionPhase::Idle => false,
            SessionPhase::Active => true,
            SessionPhase::Settling => !self.spring.is_settled(),
        }
    }

    /// Route an input event. Disabled sessions ignore everything.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if self.disabled {
            return;
        }
        match *event {
            InputEvent::PointerEnter { x, y } => {
                self.pointer = Some(Point::new(x, y));
                if let Some(next) = self.phase.on_event(event_types::POINTER_ENTER) {
                    tracing::debug!(?next, "session activated");
                    self.phase = next;
                }
            }
            InputEvent::PointerMove { x, y } => {
                // Target recomputation happens at the top of the next tick;
                // input handling always precedes that frame's integration
                if self.phase == SessionPhase::Active {
                    self.pointer = Some(Point::new(x, y));
                }
            }
            InputEvent::PointerLeave => {
                self.pointer = None;
                if let Some(next) = self.phase.on_event(event_types::POINTER_LEAVE) {
                    self.phase = next;
                }
                self.spring.set_target(Vec3::ZERO);
            }
            _ => {}
        }
    }

    /// One frame: resolve the field target (while active), integrate the
    /// spring, refresh the consumer-facing state. Returns true while the
    /// session still demands frames.
    pub fn integrate(&mut self, dt: f32, linked: &[LinkedContribution]) -> bool {
        if self.disabled {
            return false;
        }
        self.elapsed += dt;

        if self.phase == SessionPhase::Active {
            if let Some(pointer) = self.pointer {
                let geometry =
                    FieldGeometry::new(self.bounds.center(), pointer, self.config.radius);
                let effect = self.field.resolve(
                    &geometry,
                    &self.config,
                    self.elapsed,
                    self.directional.as_ref(),
                    linked,
                    &self.snap_points,
                );
                self.spring.set_target(effect.target);
                self.scale_boost = effect.scale_boost;
            }
        }

        self.spring.step(dt);

        if self.phase == SessionPhase::Settling && self.spring.is_settled() {
            if let Some(next) = self.phase.on_event(event_types::SETTLED) {
                tracing::debug!("session settled");
                self.phase = next;
            }
            self.scale_boost = 0.0;
        }

        self.refresh_state();
        self.is_animating()
    }

    /// Spring target in host coordinates, published for linked peers
    pub(crate) fn published_target(&self) -> Vec3 {
        let center = self.bounds.center();
        let target = self.spring.target();
        Vec3::new(center.x + target.x, center.y + target.y, target.z)
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.spring.set_value(position);
        self.refresh_state();
    }

    /// Zero all motion state. Idempotent.
    pub fn reset(&mut self) {
        self.spring.reset();
        self.pointer = None;
        self.phase = SessionPhase::Idle;
        self.elapsed = 0.0;
        self.scale_boost = 0.0;
        self.state = PhysicsState::default();
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub(crate) fn set_snap_points(&mut self, points: Vec<SnapPoint>) {
        self.snap_points = points;
    }

    pub(crate) fn set_directional(&mut self, field: Option<DirectionalField>) {
        self.directional = field;
    }

    /// Disabling snaps target and position to the origin and stops the loop
    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            if let Some(next) = self.phase.on_event(event_types::DISABLED) {
                self.phase = next;
            }
            self.pointer = None;
            self.spring.reset();
            self.scale_boost = 0.0;
            self.state = PhysicsState::default();
        }
    }

    /// Replace the direct override layer and re-resolve the configuration.
    /// Spring value/velocity survive, so motion never jumps.
    pub(crate) fn update(&mut self, overrides: MotionOverrides) {
        self.overrides = overrides;
        self.reresolve();
    }

    pub(crate) fn set_sensitivity(&mut self, level: SensitivityLevel) {
        self.sensitivity = level;
        self.reresolve();
    }

    pub(crate) fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
        self.reresolve();
    }

    fn reresolve(&mut self) {
        self.config = resolve(
            Some(&self.overrides),
            self.ambient.as_ref(),
            self.sensitivity,
            self.reduced_motion,
        );
        self.spring.set_config(spring_config(&self.config));
    }

    /// Derive the consumer-facing state from the spring and pointer.
    /// Rotation/scale respond proportionally to normalized displacement,
    /// not as an on/off effect.
    fn refresh_state(&mut self) {
        let value = self.spring.value();
        let magnitude = value.length();
        let normalized = if self.config.max_displacement > f32::EPSILON {
            (magnitude / self.config.max_displacement).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let active = self.phase == SessionPhase::Active;
        let (relative_x, relative_y, distance) = match (active, self.pointer) {
            (true, Some(pointer)) => {
                let center = self.bounds.center();
                let half_w = (self.bounds.width() / 2.0).max(f32::EPSILON);
                let half_h = (self.bounds.height() / 2.0).max(f32::EPSILON);
                (
                    ((pointer.x - center.x) / half_w).clamp(-1.0, 1.0),
                    ((pointer.y - center.y) / half_h).clamp(-1.0, 1.0),
                    center.distance(pointer),
                )
            }
            _ => (0.0, 0.0, 0.0),
        };

        let rotation = if self.config.affects_rotation {
            normalized * self.config.rotation_amplitude
        } else {
            0.0
        };
        let scale = if self.config.affects_scale {
            1.0 + (normalized + self.scale_boost) * self.config.scale_amplitude
        } else {
            1.0
        };

        self.state = PhysicsState {
            x: value.x,
            y: value.y,
            z: value.z,
            relative_x,
            relative_y,
            rotation,
            scale,
            active,
            velocity: self.spring.velocity().length(),
            distance,
        };
    }
}

fn spring_config(config: &InteractionConfig) -> SpringConfig {
    SpringConfig::with_damping_ratio(config.stiffness, config.damping_ratio, config.mass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_physics::config::InteractionKind;

    const DT: f32 = 1.0 / 60.0;

    fn options() -> SessionOptions {
        SessionOptions::new(Rect::new(100.0, 50.0, 100.0, 100.0)).overrides(
            MotionOverrides::new()
                .kind(InteractionKind::Magnetic)
                .radius(150.0)
                .strength(1.0)
                .max_displacement(40.0),
        )
    }

    #[test]
    fn phase_transitions() {
        use event_types::*;
        let idle = SessionPhase::Idle;
        assert_eq!(idle.on_event(POINTER_ENTER), Some(SessionPhase::Active));
        assert_eq!(idle.on_event(POINTER_LEAVE), None);
        assert_eq!(
            SessionPhase::Active.on_event(POINTER_LEAVE),
            Some(SessionPhase::Settling)
        );
        assert_eq!(
            SessionPhase::Settling.on_event(POINTER_ENTER),
            Some(SessionPhase::Active)
        );
        assert_eq!(
            SessionPhase::Settling.on_event(SETTLED),
            Some(SessionPhase::Idle)
        );
    }

    #[test]
    fn enter_move_leave_lifecycle() {
        let mut session = InteractionSession::new(options());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.is_animating());

        session.handle_event(&InputEvent::PointerEnter { x: 200.0, y: 100.0 });
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.is_animating());

        for _ in 0..300 {
            session.integrate(DT, &[]);
        }
        let engaged = session.physics_state();
        assert!(engaged.active);
        assert!(engaged.x > 15.0 && engaged.x <= 40.0);
        assert!((engaged.relative_x - 1.0).abs() < 1e-6); // pointer at +half-extent
        assert_eq!(engaged.relative_y, 0.0);
        assert_eq!(engaged.distance, 50.0);

        session.handle_event(&InputEvent::PointerLeave);
        assert_eq!(session.phase(), SessionPhase::Settling);
        let mut ticks = 0;
        while session.integrate(DT, &[]) {
            ticks += 1;
            assert!(ticks < 2000, "never settled");
        }
        assert_eq!(session.phase(), SessionPhase::Idle);
        let rest = session.physics_state();
        assert!(rest.x.abs() < 0.05 && rest.y.abs() < 0.05);
        assert!(!rest.active);
        assert_eq!(rest.relative_x, 0.0);
    }

    #[test]
    fn rotation_and_scale_are_proportional() {
        let opts = SessionOptions::new(Rect::new(100.0, 50.0, 100.0, 100.0)).overrides(
            MotionOverrides::new()
                .radius(150.0)
                .max_displacement(40.0)
                .affects_rotation(true)
                .affects_scale(true)
                .rotation_amplitude(10.0)
                .scale_amplitude(0.1),
        );
        let mut session = InteractionSession::new(opts);
        session.handle_event(&InputEvent::PointerEnter { x: 200.0, y: 100.0 });
        for _ in 0..300 {
            session.integrate(DT, &[]);
        }
        let state = session.physics_state();
        // Steady-state displacement ~33.3px of a 40px clamp: responses sit
        // strictly between zero and the full amplitude
        assert!(state.rotation > 0.0 && state.rotation < 10.0);
        assert!(state.scale > 1.0 && state.scale < 1.1);
    }

    #[test]
    fn disabled_session_ignores_input_and_snaps_home() {
        let mut session = InteractionSession::new(options());
        session.handle_event(&InputEvent::PointerEnter { x: 200.0, y: 100.0 });
        for _ in 0..30 {
            session.integrate(DT, &[]);
        }
        assert!(session.physics_state().x > 0.0);

        session.set_disabled(true);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.physics_state().x, 0.0);
        assert!(!session.integrate(DT, &[]));

        session.handle_event(&InputEvent::PointerEnter { x: 200.0, y: 100.0 });
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = InteractionSession::new(options());
        session.handle_event(&InputEvent::PointerEnter { x: 200.0, y: 100.0 });
        for _ in 0..30 {
            session.integrate(DT, &[]);
        }

        session.reset();
        let once = *session.physics_state();
        session.reset();
        assert_eq!(once, *session.physics_state());
        assert_eq!(once, PhysicsState::default());
    }

    #[test]
    fn reduced_motion_still_integrates_at_low_intensity() {
        let opts = options().reduced_motion(true);
        let mut session = InteractionSession::new(opts);
        session.handle_event(&InputEvent::PointerEnter { x: 200.0, y: 100.0 });
        for _ in 0..300 {
            session.integrate(DT, &[]);
        }
        let state = session.physics_state();
        // The spring ran (nonzero displacement) but the clamp collapsed
        assert!(state.x > 0.0);
        assert!(state.x <= 40.0 * 0.05 + 1e-3);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.scale, 1.0);
    }

    #[test]
    fn update_preserves_motion_state() {
        let mut session = InteractionSession::new(options());
        session.handle_event(&InputEvent::PointerEnter { x: 200.0, y: 100.0 });
        for _ in 0..20 {
            session.integrate(DT, &[]);
        }
        let before = session.physics_state().x;
        session.update(
            MotionOverrides::new()
                .kind(InteractionKind::Magnetic)
                .radius(150.0)
                .stiffness(400.0)
                .max_displacement(40.0),
        );
        // No jump on reconfiguration
        assert_eq!(session.physics_state().x, before);
    }
}
