//! Force-field resolution
//!
//! Maps an interaction kind plus pointer/element geometry into the target
//! displacement the spring is pulled toward. The raw kind formula runs
//! first, then the post-passes in a fixed order:
//!
//! 1. max-displacement clamp (direction preserved)
//! 2. directional shaping (angular window around a preferred direction)
//! 3. linked-element contributions, followed by a re-clamp
//! 4. snap-point override (replaces the target outright when close enough)
//!
//! The resolver never reads the spring's current value; targets flow one
//! way, from input geometry to the integrator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tactile_core::geometry::{angle_delta, Point, Vec3};

use crate::config::{InteractionConfig, InteractionKind};

/// Computed target is replaced by a snap point within this distance
pub const SNAP_TARGET_THRESHOLD: f32 = 25.0;

/// Pointer within this distance of a snap point's screen position also
/// triggers the override (tighter than the target threshold)
pub const SNAP_POINTER_THRESHOLD: f32 = 20.0;

/// Follow interactions ease toward the pointer but never latch onto it;
/// their pull is capped below the magnetic ceiling.
const FOLLOW_MAX_PULL: f32 = 0.75;

/// Pointer/element geometry for one resolution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldGeometry {
    /// Element center in host coordinates
    pub center: Point,
    /// Pointer position in the same coordinate space
    pub pointer: Point,
    /// Activation radius around the center
    pub radius: f32,
}

impl FieldGeometry {
    pub fn new(center: Point, pointer: Point, radius: f32) -> Self {
        Self {
            center,
            pointer,
            radius: radius.max(1.0),
        }
    }

    /// Pointer distance from the element center
    pub fn distance(&self) -> f32 {
        self.center.distance(self.pointer)
    }

    /// Pointer offset from the center as a displacement vector
    pub fn delta(&self) -> Vec3 {
        Vec3::new(
            self.pointer.x - self.center.x,
            self.pointer.y - self.center.y,
            0.0,
        )
    }
}

/// Angular falloff shape for a directional field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DirectionalFalloff {
    /// Smooth cosine window, full weight at the preferred angle
    #[default]
    Cosine,
    /// Straight-line falloff from center to window edge
    Linear,
}

/// Angular weighting that biases force toward (or away from) a direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalField {
    /// Preferred direction in radians
    pub angle: f32,
    /// Half-width of the window in radians; weight is zero outside it
    pub width: f32,
    pub falloff: DirectionalFalloff,
    /// Invert the window: attenuate inside, pass outside
    pub invert: bool,
}

impl DirectionalField {
    pub fn new(angle: f32, width: f32) -> Self {
        Self {
            angle,
            width: width.max(f32::EPSILON),
            falloff: DirectionalFalloff::Cosine,
            invert: false,
        }
    }

    pub fn linear(mut self) -> Self {
        self.falloff = DirectionalFalloff::Linear;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }

    /// Weight in [0, 1] for a force pointing at `angle` radians
    fn weight(&self, angle: f32) -> f32 {
        let offset = angle_delta(self.angle, angle).abs();
        let base = if offset >= self.width {
            0.0
        } else {
            match self.falloff {
                DirectionalFalloff::Cosine => {
                    (offset / self.width * std::f32::consts::FRAC_PI_2).cos()
                }
                DirectionalFalloff::Linear => 1.0 - offset / self.width,
            }
        };
        if self.invert {
            1.0 - base
        } else {
            base
        }
    }
}

/// Whether a linked element pulls or pushes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkMode {
    #[default]
    Attract,
    Repel,
}

/// One linked element's contribution input, already resolved by the caller
/// into this element's displacement space. A peer that has vanished simply
/// never appears in the slice — no coupling force this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkedContribution {
    /// Peer's last-published target position, relative to this element
    pub offset: Vec3,
    pub strength: f32,
    pub mode: LinkMode,
    /// Coupling is ignored beyond this distance
    pub max_distance: f32,
}

/// A candidate resting offset from the element center
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapPoint {
    pub x: f32,
    pub y: f32,
}

impl SnapPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }
}

/// Result of one force-field resolution
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldEffect {
    /// Target displacement for the spring
    pub target: Vec3,
    /// Extra scale response in [0, 1]; only gravity produces it
    pub scale_boost: f32,
    /// True when a snap point replaced the computed target
    pub snapped: bool,
}

/// Force-field resolver. Owns the jitter RNG for particle interactions so
/// repeated resolutions produce varied (not deterministic) feedback.
#[derive(Debug)]
pub struct ForceField {
    rng: SmallRng,
}

impl ForceField {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Resolve the target displacement for one tick.
    ///
    /// `elapsed_secs` drives time-based kinds (orbit). `linked` carries the
    /// pre-resolved contributions of linked peers; `snaps` the candidate
    /// resting offsets.
    pub fn resolve(
        &mut self,
        geometry: &FieldGeometry,
        config: &InteractionConfig,
        elapsed_secs: f32,
        directional: Option<&DirectionalField>,
        linked: &[LinkedContribution],
        snaps: &[SnapPoint],
    ) -> FieldEffect {
        let raw = self.raw_target(geometry, config, elapsed_secs);

        // 1. Clamp, preserving direction
        let mut target = raw.target.clamp_length(config.max_displacement);

        // 2. Directional shaping attenuates the in-plane component
        if let Some(field) = directional {
            let planar = Vec3::new(target.x, target.y, 0.0);
            if planar.length() > f32::EPSILON {
                let weight = field.weight(planar.y.atan2(planar.x));
                target.x *= weight;
                target.y *= weight;
            }
        }

        // 3. Linked contributions, then re-clamp
        for link in linked {
            target += link_force(target, link);
        }
        let mut target = target.clamp_length(config.max_displacement);

        // 4. Snap override wins outright
        let mut snapped = false;
        if let Some(snap) = self.matching_snap(geometry, target, snaps) {
            target = snap.as_vec3();
            snapped = true;
        }

        FieldEffect {
            target,
            scale_boost: raw.scale_boost,
            snapped,
        }
    }

    /// The per-kind formula, before any post-pass
    fn raw_target(
        &mut self,
        geometry: &FieldGeometry,
        config: &InteractionConfig,
        elapsed_secs: f32,
    ) -> FieldEffect {
        let distance = geometry.distance();
        let radius = geometry.radius;
        let delta = geometry.delta();
        let strength = config.strength;

        match config.kind {
            InteractionKind::Magnetic | InteractionKind::Attract => {
                let pull = (strength * (1.0 - distance / radius)).clamp(0.0, 1.0);
                FieldEffect {
                    target: delta * pull,
                    ..Default::default()
                }
            }
            InteractionKind::Repel => {
                let pull = (strength * (1.0 - distance / radius)).clamp(0.0, 1.0);
                FieldEffect {
                    target: -(delta * pull),
                    ..Default::default()
                }
            }
            InteractionKind::Follow => {
                let pull =
                    (strength * (1.0 - distance / (2.0 * radius))).clamp(0.0, FOLLOW_MAX_PULL);
                FieldEffect {
                    target: delta * pull,
                    ..Default::default()
                }
            }
            InteractionKind::Orbit => {
                // Rotates continuously around the center, not just
                // pointer-reactive: the time term keeps it moving while the
                // pointer is stationary.
                let angle = geometry.center.angle_to(geometry.pointer) + elapsed_secs;
                let orbit_radius = distance * strength;
                FieldEffect {
                    target: Vec3::new(
                        angle.cos() * orbit_radius,
                        angle.sin() * orbit_radius,
                        0.0,
                    ),
                    ..Default::default()
                }
            }
            InteractionKind::Particle => {
                let intensity = ((1.0 - distance / radius).clamp(0.0, 1.0)) * strength;
                let envelope = config.max_displacement * intensity;
                FieldEffect {
                    target: Vec3::new(
                        self.rng.gen_range(-1.0..=1.0) * envelope,
                        self.rng.gen_range(-1.0..=1.0) * envelope,
                        0.0,
                    ),
                    ..Default::default()
                }
            }
            InteractionKind::Gravity => {
                let normalized = (distance / radius).max(0.05);
                let pull = (strength / (normalized * normalized)).min(2.0 * strength);
                let ceiling = (2.0 * strength).max(f32::EPSILON);
                FieldEffect {
                    target: delta * (pull / ceiling),
                    scale_boost: (pull / ceiling).clamp(0.0, 1.0),
                    snapped: false,
                }
            }
        }
    }

    /// First snap point close enough to the computed target or the pointer
    fn matching_snap(
        &self,
        geometry: &FieldGeometry,
        target: Vec3,
        snaps: &[SnapPoint],
    ) -> Option<SnapPoint> {
        snaps.iter().copied().find(|snap| {
            let near_target = target.distance(snap.as_vec3()) <= SNAP_TARGET_THRESHOLD;
            let screen = Point::new(geometry.center.x + snap.x, geometry.center.y + snap.y);
            let near_pointer = geometry.pointer.distance(screen) <= SNAP_POINTER_THRESHOLD;
            near_target || near_pointer
        })
    }
}

impl Default for ForceField {
    fn default() -> Self {
        Self::new()
    }
}

/// Attraction/repulsion toward a linked peer's published target
fn link_force(current: Vec3, link: &LinkedContribution) -> Vec3 {
    let toward = link.offset - current;
    let distance = toward.length();
    if distance <= f32::EPSILON || distance > link.max_distance {
        return Vec3::ZERO;
    }
    let falloff = 1.0 - distance / link.max_distance;
    let force = toward.normalize() * (link.strength * falloff * distance);
    match link.mode {
        LinkMode::Attract => force,
        LinkMode::Repel => -force,
    }
}
