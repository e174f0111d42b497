//! Motion configuration resolution
//!
//! Callers rarely specify a full physics configuration. A concrete
//! [`InteractionConfig`] is resolved from three layers, highest priority
//! first:
//!
//! 1. direct caller overrides
//! 2. ambient defaults (a named preset or a partial override set provided
//!    by the surrounding context)
//! 3. the built-in default preset
//!
//! On top of the merge, the accessibility sensitivity level scales the
//! amplitude-like fields (`max_displacement`, `rotation_amplitude`,
//! `scale_amplitude`) — never stiffness or damping, which stay physically
//! meaningful regardless of accessibility mode. Reduced motion collapses
//! the amplitude multiplier toward zero and suppresses rotation/scale
//! effects while keeping the spring itself running.

use std::str::FromStr;

use thiserror::Error;

/// How the pointer's presence maps to a target displacement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Pull toward the pointer, strongest at the center of the radius
    #[default]
    Magnetic,
    /// Alias behavior of [`InteractionKind::Magnetic`] kept as a distinct
    /// kind so consumers can style them differently
    Attract,
    /// Push away from the pointer; exact negation of attract
    Repel,
    /// Ease toward the pointer with a lower force ceiling than magnetic
    Follow,
    /// Trace a circle around the element center, rotating continuously
    Orbit,
    /// Bounded random jitter scaled by pointer proximity
    Particle,
    /// Inverse-square pull along the pointer direction
    Gravity,
}

/// Accessibility sensitivity level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SensitivityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl SensitivityLevel {
    /// Amplitude multiplier applied to displacement-like fields
    pub fn multiplier(&self) -> f32 {
        match self {
            SensitivityLevel::Low => 0.5,
            SensitivityLevel::Medium => 1.0,
            SensitivityLevel::High => 1.5,
        }
    }
}

/// Amplitude multiplier used when the platform signals reduced motion.
/// Near zero rather than zero so the spring still integrates and tests
/// can observe convergence.
pub const REDUCED_MOTION_MULTIPLIER: f32 = 0.05;

/// Fully resolved interaction configuration.
///
/// Invariants (enforced by [`resolve`]): `stiffness > 0`, `mass > 0`,
/// `damping_ratio ∈ [0, 2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionConfig {
    pub kind: InteractionKind,
    pub stiffness: f32,
    pub damping_ratio: f32,
    pub mass: f32,
    /// Hard cap on target displacement magnitude, in pixels
    pub max_displacement: f32,
    /// Activation radius around the element center, in pixels
    pub radius: f32,
    /// Force scale for the interaction kind's formula
    pub strength: f32,
    pub affects_rotation: bool,
    pub affects_scale: bool,
    /// Peak rotation in degrees at full displacement
    pub rotation_amplitude: f32,
    /// Peak scale delta at full displacement (0.1 = up to 1.1×)
    pub scale_amplitude: f32,
    /// Resolved accessibility multiplier, recorded for consumers
    pub sensitivity_multiplier: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            kind: InteractionKind::Magnetic,
            stiffness: 180.0,
            damping_ratio: 1.0,
            mass: 1.0,
            max_displacement: 40.0,
            radius: 120.0,
            strength: 1.0,
            affects_rotation: false,
            affects_scale: false,
            rotation_amplitude: 10.0,
            scale_amplitude: 0.08,
            sensitivity_multiplier: 1.0,
        }
    }
}

/// Partial configuration: every field optional, merged by [`resolve`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionOverrides {
    pub kind: Option<InteractionKind>,
    pub stiffness: Option<f32>,
    pub damping_ratio: Option<f32>,
    pub mass: Option<f32>,
    pub max_displacement: Option<f32>,
    pub radius: Option<f32>,
    pub strength: Option<f32>,
    pub affects_rotation: Option<bool>,
    pub affects_scale: Option<bool>,
    pub rotation_amplitude: Option<f32>,
    pub scale_amplitude: Option<f32>,
}

impl MotionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: InteractionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    pub fn damping_ratio(mut self, ratio: f32) -> Self {
        self.damping_ratio = Some(ratio);
        self
    }

    pub fn mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn max_displacement(mut self, px: f32) -> Self {
        self.max_displacement = Some(px);
        self
    }

    pub fn radius(mut self, px: f32) -> Self {
        self.radius = Some(px);
        self
    }

    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn affects_rotation(mut self, on: bool) -> Self {
        self.affects_rotation = Some(on);
        self
    }

    pub fn affects_scale(mut self, on: bool) -> Self {
        self.affects_scale = Some(on);
        self
    }

    pub fn rotation_amplitude(mut self, degrees: f32) -> Self {
        self.rotation_amplitude = Some(degrees);
        self
    }

    pub fn scale_amplitude(mut self, delta: f32) -> Self {
        self.scale_amplitude = Some(delta);
        self
    }

    /// Merge two partial configs; `self` wins where both are set
    fn over(self, lower: MotionOverrides) -> MotionOverrides {
        MotionOverrides {
            kind: self.kind.or(lower.kind),
            stiffness: self.stiffness.or(lower.stiffness),
            damping_ratio: self.damping_ratio.or(lower.damping_ratio),
            mass: self.mass.or(lower.mass),
            max_displacement: self.max_displacement.or(lower.max_displacement),
            radius: self.radius.or(lower.radius),
            strength: self.strength.or(lower.strength),
            affects_rotation: self.affects_rotation.or(lower.affects_rotation),
            affects_scale: self.affects_scale.or(lower.affects_scale),
            rotation_amplitude: self.rotation_amplitude.or(lower.rotation_amplitude),
            scale_amplitude: self.scale_amplitude.or(lower.scale_amplitude),
        }
    }
}

/// Error parsing a named preset
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("unknown motion preset: {0}")]
    Unknown(String),
}

/// Named motion presets usable as ambient defaults
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionPreset {
    /// Small displacement, fast critically-damped settle
    Subtle,
    /// The built-in defaults
    #[default]
    Standard,
    /// Large displacement with rotation and scale enabled
    Strong,
    /// Underdamped, slow, dreamy
    Floaty,
}

impl MotionPreset {
    /// Partial override set this preset contributes
    pub fn overrides(&self) -> MotionOverrides {
        match self {
            MotionPreset::Subtle => MotionOverrides::new()
                .stiffness(260.0)
                .damping_ratio(1.0)
                .max_displacement(16.0)
                .rotation_amplitude(4.0)
                .scale_amplitude(0.03),
            MotionPreset::Standard => MotionOverrides::new(),
            MotionPreset::Strong => MotionOverrides::new()
                .max_displacement(64.0)
                .strength(1.4)
                .affects_rotation(true)
                .affects_scale(true),
            MotionPreset::Floaty => MotionOverrides::new()
                .stiffness(90.0)
                .damping_ratio(0.6)
                .mass(1.4)
                .max_displacement(56.0),
        }
    }
}

impl FromStr for MotionPreset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subtle" => Ok(MotionPreset::Subtle),
            "standard" => Ok(MotionPreset::Standard),
            "strong" => Ok(MotionPreset::Strong),
            "floaty" => Ok(MotionPreset::Floaty),
            other => Err(PresetError::Unknown(other.to_string())),
        }
    }
}

/// Resolve a concrete [`InteractionConfig`] from override layers.
///
/// `direct` beats `ambient`, which beats the built-in defaults. The
/// sensitivity multiplier scales amplitude fields only; `reduced_motion`
/// replaces it with [`REDUCED_MOTION_MULTIPLIER`] and suppresses
/// rotation/scale regardless of what the layers requested.
pub fn resolve(
    direct: Option<&MotionOverrides>,
    ambient: Option<&MotionOverrides>,
    sensitivity: SensitivityLevel,
    reduced_motion: bool,
) -> InteractionConfig {
    let merged = direct
        .copied()
        .unwrap_or_default()
        .over(ambient.copied().unwrap_or_default());
    let base = InteractionConfig::default();

    let multiplier = if reduced_motion {
        REDUCED_MOTION_MULTIPLIER
    } else {
        sensitivity.multiplier()
    };

    let stiffness = merged.stiffness.unwrap_or(base.stiffness);
    let mass = merged.mass.unwrap_or(base.mass);
    if stiffness <= 0.0 || mass <= 0.0 {
        tracing::warn!(stiffness, mass, "non-positive spring parameter floored");
    }

    InteractionConfig {
        kind: merged.kind.unwrap_or(base.kind),
        stiffness: stiffness.max(0.1),
        damping_ratio: merged
            .damping_ratio
            .unwrap_or(base.damping_ratio)
            .clamp(0.0, 2.0),
        mass: mass.max(0.1),
        max_displacement: merged.max_displacement.unwrap_or(base.max_displacement) * multiplier,
        radius: merged.radius.unwrap_or(base.radius).max(1.0),
        strength: merged.strength.unwrap_or(base.strength),
        affects_rotation: !reduced_motion
            && merged.affects_rotation.unwrap_or(base.affects_rotation),
        affects_scale: !reduced_motion && merged.affects_scale.unwrap_or(base.affects_scale),
        rotation_amplitude: merged
            .rotation_amplitude
            .unwrap_or(base.rotation_amplitude)
            * multiplier,
        scale_amplitude: merged.scale_amplitude.unwrap_or(base.scale_amplitude) * multiplier,
        sensitivity_multiplier: multiplier,
    }
}
