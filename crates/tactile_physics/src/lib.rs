//! Tactile Physics
//!
//! The simulation core of the Tactile interaction engine:
//!
//! - **Spring**: per-axis mass-spring-damper integration toward a target
//! - **Force Fields**: pointer geometry → target displacement for every
//!   interaction kind (magnetic, repel, follow, orbit, particle, gravity),
//!   with directional shaping, linked-element coupling, and snap points
//! - **Motion Config**: layered resolution of caller overrides, ambient
//!   defaults, and accessibility sensitivity into one concrete config
//! - **Momentum**: frictional flick-scroll decay with boundary bounce and
//!   alignment snapping
//!
//! # Example
//!
//! ```rust
//! use tactile_core::geometry::Vec3;
//! use tactile_physics::spring::{Spring, SpringConfig};
//!
//! let mut spring = Spring::new(SpringConfig::default(), Vec3::ZERO);
//! spring.set_target(Vec3::new(40.0, 0.0, 0.0));
//! for _ in 0..240 {
//!     spring.step(1.0 / 60.0);
//! }
//! assert!(spring.is_settled());
//! assert!((spring.value().x - 40.0).abs() < 0.1);
//! ```

pub mod config;
pub mod field;
pub mod momentum;
pub mod spring;

pub use config::{
    InteractionConfig, InteractionKind, MotionOverrides, MotionPreset, PresetError,
    SensitivityLevel,
};
pub use field::{
    DirectionalFalloff, DirectionalField, FieldEffect, FieldGeometry, ForceField, LinkMode,
    LinkedContribution, SnapPoint,
};
pub use momentum::{MomentumConfig, MomentumPhysics, MomentumState};
pub use spring::{Spring, SpringConfig};
