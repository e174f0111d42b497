//! Tactile Core Primitives
//!
//! This crate provides the foundational types for the Tactile interaction
//! engine:
//!
//! - **Geometry**: points, rects, and the `Vec3` displacement carrier used
//!   throughout the physics layer
//! - **Input Events**: platform-agnostic pointer/scroll events and event-type
//!   constants
//! - **State Transitions**: the small FSM trait interaction drivers implement
//! - **Frame Clock**: a clock abstraction so drivers can be ticked by a real
//!   frame loop in production and by hand in tests
//!
//! # Example
//!
//! ```rust
//! use tactile_core::geometry::{Point, Rect, Vec3};
//!
//! let bounds = Rect::new(100.0, 50.0, 100.0, 100.0);
//! let center = bounds.center();
//! assert_eq!(center, Point::new(150.0, 100.0));
//!
//! let displacement = Vec3::new(3.0, 4.0, 0.0);
//! assert_eq!(displacement.length(), 5.0);
//! ```

pub mod clock;
pub mod easing;
pub mod events;
pub mod geometry;
pub mod stateful;

pub use clock::{FrameClock, ManualClock, SystemClock};
pub use easing::Easing;
pub use events::{InputEvent, ScrollDelta};
pub use geometry::{Point, Rect, Size, Vec2, Vec3};
pub use stateful::StateTransitions;
