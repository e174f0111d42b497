//! Tactile Interaction Engine
//!
//! Per-element interaction sessions driven by the physics layer:
//!
//! - **Sessions**: one per interactive element, owning its spring and
//!   force-field state exclusively
//! - **Arena**: sessions live in a slotmap behind opaque handles, so a
//!   session can be torn down without leaving dangling references in
//!   linked peers
//! - **Frame driving**: the host calls `tick(dt)` once per frame and keeps
//!   scheduling frames while the engine reports motion
//! - **Momentum strips**: flick-scroll drivers for tab bars and carousels
//!
//! # Example
//!
//! ```rust
//! use tactile_core::events::InputEvent;
//! use tactile_core::geometry::Rect;
//! use tactile_interaction::{InteractionEngine, SessionOptions};
//!
//! let mut engine = InteractionEngine::new();
//! let button = engine.insert(SessionOptions::new(Rect::new(100.0, 50.0, 100.0, 100.0)));
//!
//! engine.handle_event(button, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });
//! for _ in 0..120 {
//!     engine.tick(1.0 / 60.0);
//!     let transform = engine.transform(button).unwrap();
//!     // hand transform to the visual layer
//!     let _ = transform.translate_x;
//! }
//!
//! // Pointer leaves; the engine stops demanding frames once settled
//! engine.handle_event(button, &InputEvent::PointerLeave);
//! while engine.tick(1.0 / 60.0) {}
//! assert!(!engine.is_animating(button));
//! ```

pub mod engine;
pub mod session;
pub mod strip;

pub use engine::{InteractionEngine, SessionError, SessionId};
pub use session::{LinkedElement, PhysicsState, SessionOptions, SessionPhase, Transform};
pub use strip::MomentumStrip;
