//! State transitions for interaction drivers
//!
//! Small FSM trait shared by the interaction session and momentum drivers.
//! States are plain enums; transitions are a pure function of
//! `(state, event)` so drivers can be exercised in tests by feeding event
//! constants directly.
//!
//! # Example
//!
//! ```rust
//! use tactile_core::events::event_types::*;
//! use tactile_core::stateful::StateTransitions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum HoverState {
//!     Idle,
//!     Hovered,
//! }
//!
//! impl StateTransitions for HoverState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (HoverState::Idle, POINTER_ENTER) => Some(HoverState::Hovered),
//!             (HoverState::Hovered, POINTER_LEAVE) => Some(HoverState::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let state = HoverState::Idle;
//! assert_eq!(state.on_event(POINTER_ENTER), Some(HoverState::Hovered));
//! assert_eq!(state.on_event(POINTER_LEAVE), None);
//! ```

use std::hash::Hash;

/// Trait for interaction state enums that respond to input events
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}
