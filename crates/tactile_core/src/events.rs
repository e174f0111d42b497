//! Input event model
//!
//! Platform-agnostic pointer and scroll events. The host view layer owns the
//! real listeners and translates whatever its windowing system delivers into
//! these events before handing them to an interaction driver.

/// Event type identifier
pub type EventType = u32;

/// Event types the interaction drivers react to
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const SCROLL: EventType = 30;
    /// Scroll gesture ended (for deceleration/momentum)
    pub const SCROLL_END: EventType = 31;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;

    // Internal driver events
    /// Emitted by a driver when its motion has fully settled
    pub const SETTLED: EventType = 100;
    /// Emitted when the consuming element is disabled mid-interaction
    pub const DISABLED: EventType = 101;
}

/// Scroll delta in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollDelta {
    pub dx: f32,
    pub dy: f32,
}

/// An input event with its payload, as delivered by the host view layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer crossed into the element's activation area
    PointerEnter { x: f32, y: f32 },
    /// Pointer moved while inside the activation area
    PointerMove { x: f32, y: f32 },
    /// Pointer left the activation area
    PointerLeave,
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    /// Scroll/drag delta while a gesture is in progress
    Scroll(ScrollDelta),
    /// Scroll gesture ended; momentum may take over
    ScrollEnd,
}

impl InputEvent {
    /// Map to the event-type constant used by state machines
    pub fn event_type(&self) -> EventType {
        match self {
            InputEvent::PointerEnter { .. } => event_types::POINTER_ENTER,
            InputEvent::PointerMove { .. } => event_types::POINTER_MOVE,
            InputEvent::PointerLeave => event_types::POINTER_LEAVE,
            InputEvent::PointerDown { .. } => event_types::POINTER_DOWN,
            InputEvent::PointerUp { .. } => event_types::POINTER_UP,
            InputEvent::Scroll(_) => event_types::SCROLL,
            InputEvent::ScrollEnd => event_types::SCROLL_END,
        }
    }

    /// Pointer position carried by the event, if any
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::PointerEnter { x, y }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y } => Some((x, y)),
            _ => None,
        }
    }
}
