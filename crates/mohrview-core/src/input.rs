//! Pointer events delivered by the host.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in the surface's own screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Wheel or trackpad scroll; positive `delta.y` scrolls down.
    Scroll {
        position: Point,
        delta: Vec2,
    },
    /// The pointer left the surface.
    Leave,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Scroll { position, .. } => Some(position),
            PointerEvent::Leave => None,
        }
    }
}

/// Signed notch count for a scroll delta: one notch per event, up is positive.
pub fn wheel_notches(delta: Vec2) -> i32 {
    if delta.y < 0.0 {
        1
    } else if delta.y > 0.0 {
        -1
    } else {
        0
    }
}
