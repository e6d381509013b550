//! Unified pointer events.
//!
//! Mouse and touch used to need parallel handler trees; here both map onto
//! one event type keyed by a pointer id.

use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Device that produced the event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Phase of the gesture the event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform aborted the gesture (touch cancel, lost capture).
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Stable id for the lifetime of one contact
    #[serde(default = "default_pointer_id")]
    pub pointer_id: u32,
    #[serde(default)]
    pub kind: PointerKind,
    pub phase: PointerPhase,
    /// Viewport coordinates
    pub position: Point,
}

fn default_pointer_id() -> u32 {
    PointerEvent::MOUSE_ID
}

impl PointerEvent {
    /// The mouse always reports as pointer 1.
    pub const MOUSE_ID: u32 = 1;

    pub fn mouse(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            pointer_id: Self::MOUSE_ID,
            kind: PointerKind::Mouse,
            phase,
            position: Point::new(x, y),
        }
    }

    pub fn touch(pointer_id: u32, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            pointer_id,
            kind: PointerKind::Touch,
            phase,
            position: Point::new(x, y),
        }
    }
}

/// What the view should do with the native event after dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EventDisposition {
    /// Suppress text selection and page scrolling
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventDisposition {
    /// The event was part of a drag.
    pub const HANDLED: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };

    /// The event was not ours, let the page have it.
    pub const IGNORED: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    pub fn is_handled(&self) -> bool {
        self.prevent_default
    }
}
