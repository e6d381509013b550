//! Drag state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging             (pointer down on a template or placed entity)
//! Dragging -> Dragging         (pointer move, same pointer id)
//! Dragging -> Idle             (pointer up: spawn / move / delete commit)
//! Dragging -> Idle             (cancel: restore origin, no commit)
//! ```

use crate::template::TemplateKind;
use crate::types::{EntityId, Point};
use serde::Serialize;

/// What is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DragSource {
    /// A sidebar factory; releasing spawns a new entity
    Template(TemplateKind),
    /// An entity already on the board
    Placed(EntityId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No active drag
    #[default]
    Idle,

    Dragging {
        /// Only this pointer may move or release the drag
        pointer_id: u32,
        source: DragSource,
        /// Pointer position minus element top-left at pick-up
        offset: Point,
        /// Element top-left before the drag started
        origin: Point,
        /// Element top-left as currently drawn
        current: Point,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// True while `pointer_id` owns the drag.
    pub fn is_owned_by(&self, pointer_id: u32) -> bool {
        matches!(self, Self::Dragging { pointer_id: p, .. } if *p == pointer_id)
    }

    pub fn source(&self) -> Option<DragSource> {
        match self {
            Self::Dragging { source, .. } => Some(*source),
            Self::Idle => None,
        }
    }

    pub fn offset(&self) -> Option<Point> {
        match self {
            Self::Dragging { offset, .. } => Some(*offset),
            Self::Idle => None,
        }
    }

    pub fn origin(&self) -> Option<Point> {
        match self {
            Self::Dragging { origin, .. } => Some(*origin),
            Self::Idle => None,
        }
    }

    pub fn current(&self) -> Option<Point> {
        match self {
            Self::Dragging { current, .. } => Some(*current),
            Self::Idle => None,
        }
    }

    /// Start a drag. `pointer` is where the press happened and `origin` the
    /// element's top-left, so the element keeps its grip point.
    pub fn start(&mut self, pointer_id: u32, source: DragSource, pointer: Point, origin: Point) {
        *self = Self::Dragging {
            pointer_id,
            source,
            offset: pointer - origin,
            origin,
            current: origin,
        };
    }

    /// Follow the pointer. Returns the new element top-left.
    pub fn follow(&mut self, pointer: Point) -> Option<Point> {
        match self {
            Self::Dragging { offset, current, .. } => {
                *current = pointer - *offset;
                Some(*current)
            }
            Self::Idle => None,
        }
    }

    /// Leave `Dragging`, returning the state that was active.
    pub fn take(&mut self) -> DragState {
        std::mem::take(self)
    }
}
