//! Drag controller - pick up, follow, release, cancel.
//!
//! ## Release branches
//!
//! ```text
//!                    over trash        elsewhere
//! template           snap back         spawn at release, snap back
//! placed entity      remove            move to release
//! ```
//!
//! The trash test uses the raw pointer position. Spawn and move use the
//! element's top-left (`pointer - offset`), so the element lands where it
//! was drawn.
//!
//! ## Performance Notes
//!
//! `pointer_move` runs at display rate. It exits early for foreign pointers
//! and idle state, and touches the board only for eager moves of placed
//! entities (history-silent).

use crate::board::Board;
use crate::constants::TRASH_BUFFER;
use crate::input::host::{CursorStyle, DragHost};
use crate::input::pointer::{EventDisposition, PointerEvent};
use crate::input::state::{DragSource, DragState};
use crate::profile_scope;
use crate::types::{Bounds, EntityId, Point};
use serde::Serialize;
use tracing::{debug, trace};

/// Tunables for the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    /// Pixels added to every side of the trash for the drop test
    pub trash_buffer: f32,
    /// Write placed-entity positions to the board while dragging
    pub eager_move: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            trash_buffer: TRASH_BUFFER,
            eager_move: true,
        }
    }
}

/// What a finished drag did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum DragOutcome {
    /// A template was dropped away from the trash
    Spawned(EntityId),
    /// A placed entity was dropped away from the trash
    Moved(EntityId),
    /// A placed entity was dropped on the trash
    Deleted(EntityId),
    /// Nothing changed: a template dropped on the trash, or a placed entity
    /// that no longer exists
    SnappedBack,
    /// The drag was aborted and the element restored
    Cancelled,
}

impl DragOutcome {
    /// Whether the outcome recorded a history snapshot.
    pub fn is_commit(&self) -> bool {
        matches!(self, Self::Spawned(_) | Self::Deleted(_))
    }
}

/// Point-in-expanded-rectangle test. A trash that is not mounted never
/// matches.
pub fn is_over_trash(trash: Option<Bounds>, p: Point, buffer: f32) -> bool {
    trash.is_some_and(|bounds| bounds.expanded(buffer).contains(p))
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    config: DragConfig,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            state: DragState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn config(&self) -> DragConfig {
        self.config
    }

    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Idle -> Dragging. `origin` is the element's top-left. A second press
    /// while a drag is active is ignored.
    pub fn begin<H: DragHost>(
        &mut self,
        event: &PointerEvent,
        source: DragSource,
        origin: Point,
        host: &mut H,
    ) -> EventDisposition {
        if self.state.is_dragging() {
            trace!(pointer_id = event.pointer_id, "press ignored, drag already active");
            return EventDisposition::IGNORED;
        }

        self.state
            .start(event.pointer_id, source, event.position, origin);
        host.attach_viewport_listeners();
        host.set_cursor(CursorStyle::Grabbing);

        debug!(
            pointer_id = event.pointer_id,
            kind = ?event.kind,
            source = ?source,
            "drag started"
        );
        EventDisposition::HANDLED
    }

    /// Follow the owning pointer.
    pub fn pointer_move(&mut self, event: &PointerEvent, board: &mut Board) -> EventDisposition {
        profile_scope!("pointer_move");

        if !self.state.is_owned_by(event.pointer_id) {
            return EventDisposition::IGNORED;
        }
        let Some(position) = self.state.follow(event.position) else {
            return EventDisposition::IGNORED;
        };

        if let Some(DragSource::Placed(id)) = self.state.source() {
            if self.config.eager_move {
                board.move_entity(id, position);
            }
        }
        EventDisposition::HANDLED
    }

    /// Dragging -> commit -> Idle. `cell_size` sizes spawned entities.
    /// Returns `None` for releases that do not end a drag (idle, or another
    /// pointer).
    pub fn pointer_up<H: DragHost>(
        &mut self,
        event: &PointerEvent,
        board: &mut Board,
        cell_size: f32,
        host: &mut H,
    ) -> Option<DragOutcome> {
        if !self.state.is_owned_by(event.pointer_id) {
            trace!(pointer_id = event.pointer_id, "release ignored, not dragging");
            return None;
        }

        let finished = self.state.take();
        let DragState::Dragging { source, offset, .. } = finished else {
            return None;
        };
        self.end_session(host);

        let over_trash =
            is_over_trash(host.trash_bounds(), event.position, self.config.trash_buffer);
        let release = event.position - offset;

        let outcome = match (source, over_trash) {
            (DragSource::Template(_), true) => DragOutcome::SnappedBack,
            (DragSource::Template(kind), false) => {
                let content = kind.content(board.orientation());
                let id = board.add(content, release, content.edge_for_cell(cell_size));
                DragOutcome::Spawned(id)
            }
            (DragSource::Placed(id), true) => {
                if board.remove(id) {
                    DragOutcome::Deleted(id)
                } else {
                    DragOutcome::SnappedBack
                }
            }
            (DragSource::Placed(id), false) => {
                if board.move_entity(id, release) {
                    DragOutcome::Moved(id)
                } else {
                    DragOutcome::SnappedBack
                }
            }
        };

        debug!(?outcome, x = release.x, y = release.y, over_trash, "drag released");
        Some(outcome)
    }

    /// Dragging -> Idle without committing. A placed entity that was moved
    /// eagerly goes back to where it was picked up.
    pub fn cancel<H: DragHost>(&mut self, board: &mut Board, host: &mut H) -> Option<DragOutcome> {
        let finished = self.state.take();
        let DragState::Dragging { source, origin, .. } = finished else {
            return None;
        };
        self.end_session(host);

        if let DragSource::Placed(id) = source {
            board.move_entity(id, origin);
        }

        debug!(source = ?source, "drag cancelled");
        Some(DragOutcome::Cancelled)
    }

    /// Dispatch a move/up/cancel event. Presses go through `begin` since
    /// they need a hit-tested source.
    pub fn handle<H: DragHost>(
        &mut self,
        event: &PointerEvent,
        board: &mut Board,
        cell_size: f32,
        host: &mut H,
    ) -> (EventDisposition, Option<DragOutcome>) {
        use crate::input::pointer::PointerPhase;

        match event.phase {
            PointerPhase::Down => (EventDisposition::IGNORED, None),
            PointerPhase::Move => (self.pointer_move(event, board), None),
            PointerPhase::Up => match self.pointer_up(event, board, cell_size, host) {
                Some(outcome) => (EventDisposition::HANDLED, Some(outcome)),
                None => (EventDisposition::IGNORED, None),
            },
            PointerPhase::Cancel => {
                if !self.state.is_owned_by(event.pointer_id) {
                    return (EventDisposition::IGNORED, None);
                }
                let outcome = self.cancel(board, host);
                (EventDisposition::HANDLED, outcome)
            }
        }
    }

    fn end_session<H: DragHost>(&mut self, host: &mut H) {
        host.detach_viewport_listeners();
        host.set_cursor(CursorStyle::Default);
    }
}
