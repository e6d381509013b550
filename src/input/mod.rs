//! Pointer input handling for the board.
//!
//! This module implements the drag-and-drop interaction: picking up a source
//! template or a placed entity, following the pointer, and committing on
//! release (spawn, move or delete).
//!
//! ## Architecture
//!
//! Mouse, touch and pen arrive as one `PointerEvent` type. A single explicit
//! state machine (`DragState`) tracks the gesture, and the `DragController`
//! turns releases into board commits. Everything the controller needs from
//! the view (trash bounds, cursor, viewport listeners) comes through the
//! `DragHost` trait instead of being looked up globally.
//!
//! ## Modules
//!
//! - `pointer` - Unified pointer events and event dispositions
//! - `state` - Drag state machine enum and helper methods
//! - `host` - Capabilities injected by the view, plus a headless host
//! - `drag` - Drag controller (begin, move, release, cancel)

mod drag;
mod host;
mod pointer;
mod state;

pub use drag::{DragConfig, DragController, DragOutcome, is_over_trash};
pub use host::{CursorStyle, DragHost, HeadlessHost};
pub use pointer::{EventDisposition, PointerEvent, PointerKind, PointerPhase};
pub use state::{DragSource, DragState};
