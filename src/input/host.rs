//! Capabilities the view hands to the drag controller.
//!
//! The controller never looks anything up globally. The trash rectangle, the
//! cursor and the viewport-wide listeners all go through `DragHost`, so a
//! test (or the replay binary) can drive the same code without a window.

use crate::types::Bounds;
use serde::Serialize;
use tracing::warn;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    #[default]
    Default,
    /// Hovering something draggable
    Grab,
    /// A drag is in progress
    Grabbing,
}

pub trait DragHost {
    /// Current on-screen rectangle of the trash, `None` while it is not
    /// mounted.
    fn trash_bounds(&self) -> Option<Bounds>;

    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Start routing move/up events from the whole viewport to the
    /// controller. Called once when a drag starts.
    fn attach_viewport_listeners(&mut self);

    /// Stop routing viewport events. Called once when a drag ends.
    fn detach_viewport_listeners(&mut self);
}

/// A host with no window. Records everything the controller asks of it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HeadlessHost {
    pub trash: Option<Bounds>,
    pub cursor: CursorStyle,
    pub listeners_attached: bool,
    pub attach_count: u32,
    pub detach_count: u32,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trash(trash: Bounds) -> Self {
        Self {
            trash: Some(trash),
            ..Self::default()
        }
    }
}

impl DragHost for HeadlessHost {
    fn trash_bounds(&self) -> Option<Bounds> {
        self.trash
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn attach_viewport_listeners(&mut self) {
        if self.listeners_attached {
            warn!("viewport listeners attached twice");
        }
        self.listeners_attached = true;
        self.attach_count += 1;
    }

    fn detach_viewport_listeners(&mut self) {
        if !self.listeners_attached {
            warn!("viewport listeners detached while not attached");
        }
        self.listeners_attached = false;
        self.detach_count += 1;
    }
}
