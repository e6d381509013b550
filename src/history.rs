//! Undo/redo history of board snapshots.
//!
//! ## State
//!
//! ```text
//! snapshots: [S0, S1, ..., Sn]
//!                      ^ cursor
//!
//! record  -> drop S(cursor+1..), push, cursor = last
//! undo    -> cursor - 1  (floor at S0)
//! redo    -> cursor + 1  (ceiling at Sn)
//! ```
//!
//! Snapshots own their entity list. The board hands in a clone at record
//! time and receives a clone back on restore, so later in-place moves can
//! never bleed into a stored snapshot.

use crate::types::{Orientation, PlacedEntity};
use serde::{Deserialize, Serialize};

/// Immutable capture of the board at a point in time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub entities: Vec<PlacedEntity>,
    pub orientation: Orientation,
}

/// Linear snapshot history with a movable cursor.
#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<HistorySnapshot>,
    /// `None` only before the first record
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot, discarding any redo branch first.
    pub fn record(&mut self, snapshot: HistorySnapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot. Returns the snapshot to restore, or `None` at
    /// the floor.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.snapshots.get(cursor - 1)
    }

    /// Step forward one snapshot. Returns the snapshot to restore, or `None`
    /// at the tip.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.snapshots.get(cursor + 1)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Current cursor, `-1` before anything was recorded.
    pub fn index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
