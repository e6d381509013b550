//! Placement store - the canonical list of caches and masks on the board.
//!
//! ## History policy
//!
//! Commits record a snapshot: `add`, `remove` and orientation changes.
//! `move_entity` is history-silent so a drag can update positions at display
//! rate without flooding the undo stack.
//!
//! Ids come from a monotonic counter that undo/redo never rewinds, so an id
//! is unique for the lifetime of the board, not just within one snapshot.

use crate::history::{History, HistorySnapshot};
use crate::spatial_index::SpatialIndex;
use crate::types::{
    CacheColor, EntityContent, EntityId, EntityKind, Orientation, PlacedEntity, Point,
};
use tracing::{debug, trace};

pub struct Board {
    entities: Vec<PlacedEntity>,
    orientation: Orientation,
    next_entity_id: u64,
    history: History,
    spatial_index: SpatialIndex,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board with the default orientation. The empty state is
    /// recorded as the first snapshot so undo always has a floor.
    pub fn new() -> Self {
        Self::with_orientation(Orientation::default())
    }

    pub fn with_orientation(orientation: Orientation) -> Self {
        let mut board = Self {
            entities: Vec::new(),
            orientation,
            next_entity_id: 1,
            history: History::new(),
            spatial_index: SpatialIndex::new(),
        };
        board.push_history();
        board
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Entities in insertion order.
    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&PlacedEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Topmost entity under the point. Later insertions draw above earlier
    /// ones, so the last match in insertion order wins.
    pub fn entity_at(&self, p: Point) -> Option<EntityId> {
        let candidates = self.spatial_index.query_point(p);
        if candidates.is_empty() {
            return None;
        }
        self.entities
            .iter()
            .rev()
            .find(|e| candidates.contains(&e.id))
            .map(|e| e.id)
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entities: self.entities.clone(),
            orientation: self.orientation,
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Place a new entity and record a snapshot. `size` is the entity edge.
    pub fn add(&mut self, content: EntityContent, position: Point, size: f32) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let entity = PlacedEntity {
            id,
            content,
            position,
            size,
        };
        self.spatial_index.insert(id, entity.bounds());
        self.entities.push(entity);

        debug!(%id, kind = ?content.kind(), x = position.x, y = position.y, "entity added");
        self.push_history();
        id
    }

    /// Place a cache tile one cell wide.
    pub fn add_cache(&mut self, color: CacheColor, position: Point, cell_size: f32) -> EntityId {
        let content = EntityContent::Cache { color };
        self.add(content, position, content.edge_for_cell(cell_size))
    }

    /// Place a mask three cells wide, labelled for the current orientation.
    pub fn add_mask(&mut self, position: Point, cell_size: f32) -> EntityId {
        let content = EntityContent::Mask {
            orientation: self.orientation,
        };
        self.add(content, position, content.edge_for_cell(cell_size))
    }

    /// Reposition an entity in place. History-silent. Returns false when the
    /// id is unknown.
    pub fn move_entity(&mut self, id: EntityId, position: Point) -> bool {
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entity.position = position;
        let bounds = entity.bounds();
        self.spatial_index.insert(id, bounds);
        trace!(%id, x = position.x, y = position.y, "entity moved");
        true
    }

    /// Delete an entity and record a snapshot. Removing an absent id is a
    /// no-op that records nothing, since a double release can ask twice.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(index) = self.entities.iter().position(|e| e.id == id) else {
            debug!(%id, "remove ignored, entity already gone");
            return false;
        };
        self.entities.remove(index);
        self.spatial_index.remove(id);

        debug!(%id, "entity removed");
        self.push_history();
        true
    }

    /// Switch the numbering direction, relabel every mask and record a
    /// snapshot. Positions and ids are untouched.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation == self.orientation {
            return;
        }
        self.orientation = orientation;
        for entity in &mut self.entities {
            if let EntityContent::Mask { orientation: o } = &mut entity.content {
                *o = orientation;
            }
        }

        debug!(orientation = orientation.label(), "orientation changed");
        self.push_history();
    }

    pub fn toggle_orientation(&mut self) -> Orientation {
        let next = self.orientation.toggled();
        self.set_orientation(next);
        next
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Record the current state as a new snapshot.
    pub fn push_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn current_history_index(&self) -> isize {
        self.history.index()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.entities = snapshot.entities;
        self.orientation = snapshot.orientation;
        self.spatial_index
            .rebuild(self.entities.iter().map(|e| (e.id, e.bounds())));
        debug!(
            index = self.history.index(),
            entities = self.entities.len(),
            "history restored"
        );
    }
}
