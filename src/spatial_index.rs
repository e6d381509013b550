//! Spatial Index Module
//!
//! R-tree over the bounding squares of placed entities, used to find what
//! sits under the pointer when a drag starts.

use crate::types::{Bounds, EntityId, Point};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// Bounding box of one placed entity.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub id: EntityId,
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl SpatialEntry {
    pub fn new(id: EntityId, bounds: Bounds) -> Self {
        Self {
            id,
            min: [bounds.left(), bounds.top()],
            max: [bounds.right(), bounds.bottom()],
        }
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Point and range queries over placed entities in O(log n).
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<EntityId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `id`.
    pub fn insert(&mut self, id: EntityId, bounds: Bounds) {
        if let Some(old_entry) = self.entries.remove(&id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(id, bounds);
        self.tree.insert(entry);
        self.entries.insert(id, entry);
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        if let Some(entry) = self.entries.remove(&id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Ids of all entities containing the point, in no particular order.
    pub fn query_point(&self, p: Point) -> Vec<EntityId> {
        let envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(p))
            .map(|entry| entry.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<I>(&mut self, entities: I)
    where
        I: Iterator<Item = (EntityId, Bounds)>,
    {
        let entries: Vec<SpatialEntry> = entities
            .map(|(id, bounds)| SpatialEntry::new(id, bounds))
            .collect();

        self.entries = entries.iter().map(|e| (e.id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }
}
