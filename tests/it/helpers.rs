//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestBoardBuilder` - Builder pattern for creating boards with entities
//! - `desktop_castle()` / `drag()` - A castle with a mounted trash and a
//!   one-call mouse drag
//! - Common assertions

#![allow(dead_code)]

use number_castle::board::Board;
use number_castle::castle::Castle;
use number_castle::input::{DragOutcome, HeadlessHost, PointerEvent, PointerPhase};
use number_castle::settings::Settings;
use number_castle::template::TemplateKind;
use number_castle::types::{Bounds, CacheColor, EntityId, Orientation, Point, Size, point};

/// Cell size used by boards built without a castle
pub const TEST_CELL: f32 = 20.0;

/// Desktop viewport used by most castle tests
pub const DESKTOP: Size = Size::new(1280.0, 800.0);

pub const HEADER: f32 = 60.0;

// ============================================================================
// TestBoardBuilder - Builder pattern for creating test boards
// ============================================================================

/// Builder for creating test boards with entities.
///
/// # Example
/// ```ignore
/// let board = TestBoardBuilder::new()
///     .with_cache(CacheColor::Brick, (100.0, 100.0))
///     .with_mask((300.0, 300.0))
///     .build();
/// ```
pub struct TestBoardBuilder {
    orientation: Orientation,
    cell_size: f32,
    entities: Vec<(Option<CacheColor>, Point)>,
}

impl TestBoardBuilder {
    pub fn new() -> Self {
        Self {
            orientation: Orientation::default(),
            cell_size: TEST_CELL,
            entities: Vec::new(),
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_cache(mut self, color: CacheColor, pos: (f32, f32)) -> Self {
        self.entities.push((Some(color), point(pos.0, pos.1)));
        self
    }

    pub fn with_mask(mut self, pos: (f32, f32)) -> Self {
        self.entities.push((None, point(pos.0, pos.1)));
        self
    }

    /// Add `count` caches cycling through the palette, spaced along x.
    pub fn with_n_caches(mut self, count: usize) -> Self {
        for i in 0..count {
            let color = CacheColor::ALL[i % CacheColor::ALL.len()];
            self.entities
                .push((Some(color), point(i as f32 * 30.0, 100.0)));
        }
        self
    }

    pub fn build(self) -> Board {
        let mut board = Board::with_orientation(self.orientation);
        for (color, position) in self.entities {
            match color {
                Some(color) => board.add_cache(color, position, self.cell_size),
                None => board.add_mask(position, self.cell_size),
            };
        }
        board
    }
}

impl Default for TestBoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Castle helpers
// ============================================================================

/// Trash in the bottom-right corner, clear of every template.
pub fn trash_bounds() -> Bounds {
    Bounds::from_ltwh(1180.0, 700.0, 60.0, 60.0)
}

pub fn seen_settings() -> Settings {
    Settings {
        help_shown: true,
        ..Settings::default()
    }
}

/// 1280×800 castle with the trash mounted and help already seen.
pub fn desktop_castle() -> Castle<HeadlessHost> {
    Castle::new(
        HeadlessHost::with_trash(trash_bounds()),
        DESKTOP,
        HEADER,
        seen_settings(),
    )
}

/// The top-left corner of the resting template. Grabbing there gives a zero
/// drag offset, so spawned positions equal release positions exactly.
pub fn template_grip(castle: &Castle<HeadlessHost>, kind: TemplateKind) -> Point {
    let Some(template) = castle.templates().get(kind) else {
        panic!("no template for {kind:?}");
    };
    template.anchor
}

/// A point just inside a placed entity.
pub fn entity_grip(castle: &Castle<HeadlessHost>, id: EntityId) -> Point {
    let Some(entity) = castle.board().get(id) else {
        panic!("no entity {id}");
    };
    entity.position + point(5.0, 5.0)
}

/// Press at `from`, move halfway, release at `to`.
pub fn drag(castle: &mut Castle<HeadlessHost>, from: Point, to: Point) -> Option<DragOutcome> {
    let mid = point((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
    castle.pointer(PointerEvent::mouse(PointerPhase::Down, from.x, from.y));
    castle.pointer(PointerEvent::mouse(PointerPhase::Move, mid.x, mid.y));
    castle.pointer(PointerEvent::mouse(PointerPhase::Move, to.x, to.y));
    castle
        .pointer(PointerEvent::mouse(PointerPhase::Up, to.x, to.y))
        .outcome
}

/// Drag a template to `to` and return the spawned id.
pub fn spawn(castle: &mut Castle<HeadlessHost>, kind: TemplateKind, to: Point) -> EntityId {
    let from = template_grip(castle, kind);
    match drag(castle, from, to) {
        Some(DragOutcome::Spawned(id)) => id,
        other => panic!("expected spawn, got {other:?}"),
    }
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_entity_count(board: &Board, expected: usize) {
    assert_eq!(
        board.len(),
        expected,
        "expected {} entities, found {}",
        expected,
        board.len()
    );
}

pub fn ids(board: &Board) -> Vec<EntityId> {
    board.entities().iter().map(|e| e.id).collect()
}
