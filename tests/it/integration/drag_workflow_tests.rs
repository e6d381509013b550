//! Drag Workflow Integration Tests
//!
//! Full gestures through `Castle::pointer`: spawning from templates, moving
//! and deleting placed entities, cancelling, and listener bookkeeping.

use crate::helpers::{
    DESKTOP, HEADER, assert_entity_count, desktop_castle, drag, entity_grip, ids, seen_settings,
    spawn, template_grip, trash_bounds,
};
use number_castle::castle::Castle;
use number_castle::input::{
    CursorStyle, DragOutcome, EventDisposition, HeadlessHost, PointerEvent, PointerPhase,
};
use number_castle::template::TemplateKind;
use number_castle::types::{CacheColor, EntityKind, point};

#[test]
fn test_template_spawns_exactly_one_entity() {
    let mut castle = desktop_castle();
    let templates_before = castle.templates().clone();

    for (i, kind) in TemplateKind::all().enumerate() {
        let to = point(350.0 + i as f32 * 60.0, 300.0);
        let id = spawn(&mut castle, kind, to);

        assert_entity_count(castle.board(), i + 1);
        let entity = castle.board().get(id).cloned().unwrap();
        assert_eq!(entity.position, to);
    }

    assert_eq!(castle.templates(), &templates_before);
    assert_eq!(castle.board().count_of(EntityKind::Cache), 5);
    assert_eq!(castle.board().count_of(EntityKind::Mask), 1);
}

#[test]
fn test_spawn_ignores_release_coordinates() {
    // Off-screen releases still spawn: the board is not clipped
    let mut castle = desktop_castle();
    let kind = TemplateKind::Cache(CacheColor::Blue);
    let id = spawn(&mut castle, kind, point(-200.0, 5000.0));
    assert_entity_count(castle.board(), 1);
    assert_eq!(
        castle.board().get(id).map(|e| e.position),
        Some(point(-200.0, 5000.0))
    );

    let scene = castle.scene();
    let template = scene.sprite(&kind.key()).unwrap();
    assert_eq!(template.position, castle.templates().get(kind).unwrap().anchor);
    assert!(!template.dragging);
}

#[test]
fn test_spawned_size_follows_cell() {
    let mut castle = desktop_castle();
    let cell = castle.geometry().cell_size;
    let cache = spawn(&mut castle, TemplateKind::Cache(CacheColor::Amber), point(400.0, 300.0));
    let mask = spawn(&mut castle, TemplateKind::Mask, point(600.0, 300.0));
    assert_eq!(castle.board().get(cache).map(|e| e.size), Some(cell));
    assert_eq!(castle.board().get(mask).map(|e| e.size), Some(cell * 3.0));
}

#[test]
fn test_template_dropped_on_trash_snaps_back() {
    let mut castle = desktop_castle();
    let history_len = castle.board().history_len();
    let from = template_grip(&castle, TemplateKind::Mask);

    let outcome = drag(&mut castle, from, trash_bounds().origin + point(30.0, 30.0));

    assert_eq!(outcome, Some(DragOutcome::SnappedBack));
    assert_entity_count(castle.board(), 0);
    assert_eq!(castle.board().history_len(), history_len);
}

#[test]
fn test_trash_removes_only_dragged_entity() {
    let mut castle = desktop_castle();
    let a = spawn(&mut castle, TemplateKind::Cache(CacheColor::Brick), point(400.0, 300.0));
    let b = spawn(&mut castle, TemplateKind::Mask, point(500.0, 300.0));
    let c = spawn(&mut castle, TemplateKind::Cache(CacheColor::Cyan), point(700.0, 300.0));

    let from = entity_grip(&castle, b);
    let outcome = drag(&mut castle, from, point(1210.0, 730.0));

    assert_eq!(outcome, Some(DragOutcome::Deleted(b)));
    assert_eq!(ids(castle.board()), vec![a, c]);
}

#[test]
fn test_trash_buffer_is_forgiving() {
    let mut castle = desktop_castle();
    let trash = trash_bounds();

    // 39px left of the trash: inside the buffer
    let near = spawn(&mut castle, TemplateKind::Cache(CacheColor::Orange), point(400.0, 300.0));
    let from = entity_grip(&castle, near);
    let outcome = drag(&mut castle, from, point(trash.left() - 39.0, trash.top() + 10.0));
    assert_eq!(outcome, Some(DragOutcome::Deleted(near)));

    // 41px left: outside, the entity is moved instead
    let far = spawn(&mut castle, TemplateKind::Cache(CacheColor::Orange), point(400.0, 300.0));
    let from = entity_grip(&castle, far);
    let outcome = drag(&mut castle, from, point(trash.left() - 41.0, trash.top() + 10.0));
    assert_eq!(outcome, Some(DragOutcome::Moved(far)));
    assert!(castle.board().contains(far));
}

#[test]
fn test_unmounted_trash_never_deletes() {
    let mut castle = Castle::new(HeadlessHost::new(), DESKTOP, HEADER, seen_settings());
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Blue), point(400.0, 300.0));
    let from = entity_grip(&castle, id);

    let outcome = drag(&mut castle, from, point(1210.0, 730.0));

    assert_eq!(outcome, Some(DragOutcome::Moved(id)));
    assert_entity_count(castle.board(), 1);
}

#[test]
fn test_move_is_history_silent() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Brick), point(400.0, 300.0));
    let history_len = castle.board().history_len();

    for step in 0..10 {
        let from = entity_grip(&castle, id);
        let to = point(300.0 + step as f32 * 20.0, 250.0);
        assert_eq!(drag(&mut castle, from, to), Some(DragOutcome::Moved(id)));
    }

    assert_eq!(castle.board().history_len(), history_len);
    assert_eq!(castle.board().get(id).map(|e| e.position), Some(point(475.0, 245.0)));
}

#[test]
fn test_eager_move_updates_board_mid_drag() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Brick), point(400.0, 300.0));

    castle.pointer(PointerEvent::mouse(PointerPhase::Down, 400.0, 300.0));
    let response = castle.pointer(PointerEvent::mouse(PointerPhase::Move, 500.0, 350.0));

    assert_eq!(response.disposition, EventDisposition::HANDLED);
    assert_eq!(castle.board().get(id).map(|e| e.position), Some(point(500.0, 350.0)));
}

#[test]
fn test_listeners_attached_once_per_session() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Amber), point(400.0, 300.0));
    let from = entity_grip(&castle, id);
    drag(&mut castle, from, point(450.0, 350.0));
    let from = entity_grip(&castle, id);
    drag(&mut castle, from, point(1210.0, 730.0));

    let host = castle.host();
    assert_eq!(host.attach_count, 3);
    assert_eq!(host.detach_count, 3);
    assert!(!host.listeners_attached);
    assert_eq!(host.cursor, CursorStyle::Default);
}

#[test]
fn test_cursor_tracks_drag() {
    let mut castle = desktop_castle();
    let from = template_grip(&castle, TemplateKind::Mask);
    castle.pointer(PointerEvent::mouse(PointerPhase::Down, from.x, from.y));
    assert_eq!(castle.host().cursor, CursorStyle::Grabbing);
    assert!(castle.host().listeners_attached);

    castle.pointer(PointerEvent::mouse(PointerPhase::Up, 500.0, 300.0));
    assert_eq!(castle.host().cursor, CursorStyle::Default);
}

#[test]
fn test_touch_drag_ignores_second_finger() {
    let mut castle = desktop_castle();
    let from = template_grip(&castle, TemplateKind::Cache(CacheColor::Cyan));

    let down = castle.pointer(PointerEvent::touch(11, PointerPhase::Down, from.x, from.y));
    assert!(down.disposition.is_handled());

    // A second finger pressing on another template does not start a drag
    let other = template_grip(&castle, TemplateKind::Mask);
    let second = castle.pointer(PointerEvent::touch(12, PointerPhase::Down, other.x, other.y));
    assert_eq!(second.disposition, EventDisposition::IGNORED);
    let stray = castle.pointer(PointerEvent::touch(12, PointerPhase::Up, 600.0, 600.0));
    assert_eq!(stray.outcome, None);

    castle.pointer(PointerEvent::touch(11, PointerPhase::Move, 505.0, 305.0));
    let up = castle.pointer(PointerEvent::touch(11, PointerPhase::Up, 505.0, 305.0));

    let Some(DragOutcome::Spawned(id)) = up.outcome else {
        panic!("expected spawn, got {:?}", up.outcome);
    };
    assert_eq!(castle.board().get(id).map(|e| e.position), Some(point(505.0, 305.0)));
    assert_entity_count(castle.board(), 1);
}

#[test]
fn test_double_release_is_ignored() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Amber), point(400.0, 300.0));
    let from = entity_grip(&castle, id);
    drag(&mut castle, from, point(1210.0, 730.0));
    let history_len = castle.board().history_len();

    let again = castle.pointer(PointerEvent::mouse(PointerPhase::Up, 1210.0, 730.0));

    assert_eq!(again.disposition, EventDisposition::IGNORED);
    assert_eq!(again.outcome, None);
    assert_eq!(castle.board().history_len(), history_len);
}

#[test]
fn test_cancel_restores_placed_entity() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Mask, point(400.0, 300.0));
    let history_len = castle.board().history_len();

    castle.pointer(PointerEvent::mouse(PointerPhase::Down, 400.0, 300.0));
    castle.pointer(PointerEvent::mouse(PointerPhase::Move, 900.0, 600.0));
    assert_eq!(castle.cancel_drag(), Some(DragOutcome::Cancelled));

    assert_eq!(castle.board().get(id).map(|e| e.position), Some(point(400.0, 300.0)));
    assert_eq!(castle.board().history_len(), history_len);
    assert!(!castle.host().listeners_attached);

    // A release after the cancel does nothing
    let up = castle.pointer(PointerEvent::mouse(PointerPhase::Up, 1210.0, 730.0));
    assert_eq!(up.outcome, None);
    assert!(castle.board().contains(id));
}

#[test]
fn test_pointer_cancel_event_spawns_nothing() {
    let mut castle = desktop_castle();
    let from = template_grip(&castle, TemplateKind::Cache(CacheColor::Brick));
    castle.pointer(PointerEvent::touch(3, PointerPhase::Down, from.x, from.y));
    castle.pointer(PointerEvent::touch(3, PointerPhase::Move, 500.0, 300.0));

    let response = castle.pointer(PointerEvent::touch(3, PointerPhase::Cancel, 500.0, 300.0));

    assert!(response.disposition.is_handled());
    assert_eq!(response.outcome, Some(DragOutcome::Cancelled));
    assert_entity_count(castle.board(), 0);
    assert_eq!(castle.cancel_drag(), None);
}

#[test]
fn test_undo_during_drag_cancels_first() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Blue), point(400.0, 300.0));

    castle.pointer(PointerEvent::mouse(PointerPhase::Down, 400.0, 300.0));
    castle.pointer(PointerEvent::mouse(PointerPhase::Move, 600.0, 500.0));
    assert!(castle.undo());

    assert!(!castle.drag().is_dragging());
    assert!(!castle.board().contains(id));
    assert_eq!(castle.host().detach_count, castle.host().attach_count);
}

#[test]
fn test_scene_draws_dragged_sprite_on_top() {
    let mut castle = desktop_castle();
    let placed = spawn(&mut castle, TemplateKind::Cache(CacheColor::Brick), point(400.0, 300.0));
    let kind = TemplateKind::Cache(CacheColor::Amber);
    let from = template_grip(&castle, kind);

    castle.pointer(PointerEvent::mouse(PointerPhase::Down, from.x, from.y));
    castle.pointer(PointerEvent::mouse(PointerPhase::Move, 705.0, 405.0));

    let scene = castle.scene();
    assert_eq!(scene.sprites.len(), 7);
    let last = scene.sprites.last().unwrap();
    assert_eq!(last.key, kind.key());
    assert!(last.dragging);
    assert_eq!(last.position, point(705.0, 405.0));
    assert_eq!(scene.placed().count(), 1);
    assert_eq!(
        scene.sprite(&format!("entity-{}", placed.0)).map(|s| s.dragging),
        Some(false)
    );
}

#[test]
fn test_press_on_placed_entity_beats_template() {
    let mut castle = desktop_castle();
    let kind = TemplateKind::Cache(CacheColor::Blue);
    let grip = template_grip(&castle, kind);

    // Drop a mask right on top of the blue template
    let mask = spawn(&mut castle, TemplateKind::Mask, grip);
    let outcome = drag(&mut castle, grip, point(600.0, 400.0));

    assert_eq!(outcome, Some(DragOutcome::Moved(mask)));
    assert_entity_count(castle.board(), 1);
}

#[test]
fn test_trash_unmounted_mid_session() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Amber), point(400.0, 300.0));

    castle.host_mut().trash = None;
    let from = entity_grip(&castle, id);
    let outcome = drag(&mut castle, from, point(1210.0, 730.0));

    assert_eq!(outcome, Some(DragOutcome::Moved(id)));
}
