//! Unit tests for geometry resolution as seen through the castle.

use crate::helpers::{DESKTOP, desktop_castle, spawn};
use number_castle::constants::DEFAULT_REFERENCE_WIDTH;
use number_castle::geometry::{GeometryInput, LayoutMode, resolve};
use number_castle::template::TemplateKind;
use number_castle::types::{CacheColor, Size, point};
use std::time::{Duration, Instant};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn test_mask_is_three_cells_everywhere() {
    let viewports = [
        Size::new(320.0, 568.0),
        Size::new(768.0, 1024.0),
        Size::new(1024.0, 768.0),
        Size::new(1920.0, 1080.0),
        Size::new(3840.0, 2160.0),
    ];
    for window in viewports {
        let geometry = resolve(&GeometryInput::new(window, 60.0, DEFAULT_REFERENCE_WIDTH));
        assert_eq!(geometry.mask_size, geometry.cell_size * 3.0);
        assert!(geometry.cell_size >= 15.0);
        assert!(geometry.container_width <= window.width);
    }
}

#[test]
fn test_aspect_ratio_is_preserved() {
    for window in [Size::new(1280.0, 800.0), Size::new(400.0, 900.0)] {
        let geometry = resolve(&GeometryInput::new(window, 60.0, DEFAULT_REFERENCE_WIDTH));
        let ratio = geometry.container_height / geometry.container_width;
        assert!((ratio - 65.03 / 86.7).abs() < 1e-4);
    }
}

#[test]
fn test_portrait_tablet_keeps_row_layout() {
    // Portrait but wider than the mobile breakpoint
    let input = GeometryInput::new(Size::new(800.0, 1200.0), 60.0, DEFAULT_REFERENCE_WIDTH);
    let geometry = resolve(&input);
    assert!(geometry.is_portrait);
    assert!(!geometry.is_mobile);
    assert_eq!(geometry.layout, LayoutMode::Row);
}

#[test]
fn test_resize_is_debounced() {
    let mut castle = desktop_castle();
    let start = Instant::now();
    let desktop = *castle.geometry();

    castle.resize(Size::new(400.0, 800.0), start);
    assert!(!castle.tick(start + Duration::from_millis(50)));
    assert_eq!(castle.geometry(), &desktop);

    assert!(castle.tick(start + Duration::from_millis(100)));
    assert!(matches!(castle.geometry().layout, LayoutMode::Column { .. }));
    assert!(!castle.tick(start + Duration::from_millis(200)));
}

#[test]
fn test_resize_burst_applies_last_viewport() {
    let mut castle = desktop_castle();
    let start = Instant::now();

    for (i, width) in [900.0, 1000.0, 1100.0, 1600.0].into_iter().enumerate() {
        castle.resize(Size::new(width, 900.0), start + Duration::from_millis(i as u64 * 30));
    }
    assert!(!castle.tick(start + Duration::from_millis(150)));
    assert!(castle.tick(start + Duration::from_millis(190)));
    assert_eq!(castle.geometry().window, Size::new(1600.0, 900.0));
}

#[test]
fn test_resize_to_same_viewport_changes_nothing() {
    let mut castle = desktop_castle();
    let start = Instant::now();
    castle.resize(DESKTOP, start);
    assert!(!castle.tick(start + Duration::from_secs(1)));
}

#[test]
fn test_resize_moves_templates_but_not_entities() {
    let mut castle = desktop_castle();
    let id = spawn(&mut castle, TemplateKind::Cache(CacheColor::Brick), point(400.0, 300.0));
    let size_before = castle.board().get(id).map(|e| e.size);
    let anchor_before = castle.templates().get(TemplateKind::Mask).map(|t| t.anchor);

    let start = Instant::now();
    castle.resize(Size::new(1920.0, 1080.0), start);
    assert!(castle.tick(start + Duration::from_millis(100)));

    assert_ne!(castle.templates().get(TemplateKind::Mask).map(|t| t.anchor), anchor_before);
    assert_eq!(castle.board().get(id).map(|e| e.size), size_before);
    assert_eq!(castle.board().get(id).map(|e| e.position), Some(point(400.0, 300.0)));
}

#[test]
fn test_reference_width_updates_geometry() {
    let mut castle = desktop_castle();

    // Same as the default width: nothing changes
    assert!(!castle.set_reference_width(0.0));

    assert!(castle.set_reference_width(400.0));
    assert!(approx(castle.geometry().container_width, 400.0));
    assert!(approx(castle.geometry().cell_size, 20.0));
}

#[test]
fn test_castle_is_centred() {
    let castle = desktop_castle();
    let bounds = castle.scene().castle;
    assert!(approx(bounds.left(), DESKTOP.width - bounds.right()));
}
