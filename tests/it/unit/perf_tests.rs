//! Unit tests for perf module.

use crate::helpers::{desktop_castle, drag, template_grip};
use number_castle::perf::ScopedTimer;
use number_castle::template::TemplateKind;
use number_castle::types::point;

#[test]
fn test_scoped_timer_creation() {
    // High threshold: dropping must not warn or panic
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_castle_records_pointer_timings() {
    let mut castle = desktop_castle();
    let from = template_grip(&castle, TemplateKind::Mask);
    drag(&mut castle, from, point(500.0, 300.0));

    let stats = castle.stats();
    assert_eq!(stats.get("pointer_down").map(|s| s.count()), Some(1));
    assert_eq!(stats.get("pointer_move").map(|s| s.count()), Some(2));
    assert_eq!(stats.get("pointer_up").map(|s| s.count()), Some(1));
    assert!(stats.get("pointer_cancel").is_none());
}

#[test]
fn test_resize_records_geometry_timing() {
    let mut castle = desktop_castle();
    castle.set_reference_width(500.0);
    assert_eq!(castle.stats().get("geometry").map(|s| s.count()), Some(1));
}
