use glam::Vec2;
use kokaton_musou::constants::{HEIGHT, WIDTH};
use kokaton_musou::geometry::*;

fn square(x: f32, y: f32, side: f32) -> Rect {
    Rect::new(Vec2::new(x, y), Vec2::splat(side))
}

// ── Overlap ───────────────────────────────────────────────────────────────────

#[test]
fn touching_edges_do_not_overlap() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(10.0, 0.0, 10.0);
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn intersecting_boxes_overlap_both_ways() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(9.0, 9.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn contained_box_overlaps() {
    let outer = Rect::playfield();
    let inner = square(500.0, 300.0, 4.0);
    assert!(outer.overlaps(&inner));
}

// ── Containment ───────────────────────────────────────────────────────────────

#[test]
fn box_flush_with_the_corner_is_inside() {
    let r = square(5.0, 5.0, 10.0);
    assert!(check_bound(&r).is_inside());

    let r = square(WIDTH - 5.0, HEIGHT - 5.0, 10.0);
    assert!(check_bound(&r).is_inside());
}

#[test]
fn containment_reports_each_axis() {
    let r = square(4.0, 300.0, 10.0);
    let c = check_bound(&r);
    assert!(!c.horizontal);
    assert!(c.vertical);
    assert!(!c.is_inside());

    let r = square(300.0, HEIGHT, 10.0);
    let c = check_bound(&r);
    assert!(c.horizontal);
    assert!(!c.vertical);
}

// ── Directions ────────────────────────────────────────────────────────────────

#[test]
fn direction_between_is_unit_length() {
    let d = direction_between(Vec2::ZERO, Vec2::new(3.0, 4.0));
    assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-6);
}

#[test]
fn coincident_points_fall_back_to_straight_down() {
    let p = Vec2::new(123.0, 45.0);
    assert_eq!(direction_between(p, p), FALLBACK_DIRECTION);
    assert_eq!(FALLBACK_DIRECTION, Vec2::new(0.0, 1.0));
}

#[test]
fn unit_from_degrees_points_up_at_ninety() {
    let up = unit_from_degrees(90.0);
    assert!((up - Vec2::new(0.0, -1.0)).length() < 1e-6);
}
