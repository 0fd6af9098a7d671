use super::*;
use crate::foundation::core::{DOWN, RIGHT, UP};

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn bounds_follow_rotation() {
    let mut item = Item::new(Point::ORIGIN, Size::new(4.0, 2.0));
    assert_eq!(item.bounds(), Rect::new(-2.0, -1.0, 2.0, 1.0));
    item.rotate_about(std::f64::consts::FRAC_PI_2, Point::ORIGIN);
    let b = item.bounds();
    assert!((b.width() - 2.0).abs() < 1e-9);
    assert!((b.height() - 4.0).abs() < 1e-9);
}

#[test]
fn next_to_places_above_with_buff() {
    let anchor = Rect::new(-1.0, -1.0, 1.0, 1.0);
    let mut item = Item::dot(Point::new(5.0, -3.0), 0.5);
    item.next_to(anchor, UP, 0.25);
    assert!(close(item.center, Point::new(0.0, 1.75)));

    item.next_to(anchor, RIGHT, 0.0);
    assert!(close(item.center, Point::new(1.5, 0.0)));
}

#[test]
fn scale_to_fit_height_keeps_aspect() {
    let mut item = Item::new(Point::ORIGIN, Size::new(4.0, 2.0));
    item.scale_to_fit_height(1.0);
    assert_eq!(item.size, Size::new(2.0, 1.0));
    item.scale_to_fit_height(0.0);
    assert_eq!(item.size, Size::new(0.0, 0.0));
    // Degenerate items only regain height.
    item.scale_to_fit_height(3.0);
    assert_eq!(item.size, Size::new(0.0, 3.0));
}

#[test]
fn critical_point_on_top_edge() {
    let item = Item::new(Point::new(1.0, 1.0), Size::new(2.0, 2.0));
    assert!(close(item.critical_point(UP), Point::new(1.0, 2.0)));
    assert!(close(item.critical_point(DOWN), Point::new(1.0, 0.0)));
}

#[test]
fn rotate_about_moves_center() {
    let mut item = Item::dot(Point::new(1.0, 0.0), 0.1);
    item.rotate_about(std::f64::consts::PI, Point::ORIGIN);
    assert!(close(item.center, Point::new(-1.0, 0.0)));
}

#[test]
fn lerp_blends_geometry_and_settles_visibility() {
    let a = Item::dot(Point::ORIGIN, 1.0);
    let mut b = Item::dot(Point::new(2.0, 0.0), 2.0);
    b.visible = false;
    let mid = Item::lerp(&a, &b, 0.5);
    assert_eq!(mid.center, Point::new(1.0, 0.0));
    assert_eq!(mid.size, Size::new(3.0, 3.0));
    assert!(mid.visible);
    assert!(!Item::lerp(&a, &b, 1.0).visible);
}

#[test]
fn serde_defaults_fill_optional_fields() {
    let item: Item =
        serde_json::from_str(r#"{"center":{"x":1.0,"y":2.0},"size":{"width":1.0,"height":1.0}}"#)
            .unwrap();
    assert!(item.visible);
    assert_eq!(item.rotation, 0.0);
    assert_eq!(item.color, Rgba8::WHITE);
}

#[test]
fn text_box_width_tracks_character_count() {
    let short = Item::text_box("N=3", 0.4);
    let long = Item::text_box("N=30", 0.4);
    assert_eq!(short.size.height, 0.4);
    assert!((short.size.width - 3.0 * GLYPH_ASPECT * 0.4).abs() < 1e-12);
    assert!(long.size.width > short.size.width);
    // Empty text still gets a one-glyph box.
    assert!(Item::text_box("", 1.0).size.width > 0.0);
}
