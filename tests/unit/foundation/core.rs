use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps { num: 30, den: 0 }.validate().is_err());
}

#[test]
fn fps_ceil_covers_partial_frames() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(1.0), Some(30));
    assert_eq!(fps.secs_to_frames_ceil(0.25), Some(8));
    assert_eq!(fps.secs_to_frames_ceil(0.0), Some(0));
}

#[test]
fn fps_ceil_rejects_unrepresentable_counts() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(1.0e300), None);
    assert_eq!(fps.secs_to_frames_ceil(f64::INFINITY), None);
    assert_eq!(fps.secs_to_frames_ceil(-1.0), None);
}

#[test]
fn rotate_line_quarter_turn_about_start() {
    let l = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    let r = rotate_line(l, std::f64::consts::FRAC_PI_2, l.p0);
    assert!(close(r.p0, Point::new(0.0, 0.0)));
    assert!(close(r.p1, Point::new(0.0, 1.0)));
}

#[test]
fn critical_point_uses_y_up() {
    let r = Rect::new(-1.0, -2.0, 1.0, 2.0);
    assert!(close(rect_critical_point(r, UP), Point::new(0.0, 2.0)));
    assert!(close(rect_critical_point(r, DOWN + LEFT), Point::new(-1.0, -2.0)));
}

#[test]
fn union_all_handles_empty() {
    assert!(union_all(Vec::<Rect>::new()).is_none());
    let u = union_all([Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(2.0, -1.0, 3.0, 0.5)]).unwrap();
    assert_eq!(u, Rect::new(0.0, -1.0, 3.0, 1.0));
}
