use super::*;
use crate::animation::driver::{Animation, Player};
use crate::foundation::core::{Fps, LEFT};

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

fn labelled(text: &str) -> Bucket {
    Bucket::new(&BucketOpts {
        label: Some(text.to_string()),
        ..BucketOpts::default()
    })
    .unwrap()
}

fn dot_above(bucket: &Bucket) -> Item {
    let mut dot = Item::dot(Point::ORIGIN, 0.08);
    dot.next_to(bucket.bounds(), UP, DEFAULT_BUFF);
    dot.shift(LEFT);
    dot
}

#[test]
fn new_bucket_is_centered_with_open_top() {
    let bucket = Bucket::new(&BucketOpts::default()).unwrap();
    assert!(close(bucket.bounds().center(), Point::ORIGIN));
    assert!((bucket.bucket_height() - SIDE_LENGTH * SIDE_TILT.cos()).abs() < 1e-9);
    // Sides lean outward.
    assert!(bucket.left.p1.x < bucket.left.p0.x);
    assert!(bucket.right.p1.x > bucket.right.p0.x);
    assert!(bucket.label.is_none());
}

#[test]
fn invalid_label_scaling_is_rejected() {
    let err = Bucket::new(&BucketOpts {
        label: None,
        label_scaling: 0.0,
    })
    .unwrap_err();
    assert!(err.to_string().contains("label_scaling"));
}

#[test]
fn label_sits_inside_and_becomes_anchor() {
    let bucket = labelled("0.9");
    let label = bucket.label.as_ref().unwrap();
    let base = line_bounds(bucket.base);
    assert!(label.item.center.y > base.y0);
    assert!(label.item.bounds().y1 < bucket.bounds().y1);
    assert_eq!(bucket.items_anchor(), label.item.bounds());
    // Rules bracket the label box.
    assert!(label.rules[0].p0.y > label.item.bounds().y1);
    assert!(label.rules[3].p0.y < label.item.bounds().y0);
}

#[test]
fn long_labels_are_capped_to_base_width() {
    let bucket = labelled("0.99999999999999999999");
    let label = bucket.label.as_ref().unwrap();
    let base_len = (bucket.base.p1 - bucket.base.p0).hypot();
    assert!(label.item.size.width <= base_len * LABEL_MAX_WIDTH_RATIO + 1e-9);
}

#[test]
fn put_in_passes_above_then_drops_into_anchor() {
    let bucket = labelled("0.9");
    let mut dot = dot_above(&bucket);
    let start = dot.clone();
    let bucket_top = rect_critical_point(bucket.bounds(), UP);
    let anchor_top = rect_critical_point(bucket.items_anchor(), UP);

    let mut anim = bucket
        .put_in_animation(&mut dot, &PutInOpts::default())
        .unwrap();
    assert_eq!(anim.len(), 2);

    anim.evaluate(0.5).unwrap();
    assert!(close(anim.state().item.center, bucket_top));
    assert_eq!(anim.state().item.size, start.size);

    anim.evaluate(1.0).unwrap();
    assert!(close(anim.state().item.center, anchor_top));
    assert_eq!(anim.state().item.size.height, 0.0);

    anim.clean_up().unwrap();
    drop(anim);
    assert_eq!(dot.center, start.center);
    assert!(!dot.visible);
}

#[test]
fn put_in_with_zero_move_above_jumps_instantly() {
    let bucket = labelled("0.9");
    let mut dot = dot_above(&bucket);
    let bucket_top = rect_critical_point(bucket.bounds(), UP);
    let opts = PutInOpts {
        move_above_weight: 0.0,
        ..PutInOpts::default()
    };
    let mut anim = bucket.put_in_animation(&mut dot, &opts).unwrap();
    anim.evaluate(0.0).unwrap();
    // The zero-weight step is already applied; the drop starts above the bucket.
    assert!(close(anim.state().item.center, bucket_top));
}

#[test]
fn put_in_with_negative_move_above_drops_from_start() {
    let bucket = labelled("0.9");
    let mut dot = dot_above(&bucket);
    let start = dot.clone();
    let opts = PutInOpts {
        move_above_weight: -1.0,
        ..PutInOpts::default()
    };
    let mut anim = bucket.put_in_animation(&mut dot, &opts).unwrap();
    assert_eq!(anim.len(), 1);
    anim.evaluate(0.0).unwrap();
    assert!(close(anim.state().item.center, start.center));
}

#[test]
fn take_out_returns_to_start_or_above() {
    let bucket = labelled("0.9");
    let mut dot = dot_above(&bucket);
    let start = dot.clone();
    bucket.put_in(&mut dot);
    assert!(!dot.visible);

    let opts = TakeOutOpts {
        move_above: false,
        ..TakeOutOpts::default()
    };
    let mut anim = bucket.take_out_animation(&mut dot, &opts).unwrap();
    anim.evaluate(1.0).unwrap();
    assert!(close(anim.state().item.center, start.center));
    assert!(anim.state().item.visible);
    drop(anim);

    let mut anim = bucket
        .take_out_animation(&mut dot, &TakeOutOpts::default())
        .unwrap();
    anim.evaluate(1.0).unwrap();
    let mut expected = start.clone();
    bucket.take_out(&mut expected);
    assert!(close(anim.state().item.center, expected.center));
}

#[test]
fn take_out_accepts_extra_segments() {
    let bucket = labelled("0.9");
    let mut dot = dot_above(&bucket);
    let mut anim = bucket
        .take_out_animation(&mut dot, &TakeOutOpts::default())
        .unwrap()
        .with_segment(0.5, |s: &mut TakeOutState<'_>, t| {
            s.item.shift(Vec2::new(t, 0.0));
            Ok(())
        });
    assert_eq!(anim.len(), 2);
    anim.evaluate(1.0).unwrap();
    let moved = anim.state().item.center;
    let mut above = anim.state().start.clone();
    bucket.take_out(&mut above);
    assert!(close(moved, above.center + Vec2::new(1.0, 0.0)));
}

#[test]
fn relabel_animation_ends_on_target_layout() {
    let mut bucket = labelled("0.9");
    let mut expected = bucket.clone();
    expected.relabel("0.99");

    let mut anim = bucket.relabel_animation("0.99", 1.0).unwrap();
    let stats = Player::new(Fps::new(10, 1).unwrap()).play(&mut anim).unwrap();
    assert_eq!(stats.frames, 11);
    drop(anim);
    assert_eq!(bucket.label.as_ref().unwrap().text, "0.99");
    assert!(close(
        bucket.label.as_ref().unwrap().item.center,
        expected.label.as_ref().unwrap().item.center
    ));
}

#[test]
fn negative_run_time_is_rejected() {
    let bucket = labelled("0.9");
    let mut dot = dot_above(&bucket);
    let opts = PutInOpts {
        run_time: -1.0,
        ..PutInOpts::default()
    };
    assert!(bucket.put_in_animation(&mut dot, &opts).is_err());
}
