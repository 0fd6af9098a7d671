use crate::foundation::core::{Line, Point, Rect, Rgba8, Size, Vec2};

/// Linear blend between two values of the same type.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Size {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Size::new(
            a.width + (b.width - a.width) * t,
            a.height + (b.height - a.height) * t,
        )
    }
}

impl Lerp for Line {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Line::new(
            <Point as Lerp>::lerp(&a.p0, &b.p0, t),
            <Point as Lerp>::lerp(&a.p1, &b.p1, t),
        )
    }
}

impl Lerp for Rect {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rect::new(
            a.x0 + (b.x0 - a.x0) * t,
            a.y0 + (b.y0 - a.y0) * t,
            a.x1 + (b.x1 - a.x1) * t,
            a.y1 + (b.y1 - a.y1) * t,
        )
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

impl<T: Lerp> Lerp for [T; 4] {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        [
            T::lerp(&a[0], &b[0], t),
            T::lerp(&a[1], &b[1], t),
            T::lerp(&a[2], &b[2], t),
            T::lerp(&a[3], &b[3], t),
        ]
    }
}
