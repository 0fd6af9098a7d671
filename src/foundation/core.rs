use crate::foundation::error::{NinesError, NinesResult};

pub use kurbo::{Affine, Line, Point, Rect, Size, Vec2};

// Scene space has y growing upward.
pub const UP: Vec2 = Vec2::new(0.0, 1.0);
pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
pub const ORIGIN: Point = Point::ORIGIN;

/// Default gap used when placing one item next to another.
pub const DEFAULT_BUFF: f64 = 0.25;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

impl Fps {
    pub fn new(num: u32, den: u32) -> NinesResult<Self> {
        if den == 0 {
            return Err(NinesError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(NinesError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Number of whole frames needed to cover `secs`, rounding up.
    ///
    /// `None` when `secs` is negative, not finite, or needs more frames than a `u64` holds.
    pub fn secs_to_frames_ceil(self, secs: f64) -> Option<u64> {
        let frames = (secs * self.as_f64()).ceil();
        // 2^64 is exactly representable, so anything below it fits.
        if !frames.is_finite() || frames < 0.0 || frames >= u64::MAX as f64 {
            return None;
        }
        Some(frames as u64)
    }

    pub fn validate(self) -> NinesResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::opaque(0x00, 0x00, 0x00);
    pub const BLUE: Self = Self::opaque(0x58, 0xC4, 0xDD);
    pub const GREEN: Self = Self::opaque(0x83, 0xC1, 0x67);
    pub const YELLOW: Self = Self::opaque(0xFF, 0xFF, 0x00);
    pub const PURPLE: Self = Self::opaque(0x9A, 0x72, 0xAC);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Rotate a line about `pivot` by `angle` radians (counter-clockwise).
pub fn rotate_line(line: Line, angle: f64, pivot: Point) -> Line {
    let a = Affine::rotate_about(angle, pivot);
    Line::new(a * line.p0, a * line.p1)
}

pub fn shift_line(line: Line, by: Vec2) -> Line {
    Line::new(line.p0 + by, line.p1 + by)
}

pub fn line_bounds(line: Line) -> Rect {
    Rect::from_points(line.p0, line.p1)
}

/// Point on the boundary of `rect` in direction `dir` (components in `-1..=1`).
pub fn rect_critical_point(rect: Rect, dir: Vec2) -> Point {
    let c = rect.center();
    Point::new(
        c.x + dir.x * rect.width() / 2.0,
        c.y + dir.y * rect.height() / 2.0,
    )
}

/// Union of a non-empty set of rects; `None` for an empty iterator.
pub fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|a, b| a.union(b))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
