use crate::{
    animation::lerp::Lerp,
    foundation::core::{Affine, Point, Rect, Rgba8, Size, Vec2, rect_critical_point},
};

/// Estimated glyph advance relative to text height.
pub const GLYPH_ASPECT: f64 = 0.5;

/// A placed shape in scene space (y up).
///
/// Items carry no geometry beyond their box; what they look like is up to whoever renders them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Item {
    pub center: Point,
    pub size: Size,
    /// Counter-clockwise, radians, about `center`.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub color: Rgba8,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Item {
    pub fn new(center: Point, size: Size) -> Self {
        Self {
            center,
            size,
            rotation: 0.0,
            color: Rgba8::WHITE,
            visible: true,
        }
    }

    /// A round dot of the given radius.
    pub fn dot(center: Point, radius: f64) -> Self {
        Self::new(center, Size::new(2.0 * radius, 2.0 * radius))
    }

    /// Placeholder box for one line of `text`, `height` tall, at the origin.
    ///
    /// The width is estimated from the character count; nothing here lays out glyphs.
    pub fn text_box(text: &str, height: f64) -> Self {
        let glyphs = text.chars().count().max(1) as f64;
        Self::new(
            Point::ORIGIN,
            Size::new(glyphs * GLYPH_ASPECT * height, height),
        )
    }

    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    pub fn width(&self) -> f64 {
        self.bounds().width()
    }

    pub fn height(&self) -> f64 {
        self.bounds().height()
    }

    /// Axis-aligned bounding box, accounting for rotation.
    pub fn bounds(&self) -> Rect {
        let half = Vec2::new(self.size.width / 2.0, self.size.height / 2.0);
        let unrotated = Rect::from_points(self.center - half, self.center + half);
        if self.rotation == 0.0 {
            return unrotated;
        }
        let a = Affine::rotate_about(self.rotation, self.center);
        let corners = [
            Point::new(unrotated.x0, unrotated.y0),
            Point::new(unrotated.x1, unrotated.y0),
            Point::new(unrotated.x0, unrotated.y1),
            Point::new(unrotated.x1, unrotated.y1),
        ];
        let mut out = Rect::from_points(a * corners[0], a * corners[0]);
        for c in &corners[1..] {
            out = out.union_pt(a * *c);
        }
        out
    }

    pub fn critical_point(&self, dir: Vec2) -> Point {
        rect_critical_point(self.bounds(), dir)
    }

    pub fn shift(&mut self, by: Vec2) -> &mut Self {
        self.center += by;
        self
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.center = p;
        self
    }

    /// Uniformly scale so the unrotated height becomes `height`.
    ///
    /// A degenerate (zero-height) item only gets its height set.
    pub fn scale_to_fit_height(&mut self, height: f64) -> &mut Self {
        let height = height.max(0.0);
        if self.size.height > 0.0 {
            let k = height / self.size.height;
            self.size = Size::new(self.size.width * k, height);
        } else {
            self.size.height = height;
        }
        self
    }

    /// Place the item beside `other` in direction `dir`, `buff` away, centered on the other axis.
    pub fn next_to(&mut self, other: Rect, dir: Vec2, buff: f64) -> &mut Self {
        let mine = self.bounds();
        let target = rect_critical_point(other, dir) + dir * buff;
        let anchor = rect_critical_point(mine, -dir);
        let mut delta = target - anchor;
        // Keep centers aligned along the axis perpendicular to `dir`.
        if dir.x == 0.0 {
            delta.x = other.center().x - mine.center().x;
        }
        if dir.y == 0.0 {
            delta.y = other.center().y - mine.center().y;
        }
        self.shift(delta)
    }

    pub fn rotate_about(&mut self, angle: f64, pivot: Point) -> &mut Self {
        self.center = Affine::rotate_about(angle, pivot) * self.center;
        self.rotation += angle;
        self
    }
}

impl Lerp for Item {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            center: <Point as Lerp>::lerp(&a.center, &b.center, t),
            size: <Size as Lerp>::lerp(&a.size, &b.size, t),
            rotation: <f64 as Lerp>::lerp(&a.rotation, &b.rotation, t),
            color: Rgba8::lerp(&a.color, &b.color, t),
            visible: if t < 1.0 { a.visible || b.visible } else { b.visible },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/item.rs"]
mod tests;
