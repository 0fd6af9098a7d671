//! A two-pan balance whose lever arm can be tilted and wobbled.

use std::f64::consts::PI;

use crate::{
    animation::compose::ComposeAnimation,
    animation::ease::Ease,
    foundation::core::{
        DEFAULT_BUFF, DOWN, LEFT, Line, Point, RIGHT, Rect, UP, Vec2, line_bounds, rotate_line,
        shift_line, union_all,
    },
    foundation::error::{NinesError, NinesResult},
    scene::item::Item,
    scene::updaters::Updaters,
};

const BASE_RADIUS: f64 = 1.0;
const COLUMN_HEIGHT: f64 = 3.0;
const PIVOT_HEIGHT_RATIO: f64 = 0.8;
const ROPE_HEIGHT_RATIO: f64 = 0.5;
const PAN_LENGTH_RATIO: f64 = 0.5;
const ROPE_CUTOFF_RATIO: f64 = 0.25;
const ROPE_SPREAD: f64 = PI / 6.0;
const DOT_RADIUS: f64 = 0.08;

/// Vertical distance from an arm end down to its pan.
const PAN_DROP: f64 = COLUMN_HEIGHT * ROPE_HEIGHT_RATIO;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScaleOpts {
    pub left_label: String,
    pub right_label: String,
    pub label_height: f64,
    /// Peak tilt of [`Scale::weigh_animation`], radians.
    pub weigh_angle: f64,
    pub weigh_run_time: f64,
}

impl Default for ScaleOpts {
    fn default() -> Self {
        Self {
            left_label: "0.9…=1".to_string(),
            right_label: "0.9…≠1".to_string(),
            label_height: 0.4,
            weigh_angle: PI / 12.0,
            weigh_run_time: 4.0,
        }
    }
}

impl ScaleOpts {
    pub fn validate(&self) -> NinesResult<()> {
        if !self.label_height.is_finite() || self.label_height <= 0.0 {
            return Err(NinesError::validation(
                "scale label_height must be finite and > 0",
            ));
        }
        if !self.weigh_angle.is_finite() {
            return Err(NinesError::validation("scale weigh_angle must be finite"));
        }
        if !self.weigh_run_time.is_finite() || self.weigh_run_time < 0.0 {
            return Err(NinesError::validation(
                "scale weigh_run_time must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Geometry of every part of the balance.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScaleParts {
    /// Center of the half-disc base; the arc spans the upper half.
    pub base_center: Point,
    pub base_radius: f64,
    pub base_close: Line,
    pub column: Line,
    pub pivot: Item,
    pub cap: Item,
    pub lever_arm: Line,
    pub left_ropes: [Line; 2],
    pub right_ropes: [Line; 2],
    pub left_pan: Line,
    pub right_pan: Line,
    pub left_payload: Item,
    pub right_payload: Item,
}

impl ScaleParts {
    pub fn bounds(&self) -> Rect {
        let base = Rect::new(
            self.base_center.x - self.base_radius,
            self.base_center.y,
            self.base_center.x + self.base_radius,
            self.base_center.y + self.base_radius,
        );
        let lines = [
            self.base_close,
            self.column,
            self.lever_arm,
            self.left_pan,
            self.right_pan,
        ]
        .into_iter()
        .chain(self.left_ropes)
        .chain(self.right_ropes)
        .map(line_bounds);
        let items = [
            &self.pivot,
            &self.cap,
            &self.left_payload,
            &self.right_payload,
        ]
        .into_iter()
        .map(Item::bounds);
        union_all(std::iter::once(base).chain(lines).chain(items)).unwrap_or(base)
    }

    fn shift(&mut self, by: Vec2) {
        self.base_center += by;
        self.base_close = shift_line(self.base_close, by);
        self.column = shift_line(self.column, by);
        self.pivot.shift(by);
        self.cap.shift(by);
        self.lever_arm = shift_line(self.lever_arm, by);
        for rope in self.left_ropes.iter_mut().chain(&mut self.right_ropes) {
            *rope = shift_line(*rope, by);
        }
        self.left_pan = shift_line(self.left_pan, by);
        self.right_pan = shift_line(self.right_pan, by);
        self.left_payload.shift(by);
        self.right_payload.shift(by);
    }
}

/// Hang a rope pair from `end`: centered on it horizontally, tops level with it.
fn hang_ropes(ropes: &mut [Line; 2], end: Point) {
    let Some(bounds) = union_all(ropes.iter().map(|l| line_bounds(*l))) else {
        return;
    };
    let by = Vec2::new(end.x - bounds.center().x, end.y - bounds.y1);
    for rope in ropes.iter_mut() {
        *rope = shift_line(*rope, by);
    }
}

fn hang_pan(pan: &mut Line, end: Point) {
    let by = (end + DOWN * PAN_DROP) - pan.midpoint();
    *pan = shift_line(*pan, by);
}

/// A balance with a payload on each pan.
///
/// Ropes, pans and payloads follow the lever arm through updaters, so moving the arm is enough
/// to move everything hanging from it.
#[derive(Debug)]
pub struct Scale {
    parts: ScaleParts,
    updaters: Updaters<'static, ScaleParts>,
}

impl Scale {
    pub fn new(opts: &ScaleOpts) -> NinesResult<Self> {
        opts.validate()?;

        let base_center = Point::ORIGIN;
        let base_top = base_center + UP * BASE_RADIUS;
        let column = Line::new(base_top, base_top + UP * COLUMN_HEIGHT);
        let pivot_point = base_top + UP * (COLUMN_HEIGHT * PIVOT_HEIGHT_RATIO);
        let arm_reach = 2.0 * BASE_RADIUS;
        let left_point = pivot_point + LEFT * arm_reach;
        let right_point = pivot_point + RIGHT * arm_reach;

        let pan_half = COLUMN_HEIGHT * PAN_LENGTH_RATIO / 2.0;
        let pan_at = |end: Point| {
            let mid = end + DOWN * PAN_DROP;
            Line::new(mid + LEFT * pan_half, mid + RIGHT * pan_half)
        };
        let rope_len = ROPE_HEIGHT_RATIO * ROPE_CUTOFF_RATIO * COLUMN_HEIGHT;
        let ropes_at = |end: Point| {
            let rope = Line::new(end, end + DOWN * rope_len);
            [
                rotate_line(rope, -ROPE_SPREAD, end),
                rotate_line(rope, ROPE_SPREAD, end),
            ]
        };

        let left_pan = pan_at(left_point);
        let right_pan = pan_at(right_point);
        let mut left_payload = Item::text_box(&opts.left_label, opts.label_height);
        left_payload.next_to(line_bounds(left_pan), UP, DEFAULT_BUFF);
        let mut right_payload = Item::text_box(&opts.right_label, opts.label_height);
        right_payload.next_to(line_bounds(right_pan), UP, DEFAULT_BUFF);

        let parts = ScaleParts {
            base_center,
            base_radius: BASE_RADIUS,
            base_close: Line::new(
                base_center + LEFT * BASE_RADIUS,
                base_center + RIGHT * BASE_RADIUS,
            ),
            column,
            pivot: Item::dot(pivot_point, DOT_RADIUS),
            cap: Item::dot(column.p1, DOT_RADIUS),
            lever_arm: Line::new(left_point, right_point),
            left_ropes: ropes_at(left_point),
            right_ropes: ropes_at(right_point),
            left_pan,
            right_pan,
            left_payload,
            right_payload,
        };

        let mut updaters = Updaters::new();
        updaters.add("left_ropes", |p: &mut ScaleParts| {
            hang_ropes(&mut p.left_ropes, p.lever_arm.p0)
        });
        updaters.add("right_ropes", |p: &mut ScaleParts| {
            hang_ropes(&mut p.right_ropes, p.lever_arm.p1)
        });
        updaters.add("left_pan", |p: &mut ScaleParts| {
            hang_pan(&mut p.left_pan, p.lever_arm.p0)
        });
        updaters.add("right_pan", |p: &mut ScaleParts| {
            hang_pan(&mut p.right_pan, p.lever_arm.p1)
        });
        updaters.add("left_payload", |p: &mut ScaleParts| {
            p.left_payload.next_to(line_bounds(p.left_pan), UP, DEFAULT_BUFF);
        });
        updaters.add("right_payload", |p: &mut ScaleParts| {
            p.right_payload.next_to(line_bounds(p.right_pan), UP, DEFAULT_BUFF);
        });

        let mut scale = Self { parts, updaters };
        let by = Point::ORIGIN - scale.parts.bounds().center();
        scale.parts.shift(by);
        Ok(scale)
    }

    pub fn parts(&self) -> &ScaleParts {
        &self.parts
    }

    pub fn bounds(&self) -> Rect {
        self.parts.bounds()
    }

    pub fn updaters(&self) -> &Updaters<'static, ScaleParts> {
        &self.updaters
    }

    /// Counter-clockwise angle of the lever arm from horizontal.
    pub fn lever_angle(&self) -> f64 {
        let d = self.parts.lever_arm.p1 - self.parts.lever_arm.p0;
        d.y.atan2(d.x)
    }

    /// Re-attach everything that hangs from the lever arm.
    pub fn update(&mut self) {
        self.updaters.run(&mut self.parts);
    }

    pub fn shift(&mut self, by: Vec2) -> &mut Self {
        self.parts.shift(by);
        self
    }

    /// Rotate the lever arm about the pivot; positive tilts the left pan down.
    pub fn tilt(&mut self, angle: f64) -> &mut Self {
        self.parts.lever_arm = rotate_line(self.parts.lever_arm, angle, self.parts.pivot.center);
        self.update();
        self
    }

    /// Rock the arm one way and back, then the other way and back.
    pub fn weigh_animation<'a>(
        &'a mut self,
        angle: f64,
        run_time: f64,
    ) -> NinesResult<WeighScale<'a>> {
        if !angle.is_finite() {
            return Err(NinesError::validation(format!(
                "weigh angle must be finite, got {angle}"
            )));
        }
        if !run_time.is_finite() || run_time < 0.0 {
            return Err(NinesError::validation(format!(
                "run_time must be finite and >= 0, got {run_time}"
            )));
        }
        let state = WeighState {
            start_arm: self.parts.lever_arm,
            pivot: self.parts.pivot.center,
            angle,
            scale: self,
        };
        Ok(ComposeAnimation::new(state)
            .with_run_time(run_time)
            .with_segment(0.5, |s: &mut WeighState<'_>, t| {
                s.rock(Ease::ThereAndBack.apply(t) * s.angle);
                Ok(())
            })
            .with_segment(0.5, |s: &mut WeighState<'_>, t| {
                s.rock(-Ease::ThereAndBack.apply(t) * s.angle);
                Ok(())
            }))
    }
}

pub type WeighScale<'a> = ComposeAnimation<'a, WeighState<'a>>;

#[derive(Debug)]
pub struct WeighState<'a> {
    pub scale: &'a mut Scale,
    start_arm: Line,
    pivot: Point,
    angle: f64,
}

impl WeighState<'_> {
    fn rock(&mut self, by: f64) {
        self.scale.parts.lever_arm = rotate_line(self.start_arm, by, self.pivot);
        self.scale.update();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/scale.rs"]
mod tests;
