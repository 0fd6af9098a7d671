//! A bucket that items can be put into and taken out of, optionally labelled.

use std::f64::consts::PI;

use crate::{
    animation::compose::ComposeAnimation,
    animation::ease::Ease,
    animation::lerp::Lerp,
    foundation::core::{
        DEFAULT_BUFF, Line, Point, Rect, Size, UP, Vec2, line_bounds, rect_critical_point,
        shift_line, union_all,
    },
    foundation::error::{NinesError, NinesResult},
    scene::item::Item,
};

const SIDE_LENGTH: f64 = 2.5;
const SIDE_TILT: f64 = PI / 24.0;
const LABEL_HEIGHT_RATIO: f64 = 0.1;
const LABEL_MAX_WIDTH_RATIO: f64 = 0.9;
const LABEL_RULE_BUFF: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BucketOpts {
    pub label: Option<String>,
    pub label_scaling: f64,
}

impl Default for BucketOpts {
    fn default() -> Self {
        Self {
            label: None,
            label_scaling: 1.0,
        }
    }
}

impl BucketOpts {
    pub fn validate(&self) -> NinesResult<()> {
        if !self.label_scaling.is_finite() || self.label_scaling <= 0.0 {
            return Err(NinesError::validation(
                "bucket label_scaling must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PutInOpts {
    /// Weight of the "move above the bucket" segment; negative skips it.
    pub move_above_weight: f64,
    /// Weight of the "drop into the bucket" segment; negative skips it.
    pub move_into_weight: f64,
    pub run_time: f64,
}

impl Default for PutInOpts {
    fn default() -> Self {
        Self {
            move_above_weight: 0.5,
            move_into_weight: 0.5,
            run_time: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TakeOutOpts {
    pub move_out_weight: f64,
    /// End above the bucket; otherwise return to where the item started.
    pub move_above: bool,
    pub run_time: f64,
}

impl Default for TakeOutOpts {
    fn default() -> Self {
        Self {
            move_out_weight: 1.0,
            move_above: true,
            run_time: 1.0,
        }
    }
}

fn validate_run_time(run_time: f64) -> NinesResult<()> {
    if !run_time.is_finite() || run_time < 0.0 {
        return Err(NinesError::validation(format!(
            "run_time must be finite and >= 0, got {run_time}"
        )));
    }
    Ok(())
}

/// Label box plus the double rules drawn above and below it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BucketLabel {
    pub text: String,
    pub item: Item,
    pub rules: [Line; 4],
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Bucket {
    pub base: Line,
    pub left: Line,
    pub right: Line,
    pub label: Option<BucketLabel>,
    label_scaling: f64,
    bucket_height: f64,
}

impl Bucket {
    pub fn new(opts: &BucketOpts) -> NinesResult<Self> {
        opts.validate()?;

        let base = Line::new(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let left = Line::new(
            base.p0,
            base.p0 + Vec2::from_angle(PI / 2.0 + SIDE_TILT) * SIDE_LENGTH,
        );
        let right = Line::new(
            base.p1,
            base.p1 + Vec2::from_angle(PI / 2.0 - SIDE_TILT) * SIDE_LENGTH,
        );

        let mut bucket = Self {
            base,
            left,
            right,
            label: None,
            label_scaling: opts.label_scaling,
            bucket_height: 0.0,
        };
        bucket.bucket_height = bucket.bounds().height();
        if let Some(label) = &opts.label {
            bucket.relabel(label.clone());
        }
        bucket.move_to(Point::ORIGIN);
        Ok(bucket)
    }

    pub fn bounds(&self) -> Rect {
        let mut rects = vec![
            line_bounds(self.base),
            line_bounds(self.left),
            line_bounds(self.right),
        ];
        if let Some(label) = &self.label {
            rects.push(label.item.bounds());
            rects.extend(label.rules.iter().map(|l| line_bounds(*l)));
        }
        // Three lines are always present.
        union_all(rects).unwrap_or_default()
    }

    pub fn bucket_height(&self) -> f64 {
        self.bucket_height
    }

    /// Region items are dropped onto: the label if present, otherwise the base.
    pub fn items_anchor(&self) -> Rect {
        match &self.label {
            Some(label) => label.item.bounds(),
            None => line_bounds(self.base),
        }
    }

    pub fn shift(&mut self, by: Vec2) -> &mut Self {
        self.base = shift_line(self.base, by);
        self.left = shift_line(self.left, by);
        self.right = shift_line(self.right, by);
        if let Some(label) = &mut self.label {
            label.item.shift(by);
            for rule in &mut label.rules {
                *rule = shift_line(*rule, by);
            }
        }
        self
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        let by = p - self.bounds().center();
        self.shift(by)
    }

    /// Replace the label text, re-laying out the label box.
    pub fn relabel(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        let base_len = (self.base.p1 - self.base.p0).hypot();
        let height = self.bucket_height * LABEL_HEIGHT_RATIO * self.label_scaling;
        let mut item = Item::text_box(&text, height);
        let max_width = base_len * LABEL_MAX_WIDTH_RATIO;
        if item.size.width > max_width {
            let k = max_width / item.size.width;
            item.scale_to_fit_height(height * k);
        }
        let side_height = line_bounds(self.left).height();
        let buff = (side_height - item.size.height) / 2.0;
        item.next_to(line_bounds(self.base), UP, buff);

        let c = item.center;
        let half_h = item.size.height / 2.0;
        let rule = |y: f64| {
            Line::new(
                Point::new(c.x - base_len / 2.0, y),
                Point::new(c.x + base_len / 2.0, y),
            )
        };
        let rules = [
            rule(c.y + half_h + LABEL_RULE_BUFF),
            rule(c.y + half_h + 2.0 * LABEL_RULE_BUFF),
            rule(c.y - half_h - LABEL_RULE_BUFF),
            rule(c.y - half_h - 2.0 * LABEL_RULE_BUFF),
        ];

        self.label = Some(BucketLabel { text, item, rules });
        self
    }

    pub fn relabel_animation<'a>(
        &'a mut self,
        text: impl Into<String>,
        run_time: f64,
    ) -> NinesResult<RelabelBucket<'a>> {
        validate_run_time(run_time)?;
        let start = self.clone();
        let mut target = self.clone();
        target.relabel(text);
        let state = RelabelState {
            bucket: self,
            start,
            target,
        };
        Ok(ComposeAnimation::new(state)
            .with_run_time(run_time)
            .with_segment(1.0, |s: &mut RelabelState<'_>, t| {
                *s.bucket = Bucket::lerp(&s.start, &s.target, Ease::Smooth.apply(t));
                Ok(())
            }))
    }

    /// Putting an item in hides it.
    pub fn put_in(&self, item: &mut Item) {
        item.visible = false;
    }

    pub fn put_in_animation<'a>(
        &self,
        item: &'a mut Item,
        opts: &PutInOpts,
    ) -> NinesResult<PutInBucket<'a>> {
        validate_run_time(opts.run_time)?;
        let state = PutInState {
            start: item.clone(),
            item,
            bucket_top: rect_critical_point(self.bounds(), UP),
            anchor_top: rect_critical_point(self.items_anchor(), UP),
            moves_above: opts.move_above_weight >= 0.0,
        };
        Ok(ComposeAnimation::new(state)
            .with_run_time(opts.run_time)
            .with_segment(opts.move_above_weight, PutInState::move_above)
            .with_segment(opts.move_into_weight, PutInState::move_into)
            .on_clean_up(|s| {
                *s.item = s.start.clone();
                s.item.visible = false;
                Ok(())
            }))
    }

    /// Taking an item out places it above the bucket.
    pub fn take_out(&self, item: &mut Item) {
        item.next_to(self.bounds(), UP, DEFAULT_BUFF);
        item.visible = true;
    }

    /// Animation lifting `item` out of the bucket. Further segments may be chained with
    /// [`ComposeAnimation::with_segment`].
    pub fn take_out_animation<'a>(
        &self,
        item: &'a mut Item,
        opts: &TakeOutOpts,
    ) -> NinesResult<TakeOutBucket<'a>> {
        validate_run_time(opts.run_time)?;
        let target = if opts.move_above {
            let mut above = item.clone();
            above.next_to(self.bounds(), UP, DEFAULT_BUFF);
            above.center
        } else {
            item.center
        };
        let state = TakeOutState {
            start: item.clone(),
            item,
            anchor_top: rect_critical_point(self.items_anchor(), UP),
            target,
        };
        Ok(ComposeAnimation::new(state)
            .with_run_time(opts.run_time)
            .with_segment(opts.move_out_weight, TakeOutState::move_out))
    }
}

impl Lerp for BucketLabel {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            text: b.text.clone(),
            item: Item::lerp(&a.item, &b.item, t),
            rules: <[Line; 4]>::lerp(&a.rules, &b.rules, t),
        }
    }
}

impl BucketLabel {
    /// Same label collapsed to a zero-height sliver at its center.
    fn collapsed(&self) -> Self {
        let mut out = self.clone();
        out.item.size = Size::new(out.item.size.width, 0.0);
        let c = out.item.center;
        for rule in &mut out.rules {
            *rule = Line::new(Point::new(rule.p0.x, c.y), Point::new(rule.p1.x, c.y));
        }
        out
    }
}

impl Lerp for Bucket {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let label = match (&a.label, &b.label) {
            (Some(la), Some(lb)) => Some(BucketLabel::lerp(la, lb, t)),
            (None, Some(lb)) => Some(BucketLabel::lerp(&lb.collapsed(), lb, t)),
            (Some(la), None) if t < 1.0 => Some(BucketLabel::lerp(la, &la.collapsed(), t)),
            _ => None,
        };
        Self {
            base: <Line as Lerp>::lerp(&a.base, &b.base, t),
            left: <Line as Lerp>::lerp(&a.left, &b.left, t),
            right: <Line as Lerp>::lerp(&a.right, &b.right, t),
            label,
            label_scaling: b.label_scaling,
            bucket_height: b.bucket_height,
        }
    }
}

pub type RelabelBucket<'a> = ComposeAnimation<'a, RelabelState<'a>>;
pub type PutInBucket<'a> = ComposeAnimation<'a, PutInState<'a>>;
pub type TakeOutBucket<'a> = ComposeAnimation<'a, TakeOutState<'a>>;

#[derive(Debug)]
pub struct RelabelState<'a> {
    pub bucket: &'a mut Bucket,
    start: Bucket,
    target: Bucket,
}

#[derive(Debug)]
pub struct PutInState<'a> {
    pub item: &'a mut Item,
    pub start: Item,
    bucket_top: Point,
    anchor_top: Point,
    moves_above: bool,
}

impl PutInState<'_> {
    fn move_above(&mut self, t: f64) -> NinesResult<()> {
        *self.item = self.start.clone();
        let to_above = self.bucket_top - self.start.center;
        self.item.shift(to_above * Ease::InCubic.apply(t));
        Ok(())
    }

    /// State the drop starts from: above the bucket, or the start when that step is skipped.
    fn settle_above(&mut self) -> NinesResult<()> {
        if self.moves_above {
            self.move_above(1.0)
        } else {
            *self.item = self.start.clone();
            Ok(())
        }
    }

    fn move_into(&mut self, t: f64) -> NinesResult<()> {
        self.settle_above()?;
        let into = self.anchor_top - self.item.center;
        self.item
            .scale_to_fit_height(Ease::InCubic.apply(1.0 - t) * self.start.size.height)
            .shift(into * Ease::OutCubic.apply(t));
        Ok(())
    }
}

#[derive(Debug)]
pub struct TakeOutState<'a> {
    pub item: &'a mut Item,
    pub start: Item,
    anchor_top: Point,
    target: Point,
}

impl TakeOutState<'_> {
    fn move_out(&mut self, t: f64) -> NinesResult<()> {
        *self.item = self.start.clone();
        self.item.visible = true;
        self.item.move_to(self.anchor_top);
        let to_target = self.target - self.item.center;
        let eased = Ease::InCubic.apply(t);
        self.item
            .scale_to_fit_height(eased * self.start.size.height)
            .shift(to_target * eased);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/bucket.rs"]
mod tests;
