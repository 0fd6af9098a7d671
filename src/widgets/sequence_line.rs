//! Number line showing a sequence closing in on its limit, with an ε-interval around the limit.

use crate::{
    animation::compose::ComposeAnimation,
    animation::ease::Ease,
    animation::lerp::Lerp,
    foundation::core::{DEFAULT_BUFF, DOWN, Line, Point, Rect, Rgba8, UP, line_bounds, union_all},
    foundation::error::{NinesError, NinesResult},
    scene::item::Item,
    scene::updaters::Updaters,
};

const DOT_RADIUS: f64 = 0.08;
const DOT_SCALE_FACTOR: f64 = 0.25;
/// Slack added to distances before comparing against ε.
const EPSILON_CORRECTION: f64 = 1e-9;
const TICK_LENGTH: f64 = 0.25;
const INTERVAL_DROP: f64 = 0.25;
const EPSILON_TEXT_BUFF: f64 = 0.3;
const TEXT_HEIGHT: f64 = 0.35;
const SMALL_TEXT_HEIGHT: f64 = 0.3;

/// Height multiplier for a dot at on-screen distance `d` from the limit.
pub fn dot_scaler(d: f64) -> f64 {
    (1.0 / (d.clamp(0.1, 9.0).log10() - 1.0)).abs()
}

/// Format with `digits` significant digits, keeping at least one digit after the point.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value:?}");
    }
    let digits = digits.max(1);
    // Decimal exponent taken from the shortest round-trip form.
    let magnitude: i32 = format!("{value:e}")
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0);
    if magnitude < -4 || magnitude >= digits as i32 {
        let s = format!("{:.*e}", digits - 1, value);
        let Some((mantissa, exp)) = s.split_once('e') else {
            return s;
        };
        let mantissa = if mantissa.contains('.') {
            mantissa.trim_end_matches('0').trim_end_matches('.')
        } else {
            mantissa
        };
        // Signed exponent of at least two digits: `1e-05`, `1.234e+04`.
        return match exp.parse::<i32>() {
            Ok(e) => format!(
                "{mantissa}e{}{:02}",
                if e < 0 { '-' } else { '+' },
                e.unsigned_abs()
            ),
            Err(_) => s,
        };
    }
    let decimals = (digits as i32 - 1 - magnitude).max(1) as usize;
    let s = format!("{value:.decimals$}");
    let trimmed = s.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Which side(s) of the limit the ε-interval covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalDirection {
    Below,
    Above,
    #[default]
    Both,
}

/// Built-in sequences for configuration files.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequencePreset {
    /// `0.9, 0.99, 0.999, ...` converging to 1.
    #[default]
    Nines,
    /// `1/n` converging to 0.
    Harmonic,
    /// `ratio^n` converging to 0.
    Geometric { ratio: f64 },
}

impl SequencePreset {
    pub fn term(&self, n: u32) -> f64 {
        let n = f64::from(n);
        match self {
            Self::Nines => 1.0 - 10f64.powf(-n),
            Self::Harmonic => 1.0 / n,
            Self::Geometric { ratio } => ratio.powf(n),
        }
    }

    pub fn limit(&self) -> f64 {
        match self {
            Self::Nines => 1.0,
            Self::Harmonic | Self::Geometric { .. } => 0.0,
        }
    }

    /// Display form of the `n`th term; `None` means the value is printed.
    pub fn label(&self, n: u32) -> Option<String> {
        match self {
            Self::Nines => Some(format!("0.{}", "9".repeat(n as usize))),
            Self::Harmonic => Some(format!("1/{n}")),
            Self::Geometric { .. } => None,
        }
    }

    pub fn validate(&self) -> NinesResult<()> {
        if let Self::Geometric { ratio } = self {
            if !ratio.is_finite() || ratio.abs() >= 1.0 {
                return Err(NinesError::validation(format!(
                    "geometric ratio must satisfy |ratio| < 1, got {ratio}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequenceLineOpts {
    pub sequence: SequencePreset,
    pub samples: u32,
    /// How many leading terms get an `x_i = ...` label.
    pub text_samples: u32,
    pub number_line_width: f64,
    /// Fraction of the value range added as padding, split between both ends.
    pub padding_scale: f64,
    pub interval_direction: IntervalDirection,
}

impl Default for SequenceLineOpts {
    fn default() -> Self {
        Self {
            sequence: SequencePreset::default(),
            samples: 500,
            text_samples: 10,
            number_line_width: 14.0,
            padding_scale: 0.75,
            interval_direction: IntervalDirection::default(),
        }
    }
}

impl SequenceLineOpts {
    pub fn validate(&self) -> NinesResult<()> {
        self.sequence.validate()?;
        if self.samples == 0 {
            return Err(NinesError::validation("sequence line samples must be > 0"));
        }
        if self.text_samples > self.samples {
            return Err(NinesError::validation(format!(
                "text_samples ({}) must not exceed samples ({})",
                self.text_samples, self.samples
            )));
        }
        if !self.number_line_width.is_finite() || self.number_line_width <= 0.0 {
            return Err(NinesError::validation(
                "number_line_width must be finite and > 0",
            ));
        }
        if !self.padding_scale.is_finite() || self.padding_scale < 0.0 {
            return Err(NinesError::validation(
                "padding_scale must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Horizontal axis mapping values to scene points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NumberLine {
    pub x_min: f64,
    pub x_max: f64,
    pub line: Line,
}

impl NumberLine {
    pub fn n2p(&self, value: f64) -> Point {
        let t = (value - self.x_min) / (self.x_max - self.x_min);
        <Point as Lerp>::lerp(&self.line.p0, &self.line.p1, t)
    }

    pub fn p2n(&self, p: Point) -> f64 {
        let t = (p.x - self.line.p0.x) / (self.line.p1.x - self.line.p0.x);
        self.x_min + t * (self.x_max - self.x_min)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceDot {
    pub index: u32,
    pub value: f64,
    pub item: Item,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Label {
    pub text: String,
    pub item: Item,
}

/// Segment with short upward ticks at both ends.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Interval {
    pub line: Line,
    pub ticks: [Line; 2],
}

impl Interval {
    fn new(start: Point, end: Point) -> Self {
        let tick = |p: Point| Line::new(p, p + UP * TICK_LENGTH);
        Self {
            line: Line::new(start, end),
            ticks: [tick(start), tick(end)],
        }
    }

    pub fn bounds(&self) -> Rect {
        union_all([self.line, self.ticks[0], self.ticks[1]].map(line_bounds))
            .unwrap_or_else(|| line_bounds(self.line))
    }
}

/// Everything the updaters read and rewrite.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceLineParts {
    pub number_line: NumberLine,
    pub limit: f64,
    pub dots: Vec<SequenceDot>,
    pub limit_dot: Item,
    pub texts: Vec<Label>,
    pub interval: Interval,
    pub epsilon_text: Label,
    pub n_label: Label,
    pub epsilon: f64,
    pub value_scaling: f64,
    pub epsilon_changes_color: bool,
    pub interval_direction: IntervalDirection,
}

impl SequenceLineParts {
    /// First index whose term is within ε of the limit, or 1 when none is.
    pub fn n_value(&self) -> u32 {
        self.dots
            .iter()
            .find(|d| (self.limit - d.value).abs() + EPSILON_CORRECTION < self.epsilon)
            .map_or(1, |d| d.index)
    }

    fn place_dots(&mut self) {
        for dot in &mut self.dots {
            let dist = (self.limit - dot.value) * self.value_scaling;
            dot.item.center.x = self.number_line.n2p(self.limit - dist).x;
            dot.item.scale_to_fit_height(dot_scaler(dist.abs()) * DOT_SCALE_FACTOR);
        }
    }

    fn color_dots(&mut self) {
        for dot in &mut self.dots {
            if (self.limit - dot.value).abs() + EPSILON_CORRECTION > self.epsilon {
                dot.item.color = Rgba8::BLUE;
            } else if self.epsilon_changes_color {
                dot.item.color = Rgba8::GREEN;
            }
        }
    }

    fn interval_endpoints(&self) -> (Point, Point) {
        let (below, above) = match self.interval_direction {
            IntervalDirection::Below => (1.0, 0.0),
            IntervalDirection::Above => (0.0, 1.0),
            IntervalDirection::Both => (1.0, 1.0),
        };
        let reach = self.value_scaling * self.epsilon;
        (
            self.number_line.n2p(self.limit - below * reach),
            self.number_line.n2p(self.limit + above * reach),
        )
    }

    fn rebuild_interval(&mut self) {
        let (start, end) = self.interval_endpoints();
        let drop = DOWN * INTERVAL_DROP;
        self.interval = Interval::new(start + drop, end + drop);
    }

    fn rebuild_epsilon_text(&mut self) {
        let text = format_significant(self.epsilon, 4);
        let mut item = Item::text_box(&text, SMALL_TEXT_HEIGHT).with_color(Rgba8::YELLOW);
        item.next_to(self.interval.bounds(), DOWN, EPSILON_TEXT_BUFF);
        self.epsilon_text = Label { text, item };
    }

    fn rebuild_n_label(&mut self) {
        let n = self.n_value();
        let text = format!("N={n}");
        let mut item = Item::text_box(&text, SMALL_TEXT_HEIGHT).with_color(Rgba8::GREEN);
        if let Some(dot) = self.dots.iter().find(|d| d.index == n) {
            item.next_to(dot.item.bounds(), UP, DEFAULT_BUFF);
        }
        self.n_label = Label { text, item };
    }
}

/// Sampled sequence on a number line.
///
/// `epsilon` and `value_scaling` act as trackers: changing either re-runs the updaters, which
/// move and recolor the dots and rebuild the interval, the ε readout and the `N` label.
#[derive(Debug)]
pub struct SequenceLine {
    parts: SequenceLineParts,
    updaters: Updaters<'static, SequenceLineParts>,
}

impl SequenceLine {
    pub fn new(opts: &SequenceLineOpts) -> NinesResult<Self> {
        let preset = opts.sequence.clone();
        Self::from_fn(
            |n| preset.term(n),
            |n, _| preset.label(n),
            opts.sequence.limit(),
            opts,
        )
    }

    /// Build from an arbitrary sequence. `label` may return `None` to print the value.
    #[tracing::instrument(skip(term, label, opts), fields(samples = opts.samples))]
    pub fn from_fn(
        term: impl Fn(u32) -> f64,
        label: impl Fn(u32, f64) -> Option<String>,
        limit: f64,
        opts: &SequenceLineOpts,
    ) -> NinesResult<Self> {
        opts.validate()?;
        if !limit.is_finite() {
            return Err(NinesError::validation(format!(
                "sequence limit must be finite, got {limit}"
            )));
        }

        let values: Vec<(u32, f64)> = (1..=opts.samples).map(|i| (i, term(i))).collect();
        if let Some((i, v)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(NinesError::validation(format!(
                "sequence term x_{i} is not finite ({v})"
            )));
        }

        let low = values.iter().map(|(_, v)| *v).fold(limit, f64::min);
        let high = values.iter().map(|(_, v)| *v).fold(limit, f64::max);
        let buff = if high > low {
            (high - low) * opts.padding_scale / 2.0
        } else {
            0.5
        };
        let half_w = opts.number_line_width / 2.0;
        let number_line = NumberLine {
            x_min: low - buff,
            x_max: high + buff,
            line: Line::new(Point::new(-half_w, 0.0), Point::new(half_w, 0.0)),
        };

        let dots: Vec<SequenceDot> = values
            .iter()
            .map(|&(index, value)| {
                let mut item =
                    Item::dot(number_line.n2p(value), DOT_RADIUS).with_color(Rgba8::BLUE);
                item.scale_to_fit_height(dot_scaler((value - limit).abs()) * DOT_SCALE_FACTOR);
                SequenceDot { index, value, item }
            })
            .collect();

        let texts = dots
            .iter()
            .take(opts.text_samples as usize)
            .map(|dot| {
                let shown = label(dot.index, dot.value)
                    .unwrap_or_else(|| format_significant(dot.value, 4));
                let text = format!("x_{{{}}}={shown}", dot.index);
                let mut item = Item::text_box(&text, TEXT_HEIGHT);
                item.next_to(dot.item.bounds(), DOWN, DEFAULT_BUFF);
                Label { text, item }
            })
            .collect();

        let empty = Label {
            text: String::new(),
            item: Item::new(Point::ORIGIN, Default::default()),
        };
        let mut parts = SequenceLineParts {
            number_line,
            limit,
            dots,
            limit_dot: Item::dot(number_line.n2p(limit), DOT_RADIUS).with_color(Rgba8::PURPLE),
            texts,
            interval: Interval::new(Point::ORIGIN, Point::ORIGIN),
            epsilon_text: empty.clone(),
            n_label: empty,
            epsilon: 1.0,
            value_scaling: 1.0,
            epsilon_changes_color: false,
            interval_direction: opts.interval_direction,
        };

        let mut updaters = Updaters::new();
        updaters.add("dots", SequenceLineParts::place_dots);
        updaters.add("dots", SequenceLineParts::color_dots);
        updaters.add("interval", SequenceLineParts::rebuild_interval);
        updaters.add("epsilon_text", SequenceLineParts::rebuild_epsilon_text);
        updaters.add("n_label", SequenceLineParts::rebuild_n_label);
        updaters.run(&mut parts);

        Ok(Self { parts, updaters })
    }

    pub fn parts(&self) -> &SequenceLineParts {
        &self.parts
    }

    pub fn updaters(&self) -> &Updaters<'static, SequenceLineParts> {
        &self.updaters
    }

    pub fn epsilon(&self) -> f64 {
        self.parts.epsilon
    }

    pub fn value_scaling(&self) -> f64 {
        self.parts.value_scaling
    }

    pub fn n_value(&self) -> u32 {
        self.parts.n_value()
    }

    pub fn update(&mut self) {
        self.updaters.run(&mut self.parts);
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> NinesResult<&mut Self> {
        Tracker::Epsilon.check(epsilon)?;
        self.parts.epsilon = epsilon;
        self.update();
        Ok(self)
    }

    pub fn set_value_scaling(&mut self, scaling: f64) -> NinesResult<&mut Self> {
        Tracker::ValueScaling.check(scaling)?;
        self.parts.value_scaling = scaling;
        self.update();
        Ok(self)
    }

    /// Whether dots inside the ε-band turn green.
    pub fn set_epsilon_changes_color(&mut self, on: bool) -> &mut Self {
        self.parts.epsilon_changes_color = on;
        self.update();
        self
    }

    pub fn epsilon_animation<'a>(
        &'a mut self,
        target: f64,
        run_time: f64,
    ) -> NinesResult<TrackerAnimation<'a>> {
        self.tracker_animation(Tracker::Epsilon, target, run_time)
    }

    pub fn value_scaling_animation<'a>(
        &'a mut self,
        target: f64,
        run_time: f64,
    ) -> NinesResult<TrackerAnimation<'a>> {
        self.tracker_animation(Tracker::ValueScaling, target, run_time)
    }

    fn tracker_animation<'a>(
        &'a mut self,
        tracker: Tracker,
        target: f64,
        run_time: f64,
    ) -> NinesResult<TrackerAnimation<'a>> {
        tracker.check(target)?;
        if !run_time.is_finite() || run_time < 0.0 {
            return Err(NinesError::validation(format!(
                "run_time must be finite and >= 0, got {run_time}"
            )));
        }
        let start = tracker.get(&self.parts);
        let state = TrackerState {
            line: self,
            tracker,
            start,
            target,
        };
        Ok(ComposeAnimation::new(state)
            .with_run_time(run_time)
            .with_segment(1.0, |s: &mut TrackerState<'_>, t| {
                let value = <f64 as Lerp>::lerp(&s.start, &s.target, Ease::Smooth.apply(t));
                s.tracker.set(&mut s.line.parts, value);
                s.line.update();
                Ok(())
            }))
    }
}

/// Value a [`SequenceLine`] animation drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tracker {
    Epsilon,
    ValueScaling,
}

impl Tracker {
    fn get(self, parts: &SequenceLineParts) -> f64 {
        match self {
            Self::Epsilon => parts.epsilon,
            Self::ValueScaling => parts.value_scaling,
        }
    }

    fn set(self, parts: &mut SequenceLineParts, value: f64) {
        match self {
            Self::Epsilon => parts.epsilon = value,
            Self::ValueScaling => parts.value_scaling = value,
        }
    }

    fn check(self, value: f64) -> NinesResult<()> {
        match self {
            Self::Epsilon if !value.is_finite() || value < 0.0 => Err(NinesError::validation(
                format!("epsilon must be finite and >= 0, got {value}"),
            )),
            Self::ValueScaling if !value.is_finite() || value <= 0.0 => {
                Err(NinesError::validation(format!(
                    "value_scaling must be finite and > 0, got {value}"
                )))
            }
            _ => Ok(()),
        }
    }
}

pub type TrackerAnimation<'a> = ComposeAnimation<'a, TrackerState<'a>>;

#[derive(Debug)]
pub struct TrackerState<'a> {
    pub line: &'a mut SequenceLine,
    tracker: Tracker,
    start: f64,
    target: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/sequence_line.rs"]
mod tests;
