//! Analog clock face with a single hand.

use std::f64::consts::TAU;

use crate::{
    animation::driver::Animation,
    animation::ease::Ease,
    foundation::core::{Line, Point, Rect, Rgba8, UP, Vec2, rotate_line, shift_line},
    foundation::error::{NinesError, NinesResult},
    scene::item::Item,
};

const LABEL_RADIUS_RATIO: f64 = 0.85;
const HAND_LENGTH_RATIO: f64 = 0.5;
const HUB_RADIUS_RATIO: f64 = 0.025;
/// Label height per unit of radius at `font_size_scale = 1`.
const LABEL_HEIGHT_RATIO: f64 = 0.3;

/// Which way the hand travels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Cw,
    Ccw,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClockOpts {
    pub radius: f64,
    pub color: Rgba8,
    pub font_size_scale: f64,
    pub hour: u32,
}

impl Default for ClockOpts {
    fn default() -> Self {
        Self {
            radius: 2.0,
            color: Rgba8::WHITE,
            font_size_scale: 0.5,
            hour: 12,
        }
    }
}

impl ClockOpts {
    pub fn validate(&self) -> NinesResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(NinesError::validation("clock radius must be finite and > 0"));
        }
        if !self.font_size_scale.is_finite() || self.font_size_scale <= 0.0 {
            return Err(NinesError::validation(
                "clock font_size_scale must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HourLabel {
    pub hour: u32,
    pub item: Item,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Clock {
    pub center: Point,
    pub radius: f64,
    pub color: Rgba8,
    /// Labels for 12, 1, 2, ..., 11 in that order.
    pub labels: Vec<HourLabel>,
    pub hub: Item,
    pub hand: Line,
    hour: u32,
}

/// Angle (counter-clockwise from +x) at which `hour` sits on the dial.
fn dial_angle(hour: u32) -> f64 {
    -TAU * (f64::from(hour % 12) - 3.0) / 12.0
}

impl Clock {
    pub fn new(opts: &ClockOpts) -> NinesResult<Self> {
        opts.validate()?;
        let center = Point::ORIGIN;
        let label_height = opts.radius * opts.font_size_scale * LABEL_HEIGHT_RATIO;
        let labels = std::iter::once(12)
            .chain(1..12)
            .map(|hour| {
                let offset = Vec2::from_angle(dial_angle(hour)) * (opts.radius * LABEL_RADIUS_RATIO);
                let mut item = Item::text_box(&hour.to_string(), label_height);
                item.move_to(center + offset);
                HourLabel { hour, item }
            })
            .collect();

        let hour = opts.hour % 12;
        let hand = rotate_line(
            Line::new(center, center + UP * (opts.radius * HAND_LENGTH_RATIO)),
            -TAU * f64::from(hour) / 12.0,
            center,
        );

        Ok(Self {
            center,
            radius: opts.radius,
            color: opts.color,
            labels,
            hub: Item::dot(center, opts.radius * HUB_RADIUS_RATIO).with_color(opts.color),
            hand,
            hour,
        })
    }

    /// Committed hour in `0..12`; 12 o'clock is `0`.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Hour the hand currently points at, rounded to the nearest mark.
    pub fn displayed_hour(&self) -> u32 {
        let d = self.hand.p1 - self.hand.p0;
        // Clockwise from 12.
        let turns = d.x.atan2(d.y).rem_euclid(TAU) / TAU;
        (turns * 12.0).round() as u32 % 12
    }

    pub fn label(&self, hour: u32) -> Option<&HourLabel> {
        let hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        self.labels.iter().find(|l| l.hour == hour)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    pub fn shift(&mut self, by: Vec2) -> &mut Self {
        self.center += by;
        for label in &mut self.labels {
            label.item.shift(by);
        }
        self.hub.shift(by);
        self.hand = shift_line(self.hand, by);
        self
    }

    /// Jump clockwise to `hour`.
    pub fn to_hour(&mut self, hour: u32) -> &mut Self {
        let target = hour % 12;
        let diff = (target + 12 - self.hour) % 12;
        self.hand = rotate_line(self.hand, -TAU * f64::from(diff) / 12.0, self.center);
        self.hour = target;
        self
    }

    /// Sweep the hand to `hour` in `direction`. The clock's hour is committed on clean-up.
    pub fn to_hour_animation<'a>(
        &'a mut self,
        hour: u32,
        direction: Direction,
        run_time: f64,
        ease: Ease,
    ) -> NinesResult<ClockToHour<'a>> {
        if !run_time.is_finite() || run_time < 0.0 {
            return Err(NinesError::validation(format!(
                "run_time must be finite and >= 0, got {run_time}"
            )));
        }
        let target = hour % 12;
        let angle = match direction {
            Direction::Cw => -TAU * f64::from((target + 12 - self.hour) % 12) / 12.0,
            Direction::Ccw => TAU * f64::from((self.hour + 12 - target) % 12) / 12.0,
        };
        Ok(ClockToHour {
            start_hand: self.hand,
            about: self.hand.p0,
            clock: self,
            target,
            angle,
            run_time,
            ease,
        })
    }
}

/// Hand sweep produced by [`Clock::to_hour_animation`].
#[derive(Debug)]
pub struct ClockToHour<'a> {
    clock: &'a mut Clock,
    start_hand: Line,
    about: Point,
    target: u32,
    angle: f64,
    run_time: f64,
    ease: Ease,
}

impl ClockToHour<'_> {
    pub fn clock(&self) -> &Clock {
        &*self.clock
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Total signed sweep in radians; negative is clockwise.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl Animation for ClockToHour<'_> {
    fn run_time(&self) -> f64 {
        self.run_time
    }

    fn interpolate(&mut self, alpha: f64) -> NinesResult<()> {
        if !alpha.is_finite() {
            return Err(NinesError::evaluation(format!(
                "alpha must be finite, got {alpha}"
            )));
        }
        self.clock.hand = rotate_line(
            self.start_hand,
            self.ease.apply(alpha) * self.angle,
            self.about,
        );
        Ok(())
    }

    fn clean_up(&mut self) -> NinesResult<()> {
        self.clock.hour = self.target;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/clock.rs"]
mod tests;
