//! Demo scenes: each one drives a widget through a short script and records every frame.

pub(crate) mod recorder;

use std::f64::consts::PI;

use crate::{
    animation::ease::Ease,
    animation::group::{BoxedAnimation, LaggedStart, succession},
    config::Config,
    foundation::core::{DEFAULT_BUFF, LEFT, Point, RIGHT, UP},
    foundation::error::{NinesError, NinesResult},
    scene::item::Item,
    widgets::bucket::{Bucket, PutInOpts, TakeOutOpts},
    widgets::calculator::Calculator,
    widgets::clock::{Clock, Direction},
    widgets::scale::Scale,
    widgets::sequence_line::SequenceLine,
};
use recorder::{Recorder, Recording, to_state};

/// Names accepted by [`run`].
pub const SCENES: [&str; 5] = ["bucket", "scale", "clock", "calculator", "sequence_line"];

/// Play the named scene with `cfg` and return its frames.
#[tracing::instrument(skip(cfg))]
pub fn run(name: &str, cfg: &Config) -> NinesResult<Recording> {
    cfg.validate()?;
    let mut rec = Recorder::new(cfg.fps);
    match name {
        "bucket" => bucket(cfg, &mut rec)?,
        "scale" => scale(cfg, &mut rec)?,
        "clock" => clock(cfg, &mut rec)?,
        "calculator" => calculator(cfg, &mut rec)?,
        "sequence_line" => sequence_line(cfg, &mut rec)?,
        other => {
            return Err(NinesError::validation(format!(
                "unknown scene '{other}' (expected one of: {})",
                SCENES.join(", ")
            )));
        }
    }
    tracing::debug!(frames = rec.len(), "scene finished");
    Ok(rec.finish(name))
}

#[derive(serde::Serialize)]
struct BucketView<'v> {
    bucket: &'v Bucket,
    items: &'v [Item],
}

fn bucket_state(bucket: &Bucket, items: &[Item]) -> NinesResult<serde_json::Value> {
    to_state(&BucketView { bucket, items })
}

fn bucket(cfg: &Config, rec: &mut Recorder) -> NinesResult<()> {
    let mut bucket = Bucket::new(&cfg.bucket)?;
    let mut dots: Vec<Item> = [LEFT, RIGHT]
        .into_iter()
        .map(|side| {
            let mut dot = Item::dot(Point::ORIGIN, 0.08);
            dot.next_to(bucket.bounds(), UP, DEFAULT_BUFF).shift(side);
            dot
        })
        .collect();
    rec.still("setup", &BucketView { bucket: &bucket, items: &dots })?;

    let mut anim = bucket.put_in_animation(&mut dots[0], &PutInOpts::default())?;
    rec.play("put_in", &mut anim, |a| {
        bucket_state(&bucket, std::slice::from_ref(&*a.state().item))
    })?;
    drop(anim);
    let mut anim = bucket.take_out_animation(&mut dots[0], &TakeOutOpts::default())?;
    rec.play("take_out", &mut anim, |a| {
        bucket_state(&bucket, std::slice::from_ref(&*a.state().item))
    })?;
    drop(anim);

    // Both dots go in one after another, then come out staggered.
    let put_in = PutInOpts::default();
    let children = dots
        .iter_mut()
        .map(|d| {
            bucket
                .put_in_animation(d, &put_in)
                .map(|a| Box::new(a) as BoxedAnimation<'_>)
        })
        .collect::<NinesResult<Vec<_>>>()?;
    let mut both_in = succession(children);
    rec.play("put_in_both", &mut both_in, |_| Ok(serde_json::Value::Null))?;
    drop(both_in);
    rec.still("inside", &BucketView { bucket: &bucket, items: &dots })?;

    let take_out = TakeOutOpts::default();
    let children = dots
        .iter_mut()
        .map(|d| {
            bucket
                .take_out_animation(d, &take_out)
                .map(|a| Box::new(a) as BoxedAnimation<'_>)
        })
        .collect::<NinesResult<Vec<_>>>()?;
    let mut both_out = LaggedStart::new(children, 0.5)?;
    rec.play("take_out_both", &mut both_out, |_| Ok(serde_json::Value::Null))?;
    drop(both_out);
    rec.still("taken_out", &BucketView { bucket: &bucket, items: &dots })?;

    let mut anim = bucket.relabel_animation("0.99", 1.0)?;
    rec.play("relabel", &mut anim, |a| bucket_state(&*a.state().bucket, &dots))?;
    Ok(())
}

fn scale(cfg: &Config, rec: &mut Recorder) -> NinesResult<()> {
    let mut scale = Scale::new(&cfg.scale)?;
    rec.still("setup", scale.parts())?;
    for step in ["weigh_1", "weigh_2", "weigh_3"] {
        let mut anim = scale.weigh_animation(cfg.scale.weigh_angle, cfg.scale.weigh_run_time)?;
        rec.play(step, &mut anim, |a| to_state(a.state().scale.parts()))?;
    }
    scale.tilt(PI / 24.0);
    rec.still("tilted", scale.parts())?;
    Ok(())
}

fn clock(cfg: &Config, rec: &mut Recorder) -> NinesResult<()> {
    let mut clock = Clock::new(&cfg.clock)?;
    rec.still("setup", &clock)?;
    clock.to_hour(1);
    rec.still("jump_to_1", &clock)?;
    clock.to_hour(10);
    rec.still("jump_to_10", &clock)?;

    let sweeps = [
        ("sweep_to_1", 1, Direction::Cw),
        ("sweep_to_11", 11, Direction::Cw),
        ("sweep_back_to_1", 1, Direction::Ccw),
        ("sweep_to_18", 18, Direction::Cw),
    ];
    for (step, hour, direction) in sweeps {
        let mut anim = clock.to_hour_animation(hour, direction, 1.0, Ease::Linear)?;
        rec.play(step, &mut anim, |a| to_state(a.clock()))?;
    }
    Ok(())
}

fn calculator(cfg: &Config, rec: &mut Recorder) -> NinesResult<()> {
    let mut calc = Calculator::new(&cfg.calculator)?;
    calc.show_on_screen("1234");
    rec.still("setup", &calc)?;
    let mut anim = calc.taps_animation(&["1", "2", "3", "4", "="])?;
    rec.play("type", &mut anim, |a| to_state(&**a.state()))?;
    drop(anim);
    calc.show_on_screen("1234");
    rec.still("result", &calc)?;
    Ok(())
}

fn sequence_line(cfg: &Config, rec: &mut Recorder) -> NinesResult<()> {
    let mut line = SequenceLine::new(&cfg.sequence_line)?;
    rec.still("setup", line.parts())?;
    line.set_epsilon(0.1)?;
    rec.still("epsilon", line.parts())?;
    line.set_epsilon_changes_color(true);
    rec.still("n_label", line.parts())?;

    enum Step {
        Epsilon(f64),
        Scaling(f64),
    }
    let script = [
        ("epsilon_0.01", Step::Epsilon(0.01)),
        ("epsilon_0.001", Step::Epsilon(0.001)),
        ("scaling_50", Step::Scaling(50.0)),
        ("epsilon_0.0001", Step::Epsilon(0.0001)),
        ("scaling_500", Step::Scaling(500.0)),
    ];
    for (name, step) in script {
        let mut anim = match step {
            Step::Epsilon(v) => line.epsilon_animation(v, 1.0)?,
            Step::Scaling(v) => line.value_scaling_animation(v, 1.0)?,
        };
        rec.play(name, &mut anim, |a| to_state(a.state().line.parts()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/mod.rs"]
mod tests;
