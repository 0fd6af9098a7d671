//! Nines builds explainer-video animations out of weighted steps.
//!
//! The core piece is [`ComposeAnimation`]: several mutators over one shared state, each given a
//! share of the progress interval proportional to its weight. Around it sit:
//!
//! - a fixed-rate [`Player`] and the [`succession`] / [`LaggedStart`] combinators
//! - diagram widgets ([`Bucket`], [`Scale`], [`Clock`], [`Calculator`], [`SequenceLine`]) whose
//!   mutating operations come in an immediate form and an `*_animation` form
//! - demo scenes recorded frame by frame through [`scenes::run`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
/// Scene configuration loaded from JSON.
pub mod config;
pub(crate) mod scene;
/// Scripted demo scenes.
pub mod scenes;
pub(crate) mod widgets;

pub use crate::foundation::core::{
    Affine, DEFAULT_BUFF, DOWN, Fps, FrameIndex, LEFT, Line, ORIGIN, Point, RIGHT, Rect, Rgba8,
    Size, UP, Vec2,
};
pub use crate::foundation::error::{NinesError, NinesResult};

pub use crate::animation::compose::{ComposeAnimation, DEFAULT_RUN_TIME, Mutator};
pub use crate::animation::driver::{Animation, MAX_FRAMES, PlayStats, Player};
pub use crate::animation::ease::Ease;
pub use crate::animation::group::{BoxedAnimation, LaggedStart, succession};
pub use crate::animation::lerp::Lerp;
pub use crate::animation::timeline::{Step, Timeline};
pub use crate::config::Config;
pub use crate::scene::item::Item;
pub use crate::scene::updaters::{UpdaterId, Updaters};
pub use crate::scenes::recorder::{Frame, Recorder, Recording};
pub use crate::widgets::bucket::{
    Bucket, BucketLabel, BucketOpts, PutInBucket, PutInOpts, PutInState, RelabelBucket,
    RelabelState, TakeOutBucket, TakeOutOpts, TakeOutState,
};
pub use crate::widgets::calculator::{
    Calculator, CalculatorOpts, KEY_LABELS, Key, ScreenText, TAP_RUN_TIME, TapButtons,
};
pub use crate::widgets::clock::{Clock, ClockOpts, ClockToHour, Direction, HourLabel};
pub use crate::widgets::scale::{Scale, ScaleOpts, ScaleParts, WeighScale, WeighState};
pub use crate::widgets::sequence_line::{
    Interval, IntervalDirection, Label, NumberLine, SequenceDot, SequenceLine, SequenceLineOpts,
    SequenceLineParts, SequencePreset, Tracker, TrackerAnimation, TrackerState, dot_scaler,
    format_significant,
};
