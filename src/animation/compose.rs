use std::fmt;

use crate::{
    animation::driver::Animation,
    animation::timeline::Timeline,
    foundation::error::NinesResult,
};

/// Run time used when a compositor is not told otherwise, in seconds.
pub const DEFAULT_RUN_TIME: f64 = 1.0;

/// Advances the animation state to a local progress in `[0, 1]`.
pub type Mutator<'a, S> = Box<dyn FnMut(&mut S, f64) -> NinesResult<()> + 'a>;

type CleanUp<'a, S> = Box<dyn FnMut(&mut S) -> NinesResult<()> + 'a>;

struct Segment<'a, S> {
    weight: f64,
    mutator: Mutator<'a, S>,
}

/// Blends several weighted mutators into a single animation.
///
/// Each registered segment owns a slice of the unit progress interval proportional to its
/// weight. On every [`evaluate`](Self::evaluate) the segments that were already passed are
/// re-applied at local progress `1.0` (in order) and the active one receives its rescaled local
/// progress. Mutators are expected to rebuild their effect from a snapshot, which makes the
/// result independent of how coarsely frames are sampled.
pub struct ComposeAnimation<'a, S> {
    state: S,
    segments: Vec<Segment<'a, S>>,
    timeline: Timeline,
    run_time: f64,
    run_time_matches_weights: bool,
    clean_up: Option<CleanUp<'a, S>>,
}

impl<'a, S> ComposeAnimation<'a, S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            segments: Vec::new(),
            timeline: Timeline::default(),
            run_time: DEFAULT_RUN_TIME,
            run_time_matches_weights: false,
            clean_up: None,
        }
    }

    /// Fixed playback duration in seconds. Ignored while the run time matches the weights.
    pub fn with_run_time(mut self, secs: f64) -> Self {
        self.run_time = secs;
        self.sync_run_time();
        self
    }

    /// Append a segment.
    ///
    /// Negative (or non-finite) weights are dropped without error. A zero weight is valid and
    /// makes the segment play instantly.
    pub fn register(
        &mut self,
        weight: f64,
        mutator: impl FnMut(&mut S, f64) -> NinesResult<()> + 'a,
    ) -> &mut Self {
        if !(weight.is_finite() && weight >= 0.0) {
            tracing::debug!(weight, "dropping segment with invalid weight");
            return self;
        }
        self.segments.push(Segment {
            weight,
            mutator: Box::new(mutator),
        });
        self.rebuild();
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_segment(
        mut self,
        weight: f64,
        mutator: impl FnMut(&mut S, f64) -> NinesResult<()> + 'a,
    ) -> Self {
        self.register(weight, mutator);
        self
    }

    /// Make the run time equal the sum of raw weights, now and after every later registration.
    pub fn set_duration_from_weights(&mut self) -> &mut Self {
        self.run_time_matches_weights = true;
        self.sync_run_time();
        self
    }

    /// Builder-style [`set_duration_from_weights`](Self::set_duration_from_weights).
    pub fn matching_weights(mut self) -> Self {
        self.set_duration_from_weights();
        self
    }

    /// Hook run once by [`Animation::clean_up`], after the final frame.
    pub fn on_clean_up(mut self, f: impl FnMut(&mut S) -> NinesResult<()> + 'a) -> Self {
        self.clean_up = Some(Box::new(f));
        self
    }

    /// Apply the composite animation at global progress `alpha`.
    #[tracing::instrument(level = "trace", skip(self), fields(segments = self.segments.len()))]
    pub fn evaluate(&mut self, alpha: f64) -> NinesResult<()> {
        let Some(step) = self.timeline.step(alpha)? else {
            return Ok(());
        };
        for i in step.finalized {
            (self.segments[i].mutator)(&mut self.state, 1.0)?;
        }
        (self.segments[step.active].mutator)(&mut self.state, step.local)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn matches_weights(&self) -> bool {
        self.run_time_matches_weights
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    fn rebuild(&mut self) {
        self.timeline = Timeline::from_weights(self.segments.iter().map(|s| s.weight));
        self.sync_run_time();
    }

    fn sync_run_time(&mut self) {
        if self.run_time_matches_weights {
            self.run_time = self.timeline.total_weight();
        }
    }
}

impl<S> Animation for ComposeAnimation<'_, S> {
    fn run_time(&self) -> f64 {
        self.run_time
    }

    fn interpolate(&mut self, alpha: f64) -> NinesResult<()> {
        self.evaluate(alpha)
    }

    fn clean_up(&mut self) -> NinesResult<()> {
        match self.clean_up.as_mut() {
            Some(f) => f(&mut self.state),
            None => Ok(()),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for ComposeAnimation<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeAnimation")
            .field("state", &self.state)
            .field("weights", &self.timeline.weights())
            .field("run_time", &self.run_time)
            .field("run_time_matches_weights", &self.run_time_matches_weights)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/compose.rs"]
mod tests;
