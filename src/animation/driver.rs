use crate::foundation::{
    core::{Fps, FrameIndex},
    error::{NinesError, NinesResult},
};

/// Something that can be advanced to a global progress `alpha` in `[0, 1]`.
pub trait Animation {
    /// Playback duration in seconds.
    fn run_time(&self) -> f64;

    /// Apply the animation at progress `alpha`.
    fn interpolate(&mut self, alpha: f64) -> NinesResult<()>;

    /// Called once after the final frame.
    fn clean_up(&mut self) -> NinesResult<()> {
        Ok(())
    }
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn run_time(&self) -> f64 {
        (**self).run_time()
    }

    fn interpolate(&mut self, alpha: f64) -> NinesResult<()> {
        (**self).interpolate(alpha)
    }

    fn clean_up(&mut self) -> NinesResult<()> {
        (**self).clean_up()
    }
}

impl<A: Animation + ?Sized> Animation for &mut A {
    fn run_time(&self) -> f64 {
        (**self).run_time()
    }

    fn interpolate(&mut self, alpha: f64) -> NinesResult<()> {
        (**self).interpolate(alpha)
    }

    fn clean_up(&mut self) -> NinesResult<()> {
        (**self).clean_up()
    }
}

/// Upper bound on the frames a single animation may be sampled at.
pub const MAX_FRAMES: u64 = 10_000_000;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlayStats {
    /// Number of `interpolate` calls issued.
    pub frames: u64,
    /// Run time the frames were spread over, in seconds.
    pub run_time: f64,
}

/// Fixed-rate frame driver: samples an animation once per frame tick.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    fps: Fps,
}

impl Player {
    pub fn new(fps: Fps) -> Self {
        Self { fps }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Number of frame intervals used for `run_time` (at least one).
    pub fn frame_count(&self, run_time: f64) -> NinesResult<u64> {
        if !run_time.is_finite() || run_time < 0.0 {
            return Err(NinesError::validation(format!(
                "run time must be finite and >= 0, got {run_time}"
            )));
        }
        self.fps
            .secs_to_frames_ceil(run_time)
            .filter(|n| *n <= MAX_FRAMES)
            .map(|n| n.max(1))
            .ok_or_else(|| {
                NinesError::validation(format!(
                    "run time {run_time}s at {} fps exceeds {MAX_FRAMES} frames",
                    self.fps.as_f64()
                ))
            })
    }

    /// Progress values sampled for `run_time`: `k / n` for `k` in `0..=n`.
    pub fn alphas(&self, run_time: f64) -> NinesResult<impl Iterator<Item = f64>> {
        let n = self.frame_count(run_time)?;
        Ok((0..=n).map(move |k| k as f64 / n as f64))
    }

    pub fn play<A: Animation + ?Sized>(&self, anim: &mut A) -> NinesResult<PlayStats> {
        self.play_with(anim, |_, _, _| Ok(()))
    }

    /// Play `anim` to completion, calling `on_frame` after every `interpolate`.
    #[tracing::instrument(skip(self, anim, on_frame), fields(run_time = anim.run_time()))]
    pub fn play_with<A, F>(&self, anim: &mut A, mut on_frame: F) -> NinesResult<PlayStats>
    where
        A: Animation + ?Sized,
        F: FnMut(&A, FrameIndex, f64) -> NinesResult<()>,
    {
        let run_time = anim.run_time();
        let mut frames = 0u64;
        for (i, alpha) in self.alphas(run_time)?.enumerate() {
            anim.interpolate(alpha)?;
            on_frame(&*anim, FrameIndex(i as u64), alpha)?;
            frames += 1;
        }
        anim.clean_up()?;
        tracing::debug!(frames, run_time, "animation finished");
        Ok(PlayStats { frames, run_time })
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Fps::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
