use crate::{
    animation::driver::{Animation, PlayStats, Player},
    foundation::core::Fps,
    foundation::error::{NinesError, NinesResult},
};

/// One sampled frame: which step produced it, at what progress, and the widget state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    pub index: u64,
    pub step: String,
    pub alpha: f64,
    pub state: serde_json::Value,
}

/// Frames collected while a scene plays.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Recording {
    pub scene: String,
    pub fps: Fps,
    pub frames: Vec<Frame>,
}

impl Recording {
    pub fn to_json_pretty(&self) -> NinesResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| NinesError::serde(e.to_string()))
    }

    /// Distinct step names in the order they were first recorded.
    pub fn steps(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for f in &self.frames {
            if out.last() != Some(&f.step.as_str()) {
                out.push(&f.step);
            }
        }
        out
    }
}

pub(crate) fn to_state(value: &impl serde::Serialize) -> NinesResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| NinesError::serde(e.to_string()))
}

/// Plays animations at a fixed rate and records a snapshot after every frame.
#[derive(Debug)]
pub struct Recorder {
    player: Player,
    frames: Vec<Frame>,
}

impl Recorder {
    pub fn new(fps: Fps) -> Self {
        Self {
            player: Player::new(fps),
            frames: Vec::new(),
        }
    }

    pub fn fps(&self) -> Fps {
        self.player.fps()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Record a single still frame.
    pub fn still(&mut self, step: &str, state: &impl serde::Serialize) -> NinesResult<()> {
        let state = to_state(state)?;
        self.push(step, 1.0, state);
        Ok(())
    }

    /// Play `anim` to completion, recording `view(anim)` after each frame.
    pub fn play<A, F>(&mut self, step: &str, anim: &mut A, view: F) -> NinesResult<PlayStats>
    where
        A: Animation + ?Sized,
        F: Fn(&A) -> NinesResult<serde_json::Value>,
    {
        let mut sampled = Vec::new();
        let stats = self.player.play_with(anim, |a, _, alpha| {
            sampled.push((alpha, view(a)?));
            Ok(())
        })?;
        for (alpha, state) in sampled {
            self.push(step, alpha, state);
        }
        tracing::debug!(step, frames = stats.frames, "recorded step");
        Ok(stats)
    }

    pub fn finish(self, scene: impl Into<String>) -> Recording {
        Recording {
            scene: scene.into(),
            fps: self.player.fps(),
            frames: self.frames,
        }
    }

    fn push(&mut self, step: &str, alpha: f64, state: serde_json::Value) {
        let index = self.frames.len() as u64;
        self.frames.push(Frame {
            index,
            step: step.to_string(),
            alpha,
            state,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/recorder.rs"]
mod tests;
