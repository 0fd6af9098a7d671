use crate::{
    animation::compose::ComposeAnimation,
    animation::driver::Animation,
    foundation::error::{NinesError, NinesResult},
};

/// Boxed child animation, possibly borrowing its target.
pub type BoxedAnimation<'a> = Box<dyn Animation + 'a>;

/// Play `anims` back to back. Each child gets a slice proportional to its own run time.
pub fn succession<'a>(
    anims: Vec<BoxedAnimation<'a>>,
) -> ComposeAnimation<'a, Vec<BoxedAnimation<'a>>> {
    let weights: Vec<f64> = anims.iter().map(|a| a.run_time()).collect();
    let mut out = ComposeAnimation::new(anims).matching_weights();
    for (i, w) in weights.into_iter().enumerate() {
        out.register(w, move |children: &mut Vec<BoxedAnimation<'a>>, t| {
            children[i].interpolate(t)
        });
    }
    out.on_clean_up(|children| {
        for child in children.iter_mut() {
            child.clean_up()?;
        }
        Ok(())
    })
}

/// Runs children with staggered starts. Child `i` starts once child `i - 1` has progressed by
/// `lag_ratio` of its own run time.
pub struct LaggedStart<'a> {
    children: Vec<BoxedAnimation<'a>>,
    spans: Vec<(f64, f64)>, // (start, end) in seconds
    run_time: f64,
}

impl<'a> LaggedStart<'a> {
    pub fn new(children: Vec<BoxedAnimation<'a>>, lag_ratio: f64) -> NinesResult<Self> {
        if !lag_ratio.is_finite() || lag_ratio < 0.0 {
            return Err(NinesError::validation(format!(
                "lag_ratio must be finite and >= 0, got {lag_ratio}"
            )));
        }

        let mut spans = Vec::with_capacity(children.len());
        let mut cursor = 0.0;
        for child in &children {
            let start = cursor;
            let end = start + child.run_time();
            spans.push((start, end));
            cursor = start + (end - start) * lag_ratio;
        }
        let run_time = spans.iter().map(|(_, end)| *end).fold(0.0, f64::max);

        Ok(Self {
            children,
            spans,
            run_time,
        })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Start/end of each child, in seconds.
    pub fn spans(&self) -> &[(f64, f64)] {
        &self.spans
    }
}

impl Animation for LaggedStart<'_> {
    fn run_time(&self) -> f64 {
        self.run_time
    }

    fn interpolate(&mut self, alpha: f64) -> NinesResult<()> {
        let time = alpha.clamp(0.0, 1.0) * self.run_time;
        for (child, &(start, end)) in self.children.iter_mut().zip(&self.spans) {
            let local = if end > start {
                ((time - start) / (end - start)).clamp(0.0, 1.0)
            } else if time >= start {
                1.0
            } else {
                0.0
            };
            child.interpolate(local)?;
        }
        Ok(())
    }

    fn clean_up(&mut self) -> NinesResult<()> {
        for child in &mut self.children {
            child.clean_up()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/group.rs"]
mod tests;
