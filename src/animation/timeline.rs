use std::ops::Range;

use crate::foundation::error::{NinesError, NinesResult};

/// Normalized layout of weighted segments over the unit interval.
///
/// Segment `i` owns the slice `[offset_i, offset_i + normalized_i)`. A zero-weight segment owns an
/// empty slice and is passed instantly.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    weights: Vec<f64>,
    normalized: Vec<f64>,
    offsets: Vec<f64>,
    total: f64,
}

/// What a single evaluation pass has to invoke.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Segments already passed; each gets local progress `1.0`, in order.
    pub finalized: Range<usize>,
    /// Segment receiving `local`.
    pub active: usize,
    /// Local progress of the active segment, in `[0, 1]`.
    pub local: f64,
}

impl Timeline {
    /// Build from raw weights. Callers filter out negative weights beforehand.
    pub fn from_weights(weights: impl IntoIterator<Item = f64>) -> Self {
        let weights: Vec<f64> = weights.into_iter().collect();
        let total: f64 = weights.iter().sum();

        let normalized: Vec<f64> = if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![0.0; weights.len()]
        };

        let mut offsets = Vec::with_capacity(normalized.len());
        let mut acc: f64 = 0.0;
        for n in &normalized {
            // Rounding in the running sum can push trailing offsets past 1.
            offsets.push(acc.min(1.0));
            acc += n;
        }

        Self {
            weights,
            normalized,
            offsets,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the raw (unnormalized) weights.
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn normalized_weights(&self) -> &[f64] {
        &self.normalized
    }

    /// Cumulative start offset of every segment.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Where the last segment ends; `1.0` (up to rounding) for any valid timeline.
    pub fn end(&self) -> f64 {
        match (self.offsets.last(), self.normalized.last()) {
            (Some(o), Some(n)) => o + n,
            _ => 0.0,
        }
    }

    /// Resolve global progress `alpha` into the segments to finalize and the active one.
    ///
    /// Returns `Ok(None)` for an empty timeline. A boundary belongs to the segment starting
    /// there: at `alpha == offset_i` segment `i` is active at local progress `0`.
    pub fn step(&self, alpha: f64) -> NinesResult<Option<Step>> {
        if self.is_empty() {
            return Ok(None);
        }
        if self.total <= 0.0 {
            return Err(NinesError::animation(
                "timeline weights must sum to a positive value",
            ));
        }
        if !alpha.is_finite() {
            return Err(NinesError::evaluation(format!(
                "progress must be finite, got {alpha}"
            )));
        }
        let alpha = alpha.clamp(0.0, 1.0);

        // offsets[0] == 0.0 <= alpha, so at least one offset qualifies.
        let active = if alpha >= 1.0 {
            self.len() - 1
        } else {
            self.offsets.partition_point(|o| *o <= alpha) - 1
        };

        let local = if alpha >= 1.0 {
            1.0
        } else {
            let span = self.normalized[active];
            if span > 0.0 {
                ((alpha - self.offsets[active]) / span).clamp(0.0, 1.0)
            } else {
                1.0
            }
        };

        Ok(Some(Step {
            finalized: 0..active,
            active,
            local,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
