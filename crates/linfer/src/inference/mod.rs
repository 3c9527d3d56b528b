//! Scoring for [`LinearClassifier`](crate::repr::LinearClassifier).
//!
//! - [`softmax_inplace`]: exponentiate and normalise raw scores
//! - [`Prediction`]: arg-max label with its probability
//! - [`Classifier`]: the interface exposed to consumers
//! - [`ConsistencyFault`]: label/score length mismatch (a broken model)

mod linear;

use std::collections::HashMap;

use crate::data::FeatureObservation;

/// Labels and scores disagree in length.
///
/// This cannot happen for a model that passed construction; scoring code
/// that detects it panics with this message instead of returning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("consistency fault: {labels} labels but {scores} scores (label dictionary is not dense)")]
pub struct ConsistencyFault {
    pub labels: usize,
    pub scores: usize,
}

impl ConsistencyFault {
    /// Panic unless `labels == scores`.
    #[inline]
    #[track_caller]
    pub(crate) fn check(labels: usize, scores: usize) {
        if labels != scores {
            panic!("{}", Self { labels, scores });
        }
    }
}

/// The arg-max label of a score vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction<'a> {
    pub label: &'a str,
    /// Index of `label` in the label dictionary.
    pub index: usize,
    pub score: f64,
}

/// Softmax in place: `exp(x)` normalised by the sum over all entries.
///
/// The maximum is subtracted before exponentiating, so finite raw scores of
/// any size yield a distribution that sums to one. When the sum is exactly
/// zero (every raw score is `-inf`) the exponentials are left unnormalised
/// instead of dividing by zero.
pub fn softmax_inplace(scores: &mut [f64]) {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // An all `-inf` vector has no finite shift.
    let shift = if max.is_finite() { max } else { 0.0 };
    for s in scores.iter_mut() {
        *s = (*s - shift).exp();
    }
    let sum: f64 = scores.iter().sum();
    if sum != 0.0 {
        for s in scores.iter_mut() {
            *s /= sum;
        }
    }
}

/// Index of the maximum; ties go to the lowest index.
///
/// Returns `None` for an empty slice.
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;
    let mut best = (0, *first);
    for (i, &s) in rest.iter().enumerate() {
        if s > best.1 {
            best = (i + 1, s);
        }
    }
    Some(best.0)
}

/// Classifier interface for consumers that score named features.
pub trait Classifier {
    /// Raw per-class scores, ordered like [`labels`](Self::labels).
    fn eval_raw(&self, features: &[FeatureObservation]) -> Vec<f64>;

    /// Label names ordered by index.
    fn labels(&self) -> &[String];

    /// Probability per label name.
    fn scores_map(&self, features: &[FeatureObservation]) -> HashMap<String, f64>;
}
