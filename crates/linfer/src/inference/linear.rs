//! Scoring methods on [`LinearClassifier`].

use std::collections::HashMap;

use super::{argmax, softmax_inplace, Classifier, ConsistencyFault, Prediction};
use crate::data::{FeatureObservation, IntFeatureObservation};
use crate::repr::LinearClassifier;

impl LinearClassifier {
    /// Raw scores for already indexed observations.
    ///
    /// `raw[c] = Σ weight[c][index] * magnitude`.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside the weight matrix. Observations produced
    /// by this model's indexer are always in range.
    pub fn int_raw_scores(&self, observations: &[IntFeatureObservation]) -> Vec<f64> {
        let weights = self.weights();
        let mut scores = vec![0.0; self.n_classes()];
        for obs in observations {
            let column = weights.column(obs.index);
            for (score, &w) in scores.iter_mut().zip(column.iter()) {
                *score += w * obs.magnitude;
            }
        }
        scores
    }

    /// Raw linear score per class, ordered by label index.
    pub fn raw_scores(&self, observations: &[FeatureObservation]) -> Vec<f64> {
        self.int_raw_scores(&self.indexer().index(observations))
    }

    /// Softmax probabilities per class, ordered by label index.
    ///
    /// See [`softmax_inplace`] for the zero-sum policy.
    pub fn scores(&self, observations: &[FeatureObservation]) -> Vec<f64> {
        let mut scores = self.raw_scores(observations);
        softmax_inplace(&mut scores);
        scores
    }

    /// Probability per label name.
    ///
    /// # Panics
    ///
    /// Panics with a [`ConsistencyFault`] if labels and scores differ in length.
    pub fn scores_map(&self, observations: &[FeatureObservation]) -> HashMap<String, f64> {
        let labels = self.labels();
        let scores = self.scores(observations);
        ConsistencyFault::check(labels.len(), scores.len());
        labels.iter().cloned().zip(scores).collect()
    }

    /// Label with the highest probability; ties go to the lowest label index.
    ///
    /// # Panics
    ///
    /// Panics with a [`ConsistencyFault`] if labels and scores differ in length.
    pub fn predict(&self, observations: &[FeatureObservation]) -> Prediction<'_> {
        let labels = self.labels();
        let scores = self.scores(observations);
        ConsistencyFault::check(labels.len(), scores.len());
        // A model always has at least one label.
        let index = argmax(&scores).unwrap_or(0);
        Prediction {
            label: &labels[index],
            index,
            score: scores[index],
        }
    }
}

impl Classifier for LinearClassifier {
    fn eval_raw(&self, features: &[FeatureObservation]) -> Vec<f64> {
        self.raw_scores(features)
    }

    fn labels(&self) -> &[String] {
        LinearClassifier::labels(self)
    }

    fn scores_map(&self, features: &[FeatureObservation]) -> HashMap<String, f64> {
        LinearClassifier::scores_map(self, features)
    }
}
