//! Shared fixtures for unit and integration tests.

use std::collections::HashMap;

use crate::data::FeatureObservation;
use crate::repr::{ClassifierIndexer, ExactFeatureMap, HashedFeatureMap, LinearClassifier};

/// Default absolute tolerance for f64 score comparisons.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-12;

/// Two labels over an exact map with the bias in column 0.
///
/// ```text
/// labels   {"pos": 0, "neg": 1}
/// features {"": 0, "a": 1, "b": 2}
/// weights  [[0.1, 0.2, 0.3], [-0.1, 0.0, 0.2]]
/// ```
pub fn sample_classifier() -> LinearClassifier {
    let fmap = ExactFeatureMap::from_names(vec!["".into(), "a".into(), "b".into()])
        .expect("valid feature names");
    let indexer = ClassifierIndexer::from_labels(vec!["pos".into(), "neg".into()], fmap.into())
        .expect("valid labels");
    LinearClassifier::from_rows(indexer, vec![vec![0.1, 0.2, 0.3], vec![-0.1, 0.0, 0.2]])
        .expect("valid weights")
}

/// Three labels over a hashed space of `size` columns with deterministic weights.
pub fn hashed_classifier(size: i64) -> LinearClassifier {
    let fmap = HashedFeatureMap::new(size).expect("valid hash size");
    let labels: HashMap<String, usize> = [("red", 0), ("green", 1), ("blue", 2)]
        .into_iter()
        .map(|(l, i)| (l.to_string(), i))
        .collect();
    let indexer = ClassifierIndexer::new(labels, fmap.into()).expect("valid labels");
    let cols = size as usize;
    let rows = (0..3)
        .map(|c| {
            (0..cols)
                .map(|j| ((c * 31 + j * 7) % 13) as f64 / 13.0 - 0.5)
                .collect()
        })
        .collect();
    LinearClassifier::from_rows(indexer, rows).expect("valid weights")
}

/// Parse `name[:value]` tokens into observations.
pub fn observations(tokens: &str) -> Vec<FeatureObservation> {
    tokens
        .split_whitespace()
        .map(|t| match t.split_once(':') {
            Some((name, value)) => {
                FeatureObservation::new(name, value.parse().expect("numeric value"))
            }
            None => FeatureObservation::new(t, 1.0),
        })
        .collect()
}
