//! Label dictionary plus feature map: names to condensed integer vectors.

use std::collections::{BTreeMap, HashMap};

use super::dictionary::{index_names, invert_dense};
use super::{FeatureMap, ModelError};
use crate::data::{FeatureObservation, IntFeatureObservation};

/// Sum magnitudes per index.
///
/// The result holds one entry per distinct index, in ascending index order,
/// so any permutation of the input yields the same pairs.
pub fn condense<I>(observations: I) -> Vec<IntFeatureObservation>
where
    I: IntoIterator<Item = IntFeatureObservation>,
{
    let mut sums: BTreeMap<usize, f64> = BTreeMap::new();
    for obs in observations {
        *sums.entry(obs.index).or_insert(0.0) += obs.magnitude;
    }
    sums.into_iter()
        .map(|(index, magnitude)| IntFeatureObservation::new(index, magnitude))
        .collect()
}

/// Maps labels and features of a model to dense indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierIndexer {
    label_index: HashMap<String, usize>,
    /// Labels ordered by index.
    labels: Vec<String>,
    feature_map: FeatureMap,
}

impl ClassifierIndexer {
    /// Build from a label -> index dictionary whose indices are exactly `0..n`.
    pub fn new(
        label_dictionary: HashMap<String, usize>,
        feature_map: FeatureMap,
    ) -> Result<Self, ModelError> {
        let labels = invert_dense(
            label_dictionary.iter().map(|(k, &v)| (k.clone(), v)),
            "label",
        )?;
        Self::check_labels(&labels)?;
        Ok(Self {
            label_index: label_dictionary,
            labels,
            feature_map,
        })
    }

    /// Build from labels in index order.
    pub fn from_labels(labels: Vec<String>, feature_map: FeatureMap) -> Result<Self, ModelError> {
        Self::check_labels(&labels)?;
        let label_index = index_names(&labels, "label")?;
        Ok(Self {
            label_index,
            labels,
            feature_map,
        })
    }

    fn check_labels(labels: &[String]) -> Result<(), ModelError> {
        if labels.is_empty() {
            return Err(ModelError::NoLabels);
        }
        Ok(())
    }

    /// Index and condense observations.
    ///
    /// The bias observation `("", 1.0)` is looked up first, exactly like a
    /// user feature. Names the feature map does not know are dropped.
    pub fn index(&self, observations: &[FeatureObservation]) -> Vec<IntFeatureObservation> {
        let bias = FeatureObservation::bias();
        let indexed = std::iter::once(&bias)
            .chain(observations)
            .filter_map(|obs| {
                self.feature_map
                    .index_of(&obs.feature)
                    .map(|index| IntFeatureObservation::new(index, obs.magnitude))
            });
        condense(indexed)
    }

    /// Labels ordered by index.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }

    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn feature_map(&self) -> &FeatureMap {
        &self.feature_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{ExactFeatureMap, HashedFeatureMap};

    fn obs(pairs: &[(&str, f64)]) -> Vec<FeatureObservation> {
        pairs.iter().map(|&(n, m)| FeatureObservation::new(n, m)).collect()
    }

    fn exact_indexer(features: &[&str]) -> ClassifierIndexer {
        let names = features.iter().map(|s| s.to_string()).collect();
        let fmap = ExactFeatureMap::from_names(names).unwrap();
        ClassifierIndexer::from_labels(vec!["x".into(), "y".into()], fmap.into()).unwrap()
    }

    #[test]
    fn condense_sums_duplicates() {
        let out = condense([
            IntFeatureObservation::new(3, 1.0),
            IntFeatureObservation::new(1, 2.0),
            IntFeatureObservation::new(3, 2.0),
        ]);
        assert_eq!(
            out,
            vec![
                IntFeatureObservation::new(1, 2.0),
                IntFeatureObservation::new(3, 3.0)
            ]
        );
    }

    #[test]
    fn index_adds_bias_when_known() {
        let indexer = exact_indexer(&["", "a", "b"]);
        let out = indexer.index(&obs(&[("b", 2.0)]));
        assert_eq!(
            out,
            vec![
                IntFeatureObservation::new(0, 1.0),
                IntFeatureObservation::new(2, 2.0)
            ]
        );
    }

    #[test]
    fn index_drops_unknown_and_missing_bias() {
        let indexer = exact_indexer(&["a", "b"]);
        let out = indexer.index(&obs(&[("a", 1.5), ("zzz", 9.0), ("a", 0.5)]));
        assert_eq!(out, vec![IntFeatureObservation::new(0, 2.0)]);
    }

    #[test]
    fn index_hashed_never_drops() {
        let fmap = HashedFeatureMap::new(1).unwrap();
        let indexer = ClassifierIndexer::from_labels(vec!["only".into()], fmap.into()).unwrap();
        // Everything collides into column 0, bias included.
        let out = indexer.index(&obs(&[("a", 1.0), ("b", 2.0)]));
        assert_eq!(out, vec![IntFeatureObservation::new(0, 4.0)]);
    }

    #[test]
    fn labels_in_index_order() {
        let fmap = HashedFeatureMap::new(4).unwrap();
        let dict = [("neg".to_string(), 1), ("pos".to_string(), 0)]
            .into_iter()
            .collect();
        let indexer = ClassifierIndexer::new(dict, fmap.into()).unwrap();
        assert_eq!(indexer.labels(), ["pos", "neg"]);
        assert_eq!(indexer.label_index("neg"), Some(1));
        assert_eq!(indexer.num_labels(), 2);
    }

    #[test]
    fn rejects_empty_labels() {
        let fmap = HashedFeatureMap::new(4).unwrap();
        let err = ClassifierIndexer::from_labels(vec![], fmap.into()).unwrap_err();
        assert_eq!(err, ModelError::NoLabels);
    }
}
