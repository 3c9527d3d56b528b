//! Schema types for the text model format.
//!
//! The schema mirrors the JSON document one-to-one and is kept separate from
//! the runtime types. Fields that select a variant are plain strings so that
//! an unknown value surfaces as a configuration error rather than a parse
//! error. Every map is a `BTreeMap` for deterministic output.
//!
//! ```json
//! {
//!   "labels": {"neg": 1, "pos": 0},
//!   "features": {"type": "exact", "features": {"": 0, "a": 1}},
//!   "weights": {"type": "dense", "values": [[0.1, 0.2], [0.0, -0.3]]}
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::error::{ReadError, WriteError};
use crate::repr::{
    ClassifierIndexer, ExactFeatureMap, FeatureMap, FeatureMapKind, HashedFeatureMap,
    LinearClassifier,
};

/// `weights.type` value for dense rows.
pub const DENSE: &str = "dense";

/// Whole model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Label name -> dense 0-based index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeaturesSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightsSchema>,
}

/// Feature map section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturesSchema {
    /// `"exact"` or `"hashed"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Exact only: feature name -> column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, usize>>,
    /// Hashed only: size of the hashed space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxfeats: Option<i64>,
}

/// Weights section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsSchema {
    /// Only `"dense"` is defined.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Class-major rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<f64>>>,
}

fn missing(field: &str) -> ReadError {
    ReadError::Schema(format!("missing field `{field}`"))
}

// =============================================================================
// Schema -> runtime
// =============================================================================

impl TryFrom<FeaturesSchema> for FeatureMap {
    type Error = ReadError;

    fn try_from(schema: FeaturesSchema) -> Result<Self, Self::Error> {
        let kind = schema.kind.ok_or_else(|| missing("features.type"))?;
        match kind.as_str() {
            k if k == FeatureMapKind::Exact.as_str() => {
                let dictionary = schema.features.ok_or_else(|| missing("features.features"))?;
                let dictionary: HashMap<String, usize> = dictionary.into_iter().collect();
                Ok(ExactFeatureMap::new(dictionary)?.into())
            }
            k if k == FeatureMapKind::Hashed.as_str() => {
                let size = schema.maxfeats.ok_or_else(|| missing("features.maxfeats"))?;
                let max = i64::from(HashedFeatureMap::MAX_SIZE);
                if !(1..=max).contains(&size) {
                    return Err(ReadError::config(
                        "features.maxfeats",
                        format!("hashed feature space size must be in 1..={max}, got {size}"),
                    ));
                }
                Ok(HashedFeatureMap::new(size)?.into())
            }
            other => Err(ReadError::config(
                "features.type",
                format!("unknown feature map type {other:?} (expected \"exact\" or \"hashed\")"),
            )),
        }
    }
}

impl WeightsSchema {
    /// Class-major rows of a dense weights section.
    pub fn into_dense_rows(self) -> Result<Vec<Vec<f64>>, ReadError> {
        let kind = self.kind.ok_or_else(|| missing("weights.type"))?;
        if kind != DENSE {
            return Err(ReadError::config(
                "weights.type",
                format!("unsupported weights type {kind:?} (only \"dense\" is supported)"),
            ));
        }
        self.values.ok_or_else(|| missing("weights.values"))
    }
}

impl TryFrom<ModelSchema> for LinearClassifier {
    type Error = ReadError;

    /// Validates `labels`, then `features`, then `weights`, stopping at the
    /// first problem.
    fn try_from(schema: ModelSchema) -> Result<Self, Self::Error> {
        let labels = schema.labels.ok_or_else(|| missing("labels"))?;
        let features = schema.features.ok_or_else(|| missing("features"))?;
        let feature_map = FeatureMap::try_from(features)?;
        let rows = schema
            .weights
            .ok_or_else(|| missing("weights"))?
            .into_dense_rows()?;

        let indexer = ClassifierIndexer::new(labels.into_iter().collect(), feature_map)?;
        Ok(LinearClassifier::from_rows(indexer, rows)?)
    }
}

// =============================================================================
// Runtime -> schema
// =============================================================================

impl TryFrom<&LinearClassifier> for ModelSchema {
    type Error = WriteError;

    fn try_from(model: &LinearClassifier) -> Result<Self, Self::Error> {
        for ((class, column), &value) in model.weights().indexed_iter() {
            if !value.is_finite() {
                return Err(WriteError::NonFinite {
                    class,
                    column,
                    value,
                });
            }
        }

        let labels = model
            .labels()
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();

        let features = match model.feature_map() {
            FeatureMap::Exact(map) => FeaturesSchema {
                kind: Some(FeatureMapKind::Exact.as_str().to_string()),
                features: Some(map.iter().map(|(n, i)| (n.to_string(), i)).collect()),
                maxfeats: None,
            },
            FeatureMap::Hashed(map) => FeaturesSchema {
                kind: Some(FeatureMapKind::Hashed.as_str().to_string()),
                features: None,
                maxfeats: Some(map.size() as i64),
            },
        };

        Ok(Self {
            labels: Some(labels),
            features: Some(features),
            weights: Some(WeightsSchema {
                kind: Some(DENSE.to_string()),
                values: Some(model.weight_rows()),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::ErrorKind;
    use crate::testing::{hashed_classifier, sample_classifier};

    fn schema_of(json: &str) -> ModelSchema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn exact_model_to_schema() {
        let schema = ModelSchema::try_from(&sample_classifier()).unwrap();
        let labels = schema.labels.as_ref().unwrap();
        assert_eq!(labels["pos"], 0);
        assert_eq!(labels["neg"], 1);
        let features = schema.features.as_ref().unwrap();
        assert_eq!(features.kind.as_deref(), Some("exact"));
        assert_eq!(features.features.as_ref().unwrap()[""], 0);
        assert_eq!(features.maxfeats, None);
        assert_eq!(LinearClassifier::try_from(schema).unwrap(), sample_classifier());
    }

    #[test]
    fn hashed_model_to_schema() {
        let schema = ModelSchema::try_from(&hashed_classifier(5)).unwrap();
        let features = schema.features.as_ref().unwrap();
        assert_eq!(features.kind.as_deref(), Some("hashed"));
        assert_eq!(features.maxfeats, Some(5));
        assert!(features.features.is_none());
    }

    #[test]
    fn labels_checked_before_weights() {
        let schema = schema_of(r#"{"weights": {"type": "sparse"}}"#);
        let err = LinearClassifier::try_from(schema).unwrap_err();
        assert!(matches!(err, ReadError::Schema(ref m) if m.contains("labels")), "{err}");
    }

    #[test]
    fn unknown_feature_type_is_config() {
        let schema = schema_of(
            r#"{"labels": {"x": 0}, "features": {"type": "bloom"}, "weights": {"type": "dense", "values": [[]]}}"#,
        );
        let err = LinearClassifier::try_from(schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn oversized_maxfeats_is_config() {
        let schema = schema_of(
            r#"{"labels": {"x": 0}, "features": {"type": "hashed", "maxfeats": 2147483648}, "weights": {"type": "dense", "values": [[]]}}"#,
        );
        let err = LinearClassifier::try_from(schema).unwrap_err();
        assert!(
            matches!(err, ReadError::Config { field: "features.maxfeats", .. }),
            "{err:?}"
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let fmap = HashedFeatureMap::new(2).unwrap();
        let indexer = ClassifierIndexer::from_labels(vec!["x".into()], fmap.into()).unwrap();
        let model = LinearClassifier::from_rows(indexer, vec![vec![0.0, f64::NAN]]).unwrap();
        let err = ModelSchema::try_from(&model).unwrap_err();
        assert!(matches!(err, WriteError::NonFinite { class: 0, column: 1, .. }));
    }
}
