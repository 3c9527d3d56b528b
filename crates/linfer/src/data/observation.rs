//! Observation and example types.

/// A named feature and its magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureObservation {
    pub feature: String,
    pub magnitude: f64,
}

impl FeatureObservation {
    pub fn new(feature: impl Into<String>, magnitude: f64) -> Self {
        Self {
            feature: feature.into(),
            magnitude,
        }
    }

    /// The implicit bias observation `("", 1.0)`.
    pub fn bias() -> Self {
        Self::new("", 1.0)
    }
}

impl<S: Into<String>> From<(S, f64)> for FeatureObservation {
    fn from((feature, magnitude): (S, f64)) -> Self {
        Self::new(feature, magnitude)
    }
}

/// A feature column index and its magnitude.
///
/// The index is valid for the feature map that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntFeatureObservation {
    pub index: usize,
    pub magnitude: f64,
}

impl IntFeatureObservation {
    pub const fn new(index: usize, magnitude: f64) -> Self {
        Self { index, magnitude }
    }
}

/// A labelled instance read from a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub features: Vec<FeatureObservation>,
    pub label: String,
    /// Optional instance weight from the label section.
    pub importance: Option<f64>,
}

impl Example {
    pub fn new(label: impl Into<String>, features: Vec<FeatureObservation>) -> Self {
        Self {
            features,
            label: label.into(),
            importance: None,
        }
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }
}
