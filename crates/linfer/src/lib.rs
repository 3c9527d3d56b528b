//! linfer: inference for pretrained multinomial linear classifiers.
//!
//! A model is a label dictionary, a feature map (exact dictionary or hashed
//! space) and a class-major weight matrix. Sparse named feature observations
//! are indexed, condensed and scored into a softmax distribution over labels.
//!
//! # Key Types
//!
//! - [`LinearClassifier`] - Immutable model with scoring methods
//! - [`FeatureMap`] - Exact or hashed mapping from feature names to columns
//! - [`ClassifierIndexer`] - Names to condensed integer observations
//! - [`ModelFormat`] - Text (JSON) or tagged binary persistence
//!
//! # Loading Models
//!
//! Use [`persist::load`] with a [`ModelFormat`], or the format-specific
//! readers in [`persist`]. See the [`persist`] module for the binary layout.
//!
//! # Example
//!
//! ```
//! use linfer::{FeatureObservation, LinearClassifier};
//!
//! let json = r#"{
//!     "labels": {"pos": 0, "neg": 1},
//!     "features": {"type": "exact", "features": {"": 0, "a": 1, "b": 2}},
//!     "weights": {"type": "dense", "values": [[0.1, 0.2, 0.3], [-0.1, 0.0, 0.2]]}
//! }"#;
//! let model = LinearClassifier::read_json(json.as_bytes()).unwrap();
//!
//! let prediction = model.predict(&[FeatureObservation::new("a", 1.0)]);
//! assert_eq!(prediction.label, "pos");
//! ```

// Re-export approx traits for users who want to compare scores
pub use approx;

pub mod app;
pub mod data;
pub mod inference;
pub mod persist;
pub mod repr;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{DatasetError, Example, FeatureObservation, IntFeatureObservation};
pub use inference::{Classifier, ConsistencyFault, Prediction};
pub use persist::{ErrorKind, ModelFormat, ReadError, WriteError};
pub use repr::{
    ClassifierIndexer, ExactFeatureMap, FeatureMap, FeatureMapKind, HashedFeatureMap,
    LinearClassifier, ModelError,
};
