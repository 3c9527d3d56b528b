//! Model representation: feature maps, the indexer and the classifier.
//!
//! Everything here is built once at load time and never mutated afterwards.
//! Scoring lives in [`crate::inference`], persistence in [`crate::persist`].

mod dictionary;
mod error;
mod feature_map;
mod hash;
mod indexer;
mod model;

pub use error::ModelError;
pub use feature_map::{ExactFeatureMap, FeatureMap, FeatureMapKind, HashedFeatureMap};
pub use hash::murmur3_32;
pub use indexer::{condense, ClassifierIndexer};
pub use model::LinearClassifier;
