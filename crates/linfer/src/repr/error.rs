//! Model invariant violations detected at construction time.

/// A model part violates a structural invariant.
///
/// Returned by constructors; a model that was built successfully never
/// violates these afterwards.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("model has no labels")]
    NoLabels,

    #[error("{what} index {index} is out of range for {len} entries")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{what} index {index} is assigned to both {first:?} and {second:?}")]
    DuplicateIndex {
        what: &'static str,
        index: usize,
        first: String,
        second: String,
    },

    #[error("{what} name {name:?} appears more than once")]
    DuplicateName { what: &'static str, name: String },

    #[error("hashed feature space size must be in 1..={max}, got {size}")]
    InvalidHashSize { size: i64, max: i64 },

    #[error("weight matrix has {rows} rows but the model has {labels} labels")]
    ClassCountMismatch { labels: usize, rows: usize },

    #[error("weight row {row} has {actual} values, expected {expected}")]
    RaggedWeights {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("weight matrix has {columns} columns, {kind} feature space needs {required}")]
    ColumnMismatch {
        kind: super::FeatureMapKind,
        columns: usize,
        required: usize,
    },
}
