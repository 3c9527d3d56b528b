//! Linear classifier data structure.

use ndarray::{Array2, ArrayView1, ArrayView2};

use super::{ClassifierIndexer, FeatureMap, FeatureMapKind, ModelError};

/// Multinomial linear classifier (indexer + weights).
///
/// Stores a class-major weight matrix with shape `[n_classes, n_columns]`:
///
/// ```text
/// weights[[class, column]] → coefficient
/// ```
///
/// Row `c` belongs to the label with index `c`. Columns are addressed by the
/// feature map; the bias is an ordinary column looked up under the name `""`.
///
/// The model is immutable after construction and can be shared freely
/// between threads for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    indexer: ClassifierIndexer,
    weights: Array2<f64>,
}

impl LinearClassifier {
    /// Create a classifier from an indexer and a weight matrix.
    ///
    /// The matrix must have one row per label. A hashed map needs exactly
    /// `size` columns; an exact map needs a column for every dictionary index.
    pub fn new(indexer: ClassifierIndexer, weights: Array2<f64>) -> Result<Self, ModelError> {
        if weights.nrows() != indexer.num_labels() {
            return Err(ModelError::ClassCountMismatch {
                labels: indexer.num_labels(),
                rows: weights.nrows(),
            });
        }

        let fmap = indexer.feature_map();
        let columns = weights.ncols();
        let required = fmap.space_size();
        let consistent = match fmap.kind() {
            FeatureMapKind::Exact => columns >= required,
            FeatureMapKind::Hashed => columns == required,
        };
        if !consistent {
            return Err(ModelError::ColumnMismatch {
                kind: fmap.kind(),
                columns,
                required,
            });
        }

        Ok(Self { indexer, weights })
    }

    /// Create a classifier from per-class weight rows.
    ///
    /// Rows must all have the same length.
    pub fn from_rows(indexer: ClassifierIndexer, rows: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut weights = Array2::zeros((rows.len(), n_cols));
        for (row, (mut dst, values)) in weights.rows_mut().into_iter().zip(&rows).enumerate() {
            if values.len() != n_cols {
                return Err(ModelError::RaggedWeights {
                    row,
                    expected: n_cols,
                    actual: values.len(),
                });
            }
            dst.assign(&ArrayView1::from(values.as_slice()));
        }
        Self::new(indexer, weights)
    }

    /// Labels ordered by index.
    #[inline]
    pub fn labels(&self) -> &[String] {
        self.indexer.labels()
    }

    #[inline]
    pub fn indexer(&self) -> &ClassifierIndexer {
        &self.indexer
    }

    #[inline]
    pub fn feature_map(&self) -> &FeatureMap {
        self.indexer.feature_map()
    }

    /// Number of classes (weight rows).
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of weight columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.weights.ncols()
    }

    /// Get weight for a class and column.
    #[inline]
    pub fn weight(&self, class: usize, column: usize) -> f64 {
        self.weights[[class, column]]
    }

    /// Weights of one class.
    #[inline]
    pub fn class_weights(&self, class: usize) -> ArrayView1<'_, f64> {
        self.weights.row(class)
    }

    /// The full `[n_classes, n_columns]` matrix.
    #[inline]
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    /// Weight rows as owned vectors, class-major.
    pub fn weight_rows(&self) -> Vec<Vec<f64>> {
        self.weights.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}
