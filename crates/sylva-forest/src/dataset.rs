//! Feature-major training data with full input validation.

use crate::error::ForestError;
use crate::stats::FeatureStats;

/// A validated training dataset: a `dimensions x count` feature matrix
/// plus one class label per example.
///
/// Storage is feature-major: `columns[dimension][example]`. This makes
/// per-dimension statistics and axis-aligned response evaluation a single
/// contiguous scan.
#[derive(Debug, Clone)]
pub struct DataPointCollection {
    columns: Vec<Vec<f64>>,
    labels: Vec<usize>,
    n_classes: usize,
}

impl DataPointCollection {
    /// Build a dataset from feature-major columns.
    ///
    /// `columns[dimension][example]` — one inner `Vec` per feature.
    /// `labels[example]` — zero-based class labels.
    ///
    /// # Errors
    ///
    /// | Variant                                | When                                   |
    /// |----------------------------------------|----------------------------------------|
    /// | [`ForestError::ZeroFeatures`]          | `columns` is empty                     |
    /// | [`ForestError::EmptyDataset`]          | columns have zero examples             |
    /// | [`ForestError::ColumnLengthMismatch`]  | columns have inconsistent lengths      |
    /// | [`ForestError::NonFiniteValue`]        | any value is NaN or infinite           |
    /// | [`ForestError::LabelCountMismatch`]    | label count differs from example count |
    pub fn from_columns(columns: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self, ForestError> {
        if columns.is_empty() {
            return Err(ForestError::ZeroFeatures);
        }
        let count = columns[0].len();
        if count == 0 {
            return Err(ForestError::EmptyDataset);
        }
        for (dimension, column) in columns.iter().enumerate() {
            if column.len() != count {
                return Err(ForestError::ColumnLengthMismatch {
                    expected: count,
                    got: column.len(),
                    dimension,
                });
            }
            for (example, &value) in column.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ForestError::NonFiniteValue { dimension, example });
                }
            }
        }
        if labels.len() != count {
            return Err(ForestError::LabelCountMismatch {
                expected: count,
                got: labels.len(),
            });
        }

        let n_classes = labels.iter().max().copied().unwrap_or(0) + 1;
        Ok(Self {
            columns,
            labels,
            n_classes,
        })
    }

    /// Build a dataset from row-major samples, the layout CSV loading
    /// naturally produces.
    ///
    /// `samples[example][dimension]` — one inner `Vec` per example.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::FeatureCountMismatch`] when rows have
    /// inconsistent lengths, plus everything [`Self::from_columns`] checks.
    pub fn from_rows(samples: &[Vec<f64>], labels: Vec<usize>) -> Result<Self, ForestError> {
        if samples.is_empty() {
            return Err(ForestError::EmptyDataset);
        }
        let dimensions = samples[0].len();
        if dimensions == 0 {
            return Err(ForestError::ZeroFeatures);
        }
        for (example, row) in samples.iter().enumerate() {
            if row.len() != dimensions {
                return Err(ForestError::FeatureCountMismatch {
                    expected: dimensions,
                    got: row.len(),
                    example,
                });
            }
        }

        let columns: Vec<Vec<f64>> = (0..dimensions)
            .map(|d| samples.iter().map(|row| row[d]).collect())
            .collect();
        Self::from_columns(columns, labels)
    }

    /// Return the number of feature dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.columns.len()
    }

    /// Return the number of examples.
    #[must_use]
    pub fn count(&self) -> usize {
        self.columns[0].len()
    }

    /// Return the number of distinct classes (max label + 1).
    #[must_use]
    pub fn count_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the value of one feature for one example.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` or `example` is out of range.
    #[must_use]
    pub fn value(&self, dimension: usize, example: usize) -> f64 {
        self.columns[dimension][example]
    }

    /// Return the class label of one example.
    ///
    /// # Panics
    ///
    /// Panics when `example` is out of range.
    #[must_use]
    pub fn label(&self, example: usize) -> usize {
        self.labels[example]
    }

    /// Return the class labels of all examples.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Compute the mean and standard deviation of one feature dimension.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is out of range.
    #[must_use]
    pub fn stats(&self, dimension: usize) -> FeatureStats {
        FeatureStats::of(&self.columns[dimension])
    }

    /// Compute [`FeatureStats`] for every dimension, in dimension order.
    #[must_use]
    pub fn feature_stats(&self) -> Vec<FeatureStats> {
        (0..self.dimensions()).map(|d| self.stats(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DataPointCollection;
    use crate::error::ForestError;

    #[test]
    fn zero_features_error() {
        let err = DataPointCollection::from_columns(vec![], vec![]).unwrap_err();
        assert!(matches!(err, ForestError::ZeroFeatures));
    }

    #[test]
    fn empty_dataset_error() {
        let err = DataPointCollection::from_columns(vec![vec![]], vec![]).unwrap_err();
        assert!(matches!(err, ForestError::EmptyDataset));
    }

    #[test]
    fn column_length_mismatch_error() {
        let columns = vec![vec![1.0, 2.0], vec![3.0]];
        let err = DataPointCollection::from_columns(columns, vec![0, 1]).unwrap_err();
        assert!(matches!(
            err,
            ForestError::ColumnLengthMismatch {
                expected: 2,
                got: 1,
                dimension: 1
            }
        ));
    }

    #[test]
    fn non_finite_value_error() {
        let columns = vec![vec![1.0, f64::NAN]];
        let err = DataPointCollection::from_columns(columns, vec![0, 1]).unwrap_err();
        assert!(matches!(
            err,
            ForestError::NonFiniteValue {
                dimension: 0,
                example: 1
            }
        ));
    }

    #[test]
    fn label_count_mismatch_error() {
        let columns = vec![vec![1.0, 2.0]];
        let err = DataPointCollection::from_columns(columns, vec![0]).unwrap_err();
        assert!(matches!(
            err,
            ForestError::LabelCountMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn accessors() {
        let columns = vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]];
        let data = DataPointCollection::from_columns(columns, vec![0, 1, 2]).unwrap();
        assert_eq!(data.dimensions(), 2);
        assert_eq!(data.count(), 3);
        assert_eq!(data.count_classes(), 3);
        assert!((data.value(1, 2) - 30.0).abs() < f64::EPSILON);
        assert_eq!(data.label(1), 1);
    }

    #[test]
    fn from_rows_transposes() {
        let samples = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
        let data = DataPointCollection::from_rows(&samples, vec![0, 0, 1]).unwrap();
        assert_eq!(data.dimensions(), 2);
        assert_eq!(data.count(), 3);
        assert!((data.value(0, 1) - 2.0).abs() < f64::EPSILON);
        assert!((data.value(1, 2) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_rows_inconsistent_length_error() {
        let samples = vec![vec![1.0, 10.0], vec![2.0]];
        let err = DataPointCollection::from_rows(&samples, vec![0, 1]).unwrap_err();
        assert!(matches!(err, ForestError::FeatureCountMismatch { .. }));
    }

    #[test]
    fn per_dimension_stats() {
        // Dimension 0 in [0, 1], dimension 1 in [0, 10000]: statistics must
        // reflect each dimension's own scale.
        let columns = vec![vec![0.0, 0.5, 1.0], vec![0.0, 5000.0, 10000.0]];
        let data = DataPointCollection::from_columns(columns, vec![0, 1, 1]).unwrap();

        let small = data.stats(0);
        let large = data.stats(1);
        assert!((small.mean - 0.5).abs() < 1e-12);
        assert!((large.mean - 5000.0).abs() < 1e-9);
        assert!(large.stdev > 1000.0 * small.stdev);
    }
}
