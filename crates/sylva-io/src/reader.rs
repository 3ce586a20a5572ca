//! CSV training-set reader with full input validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::IoError;

/// A loaded, validated training set in row-major layout.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    feature_names: Vec<String>,
    samples: Vec<Vec<f64>>,
    labels: Vec<usize>,
}

impl TrainingSet {
    /// Return the feature column names, in column order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return the samples: `samples[example][feature]`.
    #[must_use]
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// Return the class labels, one per sample.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Consume the set and return `(samples, labels)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<usize>) {
        (self.samples, self.labels)
    }

    /// Return the number of samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

/// Reads labeled training data from a CSV file.
///
/// Expected CSV format:
/// - Header row required: `label,<feature>,<feature>,...`
/// - One row per example; the first column is a non-negative integer class
///   label, the remaining columns are finite floats
/// - All rows must have the same number of columns as the header
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::NoFeatureColumns`] | Header has only the label column |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::InvalidLabel`] | Label cell is not a non-negative integer |
/// | [`IoError::NonFiniteValue`] | Feature cell is NaN, Inf, or unparseable |
pub struct TrainingSetReader {
    path: PathBuf,
}

impl TrainingSetReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`TrainingSet`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<TrainingSet, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) allows rows with varying column counts so that our
        // own InconsistentRowLength check fires instead of a low-level
        // CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        let expected_cols = header.len();
        if expected_cols < 2 {
            return Err(IoError::NoFeatureColumns {
                path: self.path.clone(),
            });
        }
        let feature_names: Vec<String> =
            header.iter().skip(1).map(|name| name.to_string()).collect();
        debug!(expected_cols, "read CSV header");

        let mut samples = Vec::new();
        let mut labels = Vec::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let raw_label = record.get(0).unwrap_or("");
            let label: usize = raw_label.trim().parse().map_err(|_| IoError::InvalidLabel {
                path: self.path.clone(),
                row_index,
                raw: raw_label.to_string(),
            })?;

            let mut values = Vec::with_capacity(expected_cols - 1);
            for col_index in 1..record.len() {
                let raw = record.get(col_index).unwrap_or("");
                let value: f64 = raw.trim().parse().map_err(|_| IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index: col_index - 1,
                    raw: raw.to_string(),
                })?;
                if !value.is_finite() {
                    return Err(IoError::NonFiniteValue {
                        path: self.path.clone(),
                        row_index,
                        col_index: col_index - 1,
                        raw: raw.to_string(),
                    });
                }
                values.push(value);
            }

            labels.push(label);
            samples.push(values);
        }

        if samples.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_samples = samples.len(),
            n_features = feature_names.len(),
            "training set loaded"
        );

        Ok(TrainingSet {
            feature_names,
            samples,
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::TrainingSetReader;
    use crate::IoError;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn valid_file_loads() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "train.csv",
            "label,x,y\n0,1.0,2.0\n1,3.5,4.5\n0,5.0,6.0\n",
        );

        let set = TrainingSetReader::new(&path).read().unwrap();
        assert_eq!(set.n_samples(), 3);
        assert_eq!(set.n_features(), 2);
        assert_eq!(set.feature_names(), &["x".to_string(), "y".to_string()]);
        assert_eq!(set.labels(), &[0, 1, 0]);
        assert!((set.samples()[1][0] - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_error() {
        let dir = TempDir::new().unwrap();
        let err = TrainingSetReader::new(&dir.path().join("missing.csv"))
            .read()
            .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn empty_dataset_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "empty.csv", "label,x,y\n");
        let err = TrainingSetReader::new(&path).read().unwrap_err();
        assert!(matches!(err, IoError::EmptyDataset { .. }));
    }

    #[test]
    fn no_feature_columns_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "bare.csv", "label\n0\n1\n");
        let err = TrainingSetReader::new(&path).read().unwrap_err();
        assert!(matches!(err, IoError::NoFeatureColumns { .. }));
    }

    #[test]
    fn inconsistent_row_length_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "ragged.csv", "label,x,y\n0,1.0,2.0\n1,3.0\n");
        let err = TrainingSetReader::new(&path).read().unwrap_err();
        assert!(matches!(
            err,
            IoError::InconsistentRowLength {
                row_index: 1,
                expected: 3,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn invalid_label_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "badlabel.csv", "label,x\nfirst,1.0\n");
        let err = TrainingSetReader::new(&path).read().unwrap_err();
        assert!(matches!(err, IoError::InvalidLabel { row_index: 0, .. }));
    }

    #[test]
    fn negative_label_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "neglabel.csv", "label,x\n-1,1.0\n");
        let err = TrainingSetReader::new(&path).read().unwrap_err();
        assert!(matches!(err, IoError::InvalidLabel { .. }));
    }

    #[test]
    fn non_finite_value_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "nan.csv", "label,x,y\n0,1.0,NaN\n");
        let err = TrainingSetReader::new(&path).read().unwrap_err();
        assert!(matches!(
            err,
            IoError::NonFiniteValue {
                row_index: 0,
                col_index: 1,
                ..
            }
        ));
    }

    #[test]
    fn unparseable_value_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "text.csv", "label,x\n0,abc\n");
        let err = TrainingSetReader::new(&path).read().unwrap_err();
        assert!(matches!(err, IoError::NonFiniteValue { .. }));
    }
}
