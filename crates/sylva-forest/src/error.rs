use std::path::PathBuf;

/// Errors from forest configuration, training, and persistence.
#[derive(Debug, thiserror::Error)]
pub enum ForestError {
    /// Returned when n_trees is zero.
    #[error("n_trees must be at least 1, got {n_trees}")]
    InvalidTreeCount {
        /// The invalid n_trees value provided.
        n_trees: usize,
    },

    /// Returned when max_threads is zero.
    #[error("max_threads must be at least 1, got {max_threads}")]
    InvalidThreadCount {
        /// The invalid max_threads value provided.
        max_threads: usize,
    },

    /// Returned when max_decision_levels is zero.
    #[error("max_decision_levels must be at least 1, got {max_decision_levels}")]
    InvalidDecisionLevels {
        /// The invalid max_decision_levels value provided.
        max_decision_levels: usize,
    },

    /// Returned when candidate_features is zero.
    #[error("candidate_features must be at least 1, got {candidate_features}")]
    InvalidCandidateFeatures {
        /// The invalid candidate_features value provided.
        candidate_features: usize,
    },

    /// Returned when candidate_thresholds is zero.
    #[error("candidate_thresholds must be at least 1, got {candidate_thresholds}")]
    InvalidCandidateThresholds {
        /// The invalid candidate_thresholds value provided.
        candidate_thresholds: usize,
    },

    /// Returned when a training context is built with zero classes.
    #[error("class count must be at least 1, got {n_classes}")]
    InvalidClassCount {
        /// The invalid class count provided.
        n_classes: usize,
    },

    /// Returned when a response generator is built with zero dimensions.
    #[error("feature dimension count must be at least 1, got {dimensions}")]
    InvalidDimensionCount {
        /// The invalid dimension count provided.
        dimensions: usize,
    },

    /// Returned when a normalized hyperplane generator is built without one
    /// [`FeatureStats`](crate::FeatureStats) per dimension.
    #[error("normalized hyperplane responses need {expected} feature statistics, got {got}")]
    MissingFeatureStats {
        /// One per feature dimension.
        expected: usize,
        /// The number of statistics actually supplied.
        got: usize,
    },

    /// Returned when the training dataset has zero examples.
    #[error("training dataset has zero examples")]
    EmptyDataset,

    /// Returned when the training dataset has zero feature dimensions.
    #[error("training dataset has zero feature dimensions")]
    ZeroFeatures,

    /// Returned when a feature column holds a different number of examples
    /// than the first column.
    #[error("feature column {dimension} has {got} examples, expected {expected}")]
    ColumnLengthMismatch {
        /// The expected number of examples (from the first column).
        expected: usize,
        /// The actual number of examples in this column.
        got: usize,
        /// The zero-based index of the offending feature column.
        dimension: usize,
    },

    /// Returned when a row-major sample has a different number of features
    /// than the first sample.
    #[error("example {example} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in this example.
        got: usize,
        /// The zero-based index of the offending example.
        example: usize,
    },

    /// Returned when the label vector length does not match the example count.
    #[error("got {got} labels for {expected} examples")]
    LabelCountMismatch {
        /// The number of examples in the dataset.
        expected: usize,
        /// The number of labels supplied.
        got: usize,
    },

    /// Returned when a training value is NaN or infinite.
    #[error("non-finite value at feature {dimension}, example {example}")]
    NonFiniteValue {
        /// The zero-based index of the offending feature column.
        dimension: usize,
        /// The zero-based index of the offending example.
        example: usize,
    },

    /// Returned when training a single tree fails; wraps the underlying
    /// error with the index of the tree whose training failed.
    #[error("training tree {tree_index} failed")]
    TreeTraining {
        /// The zero-based index of the tree whose training failed.
        tree_index: usize,
        /// The underlying error.
        source: Box<ForestError>,
    },

    /// Returned by caller-supplied tree trainers to signal a training
    /// failure that has no more specific variant.
    #[error("tree training failed: {reason}")]
    TrainingFailure {
        /// Human-readable description of the failure.
        reason: String,
    },

    /// Returned when model serialization fails.
    #[error("failed to serialize forest")]
    SerializeModel {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when model deserialization fails.
    #[error("failed to deserialize forest from {path}")]
    DeserializeModel {
        /// Path to the model file that could not be deserialized.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when writing the model file fails.
    #[error("failed to write forest to {path}")]
    WriteModel {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading the model file fails.
    #[error("failed to read forest from {path}")]
    ReadModel {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading a model with an incompatible format version.
    #[error("incompatible forest version in {path}: expected {expected}, found {found}")]
    IncompatibleModelVersion {
        /// The model format version this build expects.
        expected: u32,
        /// The model format version found in the file.
        found: u32,
        /// Path to the model file with the incompatible version.
        path: PathBuf,
    },
}
