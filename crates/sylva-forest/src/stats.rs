//! Per-feature scalar summaries used for optional normalization.

/// Mean and standard deviation of one feature dimension.
///
/// Computed once before training when feature scaling is enabled, then
/// owned immutably by the response generator for the duration of the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStats {
    /// Mean of the feature over all examples.
    pub mean: f64,
    /// Population standard deviation of the feature over all examples.
    pub stdev: f64,
}

impl FeatureStats {
    /// Compute the mean and population standard deviation of `values`.
    ///
    /// Returns zeros for an empty slice; dataset validation guarantees
    /// callers never pass one.
    pub(crate) fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                stdev: 0.0,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        Self {
            mean,
            stdev: variance.sqrt(),
        }
    }
}
