//! Configuration builder for forest training.

use crate::dataset::DataPointCollection;
use crate::error::ForestError;
use crate::forest::ForestResult;
use crate::response::WeakLearner;
use crate::trainer::{DepthFirstTrainer, TrainingParameters, TreeTrainer};

/// Configuration for training a decision forest.
///
/// Construct via [`ForestConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter              | Default       |
/// |------------------------|---------------|
/// | `weak_learner`         | `AxisAligned` |
/// | `feature_scaling`      | `false`       |
/// | `max_decision_levels`  | 5             |
/// | `candidate_features`   | 10            |
/// | `candidate_thresholds` | 10            |
/// | `max_threads`          | 1             |
/// | `seed`                 | 42            |
#[derive(Debug, Clone)]
pub struct ForestConfig {
    n_trees: usize,
    weak_learner: WeakLearner,
    feature_scaling: bool,
    max_decision_levels: usize,
    candidate_features: usize,
    candidate_thresholds: usize,
    max_threads: usize,
    seed: u64,
}

impl ForestConfig {
    /// Create a new config with the given number of trees.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::InvalidTreeCount`] if `n_trees` is zero.
    pub fn new(n_trees: usize) -> Result<Self, ForestError> {
        if n_trees == 0 {
            return Err(ForestError::InvalidTreeCount { n_trees });
        }
        Ok(Self {
            n_trees,
            weak_learner: WeakLearner::AxisAligned,
            feature_scaling: false,
            max_decision_levels: 5,
            candidate_features: 10,
            candidate_thresholds: 10,
            max_threads: 1,
            seed: 42,
        })
    }

    // --- Setters ---

    /// Set the weak-learner family.
    #[must_use]
    pub fn with_weak_learner(mut self, weak_learner: WeakLearner) -> Self {
        self.weak_learner = weak_learner;
        self
    }

    /// Enable or disable per-feature normalization of hyperplane responses.
    #[must_use]
    pub fn with_feature_scaling(mut self, feature_scaling: bool) -> Self {
        self.feature_scaling = feature_scaling;
        self
    }

    /// Set the maximum number of decision levels per tree.
    #[must_use]
    pub fn with_max_decision_levels(mut self, max_decision_levels: usize) -> Self {
        self.max_decision_levels = max_decision_levels;
        self
    }

    /// Set the number of candidate feature responses evaluated per node.
    #[must_use]
    pub fn with_candidate_features(mut self, candidate_features: usize) -> Self {
        self.candidate_features = candidate_features;
        self
    }

    /// Set the number of candidate thresholds evaluated per response.
    #[must_use]
    pub fn with_candidate_thresholds(mut self, candidate_thresholds: usize) -> Self {
        self.candidate_thresholds = candidate_thresholds;
        self
    }

    /// Set the requested worker thread count; 1 trains sequentially.
    #[must_use]
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    // --- Getters ---

    /// Return the number of trees.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Return the weak-learner family.
    #[must_use]
    pub fn weak_learner(&self) -> WeakLearner {
        self.weak_learner
    }

    /// Return whether feature scaling is enabled.
    #[must_use]
    pub fn feature_scaling(&self) -> bool {
        self.feature_scaling
    }

    /// Return the maximum number of decision levels per tree.
    #[must_use]
    pub fn max_decision_levels(&self) -> usize {
        self.max_decision_levels
    }

    /// Return the number of candidate feature responses per node.
    #[must_use]
    pub fn candidate_features(&self) -> usize {
        self.candidate_features
    }

    /// Return the number of candidate thresholds per response.
    #[must_use]
    pub fn candidate_thresholds(&self) -> usize {
        self.candidate_thresholds
    }

    /// Return the requested worker thread count.
    #[must_use]
    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Return the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Return the per-tree hyperparameters as the value object handed to
    /// every tree-training call.
    #[must_use]
    pub fn parameters(&self) -> TrainingParameters {
        TrainingParameters {
            max_decision_levels: self.max_decision_levels,
            candidate_features: self.candidate_features,
            candidate_thresholds: self.candidate_thresholds,
        }
    }

    /// Train a forest on the provided dataset.
    ///
    /// # Errors
    ///
    /// | Variant                                      | When                                   |
    /// |----------------------------------------------|----------------------------------------|
    /// | [`ForestError::InvalidThreadCount`]          | `max_threads` is zero                  |
    /// | [`ForestError::InvalidDecisionLevels`]       | `max_decision_levels` is zero          |
    /// | [`ForestError::InvalidCandidateFeatures`]    | `candidate_features` is zero           |
    /// | [`ForestError::InvalidCandidateThresholds`]  | `candidate_thresholds` is zero         |
    /// | [`ForestError::TreeTraining`]                | training any single tree failed        |
    pub fn fit(&self, data: &DataPointCollection) -> Result<ForestResult, ForestError> {
        self.fit_with(data, &DepthFirstTrainer)
    }

    /// Train a forest with a caller-supplied tree trainer.
    ///
    /// The orchestration is identical to [`Self::fit`]; only the per-tree
    /// training call is replaced.
    ///
    /// # Errors
    ///
    /// As [`Self::fit`].
    pub fn fit_with<T: TreeTrainer + Sync>(
        &self,
        data: &DataPointCollection,
        trainer: &T,
    ) -> Result<ForestResult, ForestError> {
        crate::forest::train(self, data, trainer)
    }
}

#[cfg(test)]
mod tests {
    use super::ForestConfig;
    use crate::error::ForestError;
    use crate::response::WeakLearner;

    #[test]
    fn zero_trees_rejected() {
        let err = ForestConfig::new(0).unwrap_err();
        assert!(matches!(err, ForestError::InvalidTreeCount { n_trees: 0 }));
    }

    #[test]
    fn builder_round_trip() {
        let config = ForestConfig::new(25)
            .unwrap()
            .with_weak_learner(WeakLearner::RandomHyperplane)
            .with_feature_scaling(true)
            .with_max_decision_levels(7)
            .with_candidate_features(3)
            .with_candidate_thresholds(4)
            .with_max_threads(8)
            .with_seed(99);

        assert_eq!(config.n_trees(), 25);
        assert_eq!(config.weak_learner(), WeakLearner::RandomHyperplane);
        assert!(config.feature_scaling());
        assert_eq!(config.max_decision_levels(), 7);
        assert_eq!(config.candidate_features(), 3);
        assert_eq!(config.candidate_thresholds(), 4);
        assert_eq!(config.max_threads(), 8);
        assert_eq!(config.seed(), 99);

        let parameters = config.parameters();
        assert_eq!(parameters.max_decision_levels, 7);
        assert_eq!(parameters.candidate_features, 3);
        assert_eq!(parameters.candidate_thresholds, 4);
    }
}
