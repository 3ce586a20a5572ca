//! Forest training orchestration: sequential or parallel tree training
//! with exclusive aggregation into one forest.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, instrument, warn};

use crate::config::ForestConfig;
use crate::context::TrainingContext;
use crate::dataset::DataPointCollection;
use crate::error::ForestError;
use crate::response::{ResponseGenerator, ResponseKind, WeakLearner};
use crate::trainer::TreeTrainer;
use crate::tree::Tree;

/// A trained ensemble of decision trees.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Forest {
    pub(crate) trees: Vec<Tree>,
    pub(crate) dimensions: usize,
    pub(crate) n_classes: usize,
}

impl Forest {
    pub(crate) fn new(dimensions: usize, n_classes: usize) -> Self {
        Self {
            trees: Vec::new(),
            dimensions,
            n_classes,
        }
    }

    /// Take ownership of a finished tree and append it to the ensemble.
    pub(crate) fn add_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Return the number of trees.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Return the number of feature dimensions the forest was trained on.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the trained trees, in append order.
    ///
    /// The order is the training order after a sequential run and
    /// unspecified after a parallel run.
    #[must_use]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }
}

/// Non-fatal conditions surfaced by a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// More than one thread was requested but the runtime could not
    /// provide parallel execution; the run fell back to sequential.
    ParallelismUnavailable {
        /// The thread count that was requested.
        requested: usize,
    },
    /// Hyperplane responses were requested without feature scaling;
    /// features are assumed to be externally normalized.
    FeaturesNotScaled,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ParallelismUnavailable { requested } => write!(
                f,
                "requested {requested} threads but parallel execution is unavailable; trained sequentially"
            ),
            Advisory::FeaturesNotScaled => write!(
                f,
                "feature scaling is disabled; hyperplane responses assume externally normalized features"
            ),
        }
    }
}

/// Metadata about a completed training run.
#[derive(Debug, Clone)]
pub struct TrainingMetadata {
    /// Number of trees trained.
    pub n_trees: usize,
    /// Number of feature dimensions.
    pub dimensions: usize,
    /// Number of distinct classes.
    pub n_classes: usize,
    /// Number of training examples.
    pub n_samples: usize,
    /// Worker threads actually used (1 after a sequential run).
    pub threads_used: usize,
}

/// Result of a forest training run.
#[derive(Debug)]
pub struct ForestResult {
    forest: Forest,
    advisories: Vec<Advisory>,
    metadata: TrainingMetadata,
}

impl ForestResult {
    /// Borrow the trained forest.
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Consume the result and return the trained forest.
    #[must_use]
    pub fn into_forest(self) -> Forest {
        self.forest
    }

    /// Return the advisories raised during the run.
    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Return training metadata.
    #[must_use]
    pub fn metadata(&self) -> &TrainingMetadata {
        &self.metadata
    }
}

/// How the tree trainings of one run are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutionMode {
    Sequential,
    Parallel { threads: usize },
}

impl ExecutionMode {
    /// Resolve the requested thread count against the runtime capability.
    ///
    /// `available` is the queried parallelism of the runtime, `None` when
    /// it cannot be determined. Requesting more than one thread without a
    /// known capability falls back to sequential execution with a
    /// [`Advisory::ParallelismUnavailable`].
    pub(crate) fn resolve(requested: usize, available: Option<usize>) -> (Self, Option<Advisory>) {
        if requested <= 1 {
            return (ExecutionMode::Sequential, None);
        }
        match available {
            Some(available) if available >= 1 => (
                ExecutionMode::Parallel {
                    threads: requested.min(available),
                },
                None,
            ),
            _ => (
                ExecutionMode::Sequential,
                Some(Advisory::ParallelismUnavailable { requested }),
            ),
        }
    }
}

/// Train a forest.
#[instrument(skip_all, fields(n_trees = config.n_trees(), n_samples = data.count()))]
pub(crate) fn train<T: TreeTrainer + Sync>(
    config: &ForestConfig,
    data: &DataPointCollection,
    trainer: &T,
) -> Result<ForestResult, ForestError> {
    // --- Validate config ---
    if config.max_threads() == 0 {
        return Err(ForestError::InvalidThreadCount { max_threads: 0 });
    }
    if config.max_decision_levels() == 0 {
        return Err(ForestError::InvalidDecisionLevels {
            max_decision_levels: 0,
        });
    }
    if config.candidate_features() == 0 {
        return Err(ForestError::InvalidCandidateFeatures {
            candidate_features: 0,
        });
    }
    if config.candidate_thresholds() == 0 {
        return Err(ForestError::InvalidCandidateThresholds {
            candidate_thresholds: 0,
        });
    }

    let dimensions = data.dimensions();
    let n_classes = data.count_classes();
    let mut advisories = Vec::new();

    if !config.feature_scaling() && config.weak_learner() == WeakLearner::RandomHyperplane {
        warn!("{}", Advisory::FeaturesNotScaled);
        advisories.push(Advisory::FeaturesNotScaled);
    }

    // Per-feature statistics, only when scaling is enabled.
    let stats = if config.feature_scaling() {
        let stats = data.feature_stats();
        for (dimension, s) in stats.iter().enumerate() {
            debug!(dimension, mean = s.mean, stdev = s.stdev, "feature statistics");
        }
        stats
    } else {
        Vec::new()
    };

    let kind = ResponseKind::resolve(config.weak_learner(), config.feature_scaling());
    let generator = ResponseGenerator::new(kind, dimensions, stats)?;
    let context = TrainingContext::new(n_classes, &generator)?;
    let parameters = config.parameters();

    let available = std::thread::available_parallelism()
        .ok()
        .map(NonZeroUsize::get);
    let (mode, advisory) = ExecutionMode::resolve(config.max_threads(), available);
    if let Some(advisory) = advisory {
        warn!("{advisory}");
        advisories.push(advisory);
    }

    // The worker pool is built up front so a pool failure can still fall
    // back to sequential training before any entropy is consumed.
    let pool = match mode {
        ExecutionMode::Sequential => None,
        ExecutionMode::Parallel { threads } => {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    let advisory = Advisory::ParallelismUnavailable {
                        requested: config.max_threads(),
                    };
                    warn!(error = %e, "{advisory}");
                    advisories.push(advisory);
                    None
                }
            }
        }
    };

    info!(
        n_trees = config.n_trees(),
        dimensions,
        n_classes,
        n_samples = data.count(),
        learner = %kind,
        threads = pool.as_ref().map_or(1, |p| p.current_num_threads()),
        "training forest"
    );

    let mut master_rng = ChaCha8Rng::seed_from_u64(config.seed());
    let mut forest = Forest::new(dimensions, n_classes);
    let threads_used;

    if let Some(pool) = pool {
        // Per-tree seeds drawn from the master source up front: workers
        // never contend on one generator and every tree is reproducible.
        let seeds: Vec<(usize, u64)> = (0..config.n_trees())
            .map(|tree_index| (tree_index, master_rng.r#gen()))
            .collect();

        let shared = Mutex::new(&mut forest);
        pool.install(|| {
            seeds.into_par_iter().try_for_each(|(tree_index, seed)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let tree = trainer
                    .train_tree(&mut rng, &context, &parameters, data)
                    .map_err(|e| ForestError::TreeTraining {
                        tree_index,
                        source: Box::new(e),
                    })?;
                debug!(tree_index, n_nodes = tree.n_nodes(), "tree trained");

                // The lock guards only the append; training stays concurrent.
                let mut guard = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                guard.add_tree(tree);
                Ok(())
            })
        })?;
        threads_used = config.max_threads().min(pool.current_num_threads());
    } else {
        // Strict order, one shared random source: fully deterministic for
        // a fixed seed.
        for tree_index in 0..config.n_trees() {
            let tree = trainer
                .train_tree(&mut master_rng, &context, &parameters, data)
                .map_err(|e| ForestError::TreeTraining {
                    tree_index,
                    source: Box::new(e),
                })?;
            debug!(tree_index, n_nodes = tree.n_nodes(), "tree trained");
            forest.add_tree(tree);
        }
        threads_used = 1;
    }

    debug_assert_eq!(forest.n_trees(), config.n_trees());
    info!(n_trees = forest.n_trees(), "forest training complete");

    let metadata = TrainingMetadata {
        n_trees: forest.n_trees(),
        dimensions,
        n_classes,
        n_samples: data.count(),
        threads_used,
    };

    Ok(ForestResult {
        forest,
        advisories,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::{Advisory, ExecutionMode};

    #[test]
    fn one_thread_is_sequential() {
        let (mode, advisory) = ExecutionMode::resolve(1, Some(8));
        assert_eq!(mode, ExecutionMode::Sequential);
        assert!(advisory.is_none());
    }

    #[test]
    fn unknown_capability_falls_back_with_advisory() {
        let (mode, advisory) = ExecutionMode::resolve(4, None);
        assert_eq!(mode, ExecutionMode::Sequential);
        assert_eq!(
            advisory,
            Some(Advisory::ParallelismUnavailable { requested: 4 })
        );
    }

    #[test]
    fn thread_count_clamped_to_capability() {
        let (mode, advisory) = ExecutionMode::resolve(16, Some(4));
        assert_eq!(mode, ExecutionMode::Parallel { threads: 4 });
        assert!(advisory.is_none());
    }

    #[test]
    fn requested_below_capability_honored() {
        let (mode, _) = ExecutionMode::resolve(2, Some(8));
        assert_eq!(mode, ExecutionMode::Parallel { threads: 2 });
    }

    #[test]
    fn advisory_display() {
        let text = Advisory::ParallelismUnavailable { requested: 4 }.to_string();
        assert!(text.contains("4 threads"));
        assert!(Advisory::FeaturesNotScaled.to_string().contains("scaling"));
    }
}
