//! Per-tree training: entropy-driven split search over random feature
//! responses.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::context::TrainingContext;
use crate::dataset::DataPointCollection;
use crate::error::ForestError;
use crate::histogram::ClassHistogram;
use crate::response::FeatureResponse;
use crate::tree::{Node, NodeIndex, Tree};

/// Per-tree hyperparameters, read-only input to every tree-training call.
#[derive(Debug, Clone, Copy)]
pub struct TrainingParameters {
    /// Maximum number of decision levels; the root sits at level 0.
    pub max_decision_levels: usize,
    /// Number of random feature responses evaluated per node.
    pub candidate_features: usize,
    /// Number of candidate thresholds evaluated per feature response.
    pub candidate_thresholds: usize,
}

/// Trains one tree from a shared random source, a training context, the
/// per-tree hyperparameters, and the dataset.
///
/// The orchestrator consumes this as a single opaque, possibly-blocking
/// call; [`DepthFirstTrainer`] is the production implementation.
pub trait TreeTrainer {
    /// Train one tree.
    ///
    /// # Errors
    ///
    /// Implementations report any failure as a [`ForestError`]; the
    /// orchestrator aborts the whole run on the first error.
    fn train_tree(
        &self,
        rng: &mut ChaCha8Rng,
        context: &TrainingContext<'_>,
        parameters: &TrainingParameters,
        data: &DataPointCollection,
    ) -> Result<Tree, ForestError>;
}

/// Recursive depth-first tree growth over the full dataset.
///
/// Randomness comes entirely from weak-learner sampling: every tree sees
/// every example, and trees differ only through the responses and
/// thresholds drawn from the random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstTrainer;

impl TreeTrainer for DepthFirstTrainer {
    fn train_tree(
        &self,
        rng: &mut ChaCha8Rng,
        context: &TrainingContext<'_>,
        parameters: &TrainingParameters,
        data: &DataPointCollection,
    ) -> Result<Tree, ForestError> {
        let indices: Vec<usize> = (0..data.count()).collect();
        let mut arena: Vec<Node> = Vec::new();
        grow(data, context, parameters, rng, &indices, 0, &mut arena);
        Ok(Tree::from_nodes(arena))
    }
}

/// Recursively grow the arena-based tree.
///
/// Returns the [`NodeIndex`] of the node just created in `arena`.
fn grow(
    data: &DataPointCollection,
    context: &TrainingContext<'_>,
    parameters: &TrainingParameters,
    rng: &mut ChaCha8Rng,
    indices: &[usize],
    depth: usize,
    arena: &mut Vec<Node>,
) -> NodeIndex {
    let mut histogram = ClassHistogram::new(context.n_classes());
    for &i in indices {
        histogram.record(data.label(i));
    }

    let make_leaf = |arena: &mut Vec<Node>, histogram: ClassHistogram| -> NodeIndex {
        let idx = arena.len();
        arena.push(Node::Leaf { histogram });
        NodeIndex::new(idx)
    };

    // Stopping conditions.
    if depth >= parameters.max_decision_levels || indices.len() < 2 || histogram.is_pure() {
        return make_leaf(arena, histogram);
    }

    let parent_entropy = histogram.entropy();
    let n = indices.len() as f64;

    // Candidate search: random responses, quantile-sampled thresholds,
    // information gain over the class histograms.
    let mut best: Option<(FeatureResponse, f64, f64)> = None;
    for _ in 0..parameters.candidate_features {
        let response = context.generator().create_random(rng);
        let responses: Vec<f64> = indices.iter().map(|&i| response.evaluate(data, i)).collect();
        let thresholds =
            choose_candidate_thresholds(&responses, parameters.candidate_thresholds, rng);

        for &threshold in &thresholds {
            let mut left = ClassHistogram::new(context.n_classes());
            let mut right = ClassHistogram::new(context.n_classes());
            for (pos, &i) in indices.iter().enumerate() {
                if responses[pos] <= threshold {
                    left.record(data.label(i));
                } else {
                    right.record(data.label(i));
                }
            }
            if left.total() == 0 || right.total() == 0 {
                continue;
            }

            let gain = parent_entropy
                - (left.total() as f64 / n) * left.entropy()
                - (right.total() as f64 / n) * right.entropy();

            let improved = best.as_ref().is_none_or(|(_, _, g)| gain > *g);
            if improved {
                best = Some((response.clone(), threshold, gain));
            }
        }
    }

    let Some((response, threshold, gain)) = best else {
        return make_leaf(arena, histogram);
    };
    if gain <= 0.0 {
        return make_leaf(arena, histogram);
    }

    let mut left_indices = Vec::with_capacity(indices.len() / 2);
    let mut right_indices = Vec::with_capacity(indices.len() / 2);
    for &i in indices {
        if response.evaluate(data, i) <= threshold {
            left_indices.push(i);
        } else {
            right_indices.push(i);
        }
    }

    trace!(
        depth,
        n_samples = indices.len(),
        n_left = left_indices.len(),
        n_right = right_indices.len(),
        gain,
        "split chosen"
    );

    // Arena pattern: reserve the index with a placeholder, recurse, then
    // overwrite with the split.
    let node_idx = arena.len();
    arena.push(Node::Leaf {
        histogram: histogram.clone(),
    });

    let left = grow(data, context, parameters, rng, &left_indices, depth + 1, arena);
    let right = grow(data, context, parameters, rng, &right_indices, depth + 1, arena);

    arena[node_idx] = Node::Split {
        response,
        threshold,
        left,
        right,
        n_samples: indices.len(),
    };

    NodeIndex::new(node_idx)
}

/// Choose up to `max_thresholds` candidate thresholds from the response
/// values of one node.
///
/// When the node holds more values than `max_thresholds + 1`, that many
/// random response values serve as quantile estimates; otherwise all
/// values do. After sorting, each threshold is drawn uniformly between
/// adjacent quantiles. Returns an empty vector when all values are equal.
fn choose_candidate_thresholds(
    responses: &[f64],
    max_thresholds: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<f64> {
    let n = responses.len();
    if n < 2 {
        return Vec::new();
    }

    let mut quantiles: Vec<f64> = if n > max_thresholds + 1 {
        (0..max_thresholds + 1)
            .map(|_| responses[rng.gen_range(0..n)])
            .collect()
    } else {
        responses.to_vec()
    };
    quantiles.sort_unstable_by(|a, b| a.total_cmp(b));

    if quantiles[0] == quantiles[quantiles.len() - 1] {
        return Vec::new();
    }

    quantiles
        .windows(2)
        .map(|pair| pair[0] + rng.gen_range(0.0..=1.0) * (pair[1] - pair[0]))
        .collect()
}
