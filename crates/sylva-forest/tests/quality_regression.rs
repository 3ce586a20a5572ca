//! Quality regression tests: on a cleanly separable dataset the trained
//! trees must sort almost all examples into single-class leaves.
//!
//! Prediction is out of scope for this crate, so training quality is
//! measured structurally: the weighted fraction of leaf mass belonging to
//! each leaf's majority class.

use sylva_forest::{DataPointCollection, Forest, ForestConfig, Node, WeakLearner};

/// 300 examples, 3 classes, 6 features; features 0-2 are informative
/// (class * 5.0 plus deterministic jitter), features 3-5 are noise.
fn make_classification() -> DataPointCollection {
    let n_examples = 300;
    let n_classes = 3;
    let n_features = 6;

    let labels: Vec<usize> = (0..n_examples).map(|i| i % n_classes).collect();
    let columns: Vec<Vec<f64>> = (0..n_features)
        .map(|d| {
            (0..n_examples)
                .map(|i| {
                    let base = if d < 3 { (i % n_classes) as f64 * 5.0 } else { 0.0 };
                    base + ((i * 13 + d * 7) % 100) as f64 * 0.01
                })
                .collect()
        })
        .collect();
    DataPointCollection::from_columns(columns, labels).unwrap()
}

/// Weighted majority-class mass across all leaves of all trees.
fn leaf_purity(forest: &Forest) -> f64 {
    let mut majority = 0u64;
    let mut total = 0u64;
    for tree in forest.trees() {
        for node in tree.nodes() {
            if let Node::Leaf { histogram } = node {
                let top = (0..histogram.n_classes())
                    .map(|c| histogram.count(c))
                    .max()
                    .unwrap_or(0);
                majority += top;
                total += histogram.total();
            }
        }
    }
    majority as f64 / total as f64
}

#[test]
fn axis_aligned_purity_above_threshold() {
    let data = make_classification();
    let result = ForestConfig::new(20)
        .unwrap()
        .with_weak_learner(WeakLearner::AxisAligned)
        .with_max_decision_levels(8)
        .with_candidate_features(16)
        .with_seed(42)
        .fit(&data)
        .unwrap();

    let purity = leaf_purity(result.forest());
    assert!(purity > 0.9, "leaf purity {purity} <= 0.9");
}

#[test]
fn normalized_hyperplane_purity_above_threshold() {
    let data = make_classification();
    let result = ForestConfig::new(20)
        .unwrap()
        .with_weak_learner(WeakLearner::RandomHyperplane)
        .with_feature_scaling(true)
        .with_max_decision_levels(8)
        .with_candidate_features(16)
        .with_seed(42)
        .fit(&data)
        .unwrap();

    let purity = leaf_purity(result.forest());
    assert!(purity > 0.85, "leaf purity {purity} <= 0.85");
}

#[test]
fn parallel_purity_matches_sequential_quality() {
    let data = make_classification();
    let config = ForestConfig::new(20)
        .unwrap()
        .with_max_decision_levels(8)
        .with_candidate_features(16)
        .with_seed(42);

    let sequential = config.clone().with_max_threads(1).fit(&data).unwrap();
    let parallel = config.with_max_threads(4).fit(&data).unwrap();

    let a = leaf_purity(sequential.forest());
    let b = leaf_purity(parallel.forest());
    assert!(a > 0.9, "sequential purity {a}");
    assert!(b > 0.9, "parallel purity {b}");
}
