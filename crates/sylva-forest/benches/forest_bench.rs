//! Criterion benchmarks for sylva-forest: sequential and parallel forest
//! training.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sylva_forest::{DataPointCollection, ForestConfig, WeakLearner};

fn make_classification(
    n_examples: usize,
    n_features: usize,
    n_classes: usize,
    seed: u64,
) -> DataPointCollection {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let labels: Vec<usize> = (0..n_examples).map(|i| i % n_classes).collect();
    let columns: Vec<Vec<f64>> = (0..n_features)
        .map(|d| {
            (0..n_examples)
                .map(|i| {
                    let base = if d < 3 { (i % n_classes) as f64 * 3.0 } else { 0.0 };
                    base + rng.r#gen::<f64>() * 0.5
                })
                .collect()
        })
        .collect();
    DataPointCollection::from_columns(columns, labels).unwrap()
}

fn bench_sequential_train(c: &mut Criterion) {
    let data = make_classification(500, 20, 5, 42);
    let cfg = ForestConfig::new(20).unwrap().with_seed(42);

    c.bench_function("forest_train_500x20_5class_20trees_seq", |b| {
        b.iter(|| cfg.fit(&data).unwrap());
    });
}

fn bench_parallel_train(c: &mut Criterion) {
    let data = make_classification(500, 20, 5, 42);
    let cfg = ForestConfig::new(20).unwrap().with_seed(42).with_max_threads(4);

    c.bench_function("forest_train_500x20_5class_20trees_par4", |b| {
        b.iter(|| cfg.fit(&data).unwrap());
    });
}

fn bench_hyperplane_train(c: &mut Criterion) {
    let data = make_classification(500, 20, 5, 42);
    let cfg = ForestConfig::new(10)
        .unwrap()
        .with_weak_learner(WeakLearner::RandomHyperplane)
        .with_feature_scaling(true)
        .with_seed(42);

    c.bench_function("forest_train_500x20_5class_10trees_hyperplane", |b| {
        b.iter(|| cfg.fit(&data).unwrap());
    });
}

criterion_group!(
    benches,
    bench_sequential_train,
    bench_parallel_train,
    bench_hyperplane_train
);
criterion_main!(benches);
