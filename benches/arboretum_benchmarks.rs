use arboretum::splitter::{entropy, partition, EntropySplitter, Splitter};
use arboretum::tree::Tree;
use arboretum::{Classifier, DecisionTreeClassifier, NaiveBayesClassifier, OneRClassifier, TreeConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const N_ROWS: usize = 20_000;
const N_FEATURES: usize = 12;
const CARDINALITY: u8 = 6;

/// Categorical table whose label depends on the first three features, with some noise.
fn synthetic_data() -> (Vec<Vec<u8>>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(0);
    let x: Vec<Vec<u8>> = (0..N_ROWS)
        .map(|_| (0..N_FEATURES).map(|_| rng.gen_range(0..CARDINALITY)).collect())
        .collect();
    let y = x
        .iter()
        .map(|row| {
            if rng.gen_bool(0.05) {
                rng.gen_range(0..3)
            } else {
                (row[0] + row[1] * row[2]) % 3
            }
        })
        .collect();
    (x, y)
}

pub fn tree_benchmarks(c: &mut Criterion) {
    let (x, y) = synthetic_data();
    let index: Vec<usize> = (0..N_ROWS).collect();

    c.bench_function("entropy", |b| b.iter(|| entropy(black_box(&y), black_box(&index))));
    c.bench_function("partition", |b| b.iter(|| partition(black_box(&x), black_box(&index), 0)));
    c.bench_function("best_split", |b| {
        let features: Vec<usize> = (0..N_FEATURES).collect();
        b.iter(|| EntropySplitter.best_split(black_box(&x), black_box(&y), &index, &features))
    });

    let mut fit_group = c.benchmark_group("fit");
    fit_group.warm_up_time(Duration::from_secs(5));
    fit_group.sample_size(20);
    fit_group.bench_function("fit_tree", |b| {
        b.iter(|| {
            let mut tree = Tree::new();
            tree.fit(&EntropySplitter, black_box(&x), black_box(&y), &TreeConfig::default(), &0);
            tree
        })
    });
    fit_group.bench_function("fit_tree_max_depth_4", |b| {
        let cfg = TreeConfig {
            max_depth: Some(4),
            ..TreeConfig::default()
        };
        b.iter(|| {
            let mut model = DecisionTreeClassifier::new(cfg, 0u8);
            model.fit(black_box(&x), black_box(&y)).unwrap();
        })
    });
    fit_group.bench_function("fit_naive_bayes", |b| {
        b.iter(|| {
            let mut model = NaiveBayesClassifier::new(0u8);
            model.fit(black_box(&x), black_box(&y)).unwrap();
        })
    });
    fit_group.bench_function("fit_one_r", |b| {
        b.iter(|| {
            let mut model = OneRClassifier::new(0u8);
            model.fit(black_box(&x), black_box(&y)).unwrap();
        })
    });
    fit_group.finish();

    let mut model = DecisionTreeClassifier::new(TreeConfig::default(), 0u8);
    model.fit(&x, &y).unwrap();
    c.bench_function("predict_tree", |b| b.iter(|| model.predict_batch(black_box(&x), false)));
    c.bench_function("predict_tree_parallel", |b| {
        b.iter(|| model.predict_batch(black_box(&x), true))
    });
}

criterion_group!(benches, tree_benchmarks);
criterion_main!(benches);
