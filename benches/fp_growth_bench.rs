use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;
use std::collections::HashMap;

use fp_growth_rs::fp::{
    build_conditional_tree, build_fp_tree, frequent_itemsets, mine, FPTree, MiningConfig,
};

/// Baskets over `alphabet` items where low item ids are drawn far more
/// often than high ones, so the tree has a few hot prefixes and a long tail.
fn skewed_baskets(
    seed: u64,
    num_baskets: usize,
    alphabet: u32,
    avg_len: usize,
) -> Vec<Vec<u32>> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..num_baskets)
        .map(|_| {
            let len = rng.gen_range(1..=avg_len * 2);
            let mut basket: Vec<u32> = (0..len)
                .map(|_| {
                    let draw: f64 = rng.gen_range(0.0..1.0);
                    (draw * draw * f64::from(alphabet)) as u32
                })
                .collect();
            basket.sort_unstable();
            basket.dedup();
            basket
        })
        .collect()
}

/// Orders each basket by descending global support, ties by item id, the
/// shape `build_fp_tree` expects.
fn support_ordered(baskets: &[Vec<u32>]) -> Vec<Vec<u32>> {
    let mut supports: HashMap<u32, usize> = HashMap::new();
    for &item in baskets.iter().flatten() {
        *supports.entry(item).or_default() += 1;
    }

    baskets
        .iter()
        .map(|basket| {
            let mut ordered = basket.clone();
            ordered.sort_unstable_by_key(|item| (Reverse(supports[item]), *item));
            ordered
        })
        .collect()
}

/// A tree where `condition` closes every transaction, so its chain is as
/// long as the number of distinct prefixes and its prefix paths are deep.
fn long_chain_tree(seed: u64, num_paths: usize, depth: u32) -> FPTree<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let condition = depth;

    let transactions = (0..num_paths).map(|_| {
        let mut path: Vec<u32> = (0..depth)
            .filter(|&item| rng.gen_bool(8.0 / (8.0 + f64::from(item))))
            .collect();
        path.push(condition);
        path
    });

    build_fp_tree(transactions)
}

fn product_baskets(seed: u64, num_baskets: usize) -> Vec<Vec<String>> {
    skewed_baskets(seed, num_baskets, 400, 6)
        .into_iter()
        .map(|basket| basket.into_iter().map(|id| format!("sku-{id:05}")).collect())
        .collect()
}

fn bench_build_fp_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_fp_tree");

    for num_baskets in [1_000usize, 5_000, 20_000] {
        let ordered = support_ordered(&skewed_baskets(11, num_baskets, 200, 8));
        let nodes = build_fp_tree(ordered.iter().cloned()).len();

        group.throughput(Throughput::Elements(num_baskets as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("{nodes}_nodes"), num_baskets),
            &ordered,
            |b, ordered| b.iter(|| build_fp_tree(black_box(ordered).iter().cloned())),
        );
    }

    group.finish();
}

fn bench_conditional_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_conditional_tree");
    let depth = 48;
    let tree = long_chain_tree(23, 4_000, depth);
    let chain_len = tree.nodes_for(&depth).count();

    // Higher thresholds prune more of the imported paths.
    for min_count in [1usize, 50, 400, 2_000] {
        group.bench_with_input(
            BenchmarkId::new(format!("chain_{chain_len}"), min_count),
            &min_count,
            |b, &min_count| {
                b.iter(|| build_conditional_tree(tree.prefix_paths(black_box(&depth)), min_count))
            },
        );
    }

    group.finish();
}

fn bench_frequent_itemsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequent_itemsets");
    group.sample_size(20);

    let numeric = skewed_baskets(5, 5_000, 120, 8);
    let products = product_baskets(5, 5_000);

    for min_support in [250usize, 100, 50] {
        group.bench_with_input(BenchmarkId::new("u32", min_support), &min_support, |b, &min_support| {
            b.iter_batched(
                || numeric.clone(),
                |baskets| frequent_itemsets(baskets, min_support).unwrap().count(),
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("string", min_support), &min_support, |b, &min_support| {
            b.iter_batched(
                || products.clone(),
                |baskets| frequent_itemsets(baskets, min_support).unwrap().count(),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_max_len(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_len");
    group.sample_size(20);

    let baskets = skewed_baskets(41, 3_000, 60, 12);

    for max_len in [Some(2usize), Some(3), None] {
        let mut config = MiningConfig::new(30);
        config.max_len = max_len;
        let label = max_len.map_or_else(|| "unbounded".to_string(), |len| len.to_string());

        group.bench_with_input(BenchmarkId::from_parameter(label), &config, |b, config| {
            b.iter_batched(
                || baskets.clone(),
                |baskets| mine(baskets, config).unwrap().count(),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_fp_tree,
    bench_conditional_tree,
    bench_frequent_itemsets,
    bench_max_len
);
criterion_main!(benches);
