use covis::{
    aggregate, AggregationConfig, AxisGrouping, Cluster, CollapseSet, FrequencyTable,
    HierarchyFolder, HierarchyTree,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Balanced binary hierarchy over `n_leaves` leaves, deeper merges ranked later
fn binary_hierarchy(prefix: &str, n_leaves: usize) -> Vec<Cluster> {
    let cluster = |name: String, parent: String, leaf: bool, rank: usize| Cluster {
        name,
        parent_name: parent,
        is_leaf: leaf,
        rank,
        frequency: 0.0,
        interest: 0.0,
        hierarchical_level: 0.0,
        hierarchical_rank: rank as f64,
    };
    // Heap layout: node i has children 2i+1 and 2i+2; leaves are the last n nodes
    let total = 2 * n_leaves - 1;
    (0..total)
        .map(|i| {
            let parent = if i == 0 { String::new() } else { format!("{prefix}{}", (i - 1) / 2) };
            cluster(format!("{prefix}{i}"), parent, i >= n_leaves - 1, i + 1)
        })
        .collect()
}

fn random_table(rows: usize, cols: usize, density: f64, seed: u64) -> FrequencyTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut table = FrequencyTable::new(vec![rows, cols]);
    for r in 0..rows {
        for c in 0..cols {
            if rng.gen_bool(density) {
                table.push(vec![r, c], f64::from(rng.gen_range(1u32..100)), 0.0).unwrap();
            }
        }
    }
    table
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &leaves in &[256usize, 1024, 4096] {
        let trees = vec![
            HierarchyTree::build("rows", &binary_hierarchy("r", leaves)).unwrap(),
            HierarchyTree::build("cols", &binary_hierarchy("c", leaves / 4)).unwrap(),
        ];
        let table = random_table(leaves, leaves / 4, 0.05, 42);
        let sets = HierarchyFolder::new(&trees).fold_to_level(leaves / 8);
        let groupings: Vec<AxisGrouping> = trees
            .iter()
            .zip(&sets)
            .map(|(tree, set)| AxisGrouping::from_tree(tree, set).unwrap())
            .collect();
        let config = AggregationConfig::default();

        group.bench_with_input(BenchmarkId::new("folded", leaves), &table, |b, table| {
            b.iter(|| aggregate(black_box(table), &groupings, &config))
        });
    }
    group.finish();
}

fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold_to_level");
    for &leaves in &[1024usize, 8192] {
        let trees = vec![HierarchyTree::build("rows", &binary_hierarchy("r", leaves)).unwrap()];
        let folder = HierarchyFolder::new(&trees);
        group.bench_with_input(BenchmarkId::new("half", leaves), &leaves, |b, &leaves| {
            b.iter(|| folder.fold_to_level(black_box(leaves / 2)))
        });
        let unfolded = vec![CollapseSet::new()];
        group.bench_with_input(BenchmarkId::new("groupings", leaves), &unfolded, |b, sets| {
            b.iter(|| AxisGrouping::from_tree(&trees[0], black_box(&sets[0])))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_fold);
criterion_main!(benches);
