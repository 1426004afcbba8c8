use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use itertools::Itertools;
use periodic_nets::pgraph::{barycentric_placement, AnalyzedGraph, Edge, PeriodicGraph};
use periodic_nets::symmetries::find_symmetries;
use std::hint::black_box;

fn dia() -> PeriodicGraph {
    PeriodicGraph::new(vec![
        (1, 2, vec![0, 0, 0]),
        (1, 2, vec![-1, 0, 0]),
        (1, 2, vec![0, -1, 0]),
        (1, 2, vec![0, 0, -1]),
    ])
    .unwrap()
}

fn pcu() -> PeriodicGraph {
    PeriodicGraph::new(vec![
        (1, 1, vec![1, 0, 0]),
        (1, 1, vec![0, 1, 0]),
        (1, 1, vec![0, 0, 1]),
    ])
    .unwrap()
}

/// The same net on an n x n x n cell.
fn supercell(graph: &PeriodicGraph, n: i64) -> PeriodicGraph {
    let stride = graph.vertices().iter().max().copied().unwrap() + 1;
    let cells: Vec<Vec<i64>> = (0..3).map(|_| 0..n).multi_cartesian_product().collect();
    let index = |c: &[i64]| -> u32 { c.iter().fold(0, |acc, &x| acc * n + x) as u32 };

    let mut edges = Vec::new();
    for c in &cells {
        for e in graph.edges() {
            let target: Vec<i64> = c.iter().zip(&e.shift).map(|(x, s)| x + s).collect();
            let cell: Vec<i64> = target.iter().map(|x| x.rem_euclid(n)).collect();
            let shift: Vec<i64> = target.iter().map(|x| x.div_euclid(n)).collect();
            edges.push(Edge::new(
                index(c) * stride + e.head,
                index(&cell) * stride + e.tail,
                shift,
            ));
        }
    }
    PeriodicGraph::from_edges(edges).unwrap()
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("barycentric_placement");

    for n in [1, 2, 3] {
        let g = supercell(&dia(), n);
        group.bench_with_input(BenchmarkId::new("dia", g.vertices().len()), &g, |b, g| {
            b.iter(|| barycentric_placement(black_box(g)));
        });
    }

    group.finish();
}

fn bench_symmetry_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("symmetry_search");

    for (name, g) in [("pcu", pcu()), ("dia", dia()), ("dia_2x2x2", supercell(&dia(), 2))] {
        let p = barycentric_placement(&g).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| find_symmetries(black_box(&g), black_box(&p)));
        });
    }

    group.finish();
}

fn bench_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("systre_key");
    group.sample_size(20);

    for (name, g) in [("dia", dia()), ("pcu_2x2x2", supercell(&pcu(), 2))] {
        group.bench_function(name, |b| {
            b.iter(|| AnalyzedGraph::new(black_box(g.clone())).systre_key());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_placement, bench_symmetry_search, bench_key);
criterion_main!(benches);
