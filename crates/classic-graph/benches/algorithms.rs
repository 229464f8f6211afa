//! Graph Algorithm Benchmarks
//!
//! Measures the sequential algorithms on generated sparse graphs:
//! - Traversal (BFS, iterative DFS)
//! - Shortest paths (Dijkstra, Bellman-Ford)
//! - Spanning trees (Kruskal, Prim)
//! - Strongly connected components (Tarjan, Kosaraju)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

use classic_graph::prelude::*;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// A ring through every node plus `extra` random edges, seeded so every run
/// sees the same graph.
fn random_edges(n: usize, extra: usize, seed: u64) -> Vec<(u32, u32, Weight)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = n as u32;

    let mut edges: Vec<_> = (0..n)
        .map(|i| (i, (i + 1) % n, rng.gen_range(1..=100)))
        .collect();
    for _ in 0..extra {
        let src = rng.gen_range(0..n);
        let dst = rng.gen_range(0..n);
        edges.push((src, dst, rng.gen_range(1..=100)));
    }
    edges
}

fn directed(n: usize) -> Graph {
    let edges = random_edges(n, 3 * n, 42);
    Graph::from_weighted_edges(n, &edges).unwrap()
}

fn undirected(n: usize) -> Graph {
    let edges = random_edges(n, 3 * n, 7);
    Graph::undirected_from_weighted_edges(n, &edges).unwrap()
}

/// Benchmark traversals
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/traversal");

    for &n in &SIZES {
        let graph = directed(n);
        group.throughput(Throughput::Elements(graph.num_arcs() as u64));

        group.bench_with_input(BenchmarkId::new("bfs", n), &graph, |b, g| {
            b.iter(|| black_box(bfs(g, NodeId(0)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("dfs", n), &graph, |b, g| {
            b.iter(|| black_box(dfs(g, NodeId(0)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark single-source shortest paths
fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/shortest_path");

    for &n in &SIZES {
        let graph = directed(n);
        group.throughput(Throughput::Elements(graph.num_arcs() as u64));

        group.bench_with_input(BenchmarkId::new("dijkstra", n), &graph, |b, g| {
            b.iter(|| black_box(dijkstra(g, NodeId(0)).unwrap()));
        });
    }

    // Bellman-Ford is O(VE); keep it to the small graph
    let graph = directed(SIZES[0]);
    group.bench_with_input(
        BenchmarkId::new("bellman_ford", SIZES[0]),
        &graph,
        |b, g| {
            b.iter(|| black_box(bellman_ford(g, NodeId(0)).unwrap()));
        },
    );

    group.finish();
}

/// Benchmark minimum spanning trees
fn bench_spanning_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/mst");

    for &n in &SIZES {
        let graph = undirected(n);
        group.throughput(Throughput::Elements(graph.num_edges() as u64));

        group.bench_with_input(BenchmarkId::new("kruskal", n), &graph, |b, g| {
            b.iter(|| black_box(kruskal(g).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("prim", n), &graph, |b, g| {
            b.iter(|| black_box(prim(g, NodeId(0)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark SCC decomposition
fn bench_scc(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/scc");

    for &n in &SIZES {
        let graph = directed(n);
        group.throughput(Throughput::Elements(graph.num_arcs() as u64));

        group.bench_with_input(BenchmarkId::new("tarjan", n), &graph, |b, g| {
            b.iter(|| black_box(scc_tarjan(g).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("kosaraju", n), &graph, |b, g| {
            b.iter(|| black_box(scc_kosaraju(g).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_traversal,
    bench_shortest_paths,
    bench_spanning_tree,
    bench_scc,
);
criterion_main!(benches);
