//! Graph algorithms.
//!
//! This module provides sequential graph algorithms:
//! - [`mod@bfs`] / [`mod@dfs`]: Traversal orders, hop levels, path reconstruction
//! - [`shortest_path`]: Dijkstra, Bellman-Ford, Floyd-Warshall
//! - [`mst`]: Kruskal and Prim minimum spanning trees
//! - [`union_find`]: Disjoint set data structure
//! - [`cycle`], [`bipartite`], [`topo`], [`scc`]: Structural analysis

pub mod bfs;
pub mod bipartite;
pub mod cycle;
pub mod dfs;
pub mod mst;
pub mod scc;
pub mod shortest_path;
pub mod topo;
pub mod union_find;

pub use bfs::{
    bfs, bfs_distances, bfs_distances_with_config, bfs_with_parents, reconstruct_path, BfsConfig,
};
pub use bipartite::{bipartition, is_bipartite, Side};
pub use cycle::{has_cycle_directed, has_cycle_undirected};
pub use dfs::{dfs, dfs_recursive, dfs_stack};
pub use mst::{kruskal, minimum_spanning_forest, prim, SpanningForest, SpanningTree};
pub use scc::{
    component_ids, condensation, count_components, scc_kosaraju, scc_tarjan,
    scc_tarjan_with_config, ComponentOrder, SccConfig,
};
pub use shortest_path::{bellman_ford, dijkstra, floyd_warshall, DistanceMatrix, ShortestPaths};
pub use topo::topological_sort;
pub use union_find::{connected_components, UnionFind};
