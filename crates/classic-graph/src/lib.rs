//! Classic graph algorithms over a compact CSR graph store.
//!
//! This crate provides textbook graph algorithms with explicit error
//! reporting and no hidden recursion limits. It includes:
//!
//! - **Graph**: Compressed Sparse Row storage for directed or undirected graphs
//! - **Union-Find**: Disjoint sets with path compression and union by rank
//! - **Traversal**: BFS and DFS visit orders, hop levels, path reconstruction
//! - **Shortest paths**: Dijkstra, Bellman-Ford, Floyd-Warshall
//! - **Spanning trees**: Kruskal, Prim, minimum spanning forests
//! - **Structure**: cycle detection, bipartiteness, topological sort, SCC
//!
//! # Example
//!
//! ```
//! use classic_graph::{dijkstra, Distance, Graph, NodeId};
//!
//! // 0 -(1)-> 1 -(2)-> 2, and a direct 0 -(5)-> 2
//! let graph = Graph::from_weighted_edges(3, &[(0, 1, 1), (1, 2, 2), (0, 2, 5)]).unwrap();
//!
//! let paths = dijkstra(&graph, NodeId(0)).unwrap();
//! assert_eq!(paths.distance(NodeId(2)), Distance::Finite(3));
//! assert_eq!(
//!     paths.path_to(NodeId(2)),
//!     Some(vec![NodeId(0), NodeId(1), NodeId(2)])
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod models;

// Re-export main types
pub use algorithms::bfs::{
    bfs, bfs_distances, bfs_distances_with_config, bfs_with_parents, reconstruct_path, BfsConfig,
};
pub use algorithms::bipartite::{bipartition, is_bipartite, Side};
pub use algorithms::cycle::{has_cycle_directed, has_cycle_undirected};
pub use algorithms::dfs::{dfs, dfs_recursive, dfs_stack};
pub use algorithms::mst::{kruskal, minimum_spanning_forest, prim, SpanningForest, SpanningTree};
pub use algorithms::scc::{
    component_ids, condensation, count_components, scc_kosaraju, scc_tarjan,
    scc_tarjan_with_config, ComponentOrder, SccConfig,
};
pub use algorithms::shortest_path::{
    bellman_ford, dijkstra, floyd_warshall, DistanceMatrix, ShortestPaths,
};
pub use algorithms::topo::topological_sort;
pub use algorithms::union_find::{connected_components, UnionFind};
pub use models::csr::{Edge, Graph, GraphBuilder, GraphKind, OutEdge};
pub use models::node::{ComponentId, Distance, NodeId, Weight};

/// Graph algorithm error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Invalid node ID.
    #[error("Invalid node ID: {0}")]
    InvalidNodeId(u32),

    /// Negative weight given to an algorithm that requires non-negative weights.
    #[error("Negative weight {weight} on edge {src} -> {dst}")]
    NegativeWeight {
        /// Edge source.
        src: NodeId,
        /// Edge destination.
        dst: NodeId,
        /// Offending weight.
        weight: Weight,
    },

    /// A negative-weight cycle makes shortest distances undefined.
    #[error("Negative cycle detected through node {node}")]
    NegativeCycle {
        /// A vertex whose distance still improved after convergence.
        node: NodeId,
    },

    /// No spanning tree exists.
    #[error("Graph is disconnected: spanning tree reached {reached} of {total} nodes")]
    Disconnected {
        /// Vertices covered by the partial tree.
        reached: usize,
        /// Vertices in the graph.
        total: usize,
    },

    /// The graph has a cycle where an acyclic graph was required.
    #[error("Graph contains a cycle")]
    CycleDetected,

    /// Algorithm requires the other graph kind.
    #[error("Expected {expected:?} graph, got {actual:?}")]
    KindMismatch {
        /// Required kind.
        expected: GraphKind,
        /// Kind of the graph passed in.
        actual: GraphKind,
    },

    /// Accumulated path weight does not fit in [`Weight`].
    #[error("Path weight overflow")]
    WeightOverflow,

    /// Component lists do not cover every vertex exactly once.
    #[error("Node {node} is not covered by exactly one component")]
    InvalidPartition {
        /// First vertex found missing or repeated.
        node: NodeId,
    },

    /// Undirected adjacency lists where `dst` lists `src` fewer times than
    /// `src` lists `dst`.
    #[error("Adjacency is not symmetric: {src} lists {dst} without a matching entry")]
    AsymmetricAdjacency {
        /// Vertex whose listing has no mirror.
        src: NodeId,
        /// Vertex missing the mirrored listing.
        dst: NodeId,
    },

    /// Vertex count or index does not fit the `u32` id space.
    #[error("{0} exceeds the u32 vertex id range")]
    TooManyNodes(usize),

    /// Empty graph.
    #[error("Empty graph")]
    EmptyGraph,

    /// Invalid CSR format.
    #[error("Invalid CSR format: {0}")]
    InvalidCsr(String),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::algorithms::*;
    pub use crate::models::*;
    pub use crate::{GraphError, Result};
}
