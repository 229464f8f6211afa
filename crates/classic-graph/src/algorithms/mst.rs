//! Minimum spanning trees.
//!
//! Both solvers work on undirected graphs and refuse to return a partial
//! result: a disconnected graph yields [`GraphError::Disconnected`]. Use
//! [`minimum_spanning_forest`] when a forest is the answer you want.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::union_find::UnionFind;
use crate::models::{Edge, Graph, GraphKind, NodeId, Weight};
use crate::{GraphError, Result};

/// A minimum spanning tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    /// Accepted edges, in the order the solver accepted them.
    pub edges: Vec<Edge>,
    /// Sum of accepted edge weights.
    pub total_weight: Weight,
}

/// A minimum spanning forest: one tree per connected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest {
    /// Accepted edges, in the order Kruskal accepted them.
    pub edges: Vec<Edge>,
    /// Sum of accepted edge weights.
    pub total_weight: Weight,
    /// Number of trees (connected components).
    pub num_trees: usize,
}

impl SpanningForest {
    /// True when the forest is a single spanning tree.
    pub fn is_spanning_tree(&self) -> bool {
        self.num_trees <= 1
    }
}

fn add_weight(total: Weight, weight: Weight) -> Result<Weight> {
    total.checked_add(weight).ok_or(GraphError::WeightOverflow)
}

fn kruskal_forest(graph: &Graph) -> Result<(SpanningForest, UnionFind)> {
    graph.require_kind(GraphKind::Undirected)?;

    let n = graph.num_nodes();
    let mut sorted: Vec<&Edge> = graph.edges().iter().collect();
    // Stable: equal weights keep insertion order, first one wins
    sorted.sort_by_key(|e| e.weight);

    let mut uf = UnionFind::new(n);
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    let mut total_weight: Weight = 0;

    for edge in sorted {
        if edges.len() + 1 >= n {
            break;
        }
        if uf.unite(edge.src, edge.dst)? {
            total_weight = add_weight(total_weight, edge.weight)?;
            edges.push(*edge);
        }
    }

    let forest = SpanningForest {
        edges,
        total_weight,
        num_trees: uf.num_components(),
    };
    Ok((forest, uf))
}

/// Kruskal's algorithm.
///
/// Sorts edges by weight (ties resolved by insertion order) and accepts each
/// edge whose endpoints are still in different sets, stopping at `n - 1`
/// edges.
pub fn kruskal(graph: &Graph) -> Result<SpanningTree> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    tracing::debug!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "kruskal"
    );

    let (forest, mut uf) = kruskal_forest(graph)?;
    if !forest.is_spanning_tree() {
        let reached = uf.component_size(NodeId(0))?;
        tracing::warn!(
            trees = forest.num_trees,
            reached,
            "no spanning tree: graph is disconnected"
        );
        return Err(GraphError::Disconnected {
            reached,
            total: graph.num_nodes(),
        });
    }

    Ok(SpanningTree {
        edges: forest.edges,
        total_weight: forest.total_weight,
    })
}

/// Minimum spanning forest via Kruskal.
///
/// Never fails on disconnected input; the result reports how many trees it
/// contains.
pub fn minimum_spanning_forest(graph: &Graph) -> Result<SpanningForest> {
    let (forest, _) = kruskal_forest(graph)?;
    tracing::debug!(
        nodes = graph.num_nodes(),
        trees = forest.num_trees,
        weight = forest.total_weight,
        "spanning forest"
    );
    Ok(forest)
}

type Frontier = BinaryHeap<Reverse<(Weight, usize, u32)>>;

fn absorb(graph: &Graph, node: NodeId, in_tree: &mut [bool], frontier: &mut Frontier) {
    in_tree[node.index()] = true;
    for arc in graph.out_edges(node) {
        if !in_tree[arc.target.index()] {
            frontier.push(Reverse((arc.weight, arc.edge, arc.target.0)));
        }
    }
}

/// Prim's algorithm from `start`.
///
/// Candidate edges wait in a min-priority frontier keyed by weight, then by
/// edge insertion index. Entries whose target joined the tree after they
/// were queued are discarded when popped.
pub fn prim(graph: &Graph, start: NodeId) -> Result<SpanningTree> {
    graph.require_kind(GraphKind::Undirected)?;
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    graph.check_node(start)?;

    tracing::debug!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        start = %start,
        "prim"
    );

    let n = graph.num_nodes();
    let mut in_tree = vec![false; n];
    let mut frontier = Frontier::new();
    let mut edges = Vec::with_capacity(n - 1);
    let mut total_weight: Weight = 0;

    absorb(graph, start, &mut in_tree, &mut frontier);

    while let Some(Reverse((weight, edge, target))) = frontier.pop() {
        let target = NodeId(target);
        if in_tree[target.index()] {
            continue;
        }

        total_weight = add_weight(total_weight, weight)?;
        edges.push(graph.edges()[edge]);
        absorb(graph, target, &mut in_tree, &mut frontier);
    }

    let reached = edges.len() + 1;
    if reached < n {
        tracing::warn!(reached, total = n, "no spanning tree: graph is disconnected");
        return Err(GraphError::Disconnected { reached, total: n });
    }

    Ok(SpanningTree {
        edges,
        total_weight,
    })
}
