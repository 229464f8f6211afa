//! Shortest-path solvers.
//!
//! - [`dijkstra`]: single source, non-negative weights, O((V + E) log V)
//! - [`bellman_ford`]: single source, negative weights allowed, O(V * E)
//! - [`floyd_warshall`]: all pairs, O(V^3)
//!
//! Distances are [`Distance`] values, never numeric sentinels, and every
//! addition is checked. A candidate that overflows past `Weight::MAX` is
//! longer than any finite distance, so it is simply discarded; only a vertex
//! left reachable solely through such paths yields
//! [`GraphError::WeightOverflow`]. A negative cycle is reported as
//! [`GraphError::NegativeCycle`], which is distinct from a result in which
//! every vertex is simply unreachable.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::models::{Distance, Graph, NodeId, Weight};
use crate::{GraphError, Result};

/// Single-source shortest-path result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: NodeId,
    distances: Vec<Distance>,
    predecessors: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    fn new(source: NodeId, num_nodes: usize) -> Self {
        let mut distances = vec![Distance::Unreachable; num_nodes];
        distances[source.index()] = Distance::ZERO;
        Self {
            source,
            distances,
            predecessors: vec![None; num_nodes],
        }
    }

    /// Source vertex.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Distance to `node`; out-of-range nodes are unreachable.
    pub fn distance(&self, node: NodeId) -> Distance {
        self.distances
            .get(node.index())
            .copied()
            .unwrap_or(Distance::Unreachable)
    }

    /// All distances, indexed by node.
    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    /// Consume the result, keeping only the distances.
    pub fn into_distances(self) -> Vec<Distance> {
        self.distances
    }

    /// Vertex preceding `node` on its shortest path.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(node.index()).copied().flatten()
    }

    /// Vertices on a shortest path from the source to `target`, inclusive.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.distance(target).is_reachable() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
            if path.len() > self.distances.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }

    /// Relax `from -> to`, recording in `overflowed` a target whose only
    /// candidate so far ran past `Weight::MAX`.
    fn relax(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Weight,
        overflowed: &mut [bool],
    ) -> Result<bool> {
        match self.distances[from.index()].extend(weight) {
            Ok(candidate) if candidate < self.distances[to.index()] => {
                self.distances[to.index()] = candidate;
                self.predecessors[to.index()] = Some(from);
                Ok(true)
            }
            Ok(_) => Ok(false),
            Err(_) if weight > 0 => {
                if !self.distances[to.index()].is_reachable() {
                    overflowed[to.index()] = true;
                }
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

/// Fails if some vertex was reached only by paths longer than `Weight::MAX`.
fn check_overflow(distances: &[Distance], overflowed: &[bool]) -> Result<()> {
    let lost = distances
        .iter()
        .zip(overflowed)
        .position(|(d, &o)| o && !d.is_reachable());
    match lost {
        Some(node) => {
            tracing::warn!(node, "shortest distance exceeds the weight range");
            Err(GraphError::WeightOverflow)
        }
        None => Ok(()),
    }
}

fn check_source(graph: &Graph, source: NodeId) -> Result<()> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    graph.check_node(source)
}

/// Dijkstra's algorithm.
///
/// Fails with [`GraphError::NegativeWeight`] before doing any work if the
/// graph has a negative arc anywhere.
pub fn dijkstra(graph: &Graph, source: NodeId) -> Result<ShortestPaths> {
    check_source(graph, source)?;
    if let Some((src, dst, weight)) = graph.arcs().find(|&(_, _, w)| w < 0) {
        return Err(GraphError::NegativeWeight { src, dst, weight });
    }

    tracing::debug!(
        nodes = graph.num_nodes(),
        arcs = graph.num_arcs(),
        source = %source,
        "dijkstra"
    );

    let mut paths = ShortestPaths::new(source, graph.num_nodes());
    let mut overflowed = vec![false; graph.num_nodes()];
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0, source.0)));

    while let Some(Reverse((d, u))) = frontier.pop() {
        let u = NodeId(u);

        // Stale entry: a shorter path was found after this one was queued
        if Distance::Finite(d) > paths.distances[u.index()] {
            continue;
        }

        for (v, w) in graph.neighbors(u) {
            if paths.relax(u, v, w, &mut overflowed)? {
                if let Distance::Finite(dv) = paths.distances[v.index()] {
                    tracing::trace!(from = %u, to = %v, distance = dv, "relaxed");
                    frontier.push(Reverse((dv, v.0)));
                }
            }
        }
    }

    check_overflow(&paths.distances, &overflowed)?;
    Ok(paths)
}

/// Bellman-Ford algorithm.
///
/// Relaxes every arc up to `n - 1` times, stopping early once a pass makes
/// no progress, then runs one more pass. Any improvement in that pass means
/// a negative cycle is reachable from `source`.
pub fn bellman_ford(graph: &Graph, source: NodeId) -> Result<ShortestPaths> {
    check_source(graph, source)?;

    tracing::debug!(
        nodes = graph.num_nodes(),
        arcs = graph.num_arcs(),
        source = %source,
        "bellman-ford"
    );

    let mut paths = ShortestPaths::new(source, graph.num_nodes());
    let mut overflowed = vec![false; graph.num_nodes()];

    for _ in 1..graph.num_nodes() {
        let mut changed = false;
        for (u, v, w) in graph.arcs() {
            if paths.distances[u.index()].is_reachable() {
                changed |= paths.relax(u, v, w, &mut overflowed)?;
            }
        }
        if !changed {
            break;
        }
    }

    for (u, v, w) in graph.arcs() {
        let from = paths.distances[u.index()];
        if !from.is_reachable() {
            continue;
        }
        let improves = match from.extend(w) {
            Ok(candidate) => candidate < paths.distances[v.index()],
            // Past Weight::MAX: longer than any finite distance
            Err(_) if w > 0 => false,
            Err(err) => return Err(err),
        };
        if improves {
            tracing::warn!(source = %source, node = %v, "negative cycle reachable from source");
            return Err(GraphError::NegativeCycle { node: v });
        }
    }

    check_overflow(&paths.distances, &overflowed)?;
    Ok(paths)
}

/// All-pairs distance matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    num_nodes: usize,
    data: Vec<Distance>,
}

impl DistanceMatrix {
    /// Number of rows (and columns).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Distance from `from` to `to`, or `None` if either is out of range.
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<Distance> {
        if from.index() >= self.num_nodes || to.index() >= self.num_nodes {
            return None;
        }
        Some(self.data[from.index() * self.num_nodes + to.index()])
    }

    /// Distances from `from` to every node.
    pub fn row(&self, from: NodeId) -> Option<&[Distance]> {
        if from.index() >= self.num_nodes {
            return None;
        }
        let start = from.index() * self.num_nodes;
        Some(&self.data[start..start + self.num_nodes])
    }
}

/// Floyd-Warshall algorithm.
///
/// Parallel arcs keep their minimum weight. Unreachable pairs are never
/// added together. A negative entry on the diagonal means a negative cycle.
pub fn floyd_warshall(graph: &Graph) -> Result<DistanceMatrix> {
    let n = graph.num_nodes();
    tracing::debug!(nodes = n, arcs = graph.num_arcs(), "floyd-warshall");

    let mut dist = vec![Distance::Unreachable; n * n];
    let mut overflowed = vec![false; n * n];
    for i in 0..n {
        dist[i * n + i] = Distance::ZERO;
    }
    for (u, v, w) in graph.arcs() {
        let cell = &mut dist[u.index() * n + v.index()];
        *cell = (*cell).min(Distance::Finite(w));
    }

    for k in 0..n {
        for i in 0..n {
            let Distance::Finite(ik) = dist[i * n + k] else {
                continue;
            };
            for j in 0..n {
                let Distance::Finite(kj) = dist[k * n + j] else {
                    continue;
                };
                let ij = i * n + j;
                match ik.checked_add(kj) {
                    Some(through) if Distance::Finite(through) < dist[ij] => {
                        dist[ij] = Distance::Finite(through);
                    }
                    Some(_) => {}
                    // Upward overflow only matters if nothing shorter exists
                    None if ik > 0 => overflowed[ij] |= !dist[ij].is_reachable(),
                    None => return Err(GraphError::WeightOverflow),
                }
            }
        }

        // Stop as soon as a cycle shows up, before values can run away
        if let Some(i) = (0..n).find(|&i| dist[i * n + i] < Distance::ZERO) {
            tracing::warn!(node = i, "negative cycle in all-pairs search");
            return Err(GraphError::NegativeCycle {
                node: NodeId(i as u32),
            });
        }
    }

    check_overflow(&dist, &overflowed)?;
    Ok(DistanceMatrix {
        num_nodes: n,
        data: dist,
    })
}
