//! Breadth-first search algorithm.
//!
//! BFS visits vertices in non-decreasing hop distance from the sources using
//! a first-in-first-out frontier. Each vertex is enqueued and marked visited
//! exactly once, so every routine here runs in O(V + E).

use std::collections::VecDeque;

use crate::models::{Distance, Graph, NodeId};
use crate::{GraphError, Result};

/// BFS configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BfsConfig {
    /// Maximum hop distance to explore.
    pub max_distance: u32,
}

impl Default for BfsConfig {
    fn default() -> Self {
        Self {
            max_distance: u32::MAX,
        }
    }
}

impl BfsConfig {
    /// Create new BFS configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum distance.
    pub fn with_max_distance(mut self, max: u32) -> Self {
        self.max_distance = max;
        self
    }
}

fn check_sources(graph: &Graph, sources: &[NodeId]) -> Result<()> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    for &src in sources {
        graph.check_node(src)?;
    }
    Ok(())
}

/// BFS visit order from `start`.
///
/// Neighbors are enqueued in adjacency (insertion) order.
pub fn bfs(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    check_sources(graph, &[start])?;

    let mut visited = vec![false; graph.num_nodes()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited[start.index()] = true;
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        order.push(node);

        for &neighbor_id in graph.targets(node) {
            let neighbor = neighbor_id as usize;
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back(NodeId(neighbor_id));
            }
        }
    }

    tracing::trace!(start = %start, visited = order.len(), "bfs");
    Ok(order)
}

/// Multi-source BFS hop distances.
///
/// # Returns
///
/// Vector of distances, one per node. [`Distance::Unreachable`] for nodes
/// not reached from any source.
pub fn bfs_distances(graph: &Graph, sources: &[NodeId]) -> Result<Vec<Distance>> {
    bfs_distances_with_config(graph, sources, &BfsConfig::default())
}

/// Multi-source BFS hop distances with configuration.
///
/// Nodes further than `config.max_distance` hops stay unreachable.
pub fn bfs_distances_with_config(
    graph: &Graph,
    sources: &[NodeId],
    config: &BfsConfig,
) -> Result<Vec<Distance>> {
    check_sources(graph, sources)?;

    let mut distances = vec![Distance::Unreachable; graph.num_nodes()];
    let mut queue = VecDeque::new();

    for &src in sources {
        if !distances[src.index()].is_reachable() {
            distances[src.index()] = Distance::ZERO;
            queue.push_back(src);
        }
    }

    while let Some(node) = queue.pop_front() {
        let current_dist = distances[node.index()];

        if current_dist >= Distance::Finite(config.max_distance as i64) {
            continue;
        }

        for &neighbor_id in graph.targets(node) {
            let neighbor = neighbor_id as usize;
            if !distances[neighbor].is_reachable() {
                distances[neighbor] = current_dist.increment()?;
                queue.push_back(NodeId(neighbor_id));
            }
        }
    }

    Ok(distances)
}

/// Multi-source BFS returning parent pointers for path reconstruction.
///
/// Sources are their own parents; unreached nodes have no parent.
pub fn bfs_with_parents(
    graph: &Graph,
    sources: &[NodeId],
) -> Result<(Vec<Distance>, Vec<Option<NodeId>>)> {
    check_sources(graph, sources)?;

    let mut distances = vec![Distance::Unreachable; graph.num_nodes()];
    let mut parents = vec![None; graph.num_nodes()];
    let mut queue = VecDeque::new();

    for &src in sources {
        if !distances[src.index()].is_reachable() {
            distances[src.index()] = Distance::ZERO;
            parents[src.index()] = Some(src);
            queue.push_back(src);
        }
    }

    while let Some(node) = queue.pop_front() {
        let current_dist = distances[node.index()];

        for &neighbor_id in graph.targets(node) {
            let neighbor = neighbor_id as usize;
            if !distances[neighbor].is_reachable() {
                distances[neighbor] = current_dist.increment()?;
                parents[neighbor] = Some(node);
                queue.push_back(NodeId(neighbor_id));
            }
        }
    }

    Ok((distances, parents))
}

/// Reconstruct path from source to target using parent pointers.
///
/// A source is recognised by being its own parent. Returns `None` when the
/// target was never reached or the pointers do not lead back to a source.
pub fn reconstruct_path(parents: &[Option<NodeId>], target: NodeId) -> Option<Vec<NodeId>> {
    let mut path = vec![target];
    let mut current = target;

    loop {
        let parent = (*parents.get(current.index())?)?;
        if parent == current {
            break;
        }
        if path.len() > parents.len() {
            return None;
        }
        current = parent;
        path.push(current);
    }

    path.reverse();
    Some(path)
}
