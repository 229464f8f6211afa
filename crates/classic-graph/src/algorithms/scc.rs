//! Strongly Connected Components (SCC) algorithms.
//!
//! A strongly connected component is a maximal set of vertices where every
//! vertex can reach every other. This module provides:
//!
//! - Tarjan's algorithm (single pass, O(V+E))
//! - Kosaraju's algorithm (two passes over the graph and its transpose)
//! - Helpers to label vertices by component and build the condensation DAG
//!
//! Components are lists of vertices sorted ascending. By default the list of
//! components is in reverse topological order of the condensation: a
//! component comes before every component that can reach it.

use crate::models::{ComponentId, Graph, GraphBuilder, GraphKind, NodeId, Weight};
use crate::{GraphError, Result};

/// Order in which components are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentOrder {
    /// Sinks first. This is the order Tarjan emits components in.
    #[default]
    ReverseTopological,
    /// Sources first.
    Topological,
}

/// SCC configuration.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SccConfig {
    /// Component order.
    pub order: ComponentOrder,
}

impl SccConfig {
    /// Create new SCC configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return components in topological order.
    pub fn with_topological_order(mut self) -> Self {
        self.order = ComponentOrder::Topological;
        self
    }
}

const UNVISITED: u32 = u32::MAX;

struct TarjanState {
    index: Vec<u32>,
    lowlink: Vec<u32>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: u32,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            index: vec![UNVISITED; n],
            lowlink: vec![UNVISITED; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
        }
    }

    fn discover(&mut self, v: usize) {
        self.index[v] = self.next_index;
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    /// Pop the component rooted at `v` off the vertex stack.
    fn pop_component(&mut self, v: usize) -> Vec<NodeId> {
        let mut members = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            members.push(NodeId(w as u32));
            if w == v {
                break;
            }
        }
        members.sort_unstable();
        members
    }
}

/// Tarjan's SCC algorithm.
///
/// Uses DFS with lowlink values to find SCCs in O(V+E) time. Components are
/// returned in reverse topological order.
pub fn scc_tarjan(graph: &Graph) -> Result<Vec<Vec<NodeId>>> {
    scc_tarjan_with_config(graph, &SccConfig::default())
}

/// Tarjan's algorithm with configuration.
pub fn scc_tarjan_with_config(graph: &Graph, config: &SccConfig) -> Result<Vec<Vec<NodeId>>> {
    tracing::debug!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        order = ?config.order,
        "tarjan scc"
    );

    let n = graph.num_nodes();
    let mut state = TarjanState::new(n);
    let mut components = Vec::new();

    // Explicit stack of (vertex, next arc) frames
    for start in 0..n {
        if state.index[start] != UNVISITED {
            continue;
        }

        state.discover(start);
        let mut dfs_stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(frame) = dfs_stack.last_mut() {
            let (v, cursor) = *frame;
            let targets = graph.targets(NodeId(v as u32));

            if cursor < targets.len() {
                frame.1 += 1;
                let w = targets[cursor] as usize;

                if state.index[w] == UNVISITED {
                    state.discover(w);
                    dfs_stack.push((w, 0));
                } else if state.on_stack[w] {
                    state.lowlink[v] = state.lowlink[v].min(state.index[w]);
                }
            } else {
                dfs_stack.pop();

                if let Some(&(parent, _)) = dfs_stack.last() {
                    state.lowlink[parent] = state.lowlink[parent].min(state.lowlink[v]);
                }

                if state.lowlink[v] == state.index[v] {
                    components.push(state.pop_component(v));
                }
            }
        }
    }

    if config.order == ComponentOrder::Topological {
        components.reverse();
    }

    tracing::trace!(components = components.len(), "tarjan done");
    Ok(components)
}

/// Kosaraju's SCC algorithm.
///
/// Two-pass algorithm:
/// 1. DFS on original graph, record finish order
/// 2. DFS on transposed graph in reverse finish order
///
/// Returns the same partition as [`scc_tarjan`], also in reverse topological
/// order, though ties between unrelated components may be broken differently.
pub fn scc_kosaraju(graph: &Graph) -> Result<Vec<Vec<NodeId>>> {
    tracing::debug!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "kosaraju scc"
    );

    let n = graph.num_nodes();

    // Pass 1: DFS on original graph, record finish order
    let mut visited = vec![false; n];
    let mut finish_order = Vec::with_capacity(n);
    for start in 0..n {
        if !visited[start] {
            dfs_finish_order(graph, start, &mut visited, &mut finish_order);
        }
    }

    // Pass 2: DFS on transposed graph in reverse finish order
    let transposed = graph.transpose();
    let mut components = Vec::new();
    visited.fill(false);

    for &node in finish_order.iter().rev() {
        if !visited[node] {
            let mut members = collect_reachable(&transposed, node, &mut visited);
            members.sort_unstable();
            components.push(members);
        }
    }

    // Pass 2 discovers sources first
    components.reverse();
    Ok(components)
}

/// DFS to record finish order.
fn dfs_finish_order(
    graph: &Graph,
    start: usize,
    visited: &mut [bool],
    finish_order: &mut Vec<usize>,
) {
    visited[start] = true;
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (v, cursor) = *frame;
        let targets = graph.targets(NodeId(v as u32));

        if cursor < targets.len() {
            frame.1 += 1;
            let w = targets[cursor] as usize;
            if !visited[w] {
                visited[w] = true;
                stack.push((w, 0));
            }
        } else {
            finish_order.push(v);
            stack.pop();
        }
    }
}

/// Every unvisited vertex reachable from `start`.
fn collect_reachable(graph: &Graph, start: usize, visited: &mut [bool]) -> Vec<NodeId> {
    let mut members = Vec::new();
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(node) = stack.pop() {
        members.push(NodeId(node as u32));

        for &neighbor in graph.targets(NodeId(node as u32)) {
            let w = neighbor as usize;
            if !visited[w] {
                visited[w] = true;
                stack.push(w);
            }
        }
    }

    members
}

/// Label every vertex with the index of its component.
///
/// Vertices not listed in any component stay [`ComponentId::UNASSIGNED`];
/// out-of-range vertices are ignored.
pub fn component_ids(components: &[Vec<NodeId>], num_nodes: usize) -> Vec<ComponentId> {
    let mut ids = vec![ComponentId::UNASSIGNED; num_nodes];
    for (c, members) in components.iter().enumerate() {
        for node in members {
            if let Some(slot) = ids.get_mut(node.index()) {
                *slot = ComponentId::new(c as u32);
            }
        }
    }
    ids
}

/// Get number of components from a component labelling.
pub fn count_components(components: &[ComponentId]) -> usize {
    components
        .iter()
        .filter(|c| c.is_assigned())
        .map(|c| c.get())
        .max()
        .map_or(0, |m| m as usize + 1)
}

/// Build the condensation: one vertex per component, one arc per pair of
/// components joined by at least one arc of `graph`.
///
/// Vertex `i` of the result is `components[i]`. Arcs inside a component are
/// dropped; parallel arcs between two components collapse into one carrying
/// the smallest weight. The result is always directed, and acyclic when
/// `components` are the strongly connected components of `graph`.
pub fn condensation(graph: &Graph, components: &[Vec<NodeId>]) -> Result<Graph> {
    let n = graph.num_nodes();
    let mut ids = vec![ComponentId::UNASSIGNED; n];

    for (c, members) in components.iter().enumerate() {
        for &node in members {
            graph.check_node(node)?;
            if ids[node.index()].is_assigned() {
                return Err(GraphError::InvalidPartition { node });
            }
            ids[node.index()] = ComponentId::new(c as u32);
        }
    }
    if let Some(missing) = ids.iter().position(|c| !c.is_assigned()) {
        return Err(GraphError::InvalidPartition {
            node: NodeId(missing as u32),
        });
    }

    let mut arcs: Vec<(u32, u32, Weight)> = graph
        .arcs()
        .filter_map(|(src, dst, weight)| {
            let (a, b) = (ids[src.index()].get(), ids[dst.index()].get());
            (a != b).then_some((a, b, weight))
        })
        .collect();
    arcs.sort_unstable();
    arcs.dedup_by_key(|&mut (a, b, _)| (a, b));

    let dag = GraphBuilder::with_kind(components.len(), GraphKind::Directed)?
        .with_weighted_edges(&arcs)?
        .build();

    tracing::debug!(
        components = dag.num_nodes(),
        arcs = dag.num_edges(),
        "condensation"
    );
    Ok(dag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[u32]) -> Vec<NodeId> {
        v.iter().map(|&i| NodeId(i)).collect()
    }

    fn sorted(mut components: Vec<Vec<NodeId>>) -> Vec<Vec<NodeId>> {
        components.sort();
        components
    }

    fn three_cycles() -> Graph {
        let edges = [
            (0, 1),
            (1, 2),
            (2, 0), // Cycle 0-1-2
            (2, 3),
            (3, 4),
            (4, 3), // Cycle 3-4
            (5, 6),
            (6, 5), // Cycle 5-6
        ];
        Graph::from_edges(7, &edges).unwrap()
    }

    #[test]
    fn test_single_node() {
        let graph = Graph::empty(1, GraphKind::Directed).unwrap();
        assert_eq!(scc_tarjan(&graph).unwrap(), vec![ids(&[0])]);
    }

    #[test]
    fn test_line_graph_sccs() {
        // Line graph: 0 -> 1 -> 2 -> 3, each node its own SCC in sink-first order
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let components = scc_tarjan(&graph).unwrap();
        assert_eq!(
            components,
            vec![ids(&[3]), ids(&[2]), ids(&[1]), ids(&[0])]
        );
    }

    #[test]
    fn test_cycle_scc() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(scc_tarjan(&graph).unwrap(), vec![ids(&[0, 1, 2])]);
    }

    #[test]
    fn test_two_sccs_reverse_topological() {
        // Two cycles: 0 <-> 1, 2 <-> 3, with 1 -> 2
        let graph = Graph::from_edges(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]).unwrap();
        let components = scc_tarjan(&graph).unwrap();
        assert_eq!(components, vec![ids(&[2, 3]), ids(&[0, 1])]);

        let config = SccConfig::new().with_topological_order();
        let components = scc_tarjan_with_config(&graph, &config).unwrap();
        assert_eq!(components, vec![ids(&[0, 1]), ids(&[2, 3])]);
    }

    #[test]
    fn test_kosaraju_same_as_tarjan() {
        let graph = three_cycles();
        let tarjan = scc_tarjan(&graph).unwrap();
        let kosaraju = scc_kosaraju(&graph).unwrap();

        assert_eq!(tarjan.len(), 3);
        assert_eq!(sorted(tarjan), sorted(kosaraju));
    }

    #[test]
    fn test_kosaraju_reverse_topological() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]).unwrap();
        assert_eq!(
            scc_kosaraju(&graph).unwrap(),
            vec![ids(&[2, 3]), ids(&[0, 1])]
        );
    }

    #[test]
    fn test_disconnected_graph() {
        let graph = Graph::empty(2, GraphKind::Directed).unwrap();
        let components = scc_tarjan(&graph).unwrap();
        let labels = component_ids(&components, 2);

        assert_eq!(count_components(&labels), 2);
        assert_ne!(labels[0], labels[1]);
    }

    #[test]
    fn test_component_ids() {
        let components = vec![ids(&[1, 2]), ids(&[0])];
        let labels = component_ids(&components, 4);

        assert_eq!(labels[0], ComponentId::new(1));
        assert_eq!(labels[1], ComponentId::new(0));
        assert_eq!(labels[2], ComponentId::new(0));
        assert!(!labels[3].is_assigned());
        assert_eq!(count_components(&labels), 2);
    }

    #[test]
    fn test_condensation_arcs_point_backwards() {
        let graph = three_cycles();
        let components = scc_tarjan(&graph).unwrap();
        let dag = condensation(&graph, &components).unwrap();

        assert_eq!(dag.num_nodes(), 3);
        assert_eq!(dag.num_edges(), 1);
        for (src, dst, _) in dag.arcs() {
            assert!(src > dst, "{src} -> {dst}");
        }
    }

    #[test]
    fn test_condensation_collapses_parallel_arcs() {
        // {0, 1} -> {2, 3} through two arcs
        let edges = [(0, 1, 1), (1, 0, 1), (0, 2, 7), (1, 3, 4), (2, 3, 1), (3, 2, 1)];
        let graph = Graph::from_weighted_edges(4, &edges).unwrap();
        let components = scc_tarjan(&graph).unwrap();
        let dag = condensation(&graph, &components).unwrap();

        assert_eq!(dag.num_edges(), 1);
        assert_eq!(dag.edges()[0].weight, 4);
    }

    #[test]
    fn test_condensation_rejects_bad_partition() {
        let graph = Graph::from_edges(3, &[(0, 1)]).unwrap();

        // Vertex 2 missing
        let err = condensation(&graph, &[ids(&[0, 1])]).unwrap_err();
        assert_eq!(err, GraphError::InvalidPartition { node: NodeId(2) });

        // Vertex 1 listed twice
        let err = condensation(&graph, &[ids(&[0, 1]), ids(&[1, 2])]).unwrap_err();
        assert_eq!(err, GraphError::InvalidPartition { node: NodeId(1) });

        assert!(matches!(
            condensation(&graph, &[ids(&[0, 1, 2, 3])]),
            Err(GraphError::InvalidNodeId(3))
        ));
    }

    #[test]
    fn test_self_loop_stays_single() {
        let graph = Graph::from_edges(2, &[(0, 0), (0, 1)]).unwrap();
        assert_eq!(scc_tarjan(&graph).unwrap(), vec![ids(&[1]), ids(&[0])]);
    }

    #[test]
    fn test_deep_chain_no_recursion() {
        let n = 100_000;
        let mut edges: Vec<_> = (0..n as u32 - 1).map(|i| (i, i + 1)).collect();
        edges.push((n as u32 - 1, 0));
        let graph = Graph::from_edges(n, &edges).unwrap();

        let components = scc_tarjan(&graph).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), n);
        assert_eq!(scc_kosaraju(&graph).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::empty(0, GraphKind::Directed).unwrap();
        assert!(scc_tarjan(&graph).unwrap().is_empty());
        assert!(scc_kosaraju(&graph).unwrap().is_empty());
    }
}
