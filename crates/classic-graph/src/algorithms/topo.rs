//! Topological ordering of directed acyclic graphs.

use super::cycle::finish_order;
use crate::models::{Graph, GraphKind, NodeId};
use crate::{GraphError, Result};

/// Topological order by reversed DFS finish time.
///
/// Roots are taken in index order, so the result is deterministic. Every arc
/// `u -> v` has `u` before `v`. A graph containing a directed cycle (including
/// a self-loop) yields [`GraphError::CycleDetected`].
pub fn topological_sort(graph: &Graph) -> Result<Vec<NodeId>> {
    graph.require_kind(GraphKind::Directed)?;
    tracing::debug!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "topological sort"
    );

    match finish_order(graph) {
        Ok(mut order) => {
            order.reverse();
            Ok(order)
        }
        Err(node) => {
            tracing::debug!(node = %node, "cycle prevents topological order");
            Err(GraphError::CycleDetected)
        }
    }
}
