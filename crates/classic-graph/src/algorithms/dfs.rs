//! Depth-first search.
//!
//! Three variants are provided:
//!
//! - [`dfs`]: the canonical order. It keeps an explicit stack of
//!   `(vertex, next neighbor)` frames, so it visits vertices in exactly the
//!   same pre-order as the recursive form without consuming call stack.
//! - [`dfs_recursive`]: the textbook recursive form. Recursion depth equals
//!   the longest DFS path, so prefer [`dfs`] for large or adversarial graphs.
//! - [`dfs_stack`]: the "push every unvisited neighbor" stack form. When a
//!   vertex has several unvisited neighbors the stack pops them in reverse,
//!   so its order generally differs from [`dfs`]. That is expected.

use crate::models::{Graph, NodeId};
use crate::{GraphError, Result};

fn check_start(graph: &Graph, start: NodeId) -> Result<()> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    graph.check_node(start)
}

/// DFS pre-order from `start`, matching [`dfs_recursive`].
pub fn dfs(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    check_start(graph, start)?;

    let mut visited = vec![false; graph.num_nodes()];
    let mut order = vec![start];
    let mut stack: Vec<(usize, usize)> = vec![(start.index(), 0)];
    visited[start.index()] = true;

    while let Some(frame) = stack.last_mut() {
        let (v, cursor) = *frame;
        let targets = graph.targets(NodeId(v as u32));

        if cursor < targets.len() {
            frame.1 += 1;
            let w = targets[cursor] as usize;
            if !visited[w] {
                visited[w] = true;
                order.push(NodeId(w as u32));
                stack.push((w, 0));
            }
        } else {
            stack.pop();
        }
    }

    Ok(order)
}

/// Recursive DFS pre-order from `start`.
pub fn dfs_recursive(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    check_start(graph, start)?;

    fn visit(graph: &Graph, v: NodeId, visited: &mut [bool], order: &mut Vec<NodeId>) {
        visited[v.index()] = true;
        order.push(v);
        for &w in graph.targets(v) {
            if !visited[w as usize] {
                visit(graph, NodeId(w), visited, order);
            }
        }
    }

    let mut visited = vec![false; graph.num_nodes()];
    let mut order = Vec::new();
    visit(graph, start, &mut visited, &mut order);
    Ok(order)
}

/// Stack-based DFS that marks neighbors when pushed.
///
/// Sibling order is reversed relative to [`dfs`].
pub fn dfs_stack(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    check_start(graph, start)?;

    let mut visited = vec![false; graph.num_nodes()];
    let mut order = Vec::new();
    let mut stack = vec![start];
    visited[start.index()] = true;

    while let Some(node) = stack.pop() {
        order.push(node);

        for &neighbor in graph.targets(node) {
            let w = neighbor as usize;
            if !visited[w] {
                visited[w] = true;
                stack.push(NodeId(neighbor));
            }
        }
    }

    Ok(order)
}
