//! Cycle detection.
//!
//! Both detectors walk the graph with explicit stacks, so deep graphs cannot
//! overflow the call stack.

use crate::models::{Graph, GraphKind, NodeId};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet discovered.
    White,
    /// On the current DFS path.
    Gray,
    /// Fully explored.
    Black,
}

/// DFS finish (post-order) over every vertex, roots taken in index order.
///
/// Returns `Err(v)` with the gray vertex `v` as soon as an arc closes a
/// cycle.
pub(crate) fn finish_order(graph: &Graph) -> std::result::Result<Vec<NodeId>, NodeId> {
    let n = graph.num_nodes();
    let mut color = vec![Color::White; n];
    let mut finished = Vec::with_capacity(n);

    for root in 0..n {
        if color[root] != Color::White {
            continue;
        }

        color[root] = Color::Gray;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (v, cursor) = *frame;
            let targets = graph.targets(NodeId(v as u32));

            if cursor < targets.len() {
                frame.1 += 1;
                let w = targets[cursor] as usize;
                match color[w] {
                    Color::Gray => return Err(NodeId(w as u32)),
                    Color::White => {
                        color[w] = Color::Gray;
                        stack.push((w, 0));
                    }
                    Color::Black => {}
                }
            } else {
                color[v] = Color::Black;
                finished.push(NodeId(v as u32));
                stack.pop();
            }
        }
    }

    Ok(finished)
}

/// Directed cycle detection using white/gray/black colouring.
///
/// An arc into a gray vertex (one still on the DFS path) is a back edge and
/// therefore a cycle. Self-loops count.
pub fn has_cycle_directed(graph: &Graph) -> Result<bool> {
    graph.require_kind(GraphKind::Directed)?;
    let found = finish_order(graph).is_err();
    tracing::trace!(nodes = graph.num_nodes(), cycle = found, "directed cycle check");
    Ok(found)
}

/// Undirected cycle detection.
///
/// Each DFS frame remembers the edge it was entered through. Reaching an
/// already-visited vertex through any other edge closes a cycle, so
/// self-loops and parallel edges are cycles while the tree edge back to the
/// parent is not.
pub fn has_cycle_undirected(graph: &Graph) -> Result<bool> {
    graph.require_kind(GraphKind::Undirected)?;

    let n = graph.num_nodes();
    let mut visited = vec![false; n];

    for root in 0..n {
        if visited[root] {
            continue;
        }

        visited[root] = true;
        // (vertex, entering edge, next arc)
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];

        while let Some(frame) = stack.last_mut() {
            let (v, via, cursor) = *frame;
            match graph.out_edge(NodeId(v as u32), cursor) {
                Some(arc) => {
                    frame.2 += 1;
                    if via == Some(arc.edge) {
                        continue;
                    }
                    let w = arc.target.index();
                    if visited[w] {
                        tracing::trace!(from = v, to = w, "undirected cycle");
                        return Ok(true);
                    }
                    visited[w] = true;
                    stack.push((w, Some(arc.edge), 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    #[test]
    fn test_undirected_square_with_tail() {
        // 0-1-3-2-0 plus 3-4
        let graph =
            Graph::undirected_from_edges(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]).unwrap();
        assert!(has_cycle_undirected(&graph).unwrap());
    }

    #[test]
    fn test_undirected_tree_has_no_cycle() {
        let graph = Graph::undirected_from_edges(5, &[(0, 1), (0, 2), (1, 3), (1, 4)]).unwrap();
        assert!(!has_cycle_undirected(&graph).unwrap());
    }

    #[test]
    fn test_tree_from_adjacency_has_no_cycle() {
        // each edge is listed from both ends
        let adj: [&[u32]; 4] = [&[1, 2], &[0, 3], &[0], &[1]];
        let tree = Graph::undirected_from_adjacency(&adj).unwrap();
        assert_eq!(tree.num_edges(), 3);
        assert!(!has_cycle_undirected(&tree).unwrap());

        let square: [&[u32]; 4] = [&[1, 2], &[0, 3], &[0, 3], &[1, 2]];
        let square = Graph::undirected_from_adjacency(&square).unwrap();
        assert!(has_cycle_undirected(&square).unwrap());
    }

    #[test]
    fn test_undirected_forest_has_no_cycle() {
        let graph = Graph::undirected_from_edges(6, &[(0, 1), (2, 3), (3, 4)]).unwrap();
        assert!(!has_cycle_undirected(&graph).unwrap());
    }

    #[test]
    fn test_undirected_cycle_in_second_component() {
        let graph =
            Graph::undirected_from_edges(6, &[(0, 1), (2, 3), (3, 4), (4, 2)]).unwrap();
        assert!(has_cycle_undirected(&graph).unwrap());
    }

    #[test]
    fn test_undirected_parallel_edge_and_self_loop() {
        let parallel = Graph::undirected_from_edges(2, &[(0, 1), (1, 0)]).unwrap();
        assert!(has_cycle_undirected(&parallel).unwrap());

        let self_loop = Graph::undirected_from_edges(2, &[(0, 1), (1, 1)]).unwrap();
        assert!(has_cycle_undirected(&self_loop).unwrap());
    }

    #[test]
    fn test_directed_cycle() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(has_cycle_directed(&graph).unwrap());
    }

    #[test]
    fn test_directed_dag_has_no_cycle() {
        // Diamond: two paths into 3 are not a directed cycle
        let graph = Graph::from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
        assert!(!has_cycle_directed(&graph).unwrap());
    }

    #[test]
    fn test_directed_self_loop() {
        let graph = Graph::from_edges(2, &[(0, 1), (1, 1)]).unwrap();
        assert!(has_cycle_directed(&graph).unwrap());
    }

    #[test]
    fn test_kind_is_checked() {
        let directed = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let undirected = Graph::undirected_from_edges(2, &[(0, 1)]).unwrap();

        assert!(matches!(
            has_cycle_undirected(&directed),
            Err(GraphError::KindMismatch { .. })
        ));
        assert!(matches!(
            has_cycle_directed(&undirected),
            Err(GraphError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_finish_order_is_post_order() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(
            finish_order(&graph),
            Ok(vec![NodeId(2), NodeId(1), NodeId(0)])
        );
    }

    #[test]
    fn test_empty_graph_has_no_cycle() {
        let graph = Graph::from_edges(0, &[]).unwrap();
        assert!(!has_cycle_directed(&graph).unwrap());
    }
}
