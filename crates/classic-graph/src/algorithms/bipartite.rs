//! Bipartiteness via BFS two-colouring.

use std::collections::VecDeque;

use crate::models::{Graph, GraphKind, NodeId};
use crate::Result;

/// Side of a bipartition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The side every BFS root is placed on.
    Left,
    /// The opposite side.
    Right,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Two-colour an undirected graph.
///
/// Every component is coloured from its lowest-numbered vertex, which lands on
/// [`Side::Left`]. Returns `Ok(None)` as soon as an edge joins two vertices of
/// the same colour; a self-loop always does.
pub fn bipartition(graph: &Graph) -> Result<Option<Vec<Side>>> {
    graph.require_kind(GraphKind::Undirected)?;

    let n = graph.num_nodes();
    let mut side: Vec<Option<Side>> = vec![None; n];
    let mut queue = VecDeque::new();

    for root in 0..n {
        if side[root].is_some() {
            continue;
        }

        side[root] = Some(Side::Left);
        queue.push_back(root);

        while let Some(v) = queue.pop_front() {
            let Some(current) = side[v] else {
                continue;
            };

            for &w in graph.targets(NodeId(v as u32)) {
                let w = w as usize;
                match side[w] {
                    None => {
                        side[w] = Some(current.opposite());
                        queue.push_back(w);
                    }
                    Some(s) if s == current => {
                        tracing::trace!(u = v, v = w, "odd cycle");
                        return Ok(None);
                    }
                    Some(_) => {}
                }
            }
        }
    }

    Ok(Some(side.into_iter().flatten().collect()))
}

/// True when the vertices split into two sides with no edge inside a side.
pub fn is_bipartite(graph: &Graph) -> Result<bool> {
    let result = bipartition(graph)?.is_some();
    tracing::debug!(nodes = graph.num_nodes(), bipartite = result, "bipartite check");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    #[test]
    fn test_square_with_tail_is_bipartite() {
        // {0, 3} vs {1, 2, 4}
        let graph =
            Graph::undirected_from_edges(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]).unwrap();
        let sides = bipartition(&graph).unwrap().unwrap();

        assert_eq!(
            sides,
            vec![Side::Left, Side::Right, Side::Right, Side::Left, Side::Right]
        );
        assert!(is_bipartite(&graph).unwrap());
    }

    #[test]
    fn test_triangle_is_not_bipartite() {
        let graph = Graph::undirected_from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(!is_bipartite(&graph).unwrap());
        assert_eq!(bipartition(&graph).unwrap(), None);
    }

    #[test]
    fn test_odd_cycle_in_later_component() {
        let graph =
            Graph::undirected_from_edges(6, &[(0, 1), (2, 3), (3, 4), (4, 5), (5, 2), (2, 4)])
                .unwrap();
        assert!(!is_bipartite(&graph).unwrap());
    }

    #[test]
    fn test_every_edge_crosses_sides() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (6, 7)];
        let graph = Graph::undirected_from_edges(8, &edges).unwrap();
        let sides = bipartition(&graph).unwrap().unwrap();

        for &(u, v) in &edges {
            assert_ne!(sides[u as usize], sides[v as usize]);
        }
    }

    #[test]
    fn test_self_loop_is_not_bipartite() {
        let graph = Graph::undirected_from_edges(2, &[(0, 1), (1, 1)]).unwrap();
        assert!(!is_bipartite(&graph).unwrap());
    }

    #[test]
    fn test_edgeless_and_empty_are_bipartite() {
        assert!(is_bipartite(&Graph::empty(3, GraphKind::Undirected).unwrap()).unwrap());
        assert!(is_bipartite(&Graph::empty(0, GraphKind::Undirected).unwrap()).unwrap());
    }

    #[test]
    fn test_requires_undirected() {
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        assert!(matches!(
            is_bipartite(&graph),
            Err(GraphError::KindMismatch { .. })
        ));
    }
}
