//! Disjoint sets over the vertices `0..n`.
//!
//! `find` walks to the root, then points every vertex on the walked path
//! straight at it (full path compression). `unite` links the lower-rank root under the higher one.
//! Together they give inverse-Ackermann amortised cost per operation.
//!
//! Kruskal uses [`UnionFind::unite`] to reject edges that would close a
//! cycle; [`connected_components`] labels an undirected graph with it.

use crate::models::{ComponentId, Graph, GraphKind, NodeId};
use crate::{GraphError, Result};

/// Disjoint-set forest.
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// `parent[i] == i` marks a root.
    parent: Vec<u32>,
    /// Upper bound on tree height, meaningful at roots only.
    rank: Vec<u32>,
    num_components: usize,
}

impl UnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
            num_components: n,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    fn check(&self, x: NodeId) -> Result<()> {
        if x.index() < self.parent.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidNodeId(x.0))
        }
    }

    /// Current parent pointer of `x`, without compressing.
    pub fn parent(&self, x: NodeId) -> Result<NodeId> {
        self.check(x)?;
        Ok(NodeId(self.parent[x.index()]))
    }

    /// Current rank of `x`.
    pub fn rank(&self, x: NodeId) -> Result<u32> {
        self.check(x)?;
        Ok(self.rank[x.index()])
    }

    /// Representative of the set holding `x`, compressing the path to it.
    pub fn find(&mut self, x: NodeId) -> Result<NodeId> {
        self.check(x)?;
        Ok(NodeId(self.root_of(x.index()) as u32))
    }

    /// Merge the sets holding `x` and `y`.
    ///
    /// `Ok(false)` when they already share a set.
    pub fn unite(&mut self, x: NodeId, y: NodeId) -> Result<bool> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;

        if root_x == root_y {
            return Ok(false);
        }

        let rx = self.rank[root_x.index()];
        let ry = self.rank[root_y.index()];

        if rx < ry {
            self.parent[root_x.index()] = root_y.0;
        } else if rx > ry {
            self.parent[root_y.index()] = root_x.0;
        } else {
            // Same rank: root_x survives and grows
            self.parent[root_y.index()] = root_x.0;
            self.rank[root_x.index()] += 1;
        }

        self.num_components -= 1;
        Ok(true)
    }

    /// True when `x` and `y` share a set.
    pub fn connected(&mut self, x: NodeId, y: NodeId) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Dense set labels, numbered in order of each set's lowest element.
    pub fn component_ids(&mut self) -> Vec<ComponentId> {
        let n = self.parent.len();
        let mut labels = vec![ComponentId::UNASSIGNED; n];
        let mut next = 0u32;

        for i in 0..n {
            let root = self.root_of(i);
            if !labels[root].is_assigned() {
                labels[root] = ComponentId::new(next);
                next += 1;
            }
            labels[i] = labels[root];
        }

        labels
    }

    /// Number of elements in the set holding `x`.
    pub fn component_size(&mut self, x: NodeId) -> Result<usize> {
        let root = self.find(x)?.index();
        Ok((0..self.parent.len())
            .filter(|&i| self.root_of(i) == root)
            .count())
    }

    // Caller guarantees `i < len`.
    fn root_of(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] as usize != root {
            root = self.parent[root] as usize;
        }
        let mut node = i;
        while self.parent[node] as usize != root {
            let next = self.parent[node] as usize;
            self.parent[node] = root as u32;
            node = next;
        }
        root
    }
}

/// Connected components of an undirected graph via union-find.
pub fn connected_components(graph: &Graph) -> Result<Vec<ComponentId>> {
    graph.require_kind(GraphKind::Undirected)?;

    let mut uf = UnionFind::new(graph.num_nodes());
    for edge in graph.edges() {
        uf.unite(edge.src, edge.dst)?;
    }

    tracing::debug!(
        nodes = graph.num_nodes(),
        components = uf.num_components(),
        "connected components"
    );
    Ok(uf.component_ids())
}
