//! Compressed Sparse Row (CSR) graph store.
//!
//! CSR is an efficient format for sparse graphs that enables:
//! - O(1) access to a vertex's outgoing arc range
//! - O(degree) iteration over neighbors
//! - Cache-friendly sequential access patterns
//!
//! Memory layout:
//! - `row_ptr[i]` = starting index in `col_idx` for vertex i
//! - `col_idx[row_ptr[i]..row_ptr[i+1]]` = targets of vertex i, in insertion order
//! - `values` = arc weights, parallel to `col_idx`
//! - `edge_ids` = index of the originating [`Edge`], parallel to `col_idx`
//!
//! An undirected edge `u - v` is stored as the two arcs `u -> v` and
//! `v -> u`, both carrying the same edge id. A self-loop is stored once.

use std::collections::BTreeMap;

use super::node::{NodeId, Weight};
use crate::{GraphError, Result};

/// Whether edges are one-way arcs or two-way links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphKind {
    /// Each edge is a single arc `src -> dst`.
    #[default]
    Directed,
    /// Each edge connects both endpoints.
    Undirected,
}

/// An edge as inserted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Source vertex.
    pub src: NodeId,
    /// Destination vertex.
    pub dst: NodeId,
    /// Edge weight.
    pub weight: Weight,
}

impl Edge {
    /// Create a new edge.
    pub const fn new(src: NodeId, dst: NodeId, weight: Weight) -> Self {
        Self { src, dst, weight }
    }
}

/// One stored arc leaving a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutEdge {
    /// Arc target.
    pub target: NodeId,
    /// Arc weight.
    pub weight: Weight,
    /// Index of the originating edge in [`Graph::edges`].
    pub edge: usize,
}

/// Immutable graph in CSR form.
///
/// For a graph with N nodes and M stored arcs:
/// - `row_ptr`: N+1 elements, where row_ptr[i] is the start of vertex i's arcs
/// - `col_idx`: M elements, the arc targets
/// - `values`: M elements, the arc weights
/// - `edge_ids`: M elements, the originating edge index
///
/// Built once through [`GraphBuilder`] and never mutated afterwards, so a
/// shared reference can be handed to any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,
    num_nodes: usize,
    row_ptr: Vec<u64>,
    col_idx: Vec<u32>,
    values: Vec<Weight>,
    edge_ids: Vec<u32>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Start building a directed graph with `num_nodes` isolated vertices.
    pub fn builder(num_nodes: usize) -> Result<GraphBuilder> {
        GraphBuilder::new(num_nodes)
    }

    /// Create a graph with no edges.
    pub fn empty(num_nodes: usize, kind: GraphKind) -> Result<Self> {
        Ok(GraphBuilder::with_kind(num_nodes, kind)?.build())
    }

    /// Create a directed graph from an edge list, each edge weighing 1.
    ///
    /// # Example
    ///
    /// ```
    /// use classic_graph::Graph;
    ///
    /// // Graph: 0 -> 1 -> 2
    /// let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    /// assert_eq!(graph.num_arcs(), 2);
    /// ```
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32)]) -> Result<Self> {
        Ok(GraphBuilder::new(num_nodes)?.with_edges(edges)?.build())
    }

    /// Create a directed graph from a weighted edge list.
    pub fn from_weighted_edges(num_nodes: usize, edges: &[(u32, u32, Weight)]) -> Result<Self> {
        Ok(GraphBuilder::new(num_nodes)?
            .with_weighted_edges(edges)?
            .build())
    }

    /// Create an undirected graph from an edge list, each edge weighing 1.
    pub fn undirected_from_edges(num_nodes: usize, edges: &[(u32, u32)]) -> Result<Self> {
        Ok(GraphBuilder::undirected(num_nodes)?
            .with_edges(edges)?
            .build())
    }

    /// Create an undirected graph from a weighted edge list.
    pub fn undirected_from_weighted_edges(
        num_nodes: usize,
        edges: &[(u32, u32, Weight)],
    ) -> Result<Self> {
        Ok(GraphBuilder::undirected(num_nodes)?
            .with_weighted_edges(edges)?
            .build())
    }

    /// Create a directed graph from adjacency lists (`adj[u]` lists the
    /// targets of `u`), each arc weighing 1.
    pub fn from_adjacency<A: AsRef<[u32]>>(adj: &[A]) -> Result<Self> {
        let mut builder = GraphBuilder::new(adj.len())?;
        for (src, targets) in adj.iter().enumerate() {
            for &dst in targets.as_ref() {
                builder.add_edge(src as u32, dst, 1)?;
            }
        }
        Ok(builder.build())
    }

    /// Create an undirected graph from symmetric adjacency lists.
    ///
    /// Every `v` in `adj[u]` must be matched by a `u` in `adj[v]`; each such
    /// pair becomes one edge, and a self-loop is listed once. Edges are
    /// inserted in the order their lower endpoint lists them. A listing with
    /// no mirror yields [`GraphError::AsymmetricAdjacency`].
    pub fn undirected_from_adjacency<A: AsRef<[u32]>>(adj: &[A]) -> Result<Self> {
        let n = adj.len();
        let mut builder = GraphBuilder::undirected(n)?;
        // Listings of u - v (u < v) seen from u minus those seen from v
        let mut balance: BTreeMap<(u32, u32), i64> = BTreeMap::new();

        for (u, targets) in adj.iter().enumerate() {
            let u = u as u32;
            for &v in targets.as_ref() {
                if v as usize >= n {
                    return Err(GraphError::InvalidNodeId(v));
                }
                if u <= v {
                    builder.add_edge(u, v, 1)?;
                }
                if u < v {
                    *balance.entry((u, v)).or_default() += 1;
                } else if u > v {
                    *balance.entry((v, u)).or_default() -= 1;
                }
            }
        }

        match balance.into_iter().find(|&(_, count)| count != 0) {
            // More listings from the lower endpoint: the higher one lacks a mirror
            Some(((lo, hi), count)) if count > 0 => Err(GraphError::AsymmetricAdjacency {
                src: NodeId(lo),
                dst: NodeId(hi),
            }),
            Some(((lo, hi), _)) => Err(GraphError::AsymmetricAdjacency {
                src: NodeId(hi),
                dst: NodeId(lo),
            }),
            None => Ok(builder.build()),
        }
    }

    /// Create a directed graph from weighted adjacency lists.
    pub fn from_weighted_adjacency<A: AsRef<[(u32, Weight)]>>(adj: &[A]) -> Result<Self> {
        let mut builder = GraphBuilder::new(adj.len())?;
        for (src, targets) in adj.iter().enumerate() {
            for &(dst, weight) in targets.as_ref() {
                builder.add_edge(src as u32, dst, weight)?;
            }
        }
        Ok(builder.build())
    }

    /// Directed or undirected.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// True for undirected graphs.
    pub fn is_undirected(&self) -> bool {
        self.kind == GraphKind::Undirected
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of edges as inserted.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of stored arcs (twice the non-loop edges when undirected).
    pub fn num_arcs(&self) -> usize {
        self.col_idx.len()
    }

    /// Check if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Check that `node` lies in `[0, n)`.
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if node.index() < self.num_nodes {
            Ok(())
        } else {
            Err(GraphError::InvalidNodeId(node.0))
        }
    }

    /// Require a particular graph kind.
    pub(crate) fn require_kind(&self, expected: GraphKind) -> Result<()> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(GraphError::KindMismatch {
                expected,
                actual: self.kind,
            })
        }
    }

    /// Iterate over vertex ids.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        // `GraphBuilder::with_kind` bounds `num_nodes` by `u32::MAX`
        (0..self.num_nodes as u32).map(NodeId)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn arc_range(&self, node: NodeId) -> std::ops::Range<usize> {
        let i = node.index();
        if i >= self.num_nodes {
            return 0..0;
        }
        self.row_ptr[i] as usize..self.row_ptr[i + 1] as usize
    }

    /// Get the degree (number of outgoing arcs) of a node.
    pub fn degree(&self, node: NodeId) -> usize {
        self.arc_range(node).len()
    }

    /// Arc targets of a node, in insertion order.
    ///
    /// Out-of-range nodes have no targets.
    pub fn targets(&self, node: NodeId) -> &[u32] {
        &self.col_idx[self.arc_range(node)]
    }

    /// Neighbors with weights, in insertion order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        let range = self.arc_range(node);
        self.col_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&col, &w)| (NodeId(col), w))
    }

    /// Outgoing arcs with the id of the edge each one came from.
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = OutEdge> + '_ {
        self.arc_range(node).map(move |i| OutEdge {
            target: NodeId(self.col_idx[i]),
            weight: self.values[i],
            edge: self.edge_ids[i] as usize,
        })
    }

    /// The `k`-th outgoing arc of a node, if it exists.
    ///
    /// Lets explicit-stack traversals keep a cursor per frame.
    pub fn out_edge(&self, node: NodeId, k: usize) -> Option<OutEdge> {
        let range = self.arc_range(node);
        if k >= range.len() {
            return None;
        }
        let i = range.start + k;
        Some(OutEdge {
            target: NodeId(self.col_idx[i]),
            weight: self.values[i],
            edge: self.edge_ids[i] as usize,
        })
    }

    /// Every stored arc as `(src, dst, weight)`, grouped by source.
    pub fn arcs(&self) -> impl Iterator<Item = (NodeId, NodeId, Weight)> + '_ {
        self.nodes().flat_map(move |src| {
            self.neighbors(src)
                .map(move |(dst, weight)| (src, dst, weight))
        })
    }

    /// Check if an arc exists from src to dst.
    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.targets(src).contains(&dst.0)
    }

    /// Validate CSR structure.
    pub fn validate(&self) -> Result<()> {
        if self.row_ptr.len() != self.num_nodes + 1 {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr length {} != num_nodes + 1 = {}",
                self.row_ptr.len(),
                self.num_nodes + 1
            )));
        }

        for i in 0..self.num_nodes {
            if self.row_ptr[i] > self.row_ptr[i + 1] {
                return Err(GraphError::InvalidCsr(format!(
                    "row_ptr not monotonic at index {}",
                    i
                )));
            }
        }

        let nnz = *self.row_ptr.last().unwrap_or(&0) as usize;
        if nnz != self.col_idx.len() {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr[-1] = {} != col_idx.len() = {}",
                nnz,
                self.col_idx.len()
            )));
        }

        if self.values.len() != self.col_idx.len() || self.edge_ids.len() != self.col_idx.len() {
            return Err(GraphError::InvalidCsr(format!(
                "values.len() = {}, edge_ids.len() = {}, col_idx.len() = {}",
                self.values.len(),
                self.edge_ids.len(),
                self.col_idx.len()
            )));
        }

        for &col in &self.col_idx {
            if col as usize >= self.num_nodes {
                return Err(GraphError::InvalidCsr(format!(
                    "col_idx {} >= num_nodes {}",
                    col, self.num_nodes
                )));
            }
        }

        for &id in &self.edge_ids {
            if id as usize >= self.edges.len() {
                return Err(GraphError::InvalidCsr(format!(
                    "edge id {} >= num_edges {}",
                    id,
                    self.edges.len()
                )));
            }
        }

        Ok(())
    }

    /// Create transpose (reverse graph).
    ///
    /// Undirected graphs are their own transpose.
    pub fn transpose(&self) -> Self {
        let mut builder = GraphBuilder::unchecked(self.num_nodes, self.kind);
        builder.edges = match self.kind {
            GraphKind::Directed => self
                .edges
                .iter()
                .map(|e| Edge::new(e.dst, e.src, e.weight))
                .collect(),
            GraphKind::Undirected => self.edges.clone(),
        };
        builder.build()
    }
}

/// Builder for [`Graph`].
///
/// Every endpoint is checked on insertion, so a built graph never holds an
/// out-of-range vertex.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    kind: GraphKind,
    num_nodes: usize,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create a directed builder with given number of nodes.
    pub fn new(num_nodes: usize) -> Result<Self> {
        Self::with_kind(num_nodes, GraphKind::Directed)
    }

    /// Create an undirected builder with given number of nodes.
    pub fn undirected(num_nodes: usize) -> Result<Self> {
        Self::with_kind(num_nodes, GraphKind::Undirected)
    }

    /// Create a builder of the given kind.
    ///
    /// Vertex ids are `u32`, so more than `u32::MAX` vertices is
    /// [`GraphError::TooManyNodes`].
    pub fn with_kind(num_nodes: usize, kind: GraphKind) -> Result<Self> {
        if num_nodes > u32::MAX as usize {
            return Err(GraphError::TooManyNodes(num_nodes));
        }
        Ok(Self::unchecked(num_nodes, kind))
    }

    // Caller guarantees `num_nodes` fits in `u32`.
    fn unchecked(num_nodes: usize, kind: GraphKind) -> Self {
        Self {
            kind,
            num_nodes,
            edges: Vec::new(),
        }
    }

    /// Add unit-weight edges from slice.
    pub fn with_edges(mut self, edges: &[(u32, u32)]) -> Result<Self> {
        for &(src, dst) in edges {
            self.add_edge(src, dst, 1)?;
        }
        Ok(self)
    }

    /// Add weighted edges from slice.
    pub fn with_weighted_edges(mut self, edges: &[(u32, u32, Weight)]) -> Result<Self> {
        for &(src, dst, w) in edges {
            self.add_edge(src, dst, w)?;
        }
        Ok(self)
    }

    /// Add a single weighted edge.
    pub fn add_edge(&mut self, src: u32, dst: u32, weight: Weight) -> Result<&mut Self> {
        for node in [src, dst] {
            if node as usize >= self.num_nodes {
                return Err(GraphError::InvalidNodeId(node));
            }
        }
        self.edges.push(Edge::new(NodeId(src), NodeId(dst), weight));
        Ok(self)
    }

    /// Add a single edge of weight 1.
    pub fn add_unweighted_edge(&mut self, src: u32, dst: u32) -> Result<&mut Self> {
        self.add_edge(src, dst, 1)
    }

    /// Number of edges added so far.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Build the CSR graph.
    pub fn build(self) -> Graph {
        // (src, dst, weight, edge id)
        let mut arcs: Vec<(u32, u32, Weight, u32)> = Vec::with_capacity(match self.kind {
            GraphKind::Directed => self.edges.len(),
            GraphKind::Undirected => self.edges.len() * 2,
        });
        for (id, e) in self.edges.iter().enumerate() {
            arcs.push((e.src.0, e.dst.0, e.weight, id as u32));
            if self.kind == GraphKind::Undirected && e.src != e.dst {
                arcs.push((e.dst.0, e.src.0, e.weight, id as u32));
            }
        }

        // Stable: keeps insertion order within each source
        arcs.sort_by_key(|a| a.0);

        let mut row_ptr = vec![0u64; self.num_nodes + 1];
        for &(src, _, _, _) in &arcs {
            row_ptr[src as usize + 1] += 1;
        }

        // Cumulative sum
        for i in 1..=self.num_nodes {
            row_ptr[i] += row_ptr[i - 1];
        }

        Graph {
            kind: self.kind,
            num_nodes: self.num_nodes,
            row_ptr,
            col_idx: arcs.iter().map(|a| a.1).collect(),
            values: arcs.iter().map(|a| a.2).collect(),
            edge_ids: arcs.iter().map(|a| a.3).collect(),
            edges: self.edges,
        }
    }
}
