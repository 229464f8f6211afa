//! Graph data models.
//!
//! This module provides the core data structures for representing graphs:
//! - [`Graph`]: Compressed Sparse Row graph store, built by [`GraphBuilder`]
//! - [`NodeId`], [`Distance`], [`ComponentId`]: Graph node types

pub mod csr;
pub mod node;

pub use csr::{Edge, Graph, GraphBuilder, GraphKind, OutEdge};
pub use node::{ComponentId, Distance, NodeId, Weight};
