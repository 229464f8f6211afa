//! Node types for graph algorithms.
//!
//! This module provides strongly-typed wrappers for graph concepts:
//! - [`NodeId`]: Dense vertex index in `[0, n)`
//! - [`Weight`]: Edge weight
//! - [`Distance`]: Accumulated path cost, or unreachable
//! - [`ComponentId`]: Component identifier

use std::fmt;

use crate::{GraphError, Result};

/// Edge weight.
///
/// Integer weights keep relaxation comparisons exact.
pub type Weight = i64;

/// Node identifier (vertex ID).
///
/// Using a newtype prevents mixing up node IDs with other integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    pub const fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Get the inner value.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index into per-vertex arrays.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl TryFrom<usize> for NodeId {
    type Error = GraphError;

    fn try_from(id: usize) -> Result<Self> {
        u32::try_from(id)
            .map(NodeId)
            .map_err(|_| GraphError::TooManyNodes(id))
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cost of the best known path to a vertex.
///
/// Unreachable vertices carry a distinct tag instead of a numeric sentinel,
/// so a large finite cost can never be mistaken for "no path". The derived
/// ordering places `Unreachable` after every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distance {
    /// Reachable with the given accumulated weight.
    Finite(Weight),
    /// No path exists.
    #[default]
    Unreachable,
}

impl Distance {
    /// Zero distance (source node).
    pub const ZERO: Distance = Distance::Finite(0);

    /// Check if node is reachable.
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Finite value, if any.
    pub const fn finite(&self) -> Option<Weight> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Unreachable => None,
        }
    }

    /// Extend this distance by one edge.
    ///
    /// `Unreachable` stays unreachable. Overflow is reported instead of
    /// wrapping into a small value.
    pub fn extend(&self, weight: Weight) -> Result<Distance> {
        match self {
            Distance::Finite(d) => d
                .checked_add(weight)
                .map(Distance::Finite)
                .ok_or(GraphError::WeightOverflow),
            Distance::Unreachable => Ok(Distance::Unreachable),
        }
    }

    /// Add one hop, saturating at unreachable.
    pub fn increment(&self) -> Result<Distance> {
        self.extend(1)
    }
}

impl From<Weight> for Distance {
    fn from(d: Weight) -> Self {
        Distance::Finite(d)
    }
}

impl From<Option<Weight>> for Distance {
    fn from(d: Option<Weight>) -> Self {
        d.map_or(Distance::Unreachable, Distance::Finite)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Connected component identifier.
///
/// Nodes in the same component have the same ComponentId.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Unassigned component.
    pub const UNASSIGNED: ComponentId = ComponentId(u32::MAX);

    /// Create a new component ID.
    pub const fn new(id: u32) -> Self {
        ComponentId(id)
    }

    /// Check if component is assigned.
    pub const fn is_assigned(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Get the inner value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ComponentId {
    fn from(id: u32) -> Self {
        ComponentId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_basics() {
        let node = NodeId::new(42);
        assert_eq!(node.get(), 42);
        assert_eq!(node.index(), 42);
        assert_eq!(node.to_string(), "42");
    }

    #[test]
    fn test_node_id_conversions() {
        let node: NodeId = 100u32.into();
        assert_eq!(node.get(), 100);

        let idx: usize = node.into();
        assert_eq!(idx, 100);

        assert_eq!(NodeId::try_from(7usize), Ok(NodeId(7)));
        assert_eq!(NodeId::try_from(u32::MAX as usize), Ok(NodeId(u32::MAX)));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_node_id_rejects_wide_index() {
        let wide = u32::MAX as usize + 1;
        assert_eq!(NodeId::try_from(wide), Err(GraphError::TooManyNodes(wide)));
    }

    #[test]
    fn test_distance_ordering() {
        assert!(Distance::Finite(Weight::MAX) < Distance::Unreachable);
        assert!(Distance::Finite(-5) < Distance::ZERO);
        assert_eq!(Distance::default(), Distance::Unreachable);
    }

    #[test]
    fn test_distance_extend() {
        assert_eq!(Distance::Finite(3).extend(4).unwrap(), Distance::Finite(7));
        assert_eq!(
            Distance::Unreachable.extend(4).unwrap(),
            Distance::Unreachable
        );
        assert_eq!(Distance::ZERO.increment().unwrap(), Distance::Finite(1));
    }

    #[test]
    fn test_distance_overflow_is_error() {
        let result = Distance::Finite(Weight::MAX).extend(1);
        assert!(matches!(result, Err(GraphError::WeightOverflow)));
    }

    #[test]
    fn test_distance_conversions() {
        assert_eq!(Distance::from(Some(2)), Distance::Finite(2));
        assert_eq!(Distance::from(None), Distance::Unreachable);
        assert_eq!(Distance::Finite(9).finite(), Some(9));
        assert_eq!(Distance::Unreachable.finite(), None);
        assert_eq!(Distance::Unreachable.to_string(), "unreachable");
    }

    #[test]
    fn test_component_id_basics() {
        let c = ComponentId::new(3);
        assert_eq!(c.get(), 3);
        assert!(c.is_assigned());
        assert!(!ComponentId::UNASSIGNED.is_assigned());
    }
}
