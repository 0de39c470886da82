//! Graph nodes and edges

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node, assigned in generation order starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node created
    pub const ROOT: NodeId = NodeId(0);

    /// Get the raw ID value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Position of this node in id-ordered storage
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed edge from a node in layer i to a node in layer i+1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

/// A node with its realized state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Generation layer, 0 for the root
    pub layer: usize,
    /// Aggregate of ancestor values the node was derived from (0 for the root)
    pub parent_sum: i64,
    pub value: i64,
}

impl Node {
    /// Noise that was added on top of the aggregate
    pub fn noise(&self) -> i64 {
        self.value - self.parent_sum
    }

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }
}
