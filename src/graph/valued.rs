//! Finalized graph: skeleton plus realized node values

use super::node::{Edge, Node, NodeId};
use super::skeleton::Skeleton;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// A fully propagated cascade graph. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    #[serde(flatten)]
    skeleton: Skeleton,
    /// Valued nodes, indexed by id
    nodes: Vec<Node>,
}

impl Graph {
    /// Assemble a graph. `nodes` must hold one entry per skeleton node in id order.
    pub(crate) fn from_parts(skeleton: Skeleton, nodes: Vec<Node>) -> Self {
        debug_assert_eq!(skeleton.node_count(), nodes.len());
        debug_assert!(nodes.iter().enumerate().all(|(i, n)| n.id.index() == i));
        Self { skeleton, nodes }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn layers(&self) -> &[Vec<NodeId>] {
        self.skeleton.layers()
    }

    pub fn edges(&self) -> &[Edge] {
        self.skeleton.edges()
    }

    /// Nodes of one layer, in layer order
    pub fn layer_nodes(&self, index: usize) -> Vec<&Node> {
        self.skeleton
            .layer(index)
            .unwrap_or(&[])
            .iter()
            .filter_map(|&id| self.node(id))
            .collect()
    }

    /// Sum of values over the given ids
    pub fn sum_of(&self, ids: impl IntoIterator<Item = NodeId>) -> i64 {
        ids.into_iter()
            .filter_map(|id| self.node(id))
            .map(|n| n.value)
            .sum()
    }

    /// SHA-256 over node states and edges. Equal graphs give equal fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for node in &self.nodes {
            hasher.update(node.id.raw().to_le_bytes());
            hasher.update((node.layer as u64).to_le_bytes());
            hasher.update(node.parent_sum.to_le_bytes());
            hasher.update(node.value.to_le_bytes());
        }
        hasher.update(b"edges");
        for edge in self.skeleton.edges() {
            hasher.update(edge.source.raw().to_le_bytes());
            hasher.update(edge.target.raw().to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }

    pub fn summary(&self) -> String {
        let positive = self.nodes.iter().filter(|n| n.value > 0).count();
        let negative = self.nodes.iter().filter(|n| n.value < 0).count();
        format!(
            "Graph | {} nodes | {} edges | layers={:?} | root={} | positive={} negative={} neutral={}",
            self.nodes.len(),
            self.skeleton.edges().len(),
            self.skeleton.layer_sizes(),
            self.root().value,
            positive,
            negative,
            self.nodes.len() - positive - negative
        )
    }
}
