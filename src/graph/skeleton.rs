//! Structural skeleton of a layered DAG
//!
//! A skeleton holds nodes, layers and edges but no values. Edges only ever
//! run from one layer to the next, so the structure is acyclic by
//! construction and ids are ancestor-before-descendant.

use super::node::{Edge, NodeId};
use crate::error::{CascadeError, Result};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Layered DAG structure without node values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skeleton {
    /// Node ids per layer, in creation order
    layers: Vec<Vec<NodeId>>,
    edges: Vec<Edge>,
    /// Layer index of every node, indexed by id
    #[serde(skip)]
    layer_of: Vec<usize>,
    /// Direct predecessors of every node, indexed by id
    #[serde(skip)]
    predecessors: Vec<Vec<NodeId>>,
}

impl Skeleton {
    /// A skeleton holding only the root in layer 0
    pub fn rooted() -> Self {
        Self {
            layers: vec![vec![NodeId::ROOT]],
            edges: Vec::new(),
            layer_of: vec![0],
            predecessors: vec![Vec::new()],
        }
    }

    /// Append a layer. Each entry of `parent_sets` creates one node whose
    /// predecessors are the given nodes of the current last layer.
    ///
    /// Returns the ids of the new nodes. Nothing is added if any parent set
    /// is empty, repeats a node, or reaches outside the previous layer.
    pub fn push_layer(&mut self, parent_sets: &[Vec<NodeId>]) -> Result<&[NodeId]> {
        if parent_sets.is_empty() {
            return Err(CascadeError::InvalidConfig("a layer needs at least one node".into()));
        }
        let node_layer = self.layers.len();
        let previous: HashSet<NodeId> = self.layers[node_layer - 1].iter().copied().collect();

        for parents in parent_sets {
            let mut seen = HashSet::new();
            if parents.is_empty() {
                return Err(CascadeError::InvalidConfig(format!(
                    "node in layer {} has no predecessors",
                    node_layer
                )));
            }
            for &parent in parents {
                if !previous.contains(&parent) || !seen.insert(parent) {
                    return Err(CascadeError::InvalidPredecessor { node_layer, parent });
                }
            }
        }

        let mut layer = Vec::with_capacity(parent_sets.len());
        for parents in parent_sets {
            let id = NodeId::from(self.node_count() as u32);
            for &source in parents {
                self.edges.push(Edge { source, target: id });
            }
            self.layer_of.push(node_layer);
            self.predecessors.push(parents.clone());
            layer.push(id);
        }
        self.layers.push(layer);
        Ok(self.layers[node_layer].as_slice())
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node_count(&self) -> usize {
        self.layer_of.len()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// All layers, root layer first
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&[NodeId]> {
        self.layers.get(index).map(Vec::as_slice)
    }

    /// Layer sizes, root layer first
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node ids in ascending order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).map(|i| NodeId::from(i as u32))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.node_count()
    }

    pub fn layer_of(&self, id: NodeId) -> Option<usize> {
        self.layer_of.get(id.index()).copied()
    }

    /// Direct predecessors of a node (empty for the root or unknown ids)
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        self.predecessors
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Direct successors of a node
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .map(|e| e.target)
            .collect()
    }

    /// Every node reachable backwards from `id`, each listed once.
    /// Does not include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> BTreeSet<NodeId> {
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<NodeId> = self.predecessors(id).iter().copied().collect();

        while let Some(node_id) = queue.pop_front() {
            if !visited.insert(node_id) {
                continue;
            }
            queue.extend(self.predecessors(node_id).iter().copied());
        }

        visited
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::rooted()
    }
}
