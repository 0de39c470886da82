//! Staged reveal of a propagated graph
//!
//! Stage 0 shows only the root (the entrant). Stage k activates layers
//! 0..=k. Inactive nodes are drawn neutral with no label.

use crate::graph::{Graph, Node, NodeId};
use serde::Serialize;

/// Display class derived from the sign of a node value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

impl Tone {
    pub fn of(value: i64) -> Self {
        match value {
            0 => Tone::Neutral,
            v if v > 0 => Tone::Positive,
            _ => Tone::Negative,
        }
    }

    /// Fill color used by the plotted renderers
    pub fn color(&self) -> &'static str {
        match self {
            Tone::Neutral => "grey",
            Tone::Positive => "lightblue",
            Tone::Negative => "red",
        }
    }

    /// Single-character marker for terminal output
    pub fn marker(&self) -> char {
        match self {
            Tone::Neutral => '.',
            Tone::Positive => '+',
            Tone::Negative => '-',
        }
    }
}

/// How a single node looks in one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub layer: usize,
    pub active: bool,
    pub tone: Tone,
    /// `"{parent_sum}\n{value}"`, or just `"{value}"` for the root; empty while inactive
    pub label: String,
}

impl NodeView {
    fn inactive(node: &Node) -> Self {
        Self {
            id: node.id,
            layer: node.layer,
            active: false,
            tone: Tone::Neutral,
            label: String::new(),
        }
    }

    fn active(node: &Node) -> Self {
        Self {
            id: node.id,
            layer: node.layer,
            active: true,
            tone: Tone::of(node.value),
            label: label(node),
        }
    }
}

/// Label text of an activated node
pub fn label(node: &Node) -> String {
    if node.is_root() {
        format!("{}", node.value)
    } else {
        format!("{}\n{}", node.parent_sum, node.value)
    }
}

/// One frame of the cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub index: usize,
    pub title: String,
    /// Number of activated layers, counted from the root layer
    pub active_layers: usize,
    /// Every node of the graph in id order
    pub nodes: Vec<NodeView>,
}

impl Stage {
    /// Stage `index` of `graph`. Indices past the last layer activate everything.
    pub fn build(graph: &Graph, index: usize) -> Self {
        let title = if index == 0 {
            "Initial Graph (Only Entrant Active)".to_string()
        } else {
            format!("Activating Layer {}", index)
        };
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| {
                if node.layer <= index {
                    NodeView::active(node)
                } else {
                    NodeView::inactive(node)
                }
            })
            .collect();

        Self {
            index,
            title,
            active_layers: (index + 1).min(graph.layers().len()),
            nodes,
        }
    }

    pub fn view(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.get(id.index())
    }

    pub fn active_count(&self) -> usize {
        self.nodes.iter().filter(|v| v.active).count()
    }
}

/// All stages of a graph, one per layer
pub fn stages(graph: &Graph) -> Vec<Stage> {
    (0..graph.layers().len())
        .map(|index| Stage::build(graph, index))
        .collect()
}
