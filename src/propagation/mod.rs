//! Cascade Propagator: assigns values to a generated skeleton
//!
//! The root takes a value from the root-seed policy. Every other node is
//! visited layer by layer, so all of its ancestors are final before it is
//! read. A node's parent sum is the sum of its predecessor values (direct
//! mode) or of its whole ancestor closure (all mode), and its value is that
//! sum plus non-zero noise from the configured range.

mod policy;

pub use policy::{AggregationMode, RootSeed, ValueRange, MAX_BOUND};

use crate::error::{CascadeError, Result};
use crate::graph::{Graph, Node, NodeId, Skeleton};
use crate::random::RandomSource;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Everything the propagator needs besides the skeleton and randomness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationConfig {
    pub range: ValueRange,
    pub mode: AggregationMode,
    pub root_seed: RootSeed,
}

impl PropagationConfig {
    pub fn new(range: ValueRange, mode: AggregationMode) -> Self {
        Self {
            range,
            mode,
            root_seed: RootSeed::default(),
        }
    }

    pub fn with_root_seed(mut self, root_seed: RootSeed) -> Self {
        self.root_seed = root_seed;
        self
    }
}

/// Parent sum of `id` given the nodes finalized so far; `None` on overflow
fn parent_sum(skeleton: &Skeleton, done: &[Node], id: NodeId, mode: AggregationMode) -> Option<i64> {
    let value_of = |ancestor: NodeId| {
        debug_assert!(ancestor.index() < done.len(), "ancestor {} not yet propagated", ancestor);
        done[ancestor.index()].value
    };
    match mode {
        AggregationMode::DirectPredecessors => skeleton
            .predecessors(id)
            .iter()
            .try_fold(0i64, |acc, &p| acc.checked_add(value_of(p))),
        AggregationMode::AllPredecessors => skeleton
            .ancestors(id)
            .into_iter()
            .try_fold(0i64, |acc, a| acc.checked_add(value_of(a))),
    }
}

/// Take ownership of a skeleton and return the fully valued graph
pub fn propagate<R>(skeleton: Skeleton, config: &PropagationConfig, rng: &mut R) -> Result<Graph>
where
    R: RandomSource + ?Sized,
{
    config.root_seed.validate()?;

    let mut nodes: Vec<Node> = Vec::with_capacity(skeleton.node_count());
    nodes.push(Node {
        id: skeleton.root(),
        layer: 0,
        parent_sum: 0,
        value: config.root_seed.draw(rng)?,
    });
    debug!("Root value: {}", nodes[0].value);

    for (layer, ids) in skeleton.layers().iter().enumerate().skip(1) {
        for &id in ids {
            let sum = parent_sum(&skeleton, &nodes, id, config.mode)
                .ok_or(CascadeError::ValueOverflow { node: id })?;
            let noise = config.range.draw_noise(rng);
            let value = sum
                .checked_add(noise)
                .ok_or(CascadeError::ValueOverflow { node: id })?;
            nodes.push(Node {
                id,
                layer,
                parent_sum: sum,
                value,
            });
        }
    }

    let graph = Graph::from_parts(skeleton, nodes);
    info!("Propagated ({}, noise {}): {}", config.mode, config.range, graph.summary());
    Ok(graph)
}
