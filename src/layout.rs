//! Deterministic 2-D placement of nodes
//!
//! Layers stack downwards from the root; nodes inside a layer are centered
//! on x = 0 and evenly spaced.

use crate::graph::{NodeId, Skeleton};
use serde::{Deserialize, Serialize};

/// Spacing used when placing nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between neighbours in a layer
    pub x_gap: f64,
    /// Vertical distance between layers
    pub y_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_gap: 1.5,
            y_step: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Positions of every node, indexed by id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    positions: Vec<Position>,
}

impl Layout {
    pub fn compute(skeleton: &Skeleton, config: &LayoutConfig) -> Self {
        let mut positions = vec![Position { x: 0.0, y: 0.0 }; skeleton.node_count()];
        for (i, layer) in skeleton.layers().iter().enumerate() {
            let x_offset = -((layer.len() as f64) - 1.0) * config.x_gap / 2.0;
            for (j, id) in layer.iter().enumerate() {
                positions[id.index()] = Position {
                    x: x_offset + j as f64 * config.x_gap,
                    y: -(i as f64) * config.y_step,
                };
            }
        }
        Self { positions }
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.positions.get(id.index()).copied()
    }

    /// Smallest box holding every node, as `(min, max)` corners
    pub fn bounds(&self) -> (Position, Position) {
        let mut min = Position { x: 0.0, y: 0.0 };
        let mut max = Position { x: 0.0, y: 0.0 };
        for p in &self.positions {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_are_centered() {
        let mut skeleton = Skeleton::rooted();
        skeleton
            .push_layer(&[vec![NodeId::ROOT], vec![NodeId::ROOT], vec![NodeId::ROOT]])
            .unwrap();
        let layout = Layout::compute(&skeleton, &LayoutConfig::default());

        assert_eq!(layout.position(NodeId::ROOT), Some(Position { x: 0.0, y: 0.0 }));
        assert_eq!(layout.position(NodeId::from(1)), Some(Position { x: -1.5, y: -1.5 }));
        assert_eq!(layout.position(NodeId::from(2)), Some(Position { x: 0.0, y: -1.5 }));
        assert_eq!(layout.position(NodeId::from(3)), Some(Position { x: 1.5, y: -1.5 }));
        assert_eq!(layout.position(NodeId::from(4)), None);

        let (min, max) = layout.bounds();
        assert_eq!((min.x, min.y, max.x, max.y), (-1.5, -1.5, 1.5, 0.0));
    }
}
