//! Graph Generator: builds the random layered skeleton
//!
//! Layer `i` holds `1 + rand(0..=i) + i` nodes, so the root layer is a single
//! node and the graph widens like a funnel. Every node outside the root layer
//! draws `min(|previous layer|, rand(min_parents..=max_parents))` distinct
//! predecessors from the layer directly above it.

use crate::error::{CascadeError, Result};
use crate::graph::{NodeId, Skeleton};
use crate::random::{sample_from, RandomSource};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Deepest graph a config may ask for
pub const MAX_LAYERS: usize = 12;

/// Shape limits for generated graphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Fewest layers, root layer included
    pub min_layers: usize,
    /// Most layers, root layer included
    pub max_layers: usize,
    /// Lower bound of the fan-in draw
    pub min_parents: usize,
    /// Upper bound of the fan-in draw
    pub max_parents: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_layers: 4,
            max_layers: 6,
            min_parents: 2,
            max_parents: 4,
        }
    }
}

impl GeneratorConfig {
    /// Always four layers; small enough to read in a terminal
    pub fn compact() -> Self {
        Self {
            min_layers: 4,
            max_layers: 4,
            ..Self::default()
        }
    }

    /// Deeper graphs with heavier fan-in
    pub fn dense() -> Self {
        Self {
            min_layers: 6,
            max_layers: 8,
            min_parents: 3,
            max_parents: 5,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_layers == 0 {
            return Err(CascadeError::InvalidConfig("min_layers must be at least 1".into()));
        }
        if self.max_layers > MAX_LAYERS {
            return Err(CascadeError::InvalidConfig(format!(
                "max_layers ({}) exceeds the supported depth {}",
                self.max_layers, MAX_LAYERS
            )));
        }
        if self.min_layers > self.max_layers {
            return Err(CascadeError::InvalidConfig(format!(
                "min_layers ({}) exceeds max_layers ({})",
                self.min_layers, self.max_layers
            )));
        }
        if self.min_parents == 0 {
            return Err(CascadeError::InvalidConfig("min_parents must be at least 1".into()));
        }
        if self.min_parents > self.max_parents {
            return Err(CascadeError::InvalidConfig(format!(
                "min_parents ({}) exceeds max_parents ({})",
                self.min_parents, self.max_parents
            )));
        }
        Ok(())
    }
}

/// Draw the size of every layer, root layer first
fn draw_layer_sizes<R>(config: &GeneratorConfig, rng: &mut R) -> Vec<usize>
where
    R: RandomSource + ?Sized,
{
    let num_layers = rng.int_in_range(config.min_layers as i64, config.max_layers as i64) as usize;
    (0..num_layers)
        .map(|i| 1 + rng.int_in_range(0, i as i64) as usize + i)
        .collect()
}

/// Build a random layered skeleton
pub fn generate<R>(config: &GeneratorConfig, rng: &mut R) -> Result<Skeleton>
where
    R: RandomSource + ?Sized,
{
    config.validate()?;

    let sizes = draw_layer_sizes(config, rng);
    debug!("Layer sizes: {:?}", sizes);

    let mut skeleton = Skeleton::rooted();
    let mut previous: Vec<NodeId> = vec![skeleton.root()];

    for (index, &size) in sizes.iter().enumerate().skip(1) {
        let parent_sets: Vec<Vec<NodeId>> = (0..size)
            .map(|_| {
                let fan_in = rng.int_in_range(config.min_parents as i64, config.max_parents as i64);
                let num_parents = previous.len().min(fan_in as usize);
                sample_from(rng, &previous, num_parents)
            })
            .collect();

        previous = skeleton.push_layer(&parent_sets)?.to_vec();
        debug!("Layer {}: {} nodes", index, previous.len());
    }

    info!(
        "Generated skeleton: {} layers, {} nodes, {} edges",
        skeleton.layer_count(),
        skeleton.node_count(),
        skeleton.edges().len()
    );
    Ok(skeleton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{EntropySource, MinimalSource};

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!((config.min_layers, config.max_layers), (4, 6));
        assert_eq!((config.min_parents, config.max_parents), (2, 4));
        assert!(config.validate().is_ok());
        assert!(GeneratorConfig::compact().validate().is_ok());
        assert!(GeneratorConfig::dense().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let backwards = GeneratorConfig { min_layers: 5, max_layers: 4, ..GeneratorConfig::default() };
        assert!(matches!(backwards.validate(), Err(CascadeError::InvalidConfig(_))));

        let no_parents = GeneratorConfig { min_parents: 0, ..GeneratorConfig::default() };
        assert!(no_parents.validate().is_err());

        let too_deep = GeneratorConfig { max_layers: MAX_LAYERS + 1, ..GeneratorConfig::default() };
        assert!(matches!(too_deep.validate(), Err(CascadeError::InvalidConfig(_))));

        let mut rng = MinimalSource;
        assert!(generate(&backwards, &mut rng).is_err());
    }

    #[test]
    fn test_minimal_source_shape() {
        let skeleton = generate(&GeneratorConfig::default(), &mut MinimalSource).unwrap();
        assert_eq!(skeleton.layer_sizes(), vec![1, 2, 3, 4]);

        // Layer 1 can only see the root; later layers take the first two
        // nodes of the layer above.
        assert_eq!(skeleton.predecessors(NodeId::from(1)), &[NodeId::ROOT]);
        assert_eq!(skeleton.predecessors(NodeId::from(2)), &[NodeId::ROOT]);
        for id in 3..=5 {
            assert_eq!(
                skeleton.predecessors(NodeId::from(id)),
                &[NodeId::from(1), NodeId::from(2)]
            );
        }
        for id in 6..=9 {
            assert_eq!(
                skeleton.predecessors(NodeId::from(id)),
                &[NodeId::from(3), NodeId::from(4)]
            );
        }
    }

    #[test]
    fn test_random_shapes_stay_in_bounds() {
        let config = GeneratorConfig::default();
        for seed in 0..200 {
            let skeleton = generate(&config, &mut EntropySource::seeded(seed)).unwrap();
            let sizes = skeleton.layer_sizes();
            assert!((4..=6).contains(&sizes.len()));
            assert_eq!(sizes[0], 1);
            for (i, &size) in sizes.iter().enumerate() {
                assert!(size >= 1 + i && size <= 1 + 2 * i, "layer {} has {} nodes", i, size);
            }
        }
    }

    #[test]
    fn test_compact_preset_fixes_depth() {
        for seed in 0..20 {
            let skeleton = generate(&GeneratorConfig::compact(), &mut EntropySource::seeded(seed)).unwrap();
            assert_eq!(skeleton.layer_count(), 4);
        }
    }
}
