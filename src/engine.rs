//! Engine entry point used by front ends
//!
//! A request carries the two raw state bounds and the aggregation mode.
//! Bounds are checked before any random draw is taken, so a rejected
//! request leaves the randomness source untouched and yields no graph.

use crate::error::{CascadeError, Result};
use crate::generator::{generate, GeneratorConfig};
use crate::graph::Graph;
use crate::propagation::{propagate, AggregationMode, PropagationConfig, RootSeed, ValueRange};
use crate::random::RandomSource;
use log::info;
use serde::{Deserialize, Serialize};

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeRequest {
    /// Upper state limit, must not be zero
    pub upper_bound: i64,
    /// Lower state limit, must not be zero
    pub lower_bound: i64,
    pub mode: AggregationMode,
    pub root_seed: RootSeed,
    pub generator: GeneratorConfig,
}

impl CascadeRequest {
    /// Request with the default root seed and graph shape
    pub fn new(upper_bound: i64, lower_bound: i64, mode: AggregationMode) -> Self {
        Self {
            upper_bound,
            lower_bound,
            mode,
            root_seed: RootSeed::default(),
            generator: GeneratorConfig::default(),
        }
    }

    /// Build a request from raw text fields, as a form would supply them
    pub fn parse(upper: &str, lower: &str, mode: &str) -> Result<Self> {
        let upper_bound = parse_bound(upper)?;
        let lower_bound = parse_bound(lower)?;
        Ok(Self::new(upper_bound, lower_bound, mode.parse()?))
    }

    pub fn with_root_seed(mut self, root_seed: RootSeed) -> Self {
        self.root_seed = root_seed;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Noise range `[-|lower|, |upper|]`; fails if either bound is zero
    pub fn value_range(&self) -> Result<ValueRange> {
        ValueRange::from_bounds(self.upper_bound, self.lower_bound)
    }

    /// Check everything that can be rejected, without drawing
    pub fn validate(&self) -> Result<PropagationConfig> {
        let range = self.value_range()?;
        self.root_seed.validate()?;
        self.generator.validate()?;
        Ok(PropagationConfig::new(range, self.mode).with_root_seed(self.root_seed.clone()))
    }
}

/// Parse one integer bound, surrounding whitespace allowed
pub fn parse_bound(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CascadeError::NonIntegerInput(raw.to_string()))
}

/// Validate, generate and propagate. The returned graph is final.
pub fn run<R>(request: &CascadeRequest, rng: &mut R) -> Result<Graph>
where
    R: RandomSource + ?Sized,
{
    let config = request.validate()?;
    info!(
        "Cascade run: bounds upper={} lower={} mode={}",
        request.upper_bound, request.lower_bound, request.mode
    );
    let skeleton = generate(&request.generator, rng)?;
    propagate(skeleton, &config, rng)
}
