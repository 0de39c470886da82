//! Cascade: layered random DAGs with cascading value propagation
//!
//! A run generates a random layered DAG whose root seeds a value. Every
//! other node derives its value from the sum over its ancestors plus bounded
//! non-zero noise. The result is revealed layer by layer as stages.

pub mod error;
pub mod random;
pub mod graph;
pub mod generator;
pub mod propagation;
pub mod engine;
pub mod stage;
pub mod layout;
pub mod render;
pub mod report;

pub use error::{CascadeError, Result};
pub use random::{EntropySource, MinimalSource, RandomSource};
pub use graph::{Edge, Graph, Node, NodeId, Skeleton};
pub use generator::{generate, GeneratorConfig};
pub use propagation::{propagate, AggregationMode, PropagationConfig, RootSeed, ValueRange, MAX_BOUND};
pub use engine::{run, CascadeRequest};
pub use stage::{stages, NodeView, Stage, Tone};
pub use layout::{Layout, LayoutConfig, Position};
pub use report::CascadeReport;
