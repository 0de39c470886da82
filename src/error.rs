//! Errors raised by the cascade engine
//!
//! Almost every failure is input validation. Propagation can additionally
//! report a value that leaves the integer range, which validated bounds
//! keep out of reach.

use crate::graph::NodeId;

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, CascadeError>;

/// Cascade-related errors
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    #[error("State values must not be 0 (upper={upper}, lower={lower})")]
    InvalidBounds { upper: i64, lower: i64 },

    #[error("Please enter valid integer values (got {0:?})")]
    NonIntegerInput(String),

    #[error("Unknown aggregation mode: {0}")]
    UnknownMode(String),

    #[error("Root seed policy has no non-zero candidates")]
    EmptyRootSeed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Node {parent} is not a valid predecessor for a node in layer {node_layer}")]
    InvalidPredecessor { node_layer: usize, parent: NodeId },

    #[error("Value of node {node} overflows the integer range")]
    ValueOverflow { node: NodeId },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
