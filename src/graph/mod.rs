//! Layered cascade graph
//!
//! The graph is built in two steps. The generator produces a `Skeleton`
//! (layers and edges, no values); the propagator takes it by value and
//! returns a `Graph` whose nodes carry `value` and `parent_sum`.

mod node;
mod skeleton;
mod valued;

pub use node::{Edge, Node, NodeId};
pub use skeleton::Skeleton;
pub use valued::Graph;
