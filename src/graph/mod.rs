//! Layer-level structure: which layers depend on which.
pub mod layers;
pub mod topology;

// Re-export key types for convenient access
pub use layers::LayerGraph;
pub use topology::{is_acyclic, topological_order, CycleError};
