//! Projection of the layered model onto individual variables.
pub mod projector;
pub mod variable_graph;

pub use projector::project;
pub use variable_graph::VariableGraph;
