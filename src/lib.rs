//! Layered domain-knowledge models.
//!
//! Variables are grouped into named layers, layers are linked by dependency
//! relations forming a DAG, and every relation carries a table scoring how
//! strongly each dependent variable depends on each independent one. The
//! tables are thresholded into an acyclic graph over individual variables,
//! ready to be turned into a probabilistic network elsewhere.

pub mod config;
pub mod graph;
pub mod knowledge;
pub mod projection;
pub mod scoring;
pub mod store;

pub use config::{LayerSpec, ModelLayout, ProjectionConfig, RelationSpec, ScoringConfig};
pub use knowledge::{build_from_columns, DomainKnowledge, ErrorKind, KnowledgeError};
pub use projection::{project, VariableGraph};
pub use scoring::{score, score_matrix, score_matrix_default, shift_by, ScoreError, Series, DEFAULT_MINIMUM};
pub use store::{Cell, DependencyTable, RelationKey, Score, ShapeError};
