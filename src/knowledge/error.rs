//! Defines the error types for the domain-knowledge container.
use crate::scoring::ScoreError;
use crate::store::ShapeError;
use thiserror::Error;

/// The category of a [`KnowledgeError`].
///
/// Lets callers branch on the kind of failure without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A layer or relation is missing, or already exists.
    Configuration,
    /// A dependency table does not fit its layers.
    Shape,
    /// A relation would close a cycle among the layers.
    Structural,
    /// Projection hit an unfilled cell or a repeated variable name.
    Data,
    /// The dependency score could not be computed.
    Numeric,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnowledgeError {
    #[error("Layer '{layer}' already exists; use remove_layer or replace_layer to change it")]
    LayerExists { layer: String },
    #[error("Layer '{layer}' does not exist; use add_layer to add it")]
    LayerNotFound { layer: String },
    #[error("Dependency {independent}->{dependent} already exists; use remove_dependency or set_dependency to modify it")]
    RelationExists { independent: String, dependent: String },
    #[error("Dependency {independent}->{dependent} does not exist; use add_dependency to add it")]
    RelationNotFound { independent: String, dependent: String },
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("Dependency {independent}->{dependent} would make the layer dependencies cyclic")]
    Cycle { independent: String, dependent: String },
    #[error("Dependency table {independent}->{dependent} has no value at ({row}, {col})")]
    UnsetCell { independent: String, dependent: String, row: usize, col: usize },
    #[error("Variable '{variable}' occurs in layer '{layer}' but was already declared by layer '{first_layer}'")]
    DuplicateVariable { variable: String, layer: String, first_layer: String },
    #[error("No column named '{column}' for layer '{layer}'")]
    MissingColumn { column: String, layer: String },
    #[error(transparent)]
    Scoring(#[from] ScoreError),
}

impl KnowledgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KnowledgeError::LayerExists { .. }
            | KnowledgeError::LayerNotFound { .. }
            | KnowledgeError::RelationExists { .. }
            | KnowledgeError::RelationNotFound { .. } => ErrorKind::Configuration,
            KnowledgeError::Shape(_) => ErrorKind::Shape,
            KnowledgeError::Cycle { .. } => ErrorKind::Structural,
            KnowledgeError::UnsetCell { .. }
            | KnowledgeError::DuplicateVariable { .. }
            | KnowledgeError::MissingColumn { .. } => ErrorKind::Data,
            KnowledgeError::Scoring(_) => ErrorKind::Numeric,
        }
    }

    pub(crate) fn layer_not_found(layer: &str) -> Self {
        KnowledgeError::LayerNotFound { layer: layer.to_string() }
    }

    pub(crate) fn relation_not_found(independent: &str, dependent: &str) -> Self {
        KnowledgeError::RelationNotFound {
            independent: independent.to_string(),
            dependent: dependent.to_string(),
        }
    }
}
