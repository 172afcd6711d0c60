//! Defines the error types for dependency table shapes.
use super::types::RelationKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Dependency table is not rectangular: row 0 has {expected} columns, but row {row} has {actual}")]
    Ragged { row: usize, expected: usize, actual: usize },
    #[error("Dependency table for {relation} has {actual} rows, but layer '{layer}' has {expected} variables")]
    RowCount { relation: RelationKey, layer: String, expected: usize, actual: usize },
    #[error("Dependency table for {relation} has {actual} columns, but layer '{layer}' has {expected} variables")]
    ColumnCount { relation: RelationKey, layer: String, expected: usize, actual: usize },
    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} dependency table")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
}
