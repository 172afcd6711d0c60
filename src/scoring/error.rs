//! Defines the error types for the scoring module.
use thiserror::Error;

/// Numeric failures of the dependency score.
///
/// The score is undefined on degenerate input; every such case is reported
/// here instead of leaking NaN or infinity into a dependency table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("Series lengths differ: independent has {independent} values, dependent has {dependent}")]
    LengthMismatch { independent: usize, dependent: usize },
    #[error("Only {observed} fully observed pairs; at least 3 are required")]
    InsufficientObservations { observed: usize },
    #[error("Independent series has zero variance over the observed pairs")]
    ZeroVariance,
    #[error("Dependent series has a zero mean over the observed pairs")]
    ZeroMean,
    #[error("Score arithmetic produced a non-finite value")]
    NonFinite,
    #[error("Score {raw} lies outside [0, 1]")]
    OutOfRange { raw: f64 },
    #[error("Scoring cell ({row}, {col}) failed: {source}")]
    Cell {
        row: usize,
        col: usize,
        #[source]
        source: Box<ScoreError>,
    },
}

impl ScoreError {
    pub(crate) fn at_cell(self, row: usize, col: usize) -> Self {
        ScoreError::Cell { row, col, source: Box::new(self) }
    }
}
