//! Directional dependency scores between paired, partially observed series.
pub mod dependency;
pub mod error;
pub mod series;

pub use dependency::{score, score_matrix, score_matrix_default, DEFAULT_MINIMUM};
pub use error::ScoreError;
pub use series::{observed_pairs, shift_by, Series};
