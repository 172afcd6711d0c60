//! dependency.rs
//! Regression-based directional dependency between two series.
//!
//! The score of `y` on `x` is `1 - STE / mean(y)`, where STE is the standard
//! error of estimate of the simple linear regression of `y` on `x`:
//! `sqrt((Syy - Sxy^2 / Sxx) / (n - 2))`. Only rows where both series are
//! observed take part in any of the sums.

use super::error::ScoreError;
use super::series::observed_pairs;
use crate::store::{Cell, DependencyTable, Score};
use tracing::debug;

/// Forward scores at or below this value are recorded as insufficient evidence.
pub const DEFAULT_MINIMUM: f64 = 0.5;

/// Computes how strongly `y` depends on `x`, in `[0, 1]`.
///
/// A regression error larger than the mean of `y`, or a negative mean, puts
/// the raw value outside that range; it is reported rather than clamped.
///
/// # Errors
/// - [`ScoreError::LengthMismatch`] if the series differ in length.
/// - [`ScoreError::InsufficientObservations`] with fewer than 3 observed pairs.
/// - [`ScoreError::ZeroVariance`] if `x` is constant over the observed pairs.
/// - [`ScoreError::ZeroMean`] if `y` averages to zero over the observed pairs.
/// - [`ScoreError::NonFinite`] if the inputs drive the arithmetic to NaN or infinity.
/// - [`ScoreError::OutOfRange`] if the result falls outside `[0, 1]`.
pub fn score(x: &[Option<f64>], y: &[Option<f64>]) -> Result<f64, ScoreError> {
    if x.len() != y.len() {
        return Err(ScoreError::LengthMismatch { independent: x.len(), dependent: y.len() });
    }

    // 1. Means over the observed pairs
    let (n, sum_x, sum_y, sum_x2) = observed_pairs(x, y).fold(
        (0usize, 0.0, 0.0, 0.0),
        |(n, sx, sy, sx2), (xi, yi)| (n + 1, sx + xi, sy + yi, sx2 + xi * xi),
    );
    if n <= 2 {
        return Err(ScoreError::InsufficientObservations { observed: n });
    }
    let count = n as f64;
    let mean_x = sum_x / count;
    let mean_y = sum_y / count;

    // 2. Centered sums of squares and cross products
    let (sxx, syy, sxy) = observed_pairs(x, y).fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (xi, yi)| {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
    });

    if ![sxx, syy, sxy, mean_y].iter().all(|v| v.is_finite()) {
        return Err(ScoreError::NonFinite);
    }
    // Two-pass residue on a constant column is of order eps^2 * x^2.
    if sxx <= f64::EPSILON * f64::EPSILON * sum_x2 {
        return Err(ScoreError::ZeroVariance);
    }
    if mean_y == 0.0 {
        return Err(ScoreError::ZeroMean);
    }

    // 3. Standard error of estimate
    let residual = (syy - sxy * sxy / sxx).max(0.0);
    let ste = (residual / (count - 2.0)).sqrt();
    let raw = 1.0 - ste / mean_y;
    if !raw.is_finite() {
        return Err(ScoreError::NonFinite);
    }

    if !(0.0..=1.0).contains(&raw) {
        debug!(raw, observed = n, "dependency score outside [0, 1]");
        return Err(ScoreError::OutOfRange { raw });
    }
    Ok(raw)
}

/// Scores every (independent, dependent) pair of two groups of series.
///
/// Cell `(i, j)` holds `score(I[i], D[j]) - score(D[j], I[i])` when the
/// forward score exceeds `minimum`, and [`Score::InsufficientEvidence`]
/// otherwise. The backward score is only computed when it is needed.
pub fn score_matrix<I, D>(
    independent: &[I],
    dependent: &[D],
    minimum: f64,
) -> Result<DependencyTable, ScoreError>
where
    I: AsRef<[Option<f64>]>,
    D: AsRef<[Option<f64>]>,
{
    let rows = independent.len();
    let cols = dependent.len();
    let mut cells: Vec<Cell> = Vec::with_capacity(rows * cols);

    for (i, x) in independent.iter().enumerate() {
        for (j, y) in dependent.iter().enumerate() {
            let (x, y) = (x.as_ref(), y.as_ref());
            let forward = score(x, y).map_err(|e| e.at_cell(i, j))?;
            let cell = if forward > minimum {
                let backward = score(y, x).map_err(|e| e.at_cell(i, j))?;
                Score::Scored(forward - backward)
            } else {
                Score::InsufficientEvidence
            };
            cells.push(Some(cell));
        }
    }

    debug!(rows, cols, minimum, "scored dependency matrix");
    Ok(DependencyTable::from_parts(rows, cols, cells))
}

/// [`score_matrix`] with the [`DEFAULT_MINIMUM`] forward score.
pub fn score_matrix_default<I, D>(independent: &[I], dependent: &[D]) -> Result<DependencyTable, ScoreError>
where
    I: AsRef<[Option<f64>]>,
    D: AsRef<[Option<f64>]>,
{
    score_matrix(independent, dependent, DEFAULT_MINIMUM)
}
