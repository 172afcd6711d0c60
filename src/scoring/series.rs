//! series.rs
//! Nullable numeric columns. `None` is the single representation of a
//! missing observation everywhere in the crate.

/// One column of observations, one entry per source row.
pub type Series = Vec<Option<f64>>;

/// Yields the positions where both series are observed (pairwise deletion).
///
/// Iteration stops at the shorter of the two inputs; callers that care about
/// equal lengths check before calling.
pub fn observed_pairs<'a>(
    x: &'a [Option<f64>],
    y: &'a [Option<f64>],
) -> impl Iterator<Item = (f64, f64)> + 'a {
    x.iter().zip(y).filter_map(|(xi, yi)| Some(((*xi)?, (*yi)?)))
}

/// Returns a copy of `series` delayed by `lag` rows.
///
/// The first `lag` positions become missing and the last `lag` observations
/// fall off the end, so the result has the same length as the input. This is
/// how "previous period" columns are derived from a time-ordered column.
pub fn shift_by(series: &[Option<f64>], lag: usize) -> Series {
    let kept = series.len().saturating_sub(lag);
    std::iter::repeat(None)
        .take(series.len() - kept)
        .chain(series[..kept].iter().copied())
        .collect()
}
