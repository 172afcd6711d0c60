use super::error::ShapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directional dependency score, or the marker left when the forward
/// score was too weak to be worth comparing with the backward one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Score {
    Scored(f64),
    InsufficientEvidence,
}

impl Score {
    /// `InsufficientEvidence` never meets a threshold, whatever its value.
    #[inline]
    pub fn meets(&self, threshold: f64) -> bool {
        match self {
            Score::Scored(v) => *v >= threshold,
            Score::InsufficientEvidence => false,
        }
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score::Scored(value)
    }
}

/// A table entry. `None` means the cell has not been filled yet.
pub type Cell = Option<Score>;

/// Identifies the relation `independent -> dependent` between two layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationKey {
    pub independent: String,
    pub dependent: String,
}

impl RelationKey {
    pub fn new(independent: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self { independent: independent.into(), dependent: dependent.into() }
    }
}

impl fmt::Display for RelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.independent, self.dependent)
    }
}

/// Dense row-major matrix of cells.
///
/// Row `i` belongs to the i-th variable of the independent layer, column `j`
/// to the j-th variable of the dependent layer. Zero rows or columns are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct DependencyTable {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl DependencyTable {
    /// A `rows x cols` table with every cell unset.
    pub fn unset(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![None; rows * cols] }
    }

    /// Builds a table from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().skip(1).find(|(_, r)| r.len() != cols) {
            return Err(ShapeError::Ragged { row, expected: cols, actual: r.len() });
        }
        let n_rows = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { rows: n_rows, cols, cells })
    }

    /// Builds a fully scored table from plain numbers.
    pub fn from_scores(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        Self::from_rows(
            rows.into_iter()
                .map(|r| r.into_iter().map(|v| Some(Score::Scored(v))).collect())
                .collect(),
        )
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn shape(&self) -> (usize, usize) { (self.rows, self.cols) }

    /// Returns `None` when `(row, col)` lies outside the table.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Overwrites one cell, returning its previous content.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<Cell, ShapeError> {
        if row >= self.rows || col >= self.cols {
            return Err(ShapeError::OutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(std::mem::replace(&mut self.cells[row * self.cols + col], cell))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.rows).map(move |r| &self.cells[r * self.cols..(r + 1) * self.cols])
    }

    /// True once every cell has been filled.
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(<[Cell]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for DependencyTable {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<DependencyTable> for Vec<Vec<Cell>> {
    fn from(table: DependencyTable) -> Self {
        table.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_evidence_never_meets_threshold() {
        for threshold in [f64::NEG_INFINITY, -1.0, 0.0, 0.5] {
            assert!(!Score::InsufficientEvidence.meets(threshold));
        }
        assert!(Score::Scored(-0.2).meets(-0.5));
        assert!(Score::Scored(0.6).meets(0.6));
        assert!(!Score::Scored(0.59).meets(0.6));
    }

    #[test]
    fn test_unset_table_allows_empty_dimensions() {
        let table = DependencyTable::unset(0, 3);
        assert_eq!(table.shape(), (0, 3));
        assert_eq!(table.iter_rows().count(), 0);
        assert!(table.is_filled());

        let table = DependencyTable::unset(2, 0);
        assert_eq!(table.iter_rows().map(<[Cell]>::len).collect::<Vec<_>>(), vec![0, 0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = DependencyTable::from_rows(vec![vec![None, None], vec![None], vec![None, None]]).unwrap_err();
        assert_eq!(err, ShapeError::Ragged { row: 1, expected: 2, actual: 1 });
    }

    #[test]
    fn test_cells_are_row_major() {
        let table = DependencyTable::from_scores(vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]).unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.get(1, 0), Some(&Some(Score::Scored(0.4))));
        assert_eq!(table.get(0, 2), Some(&Some(Score::Scored(0.3))));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 3), None);
        assert_eq!(table.iter_rows().nth(1).map(<[Cell]>::len), Some(3));
    }

    #[test]
    fn test_set_replaces_single_cell() {
        let mut table = DependencyTable::unset(2, 2);
        assert!(!table.is_filled());
        assert_eq!(table.set(1, 1, Some(Score::Scored(0.9))), Ok(None));
        assert_eq!(table.get(1, 1), Some(&Some(Score::Scored(0.9))));
        assert_eq!(
            table.set(2, 0, None),
            Err(ShapeError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 2 })
        );
    }

    #[test]
    fn test_serializes_as_nested_rows() {
        let table = DependencyTable::from_rows(vec![vec![Some(Score::Scored(0.5)), Some(Score::InsufficientEvidence), None]])
            .unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!([[{ "Scored": 0.5 }, "InsufficientEvidence", null]]));

        let ragged: Result<DependencyTable, _> = serde_json::from_str("[[null], []]");
        assert!(ragged.is_err());
    }

    #[test]
    fn test_relation_key_display() {
        let key = RelationKey::new("Education", "Production");
        assert_eq!(key.to_string(), "Education->Production");
    }
}
