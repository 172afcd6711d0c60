use super::error::ShapeError;
use super::types::{DependencyTable, RelationKey};
use std::collections::HashMap;

/// Owns one dependency table per relation.
///
/// The store does not know about layers; the caller sizes tables from the
/// live variable counts and keeps the key set in step with the layer graph.
#[derive(Debug, Clone, Default)]
pub struct DependencyTableStore {
    tables: HashMap<RelationKey, DependencyTable>,
}

impl DependencyTableStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(relations: usize) -> Self {
        Self { tables: HashMap::with_capacity(relations) }
    }

    pub fn len(&self) -> usize { self.tables.len() }
    pub fn is_empty(&self) -> bool { self.tables.is_empty() }

    /// Stores an all-unset `rows x cols` table for `key`, returning what was there.
    pub fn init_unset(&mut self, key: RelationKey, rows: usize, cols: usize) -> Option<DependencyTable> {
        self.tables.insert(key, DependencyTable::unset(rows, cols))
    }

    pub fn insert(&mut self, key: RelationKey, table: DependencyTable) -> Option<DependencyTable> {
        self.tables.insert(key, table)
    }

    pub fn remove(&mut self, key: &RelationKey) -> Option<DependencyTable> {
        self.tables.remove(key)
    }

    pub fn get(&self, key: &RelationKey) -> Option<&DependencyTable> {
        self.tables.get(key)
    }

    pub fn get_mut(&mut self, key: &RelationKey) -> Option<&mut DependencyTable> {
        self.tables.get_mut(key)
    }
}

/// Validates `table` against the live sizes of the two layers of `key`.
///
/// Rows must equal the independent layer's variable count. Columns are only
/// observable when there is at least one row; a row-less table is accepted
/// and returned re-shaped to `0 x cols` so stored shapes always match.
pub fn right_size(
    key: &RelationKey,
    table: DependencyTable,
    rows: usize,
    cols: usize,
) -> Result<DependencyTable, ShapeError> {
    if table.rows() != rows {
        return Err(ShapeError::RowCount {
            relation: key.clone(),
            layer: key.independent.clone(),
            expected: rows,
            actual: table.rows(),
        });
    }
    if rows == 0 {
        return Ok(DependencyTable::unset(0, cols));
    }
    if table.cols() != cols {
        return Err(ShapeError::ColumnCount {
            relation: key.clone(),
            layer: key.dependent.clone(),
            expected: cols,
            actual: table.cols(),
        });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Score;
    use rstest::rstest;

    fn key() -> RelationKey { RelationKey::new("A", "B") }

    #[test]
    fn test_init_unset_replaces_existing_table() {
        let mut store = DependencyTableStore::new();
        assert!(store.init_unset(key(), 1, 2).is_none());
        store.get_mut(&key()).unwrap().set(0, 1, Some(Score::Scored(0.8))).unwrap();

        let previous = store.init_unset(key(), 3, 2).unwrap();
        assert_eq!(previous.get(0, 1), Some(&Some(Score::Scored(0.8))));
        assert_eq!(store.get(&key()).unwrap().shape(), (3, 2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_returns_table() {
        let mut store = DependencyTableStore::with_capacity(3);
        store.insert(key(), DependencyTable::unset(1, 1));
        assert!(store.get(&key()).is_some());
        assert!(store.remove(&key()).is_some());
        assert!(store.remove(&key()).is_none());
        assert!(store.is_empty());
    }

    #[rstest]
    #[case(1, 2, true)]
    #[case(2, 2, false)]
    #[case(1, 3, false)]
    fn test_right_size_checks_live_dimensions(#[case] rows: usize, #[case] cols: usize, #[case] ok: bool) {
        let table = DependencyTable::from_scores(vec![vec![0.5, 0.8]]).unwrap();
        assert_eq!(right_size(&key(), table, rows, cols).is_ok(), ok);
    }

    #[test]
    fn test_right_size_names_the_mismatched_layer() {
        let table = DependencyTable::from_scores(vec![vec![0.5, 0.8]]).unwrap();
        match right_size(&key(), table, 1, 3).unwrap_err() {
            ShapeError::ColumnCount { layer, expected, actual, .. } => {
                assert_eq!((layer.as_str(), expected, actual), ("B", 3, 2));
            }
            other => panic!("Wrong error type: {:?}", other),
        }
    }

    #[test]
    fn test_right_size_reshapes_rowless_table() {
        let table = DependencyTable::from_rows(Vec::new()).unwrap();
        let fitted = right_size(&key(), table, 0, 4).unwrap();
        assert_eq!(fitted.shape(), (0, 4));
    }
}
