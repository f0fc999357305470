use serde::{Deserialize, Serialize};

/// Position of one cell: an index per row dimension and per column
/// dimension, outermost dimension first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCoordinate {
    pub row_indexes: Vec<usize>,
    pub col_indexes: Vec<usize>,
}

impl CellCoordinate {
    pub fn new(row_indexes: Vec<usize>, col_indexes: Vec<usize>) -> Self {
        Self {
            row_indexes,
            col_indexes,
        }
    }
}

impl From<(Vec<usize>, Vec<usize>)> for CellCoordinate {
    fn from((row_indexes, col_indexes): (Vec<usize>, Vec<usize>)) -> Self {
        Self::new(row_indexes, col_indexes)
    }
}
