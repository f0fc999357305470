use serde::{Deserialize, Serialize};

use crate::error::{DimtableError, Result};

/// A single cell address in row-major linearization of all dimensions.
pub type FlatIndex = usize;

/// Declared lengths of every dimension on both axes.
///
/// Built once per table and never mutated afterwards. Every length is at
/// least one and the total cell count fits in a `usize`, so strides derived
/// from a spec are always non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSpec {
    rdim_lengths: Vec<usize>,
    cdim_lengths: Vec<usize>,
    #[serde(skip)]
    row_cell_count: usize,
    #[serde(skip)]
    col_cell_count: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDimensionSpec {
    #[serde(default)]
    rdim_lengths: Vec<usize>,
    #[serde(default)]
    cdim_lengths: Vec<usize>,
}

impl<'de> Deserialize<'de> for DimensionSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawDimensionSpec::deserialize(deserializer)?;
        Self::new(raw.rdim_lengths, raw.cdim_lengths).map_err(serde::de::Error::custom)
    }
}

impl DimensionSpec {
    /// Create a spec from per-axis dimension lengths.
    ///
    /// # Errors
    /// Returns [`DimtableError::MalformedSpec`] if any length is zero or the
    /// total cell count overflows.
    pub fn new(rdim_lengths: Vec<usize>, cdim_lengths: Vec<usize>) -> Result<Self> {
        let row_cell_count = axis_product("row", &rdim_lengths)?;
        let col_cell_count = axis_product("column", &cdim_lengths)?;
        row_cell_count.checked_mul(col_cell_count).ok_or_else(|| {
            DimtableError::MalformedSpec(format!(
                "{row_cell_count} rows x {col_cell_count} columns overflows the cell count"
            ))
        })?;

        Ok(Self {
            rdim_lengths,
            cdim_lengths,
            row_cell_count,
            col_cell_count,
        })
    }

    /// Lengths of the row dimensions, outermost first.
    #[must_use]
    pub fn rdim_lengths(&self) -> &[usize] {
        &self.rdim_lengths
    }

    /// Lengths of the column dimensions, outermost first.
    #[must_use]
    pub fn cdim_lengths(&self) -> &[usize] {
        &self.cdim_lengths
    }

    /// Number of table rows (product of the row dimension lengths).
    #[must_use]
    pub fn row_cell_count(&self) -> usize {
        self.row_cell_count
    }

    /// Number of table columns (product of the column dimension lengths).
    #[must_use]
    pub fn col_cell_count(&self) -> usize {
        self.col_cell_count
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        // Checked in `new`.
        self.row_cell_count * self.col_cell_count
    }

    /// Whether `index` addresses a cell of this table.
    #[must_use]
    pub fn contains(&self, index: FlatIndex) -> bool {
        index < self.cell_count()
    }
}

/// Product of dimension lengths, rejecting zero entries and overflow.
pub(crate) fn axis_product(axis: &str, lengths: &[usize]) -> Result<usize> {
    lengths.iter().enumerate().try_fold(1usize, |acc, (dim, &len)| {
        if len == 0 {
            return Err(DimtableError::MalformedSpec(format!(
                "{axis} dimension {dim} has zero length"
            )));
        }
        acc.checked_mul(len).ok_or_else(|| {
            DimtableError::MalformedSpec(format!("{axis} dimension lengths overflow"))
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let spec = DimensionSpec::new(vec![2, 3], vec![4]).unwrap();
        assert_eq!(spec.row_cell_count(), 6);
        assert_eq!(spec.col_cell_count(), 4);
        assert_eq!(spec.cell_count(), 24);
        assert!(spec.contains(23));
        assert!(!spec.contains(24));
    }

    #[test]
    fn test_empty_axes_have_one_cell() {
        let spec = DimensionSpec::new(vec![], vec![]).unwrap();
        assert_eq!(spec.cell_count(), 1);
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = DimensionSpec::new(vec![2, 0], vec![3]).unwrap_err();
        assert!(matches!(err, DimtableError::MalformedSpec(_)));
    }

    #[test]
    fn test_overflow_rejected() {
        let err = DimensionSpec::new(vec![usize::MAX], vec![2]).unwrap_err();
        assert!(matches!(err, DimtableError::MalformedSpec(_)));
    }

    #[test]
    fn test_deserialize_validates() {
        let spec: DimensionSpec =
            serde_json::from_str(r#"{"rdimLengths":[2],"cdimLengths":[3]}"#).unwrap();
        assert_eq!(spec.cell_count(), 6);

        let bad = serde_json::from_str::<DimensionSpec>(r#"{"rdimLengths":[0]}"#);
        assert!(bad.is_err());
    }
}
