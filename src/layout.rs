//! Header geometry for multi-dimensional tables.
//!
//! A header cell for dimension `ix` spans every combination of the
//! dimensions nested inside it, and a header row for dimension `ix` repeats
//! its items once per combination of the dimensions outside it.

use crate::error::{Axis, DimtableError, Result};
use crate::types::axis_product;

/// Row- or column-span of a header cell for dimension `ix`.
///
/// # Errors
/// Returns [`DimtableError::OutOfRange`] if `ix` is not a dimension of the
/// axis and [`DimtableError::MalformedSpec`] if the nested lengths contain a
/// zero or their product overflows.
pub fn span(axis: Axis, lengths: &[usize], ix: usize) -> Result<usize> {
    let inner = lengths.get(ix.saturating_add(1)..).ok_or(DimtableError::OutOfRange {
        axis,
        dim: ix,
        value: ix,
        length: lengths.len(),
    })?;
    axis_product(&axis.to_string(), inner)
}

/// How many times the items of dimension `ix` repeat across a header row.
///
/// # Errors
/// Returns [`DimtableError::OutOfRange`] if `ix` is not a dimension of the
/// axis and [`DimtableError::MalformedSpec`] if the outer lengths contain a
/// zero or their product overflows.
pub fn repeat_count(axis: Axis, lengths: &[usize], ix: usize) -> Result<usize> {
    let outer = lengths.get(..ix).filter(|_| ix < lengths.len()).ok_or(
        DimtableError::OutOfRange {
            axis,
            dim: ix,
            value: ix,
            length: lengths.len(),
        },
    )?;
    axis_product(&axis.to_string(), outer)
}
