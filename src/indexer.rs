//! Conversion between flat cell indexes and multi-dimensional coordinates.
//!
//! Each axis is a mixed-radix number whose digits are the dimension indexes
//! (outermost dimension most significant). The flat index is the row number
//! times the column cell count plus the column number.

use log::trace;

use crate::error::{Axis, DimtableError, Result};
use crate::types::{CellCoordinate, DimensionSpec, FlatIndex};

/// Encode a coordinate as its flat index.
///
/// # Errors
/// Returns [`DimtableError::ArityMismatch`] if a tuple does not have one
/// entry per dimension and [`DimtableError::OutOfRange`] if any component
/// is not below its dimension length.
pub fn coordinate_to_flat_index(coord: &CellCoordinate, spec: &DimensionSpec) -> Result<FlatIndex> {
    let row = encode_axis(Axis::Row, &coord.row_indexes, spec.rdim_lengths())?;
    let col = encode_axis(Axis::Col, &coord.col_indexes, spec.cdim_lengths())?;
    // Both parts are in bounds, so the result is below `cell_count`.
    Ok(row * spec.col_cell_count() + col)
}

/// Decode a flat index into its coordinate.
///
/// Column dimensions are peeled off least significant first, then the
/// remaining quotient is decoded over the row dimensions.
///
/// # Errors
/// Returns [`DimtableError::IndexOutOfRange`] if `flat` is not below the
/// cell count.
pub fn flat_index_to_coordinate(flat: FlatIndex, spec: &DimensionSpec) -> Result<CellCoordinate> {
    if !spec.contains(flat) {
        return Err(DimtableError::IndexOutOfRange {
            index: flat,
            cell_count: spec.cell_count(),
        });
    }

    let mut rest = flat;
    let col_indexes = decode_axis(&mut rest, spec.cdim_lengths());
    let row_indexes = decode_axis(&mut rest, spec.rdim_lengths());
    trace!("flat {flat} -> rows {row_indexes:?} cols {col_indexes:?}");

    Ok(CellCoordinate {
        row_indexes,
        col_indexes,
    })
}

/// Mixed-radix value of one axis tuple, validated against its lengths.
fn encode_axis(axis: Axis, indexes: &[usize], lengths: &[usize]) -> Result<usize> {
    if indexes.len() != lengths.len() {
        return Err(DimtableError::ArityMismatch {
            axis,
            expected: lengths.len(),
            actual: indexes.len(),
        });
    }

    // Horner form: value = ((i0 * L1 + i1) * L2 + i2) ...
    indexes
        .iter()
        .zip(lengths)
        .enumerate()
        .try_fold(0usize, |acc, (dim, (&value, &length))| {
            if value >= length {
                return Err(DimtableError::OutOfRange {
                    axis,
                    dim,
                    value,
                    length,
                });
            }
            Ok(acc * length + value)
        })
}

/// Take one axis' digits off `rest`, leaving the carried quotient behind.
fn decode_axis(rest: &mut usize, lengths: &[usize]) -> Vec<usize> {
    let mut indexes: Vec<usize> = lengths
        .iter()
        .rev()
        .map(|&length| {
            let digit = *rest % length;
            *rest /= length;
            digit
        })
        .collect();
    indexes.reverse();
    indexes
}
