//! Common test utilities for dimtable integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use dimtable::DimensionSpec;

/// Build a spec that is known to be valid.
#[must_use]
pub fn spec(rows: &[usize], cols: &[usize]) -> DimensionSpec {
    DimensionSpec::new(rows.to_vec(), cols.to_vec()).expect("valid dimension spec")
}

/// A handful of table shapes covering empty axes, single and nested
/// dimensions, and unit-length dimensions.
#[must_use]
pub fn sample_specs() -> Vec<DimensionSpec> {
    vec![
        spec(&[], &[]),
        spec(&[4], &[]),
        spec(&[], &[5]),
        spec(&[2], &[3]),
        spec(&[2, 2], &[2]),
        spec(&[3, 1, 2], &[2, 4]),
        spec(&[1], &[1, 1, 1]),
        spec(&[2, 3], &[4, 2, 3]),
    ]
}
