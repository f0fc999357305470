//! Browser-side checks of the JS exports. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use dimtable::{coordinate_to_flat_index_js, flat_index_to_coordinate_js, CellCoordinate};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_coordinate_to_flat_index_export() {
    let flat = coordinate_to_flat_index_js(vec![1, 0], vec![1], vec![2, 2], vec![2]).unwrap();
    assert_eq!(flat, 5);
}

#[wasm_bindgen_test]
fn test_flat_index_to_coordinate_export() {
    let value = flat_index_to_coordinate_js(4, vec![2], vec![3]).unwrap();
    let coord: CellCoordinate = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(coord, CellCoordinate::new(vec![1], vec![1]));
}

#[wasm_bindgen_test]
fn test_out_of_range_is_an_error() {
    assert!(flat_index_to_coordinate_js(6, vec![2], vec![3]).is_err());
}
