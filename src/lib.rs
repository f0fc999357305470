//! dimtable - multi-dimensional editable tables for the web
//!
//! A dimtable has a row axis and a column axis, each made of any number of
//! dimensions. Cells are addressed by a flat index or by one index per
//! dimension; this crate provides:
//! - Mixed-radix conversion between the two (`indexer`)
//! - Arrow/tab navigation that skips read-only cells (`navigation`)
//! - Declarations read from the host page's hidden fields (`declaration`)
//! - Table markup with grouped row and column headers (`render`)
//! - An editing session and, on wasm32, a DOM binding (`editor`)
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DimTable } from 'dimtable';
//! await init();
//! const table = new DimTable(document.querySelector('table.dimtable'));
//! ```

pub mod declaration;
pub mod dim_iter;
pub mod editor;
pub mod error;
pub mod indexer;
pub mod layout;
pub mod navigation;
pub mod render;
pub mod types;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use editor::DimTable;

pub use error::{DimtableError, Result};
pub use indexer::{coordinate_to_flat_index, flat_index_to_coordinate};
pub use navigation::{find_next_editable_flat_index, Direction};
pub use types::*;

/// Decode a flat index into `{ rowIndexes, colIndexes }`.
///
/// # Errors
/// Returns an error if the lengths are malformed or `flat` is out of range.
#[wasm_bindgen(js_name = "flatIndexToCoordinate")]
pub fn flat_index_to_coordinate_js(
    flat: usize,
    rdim_lengths: Vec<usize>,
    cdim_lengths: Vec<usize>,
) -> std::result::Result<JsValue, JsValue> {
    let spec = DimensionSpec::new(rdim_lengths, cdim_lengths)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let coord =
        flat_index_to_coordinate(flat, &spec).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&coord)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Encode per-dimension indexes as a flat index.
///
/// # Errors
/// Returns an error if the lengths are malformed or any index is out of
/// range.
#[wasm_bindgen(js_name = "coordinateToFlatIndex")]
pub fn coordinate_to_flat_index_js(
    row_indexes: Vec<usize>,
    col_indexes: Vec<usize>,
    rdim_lengths: Vec<usize>,
    cdim_lengths: Vec<usize>,
) -> std::result::Result<usize, JsValue> {
    let spec = DimensionSpec::new(rdim_lengths, cdim_lengths)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    coordinate_to_flat_index(&CellCoordinate::new(row_indexes, col_indexes), &spec)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
