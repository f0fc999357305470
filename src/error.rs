//! Structured error types for dimtable.
//!
//! Every failure is local and synchronous: the core either returns a value
//! or one of these, never a clamped or wrapped result.

/// Which axis of the table a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Col,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Col => f.write_str("column"),
        }
    }
}

/// All errors that can occur in dimtable indexing, navigation and binding.
#[derive(Debug, thiserror::Error)]
pub enum DimtableError {
    /// Flat index outside `[0, cell_count)`.
    #[error("flat index {index} out of range (cell count {cell_count})")]
    IndexOutOfRange { index: usize, cell_count: usize },

    /// Coordinate component not below its dimension length.
    #[error("{axis} index {value} out of range for dimension {dim} of length {length}")]
    OutOfRange {
        axis: Axis,
        dim: usize,
        value: usize,
        length: usize,
    },

    /// Coordinate tuple does not have one entry per dimension.
    #[error("{axis} coordinate has {actual} entries, expected {expected}")]
    ArityMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// Dimension lengths that cannot describe a table.
    #[error("Malformed dimension spec: {0}")]
    MalformedSpec(String),

    /// Missing or unparsable table declaration field.
    #[error("Table declaration: {0}")]
    Declaration(String),

    /// Cell element id that does not name a cell of this table.
    #[error("Invalid cell id: {0}")]
    CellId(String),

    /// Cell is not editable, so it cannot be opened for input.
    #[error("Cell {0} is not editable")]
    NotEditable(usize),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DimtableError>;

#[cfg(target_arch = "wasm32")]
impl From<DimtableError> for wasm_bindgen::JsValue {
    fn from(e: DimtableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
