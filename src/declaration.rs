//! Table declarations: where a table's dimension lengths come from.
//!
//! The host page publishes each axis as hidden form fields,
//!
//! ```text
//! {prefix}_rdim_dimN        number of row dimensions
//! {prefix}_rdim_length_{i}  length of row dimension i
//! {prefix}_cdim_dimN        number of column dimensions
//! {prefix}_cdim_length_{i}  length of column dimension i
//! ```
//!
//! and names every cell element `{prefix}_cell_{flat}`. A declaration can
//! also be supplied directly as JSON.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{DimtableError, Result};
use crate::types::{DimensionSpec, FlatIndex};

/// Prefix used when the host does not configure one.
pub const DEFAULT_PREFIX: &str = "table";

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

/// Per-axis dimension lengths of one table, as declared by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDeclaration {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub rdim_lengths: Vec<usize>,
    #[serde(default)]
    pub cdim_lengths: Vec<usize>,
}

impl TableDeclaration {
    pub fn new(rdim_lengths: Vec<usize>, cdim_lengths: Vec<usize>) -> Self {
        Self {
            prefix: default_prefix(),
            rdim_lengths,
            cdim_lengths,
        }
    }

    /// Parse a declaration from JSON.
    ///
    /// # Errors
    /// Returns [`DimtableError::Json`] if the text is not a declaration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a declaration from the host's hidden form fields.
    ///
    /// `lookup` returns the value of the field with the given name.
    ///
    /// # Errors
    /// Returns [`DimtableError::Declaration`] if a field is missing or is not
    /// a non-negative integer.
    pub fn from_fields<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rdim_lengths = read_axis(prefix, "rdim", &lookup)?;
        let cdim_lengths = read_axis(prefix, "cdim", &lookup)?;
        debug!("declared {prefix}: rows {rdim_lengths:?} cols {cdim_lengths:?}");
        Ok(Self {
            prefix: prefix.to_string(),
            rdim_lengths,
            cdim_lengths,
        })
    }

    /// Validate the lengths into a [`DimensionSpec`].
    ///
    /// # Errors
    /// Returns [`DimtableError::MalformedSpec`] for a zero length or an
    /// overflowing cell count.
    pub fn spec(&self) -> Result<DimensionSpec> {
        DimensionSpec::new(self.rdim_lengths.clone(), self.cdim_lengths.clone())
    }

    /// Hidden `<input>` markup that [`TableDeclaration::from_fields`] reads back.
    #[must_use]
    pub fn hidden_inputs(&self) -> String {
        let mut out = String::from("<!-- BEGIN hidden_data_dimensions -->\n");
        for (tag, lengths) in [("rdim", &self.rdim_lengths), ("cdim", &self.cdim_lengths)] {
            push_hidden(&mut out, &count_field(&self.prefix, tag), lengths.len());
            for (i, len) in lengths.iter().enumerate() {
                push_hidden(&mut out, &length_field(&self.prefix, tag, i), *len);
            }
        }
        out.push_str("<!-- END hidden_data_dimensions -->");
        out
    }

    /// Element id of the cell at `flat`.
    #[must_use]
    pub fn cell_id(&self, flat: FlatIndex) -> String {
        cell_id(&self.prefix, flat)
    }
}

/// Element id of the cell at `flat` in the table named by `prefix`.
#[must_use]
pub fn cell_id(prefix: &str, flat: FlatIndex) -> String {
    format!("{prefix}_cell_{flat}")
}

/// Flat index encoded in a cell element id.
///
/// # Errors
/// Returns [`DimtableError::CellId`] if `id` is not `{prefix}_cell_{n}`
/// with `n` in canonical form (no sign, no leading zeros).
pub fn parse_cell_id(prefix: &str, id: &str) -> Result<FlatIndex> {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix("_cell_"))
        .filter(|digits| is_canonical_number(digits))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| DimtableError::CellId(id.to_string()))
}

fn is_canonical_number(digits: &str) -> bool {
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

fn count_field(prefix: &str, tag: &str) -> String {
    format!("{prefix}_{tag}_dimN")
}

fn length_field(prefix: &str, tag: &str, i: usize) -> String {
    format!("{prefix}_{tag}_length_{i}")
}

fn push_hidden(out: &mut String, name: &str, value: usize) {
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"{name}\" value=\"{value}\" />\n"
    ));
}

fn read_axis<F>(prefix: &str, tag: &str, lookup: &F) -> Result<Vec<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    let count = read_usize(&count_field(prefix, tag), lookup)?;
    (0..count)
        .map(|i| read_usize(&length_field(prefix, tag, i), lookup))
        .collect()
}

fn read_usize<F>(name: &str, lookup: &F) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)
        .ok_or_else(|| DimtableError::Declaration(format!("missing field {name}")))?;
    raw.trim().parse().map_err(|_| {
        DimtableError::Declaration(format!("field {name} is not a count: {raw:?}"))
    })
}
