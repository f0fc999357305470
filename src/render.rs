//! HTML markup for a dimtable.
//!
//! Produces the page fragment the browser binding expects: the hidden
//! declaration inputs, a header block with one row per column dimension,
//! and one body row per row-index tuple whose `<td>` ids carry the flat
//! index. Editable cells get the `editable` class.

use serde::{Deserialize, Serialize};

use crate::declaration::TableDeclaration;
use crate::dim_iter::DimIter;
use crate::error::{Axis, DimtableError, Result};
use crate::layout::{repeat_count, span};
use crate::types::{DimensionSpec, FlatIndex};

/// Class of the `<table>` element.
pub const TABLE_CLASS: &str = "dimtable";
/// Class marking cells that can be opened for input.
pub const EDITABLE_CLASS: &str = "editable";

/// Header text of every dimension item, outermost dimension first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLabels {
    #[serde(default)]
    pub corner_title: String,
    #[serde(default)]
    pub row_dims: Vec<Vec<String>>,
    #[serde(default)]
    pub col_dims: Vec<Vec<String>>,
}

impl TableLabels {
    /// Labels `1..=n` for every dimension of `spec`.
    #[must_use]
    pub fn numbered(spec: &DimensionSpec) -> Self {
        let number = |lengths: &[usize]| -> Vec<Vec<String>> {
            lengths
                .iter()
                .map(|&len| (1..=len).map(|n| n.to_string()).collect())
                .collect()
        };
        Self {
            corner_title: String::new(),
            row_dims: number(spec.rdim_lengths()),
            col_dims: number(spec.cdim_lengths()),
        }
    }

    fn check(&self, spec: &DimensionSpec) -> Result<()> {
        check_axis(Axis::Row, &self.row_dims, spec.rdim_lengths())?;
        check_axis(Axis::Col, &self.col_dims, spec.cdim_lengths())
    }
}

fn check_axis(axis: Axis, labels: &[Vec<String>], lengths: &[usize]) -> Result<()> {
    if labels.len() != lengths.len() {
        return Err(DimtableError::Declaration(format!(
            "{axis} labels cover {} dimensions, table has {}",
            labels.len(),
            lengths.len()
        )));
    }
    for (dim, (items, &len)) in labels.iter().zip(lengths).enumerate() {
        if items.len() != len {
            return Err(DimtableError::Declaration(format!(
                "{axis} dimension {dim} has {} labels for {len} items",
                items.len()
            )));
        }
    }
    Ok(())
}

fn label(dims: &[Vec<String>], dim: usize, item: usize) -> &str {
    dims.get(dim)
        .and_then(|items| items.get(item))
        .map_or("", String::as_str)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the full table fragment.
///
/// `cell_value` gives the text of each cell and `is_editable` decides which
/// cells the browser binding lets the user open.
///
/// # Errors
/// Returns [`DimtableError::MalformedSpec`] for invalid lengths and
/// [`DimtableError::Declaration`] if the labels do not match the lengths.
pub fn render<V, E>(
    declaration: &TableDeclaration,
    labels: &TableLabels,
    cell_value: V,
    is_editable: E,
) -> Result<String>
where
    V: Fn(FlatIndex) -> String,
    E: Fn(FlatIndex) -> bool,
{
    let spec = declaration.spec()?;
    labels.check(&spec)?;

    let mut out = declaration.hidden_inputs();
    out.push_str(&format!("\n<table class=\"{TABLE_CLASS}\">\n"));
    out.push_str(&thead(&spec, labels)?);
    out.push_str(&tbody(declaration, &spec, labels, &cell_value, &is_editable)?);
    out.push_str("<tfoot>\n</tfoot>\n</table>");
    Ok(out)
}

/// One header row per column dimension; the first also holds the corner.
fn thead(spec: &DimensionSpec, labels: &TableLabels) -> Result<String> {
    let col_lengths = spec.cdim_lengths();
    let row_dim_count = spec.rdim_lengths().len();
    if col_lengths.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::from("<thead>\n");
    for dim in 0..col_lengths.len() {
        out.push_str("<tr>");
        if dim == 0 && row_dim_count > 0 {
            out.push_str(&format!(
                "<th rowspan=\"{}\" colspan=\"{row_dim_count}\">{}</th>",
                col_lengths.len(),
                escape(&labels.corner_title)
            ));
        }

        let colspan = span(Axis::Col, col_lengths, dim)?;
        let mut items = String::new();
        for text in labels.col_dims.get(dim).into_iter().flatten() {
            items.push_str(&format!("<th colspan=\"{colspan}\">{}</th>", escape(text)));
        }
        out.push_str(&items.repeat(repeat_count(Axis::Col, col_lengths, dim)?));
        out.push_str("</tr>\n");
    }
    out.push_str("</thead>\n");
    Ok(out)
}

/// Body rows in row-index order. Each row starts with headers for the
/// dimensions that changed since the previous row.
fn tbody<V, E>(
    declaration: &TableDeclaration,
    spec: &DimensionSpec,
    labels: &TableLabels,
    cell_value: &V,
    is_editable: &E,
) -> Result<String>
where
    V: Fn(FlatIndex) -> String,
    E: Fn(FlatIndex) -> bool,
{
    let row_lengths = spec.rdim_lengths();
    let use_groups = row_lengths.len() > 1;
    let col_count = spec.col_cell_count();

    let mut out = String::from("<tbody>\n");
    let mut rows = DimIter::new(row_lengths);
    let mut first_changed = 0;
    let mut row = 0usize;
    while !rows.is_end() {
        let class = if !use_groups {
            ""
        } else if rows.is_first_of_group() {
            " class=\"first-of-group\""
        } else if rows.is_last_of_group() {
            " class=\"last-of-group\""
        } else {
            ""
        };
        out.push_str(&format!("<tr{class}>"));

        for (dim, &item) in rows.get().iter().enumerate().skip(first_changed) {
            out.push_str(&format!(
                "<th rowspan=\"{}\">{}</th>",
                span(Axis::Row, row_lengths, dim)?,
                escape(label(&labels.row_dims, dim, item))
            ));
        }

        let first_cell = row * col_count;
        for flat in first_cell..first_cell + col_count {
            let class = if is_editable(flat) {
                format!(" class=\"{EDITABLE_CLASS}\"")
            } else {
                String::new()
            };
            out.push_str(&format!(
                "<td id=\"{}\"{class}>{}</td>",
                declaration.cell_id(flat),
                escape(&cell_value(flat))
            ));
        }
        out.push_str("</tr>\n");

        match rows.advance() {
            Some(dim) => first_changed = dim,
            None => break,
        }
        row += 1;
    }
    out.push_str("</tbody>\n");
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn test_label_count_mismatch() {
        let decl = TableDeclaration::new(vec![2], vec![3]);
        let mut labels = TableLabels::numbered(&decl.spec().unwrap());
        labels.col_dims = vec![vec!["x".to_string()]];
        let err = render(&decl, &labels, |_| String::new(), |_| true).unwrap_err();
        assert!(matches!(err, DimtableError::Declaration(_)));
    }

    #[test]
    fn test_no_column_dimensions_has_no_header() {
        let decl = TableDeclaration::new(vec![2], vec![]);
        let labels = TableLabels::numbered(&decl.spec().unwrap());
        let html = render(&decl, &labels, |_| String::new(), |_| true).unwrap();
        assert!(!html.contains("<thead>"));
        assert!(html.contains(
            r#"<tr><th rowspan="1">2</th><td id="table_cell_1" class="editable"></td></tr>"#
        ));
    }
}
