//! Table markup tests for dimtable
//!
//! Header spans and repeats, grouped body rows, and the cell ids and
//! classes the browser binding reads back.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::HashMap;

use dimtable::declaration::{parse_cell_id, TableDeclaration};
use dimtable::render::{render, TableLabels};

// ============================================================================
// Helper Functions
// ============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// 2 x 2 row dimensions, one column dimension of 2.
fn grouped_table() -> (TableDeclaration, TableLabels) {
    let decl = TableDeclaration::new(vec![2, 2], vec![2]);
    let labels = TableLabels {
        corner_title: "Year".to_string(),
        row_dims: vec![strings(&["a", "b"]), strings(&["x", "y"])],
        col_dims: vec![strings(&["c1", "c2"])],
    };
    (decl, labels)
}

// ============================================================================
// Header
// ============================================================================

#[test]
fn test_corner_and_column_header() {
    let (decl, labels) = grouped_table();
    let html = render(&decl, &labels, |_| String::new(), |_| true).unwrap();
    assert!(html.contains(
        r#"<tr><th rowspan="1" colspan="2">Year</th><th colspan="1">c1</th><th colspan="1">c2</th></tr>"#
    ));
}

#[test]
fn test_nested_column_headers_span_and_repeat() {
    let decl = TableDeclaration::new(vec![1], vec![2, 3]);
    let labels = TableLabels::numbered(&decl.spec().unwrap());
    let html = render(&decl, &labels, |_| String::new(), |_| true).unwrap();

    // Outer dimension: two headers each spanning the three inner columns.
    assert!(html.contains(r#"<th colspan="3">1</th><th colspan="3">2</th></tr>"#));
    // Inner dimension: its three headers repeat under each outer header.
    assert!(html.contains(
        r#"<tr><th colspan="1">1</th><th colspan="1">2</th><th colspan="1">3</th><th colspan="1">1</th><th colspan="1">2</th><th colspan="1">3</th></tr>"#
    ));
}

// ============================================================================
// Body
// ============================================================================

#[test]
fn test_grouped_rows() {
    let (decl, labels) = grouped_table();
    let html = render(&decl, &labels, |flat| flat.to_string(), |flat| flat != 3).unwrap();

    let rows: Vec<&str> = html
        .lines()
        .filter(|l| l.starts_with("<tr class"))
        .collect();
    assert_eq!(
        rows,
        vec![
            r#"<tr class="first-of-group"><th rowspan="2">a</th><th rowspan="1">x</th><td id="table_cell_0" class="editable">0</td><td id="table_cell_1" class="editable">1</td></tr>"#,
            r#"<tr class="last-of-group"><th rowspan="1">y</th><td id="table_cell_2" class="editable">2</td><td id="table_cell_3">3</td></tr>"#,
            r#"<tr class="first-of-group"><th rowspan="2">b</th><th rowspan="1">x</th><td id="table_cell_4" class="editable">4</td><td id="table_cell_5" class="editable">5</td></tr>"#,
            r#"<tr class="last-of-group"><th rowspan="1">y</th><td id="table_cell_6" class="editable">6</td><td id="table_cell_7" class="editable">7</td></tr>"#,
        ]
    );
}

#[test]
fn test_values_are_escaped() {
    let decl = TableDeclaration::new(vec![1], vec![1]);
    let labels = TableLabels::numbered(&decl.spec().unwrap());
    let html = render(&decl, &labels, |_| "<b>".to_string(), |_| false).unwrap();
    assert!(html.contains(r#"<td id="table_cell_0">&lt;b&gt;</td>"#));
}

#[test]
fn test_markup_reads_back() {
    let decl = TableDeclaration::new(vec![3], vec![2, 2]);
    let labels = TableLabels::numbered(&decl.spec().unwrap());
    let html = render(&decl, &labels, |_| String::new(), |flat| flat % 2 == 0).unwrap();

    // Hidden declaration inputs.
    let mut fields = HashMap::new();
    for line in html.lines().filter(|l| l.starts_with("<input")) {
        let name = line.split("name=\"").nth(1).unwrap().split('"').next().unwrap();
        let value = line.split("value=\"").nth(1).unwrap().split('"').next().unwrap();
        fields.insert(name.to_string(), value.to_string());
    }
    let back = TableDeclaration::from_fields("table", |n| fields.get(n).cloned()).unwrap();
    assert_eq!(back, decl);

    // Every cell appears exactly once, editable ones marked.
    let mut editable = Vec::new();
    let mut seen = Vec::new();
    for td in html.split("<td id=\"").skip(1) {
        let id = td.split('"').next().unwrap();
        let flat = parse_cell_id("table", id).unwrap();
        seen.push(flat);
        if td.starts_with(&format!("{id}\" class=\"editable\"")) {
            editable.push(flat);
        }
    }
    assert_eq!(seen, (0..12).collect::<Vec<_>>());
    assert_eq!(editable, vec![0, 2, 4, 6, 8, 10]);
}
