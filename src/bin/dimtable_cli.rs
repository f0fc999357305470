//! CLI tool for dimtable - lists every cell of a declared table as JSON,
//! or renders the table markup
//!
//! Usage:
//!   dimtable_cli <declaration.json>                     # Output JSON to stdout
//!   dimtable_cli <declaration.json> -o out.json         # Output JSON to file
//!   dimtable_cli <declaration.json> --html [-o out.html] # Output table HTML
//!
//! The declaration is `{"prefix": "table", "rdimLengths": [..], "cdimLengths": [..]}`
//! with an optional `"labels": {"cornerTitle": .., "rowDims": [[..]], "colDims": [[..]]}`.
//! Set `RUST_LOG=debug` for diagnostics.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use dimtable::declaration::TableDeclaration;
use dimtable::indexer::flat_index_to_coordinate;
use dimtable::render::{render, TableLabels};
use dimtable::{CellCoordinate, DimensionSpec};

#[derive(Deserialize)]
struct CliInput {
    #[serde(flatten)]
    declaration: TableDeclaration,
    #[serde(default)]
    labels: Option<TableLabels>,
}

#[derive(Serialize)]
struct CellListing {
    flat: usize,
    id: String,
    #[serde(flatten)]
    coordinate: CellCoordinate,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: dimtable_cli <declaration.json> [--html] [-o output]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let html = args.iter().skip(2).any(|a| a == "--html");
    let output_path = args
        .iter()
        .skip(2)
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 3));

    // Read declaration
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let input: CliInput = match serde_json::from_str(&text) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing declaration: {}", e);
            std::process::exit(1);
        }
    };

    let spec = match input.declaration.spec() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid declaration: {}", e);
            std::process::exit(1);
        }
    };

    let output = if html {
        render_html(&input, &spec)
    } else {
        list_cells(&input.declaration, &spec)
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.as_bytes()).unwrap();
            handle.write_all(b"\n").unwrap();
        }
    }
}

/// Table markup with empty, all-editable cells.
fn render_html(input: &CliInput, spec: &DimensionSpec) -> String {
    let labels = input
        .labels
        .clone()
        .unwrap_or_else(|| TableLabels::numbered(spec));
    match render(&input.declaration, &labels, |_| String::new(), |_| true) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error rendering table: {}", e);
            std::process::exit(1);
        }
    }
}

/// Every cell's flat index, element id and coordinate as JSON.
fn list_cells(declaration: &TableDeclaration, spec: &DimensionSpec) -> String {
    let mut cells = Vec::with_capacity(spec.cell_count());
    for flat in 0..spec.cell_count() {
        match flat_index_to_coordinate(flat, spec) {
            Ok(coordinate) => cells.push(CellListing {
                flat,
                id: declaration.cell_id(flat),
                coordinate,
            }),
            Err(e) => {
                eprintln!("Error decoding cell {}: {}", flat, e);
                std::process::exit(1);
            }
        }
    }

    match serde_json::to_string_pretty(&cells) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    }
}
