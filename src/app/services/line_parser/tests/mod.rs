//! Test utilities for tabular line parser testing
//!
//! This module provides fixture builders shared across the parser test
//! modules.

use crate::app::models::RawLine;

// Test modules
mod columns_tests;
mod parser_tests;

/// Table heading as printed at the top of each page
pub const HEADING: &str = "Region  State  Site Name  Site ID  EPA ID  Address  City  Zip  County  Federal Facility  Native Entity  Latitude  Longitude  NPL Status Date";

/// A well-formed row with the eight mandatory columns only
pub fn mandatory_row(n: usize) -> String {
    format!(
        "{:02}  MA  Acme Landfill {}  {:07}  MAD{:09}  {} Industrial Way  New Bedford  02740",
        n % 10 + 1,
        n,
        n,
        n,
        n
    )
}

/// A well-formed row with all fourteen columns
pub fn full_row(n: usize) -> String {
    format!(
        "{}  Bristol  No  No  41.6{:03}  -70.9{:03}  09/08/1983",
        mandatory_row(n),
        n % 1000,
        n % 1000
    )
}

/// A row too short to carry the mandatory columns
pub fn malformed_row(n: usize) -> String {
    format!("05  OH  Truncated Row {}", n)
}

/// Lay out rows over pages of `per_page` data lines, each page starting
/// with the table heading
pub fn paginate(rows: Vec<String>, per_page: usize) -> Vec<RawLine> {
    let mut lines = Vec::new();
    for (page_index, chunk) in rows.chunks(per_page).enumerate() {
        let page = page_index as u32 + 1;
        lines.push(RawLine::new(page, 1, HEADING));
        for (i, row) in chunk.iter().enumerate() {
            lines.push(RawLine::new(page, i as u32 + 2, row.clone()));
        }
    }
    lines
}

/// Known-good fixture: `valid` rows with `malformed` rows spread among them
pub fn fixture(valid: usize, malformed: usize) -> Vec<RawLine> {
    let mut rows: Vec<String> = (0..valid).map(full_row).collect();
    for i in 0..malformed {
        let position = (i * 7 + 3).min(rows.len());
        rows.insert(position, malformed_row(i));
    }
    paginate(rows, 40)
}
