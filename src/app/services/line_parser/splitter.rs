//! Line classification and column splitting

use super::columns::ColumnSet;
use crate::constants::{HEADER_MARKER, HEADER_PREFIX};
use regex::Regex;
use std::sync::LazyLock;

/// Two or more consecutive whitespace characters separate columns
static COLUMN_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("column gap pattern is valid"));

/// Blank lines and repeated table headings carry no data
pub fn is_header_or_blank(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.starts_with(HEADER_PREFIX) || trimmed.contains(HEADER_MARKER)
}

/// Split a line into columns on runs of two or more whitespace characters
///
/// Leading and trailing whitespace is ignored; single spaces stay inside
/// a column value.
pub fn split_columns(text: &str) -> ColumnSet {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ColumnSet::default();
    }
    COLUMN_GAP.split(trimmed).collect()
}
