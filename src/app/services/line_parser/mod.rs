//! Tabular line parser for whitespace-aligned NPL table text
//!
//! This module recovers site records from lines of text that were laid out
//! as a table: either text pulled from a PDF's positioned words or the raw
//! output of OCR. Both paths feed the same parser so the OCR path is a
//! drop-in substitute for direct text extraction.
//!
//! ## Architecture
//!
//! - [`splitter`] - Header/blank detection and two-or-more-space column splitting
//! - [`columns`] - The declared column contract and positional field mapping
//! - [`tolerance`] - Extension point for reshaping noisy column sets
//! - [`parser`] - Per-line orchestration and the gated parse
//! - [`sanity`] - Plausible record count band
//! - [`stats`] - Aggregated records, failures and counts for one run
//!
//! ## Known limitation
//!
//! A column value containing two consecutive spaces cannot be told apart
//! from a column boundary. Such a row gains an extra column and every
//! later field shifts one position to the right.
//!
//! ## Usage
//!
//! ```rust
//! use npl_ingest::app::services::line_parser::{LineParser, SanityBand};
//! use npl_ingest::RawLine;
//!
//! let parser = LineParser::new(SanityBand::new(1, 10));
//! let lines = vec![
//!     RawLine::new(1, 1, "Region  State  Site Name  Site ID  EPA ID  Address  City  Zip"),
//!     RawLine::new(1, 2, "01  MA  Acme Landfill  0101  MAD000000001  1 Main St  Boston  02101"),
//! ];
//! let result = parser.parse(&lines);
//! assert_eq!(result.records().len(), 1);
//! assert_eq!(result.lines_processed(), 1);
//! ```

pub mod columns;
pub mod parser;
pub mod sanity;
pub mod splitter;
pub mod stats;
pub mod tolerance;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columns::{ColumnSet, ColumnSpec, MANDATORY_COLUMNS, SITE_COLUMNS, SiteField};
pub use parser::{LineOutcome, LineParser};
pub use sanity::SanityBand;
pub use stats::ParseResult;
pub use tolerance::{ColumnTolerance, Exact};
