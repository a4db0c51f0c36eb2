//! Core tabular line parser
//!
//! Walks the lines of one run in order and sorts each into a skipped
//! header, a site record, or a parse failure. Malformed rows never abort
//! the run; only the sanity gate does.

use tracing::{debug, info};

use super::columns::{MANDATORY_COLUMNS, SITE_COLUMNS, map_columns};
use super::sanity::SanityBand;
use super::splitter::{is_header_or_blank, split_columns};
use super::stats::ParseResult;
use super::tolerance::{ColumnTolerance, Exact};
use crate::Result;
use crate::app::models::{ParseFailure, RawLine, SiteRecord};

/// What one line turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Header or blank artifact
    Skipped,
    Record(SiteRecord),
    Failure(ParseFailure),
}

/// Tabular line parser shared by the PDF text and OCR paths
#[derive(Debug, Clone)]
pub struct LineParser<T: ColumnTolerance = Exact> {
    band: SanityBand,
    tolerance: T,
}

impl LineParser<Exact> {
    /// Create a parser that splits columns exactly
    pub fn new(band: SanityBand) -> Self {
        Self {
            band,
            tolerance: Exact,
        }
    }
}

impl<T: ColumnTolerance> LineParser<T> {
    /// Swap in a different column tolerance
    pub fn with_tolerance<U: ColumnTolerance>(self, tolerance: U) -> LineParser<U> {
        LineParser {
            band: self.band,
            tolerance,
        }
    }

    pub fn band(&self) -> SanityBand {
        self.band
    }

    /// Classify a single line
    pub fn parse_line(&self, raw: &RawLine) -> LineOutcome {
        if is_header_or_blank(&raw.text) {
            return LineOutcome::Skipped;
        }

        let columns = self.tolerance.reconcile(split_columns(&raw.text));

        match map_columns(&columns) {
            Some(record) => {
                if columns.len() > SITE_COLUMNS.len() {
                    debug!(
                        "Page {}, line {}: ignoring {} extra columns",
                        raw.page,
                        raw.line,
                        columns.len() - SITE_COLUMNS.len()
                    );
                }
                LineOutcome::Record(record)
            }
            None => {
                debug!(
                    "Page {}, line {}: {} columns, need {}",
                    raw.page,
                    raw.line,
                    columns.len(),
                    MANDATORY_COLUMNS
                );
                LineOutcome::Failure(ParseFailure::from(raw))
            }
        }
    }

    /// Parse all lines of a run, preserving input order
    ///
    /// Pure with respect to its input; the sanity gate is not applied.
    pub fn parse(&self, lines: &[RawLine]) -> ParseResult {
        let mut result = ParseResult::new();

        for raw in lines {
            match self.parse_line(raw) {
                LineOutcome::Skipped => result.note_skipped(),
                LineOutcome::Record(record) => result.push_record(record),
                LineOutcome::Failure(failure) => result.push_failure(failure),
            }
        }

        info!(
            "Parsed {} records with {} malformed rows from {} lines ({} skipped)",
            result.records().len(),
            result.failures().len(),
            result.lines_processed(),
            result.lines_skipped()
        );

        result
    }

    /// Parse and then apply the sanity gate
    ///
    /// An out-of-band record count fails the whole run.
    pub fn parse_checked(&self, lines: &[RawLine], source_label: &str) -> Result<ParseResult> {
        let result = self.parse(lines);
        result.ensure_within(&self.band, source_label)?;
        Ok(result)
    }
}
