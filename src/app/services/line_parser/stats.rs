//! Parse result for one conversion run
//!
//! Records and failures can only be added together with the processed
//! line count, so `records + failures == lines_processed` always holds.

use super::sanity::SanityBand;
use crate::Result;
use crate::app::models::{ParseFailure, SiteRecord};

/// Records, failures and line counts accumulated over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    records: Vec<SiteRecord>,
    failures: Vec<ParseFailure>,
    lines_processed: usize,
    lines_skipped: usize,
}

impl ParseResult {
    /// Create new empty result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_record(&mut self, record: SiteRecord) {
        self.records.push(record);
        self.lines_processed += 1;
    }

    pub fn push_failure(&mut self, failure: ParseFailure) {
        self.failures.push(failure);
        self.lines_processed += 1;
    }

    /// Header and blank lines count toward neither records nor failures
    pub fn note_skipped(&mut self) {
        self.lines_skipped += 1;
    }

    pub fn records(&self) -> &[SiteRecord] {
        &self.records
    }

    pub fn failures(&self) -> &[ParseFailure] {
        &self.failures
    }

    /// Lines that produced either a record or a failure
    pub fn lines_processed(&self) -> usize {
        self.lines_processed
    }

    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_processed == 0 {
            0.0
        } else {
            (self.records.len() as f64 / self.lines_processed as f64) * 100.0
        }
    }

    /// Apply the sanity gate to the record count
    pub fn ensure_within(&self, band: &SanityBand, source_label: &str) -> Result<()> {
        band.check(self.records.len(), source_label)
    }
}
