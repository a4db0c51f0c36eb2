//! Output artifacts: the normalized JSON document and anomaly logs
//!
//! JSON is pretty-printed with two-space indentation. Logs list one entry
//! per line, then a blank line, a `---` separator and a one-line summary.
//! Parent directories are created as needed.

use crate::app::models::SiteDocument;
use crate::app::services::line_parser::{ParseResult, SanityBand};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }
    }
    Ok(())
}

/// Serialize a value as pretty JSON to `path`
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;

    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| Error::json(format!("Failed to write {}", path.display()), e))?;
    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush {}", path.display()), e))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Render entries followed by the separator and summary line
pub fn format_log(entries: &[String], summary: &str) -> String {
    format!("{}\n\n---\n{}\n", entries.join("\n"), summary)
}

/// Write a log only when there is something to report
///
/// Returns whether a file was written.
pub fn write_log(entries: &[String], summary: &str, path: &Path) -> Result<bool> {
    if entries.is_empty() {
        return Ok(false);
    }

    ensure_parent_dir(path)?;
    fs::write(path, format_log(entries, summary))
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    info!("Logged {} anomalies to {}", entries.len(), path.display());
    Ok(true)
}

/// Summary line of a parse error log
pub fn parse_error_summary(result: &ParseResult) -> String {
    format!(
        "Total malformed rows: {} out of {} lines processed",
        result.failures().len(),
        result.lines_processed()
    )
}

/// Write the malformed rows of a parse, if any
pub fn write_parse_errors(result: &ParseResult, path: &Path) -> Result<bool> {
    let entries: Vec<String> = result.failures().iter().map(ToString::to_string).collect();
    write_log(&entries, &parse_error_summary(result), path)
}

/// Outcome of converting one table source into a site document
#[derive(Debug, Clone, PartialEq)]
pub struct TableConversion {
    pub national_count: usize,
    pub malformed_rows: usize,
    pub lines_processed: usize,
    pub lines_skipped: usize,
    /// Share of processed lines that became records, in percent
    pub success_rate: f64,
    /// Whether the error log was written
    pub error_log_written: bool,
}

/// Gate a parse result, then write the document and its error log
///
/// Nothing is written when the record count falls outside `band`.
pub fn write_table_outputs(
    result: &ParseResult,
    band: &SanityBand,
    source_label: &str,
    as_of: NaiveDate,
    output: &Path,
    error_log: &Path,
) -> Result<TableConversion> {
    result.ensure_within(band, source_label)?;

    let document = SiteDocument::new(result.records().to_vec(), as_of);
    write_json(&document, output)?;
    info!(
        "Wrote {} sites to {}",
        document.national_count,
        output.display()
    );

    let error_log_written = result.has_failures() && write_parse_errors(result, error_log)?;

    Ok(TableConversion {
        national_count: document.national_count,
        malformed_rows: result.failures().len(),
        lines_processed: result.lines_processed(),
        lines_skipped: result.lines_skipped(),
        success_rate: result.success_rate(),
        error_log_written,
    })
}
