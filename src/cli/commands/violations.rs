//! `violations` command: trim the ECHO exporter

use super::shared::{RunSummary, ensure_input_exists, load_configuration};
use crate::app::services::site_writer::write_json;
use crate::app::services::violations::reshape_file;
use crate::cli::args::{Args, ConvertArgs};
use crate::constants;
use anyhow::{Context, Result};
use std::time::Instant;

pub fn run_violations(args: &Args, convert: &ConvertArgs) -> Result<RunSummary> {
    let start = Instant::now();
    let config = load_configuration(args, |_| {})?;
    let (input, output) = convert.resolve_paths(
        &config,
        constants::ECHO_EXPORT_FILE,
        constants::VIOLATIONS_JSON_FILE,
    );
    ensure_input_exists(&input)?;

    let records =
        reshape_file(&input).with_context(|| format!("Failed to reshape {}", input.display()))?;
    write_json(&records, &output)?;

    let summary = RunSummary {
        records_written: records.len(),
        outputs: vec![output],
        elapsed: start.elapsed(),
        ..Default::default()
    };
    summary.report(&format!("Wrote {} facility records", records.len()));
    Ok(summary)
}
