//! `txt` command: the delimited Final NPL export

use super::shared::{RunSummary, ensure_input_exists, load_configuration, today};
use crate::app::models::SiteDocument;
use crate::app::services::delimited_export::convert_export_file;
use crate::app::services::site_writer::write_json;
use crate::cli::args::{Args, ConvertArgs};
use crate::constants;
use anyhow::{Context, Result};
use std::time::Instant;

pub fn run_txt(args: &Args, convert: &ConvertArgs) -> Result<RunSummary> {
    let start = Instant::now();
    let config = load_configuration(args, |_| {})?;
    let (input, output) =
        convert.resolve_paths(&config, constants::NPL_TXT_FILE, constants::SUPERFUND_JSON_FILE);
    ensure_input_exists(&input)?;

    let conversion = convert_export_file(&input)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    let inputs_inspected = conversion.rows_read();

    let document = SiteDocument::new(conversion.into_sites(), today());
    write_json(&document, &output)?;

    let summary = RunSummary {
        records_written: document.national_count,
        inputs_inspected,
        outputs: vec![output],
        elapsed: start.elapsed(),
        ..Default::default()
    };
    summary.report(&format!(
        "Converted {} current Final NPL sites",
        document.national_count
    ));
    Ok(summary)
}
