//! `pdf` and `ocr` commands: PDF-derived table text through the line parser

use super::shared::{RunSummary, create_progress_bar, ensure_input_exists, load_configuration, today};
use crate::app::services::line_parser::LineParser;
use crate::app::services::site_writer::write_table_outputs;
use crate::app::services::text_source::{LineSource, OcrSource, PdfTextSource, TextFileSource};
use crate::cli::args::{Args, TableArgs, TablePaths};
use crate::config::Config;
use crate::constants::logs;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{info, warn};

/// Parse the lines of any source and write the document and error log
pub fn convert_table<S: LineSource>(
    source: &S,
    config: &Config,
    paths: &TablePaths,
) -> Result<RunSummary> {
    let start = Instant::now();
    ensure_input_exists(&paths.input)?;

    let lines = source
        .read_lines(&paths.input)
        .with_context(|| format!("Failed to read lines from {}", paths.input.display()))?;

    let parser = LineParser::new(config.parser.band());
    let result = parser.parse(&lines);

    let conversion = write_table_outputs(
        &result,
        &parser.band(),
        source.label(),
        today(),
        &paths.output,
        &paths.error_log,
    )?;

    if conversion.malformed_rows > 0 {
        warn!(
            "{} malformed rows logged to {}",
            conversion.malformed_rows,
            paths.error_log.display()
        );
    }

    let mut outputs = vec![paths.output.clone()];
    if conversion.error_log_written {
        outputs.push(paths.error_log.clone());
    }

    Ok(RunSummary {
        records_written: conversion.national_count,
        anomalies: conversion.malformed_rows,
        inputs_inspected: conversion.lines_processed,
        success_rate: Some(conversion.success_rate),
        outputs,
        elapsed: start.elapsed(),
    })
}

pub fn run_pdf(args: &Args, table: &TableArgs) -> Result<RunSummary> {
    let config = load_configuration(args, |c| table.apply_overrides(c))?;
    let paths = table.resolve_paths(&config, logs::PDF_PARSE_ERRORS);
    info!("Converting {} with the text layer parser", paths.input.display());

    let summary = if table.text {
        convert_table(&TextFileSource::new("Parsing"), &config, &paths)?
    } else {
        convert_table(&PdfTextSource::new(&config.pdf_text, &config.parser), &config, &paths)?
    };

    summary.report(&format!("Parsed {} NPL sites", summary.records_written));
    Ok(summary)
}

pub fn run_ocr(args: &Args, table: &TableArgs) -> Result<RunSummary> {
    let config = load_configuration(args, |c| table.apply_overrides(c))?;
    let paths = table.resolve_paths(&config, logs::OCR_ERRORS);
    info!("Converting {} with OCR", paths.input.display());

    let summary = if table.text {
        convert_table(&TextFileSource::new("OCR"), &config, &paths)?
    } else {
        let progress = create_progress_bar(0, "Recognizing pages", args.show_progress());
        let source = OcrSource::new(config.ocr.clone()).with_progress(progress);
        convert_table(&source, &config, &paths)?
    };

    summary.report(&format!("OCR parsed {} NPL sites", summary.records_written));
    Ok(summary)
}
