//! `attachments` command: save the files embedded in the NPL PDF

use super::shared::{RunSummary, ensure_input_exists, load_configuration};
use crate::app::services::attachments::extract_attachments;
use crate::cli::args::{Args, AttachmentsArgs};
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::warn;

pub fn run_attachments(args: &Args, attachments: &AttachmentsArgs) -> Result<RunSummary> {
    let start = Instant::now();
    let config = load_configuration(args, |_| {})?;
    let (input, output_dir) = attachments.resolve_paths(&config);
    ensure_input_exists(&input)?;

    let written = extract_attachments(&input, &output_dir)
        .with_context(|| format!("Failed to extract attachments from {}", input.display()))?;
    if written.is_empty() {
        warn!("{} has no attachments", input.display());
    }

    let summary = RunSummary {
        records_written: written.len(),
        outputs: written,
        elapsed: start.elapsed(),
        ..Default::default()
    };
    summary.report(&format!("Extracted {} attachments", summary.records_written));
    Ok(summary)
}
