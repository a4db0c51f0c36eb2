//! `features` command: saved feature layer to the site document

use super::shared::{RunSummary, ensure_input_exists, load_configuration, today};
use crate::app::models::SiteDocument;
use crate::app::services::feature_service::convert_feature_file;
use crate::app::services::site_writer::{write_json, write_log};
use crate::cli::args::{Args, FeaturesArgs};
use crate::constants::feature_service::SOURCE;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::warn;

pub fn run_features(args: &Args, features: &FeaturesArgs) -> Result<RunSummary> {
    let start = Instant::now();
    let config = load_configuration(args, |c| features.apply_overrides(c))?;
    let paths = features.resolve_paths(&config);
    ensure_input_exists(&paths.input)?;

    let conversion = convert_feature_file(&paths.input, &config.feature_service.band())
        .with_context(|| format!("Failed to convert {}", paths.input.display()))?;

    let summary_line = conversion.anomaly_summary();
    let anomalies = conversion.anomalies.len();
    let inspected = conversion.features_inspected;

    let document = SiteDocument::new(conversion.sites, today()).with_source(SOURCE);
    write_json(&document, &paths.output)?;

    let mut outputs = vec![paths.output.clone()];
    if write_log(&conversion.anomalies, &summary_line, &paths.error_log)? {
        warn!("Ingest anomalies logged to {}", paths.error_log.display());
        outputs.push(paths.error_log.clone());
    }

    let summary = RunSummary {
        records_written: document.national_count,
        anomalies,
        inputs_inspected: inspected,
        outputs,
        success_rate: None,
        elapsed: start.elapsed(),
    };
    summary.report(&format!(
        "Converted {} current Final NPL sites",
        document.national_count
    ));
    Ok(summary)
}
