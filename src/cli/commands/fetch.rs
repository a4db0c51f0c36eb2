//! `fetch` command: download the raw feature layer

use super::shared::{RunSummary, load_configuration};
use crate::app::services::feature_service::FeatureServiceClient;
use crate::cli::args::{Args, FetchArgs};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::time::{Duration, Instant};

pub fn run_fetch(args: &Args, fetch: &FetchArgs) -> Result<RunSummary> {
    let start = Instant::now();
    let config = load_configuration(args, |c| fetch.apply_overrides(c))?;
    let output = fetch.output_path(&config);

    let client = FeatureServiceClient::new(&config.feature_service)?;

    let spinner = if args.show_progress() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    spinner.set_message("Querying feature service");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = client.fetch_to(&output);
    spinner.finish_and_clear();
    let features = result.with_context(|| format!("Failed to fetch {}", client.url()))?;

    let summary = RunSummary {
        records_written: features,
        outputs: vec![output],
        elapsed: start.elapsed(),
        ..Default::default()
    };
    summary.report(&format!("Saved raw NPL feature layer with {} features", features));
    Ok(summary)
}
