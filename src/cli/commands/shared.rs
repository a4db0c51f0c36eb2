//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, progress bars and the
//! run summary printed at the end of every command.

use crate::cli::args::Args;
use crate::config::Config;
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// What a command produced, for the final report
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Records in the written document
    pub records_written: usize,
    /// Malformed rows or anomalies logged
    pub anomalies: usize,
    /// Lines or rows inspected
    pub inputs_inspected: usize,
    /// Percentage of inspected lines that became records, when meaningful
    pub success_rate: Option<f64>,
    pub outputs: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Print a human-readable summary to stdout
    pub fn report(&self, title: &str) {
        println!();
        println!("{}", title.green().bold());
        println!("   Records written: {}", self.records_written.to_string().bold());
        if self.inputs_inspected > 0 {
            println!("   Inputs inspected: {}", self.inputs_inspected);
        }
        if let Some(rate) = self.success_rate {
            println!("   Success rate: {:.1}%", rate);
        }
        if self.anomalies > 0 {
            println!(
                "   {}",
                format!("Anomalies logged: {}", self.anomalies).yellow()
            );
        }
        for output in &self.outputs {
            println!("   Wrote {}", output.display().to_string().cyan());
        }
        println!("   Elapsed: {}", HumanDuration(self.elapsed));
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("npl_ingest={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration (defaults, then file, then CLI overrides) and validate it
pub fn load_configuration(args: &Args, overrides: impl FnOnce(&mut Config)) -> Result<Config> {
    if let Some(path) = &args.config_file {
        info!("Using config file: {}", path.display());
    }

    let mut config = Config::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;
    overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Create a standardized progress bar
pub fn create_progress_bar(total: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} ETA: {eta}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Fail early with a clear message when an input file is missing
pub fn ensure_input_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }
    Ok(())
}

/// Date stamped into output documents
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
