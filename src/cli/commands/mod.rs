//! Command implementations for the NPL ingestion CLI
//!
//! Each subcommand lives in its own module:
//! - `table`: `pdf` and `ocr`, both through the tabular line parser
//! - `txt`: the delimited export
//! - `fetch` / `features`: the ArcGIS feature service
//! - `violations`: the ECHO exporter
//! - `attachments`: files embedded in the NPL PDF

pub mod attachments;
pub mod features;
pub mod fetch;
pub mod shared;
pub mod table;
pub mod txt;
pub mod violations;

pub use shared::RunSummary;

use crate::cli::args::{Args, Commands};
use anyhow::{Result, bail};
use tracing::debug;

/// Main command runner
pub fn run(args: Args) -> Result<RunSummary> {
    shared::setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let Some(command) = &args.command else {
        bail!("No subcommand given");
    };

    match command {
        Commands::Pdf(table) => table::run_pdf(&args, table),
        Commands::Ocr(table) => table::run_ocr(&args, table),
        Commands::Txt(convert) => txt::run_txt(&args, convert),
        Commands::Fetch(fetch) => fetch::run_fetch(&args, fetch),
        Commands::Features(features) => features::run_features(&args, features),
        Commands::Violations(convert) => violations::run_violations(&args, convert),
        Commands::Attachments(attachments) => attachments::run_attachments(&args, attachments),
    }
}
