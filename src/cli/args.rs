//! Command-line argument definitions for NPL ingestion
//!
//! One subcommand per ingestion path. Paths left unset fall back to the
//! conventional file names under the configured data and logs directories.

use crate::config::Config;
use crate::constants::{self, logs};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Convert the U.S. National Priorities List into one normalized JSON document
#[derive(Debug, Clone, Parser)]
#[command(
    name = "npl-ingest",
    version,
    about = "Convert the EPA National Priorities List into normalized JSON",
    long_about = "Converts the EPA National Priorities List of hazardous-waste sites from its \
                  published formats (PDF table, scanned PDF, delimited export, ArcGIS feature \
                  service) into one normalized JSON document, and reshapes the ECHO compliance \
                  export into a trimmed violations file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file (TOML)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse the text layer of the NPL PDF
    Pdf(TableArgs),
    /// OCR a scanned NPL PDF and parse the recognized text
    Ocr(TableArgs),
    /// Convert the delimited Final NPL export
    Txt(ConvertArgs),
    /// Download the raw NPL feature layer
    Fetch(FetchArgs),
    /// Convert a saved feature layer payload
    Features(FeaturesArgs),
    /// Reshape the ECHO exporter CSV into a violations file
    Violations(ConvertArgs),
    /// Save the files attached to the NPL PDF
    Attachments(AttachmentsArgs),
}

/// Arguments for the PDF-derived paths
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct TableArgs {
    /// Input PDF, or a form-feed paged text file with `--text`
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output JSON document
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Malformed row log, written only when rows fail to parse
    #[arg(long = "error-log", value_name = "PATH")]
    pub error_log: Option<PathBuf>,

    /// Lowest plausible site count
    #[arg(long = "min-sites", value_name = "N")]
    pub min_sites: Option<usize>,

    /// Highest plausible site count
    #[arg(long = "max-sites", value_name = "N")]
    pub max_sites: Option<usize>,

    /// Treat the input as already-extracted text, pages separated by form feeds
    #[arg(long = "text")]
    pub text: bool,
}

/// Arguments for single-file conversions without an anomaly log
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ConvertArgs {
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, ClapArgs)]
pub struct FetchArgs {
    /// Where the raw payload is saved
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Feature service query URL
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, ClapArgs)]
pub struct FeaturesArgs {
    /// Saved feature layer payload
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Anomaly log, written only when anomalies were found
    #[arg(long = "error-log", value_name = "PATH")]
    pub error_log: Option<PathBuf>,

    /// Lowest expected site count (advisory)
    #[arg(long = "min-sites", value_name = "N")]
    pub min_sites: Option<usize>,

    /// Highest expected site count (advisory)
    #[arg(long = "max-sites", value_name = "N")]
    pub max_sites: Option<usize>,
}

#[derive(Debug, Clone, Default, ClapArgs)]
pub struct AttachmentsArgs {
    /// PDF carrying the attachments
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory the attachments are written to
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are hidden in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Resolved file locations for a PDF-derived run
#[derive(Debug, Clone, PartialEq)]
pub struct TablePaths {
    pub input: PathBuf,
    pub output: PathBuf,
    pub error_log: PathBuf,
}

impl TableArgs {
    /// Fill unset paths from the configured directories
    pub fn resolve_paths(&self, config: &Config, default_log: &str) -> TablePaths {
        TablePaths {
            input: self
                .input
                .clone()
                .unwrap_or_else(|| config.data_path(constants::NPL_PDF_FILE)),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| config.data_path(constants::SUPERFUND_JSON_FILE)),
            error_log: self
                .error_log
                .clone()
                .unwrap_or_else(|| config.log_path(default_log)),
        }
    }

    /// Override the parser band from the command line
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(min) = self.min_sites {
            config.parser.min_sites = min;
        }
        if let Some(max) = self.max_sites {
            config.parser.max_sites = max;
        }
    }
}

impl ConvertArgs {
    /// Resolve paths against the given default file names under the data directory
    pub fn resolve_paths(
        &self,
        config: &Config,
        default_input: &str,
        default_output: &str,
    ) -> (PathBuf, PathBuf) {
        (
            self.input
                .clone()
                .unwrap_or_else(|| config.data_path(default_input)),
            self.output
                .clone()
                .unwrap_or_else(|| config.data_path(default_output)),
        )
    }
}

impl FetchArgs {
    pub fn output_path(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| config.data_path(constants::NPL_RAW_JSON_FILE))
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.feature_service.url = url.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.feature_service.timeout_secs = timeout;
        }
    }
}

impl FeaturesArgs {
    pub fn resolve_paths(&self, config: &Config) -> TablePaths {
        TablePaths {
            input: self
                .input
                .clone()
                .unwrap_or_else(|| config.data_path(constants::NPL_RAW_JSON_FILE)),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| config.data_path(constants::SUPERFUND_JSON_FILE)),
            error_log: self
                .error_log
                .clone()
                .unwrap_or_else(|| config.log_path(logs::INGEST_ERRORS)),
        }
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(min) = self.min_sites {
            config.feature_service.min_sites = min;
        }
        if let Some(max) = self.max_sites {
            config.feature_service.max_sites = max;
        }
    }
}

impl AttachmentsArgs {
    /// Input PDF and output directory, defaulting to the report under the data directory
    pub fn resolve_paths(&self, config: &Config) -> (PathBuf, PathBuf) {
        (
            self.input
                .clone()
                .unwrap_or_else(|| config.data_path(constants::NPL_PDF_FILE)),
            self.output_dir
                .clone()
                .unwrap_or_else(|| config.paths.data_dir.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_log_level() {
        let args = Args::parse_from(["npl-ingest", "pdf"]);
        assert_eq!(args.get_log_level(), "warn");

        let args = Args::parse_from(["npl-ingest", "-vv", "pdf"]);
        assert_eq!(args.get_log_level(), "debug");

        let args = Args::parse_from(["npl-ingest", "txt", "-q"]);
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["npl-ingest", "-v", "-q", "pdf"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::parse_from(["npl-ingest"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_pdf_arguments() {
        let args = Args::parse_from([
            "npl-ingest",
            "pdf",
            "-i",
            "scan.txt",
            "--text",
            "--min-sites",
            "5",
            "--error-log",
            "out/errors.txt",
        ]);

        let Some(Commands::Pdf(table)) = args.command else {
            panic!("Expected pdf command");
        };
        assert!(table.text);
        assert_eq!(table.min_sites, Some(5));
        assert_eq!(table.max_sites, None);

        let mut config = Config::default();
        table.apply_overrides(&mut config);
        assert_eq!(config.parser.min_sites, 5);
        assert_eq!(config.parser.max_sites, 400);

        let paths = table.resolve_paths(&config, logs::PDF_PARSE_ERRORS);
        assert_eq!(paths.input, PathBuf::from("scan.txt"));
        assert_eq!(paths.output, PathBuf::from("data").join("superfund.json"));
        assert_eq!(paths.error_log, PathBuf::from("out/errors.txt"));
    }

    #[test]
    fn test_default_paths() {
        let config = Config::default();

        let paths = TableArgs::default().resolve_paths(&config, logs::OCR_ERRORS);
        assert_eq!(paths.error_log, PathBuf::from("logs").join("ocr-errors.txt"));

        let (input, output) = ConvertArgs::default().resolve_paths(
            &config,
            constants::ECHO_EXPORT_FILE,
            constants::VIOLATIONS_JSON_FILE,
        );
        assert_eq!(input, PathBuf::from("data").join("ECHO_EXPORTER.csv"));
        assert_eq!(output, PathBuf::from("data").join("violations.json"));

        let paths = FeaturesArgs::default().resolve_paths(&config);
        assert_eq!(paths.input, PathBuf::from("data").join("npl.raw.json"));
        assert_eq!(paths.error_log, PathBuf::from("logs").join("ingest-errors.txt"));
    }

    #[test]
    fn test_fetch_overrides() {
        let args = Args::parse_from(["npl-ingest", "fetch", "--url", "http://localhost/q", "--timeout", "5"]);
        let Some(Commands::Fetch(fetch)) = args.command else {
            panic!("Expected fetch command");
        };

        let mut config = Config::default();
        fetch.apply_overrides(&mut config);
        assert_eq!(config.feature_service.url, "http://localhost/q");
        assert_eq!(config.feature_service.timeout_secs, 5);
    }

    #[test]
    fn test_attachments_paths() {
        let config = Config::default();

        let (input, output_dir) = AttachmentsArgs::default().resolve_paths(&config);
        assert_eq!(input, PathBuf::from("data").join(constants::NPL_PDF_FILE));
        assert_eq!(output_dir, PathBuf::from("data"));

        let args = Args::parse_from(["npl-ingest", "attachments", "-i", "report.pdf", "-o", "extracted"]);
        let Some(Commands::Attachments(attachments)) = args.command else {
            panic!("Expected attachments command");
        };
        let (input, output_dir) = attachments.resolve_paths(&config);
        assert_eq!(input, PathBuf::from("report.pdf"));
        assert_eq!(output_dir, PathBuf::from("extracted"));
    }
}
