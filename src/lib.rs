//! NPL Ingest Library
//!
//! A Rust library for converting the U.S. National Priorities List (NPL) of
//! hazardous-waste sites from its raw published formats into one normalized
//! JSON document.
//!
//! This library provides tools for:
//! - Recovering tabular site records from whitespace-aligned PDF text or OCR output
//! - Failing loudly when the record count drifts outside a known-good band
//! - Converting the delimited text export and the feature-service JSON payload
//! - Fetching the feature-service payload over HTTP
//! - Reshaping the ECHO compliance export into a trimmed violations file
//! - Extracting files attached to the NPL report PDF

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod attachments;
        pub mod delimited_export;
        pub mod feature_service;
        pub mod line_parser;
        pub mod site_writer;
        pub mod text_source;
        pub mod violations;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ParseFailure, RawLine, SiteRecord};
pub use config::Config;

/// Result type alias for NPL ingestion
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for NPL ingestion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON encoding or decoding error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// PDF structure could not be read
    #[error("PDF error: {message}")]
    Pdf {
        message: String,
        #[source]
        source: lopdf::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Record count outside the plausible band
    #[error(
        "Unexpected site count: {count} (expected {min}..={max}). {source_label} may have drifted."
    )]
    SanityGate {
        count: usize,
        min: usize,
        max: usize,
        source_label: String,
    },

    /// External extraction tool is not installed
    #[error("External tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// External extraction tool ran but failed
    #[error("Extraction failed: {message}")]
    ExtractionFailed { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create an HTTP error with context
    pub fn http(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            message: message.into(),
            source,
        }
    }

    /// Create a PDF structure error with context
    pub fn pdf(message: impl Into<String>, source: lopdf::Error) -> Self {
        Self::Pdf {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a sanity gate error
    pub fn sanity_gate(count: usize, min: usize, max: usize, source_label: impl Into<String>) -> Self {
        Self::SanityGate {
            count,
            min,
            max,
            source_label: source_label.into(),
        }
    }

    /// Create a tool not found error
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create an extraction failure error
    pub fn extraction_failed(message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: "HTTP request failed".to_string(),
            source: error,
        }
    }
}
