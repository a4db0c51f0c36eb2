//! Application constants for NPL ingestion
//!
//! This module contains file names, default values, column names and
//! provenance strings used throughout the ingestion commands.

// =============================================================================
// Default Paths and File Names
// =============================================================================

/// Default directory for input and output artifacts
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory for anomaly logs
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Published NPL PDF (text-extractable or scanned)
pub const NPL_PDF_FILE: &str = "All Current Final NPL Sites-20251110105748.pdf";

/// Delimited text export of final NPL sites
pub const NPL_TXT_FILE: &str = "nplfinalbydate.txt";

/// Raw feature-service payload saved by `fetch`
pub const NPL_RAW_JSON_FILE: &str = "npl.raw.json";

/// Normalized output document shared by every NPL ingestion path
pub const SUPERFUND_JSON_FILE: &str = "superfund.json";

/// ECHO exporter CSV
pub const ECHO_EXPORT_FILE: &str = "ECHO_EXPORTER.csv";

/// Trimmed violations output
pub const VIOLATIONS_JSON_FILE: &str = "violations.json";

/// Error log names per ingestion path
pub mod logs {
    pub const PDF_PARSE_ERRORS: &str = "parse-errors.txt";
    pub const OCR_ERRORS: &str = "ocr-errors.txt";
    pub const INGEST_ERRORS: &str = "ingest-errors.txt";
}

/// Config file location under the user config directory
pub const CONFIG_DIR_NAME: &str = "npl-ingest";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Tabular Line Parser
// =============================================================================

/// Lines starting with this token are table headers
pub const HEADER_PREFIX: &str = "Region";

/// Lines containing this substring are repeated column headings
pub const HEADER_MARKER: &str = "Site Name";

/// Plausible record count for the PDF-derived paths
pub const DEFAULT_PDF_MIN_SITES: usize = 350;
pub const DEFAULT_PDF_MAX_SITES: usize = 400;

/// Horizontal gap (PDF points) treated as a column boundary between words
pub const DEFAULT_COLUMN_GAP: f64 = 5.0;

// =============================================================================
// External Tools
// =============================================================================

pub mod tools {
    pub const PDFTOTEXT: &str = "pdftotext";
    pub const PDFINFO: &str = "pdfinfo";
    pub const PDFTOPPM: &str = "pdftoppm";
    pub const TESSERACT: &str = "tesseract";

    /// Lower resolution keeps OCR fast while still legible
    pub const DEFAULT_OCR_DPI: u32 = 200;
    pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
}

// =============================================================================
// Feature Service
// =============================================================================

pub mod feature_service {
    /// ArcGIS FeatureServer query endpoint for NPL sites with status information
    pub const QUERY_URL: &str = "https://services.arcgis.com/cJ9YHowT8TU7DUyn/arcgis/rest/services/Superfund_National_Priorities_List_(NPL)_Sites_with_Status_Information/FeatureServer/0/query";

    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Advisory band for active Final NPL sites
    pub const DEFAULT_MIN_SITES: usize = 300;
    pub const DEFAULT_MAX_SITES: usize = 600;

    pub const STATUS_PROPOSED: &str = "Proposed NPL Site";
    pub const STATUS_DELETED: &str = "Deleted NPL Site";
    pub const STATUS_FINAL: &str = "NPL Site";

    pub const SOURCE: &str = "EPA ArcGIS NPL Sites with Status Information (Status='NPL Site' with Listing_Date, excluding Deletion markers)";
}

// =============================================================================
// Delimited Export
// =============================================================================

/// Column names of the delimited NPL export
pub mod export_columns {
    pub const SITE_EPA_ID: &str = "SITE_EPA_ID";
    pub const FEDERAL: &str = "FEDERAL";
    pub const FINAL_DATE: &str = "FINAL_DATE";
    pub const SITE_NAME: &str = "SITE_NAME";
    pub const SITE_CITY: &str = "SITE_CITY";
    pub const STATE: &str = "STATE";
    pub const REGION: &str = "REGION";
    pub const SITE_SCORE: &str = "SITE_SCORE";

    pub const REQUIRED: &[&str] = &[
        SITE_EPA_ID,
        FEDERAL,
        FINAL_DATE,
        SITE_NAME,
        SITE_CITY,
        STATE,
        REGION,
        SITE_SCORE,
    ];

    /// FEDERAL codes for deleted and proposed sites
    pub const EXCLUDED_FEDERAL_CODES: &[&str] = &["D", "P"];
}
