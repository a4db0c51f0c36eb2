//! Configuration management and validation.
//!
//! Provides configuration structures for input/output locations, the
//! sanity bands used to detect parsing drift, external tool settings and
//! the feature-service endpoint. Values are layered: built-in defaults,
//! then an optional TOML file, then CLI overrides.

use crate::app::services::line_parser::SanityBand;
use crate::constants::{
    self, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_COLUMN_GAP, DEFAULT_DATA_DIR,
    DEFAULT_LOGS_DIR, DEFAULT_PDF_MAX_SITES, DEFAULT_PDF_MIN_SITES, tools,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub parser: ParserConfig,
    pub pdf_text: PdfTextConfig,
    pub ocr: OcrConfig,
    pub feature_service: FeatureServiceConfig,
}

/// Where artifacts are read from and written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

/// Tabular line parser settings for the PDF-derived paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lowest plausible record count
    pub min_sites: usize,

    /// Highest plausible record count
    pub max_sites: usize,

    /// Horizontal gap in points that separates two columns of positioned words
    pub column_gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfTextConfig {
    pub pdftotext_cmd: String,
}

/// OCR fallback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Render resolution for page images
    pub dpi: u32,

    /// Tesseract language code
    pub language: String,

    /// Keep tesseract's runs of spaces so column gaps survive recognition
    pub preserve_interword_spaces: bool,

    pub tesseract_cmd: String,
    pub pdftoppm_cmd: String,
    pub pdfinfo_cmd: String,
}

/// ArcGIS feature-service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureServiceConfig {
    pub url: String,
    pub timeout_secs: u64,

    /// Advisory band: out-of-range counts are logged as anomalies
    pub min_sites: usize,
    pub max_sites: usize,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_sites: DEFAULT_PDF_MIN_SITES,
            max_sites: DEFAULT_PDF_MAX_SITES,
            column_gap: DEFAULT_COLUMN_GAP,
        }
    }
}

impl Default for PdfTextConfig {
    fn default() -> Self {
        Self {
            pdftotext_cmd: tools::PDFTOTEXT.to_string(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            dpi: tools::DEFAULT_OCR_DPI,
            language: tools::DEFAULT_OCR_LANGUAGE.to_string(),
            preserve_interword_spaces: true,
            tesseract_cmd: tools::TESSERACT.to_string(),
            pdftoppm_cmd: tools::PDFTOPPM.to_string(),
            pdfinfo_cmd: tools::PDFINFO.to_string(),
        }
    }
}

impl Default for FeatureServiceConfig {
    fn default() -> Self {
        Self {
            url: constants::feature_service::QUERY_URL.to_string(),
            timeout_secs: constants::feature_service::DEFAULT_TIMEOUT_SECS,
            min_sites: constants::feature_service::DEFAULT_MIN_SITES,
            max_sites: constants::feature_service::DEFAULT_MAX_SITES,
        }
    }
}

impl ParserConfig {
    /// Sanity band for the PDF-derived paths
    pub fn band(&self) -> SanityBand {
        SanityBand::new(self.min_sites, self.max_sites)
    }
}

impl FeatureServiceConfig {
    pub fn band(&self) -> SanityBand {
        SanityBand::new(self.min_sites, self.max_sites)
    }
}

impl Config {
    /// Default config file location (`<config_dir>/npl-ingest/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load defaults, then the explicit config file if given, otherwise the
    /// default config file if it exists
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.parser.min_sites > self.parser.max_sites {
            return Err(Error::configuration(format!(
                "parser.min_sites ({}) exceeds parser.max_sites ({})",
                self.parser.min_sites, self.parser.max_sites
            )));
        }

        if self.parser.column_gap.is_nan() || self.parser.column_gap <= 0.0 {
            return Err(Error::configuration(
                "parser.column_gap must be greater than 0",
            ));
        }

        if self.ocr.dpi == 0 {
            return Err(Error::configuration("ocr.dpi must be greater than 0"));
        }

        if self.ocr.language.trim().is_empty() {
            return Err(Error::configuration("ocr.language cannot be empty"));
        }

        if self.feature_service.url.trim().is_empty() {
            return Err(Error::configuration("feature_service.url cannot be empty"));
        }

        if self.feature_service.timeout_secs == 0 {
            return Err(Error::configuration(
                "feature_service.timeout_secs must be greater than 0",
            ));
        }

        if self.feature_service.min_sites > self.feature_service.max_sites {
            return Err(Error::configuration(format!(
                "feature_service.min_sites ({}) exceeds feature_service.max_sites ({})",
                self.feature_service.min_sites, self.feature_service.max_sites
            )));
        }

        Ok(())
    }

    /// Resolve a file name under the data directory
    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.paths.data_dir.join(file_name)
    }

    /// Resolve a file name under the logs directory
    pub fn log_path(&self, file_name: &str) -> PathBuf {
        self.paths.logs_dir.join(file_name)
    }
}
