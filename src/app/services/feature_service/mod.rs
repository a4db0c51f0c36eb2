//! ArcGIS feature-service ingestion path
//!
//! [`client`] downloads the raw feature layer once and saves it; [`mapping`]
//! converts a saved payload into current Final NPL site records. The site
//! count band is advisory here: drift is logged as an anomaly, not fatal.

pub mod client;
pub mod mapping;

#[cfg(test)]
mod tests;

pub use client::{FeatureServiceClient, feature_count, query_params};
pub use mapping::{
    FeatureConversion, FeatureOutcome, FeatureSiteRecord, convert_features, map_feature, norm,
};

use crate::app::services::line_parser::SanityBand;
use crate::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a saved payload and convert it
pub fn convert_feature_file(path: &Path, band: &SanityBand) -> Result<FeatureConversion> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    let payload: Value = serde_json::from_str(&text)
        .map_err(|e| Error::json(format!("Failed to parse {}", path.display()), e))?;

    convert_features(&payload, band, &path.display().to_string())
}
