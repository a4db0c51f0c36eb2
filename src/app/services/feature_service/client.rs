//! Blocking HTTP client for the feature-service query endpoint

use crate::app::services::site_writer::write_json;
use crate::config::FeatureServiceConfig;
use crate::{Error, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Query parameters requesting every feature with WGS84 geometry
pub fn query_params() -> [(&'static str, &'static str); 5] {
    [
        ("where", "1=1"),
        ("outFields", "*"),
        ("returnGeometry", "true"),
        ("f", "json"),
        ("outSR", "4326"),
    ]
}

/// Number of entries in the payload's `features` array
pub fn feature_count(payload: &Value) -> usize {
    payload
        .get("features")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

#[derive(Debug, Clone)]
pub struct FeatureServiceClient {
    client: Client,
    url: String,
}

impl FeatureServiceClient {
    pub fn new(config: &FeatureServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("npl-ingest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue the single query request; non-success statuses are errors
    pub fn fetch(&self) -> Result<Value> {
        info!("Querying {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&query_params())
            .send()
            .map_err(|e| Error::http(format!("Request to {} failed", self.url), e))?
            .error_for_status()
            .map_err(|e| Error::http("Feature service returned an error status", e))?;

        debug!("Response status {}", response.status());

        response
            .json::<Value>()
            .map_err(|e| Error::http("Failed to decode feature service response", e))
    }

    /// Fetch and save the payload, returning its feature count
    pub fn fetch_to(&self, path: &Path) -> Result<usize> {
        let payload = self.fetch()?;
        write_json(&payload, path)?;

        let count = feature_count(&payload);
        info!("Saved {} features to {}", count, path.display());
        Ok(count)
    }
}
