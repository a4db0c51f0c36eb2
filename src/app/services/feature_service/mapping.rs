//! Feature attributes to site records
//!
//! Attribute values are normalized to trimmed text. Only current Final NPL
//! sites survive: proposed and deleted statuses are dropped, and an
//! `NPL Site` must carry a listing date and no deletion markers.

use crate::app::services::line_parser::SanityBand;
use crate::constants::feature_service::{STATUS_DELETED, STATUS_FINAL, STATUS_PROPOSED};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A current Final NPL site from the feature service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSiteRecord {
    pub region: String,
    pub state: String,
    pub name: String,
    pub site_id: String,
    pub epa_id: String,
    pub city: String,
    pub county: String,
    /// Raw coordinate value, `""` when absent
    pub latitude: Value,
    pub longitude: Value,
    pub npl_status: String,
    pub proposed_date: String,
    pub listing_date: String,
    pub construction_completion_date: String,
    pub deletion_date: String,
    pub deletion_notice: String,
}

/// Sites and anomalies from one payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureConversion {
    pub sites: Vec<FeatureSiteRecord>,
    pub anomalies: Vec<String>,
    pub features_inspected: usize,
    /// Features dropped by the status filter
    pub excluded: usize,
}

impl FeatureConversion {
    pub fn anomaly_summary(&self) -> String {
        format!(
            "Total anomalies: {} across {} features inspected",
            self.anomalies.len(),
            self.features_inspected
        )
    }
}

/// Missing and null become `""`; strings are trimmed; other values are rendered as text
pub fn norm(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Raw attribute text for anomaly messages
fn raw_display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn coordinate(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(v) => v.clone(),
    }
}

fn is_current_final(status: &str, listing_date: &str, deletion_date: &str, deletion_notice: &str) -> bool {
    if status == STATUS_PROPOSED || status == STATUS_DELETED {
        return false;
    }
    if status == STATUS_FINAL {
        return !listing_date.is_empty() && deletion_date.is_empty() && deletion_notice.is_empty();
    }
    true
}

/// What one feature turned into
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome {
    Site(FeatureSiteRecord),
    /// Dropped by the status filter
    Excluded,
    /// Current but lacking a name or state
    Anomaly(String),
}

/// Convert one feature
pub fn map_feature(feature: &Value) -> FeatureOutcome {
    let empty = Map::new();
    let attrs = feature
        .get("attributes")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let geometry = feature
        .get("geometry")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let attr = |key: &str| norm(attrs.get(key));

    let status = attr("Status");
    let listing_date = attr("Listing_Date");
    let deletion_date = attr("Deletion_Date");
    let deletion_notice = attr("Deletion_FR_Notice");

    if !is_current_final(&status, &listing_date, &deletion_date, &deletion_notice) {
        return FeatureOutcome::Excluded;
    }

    let (latitude, longitude) = if geometry.contains_key("y") && geometry.contains_key("x") {
        (coordinate(geometry.get("y")), coordinate(geometry.get("x")))
    } else {
        (
            coordinate(attrs.get("Latitude")),
            coordinate(attrs.get("Longitude")),
        )
    };

    let site = FeatureSiteRecord {
        region: attr("Region_ID"),
        state: attr("State"),
        name: attr("Site_Name"),
        site_id: attr("SEMS_ID"),
        epa_id: attr("Site_EPA_ID"),
        city: attr("City"),
        county: attr("County"),
        latitude,
        longitude,
        npl_status: status,
        proposed_date: attr("Proposed_Date"),
        listing_date,
        construction_completion_date: attr("Construction_Completion_Date"),
        deletion_date,
        deletion_notice,
    };

    if site.name.is_empty() || site.state.is_empty() {
        let anomaly = format!(
            "Missing required fields for feature: Site_Name={}, State={}",
            raw_display(attrs.get("Site_Name")),
            raw_display(attrs.get("State"))
        );
        debug!("{}", anomaly);
        return FeatureOutcome::Anomaly(anomaly);
    }

    FeatureOutcome::Site(site)
}

/// Convert a feature-service payload into site records
///
/// `raw_label` names the payload in the drift anomaly.
pub fn convert_features(payload: &Value, band: &SanityBand, raw_label: &str) -> Result<FeatureConversion> {
    let payload = payload
        .as_object()
        .ok_or_else(|| Error::data_validation("Feature payload is not a JSON object"))?;

    let features = payload
        .get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut conversion = FeatureConversion {
        features_inspected: features.len(),
        ..Default::default()
    };

    for feature in features {
        match map_feature(feature) {
            FeatureOutcome::Site(site) => conversion.sites.push(site),
            FeatureOutcome::Excluded => conversion.excluded += 1,
            FeatureOutcome::Anomaly(anomaly) => conversion.anomalies.push(anomaly),
        }
    }

    let count = conversion.sites.len();
    if !band.contains(count) {
        warn!("Site count {} outside advisory band {}", count, band);
        conversion.anomalies.push(format!(
            "Unexpected site count: {} (expected {}). Verify filter against {}.",
            count, band, raw_label
        ));
    }

    Ok(conversion)
}
