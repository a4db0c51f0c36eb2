//! Tests for the feature-service path


use serde_json::{Value, json};

/// A current Final NPL feature with point geometry
pub fn final_feature(name: &str, epa_id: &str) -> Value {
    json!({
        "attributes": {
            "Region_ID": 1,
            "State": "MA",
            "Site_Name": format!("  {}  ", name),
            "SEMS_ID": "0101",
            "Site_EPA_ID": epa_id,
            "City": "New Bedford",
            "County": "Bristol",
            "Latitude": 41.0,
            "Longitude": -70.0,
            "Status": "NPL Site",
            "Proposed_Date": "1982-12-30",
            "Listing_Date": "1983-09-08",
            "Construction_Completion_Date": null,
            "Deletion_Date": null,
            "Deletion_FR_Notice": ""
        },
        "geometry": { "x": -70.9, "y": 41.6 }
    })
}

pub fn payload(features: Vec<Value>) -> Value {
    json!({
        "objectIdFieldName": "OBJECTID",
        "geometryType": "esriGeometryPoint",
        "features": features
    })
}
