//! ECHO exporter reshaping
//!
//! Streams the facility export row by row and keeps only facilities with
//! enforcement history, reduced to location, a violation category and
//! penalty figures.

use crate::{Error, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Columns read from the exporter; absent columns read as empty
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EchoRow {
    #[serde(rename = "FAC_NAME")]
    pub name: String,
    #[serde(rename = "FAC_CITY")]
    pub city: String,
    #[serde(rename = "FAC_STATE")]
    pub state: String,
    #[serde(rename = "FAC_LAT")]
    pub lat: String,
    #[serde(rename = "FAC_LONG")]
    pub lon: String,
    #[serde(rename = "FAC_TOTAL_PENALTIES")]
    pub total_penalties: String,
    #[serde(rename = "FAC_PENALTY_COUNT")]
    pub penalty_count: String,
    #[serde(rename = "CAA_COMPLIANCE_STATUS")]
    pub caa_status: String,
    #[serde(rename = "CWA_COMPLIANCE_STATUS")]
    pub cwa_status: String,
    #[serde(rename = "RCRA_COMPLIANCE_STATUS")]
    pub rcra_status: String,
    #[serde(rename = "SDWA_COMPLIANCE_STATUS")]
    pub sdwa_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub facility: String,
    pub city: String,
    pub state: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub violation: String,
    pub count: i64,
    pub penalty: i64,
}

/// Finite float or `None`
pub fn safe_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Float truncated toward zero, or 0 when unreadable
pub fn to_num(value: &str) -> i64 {
    safe_float(value).map_or(0, |n| n.trunc() as i64)
}

/// Category of the first program reporting a violation
pub fn classify(row: &EchoRow) -> &'static str {
    let programs = [
        (&row.caa_status, "Clean Air Act violation"),
        (&row.cwa_status, "Clean Water Act violation"),
        (&row.rcra_status, "RCRA hazardous waste violation"),
        (&row.sdwa_status, "Safe Drinking Water Act violation"),
    ];

    programs
        .iter()
        .find(|(status, _)| status.contains("Violation"))
        .map_or("General violation", |(_, label)| *label)
}

impl ViolationRecord {
    /// `None` for facilities with neither penalties nor penalty actions
    pub fn from_row(row: &EchoRow) -> Option<Self> {
        let penalty = to_num(&row.total_penalties);
        let count = to_num(&row.penalty_count);
        if penalty == 0 && count == 0 {
            return None;
        }

        Some(Self {
            facility: row.name.trim().to_string(),
            city: row.city.trim().to_string(),
            state: row.state.trim().to_string(),
            lat: safe_float(&row.lat),
            lon: safe_float(&row.lon),
            violation: classify(row).to_string(),
            count,
            penalty,
        })
    }
}

/// Reshape exporter rows from any reader
pub fn reshape_reader<R: Read>(reader: R, file: &str) -> Result<Vec<ViolationRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut rows = 0usize;

    for (index, row) in csv_reader.deserialize::<EchoRow>().enumerate() {
        let row = row.map_err(|e| {
            Error::csv_parsing(file, format!("Failed to read data row {}", index + 1), Some(e))
        })?;
        rows += 1;

        if let Some(record) = ViolationRecord::from_row(&row) {
            records.push(record);
        }
    }

    debug!("Kept {} of {} facilities", records.len(), rows);
    Ok(records)
}

/// Reshape an exporter file
pub fn reshape_file(path: &Path) -> Result<Vec<ViolationRecord>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::io(format!("Failed to open {}", path.display()), e)
        }
    })?;

    let records = reshape_reader(BufReader::new(file), &path.display().to_string())?;
    info!("Reshaped {} facilities from {}", records.len(), path.display());
    Ok(records)
}
