//! Conversion of the EPA delimited Final NPL export
//!
//! The export is comma-delimited, Latin-1 encoded, and lists a site once
//! per listing action. Deleted and proposed rows are dropped and each EPA
//! id keeps only its most recent final listing.

use crate::constants::export_columns;
use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A current Final NPL site from the delimited export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSiteRecord {
    pub epa_id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub region: String,
    pub federal: String,
    pub final_date: String,
    pub score: Option<f64>,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    epa_id: usize,
    federal: usize,
    final_date: usize,
    name: usize,
    city: usize,
    state: usize,
    region: usize,
    score: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, file: &str) -> Result<Self> {
        let missing: Vec<&str> = export_columns::REQUIRED
            .iter()
            .copied()
            .filter(|name| !headers.iter().any(|h| h.trim() == *name))
            .collect();

        if !missing.is_empty() {
            return Err(Error::csv_parsing(
                file,
                format!("Missing required columns: {}", missing.join(", ")),
                None,
            ));
        }

        let find = |name: &str| headers.iter().position(|h| h.trim() == name).unwrap_or(0);

        Ok(Self {
            epa_id: find(export_columns::SITE_EPA_ID),
            federal: find(export_columns::FEDERAL),
            final_date: find(export_columns::FINAL_DATE),
            name: find(export_columns::SITE_NAME),
            city: find(export_columns::SITE_CITY),
            state: find(export_columns::STATE),
            region: find(export_columns::REGION),
            score: find(export_columns::SITE_SCORE),
        })
    }
}

/// Accumulated conversion state
#[derive(Debug, Default)]
pub struct ExportConversion {
    sites: Vec<ExportSiteRecord>,
    positions: HashMap<String, usize>,
    rows_read: usize,
    rows_excluded: usize,
    duplicates: usize,
}

impl ExportConversion {
    pub fn sites(&self) -> &[ExportSiteRecord] {
        &self.sites
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Rows dropped as deleted or proposed
    pub fn rows_excluded(&self) -> usize {
        self.rows_excluded
    }

    /// Rows folded into an earlier occurrence of the same EPA id
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn into_sites(self) -> Vec<ExportSiteRecord> {
        self.sites
    }

    /// Keep the latest final listing per EPA id, in first-seen order
    fn offer(&mut self, site: ExportSiteRecord) {
        match self.positions.get(&site.epa_id) {
            Some(&index) => {
                self.duplicates += 1;
                if site.final_date > self.sites[index].final_date {
                    self.sites[index] = site;
                }
            }
            None => {
                self.positions.insert(site.epa_id.clone(), self.sites.len());
                self.sites.push(site);
            }
        }
    }
}

/// Decode Latin-1 bytes; every byte maps to the code point of equal value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn parse_score(raw: &str, row: usize, file: &str) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|_| {
        Error::data_validation(format!(
            "Invalid SITE_SCORE '{}' in {} at data row {}",
            raw, file, row
        ))
    })
}

/// Convert export text that has already been decoded
pub fn convert_export_text(text: &str, file: &str) -> Result<ExportConversion> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_parsing(file, "Failed to read header row", Some(e)))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers, file)?;

    let mut conversion = ExportConversion::default();

    for (index, row) in reader.records().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|e| {
            Error::csv_parsing(file, format!("Failed to read data row {}", row_number), Some(e))
        })?;
        conversion.rows_read += 1;

        let field = |i: usize| row.get(i).unwrap_or("").trim();

        let federal = field(columns.federal).to_uppercase();
        if export_columns::EXCLUDED_FEDERAL_CODES.contains(&federal.as_str()) {
            conversion.rows_excluded += 1;
            continue;
        }

        let site = ExportSiteRecord {
            epa_id: field(columns.epa_id).to_string(),
            name: field(columns.name).to_string(),
            city: field(columns.city).to_string(),
            state: field(columns.state).to_string(),
            region: field(columns.region).to_string(),
            federal,
            final_date: field(columns.final_date).to_string(),
            score: parse_score(field(columns.score), row_number, file)?,
        };

        conversion.offer(site);
    }

    debug!(
        "{} rows read, {} excluded, {} duplicates folded",
        conversion.rows_read, conversion.rows_excluded, conversion.duplicates
    );

    Ok(conversion)
}

/// Read and convert a Latin-1 export file
pub fn convert_export_file(path: &Path) -> Result<ExportConversion> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let bytes =
        fs::read(path).map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    let conversion = convert_export_text(&decode_latin1(&bytes), &path.display().to_string())?;

    info!(
        "Converted {} current Final NPL sites from {}",
        conversion.sites().len(),
        path.display()
    );
    Ok(conversion)
}
