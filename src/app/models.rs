//! Core data structures for NPL ingestion
//!
//! This module defines the line and record types flowing through the
//! tabular line parser, and the normalized output document shared by
//! every ingestion path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of extracted text with its origin, used for error attribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based page number
    pub page: u32,

    /// 1-based line index within that page's output
    pub line: u32,

    /// Original text, untrimmed
    pub text: String,
}

impl RawLine {
    pub fn new(page: u32, line: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            line,
            text: text.into(),
        }
    }
}

/// A line that could not be mapped to the mandatory fields
///
/// The original text is retained verbatim for the error log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub page: u32,
    pub line: u32,
    pub text: String,
}

impl From<&RawLine> for ParseFailure {
    fn from(raw: &RawLine) -> Self {
        Self {
            page: raw.page,
            line: raw.line,
            text: raw.text.clone(),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {}, line {}: {}", self.page, self.line, self.text)
    }
}

/// A site recovered from one table row
///
/// The first eight fields are mandatory. Optional fields are `None` when
/// the row is too short to carry them, which serializes as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub region: String,
    pub state: String,
    pub name: String,
    pub site_id: String,
    pub epa_id: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub county: Option<String>,
    pub federal_facility: Option<String>,
    pub native_entity: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub npl_status_date: Option<String>,
}

/// Normalized output document
///
/// The site shape varies per ingestion path, so the document is generic
/// over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDocument<T> {
    pub national_count: usize,

    /// Calendar date of the conversion run, serialized as `YYYY-MM-DD`
    pub as_of: NaiveDate,

    /// Free-text provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub sites: Vec<T>,
}

impl<T> SiteDocument<T> {
    /// Build a document whose count always matches its sites
    pub fn new(sites: Vec<T>, as_of: NaiveDate) -> Self {
        Self {
            national_count: sites.len(),
            as_of,
            source: None,
            sites,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_display() {
        let raw = RawLine::new(3, 17, "01  MA  Truncated row");
        let failure = ParseFailure::from(&raw);
        assert_eq!(failure.to_string(), "Page 3, line 17: 01  MA  Truncated row");
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let record = SiteRecord {
            region: "01".to_string(),
            zip: "".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["zip"], serde_json::Value::String(String::new()));
        assert!(json["county"].is_null());
        assert!(json["npl_status_date"].is_null());
    }

    #[test]
    fn test_document_shape() {
        let as_of = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let doc = SiteDocument::new(vec![SiteRecord::default()], as_of);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["national_count"], 1);
        assert_eq!(json["as_of"], "2025-11-10");
        assert!(json.get("source").is_none());

        let doc = doc.with_source("EPA");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["source"], "EPA");
    }

    #[test]
    fn test_document_key_order() {
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let doc = SiteDocument::new(Vec::<SiteRecord>::new(), as_of).with_source("x");
        let text = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            text,
            r#"{"national_count":0,"as_of":"2025-01-02","source":"x","sites":[]}"#
        );
    }
}
