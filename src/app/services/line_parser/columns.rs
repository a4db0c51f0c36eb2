//! Column contract for NPL table rows
//!
//! The table's columns are declared once, in order, as `(field, mandatory)`
//! pairs. Field mapping walks this list by index, so the boundary between
//! mandatory and optional columns lives in one place.

use crate::app::models::SiteRecord;

/// Ordered tokens recovered from one table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(Vec<String>);

impl ColumnSet {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A site record field, in table column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteField {
    Region,
    State,
    Name,
    SiteId,
    EpaId,
    Address,
    City,
    Zip,
    County,
    FederalFacility,
    NativeEntity,
    Latitude,
    Longitude,
    NplStatusDate,
}

impl SiteField {
    /// JSON key of this field
    pub fn name(&self) -> &'static str {
        match self {
            SiteField::Region => "region",
            SiteField::State => "state",
            SiteField::Name => "name",
            SiteField::SiteId => "site_id",
            SiteField::EpaId => "epa_id",
            SiteField::Address => "address",
            SiteField::City => "city",
            SiteField::Zip => "zip",
            SiteField::County => "county",
            SiteField::FederalFacility => "federal_facility",
            SiteField::NativeEntity => "native_entity",
            SiteField::Latitude => "latitude",
            SiteField::Longitude => "longitude",
            SiteField::NplStatusDate => "npl_status_date",
        }
    }
}

/// One entry of the column contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: SiteField,
    pub mandatory: bool,
}

const fn required(field: SiteField) -> ColumnSpec {
    ColumnSpec {
        field,
        mandatory: true,
    }
}

const fn optional(field: SiteField) -> ColumnSpec {
    ColumnSpec {
        field,
        mandatory: false,
    }
}

/// Number of leading columns a row must have to become a record
pub const MANDATORY_COLUMNS: usize = 8;

/// Table columns in positional order
pub const SITE_COLUMNS: [ColumnSpec; 14] = [
    required(SiteField::Region),
    required(SiteField::State),
    required(SiteField::Name),
    required(SiteField::SiteId),
    required(SiteField::EpaId),
    required(SiteField::Address),
    required(SiteField::City),
    required(SiteField::Zip),
    optional(SiteField::County),
    optional(SiteField::FederalFacility),
    optional(SiteField::NativeEntity),
    optional(SiteField::Latitude),
    optional(SiteField::Longitude),
    optional(SiteField::NplStatusDate),
];

/// Map a column set onto a site record by position
///
/// Returns `None` when fewer than [`MANDATORY_COLUMNS`] tokens are present;
/// a record is never partially populated. Values are taken verbatim.
/// Tokens beyond the declared columns are ignored.
pub fn map_columns(columns: &ColumnSet) -> Option<SiteRecord> {
    if columns.len() < MANDATORY_COLUMNS {
        return None;
    }

    let mut record = SiteRecord::default();
    for (index, spec) in SITE_COLUMNS.iter().enumerate() {
        if let Some(value) = columns.get(index) {
            record.set(spec.field, value.to_string());
        }
    }

    Some(record)
}

impl SiteRecord {
    /// Assign a field; optional fields become present
    pub fn set(&mut self, field: SiteField, value: String) {
        match field {
            SiteField::Region => self.region = value,
            SiteField::State => self.state = value,
            SiteField::Name => self.name = value,
            SiteField::SiteId => self.site_id = value,
            SiteField::EpaId => self.epa_id = value,
            SiteField::Address => self.address = value,
            SiteField::City => self.city = value,
            SiteField::Zip => self.zip = value,
            SiteField::County => self.county = Some(value),
            SiteField::FederalFacility => self.federal_facility = Some(value),
            SiteField::NativeEntity => self.native_entity = Some(value),
            SiteField::Latitude => self.latitude = Some(value),
            SiteField::Longitude => self.longitude = Some(value),
            SiteField::NplStatusDate => self.npl_status_date = Some(value),
        }
    }

    /// Read a field; `None` is the absent marker for optional fields
    pub fn get(&self, field: SiteField) -> Option<&str> {
        match field {
            SiteField::Region => Some(&self.region),
            SiteField::State => Some(&self.state),
            SiteField::Name => Some(&self.name),
            SiteField::SiteId => Some(&self.site_id),
            SiteField::EpaId => Some(&self.epa_id),
            SiteField::Address => Some(&self.address),
            SiteField::City => Some(&self.city),
            SiteField::Zip => Some(&self.zip),
            SiteField::County => self.county.as_deref(),
            SiteField::FederalFacility => self.federal_facility.as_deref(),
            SiteField::NativeEntity => self.native_entity.as_deref(),
            SiteField::Latitude => self.latitude.as_deref(),
            SiteField::Longitude => self.longitude.as_deref(),
            SiteField::NplStatusDate => self.npl_status_date.as_deref(),
        }
    }

    /// Field values in column order
    pub fn values(&self) -> Vec<Option<&str>> {
        SITE_COLUMNS.iter().map(|spec| self.get(spec.field)).collect()
    }
}
