//! Tests for the column contract and positional mapping

use super::super::columns::{
    ColumnSet, MANDATORY_COLUMNS, SITE_COLUMNS, SiteField, map_columns,
};

#[test]
fn test_contract_boundary_matches_declared_constant() {
    let mandatory = SITE_COLUMNS.iter().filter(|spec| spec.mandatory).count();
    assert_eq!(mandatory, MANDATORY_COLUMNS);

    // Mandatory columns form a prefix
    assert!(SITE_COLUMNS[..MANDATORY_COLUMNS].iter().all(|s| s.mandatory));
    assert!(SITE_COLUMNS[MANDATORY_COLUMNS..].iter().all(|s| !s.mandatory));
}

#[test]
fn test_contract_names_match_record_keys() {
    let names: Vec<&str> = SITE_COLUMNS.iter().map(|s| s.field.name()).collect();
    assert_eq!(
        names,
        vec![
            "region",
            "state",
            "name",
            "site_id",
            "epa_id",
            "address",
            "city",
            "zip",
            "county",
            "federal_facility",
            "native_entity",
            "latitude",
            "longitude",
            "npl_status_date",
        ]
    );

    // Serialized key order follows the contract
    let json = serde_json::to_string(&crate::app::models::SiteRecord::default()).unwrap();
    let mut last = 0;
    for name in names {
        let position = json.find(&format!("\"{}\":", name)).unwrap();
        assert!(position >= last, "{} out of order", name);
        last = position;
    }
}

#[test]
fn test_exactly_mandatory_columns() {
    let columns: ColumnSet = ["01", "MA", "Acme", "0101", "MAD1", "1 Main St", "Boston", "02101"]
        .into_iter()
        .collect();

    let record = map_columns(&columns).unwrap();
    assert_eq!(record.region, "01");
    assert_eq!(record.zip, "02101");
    assert_eq!(record.county, None);
    assert_eq!(record.federal_facility, None);
    assert_eq!(record.native_entity, None);
    assert_eq!(record.latitude, None);
    assert_eq!(record.longitude, None);
    assert_eq!(record.npl_status_date, None);
}

#[test]
fn test_partial_optional_columns() {
    let columns: ColumnSet = ["01", "MA", "Acme", "0101", "MAD1", "1 Main St", "Boston", "02101", "Suffolk", "Yes"]
        .into_iter()
        .collect();

    let record = map_columns(&columns).unwrap();
    assert_eq!(record.county.as_deref(), Some("Suffolk"));
    assert_eq!(record.federal_facility.as_deref(), Some("Yes"));
    assert_eq!(record.native_entity, None);
}

#[test]
fn test_too_few_columns_maps_to_nothing() {
    let columns: ColumnSet = ["01", "MA", "Acme", "0101", "MAD1", "1 Main St", "Boston"]
        .into_iter()
        .collect();
    assert!(map_columns(&columns).is_none());
    assert!(map_columns(&ColumnSet::default()).is_none());
}

#[test]
fn test_content_is_not_validated() {
    let columns: ColumnSet = ["x", "y", "z", "", "?", "-", "!", "not-a-zip"]
        .into_iter()
        .collect();
    let record = map_columns(&columns).unwrap();
    assert_eq!(record.zip, "not-a-zip");
    assert_eq!(record.site_id, "");
}

#[test]
fn test_extra_columns_are_ignored() {
    let tokens: Vec<String> = (0..16).map(|i| format!("c{}", i)).collect();
    let record = map_columns(&ColumnSet::new(tokens)).unwrap();
    assert_eq!(record.npl_status_date.as_deref(), Some("c13"));
}

#[test]
fn test_get_and_set_round_trip() {
    let mut record = crate::app::models::SiteRecord::default();
    for (i, spec) in SITE_COLUMNS.iter().enumerate() {
        record.set(spec.field, format!("v{}", i));
    }
    for (i, spec) in SITE_COLUMNS.iter().enumerate() {
        assert_eq!(record.get(spec.field), Some(format!("v{}", i).as_str()));
    }
    assert_eq!(record.get(SiteField::Latitude), Some("v11"));
}
