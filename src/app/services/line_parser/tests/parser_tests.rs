//! Tests for the main tabular line parser functionality

use super::*;
use crate::Error;
use crate::app::models::RawLine;
use crate::app::services::line_parser::{
    ColumnSet, ColumnTolerance, LineOutcome, LineParser, SanityBand,
};

fn parser() -> LineParser {
    LineParser::new(SanityBand::new(350, 400))
}

#[test]
fn test_counts_balance_for_fixture() {
    let lines = fixture(370, 5);
    let result = parser().parse(&lines);

    assert_eq!(result.records().len(), 370);
    assert_eq!(result.failures().len(), 5);
    assert_eq!(
        result.records().len() + result.failures().len(),
        result.lines_processed()
    );
    assert_eq!(result.lines_skipped(), lines.len() - 375);
}

#[test]
fn test_known_good_fixture_passes_gate() {
    let lines = fixture(370, 5);
    let result = parser().parse_checked(&lines, "Parsing").unwrap();
    assert_eq!(result.records().len(), 370);
    assert_eq!(result.failures().len(), 5);
}

#[test]
fn test_layout_regression_fails_gate() {
    let lines = fixture(10, 0);
    let result = parser().parse_checked(&lines, "Parsing");

    match result {
        Err(Error::SanityGate {
            count, min, max, ..
        }) => {
            assert_eq!(count, 10);
            assert_eq!(min, 350);
            assert_eq!(max, 400);
        }
        other => panic!("Expected SanityGate error, got {:?}", other),
    }
}

#[test]
fn test_gate_edges_are_inclusive() {
    assert!(parser().parse_checked(&fixture(350, 0), "Parsing").is_ok());
    assert!(parser().parse_checked(&fixture(400, 0), "Parsing").is_ok());
    assert!(parser().parse_checked(&fixture(349, 0), "Parsing").is_err());
    assert!(parser().parse_checked(&fixture(401, 0), "Parsing").is_err());
}

#[test]
fn test_failures_do_not_count_toward_gate() {
    // 349 records plus plenty of malformed lines is still out of band
    let result = parser().parse_checked(&fixture(349, 30), "Parsing");
    assert!(matches!(result, Err(Error::SanityGate { count: 349, .. })));
}

#[test]
fn test_eight_columns_yield_absent_optionals() {
    let raw = RawLine::new(1, 2, mandatory_row(4));
    match parser().parse_line(&raw) {
        LineOutcome::Record(record) => {
            assert_eq!(record.region, "05");
            assert_eq!(record.name, "Acme Landfill 4");
            assert_eq!(record.city, "New Bedford");
            assert_eq!(record.zip, "02740");
            assert!(record.county.is_none());
            assert!(record.federal_facility.is_none());
            assert!(record.native_entity.is_none());
            assert!(record.latitude.is_none());
            assert!(record.longitude.is_none());
            assert!(record.npl_status_date.is_none());
        }
        other => panic!("Expected record, got {:?}", other),
    }
}

#[test]
fn test_full_row_maps_all_fields() {
    let raw = RawLine::new(1, 2, full_row(12));
    match parser().parse_line(&raw) {
        LineOutcome::Record(record) => {
            assert_eq!(record.county.as_deref(), Some("Bristol"));
            assert_eq!(record.federal_facility.as_deref(), Some("No"));
            assert_eq!(record.native_entity.as_deref(), Some("No"));
            assert_eq!(record.latitude.as_deref(), Some("41.6012"));
            assert_eq!(record.longitude.as_deref(), Some("-70.9012"));
            assert_eq!(record.npl_status_date.as_deref(), Some("09/08/1983"));
        }
        other => panic!("Expected record, got {:?}", other),
    }
}

#[test]
fn test_short_line_keeps_original_text() {
    let text = "   05  OH  Truncated   Row  ";
    let raw = RawLine::new(7, 31, text);
    match parser().parse_line(&raw) {
        LineOutcome::Failure(failure) => {
            assert_eq!(failure.page, 7);
            assert_eq!(failure.line, 31);
            assert_eq!(failure.text, text);
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[test]
fn test_headers_and_blanks_are_excluded() {
    let lines = vec![
        RawLine::new(1, 1, "Region  State  Site Name  ..."),
        RawLine::new(1, 2, ""),
        RawLine::new(1, 3, "    "),
        RawLine::new(1, 4, "Region 5 continued"),
        RawLine::new(1, 5, "Final NPL  Site Name  listing"),
    ];
    let result = parser().parse(&lines);

    assert!(result.records().is_empty());
    assert!(result.failures().is_empty());
    assert_eq!(result.lines_processed(), 0);
    assert_eq!(result.lines_skipped(), 5);
}

#[test]
fn test_record_order_matches_input_order() {
    let lines = paginate((0..90).map(full_row).collect(), 25);
    let result = LineParser::new(SanityBand::unbounded()).parse(&lines);

    let names: Vec<&str> = result.records().iter().map(|r| r.name.as_str()).collect();
    let expected: Vec<String> = (0..90).map(|n| format!("Acme Landfill {}", n)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_failure_attribution_across_pages() {
    let rows = vec![full_row(0), malformed_row(0), full_row(1), malformed_row(1)];
    let lines = paginate(rows, 2);
    let result = LineParser::new(SanityBand::unbounded()).parse(&lines);

    let failures = result.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!((failures[0].page, failures[0].line), (1, 3));
    assert_eq!((failures[1].page, failures[1].line), (2, 3));
    assert_eq!(failures[1].text, malformed_row(1));
}

#[test]
fn test_empty_input() {
    let result = parser().parse(&[]);
    assert_eq!(result.lines_processed(), 0);
    assert!(parser().parse_checked(&[], "Parsing").is_err());
}

/// Splits a merged "STATE NAME" column the way an OCR engine sometimes
/// produces it
#[derive(Debug)]
struct SplitMergedState;

impl ColumnTolerance for SplitMergedState {
    fn reconcile(&self, columns: ColumnSet) -> ColumnSet {
        let mut tokens = columns.into_tokens();
        if tokens.len() == 7 {
            if let Some((state, name)) = tokens[1].clone().split_once(' ') {
                tokens[1] = state.to_string();
                tokens.insert(2, name.to_string());
            }
        }
        ColumnSet::new(tokens)
    }
}

#[test]
fn test_custom_tolerance_is_applied_before_width_check() {
    let text = "01  MA Acme Landfill  0101  MAD000000001  1 Main St  Boston  02101";
    let raw = RawLine::new(1, 1, text);

    let exact = LineParser::new(SanityBand::unbounded());
    assert!(matches!(exact.parse_line(&raw), LineOutcome::Failure(_)));

    let tolerant = exact.with_tolerance(SplitMergedState);
    match tolerant.parse_line(&raw) {
        LineOutcome::Record(record) => {
            assert_eq!(record.state, "MA");
            assert_eq!(record.name, "Acme Landfill");
            assert_eq!(record.zip, "02101");
        }
        other => panic!("Expected record, got {:?}", other),
    }
}

#[test]
fn test_records_survive_json_round_trip() {
    let mut rows: Vec<String> = (0..5).map(full_row).collect();
    rows.extend((5..10).map(mandatory_row));
    let lines = paginate(rows, 4);
    let result = LineParser::new(SanityBand::unbounded()).parse(&lines);

    let json = serde_json::to_string_pretty(result.records()).unwrap();
    let restored: Vec<crate::app::models::SiteRecord> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, result.records());
    for (original, restored) in result.records().iter().zip(&restored) {
        assert_eq!(original.values(), restored.values());
    }
}
