//! Tests for extraction module

use super::*;
use crate::error::Error;
use crate::types::ObjectLocation;
use pretty_assertions::assert_eq;
use serde_json::json;

const DAILY: &str = "Time Series (Daily)";

fn location() -> ObjectLocation {
    ObjectLocation::new("landing", "raw/20240101_raw-data-api-response.json")
}

// ============================================================================
// Missing Series Tests
// ============================================================================

#[test]
fn test_extract_missing_series() {
    let doc = json!({"Meta Data": {"2. Symbol": "IBM"}});
    assert!(extract(doc, DAILY).is_empty());
}

#[test]
fn test_extract_series_not_an_object() {
    assert!(extract(json!({DAILY: "n/a"}), DAILY).is_empty());
    assert!(extract(json!({DAILY: [{"1. open": "1"}]}), DAILY).is_empty());
    assert!(extract(json!({DAILY: null}), DAILY).is_empty());
}

#[test]
fn test_extract_document_not_an_object() {
    assert!(extract(json!([1, 2, 3]), DAILY).is_empty());
    assert!(extract(json!("Time Series (Daily)"), DAILY).is_empty());
}

#[test]
fn test_extract_api_error_payload() {
    let doc = json!({"Error Message": "Invalid API call."});
    assert!(extract(doc, DAILY).is_empty());
}

#[test]
fn test_extract_empty_series() {
    assert!(extract(json!({DAILY: {}}), DAILY).is_empty());
}

// ============================================================================
// Extraction Tests
// ============================================================================

#[test]
fn test_extract_preserves_document_order() {
    // Deliberately not sorted by date
    let doc: serde_json::Value = serde_json::from_str(
        r#"{
            "Meta Data": {"1. Information": "Daily Prices"},
            "Time Series (Daily)": {
                "2024-01-03": {"1. open": "101.0"},
                "2024-01-01": {"1. open": "99.0"},
                "2024-01-02": {"1. open": "100.0"}
            }
        }"#,
    )
    .unwrap();

    let records = extract(doc, DAILY);
    let periods: Vec<&str> = records.iter().map(PeriodRecord::period).collect();
    assert_eq!(periods, vec!["2024-01-03", "2024-01-01", "2024-01-02"]);
    assert_eq!(records[1].values(), &json!({"1. open": "99.0"}));
}

#[test]
fn test_extract_values_only() {
    let doc = json!({DAILY: {"2024-01-02": {"1. open": "100.0", "5. volume": "42"}}});

    let records = extract(doc, DAILY);
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].clone().into_values(),
        json!({"1. open": "100.0", "5. volume": "42"})
    );
    assert!(records[0].values().get("2024-01-02").is_none());
}

#[test]
fn test_extract_keeps_non_object_values() {
    let doc = json!({DAILY: {"2024-01-02": "halted", "2024-01-03": 7}});

    let records = extract(doc, DAILY);
    assert_eq!(records[0].values(), &json!("halted"));
    assert_eq!(records[1].values(), &json!(7));
}

#[test]
fn test_extract_ignores_other_series() {
    let doc = json!({
        "Time Series (5min)": {"2024-01-02 10:00:00": {"1. open": "1"}},
        DAILY: {"2024-01-02": {"1. open": "2"}}
    });

    let records = extract(doc, DAILY);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].values(), &json!({"1. open": "2"}));
}

#[test]
fn test_series_extractor_custom_key() {
    let extractor = SeriesExtractor::new("Weekly Time Series");
    assert_eq!(extractor.series_key(), "Weekly Time Series");

    let doc = json!({"Weekly Time Series": {"2024-01-05": {"4. close": "10"}}});
    assert_eq!(extractor.extract(doc).len(), 1);
}

#[test]
fn test_series_extractor_default_key() {
    assert_eq!(SeriesExtractor::default().series_key(), DAILY);
}

#[test]
fn test_period_record_serializes_values_only() {
    let record = PeriodRecord::new("2024-01-02", json!({"1. open": "100.0"}));
    assert_eq!(
        serde_json::to_string(&record).unwrap(),
        r#"{"1. open":"100.0"}"#
    );
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_parse_document() {
    let doc = parse_document(br#"{"a": 1}"#, &location()).unwrap();
    assert_eq!(doc, json!({"a": 1}));
}

#[test]
fn test_parse_document_malformed() {
    let err = parse_document(b"{\"a\": ", &location()).unwrap_err();
    match err {
        Error::MalformedPayload { location: loc, .. } => assert_eq!(loc, location()),
        other => panic!("Expected MalformedPayload, got {other:?}"),
    }
}

#[test]
fn test_parse_document_invalid_utf8() {
    let err = parse_document(&[b'"', 0xff, 0xfe, b'"'], &location()).unwrap_err();
    assert!(matches!(err, Error::MalformedPayload { .. }));
}

#[test]
fn test_parse_document_empty() {
    assert!(parse_document(b"", &location()).is_err());
}
