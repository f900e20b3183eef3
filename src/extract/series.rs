//! Keyed time-series extraction

use super::types::{PeriodRecord, RecordExtractor};
use crate::config::DAILY_SERIES_FIELD;
use crate::error::{Error, Result};
use crate::types::{JsonValue, ObjectLocation};

/// Extractor for a series stored under a fixed top-level field
#[derive(Debug, Clone)]
pub struct SeriesExtractor {
    /// Top-level field holding the series
    series_key: String,
}

impl Default for SeriesExtractor {
    fn default() -> Self {
        Self::new(DAILY_SERIES_FIELD)
    }
}

impl SeriesExtractor {
    /// Create an extractor for the given field
    pub fn new(series_key: impl Into<String>) -> Self {
        Self {
            series_key: series_key.into(),
        }
    }

    /// Get the series field name
    pub fn series_key(&self) -> &str {
        &self.series_key
    }
}

impl RecordExtractor for SeriesExtractor {
    fn extract(&self, document: JsonValue) -> Vec<PeriodRecord> {
        extract(document, &self.series_key)
    }
}

/// Extract the entries of `series_key` in document order
///
/// The period identifiers are not re-attached to the values.
pub fn extract(document: JsonValue, series_key: &str) -> Vec<PeriodRecord> {
    let JsonValue::Object(mut fields) = document else {
        return Vec::new();
    };

    match fields.remove(series_key) {
        Some(JsonValue::Object(series)) => series
            .into_iter()
            .map(|(period, values)| PeriodRecord::new(period, values))
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse raw object bytes as a JSON document
pub fn parse_document(bytes: &[u8], location: &ObjectLocation) -> Result<JsonValue> {
    serde_json::from_slice(bytes).map_err(|e| Error::malformed(location.clone(), e.to_string()))
}
