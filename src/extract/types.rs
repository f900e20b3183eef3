//! Extraction types and traits

use crate::types::JsonValue;
use serde::{Serialize, Serializer};

/// One period (e.g. one trading day) of a time series
///
/// Only the values are serialized; the period identifier is kept for
/// logging and inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRecord {
    period: String,
    values: JsonValue,
}

impl PeriodRecord {
    /// Create a record
    pub fn new(period: impl Into<String>, values: JsonValue) -> Self {
        Self {
            period: period.into(),
            values,
        }
    }

    /// Period identifier (the series key, usually a date)
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Metric values as received from the source
    pub fn values(&self) -> &JsonValue {
        &self.values
    }

    /// Consume the record, keeping only the values
    pub fn into_values(self) -> JsonValue {
        self.values
    }
}

impl Serialize for PeriodRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// Trait for pulling period records out of a parsed document
pub trait RecordExtractor: Send + Sync {
    /// Extract records in document order
    ///
    /// Never fails: a document without a usable series yields no records.
    fn extract(&self, document: JsonValue) -> Vec<PeriodRecord>;
}
