//! Arrival events
//!
//! One [`ArrivalRecord`] per landed object, delivered in ordered batches by
//! the storage notification infrastructure.

use crate::error::{Error, Result};
use crate::types::{JsonValue, ObjectLocation};
use serde::{Deserialize, Serialize};

/// A landed object waiting to be reshaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    /// Where the raw object was written
    #[serde(flatten)]
    pub source: ObjectLocation,
}

impl ArrivalRecord {
    /// Create a record for the given container and key
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            source: ObjectLocation::new(container, key),
        }
    }
}

impl From<ObjectLocation> for ArrivalRecord {
    fn from(source: ObjectLocation) -> Self {
        Self { source }
    }
}

/// Ordered batch of arrival records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalBatch {
    /// Records in delivery order
    #[serde(default)]
    pub records: Vec<ArrivalRecord>,
}

impl ArrivalBatch {
    /// Create a batch from records
    pub fn new(records: Vec<ArrivalRecord>) -> Self {
        Self { records }
    }

    /// Batch of keys that all live in one container
    pub fn from_keys<I, S>(container: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: keys
                .into_iter()
                .map(|key| ArrivalRecord::new(container, key))
                .collect(),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in order
    pub fn iter(&self) -> std::slice::Iter<'_, ArrivalRecord> {
        self.records.iter()
    }

    /// Parse an S3 event notification
    ///
    /// Reads `Records[].s3.bucket.name` and `Records[].s3.object.key`.
    /// Keys are taken verbatim, without URL decoding.
    pub fn from_s3_notification(event: &JsonValue) -> Result<Self> {
        let records = event
            .get("Records")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| Error::invalid_event("missing 'Records' array"))?;

        let records = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let s3 = record
                    .get("s3")
                    .ok_or_else(|| Error::invalid_event(format!("record {idx}: missing 's3'")))?;
                let bucket = s3
                    .pointer("/bucket/name")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| {
                        Error::invalid_event(format!("record {idx}: missing 's3.bucket.name'"))
                    })?;
                let key = s3
                    .pointer("/object/key")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| {
                        Error::invalid_event(format!("record {idx}: missing 's3.object.key'"))
                    })?;
                Ok(ArrivalRecord::new(bucket, key))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Parse either an S3 notification or the plain `{"records": [...]}` form
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| Error::invalid_event(format!("event is not JSON: {e}")))?;

        if value.get("Records").is_some() {
            return Self::from_s3_notification(&value);
        }
        if value.get("records").is_some() {
            return serde_json::from_value(value)
                .map_err(|e| Error::invalid_event(format!("invalid batch: {e}")));
        }
        Err(Error::invalid_event(
            "expected a 'Records' (S3 notification) or 'records' array",
        ))
    }
}

impl<'a> IntoIterator for &'a ArrivalBatch {
    type Item = &'a ArrivalRecord;
    type IntoIter = std::slice::Iter<'a, ArrivalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
