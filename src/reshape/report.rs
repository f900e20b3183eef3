//! Batch outcome reporting

use crate::error::{Error, Result};
use crate::types::{JsonValue, ObjectLocation};
use serde::Serialize;
use serde_json::json;

/// What a successful record produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutput {
    /// Raw object that was read
    pub source: ObjectLocation,
    /// Converted object that was written
    pub destination: ObjectLocation,
    /// Number of JSON lines written
    pub records: usize,
    /// Size of the written object
    pub bytes: usize,
}

/// Outcome of one arrival record
#[derive(Debug)]
pub struct RecordOutcome {
    /// Raw object the record pointed at
    pub source: ObjectLocation,
    /// Output or the error that stopped this record
    pub result: Result<RecordOutput>,
}

impl RecordOutcome {
    /// Whether the record was converted and written
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-record outcomes of one batch, in batch order
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome
    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// All outcomes in batch order
    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    /// Number of records processed
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the batch was empty
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outputs of successful records
    pub fn succeeded(&self) -> impl Iterator<Item = &RecordOutput> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed records with their errors
    pub fn failed(&self) -> impl Iterator<Item = (&ObjectLocation, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.source, e)))
    }

    /// Number of successful records
    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    /// Number of failed records
    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    /// Whether every record succeeded
    pub fn is_complete_success(&self) -> bool {
        self.outcomes.iter().all(RecordOutcome::is_success)
    }

    /// JSON summary for printing
    pub fn summary(&self) -> JsonValue {
        let written: Vec<JsonValue> = self
            .succeeded()
            .map(|out| {
                json!({
                    "source": out.source.to_string(),
                    "destination": out.destination.to_string(),
                    "records": out.records,
                    "bytes": out.bytes,
                })
            })
            .collect();
        let failed: Vec<JsonValue> = self
            .failed()
            .map(|(source, err)| {
                json!({
                    "source": source.to_string(),
                    "kind": err.kind(),
                    "retryable": err.is_retryable(),
                    "error": err.to_string(),
                })
            })
            .collect();

        json!({
            "type": "BATCH",
            "processed": self.len(),
            "succeeded": self.success_count(),
            "failed_count": self.failure_count(),
            "written": written,
            "failed": failed,
        })
    }
}
