//! Reshape driver

use super::key::derive_output_key;
use super::report::{BatchReport, RecordOutcome, RecordOutput};
use crate::config::ReshapeConfig;
use crate::error::Result;
use crate::event::{ArrivalBatch, ArrivalRecord};
use crate::extract::{parse_document, RecordExtractor, SeriesExtractor};
use crate::output::serialize;
use crate::store::SharedBlobStore;
use crate::types::ObjectLocation;
use tracing::{debug, error, info};

/// Runs the reshape pipeline over arrival batches
///
/// Holds no state between records; the same record processed twice writes
/// byte-identical content to the same key.
#[derive(Debug, Clone)]
pub struct ReshapeDriver {
    store: SharedBlobStore,
    config: ReshapeConfig,
    extractor: SeriesExtractor,
}

impl ReshapeDriver {
    /// Create a driver, validating the configuration
    pub fn new(store: SharedBlobStore, config: ReshapeConfig) -> Result<Self> {
        config.validate()?;
        let extractor = SeriesExtractor::new(config.series_field_name.clone());
        Ok(Self {
            store,
            config,
            extractor,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ReshapeConfig {
        &self.config
    }

    /// Where the converted form of `source` is written
    pub fn output_location(&self, source: &ObjectLocation) -> ObjectLocation {
        ObjectLocation::new(
            self.config.destination_container.clone(),
            derive_output_key(&source.key, &self.config),
        )
    }

    /// Process every record of a batch, one at a time, in order
    pub async fn process(&self, batch: &ArrivalBatch) -> BatchReport {
        let mut report = BatchReport::new();

        for record in batch {
            let result = self.process_record(record).await;
            if let Err(e) = &result {
                error!(
                    source = %record.source,
                    kind = e.kind(),
                    "Failed to reshape {}: {e}",
                    record.source.key
                );
            }
            report.push(RecordOutcome {
                source: record.source.clone(),
                result,
            });
        }

        info!(
            "Processed {} records: {} succeeded, {} failed",
            report.len(),
            report.success_count(),
            report.failure_count()
        );
        report
    }

    /// Process a single arrival record
    pub async fn process_record(&self, record: &ArrivalRecord) -> Result<RecordOutput> {
        let source = &record.source;
        info!("Processing {source}");

        let raw = self.store.get(source).await?;
        debug!("Read {} bytes from {source}", raw.len());

        let document = parse_document(&raw, source)?;
        let records = self.extractor.extract(document);
        if records.is_empty() {
            debug!(
                "No '{}' series in {source}, writing empty output",
                self.config.series_field_name
            );
        }

        let content = serialize(&records)?;
        let destination = self.output_location(source);
        let bytes = content.len();
        self.store.put(&destination, content).await?;

        info!("Wrote {} records to {destination}", records.len());
        Ok(RecordOutput {
            source: source.clone(),
            destination,
            records: records.len(),
            bytes,
        })
    }
}
