//! Reshape module
//!
//! Turns landed raw API responses into JSON Lines artifacts.
//!
//! # Overview
//!
//! For every [`ArrivalRecord`](crate::event::ArrivalRecord) of a batch, in
//! order and independently of its siblings:
//!
//! 1. read the raw object from the blob store
//! 2. parse it as JSON
//! 3. extract the configured time series
//! 4. render the records as JSON Lines
//! 5. derive the output key from the source key
//! 6. write the artifact, replacing whatever was there
//!
//! A failing record is logged and reported; it never stops the batch.
//! Nothing is retried here; redelivery belongs to the caller.

mod driver;
mod key;
mod report;

pub use driver::ReshapeDriver;
pub use key::derive_output_key;
pub use report::{BatchReport, RecordOutcome, RecordOutput};
