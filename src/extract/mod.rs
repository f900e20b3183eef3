//! Time-series extraction module
//!
//! Locates the keyed time series inside a landed API response and turns it
//! into an ordered list of [`PeriodRecord`]s.
//!
//! # Overview
//!
//! A response looks like
//!
//! ```text
//! {
//!   "Meta Data": {...},
//!   "Time Series (Daily)": {
//!     "2024-01-02": {"1. open": "100.0", ...},
//!     "2024-01-03": {"1. open": "101.0", ...}
//!   }
//! }
//! ```
//!
//! Extraction yields one record per entry of the series, in document order.
//! A missing or non-object series yields no records and no error.

mod series;
mod types;

pub use series::{extract, parse_document, SeriesExtractor};
pub use types::{PeriodRecord, RecordExtractor};

#[cfg(test)]
mod tests;
