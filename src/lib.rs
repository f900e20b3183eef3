// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # series-lake
//!
//! Two-stage ingestion of financial time series into object storage.
//!
//! ## Stages
//!
//! - **Landing**: poll a financial HTTP API on a fixed cadence and write each
//!   JSON response, as received, to the blob store
//! - **Reshaping**: for each landed object announced by an arrival event,
//!   pull out the daily time series and write it back as JSON Lines, one
//!   period per line
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use series_lake::{ArrivalBatch, CloudStore, ReshapeConfig, ReshapeDriver};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> series_lake::Result<()> {
//!     let store = Arc::new(CloudStore::parse("s3://")?);
//!     let driver = ReshapeDriver::new(store, ReshapeConfig::new("my-lake"))?;
//!
//!     let batch = ArrivalBatch::from_keys(
//!         "my-lake",
//!         ["raw/20240101-0900_raw-data-api-response.json"],
//!     );
//!     let report = driver.process(&batch).await;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   financial API                 arrival events
//!        │                              │
//!   ┌────▼─────┐   raw/*.json    ┌──────▼──────┐   converted/*.jsonl
//!   │ landing  ├────────────────►│   reshape   ├──────────────────►
//!   └──────────┘    BlobStore    │ extract →   │     BlobStore
//!                                │ output      │
//!                                └─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document error variant fields before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration for both stages
pub mod config;

/// Blob store interface and backends
pub mod store;

/// Arrival events
pub mod event;

/// Time-series extraction
pub mod extract;

/// JSON Lines output
pub mod output;

/// Reshape driver
pub mod reshape;

/// API polling and raw landing
pub mod landing;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{AppConfig, LandingConfig, ReshapeConfig};
pub use event::{ArrivalBatch, ArrivalRecord};
pub use extract::{extract, PeriodRecord};
pub use landing::LandingProducer;
pub use output::serialize;
pub use reshape::{derive_output_key, BatchReport, ReshapeDriver};
pub use store::{BlobStore, CloudStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
