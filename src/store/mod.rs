//! Blob store module
//!
//! Flat key/value object storage used by both pipeline stages.
//!
//! # Overview
//!
//! - [`BlobStore`] is the seam: whole-object `get` and `put`, addressed by
//!   container + key
//! - [`CloudStore`] implements it over `object_store` for S3, R2, GCS,
//!   Azure, the local filesystem and memory

mod cloud;
mod types;

pub use cloud::{CloudStore, StoreBackend};
pub use types::{BlobStore, SharedBlobStore};
