//! Blob store traits

use crate::error::Result;
use crate::types::ObjectLocation;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

/// Whole-object key/value storage
///
/// Keys are `/`-delimited by convention; implementations must not assume
/// directory entities exist.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Read a whole object
    ///
    /// Fails with [`Error::Retrieval`](crate::Error::Retrieval) when the
    /// object does not exist or the store cannot be reached.
    async fn get(&self, location: &ObjectLocation) -> Result<Bytes>;

    /// Write a whole object, replacing anything already stored at the key
    ///
    /// Fails with [`Error::Write`](crate::Error::Write).
    async fn put(&self, location: &ObjectLocation, data: Bytes) -> Result<()>;
}

/// Blob store shared between tasks
pub type SharedBlobStore = Arc<dyn BlobStore>;
