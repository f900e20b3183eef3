//! Cloud storage support (S3, R2, GCS, Azure, local, memory)

use super::types::BlobStore;
use crate::error::{Error, Result};
use crate::types::ObjectLocation;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Storage backend a [`CloudStore`] resolves containers against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// AWS S3 (credentials from `AWS_*` environment variables)
    S3,
    /// Cloudflare R2, S3-compatible with `R2_ENDPOINT_URL`
    R2,
    /// Google Cloud Storage
    Gcs,
    /// Azure Blob Storage
    Azure,
    /// One directory per container under the given root
    Local(PathBuf),
    /// Process-local memory, one store per container
    Memory,
}

impl StoreBackend {
    /// Parse a backend URL
    ///
    /// Supported formats:
    /// - `s3://` - AWS S3
    /// - `r2://` - Cloudflare R2 (S3-compatible)
    /// - `gs://` - Google Cloud Storage
    /// - `az://` - Azure Blob Storage
    /// - `memory://` - in-memory store
    /// - `file:///local/path` or `/local/path` - local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::config("Empty store URL"));
        }
        for (prefix, backend) in [
            ("s3://", Self::S3),
            ("r2://", Self::R2),
            ("gs://", Self::Gcs),
            ("az://", Self::Azure),
            ("memory://", Self::Memory),
        ] {
            if let Some(rest) = url.strip_prefix(prefix) {
                // Containers come from events and config, never from the URL
                if !rest.trim_matches('/').is_empty() {
                    return Err(Error::config(format!(
                        "Store URL '{url}' must not name a bucket or path; use '{prefix}'"
                    )));
                }
                return Ok(backend);
            }
        }
        if let Some(path) = url.strip_prefix("file://") {
            Ok(Self::Local(PathBuf::from(path)))
        } else if url.contains("://") {
            Err(Error::config(format!("Unsupported store URL: {url}")))
        } else {
            Ok(Self::Local(PathBuf::from(url)))
        }
    }

    /// Scheme name (s3, r2, gs, az, file, memory)
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::R2 => "r2",
            Self::Gcs => "gs",
            Self::Azure => "az",
            Self::Local(_) => "file",
            Self::Memory => "memory",
        }
    }

    /// Build the object store for one container
    ///
    /// A local container directory is created only when `create` is set;
    /// otherwise a missing directory yields `None`.
    fn build(&self, container: &str, create: bool) -> Result<Option<Arc<dyn ObjectStore>>> {
        let store: Arc<dyn ObjectStore> = match self {
            Self::S3 | Self::R2 => {
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(container);
                // AWS_ENDPOINT is read by from_env(); R2 also honours its own variable
                if *self == Self::R2 {
                    if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                        builder = builder.with_endpoint(endpoint);
                    }
                }
                Arc::new(builder.build().map_err(|e| {
                    Error::config(format!("Failed to create {} client: {e}", self.scheme()))
                })?)
            }
            Self::Gcs => Arc::new(
                GoogleCloudStorageBuilder::from_env()
                    .with_bucket_name(container)
                    .build()
                    .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?,
            ),
            Self::Azure => Arc::new(
                MicrosoftAzureBuilder::from_env()
                    .with_container_name(container)
                    .build()
                    .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?,
            ),
            Self::Local(root) => {
                let dir = root.join(container);
                if create {
                    std::fs::create_dir_all(&dir).map_err(|e| {
                        Error::config(format!("Failed to create directory {}: {e}", dir.display()))
                    })?;
                } else if !dir.is_dir() {
                    return Ok(None);
                }
                Arc::new(
                    LocalFileSystem::new_with_prefix(&dir)
                        .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?,
                )
            }
            Self::Memory => Arc::new(InMemory::new()),
        };
        Ok(Some(store))
    }
}

/// [`BlobStore`] over `object_store`, one client per container
#[derive(Debug)]
pub struct CloudStore {
    backend: StoreBackend,
    /// Clients built so far, keyed by container
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl CloudStore {
    /// Create a store for the given backend
    pub fn new(backend: StoreBackend) -> Self {
        Self {
            backend,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Parse a backend URL and create the store
    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self::new(StoreBackend::parse(url)?))
    }

    /// In-memory store
    pub fn memory() -> Self {
        Self::new(StoreBackend::Memory)
    }

    /// Local filesystem store rooted at `root`
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(StoreBackend::Local(root.into()))
    }

    /// Get the backend
    pub fn backend(&self) -> &StoreBackend {
        &self.backend
    }

    /// Check if this is a cloud backend (not local or memory)
    pub fn is_cloud(&self) -> bool {
        !matches!(self.backend, StoreBackend::Local(_) | StoreBackend::Memory)
    }

    /// Client for a container, built on first use
    ///
    /// Returns `None` for a local container that does not exist yet and
    /// `create` is unset.
    async fn store_for(
        &self,
        container: &str,
        create: bool,
    ) -> Result<Option<Arc<dyn ObjectStore>>> {
        let mut stores = self.stores.lock().await;
        if let Some(store) = stores.get(container) {
            return Ok(Some(Arc::clone(store)));
        }
        let Some(store) = self.backend.build(container, create)? else {
            return Ok(None);
        };
        debug!(
            "Opened {} container '{}'",
            self.backend.scheme(),
            container
        );
        stores.insert(container.to_string(), Arc::clone(&store));
        Ok(Some(store))
    }
}

/// Object path for a key, taken as-is
///
/// Unlike `Path::from`, nothing is percent-encoded and empty, `.` or `..`
/// segments are an error rather than being dropped.
fn object_path(key: &str) -> std::result::Result<ObjectPath, object_store::path::Error> {
    ObjectPath::parse(key)
}

#[async_trait]
impl BlobStore for CloudStore {
    async fn get(&self, location: &ObjectLocation) -> Result<Bytes> {
        let store = self
            .store_for(&location.container, false)
            .await
            .map_err(|e| Error::retrieval(location.clone(), e.to_string()))?
            .ok_or_else(|| Error::retrieval(location.clone(), "object not found"))?;
        let path = object_path(&location.key).map_err(|e| {
            Error::retrieval(location.clone(), format!("invalid object key: {e}"))
        })?;

        let result = store.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                Error::retrieval(location.clone(), "object not found")
            }
            other => Error::retrieval(location.clone(), other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map_err(|e| Error::retrieval(location.clone(), e.to_string()))
    }

    async fn put(&self, location: &ObjectLocation, data: Bytes) -> Result<()> {
        let store = self
            .store_for(&location.container, true)
            .await
            .map_err(|e| Error::write(location.clone(), e.to_string()))?
            .ok_or_else(|| Error::write(location.clone(), "container unavailable"))?;
        let path = object_path(&location.key)
            .map_err(|e| Error::write(location.clone(), format!("invalid object key: {e}")))?;

        store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::write(location.clone(), e.to_string()))?;
        Ok(())
    }
}
