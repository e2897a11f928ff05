use std::error::Error;
use async_trait::async_trait;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("blob {0} not found")]
    NotFound(String),

    #[error("storage backend failure: {0}")]
    Backend(#[source] Box<dyn Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        StoreError::Backend(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// The remote location every blob lives in. Fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub namespace: String,
    pub bucket: String,
}

impl Container {
    pub fn new(namespace: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            bucket: bucket.into(),
        }
    }
}

/// Storing and fetching blobs by key.
///
/// Implementations hold no cached copy of blob data; durability is the
/// backend's concern. A single instance is shared by every request handler.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `data` under `key`, replacing whatever was there.
    async fn put(&self, key: &str, data: &[u8]) -> StoreResult<()>;

    /// Reads the bytes stored under `key`. A missing object is
    /// [`StoreError::NotFound`], never [`StoreError::Backend`].
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>>;
}
