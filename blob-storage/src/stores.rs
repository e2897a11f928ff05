use std::sync::Arc;
use crate::local_store::LocalBlobStore;
use crate::memory_store::MemoryBlobStore;
use crate::s3_store::S3BlobStore;
use crate::store::BlobStore;

/// The backends a deployment can be configured with.
#[derive(Debug, Clone)]
pub enum BlobStores {
    S3(S3BlobStore),
    Local(Arc<LocalBlobStore>),
    Memory(Arc<MemoryBlobStore>),
}

impl BlobStores {
    /// Returns a reference to the inner value as a trait object.
    pub fn as_trait(&self) -> &dyn BlobStore {
        match self {
            BlobStores::S3(s) => s,
            BlobStores::Local(s) => s.as_ref(),
            BlobStores::Memory(s) => s.as_ref(),
        }
    }

    /// Returns the backend as a shareable trait object.
    pub fn into_shared(self) -> Arc<dyn BlobStore> {
        match self {
            BlobStores::S3(s) => Arc::new(s),
            BlobStores::Local(s) => s,
            BlobStores::Memory(s) => s,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlobStores::S3(_) => "s3",
            BlobStores::Local(_) => "local",
            BlobStores::Memory(_) => "memory",
        }
    }
}
