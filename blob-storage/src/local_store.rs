use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use async_trait::async_trait;
use tokio::fs;
use crate::store::{BlobStore, StoreError, StoreResult};

/// A `BlobStore` that keeps each blob in a file named by its key.
#[derive(Debug)]
pub struct LocalBlobStore {
    directory: PathBuf,
    tmp_counter: AtomicU64,
}

impl LocalBlobStore {
    /// Opens a store rooted at `directory`, creating it if needed.
    pub async fn open(directory: impl Into<PathBuf>) -> io::Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).await?;
        Ok(Self { directory, tmp_counter: AtomicU64::new(0) })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn blob_path(&self, key: &str) -> Option<PathBuf> {
        // keys are single path components
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return None;
        }
        Some(self.directory.join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        let path = self.blob_path(key)
            .ok_or_else(|| StoreError::backend(format!("invalid blob key {:?}", key)))?;

        // Write then rename so concurrent readers never see a partial file.
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let tmp = self.directory.join(format!(".{}.{}.{}.tmp", key, std::process::id(), n));
        fs::write(&tmp, data).await.map_err(StoreError::backend)?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::backend(e));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        let Some(path) = self.blob_path(key) else {
            return Err(StoreError::NotFound(key.to_string()));
        };
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(key.to_string())),
            Err(e) => Err(StoreError::backend(e)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use uuid::Uuid;
    use crate::key::derive_key;

    #[tokio::test]
    async fn test_put_then_get() {
        let temp_dir = tempdir().unwrap();
        let store = LocalBlobStore::open(temp_dir.path()).await.unwrap();

        let data = b"this is a test paste";
        let key = derive_key(data);

        store.put(&key, data).await.unwrap();

        let retrieved = store.get(&key).await.unwrap();
        assert_eq!(retrieved, data);
        assert!(store.directory().join(&key).exists());
    }

    #[tokio::test]
    async fn test_put_overwrite() {
        let temp_dir = tempdir().unwrap();
        let store = LocalBlobStore::open(temp_dir.path()).await.unwrap();

        let key = Uuid::new_v4().to_string();
        store.put(&key, b"data one").await.unwrap();
        store.put(&key, b"data two").await.unwrap();

        assert_eq!(store.get(&key).await.unwrap(), b"data two");
    }

    #[tokio::test]
    async fn test_empty_blob() {
        let temp_dir = tempdir().unwrap();
        let store = LocalBlobStore::open(temp_dir.path()).await.unwrap();

        let key = derive_key(b"");
        store.put(&key, b"").await.unwrap();
        assert!(store.get(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let store = LocalBlobStore::open(temp_dir.path()).await.unwrap();

        let err = store.get(&derive_key(b"never uploaded")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_path_like_keys() {
        let temp_dir = tempdir().unwrap();
        let store = LocalBlobStore::open(temp_dir.path().join("blobs")).await.unwrap();

        assert!(store.get("../secret").await.unwrap_err().is_not_found());
        assert!(store.get("..").await.unwrap_err().is_not_found());
        assert!(!store.put("a/b", b"data").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        LocalBlobStore::open(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
