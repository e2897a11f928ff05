//! Content-addressed blob storage.
//!
//! Blobs are stored under the lowercase hex digest of their bytes (see
//! [`key::derive_key`]) in a single [`store::Container`]. Backends implement the
//! [`store::BlobStore`] capability set so the remote object store and the
//! in-process doubles are interchangeable.

pub mod key;
pub mod local_store;
pub mod memory_store;
pub mod s3_store;
pub mod store;
pub mod stores;

pub use key::{derive_key, MAX_PASTE_SIZE};
pub use store::{BlobStore, Container, StoreError, StoreResult};
pub use stores::BlobStores;
