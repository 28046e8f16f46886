//! # Simulated Content Store Adapter
//!
//! Pins bytes in memory under a CIDv0-shaped identifier derived from their
//! SHA-256 digest. Identical bytes map to the same identifier.

use std::collections::HashMap;

use async_trait::async_trait;
use hc_01_document_registry::{ContentId, ContentStore};
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use shared_types::UpstreamError;
use tracing::debug;

/// In-memory content store.
#[derive(Debug, Default)]
pub struct SimulatedContentStore {
    blobs: RwLock<HashMap<ContentId, Vec<u8>>>,
    fail_next: Mutex<Option<String>>,
}

impl SimulatedContentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `put` fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock() = Some(message.into());
    }

    /// Read back pinned bytes.
    pub fn get(&self, cid: &str) -> Option<Vec<u8>> {
        self.blobs.read().get(cid).cloned()
    }

    /// Number of pinned objects.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Check if nothing is pinned.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    fn cid_for(bytes: &[u8]) -> ContentId {
        // "Qm" + 44 characters, the length of a CIDv0
        let digest = hex::encode(Sha256::digest(bytes));
        format!("Qm{}", &digest[..44])
    }
}

#[async_trait]
impl ContentStore for SimulatedContentStore {
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, UpstreamError> {
        if let Some(message) = self.fail_next.lock().take() {
            return Err(UpstreamError::content_store(message));
        }
        let cid = Self::cid_for(bytes);
        self.blobs.write().insert(cid.clone(), bytes.to_vec());
        debug!(cid = %cid, size = bytes.len(), "[store] Content pinned");
        Ok(cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_is_content_addressed() {
        let store = SimulatedContentStore::new();
        let a = store.put(b"blood panel").await.unwrap();
        let b = store.put(b"blood panel").await.unwrap();
        let c = store.put(b"x-ray").await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 46);
        assert!(a.starts_with("Qm"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a).unwrap(), b"blood panel");
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = SimulatedContentStore::new();
        store.fail_next("pinning quota exceeded");
        let err = store.put(b"scan").await.unwrap_err();
        assert_eq!(err.message, "pinning quota exceeded");
        assert!(store.is_empty());
    }
}
