//! Durable store contract consumed by the coordinator

use async_trait::async_trait;

use crate::error::Result;

/// Persistent, crash-safe mapping from key to blob bytes.
///
/// Implementations must be safe for concurrent use and atomic per key: once
/// `put_new` returns `Ok`, the record survives process restart, and no caller
/// ever observes a partial write. The coordinator takes this as
/// `Arc<dyn DurableStore>` so tests can substitute doubles.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Point lookup. `Ok(None)` means the key has no record.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Exclusive put: fails with [`StoreError::AlreadyExists`] if the key
    /// already has a record, atomically with the insert. This, not any
    /// prior existence check, is what makes concurrent creates safe.
    ///
    /// [`StoreError::AlreadyExists`]: crate::StoreError::AlreadyExists
    async fn put_new(&self, key: &str, blob: Vec<u8>) -> Result<()>;

    /// Idempotent delete: removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    async fn contains(&self, key: &str) -> Result<bool>;

    /// All keys in lexicographic order, read from a single snapshot: keys
    /// created or deleted mid-scan do not flicker the result.
    async fn scan_keys(&self) -> Result<Vec<String>>;
}
