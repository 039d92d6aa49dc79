//! Tiered access coordinator
//!
//! Pure policy layer over the two tiers; it holds no mutable state of its
//! own. Writes go to the durable tier only, reads go cache-first and refill
//! the cache on a durable hit, deletes invalidate the cache before the
//! durable record goes away, and listings never consult the cache.

use std::sync::Arc;

use tracing::debug;

use crate::cache::BlobCache;
use crate::durable::DurableStore;
use crate::error::{Result, StoreError};
use crate::types::CacheStats;

pub struct TieredStore {
    durable: Arc<dyn DurableStore>,
    cache: BlobCache,
}

impl TieredStore {
    pub fn new(durable: Arc<dyn DurableStore>, cache: BlobCache) -> Self {
        Self { durable, cache }
    }

    /// Create a record for `key`. Fails with [`StoreError::AlreadyExists`]
    /// if the key is taken. The cache is untouched: the next read populates
    /// it, so blobs that are never read are never cached.
    pub async fn create(&self, key: &str, blob: Vec<u8>) -> Result<()> {
        // Fast-fail on an existing record. This check is advisory only;
        // the exclusive put below is what actually closes the race with a
        // concurrent create.
        if self.durable.contains(key).await? {
            return Err(StoreError::AlreadyExists);
        }
        self.durable.put_new(key, blob).await
    }

    /// Read `key`, cache-first. `Ok(None)` means no record exists; negative
    /// results are never cached. A durable hit is inserted into the cache
    /// best-effort before being returned.
    pub async fn read(&self, key: &str) -> Result<Option<Arc<Vec<u8>>>> {
        if let Some(blob) = self.cache.get(key).await {
            return Ok(Some(blob));
        }

        match self.durable.get(key).await? {
            Some(bytes) => {
                let blob = Arc::new(bytes);
                // Intentionally ignore the outcome: the cache is an
                // optimization, never a dependency for correctness.
                self.cache.insert(key, blob.clone()).await;
                debug!(key = %key, size = blob.len(), "Cache filled from durable tier");
                Ok(Some(blob))
            }
            None => Ok(None),
        }
    }

    /// Delete `key` from both tiers. Idempotent. The cache entry is gone
    /// before the durable delete starts and both complete before this
    /// returns, which bounds how long a stale entry can outlive its record
    /// to the duration of a concurrently racing read.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.cache.invalidate(key).await;
        self.durable.delete(key).await
    }

    /// All keys, in the durable tier's scan order. The cache is not an
    /// index of existing keys and is never consulted here.
    pub async fn list(&self) -> Result<Vec<String>> {
        self.durable.scan_keys().await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Test hook and maintenance escape hatch: drop the cache entry for
    /// `key` without touching the durable tier.
    pub async fn evict_cached(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}
