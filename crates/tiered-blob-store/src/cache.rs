//! Bounded memory cache over moka
//!
//! Size-bounded (weigher = blob length) with TTL expiry. The adapter has no
//! error channel: a lookup either hits or misses, and an insert either lands
//! or is silently skipped. Callers must tolerate a miss for any key at any
//! time — entries vanish on TTL expiry or under weight pressure without
//! notice.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::types::CacheStats;

pub struct BlobCache {
    inner: Cache<String, Arc<Vec<u8>>>,
    max_entry_size: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl BlobCache {
    /// `max_capacity` bounds the summed blob sizes in bytes; entries larger
    /// than `max_entry_size` are never admitted; `ttl_secs` bounds how long
    /// any entry lives after insertion.
    pub fn new(max_capacity: u64, ttl_secs: u64, max_entry_size: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .weigher(|_key: &String, blob: &Arc<Vec<u8>>| {
                blob.len().try_into().unwrap_or(u32::MAX)
            })
            .build();

        Self {
            inner,
            max_entry_size,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<u8>>> {
        match self.inner.get(key).await {
            Some(blob) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(blob)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Best-effort insert. Oversized blobs are skipped rather than rejected
    /// with an error; the caller continues as if the entry simply missed.
    pub async fn insert(&self, key: &str, blob: Arc<Vec<u8>>) {
        if blob.len() as u64 > self.max_entry_size {
            debug!(key = %key, size = blob.len(), "Blob exceeds cache entry limit, not caching");
            return;
        }
        self.inner.insert(key.to_string(), blob).await;
    }

    /// Idempotent removal.
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    pub async fn stats(&self) -> CacheStats {
        // Flush pending eviction bookkeeping so the counts are current.
        self.inner.run_pending_tasks().await;
        CacheStats {
            entries: self.inner.entry_count(),
            total_size: self.inner.weighted_size(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_get() {
        let cache = BlobCache::new(1024 * 1024, 3600, 64 * 1024);
        cache.insert("a.txt", Arc::new(b"hello".to_vec())).await;

        let blob = cache.get("a.txt").await.unwrap();
        assert_eq!(blob.as_slice(), b"hello");
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let cache = BlobCache::new(1024, 3600, 512);
        assert!(cache.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_oversized_blob_not_admitted() {
        let cache = BlobCache::new(1024 * 1024, 3600, 8);
        cache.insert("big.bin", Arc::new(vec![0u8; 64])).await;
        assert!(cache.get("big.bin").await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let cache = BlobCache::new(1024, 3600, 512);
        cache.insert("a", Arc::new(b"x".to_vec())).await;
        cache.invalidate("a").await;
        assert!(cache.get("a").await.is_none());
        // Absent key: no-op
        cache.invalidate("a").await;
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let cache = BlobCache::new(1024, 3600, 512);
        cache.insert("a", Arc::new(b"abc".to_vec())).await;

        cache.get("a").await;
        cache.get("a").await;
        cache.get("b").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.total_size, 3);
    }
}
