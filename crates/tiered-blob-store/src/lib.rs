//! Tiered blob storage: a bounded in-memory cache in front of a durable
//! key-value store.
//!
//! The durable tier is the single source of truth; the cache only ever holds
//! copies of records that existed when they were read. Writes go around the
//! cache, reads populate it, deletes invalidate it before touching disk.

mod cache;
mod durable;
mod error;
mod memory;
mod redb_store;
mod tiered;
mod types;

pub use cache::BlobCache;
pub use durable::DurableStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use tiered::TieredStore;
pub use types::CacheStats;
