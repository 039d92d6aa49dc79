//! In-memory durable-store implementation
//!
//! Backed by a `BTreeMap` under an async `RwLock`, so scans come out in key
//! order from a consistent view. Useful for tests and ephemeral deployments;
//! "durable" here only means it honors the store contract's semantics, not
//! that it survives restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::durable::DurableStore;
use crate::error::{Result, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put_new(&self, key: &str, blob: Vec<u8>) -> Result<()> {
        // Single write-lock acquisition keeps check-and-insert atomic.
        let mut records = self.records.write().await;
        if records.contains_key(key) {
            return Err(StoreError::AlreadyExists);
        }
        records.insert(key.to_string(), blob);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.records.read().await.contains_key(key))
    }

    async fn scan_keys(&self) -> Result<Vec<String>> {
        Ok(self.records.read().await.keys().cloned().collect())
    }
}
