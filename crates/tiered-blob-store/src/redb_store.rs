//! Durable tier backed by a redb embedded database
//!
//! One table maps key to blob bytes. Write transactions commit durably and
//! atomically per key; read transactions are MVCC snapshots, which is what
//! gives `scan_keys` its no-flicker guarantee. redb IO is synchronous, so
//! every operation runs on the blocking thread pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::durable::DurableStore;
use crate::error::{Result, StoreError};

const BLOBS: TableDefinition<&str, &[u8]> = TableDefinition::new("blobs");

/// Production [`DurableStore`] over a redb database file.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) the database at `path` and make sure the blobs
    /// table exists, so readers never race table creation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::create(path.as_ref())?;
        let txn = db.begin_write()?;
        txn.open_table(BLOBS)?;
        txn.commit()?;

        debug!(path = %path.as_ref().display(), "Opened redb blob store");
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl DurableStore for RedbStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let db = self.db.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
            let txn = db.begin_read()?;
            let table = txn.open_table(BLOBS)?;
            Ok(table.get(key.as_str())?.map(|v| v.value().to_vec()))
        })
        .await?
    }

    async fn put_new(&self, key: &str, blob: Vec<u8>) -> Result<()> {
        let db = self.db.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let txn = db.begin_write()?;
            {
                let mut table = txn.open_table(BLOBS)?;
                // Check and insert inside one write transaction: a dropped
                // transaction aborts, so the existing record is untouched.
                if table.get(key.as_str())?.is_some() {
                    return Err(StoreError::AlreadyExists);
                }
                table.insert(key.as_str(), blob.as_slice())?;
            }
            txn.commit()?;
            Ok(())
        })
        .await?
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let db = self.db.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let txn = db.begin_write()?;
            {
                let mut table = txn.open_table(BLOBS)?;
                table.remove(key.as_str())?;
            }
            txn.commit()?;
            Ok(())
        })
        .await?
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let db = self.db.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool> {
            let txn = db.begin_read()?;
            let table = txn.open_table(BLOBS)?;
            Ok(table.get(key.as_str())?.is_some())
        })
        .await?
    }

    async fn scan_keys(&self) -> Result<Vec<String>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let txn = db.begin_read()?;
            let table = txn.open_table(BLOBS)?;
            let mut keys = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                keys.push(key.value().to_string());
            }
            Ok(keys)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir) -> RedbStore {
        RedbStore::open(dir.path().join("blobs.redb")).unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.put_new("photo.jpg", b"jpeg bytes".to_vec()).await.unwrap();
        let blob = store.get("photo.jpg").await.unwrap();
        assert_eq!(blob.as_deref(), Some(b"jpeg bytes".as_slice()));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        assert!(store.get("nope.txt").await.unwrap().is_none());
        assert!(!store.contains("nope.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_new_rejects_duplicate_and_keeps_original() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.put_new("a.txt", b"first".to_vec()).await.unwrap();
        let err = store.put_new("a.txt", b"second".to_vec()).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));

        let blob = store.get("a.txt").await.unwrap();
        assert_eq!(blob.as_deref(), Some(b"first".as_slice()));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.put_new("a.txt", b"data".to_vec()).await.unwrap();
        store.delete("a.txt").await.unwrap();
        assert!(store.get("a.txt").await.unwrap().is_none());

        // Absent key: still Ok
        store.delete("a.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_scan_keys_is_ordered() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.put_new("c.png", b"c".to_vec()).await.unwrap();
        store.put_new("a.png", b"a".to_vec()).await.unwrap();
        store.put_new("b.png", b"b".to_vec()).await.unwrap();

        let keys = store.scan_keys().await.unwrap();
        assert_eq!(keys, vec!["a.png", "b.png", "c.png"]);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blobs.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.put_new("keep.txt", b"persisted".to_vec()).await.unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        let blob = store.get("keep.txt").await.unwrap();
        assert_eq!(blob.as_deref(), Some(b"persisted".as_slice()));
    }

    #[tokio::test]
    async fn test_concurrent_put_new_single_winner() {
        let dir = tempdir().unwrap();
        let store = Arc::new(open_store(&dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put_new("race.bin", vec![i as u8]).await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => winners += 1,
                Err(StoreError::AlreadyExists) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(winners, 1);
    }
}
