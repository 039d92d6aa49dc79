//! Error types for the tiered blob store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The key already has a durable record. Surfaced by the exclusive put;
    /// never the result of a silent overwrite.
    #[error("key already exists")]
    AlreadyExists,

    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StoreError {
    /// True for failures that are safe to retry later: the durable tier is
    /// never left partially written.
    pub fn is_transient(&self) -> bool {
        !matches!(self, StoreError::AlreadyExists)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
