//! Blobstash - HTTP blob store with a tiered cache
//!
//! Serves opaque blobs addressed by filename: uploads land in an embedded
//! durable store, repeated downloads are absorbed by a bounded in-memory
//! cache in front of it.

mod config;
mod content_type;
mod error;
mod server;
mod types;

use std::sync::Arc;

use tiered_blob_store::{BlobCache, RedbStore, TieredStore};
use tracing::info;

use config::Config;
use server::{start_server, ServerState, SharedState};

#[tokio::main]
async fn main() {
    // Initialize tracing; JSON output for log aggregation when LOG_FORMAT=json
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blobstash_server=info,tiered_blob_store=info".into());

    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Config::from_env();
    info!(port = config.port, db_path = %config.db_path.display(), "Starting blobstash-server");
    info!(
        capacity = config.cache_capacity,
        ttl_secs = config.cache_ttl_secs,
        "Cache configuration"
    );

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Failed to create database directory");
        }
    }

    let durable = RedbStore::open(&config.db_path).expect("Failed to open blob database");
    let cache = BlobCache::new(
        config.cache_capacity,
        config.cache_ttl_secs,
        config.cache_max_entry_size,
    );
    let store = TieredStore::new(Arc::new(durable), cache);

    let state: SharedState = Arc::new(ServerState::new(store, config.max_blob_size));

    if let Err(e) = start_server(state, config.port).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }

    // Dropping the state closes the database; committed writes are already
    // durable at this point.
    info!("Shut down cleanly");
}
