use std::env;
use std::path::PathBuf;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
    pub cache_max_entry_size: u64,
    pub max_blob_size: usize,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5999);

        let db_path = env::var("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/blobstash.redb"));

        let cache_capacity = env::var("CACHE_CAPACITY_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256 * 1024 * 1024); // 256 MiB

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10 * 60); // 10 minutes

        let max_blob_size = env::var("MAX_BLOB_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10 * 1024 * 1024); // 10 MiB

        let cache_max_entry_size = env::var("CACHE_MAX_ENTRY_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(max_blob_size as u64);

        Self {
            port,
            db_path,
            cache_capacity,
            cache_ttl_secs,
            cache_max_entry_size,
            max_blob_size,
        }
    }
}
