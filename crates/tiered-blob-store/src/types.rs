//! Shared types

use serde::Serialize;

/// Point-in-time snapshot of the memory cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub total_size: u64,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_default() {
        let stats = CacheStats::default();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_cache_stats_serialization() {
        let stats = CacheStats {
            entries: 3,
            total_size: 4096,
            hits: 10,
            misses: 2,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"entries\":3"));
        assert!(json.contains("\"total_size\":4096"));
    }
}
