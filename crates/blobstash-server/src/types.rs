//! Response types

use serde::Serialize;
use tiered_blob_store::CacheStats;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

/// Listing of all stored keys, in the durable store's scan order
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub code: i32,
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            uptime_secs: 3600,
            cache: CacheStats {
                entries: 4,
                total_size: 2048,
                hits: 12,
                misses: 3,
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":3600"));
        assert!(json.contains("\"hits\":12"));
    }

    #[test]
    fn test_list_response_serialization() {
        let response = ListResponse {
            code: 0,
            files: vec!["a.txt".to_string(), "b.png".to_string()],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"code":0,"files":["a.txt","b.png"]}"#);
    }
}
