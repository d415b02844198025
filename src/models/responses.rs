//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats};

/// Response body for POST /has
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub cached: bool,
}

/// Response body for PUT /entries
#[derive(Debug, Clone, Serialize)]
pub struct InsertResponse {
    /// Whether the event was accepted by the insertion gate
    pub stored: bool,
    pub total_entries: usize,
}

/// Response body for GET /entries
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub total_entries: usize,
    pub entries: Vec<CacheEntry>,
}

impl EntriesResponse {
    pub fn new(entries: &[CacheEntry]) -> Self {
        Self {
            total_entries: entries.len(),
            entries: entries.to_vec(),
        }
    }
}

/// Response body for POST /bust and DELETE /entries
#[derive(Debug, Clone, Serialize)]
pub struct BustResponse {
    /// Number of entries removed
    pub removed: usize,
    /// Entries left in the cache
    pub total_entries: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub stored: u64,
    pub rejected: u64,
    pub busted: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stored: stats.stored,
            rejected: stats.rejected,
            busted: stats.busted,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
