//! API Handlers
//!
//! HTTP request handlers for each admin endpoint. Lookups take the read
//! lock; inserts and busts take the write lock.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{extract::State, Json};

use crate::cache::{CacheEntry, CacheStore, SharedCache};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    BustResponse, EntriesResponse, HasResponse, HealthResponse, InsertRequest, InsertResponse,
    LookupRequest, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache store wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration and preloaded entries.
    pub fn from_config(config: &crate::config::Config, preload: Vec<CacheEntry>) -> Self {
        Self::new(CacheStore::with_entries(config.cache.clone(), preload))
    }
}

/// Handler for POST /lookup
///
/// Returns the first matching entry, or 404 when nothing matches or the
/// body does not identify a request.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Result<Json<CacheEntry>> {
    let Some(descriptor) = req.descriptor() else {
        return Err(CacheError::NotFound(
            "request is missing a method or url, or has unreadable params".to_string(),
        ));
    };

    let entry = state.cache.read().await.find(&descriptor).cloned();
    entry
        .map(Json)
        .ok_or_else(|| CacheError::NotFound(descriptor.to_string()))
}

/// Handler for POST /has
pub async fn has_handler(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Json<HasResponse> {
    let cached = match req.descriptor() {
        Some(descriptor) => state.cache.read().await.has(descriptor),
        None => false,
    };

    Json(HasResponse { cached })
}

/// Handler for PUT /entries
///
/// Offers a response event to the cache. Non-terminal or unsuccessful
/// events are accepted by the endpoint but not stored.
pub async fn insert_handler(
    State(state): State<AppState>,
    Json(req): Json<InsertRequest>,
) -> Result<Json<InsertResponse>> {
    let descriptor = req.request.try_descriptor()?;

    let mut cache = state.cache.write().await;
    let stored = cache.insert(descriptor, &req.event);

    Ok(Json(InsertResponse {
        stored,
        total_entries: cache.len(),
    }))
}

/// Handler for GET /entries
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    let cache = state.cache.read().await;
    Json(EntriesResponse::new(cache.entries()))
}

/// Handler for POST /bust
///
/// Removes the first matching entry only.
pub async fn bust_handler(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Json<BustResponse> {
    let mut cache = state.cache.write().await;
    let removed = req
        .descriptor()
        .and_then(|descriptor| cache.bust(descriptor))
        .map_or(0, |_| 1);

    Json(BustResponse {
        removed,
        total_entries: cache.len(),
    })
}

/// Handler for DELETE /entries
pub async fn bust_all_handler(State(state): State<AppState>) -> Json<BustResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.bust_all();

    Json(BustResponse {
        removed,
        total_entries: cache.len(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(cache.stats().into())
}

/// Handler for GET /config
pub async fn config_handler(State(state): State<AppState>) -> Json<CacheConfig> {
    let cache = state.cache.read().await;
    Json(cache.config().clone())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ResponseEvent, ResponseSnapshot};
    use serde_json::json;

    fn lookup(method: &str, url: &str, params: serde_json::Value) -> LookupRequest {
        LookupRequest {
            method: Some(method.to_string()),
            url: Some(url.to_string()),
            params: Some(params),
        }
    }

    fn insert_ok(url: &str, body: serde_json::Value) -> InsertRequest {
        InsertRequest {
            request: lookup("GET", url, json!(null)),
            event: serde_json::from_value(json!({"type": "response", "status": 200, "body": body}))
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup_handler() {
        let state = AppState::new(CacheStore::default());

        let result = insert_handler(State(state.clone()), Json(insert_ok("/users", json!([1]))))
            .await
            .unwrap();
        assert!(result.stored);
        assert_eq!(result.total_entries, 1);

        let entry = lookup_handler(State(state), Json(lookup("GET", "/users", json!({}))))
            .await
            .unwrap();
        assert_eq!(entry.response.body, json!([1]));
    }

    #[tokio::test]
    async fn test_lookup_missing_url_is_not_found() {
        let state = AppState::new(CacheStore::default());
        let req = LookupRequest {
            method: Some("GET".into()),
            ..LookupRequest::default()
        };

        let result = lookup_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_insert_progress_event_not_stored() {
        let state = AppState::new(CacheStore::default());
        let req = InsertRequest {
            request: lookup("GET", "/users", json!(null)),
            event: ResponseEvent::UploadProgress {
                loaded: 1,
                total: Some(2),
            },
        };

        let result = insert_handler(State(state.clone()), Json(req)).await.unwrap();
        assert!(!result.stored);
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_invalid_request() {
        let state = AppState::new(CacheStore::default());
        let req = InsertRequest {
            request: LookupRequest::default(),
            event: ResponseEvent::Sent,
        };

        let result = insert_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_insert_unreadable_params_rejected() {
        let state = AppState::new(CacheStore::default());
        let req = InsertRequest {
            request: LookupRequest {
                method: Some("GET".to_string()),
                url: Some("/users".to_string()),
                params: Some(json!(42)),
            },
            event: ResponseEvent::Response(ResponseSnapshot::ok(json!([]))),
        };

        let result = insert_handler(State(state.clone()), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_bust_handlers() {
        let state = AppState::new(CacheStore::default());
        insert_handler(State(state.clone()), Json(insert_ok("/a", json!(1))))
            .await
            .unwrap();
        insert_handler(State(state.clone()), Json(insert_ok("/a", json!(2))))
            .await
            .unwrap();
        insert_handler(State(state.clone()), Json(insert_ok("/b", json!(3))))
            .await
            .unwrap();

        let response = bust_handler(State(state.clone()), Json(lookup("GET", "/a", json!(null)))).await;
        assert_eq!(response.removed, 1);
        assert_eq!(response.total_entries, 2);

        let response = bust_handler(State(state.clone()), Json(LookupRequest::default())).await;
        assert_eq!(response.removed, 0);

        let response = bust_all_handler(State(state.clone())).await;
        assert_eq!(response.removed, 2);
        assert_eq!(response.total_entries, 0);
    }

    #[tokio::test]
    async fn test_has_and_stats_handlers() {
        let state = AppState::new(CacheStore::default());
        insert_handler(State(state.clone()), Json(insert_ok("/a", json!(1))))
            .await
            .unwrap();

        let hit = has_handler(State(state.clone()), Json(lookup("GET", "/a", json!({"q": ""})))).await;
        assert!(hit.cached);
        let miss = has_handler(State(state.clone()), Json(lookup("GET", "/a", json!({"q": "x"})))).await;
        assert!(!miss.cached);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stored, 1);
    }

    #[tokio::test]
    async fn test_config_and_health_handlers() {
        let state = AppState::new(CacheStore::default());
        let config = config_handler(State(state)).await;
        assert!(config.enable_interceptor);

        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
