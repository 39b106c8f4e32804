//! API Handlers
//!
//! HTTP request handlers exposing the resource cache to the host application.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tokio::sync::RwLock;

use crate::cache::{CacheStats, ResourceCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, EntryResponse, HealthResponse, KeyQuery, PreloadRequest, PreloadResponse,
    RemoveResponse,
};
use crate::preload::{Fetcher, HttpFetcher, Preloader, SharedCache};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache store
    pub cache: SharedCache,
    /// Fetch-through loader bound to the same cache
    pub preloader: Preloader,
}

impl AppState {
    /// Creates a new AppState around `cache`, fetching misses with `fetcher`.
    pub fn new(cache: ResourceCache, fetcher: Arc<dyn Fetcher>) -> Self {
        let cache = Arc::new(RwLock::new(cache));
        Self {
            preloader: Preloader::new(cache.clone(), fetcher),
            cache,
        }
    }

    /// Creates a new AppState from configuration, fetching over HTTP.
    pub fn from_config(config: &Config) -> Self {
        let cache = ResourceCache::new(config.cache.clone());
        Self::new(cache, Arc::new(HttpFetcher::new()))
    }
}

/// Handler for POST /preload
pub async fn preload_handler(
    State(state): State<AppState>,
    Json(req): Json<PreloadRequest>,
) -> Result<Json<PreloadResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let payload = state
        .preloader
        .preload(&req.url, req.options())
        .await
        .ok_or_else(|| CacheError::Unavailable(req.url.clone()))?;

    Ok(Json(PreloadResponse::new(req.url, payload)))
}

/// Handler for GET /entry?key=...
///
/// Counts as a cache lookup.
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<EntryResponse>> {
    let mut cache = state.cache.write().await;
    if cache.get(&query.key).is_none() {
        return Err(CacheError::NotFound(query.key));
    }

    let response = cache
        .peek(&query.key)
        .map(|entry| EntryResponse::new(query.key.clone(), entry));
    response.map(Json).ok_or(CacheError::NotFound(query.key))
}

/// Handler for DELETE /entry?key=...
pub async fn remove_entry_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Json<RemoveResponse> {
    let removed = state.cache.write().await.remove(&query.key);
    Json(RemoveResponse::new(query.key, removed))
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear();
    Json(ClearResponse::new(removed))
}

/// Handler for POST /clear-expired
pub async fn clear_expired_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.write().await.clear_expired();
    Json(ClearResponse::new(removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.read().await.get_stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Payload, SetOptions};
    use crate::preload::FetchedResource;
    use async_trait::async_trait;

    /// Serves every URL as the same JSON document.
    struct JsonFetcher;

    #[async_trait]
    impl Fetcher for JsonFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedResource> {
            if url.contains("missing") {
                return Err(CacheError::Fetch(format!("{}: 404 Not Found", url)));
            }
            Ok(FetchedResource::new(
                Some("application/json".to_string()),
                &br#"{"ok":true}"#[..],
            ))
        }
    }

    fn test_state() -> AppState {
        AppState::new(ResourceCache::default(), Arc::new(JsonFetcher))
    }

    fn preload_request(url: &str) -> PreloadRequest {
        PreloadRequest {
            url: url.to_string(),
            content_type_hint: None,
            ttl_ms: None,
        }
    }

    #[tokio::test]
    async fn test_preload_and_get_entry() {
        let state = test_state();

        let response = preload_handler(State(state.clone()), Json(preload_request("/a")))
            .await
            .unwrap();
        assert_eq!(response.payload, Payload::Json(serde_json::json!({"ok": true})));

        let entry = get_entry_handler(
            State(state),
            Query(KeyQuery {
                key: "/a".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(entry.size_bytes, 11);
    }

    #[tokio::test]
    async fn test_preload_unavailable() {
        let result =
            preload_handler(State(test_state()), Json(preload_request("/missing"))).await;
        assert!(matches!(result, Err(CacheError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_preload_invalid_request() {
        let result = preload_handler(State(test_state()), Json(preload_request(""))).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_get_entry_not_found() {
        let state = test_state();
        let result = get_entry_handler(
            State(state.clone()),
            Query(KeyQuery {
                key: "nope".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(CacheError::NotFound(_))));
        assert_eq!(stats_handler(State(state)).await.misses, 1);
    }

    #[tokio::test]
    async fn test_remove_entry_handler() {
        let state = test_state();
        state
            .cache
            .write()
            .await
            .set("k.txt", Payload::from("v"), SetOptions::new());

        let query = || {
            Query(KeyQuery {
                key: "k.txt".to_string(),
            })
        };
        assert!(remove_entry_handler(State(state.clone()), query()).await.removed);
        assert!(!remove_entry_handler(State(state), query()).await.removed);
    }

    #[tokio::test]
    async fn test_clear_handler_keeps_counters() {
        let state = test_state();
        {
            let mut cache = state.cache.write().await;
            cache.set("a.txt", Payload::from("a"), SetOptions::new());
            cache.set("b.txt", Payload::from("b"), SetOptions::new());
            cache.get("a.txt");
        }

        let response = clear_handler(State(state.clone())).await;
        assert_eq!(response.removed, 2);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.item_count, 0);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn test_clear_expired_handler_nothing_expired() {
        let state = test_state();
        state
            .cache
            .write()
            .await
            .set("a.txt", Payload::from("a"), SetOptions::new());

        let response = clear_expired_handler(State(state)).await;
        assert_eq!(response.removed, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
