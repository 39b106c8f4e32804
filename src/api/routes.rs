//! API Routes
//!
//! Configures the Axum router with all resource cache endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_expired_handler, clear_handler, get_entry_handler, health_handler, preload_handler,
    remove_entry_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /preload` - Load a resource through the cache
/// - `GET /entry?key=` - Read a cached entry
/// - `DELETE /entry?key=` - Remove a cached entry
/// - `POST /clear` - Remove all entries
/// - `POST /clear-expired` - Remove expired entries
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/preload", post(preload_handler))
        .route("/entry", get(get_entry_handler).delete(remove_entry_handler))
        .route("/clear", post(clear_handler))
        .route("/clear-expired", post(clear_expired_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Payload, ResourceCache, SetOptions};
    use crate::error::{CacheError, Result};
    use crate::preload::{FetchedResource, Fetcher};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct OfflineFetcher;

    #[async_trait]
    impl Fetcher for OfflineFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedResource> {
            Err(CacheError::Fetch(format!("{}: offline", url)))
        }
    }

    fn create_test_state() -> AppState {
        AppState::new(ResourceCache::default(), Arc::new(OfflineFetcher))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preload_offline_is_unavailable() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/preload")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"url":"https://cdn.example.com/a.png"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_entry_lookup_by_query() {
        let state = create_test_state();
        state.cache.write().await.set(
            "https://cdn.example.com/site.css",
            Payload::from("body{}"),
            SetOptions::new(),
        );
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/entry?key=https%3A%2F%2Fcdn.example.com%2Fsite.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/entry?key=absent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
