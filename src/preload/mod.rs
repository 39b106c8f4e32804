//! Preload Module
//!
//! Fetch-through helper: serve a resource from the cache, or fetch, decode
//! and cache it on a miss.
//!
//! Concurrent preloads of the same URL are not coalesced. Both miss, both
//! fetch, and the last one to finish overwrites the entry.

mod fetcher;

pub use fetcher::{FetchedResource, Fetcher, HttpFetcher};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{BlobHandle, Payload, ResourceCache, ResourceType, SetOptions};
use crate::error::{CacheError, Result};

/// Cache shared between the preloader and other consumers.
pub type SharedCache = Arc<RwLock<ResourceCache>>;

// == Preload Options ==
/// Optional inputs to [`Preloader::preload`].
#[derive(Debug, Clone, Default)]
pub struct PreloadOptions {
    /// Content type assumed when the response does not declare one
    pub content_type_hint: Option<String>,
    /// TTL that bypasses the cache's expiration policy
    pub ttl_override_ms: Option<u64>,
}

impl PreloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type_hint = Some(content_type.into());
        self
    }

    pub fn ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_override_ms = Some(ttl_ms);
        self
    }
}

/// Decoded body plus what the cache needs to store it.
struct Decoded {
    payload: Payload,
    content_type: Option<String>,
    size_bytes: Option<u64>,
}

// == Preloader ==
/// Loads resources through a shared [`ResourceCache`].
#[derive(Clone)]
pub struct Preloader {
    cache: SharedCache,
    fetcher: Arc<dyn Fetcher>,
    next_blob_id: Arc<AtomicU64>,
}

impl Preloader {
    pub fn new(cache: SharedCache, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            cache,
            fetcher,
            next_blob_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Preload ==
    /// Returns the resource at `url`, fetching and caching it on a miss.
    ///
    /// Best effort: fetch and decode failures are logged and yield `None`.
    pub async fn preload(&self, url: &str, options: PreloadOptions) -> Option<Payload> {
        let cached = self.cache.write().await.get(url);
        if let Some(payload) = cached {
            debug!(url, "Preload served from cache");
            return Some(payload);
        }

        let decoded = match self.fetch_and_decode(url, &options).await {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(url, error = %e, "Preload failed");
                return None;
            }
        };

        let set_options = SetOptions {
            content_type_hint: decoded.content_type,
            size_bytes: decoded.size_bytes,
            ttl_override_ms: options.ttl_override_ms,
        };
        self.cache
            .write()
            .await
            .set(url, decoded.payload.clone(), set_options);

        Some(decoded.payload)
    }

    async fn fetch_and_decode(&self, url: &str, options: &PreloadOptions) -> Result<Decoded> {
        let fetched = self.fetcher.fetch(url).await?;
        let content_type = fetched
            .content_type
            .or_else(|| options.content_type_hint.clone());

        // The URL's extension only affects the TTL chosen by the cache
        let family = content_type
            .as_deref()
            .and_then(ResourceType::from_content_type);

        let decoded = match family {
            Some(ResourceType::Image) => {
                let size_bytes = fetched.body.len() as u64;
                let blob = BlobHandle::new(self.blob_id(), content_type.clone(), fetched.body);
                Decoded {
                    payload: Payload::Binary(blob),
                    content_type,
                    size_bytes: Some(size_bytes),
                }
            }
            Some(ResourceType::Json) => {
                let value = serde_json::from_slice(&fetched.body)
                    .map_err(|e| CacheError::Decode(format!("{}: {}", url, e)))?;
                Decoded {
                    payload: Payload::Json(value),
                    content_type,
                    size_bytes: None,
                }
            }
            _ => Decoded {
                payload: Payload::Text(String::from_utf8_lossy(&fetched.body).into_owned()),
                content_type,
                size_bytes: None,
            },
        };

        Ok(decoded)
    }

    fn blob_id(&self) -> String {
        let id = self.next_blob_id.fetch_add(1, Ordering::Relaxed);
        format!("blob:resource-cache/{}", id)
    }
}
