//! Resource Fetcher
//!
//! Network seam used by the preloader.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::error::{CacheError, Result};

/// Raw response of a resource fetch.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// Value of the response's content-type header, if any
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchedResource {
    pub fn new(content_type: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type,
            body: body.into(),
        }
    }
}

/// Fetches a resource by URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedResource>;
}

// == HTTP Fetcher ==
/// [`Fetcher`] backed by a reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (proxies, default headers, timeouts).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CacheError::Fetch(format!("{}: {}", url, e)))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| CacheError::Fetch(format!("{}: {}", url, e)))?;

        debug!(url, content_type = ?content_type, bytes = body.len(), "Fetched resource");
        Ok(FetchedResource { content_type, body })
    }
}
