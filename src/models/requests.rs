//! Request DTOs for the resource cache API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::preload::PreloadOptions;

/// Request body for POST /preload
#[derive(Debug, Clone, Deserialize)]
pub struct PreloadRequest {
    /// URL of the resource to load
    pub url: String,
    /// Content type assumed when the origin does not send one
    #[serde(default)]
    pub content_type_hint: Option<String>,
    /// Optional TTL override in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl PreloadRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        None
    }

    pub fn options(&self) -> PreloadOptions {
        PreloadOptions {
            content_type_hint: self.content_type_hint.clone(),
            ttl_override_ms: self.ttl_ms,
        }
    }
}

/// Query string for the /entry endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    pub key: String,
}
