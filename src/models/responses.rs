//! Response DTOs for the resource cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheEntry, Payload, ResourceType};

/// Response body for POST /preload
#[derive(Debug, Clone, Serialize)]
pub struct PreloadResponse {
    pub url: String,
    pub payload: Payload,
}

impl PreloadResponse {
    pub fn new(url: impl Into<String>, payload: Payload) -> Self {
        Self {
            url: url.into(),
            payload,
        }
    }
}

/// Response body for GET /entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub key: String,
    pub resource_type: ResourceType,
    pub size_bytes: u64,
    /// Expiration time (Unix milliseconds)
    pub expires_at: u64,
    pub payload: Payload,
}

impl EntryResponse {
    pub fn new(key: impl Into<String>, entry: &CacheEntry) -> Self {
        Self {
            key: key.into(),
            resource_type: entry.resource_type,
            size_bytes: entry.size_bytes,
            expires_at: entry.expires_at,
            payload: entry.payload.clone(),
        }
    }
}

/// Response body for DELETE /entry
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub key: String,
    /// Whether an entry was present
    pub removed: bool,
}

impl RemoveResponse {
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        Self {
            key: key.into(),
            removed,
        }
    }
}

/// Response body for the maintenance endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Removed {} entries", removed),
            removed,
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
