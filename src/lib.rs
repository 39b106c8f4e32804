//! Resource Cache - In-memory cache for fetched static resources
//!
//! Byte-bounded storage with per-type expiration, expiration-order eviction
//! and a fetch-through preload helper.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod preload;
pub mod tasks;

pub use api::AppState;
pub use cache::{Payload, ResourceCache, ResourceType, SetOptions};
pub use config::{CacheConfig, Config};
pub use preload::{HttpFetcher, PreloadOptions, Preloader};
pub use tasks::spawn_cleanup_task;
