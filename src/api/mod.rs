//! API Module
//!
//! HTTP handlers and routing exposing the resource cache.
//!
//! # Endpoints
//! - `POST /preload` - Load a resource through the cache
//! - `GET /entry?key=` / `DELETE /entry?key=` - Read or remove an entry
//! - `POST /clear`, `POST /clear-expired` - Maintenance
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
