//! Request and Response models for the resource cache API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{KeyQuery, PreloadRequest};
pub use responses::{ClearResponse, EntryResponse, HealthResponse, PreloadResponse, RemoveResponse};
