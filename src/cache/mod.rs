//! Cache Module
//!
//! In-memory resource cache with per-type expiration, byte-based capacity and
//! expiration-order eviction.

mod clock;
mod entry;
mod policy;
mod resource_type;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{BlobHandle, CacheEntry, Payload, SCALAR_FALLBACK_SIZE, SERIALIZATION_FALLBACK_SIZE};
pub use policy::{ExpirationPolicy, DAY_MS, DEFAULT_EXPIRATION_MS, HOUR_MS, MINUTE_MS};
pub use resource_type::ResourceType;
pub use stats::{CacheCounters, CacheStats};
pub use store::{ResourceCache, SetOptions};

// == Public Constants ==
/// Default capacity in bytes (50 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 50 * 1024 * 1024;
