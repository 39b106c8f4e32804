//! Cache Store Module
//!
//! Byte-bounded resource cache with type-based TTLs and expiration-order eviction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{
    CacheCounters, CacheEntry, CacheStats, Clock, ExpirationPolicy, Payload, ResourceType,
    SystemClock,
};
use crate::config::CacheConfig;

// == Set Options ==
/// Optional inputs to [`ResourceCache::set`].
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Content type used for classification ahead of the key's extension
    pub content_type_hint: Option<String>,
    /// Measured size; estimated from the payload when absent
    pub size_bytes: Option<u64>,
    /// TTL that bypasses the expiration policy
    pub ttl_override_ms: Option<u64>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type_hint = Some(content_type.into());
        self
    }

    pub fn size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    pub fn ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_override_ms = Some(ttl_ms);
        self
    }
}

// == Resource Cache ==
/// In-memory cache of fetched resources keyed by URL.
///
/// `total_bytes` always equals the sum of `size_bytes` over stored entries and
/// never exceeds `capacity_bytes` once a mutating call returns.
#[derive(Debug)]
pub struct ResourceCache {
    entries: HashMap<String, CacheEntry>,
    total_bytes: u64,
    capacity_bytes: u64,
    policy: ExpirationPolicy,
    counters: CacheCounters,
    clock: Arc<dyn Clock>,
}

impl ResourceCache {
    // == Constructor ==
    /// Creates a cache using the wall clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            total_bytes: 0,
            capacity_bytes: config.max_size_bytes,
            policy: config.expiration_policy(),
            counters: CacheCounters::new(),
            clock,
        }
    }

    // == Classify ==
    /// Resolves the resource type of `key`, see [`ResourceType::classify`].
    pub fn classify(key: &str, content_type_hint: Option<&str>) -> ResourceType {
        ResourceType::classify(key, content_type_hint)
    }

    // == Set ==
    /// Stores `payload` under `key`, replacing any previous entry.
    ///
    /// Returns `false` when the entry is larger than the whole cache. Such a set
    /// is dropped with a warning and leaves the store untouched.
    pub fn set(&mut self, key: impl Into<String>, payload: Payload, options: SetOptions) -> bool {
        let key = key.into();
        let resource_type = ResourceType::classify(&key, options.content_type_hint.as_deref());
        let size_bytes = options
            .size_bytes
            .unwrap_or_else(|| payload.estimated_size());

        if size_bytes > self.capacity_bytes {
            warn!(
                key = %key,
                size_bytes,
                capacity_bytes = self.capacity_bytes,
                "Resource too large to cache"
            );
            return false;
        }

        // Replacement: drop the old entry before making room
        self.remove(&key);
        self.ensure_space(size_bytes);

        let ttl_ms = options
            .ttl_override_ms
            .unwrap_or_else(|| self.policy.ttl_for(resource_type));
        let entry = CacheEntry::new(
            payload,
            resource_type,
            size_bytes,
            self.clock.now_ms(),
            ttl_ms,
        );

        debug!(key = %key, %resource_type, size_bytes, ttl_ms, "Cached resource");
        self.total_bytes += size_bytes;
        self.entries.insert(key, entry);
        true
    }

    // == Get ==
    /// Returns the payload for `key` if present and not expired.
    ///
    /// Lookups never extend an entry's lifetime. Expired entries are removed.
    pub fn get(&mut self, key: &str) -> Option<Payload> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            None => {
                self.counters.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            self.remove(key);
            self.counters.record_miss();
            debug!(key = %key, "Cache entry expired");
            return None;
        }

        self.counters.record_hit();
        self.entries.get(key).map(|entry| entry.payload.clone())
    }

    // == Peek ==
    /// Reads an entry without counting a lookup or expiring it.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Remove ==
    /// Removes the entry for `key`. Returns whether one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.total_bytes -= entry.size_bytes;
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_bytes = 0;
    }

    // == Clear Expired ==
    /// Removes every expired entry and returns how many were removed.
    pub fn clear_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove(key);
        }

        expired_keys.len()
    }

    // == Ensure Space ==
    /// Evicts entries, soonest-to-expire first, until `required_bytes` fits.
    ///
    /// Stops early once the store is empty.
    pub fn ensure_space(&mut self, required_bytes: u64) {
        if self.fits(required_bytes) {
            return;
        }

        let mut candidates: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.expires_at, key.clone()))
            .collect();
        candidates.sort_unstable();

        for (_, key) in candidates {
            if self.fits(required_bytes) {
                break;
            }
            if self.remove(&key) {
                self.counters.record_eviction();
                debug!(key = %key, "Evicted cache entry");
            }
        }
    }

    /// Whether `required_bytes` more fit under capacity. Overflow never fits.
    fn fits(&self, required_bytes: u64) -> bool {
        self.total_bytes
            .checked_add(required_bytes)
            .map_or(false, |total| total <= self.capacity_bytes)
    }

    // == Stats ==
    /// Returns a snapshot of sizes and lookup counters.
    pub fn get_stats(&self) -> CacheStats {
        CacheStats::new(
            self.entries.len(),
            self.total_bytes,
            self.capacity_bytes,
            &self.counters,
        )
    }

    /// Iterates over stored entries, expired ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CacheEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    pub fn policy(&self) -> &ExpirationPolicy {
        &self.policy
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
