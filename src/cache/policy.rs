//! Expiration Policy Module
//!
//! Per-resource-type TTL table with a fallback default.

use std::collections::HashMap;

use crate::cache::ResourceType;

// == Time Constants (ms) ==
pub const MINUTE_MS: u64 = 60 * 1000;
pub const HOUR_MS: u64 = 60 * MINUTE_MS;
pub const DAY_MS: u64 = 24 * HOUR_MS;

/// Fallback TTL for types missing from the table.
pub const DEFAULT_EXPIRATION_MS: u64 = DAY_MS;

// == Expiration Policy ==
/// Resolves the TTL of a new entry from its resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationPolicy {
    ttls: HashMap<ResourceType, u64>,
    default_ttl_ms: u64,
}

impl ExpirationPolicy {
    /// Creates a policy with an empty table; every type uses `default_ttl_ms`.
    pub fn new(default_ttl_ms: u64) -> Self {
        Self {
            ttls: HashMap::new(),
            default_ttl_ms,
        }
    }

    /// Sets the TTL for one resource type.
    pub fn with_ttl(mut self, resource_type: ResourceType, ttl_ms: u64) -> Self {
        self.ttls.insert(resource_type, ttl_ms);
        self
    }

    /// Replaces the fallback TTL.
    pub fn with_default_ttl(mut self, default_ttl_ms: u64) -> Self {
        self.default_ttl_ms = default_ttl_ms;
        self
    }

    /// Removes a type from the table so it falls back to the default TTL.
    pub fn without(mut self, resource_type: ResourceType) -> Self {
        self.ttls.remove(&resource_type);
        self
    }

    /// TTL for `resource_type`, falling back to the default.
    pub fn ttl_for(&self, resource_type: ResourceType) -> u64 {
        self.ttls
            .get(&resource_type)
            .copied()
            .unwrap_or(self.default_ttl_ms)
    }

    pub fn default_ttl_ms(&self) -> u64 {
        self.default_ttl_ms
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRATION_MS)
            .with_ttl(ResourceType::Image, 7 * DAY_MS)
            .with_ttl(ResourceType::Json, HOUR_MS)
            .with_ttl(ResourceType::Font, 30 * DAY_MS)
            .with_ttl(ResourceType::Stylesheet, 7 * DAY_MS)
            .with_ttl(ResourceType::Script, 7 * DAY_MS)
            .with_ttl(ResourceType::Markup, HOUR_MS)
            .with_ttl(ResourceType::Other, DAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let policy = ExpirationPolicy::default();
        assert_eq!(policy.ttl_for(ResourceType::Image), 7 * DAY_MS);
        assert_eq!(policy.ttl_for(ResourceType::Json), HOUR_MS);
        assert_eq!(policy.ttl_for(ResourceType::Font), 30 * DAY_MS);
        assert_eq!(policy.ttl_for(ResourceType::Stylesheet), 7 * DAY_MS);
        assert_eq!(policy.ttl_for(ResourceType::Script), 7 * DAY_MS);
        assert_eq!(policy.ttl_for(ResourceType::Markup), HOUR_MS);
        assert_eq!(policy.ttl_for(ResourceType::Other), DAY_MS);
        assert_eq!(policy.default_ttl_ms(), DAY_MS);
    }

    #[test]
    fn test_override_single_type() {
        let policy = ExpirationPolicy::default().with_ttl(ResourceType::Json, 5 * MINUTE_MS);
        assert_eq!(policy.ttl_for(ResourceType::Json), 5 * MINUTE_MS);
        assert_eq!(policy.ttl_for(ResourceType::Image), 7 * DAY_MS);
    }

    #[test]
    fn test_missing_type_uses_default() {
        let policy = ExpirationPolicy::default()
            .without(ResourceType::Font)
            .with_default_ttl(42);
        assert_eq!(policy.ttl_for(ResourceType::Font), 42);
    }
}
