//! Configuration Module
//!
//! Handles cache and server configuration, loaded from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{ExpirationPolicy, ResourceType, DEFAULT_EXPIRATION_MS, DEFAULT_MAX_SIZE};

// == Cache Config ==
/// Construction-time settings for a [`crate::cache::ResourceCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Capacity in bytes
    pub max_size_bytes: u64,
    /// TTL in milliseconds for types missing from the expiration table
    pub default_expiration_ms: u64,
    /// Per-type TTL table
    pub expirations: ExpirationPolicy,
}

impl CacheConfig {
    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub fn with_default_expiration(mut self, default_expiration_ms: u64) -> Self {
        self.default_expiration_ms = default_expiration_ms;
        self
    }

    pub fn with_expiration(mut self, resource_type: ResourceType, ttl_ms: u64) -> Self {
        self.expirations = self.expirations.with_ttl(resource_type, ttl_ms);
        self
    }

    /// Expiration table with this config's fallback TTL applied.
    pub fn expiration_policy(&self) -> ExpirationPolicy {
        self.expirations
            .clone()
            .with_default_ttl(self.default_expiration_ms)
    }

    /// Loads cache settings from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Capacity in bytes (default: 50 MiB)
    /// - `CACHE_DEFAULT_EXPIRATION_MS` - Fallback TTL (default: 24h)
    /// - `CACHE_TTL_<TYPE>_MS` - Per-type TTL, e.g. `CACHE_TTL_IMAGE_MS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut config = Self {
            max_size_bytes: env_or("CACHE_MAX_SIZE", defaults.max_size_bytes),
            default_expiration_ms: env_or(
                "CACHE_DEFAULT_EXPIRATION_MS",
                defaults.default_expiration_ms,
            ),
            expirations: defaults.expirations,
        };

        for resource_type in ResourceType::ALL {
            let var = format!("CACHE_TTL_{}_MS", resource_type.as_str().to_ascii_uppercase());
            if let Some(ttl_ms) = env_value(&var) {
                config = config.with_expiration(resource_type, ttl_ms);
            }
        }

        config
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE,
            default_expiration_ms: DEFAULT_EXPIRATION_MS,
            expirations: ExpirationPolicy::default(),
        }
    }
}

// == Server Config ==
/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache settings
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Expired-entry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - see [`CacheConfig::from_env`]
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig::from_env(),
            server_port: env_or("SERVER_PORT", 3000),
            cleanup_interval: env_or("CLEANUP_INTERVAL", 60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env_value(name).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DAY_MS, HOUR_MS};

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache.max_size_bytes, 50 * 1024 * 1024);
        assert_eq!(config.cache.default_expiration_ms, DAY_MS);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
    }

    #[test]
    fn test_cache_config_builders() {
        let config = CacheConfig::default()
            .with_max_size(1024)
            .with_default_expiration(5)
            .with_expiration(ResourceType::Json, 10);

        let policy = config.expiration_policy();
        assert_eq!(config.max_size_bytes, 1024);
        assert_eq!(policy.ttl_for(ResourceType::Json), 10);
        assert_eq!(policy.ttl_for(ResourceType::Markup), HOUR_MS);
        assert_eq!(policy.default_ttl_ms(), 5);
    }

    #[test]
    fn test_config_from_env() {
        // Only this test touches these variables
        env::set_var("CACHE_TTL_FONT_MS", "1234");
        env::set_var("CACHE_MAX_SIZE", "not-a-number");

        let config = CacheConfig::from_env();
        assert_eq!(config.expiration_policy().ttl_for(ResourceType::Font), 1234);
        assert_eq!(config.max_size_bytes, DEFAULT_MAX_SIZE);

        env::remove_var("CACHE_TTL_FONT_MS");
        env::remove_var("CACHE_MAX_SIZE");
    }
}
