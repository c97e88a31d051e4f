//! Cache configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the entity cache layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled at all. When disabled, every lookup
    /// falls through to the primary store.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// TTL applied to cache entries and secondary index keys, in seconds.
    #[serde(default = "default_entry_ttl_secs")]
    pub entry_ttl_secs: u64,

    /// Redis connection settings.
    #[serde(default)]
    pub redis: RedisConfig,
}

fn default_enabled() -> bool {
    true
}

fn default_entry_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            entry_ttl_secs: default_entry_ttl_secs(),
            redis: RedisConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Returns the entry TTL as a `Duration`.
    #[must_use]
    pub const fn entry_ttl(&self) -> Duration {
        Duration::from_secs(self.entry_ttl_secs)
    }
}

/// Redis connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL.
    pub url: String,

    /// Maximum number of pooled connections.
    pub pool_size: usize,

    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            pool_size: 16,
            connect_timeout_secs: 5,
        }
    }
}

impl RedisConfig {
    /// Returns the connection timeout as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.entry_ttl_secs, 300);
        assert_eq!(config.entry_ttl(), Duration::from_secs(300));
        assert_eq!(config.redis.url, "redis://127.0.0.1:6379");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert!(config.enabled);
        assert_eq!(config.entry_ttl_secs, 300);
    }
}
