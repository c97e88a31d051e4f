//! Redis pool construction from configuration.

use crate::store::{KeyValueStore, RedisKvStore};
use deadpool_redis::{Pool, PoolConfig, Runtime};
use fable_config::{CacheConfig, RedisConfig};
use fable_core::{FableError, FableResult};
use std::sync::Arc;
use tracing::info;

/// Build the deadpool settings for a Redis configuration.
///
/// The configured connect timeout bounds both connection creation and
/// waiting for a free pooled connection.
fn pool_config(redis: &RedisConfig) -> PoolConfig {
    let mut pool_cfg = PoolConfig::new(redis.pool_size);
    pool_cfg.timeouts.create = Some(redis.connect_timeout());
    pool_cfg.timeouts.wait = Some(redis.connect_timeout());
    pool_cfg
}

/// Create the Redis connection pool, or `None` when caching is disabled.
pub fn create_cache_pool(config: &CacheConfig) -> FableResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Caching disabled, lookups will fall through to the primary store");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.redis.url);
    redis_cfg.pool = Some(pool_config(&config.redis));

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| FableError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!(
        "Redis cache pool created (size {}, url {})",
        config.redis.pool_size, config.redis.url
    );
    Ok(Some(Arc::new(pool)))
}

/// Build the key/value store for the given configuration.
///
/// Disabled caching yields a no-op store, so consumers always hold a
/// working handle and the disabled path stays out of resolver code.
pub fn store_from_config(config: &CacheConfig) -> FableResult<Arc<dyn KeyValueStore>> {
    Ok(match create_cache_pool(config)? {
        Some(pool) => Arc::new(RedisKvStore::new(pool)),
        None => Arc::new(RedisKvStore::disabled()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_yields_no_pool() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        assert!(create_cache_pool(&config).unwrap().is_none());
    }

    #[test]
    fn test_disabled_config_yields_noop_store() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        let store = store_from_config(&config).unwrap();
        assert!(!store.is_enabled());
    }

    #[test]
    fn test_enabled_config_builds_pool() {
        // Pool creation does not connect; no Redis server is needed here.
        let config = CacheConfig::default();
        let pool = create_cache_pool(&config).unwrap();
        assert!(pool.is_some());
    }

    #[test]
    fn test_pool_config_applies_size_and_timeout() {
        let redis = RedisConfig {
            pool_size: 4,
            connect_timeout_secs: 2,
            ..RedisConfig::default()
        };
        let pool_cfg = pool_config(&redis);
        assert_eq!(pool_cfg.max_size, 4);
        assert_eq!(pool_cfg.timeouts.create, Some(redis.connect_timeout()));
        assert_eq!(pool_cfg.timeouts.wait, Some(redis.connect_timeout()));
    }
}
