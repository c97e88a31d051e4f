//! Redis-backed key/value store implementation.

use super::{KeyValueStore, StoreCommand};
use async_trait::async_trait;
use deadpool_redis::{redis, redis::AsyncCommands, Pool};
use fable_core::{FableError, FableResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Redis-backed store over a deadpool connection pool.
///
/// The pool is the only shared mutable resource in the cache layer; the
/// client library handles connection pooling, so the store is safe for
/// concurrent use across resolver tasks.
#[derive(Component)]
#[shaku(interface = KeyValueStore)]
pub struct RedisKvStore {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisKvStore {
    /// Create a new Redis store.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op store (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn conn(&self) -> FableResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                FableError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(FableError::Cache("Cache is disabled".to_string())),
        }
    }
}

/// Redis expiries are whole seconds, minimum one.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl KeyValueStore for RedisKvStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FableResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.conn().await?;
        let secs = ttl_secs(ttl);

        conn.set_ex::<_, _, ()>(key, value, secs)
            .await
            .map_err(|e| FableError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, secs);
        Ok(())
    }

    async fn get_many(&self, keys: &[String]) -> FableResult<Vec<Option<String>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        if !self.is_enabled() {
            return Ok(vec![None; keys.len()]);
        }

        let mut conn = self.conn().await?;
        let values: Vec<Option<String>> = conn
            .mget(keys)
            .await
            .map_err(|e| FableError::Cache(format!("Failed to mget {} keys: {}", keys.len(), e)))?;

        Ok(values)
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> FableResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.conn().await?;
        conn.hset::<_, _, _, ()>(key, field, value)
            .await
            .map_err(|e| FableError::Cache(format!("Failed to hset key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn hash_field_keys(&self, key: &str) -> FableResult<Vec<String>> {
        if !self.is_enabled() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn().await?;
        let fields: Vec<String> = conn
            .hkeys(key)
            .await
            .map_err(|e| FableError::Cache(format!("Failed to hkeys key '{}': {}", key, e)))?;

        Ok(fields)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> FableResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.conn().await?;
        let _: () = conn
            .expire(key, ttl_secs(ttl) as i64)
            .await
            .map_err(|e| FableError::Cache(format!("Failed to expire key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> FableResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| FableError::Cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn apply(&self, commands: Vec<StoreCommand>) -> FableResult<()> {
        if commands.is_empty() || !self.is_enabled() {
            return Ok(());
        }

        let count = commands.len();
        let mut conn = self.conn().await?;
        let mut pipe = redis::pipe();

        for command in &commands {
            match command {
                StoreCommand::SetWithExpiry { key, value, ttl } => {
                    pipe.set_ex(key, value, ttl_secs(*ttl)).ignore();
                }
                StoreCommand::HashSet { key, field, value } => {
                    pipe.hset(key, field, value).ignore();
                }
                StoreCommand::Expire { key, ttl } => {
                    pipe.expire(key, ttl_secs(*ttl) as i64).ignore();
                }
            }
        }

        let _: () = pipe
            .query_async(&mut *conn)
            .await
            .map_err(|e| FableError::Cache(format!("Failed to apply {} commands: {}", count, e)))?;

        debug!("Applied {} pipelined commands", count);
        Ok(())
    }
}
