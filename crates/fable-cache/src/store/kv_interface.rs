//! Store interface trait for the cache layer's key/value operations.

use async_trait::async_trait;
use fable_core::FableResult;
use shaku::Interface;
use std::time::Duration;

/// One operation in a pipelined batch.
///
/// A batch is sent to the store as a single round trip; it is not cross-key
/// atomic in the store itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Upsert a string value with an expiry. Idempotent.
    SetWithExpiry {
        key: String,
        value: String,
        ttl: Duration,
    },
    /// Set one field of a hash map key.
    HashSet {
        key: String,
        field: String,
        value: String,
    },
    /// Refresh a key's TTL without touching its value.
    Expire { key: String, ttl: Duration },
}

/// Key/value store operations required by the entity cache.
///
/// Any operation may fail (network, timeout). Callers treat read failures
/// as cache misses and log-and-drop write failures; the store is never a
/// source of resolver-visible errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Interface + Send + Sync {
    /// Check if the store is enabled.
    fn is_enabled(&self) -> bool;

    /// Idempotent upsert of a string value with a TTL.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FableResult<()>;

    /// Order-preserving bulk get. Missing keys yield `None` at their
    /// position, never an error.
    async fn get_many(&self, keys: &[String]) -> FableResult<Vec<Option<String>>>;

    /// Set one field of a hash map key.
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> FableResult<()>;

    /// Return the field names of a hash map key. Missing key yields an
    /// empty list.
    async fn hash_field_keys(&self, key: &str) -> FableResult<Vec<String>>;

    /// Refresh a key's TTL independent of its value.
    async fn expire(&self, key: &str, ttl: Duration) -> FableResult<()>;

    /// Delete a key. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> FableResult<bool>;

    /// Execute a batch of commands as one round trip.
    async fn apply(&self, commands: Vec<StoreCommand>) -> FableResult<()>;
}
