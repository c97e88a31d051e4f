//! In-memory key/value store.
//!
//! Backs tests and single-process deployments that run without Redis.
//! Expiry is lazy: entries past their deadline are treated as absent on
//! read and dropped on the next write to the same key.

use super::{KeyValueStore, StoreCommand};
use async_trait::async_trait;
use fable_core::FableResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct StringEntry {
    value: String,
    expires_at: Instant,
}

struct HashEntry {
    fields: HashMap<String, String>,
    expires_at: Instant,
}

/// In-memory implementation of [`KeyValueStore`].
#[derive(Default)]
pub struct InMemoryKvStore {
    strings: RwLock<HashMap<String, StringEntry>>,
    hashes: RwLock<HashMap<String, HashEntry>>,
}

impl InMemoryKvStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) string entries. Test helper.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.strings
            .read()
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    /// Whether the store holds no live string entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKvStore {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FableResult<()> {
        self.strings.write().insert(
            key.to_string(),
            StringEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get_many(&self, keys: &[String]) -> FableResult<Vec<Option<String>>> {
        let now = Instant::now();
        let strings = self.strings.read();
        Ok(keys
            .iter()
            .map(|key| {
                strings
                    .get(key)
                    .filter(|e| e.expires_at > now)
                    .map(|e| e.value.clone())
            })
            .collect())
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> FableResult<()> {
        let mut hashes = self.hashes.write();
        let now = Instant::now();
        let entry = hashes
            .entry(key.to_string())
            .and_modify(|e| {
                if e.expires_at <= now {
                    e.fields.clear();
                    e.expires_at = now + crate::DEFAULT_TTL;
                }
            })
            .or_insert_with(|| HashEntry {
                fields: HashMap::new(),
                expires_at: now + crate::DEFAULT_TTL,
            });
        entry.fields.insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hash_field_keys(&self, key: &str) -> FableResult<Vec<String>> {
        let now = Instant::now();
        let hashes = self.hashes.read();
        Ok(hashes
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| e.fields.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> FableResult<()> {
        let deadline = Instant::now() + ttl;
        if let Some(entry) = self.strings.write().get_mut(key) {
            entry.expires_at = deadline;
        }
        if let Some(entry) = self.hashes.write().get_mut(key) {
            entry.expires_at = deadline;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> FableResult<bool> {
        let removed_string = self.strings.write().remove(key).is_some();
        let removed_hash = self.hashes.write().remove(key).is_some();
        Ok(removed_string || removed_hash)
    }

    async fn apply(&self, commands: Vec<StoreCommand>) -> FableResult<()> {
        for command in commands {
            match command {
                StoreCommand::SetWithExpiry { key, value, ttl } => {
                    self.set_with_expiry(&key, &value, ttl).await?;
                }
                StoreCommand::HashSet { key, field, value } => {
                    self.hash_set(&key, &field, &value).await?;
                }
                StoreCommand::Expire { key, ttl } => {
                    self.expire(&key, ttl).await?;
                }
            }
        }
        Ok(())
    }
}
