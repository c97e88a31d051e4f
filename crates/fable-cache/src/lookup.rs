//! Read-through helpers: find in cache, else load from the primary store
//! and populate.
//!
//! This is how resolvers consume the cache; they never call
//! [`EntityCache`] directly for lookups. The loader's error type `E` is
//! the primary store's own and passes through unchanged; cache failures
//! never show up in it.

use crate::entity::CacheEntity;
use crate::entity_cache::EntityCache;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Cache-aside lookup façade for one entity kind.
pub struct CacheBackedLookup<T: CacheEntity> {
    cache: Arc<EntityCache<T>>,
}

impl<T: CacheEntity> CacheBackedLookup<T> {
    /// Create a lookup helper over an entity cache.
    #[must_use]
    pub fn new(cache: Arc<EntityCache<T>>) -> Self {
        Self { cache }
    }

    /// Find one entity by primary key.
    ///
    /// Cache hit returns immediately; on miss the primary store is asked
    /// via `load_one`, and a found entity is written back best-effort
    /// before being returned. `Ok(None)` means the primary store has no
    /// such entity.
    pub async fn find<E, F, Fut>(&self, id: &str, load_one: F) -> Result<Option<T>, E>
    where
        F: FnOnce(String) -> Fut + Send,
        Fut: Future<Output = Result<Option<T>, E>> + Send,
    {
        if let Some(hit) = self.cache.get(id).await {
            return Ok(Some(hit));
        }

        let loaded = load_one(id.to_string()).await?;
        if let Some(entity) = &loaded {
            self.cache.set_many(std::slice::from_ref(entity)).await;
        }
        Ok(loaded)
    }

    /// Batched variant of [`find`](Self::find).
    ///
    /// Returns a result parallel to `ids`; slots the primary store could
    /// not produce either stay `None`. `load_many` receives only the ids
    /// that missed the cache.
    pub async fn find_many<E, F, Fut>(
        &self,
        ids: &[String],
        load_many: F,
    ) -> Result<Vec<Option<T>>, E>
    where
        F: FnOnce(Vec<String>) -> Fut + Send,
        Fut: Future<Output = Result<Vec<T>, E>> + Send,
    {
        let mut slots = self.cache.get_many(ids).await;

        let missing: Vec<String> = ids
            .iter()
            .zip(&slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(id, _)| id.clone())
            .collect();

        if missing.is_empty() {
            return Ok(slots);
        }

        debug!("Loading {} of {} {}(s) from primary store", missing.len(), ids.len(), T::KIND);
        let loaded = load_many(missing).await?;
        self.cache.set_many(&loaded).await;

        let mut by_key: HashMap<String, T> = loaded
            .into_iter()
            .map(|entity| (entity.primary_key(), entity))
            .collect();
        for (slot, id) in slots.iter_mut().zip(ids) {
            if slot.is_none() {
                *slot = by_key.remove(id);
            }
        }

        Ok(slots)
    }

    /// Find all children of a parent through the secondary index.
    ///
    /// A non-empty index hit is returned as-is. An empty result falls
    /// through to `load_children` for the full parent-scoped set, which is
    /// then populated. A parent with genuinely zero children takes the
    /// fallback path every time; that extra primary-store read is accepted.
    pub async fn find_by_parent<E, F, Fut>(
        &self,
        parent_id: &str,
        load_children: F,
    ) -> Result<Vec<T>, E>
    where
        F: FnOnce(String) -> Fut + Send,
        Fut: Future<Output = Result<Vec<T>, E>> + Send,
    {
        let cached = self.cache.get_by_parent(parent_id).await;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let loaded = load_children(parent_id.to_string()).await?;
        self.cache.set_many(&loaded).await;
        Ok(loaded)
    }
}
