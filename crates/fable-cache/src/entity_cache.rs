//! Generic cache-aside engine for one entity kind.

use crate::cache_keys;
use crate::codec;
use crate::entity::CacheEntity;
use crate::store::{KeyValueStore, StoreCommand};
use fable_core::FableResult;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Default TTL for cache entries and secondary index keys (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Placeholder value for secondary index members; only the field names
/// carry information.
const INDEX_MEMBER: &str = "1";

/// Cache-aside façade over a key/value store for one entity kind.
///
/// Owns the serialized representation exclusively: callers see fully typed
/// entities or `None`, never raw payloads. Population is a side effect of
/// primary-store reads; entries are evicted by TTL (or an explicit
/// [`invalidate`](Self::invalidate)), and a write failure degrades to a log
/// line, never to a caller-visible error.
pub struct EntityCache<T: CacheEntity> {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
    _kind: PhantomData<fn() -> T>,
}

impl<T: CacheEntity> EntityCache<T> {
    /// Create a cache with the default TTL.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            _kind: PhantomData,
        }
    }

    /// Write entities into the cache, best-effort.
    ///
    /// For parent-indexed kinds this also adds each entry to its parent's
    /// secondary index and refreshes the index TTL, all in one pipelined
    /// round trip. A failed pipeline is logged and dropped.
    pub async fn set_many(&self, entities: &[T]) {
        if let Err(e) = self.try_set_many(entities).await {
            error!("Cache population failed for {} {}(s): {}", entities.len(), T::KIND, e);
        }
    }

    async fn try_set_many(&self, entities: &[T]) -> FableResult<()> {
        if entities.is_empty() {
            return Ok(());
        }

        let mut commands = Vec::with_capacity(entities.len() * 2);
        for entity in entities {
            let entry_key = cache_keys::entry_key::<T>(&entity.primary_key());
            commands.push(StoreCommand::SetWithExpiry {
                key: entry_key.clone(),
                value: codec::encode(entity)?,
                ttl: self.ttl,
            });

            if let Some(index_key) = entity
                .parent_key()
                .and_then(|parent| cache_keys::parent_index_key::<T>(&parent))
            {
                // The index is a separate key with its own TTL; refreshing
                // both here keeps index and members expiring together.
                commands.push(StoreCommand::HashSet {
                    key: index_key.clone(),
                    field: entry_key.clone(),
                    value: INDEX_MEMBER.to_string(),
                });
                commands.push(StoreCommand::Expire {
                    key: index_key,
                    ttl: self.ttl,
                });
                commands.push(StoreCommand::Expire {
                    key: entry_key,
                    ttl: self.ttl,
                });
            }
        }

        self.store.apply(commands).await
    }

    /// Single-key convenience over [`get_many`](Self::get_many).
    pub async fn get(&self, id: &str) -> Option<T> {
        self.get_many(std::slice::from_ref(&id.to_string()))
            .await
            .pop()
            .flatten()
    }

    /// Order-preserving bulk lookup by primary key.
    ///
    /// The result is parallel to the input: a `None` slot means the key is
    /// absent, expired, unreadable, or its payload failed to decode. Never
    /// returns an error.
    pub async fn get_many(&self, ids: &[String]) -> Vec<Option<T>> {
        if ids.is_empty() {
            // No round trip for an empty batch.
            return Vec::new();
        }

        let keys: Vec<String> = ids
            .iter()
            .map(|id| cache_keys::entry_key::<T>(id))
            .collect();

        let raws = match self.store.get_many(&keys).await {
            Ok(raws) => raws,
            Err(e) => {
                warn!("Cache read failed, treating {} key(s) as misses: {}", keys.len(), e);
                return vec![None; ids.len()];
            }
        };

        if raws.len() != keys.len() {
            warn!(
                "Cache returned {} value(s) for {} key(s), treating all as misses",
                raws.len(),
                keys.len()
            );
            return vec![None; ids.len()];
        }

        keys.iter()
            .zip(raws)
            .map(|(key, raw)| match raw {
                Some(raw) => match codec::decode::<T>(key, &raw) {
                    Ok(entity) => {
                        debug!("Cache hit for key '{}'", key);
                        Some(entity)
                    }
                    Err(e) => {
                        warn!("{}", e);
                        None
                    }
                },
                None => {
                    debug!("Cache miss for key '{}'", key);
                    None
                }
            })
            .collect()
    }

    /// Parent-scoped lookup through the secondary index.
    ///
    /// Returns the successfully decoded children currently cached for the
    /// parent. Members whose entries expired independently are dropped
    /// silently. An empty result is ambiguous between "no children" and
    /// "not cached"; callers fall back to the primary store either way.
    pub async fn get_by_parent(&self, parent_key: &str) -> Vec<T> {
        let Some(index_key) = cache_keys::parent_index_key::<T>(parent_key) else {
            return Vec::new();
        };

        let members = match self.store.hash_field_keys(&index_key).await {
            Ok(members) => members,
            Err(e) => {
                warn!("Index read failed for '{}', treating as miss: {}", index_key, e);
                return Vec::new();
            }
        };

        if members.is_empty() {
            debug!("Index miss for '{}'", index_key);
            return Vec::new();
        }

        let raws = match self.store.get_many(&members).await {
            Ok(raws) => raws,
            Err(e) => {
                warn!("Cache read failed for index '{}': {}", index_key, e);
                return Vec::new();
            }
        };

        members
            .iter()
            .zip(raws)
            .filter_map(|(key, raw)| {
                let raw = raw?;
                match codec::decode::<T>(key, &raw) {
                    Ok(entity) => Some(entity),
                    Err(e) => {
                        warn!("{}", e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Evict one entry by primary key. Best-effort.
    ///
    /// Returns whether the entry existed. The secondary index member, if
    /// any, is left to expire with the index key.
    pub async fn invalidate(&self, id: &str) -> bool {
        let key = cache_keys::entry_key::<T>(id);
        match self.store.delete(&key).await {
            Ok(existed) => existed,
            Err(e) => {
                warn!("Failed to invalidate '{}': {}", key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryKvStore, MockKeyValueStore};
    use chrono::{TimeZone, Utc};
    use fable_core::{Comment, FableError, PostId, User, UserId};

    fn user_cache(store: Arc<dyn KeyValueStore>) -> EntityCache<User> {
        EntityCache::new(store)
    }

    fn comment_cache(store: Arc<dyn KeyValueStore>) -> EntityCache<Comment> {
        EntityCache::new(store)
    }

    fn sample_user(name: &str) -> User {
        User::new(name.to_string(), format!("{name}@example.com"))
    }

    #[tokio::test]
    async fn test_get_many_is_order_preserving() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = user_cache(store);

        let a = sample_user("a");
        let c = sample_user("c");
        cache.set_many(&[a.clone(), c.clone()]).await;

        let ids = vec![
            a.id.to_string(),
            UserId::new().to_string(), // never cached
            c.id.to_string(),
        ];
        let result = cache.get_many(&ids).await;

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].as_ref(), Some(&a));
        assert!(result[1].is_none());
        assert_eq!(result[2].as_ref(), Some(&c));
    }

    #[tokio::test]
    async fn test_miss_is_none_never_error() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = user_cache(store);

        let result = cache.get_many(&[UserId::new().to_string()]).await;
        assert_eq!(result.len(), 1);
        assert!(result[0].is_none());
    }

    #[tokio::test]
    async fn test_empty_input_skips_store() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get_many().times(0);

        let cache = user_cache(Arc::new(mock));
        let result = cache.get_many(&[]).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_miss() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get_many()
            .returning(|_| Err(FableError::cache("connection refused")));

        let cache = user_cache(Arc::new(mock));
        let result = cache
            .get_many(&[UserId::new().to_string(), UserId::new().to_string()])
            .await;
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_apply()
            .returning(|_| Err(FableError::cache("timeout")));

        let cache = user_cache(Arc::new(mock));
        // Must not panic or surface the error.
        cache.set_many(&[sample_user("a")]).await;
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_per_key_miss() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = user_cache(store.clone());

        let good = sample_user("good");
        cache.set_many(std::slice::from_ref(&good)).await;

        let bad_id = UserId::new();
        store
            .set_with_expiry(&format!("user:{bad_id}"), "{corrupt", DEFAULT_TTL)
            .await
            .unwrap();

        let result = cache
            .get_many(&[bad_id.to_string(), good.id.to_string()])
            .await;
        assert!(result[0].is_none());
        assert_eq!(result[1].as_ref(), Some(&good));
    }

    #[tokio::test]
    async fn test_index_and_members_populate_together() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = comment_cache(store);

        let post = PostId::new();
        let author = UserId::new();
        let c1 = Comment::new(post, author, "first".to_string());
        let c2 = Comment::new(post, author, "second".to_string());
        cache.set_many(&[c1.clone(), c2.clone()]).await;

        let mut children = cache.get_by_parent(&post.to_string()).await;
        children.sort_by_key(|c| c.content.clone());

        assert_eq!(children, vec![c1, c2]);
    }

    #[tokio::test]
    async fn test_repopulation_is_idempotent() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = comment_cache(store);

        let post = PostId::new();
        let c1 = Comment::new(post, UserId::new(), "only".to_string());
        cache.set_many(std::slice::from_ref(&c1)).await;
        cache.set_many(std::slice::from_ref(&c1)).await;

        let children = cache.get_by_parent(&post.to_string()).await;
        assert_eq!(children, vec![c1]);
    }

    #[tokio::test]
    async fn test_get_by_parent_drops_expired_members() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = comment_cache(store.clone());

        let post = PostId::new();
        let c1 = Comment::new(post, UserId::new(), "kept".to_string());
        let c2 = Comment::new(post, UserId::new(), "gone".to_string());
        cache.set_many(&[c1.clone(), c2.clone()]).await;

        // The member's entry expires on its own; the index still lists it.
        store.delete(&format!("comment:{}", c2.id)).await.unwrap();

        let children = cache.get_by_parent(&post.to_string()).await;
        assert_eq!(children, vec![c1]);
    }

    #[tokio::test]
    async fn test_unindexed_kind_returns_empty_by_parent() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = user_cache(store);
        assert!(cache.get_by_parent("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_evicts_entry() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = user_cache(store);

        let user = sample_user("a");
        cache.set_many(std::slice::from_ref(&user)).await;
        let id = user.id.to_string();

        assert!(cache.get(&id).await.is_some());
        assert!(cache.invalidate(&id).await);
        assert!(cache.get(&id).await.is_none());
        assert!(!cache.invalidate(&id).await);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache: EntityCache<User> =
            EntityCache::with_ttl(store, Duration::from_millis(20));

        let user = sample_user("a");
        cache.set_many(std::slice::from_ref(&user)).await;
        let id = user.id.to_string();

        assert!(cache.get(&id).await.is_some());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(cache.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_comment_round_trip_through_parent_index() {
        let store = Arc::new(InMemoryKvStore::new());
        let cache = comment_cache(store);

        let post = PostId::new();
        let mut comment = Comment::new(post, UserId::new(), "hello".to_string());
        comment.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        comment.updated_at = comment.created_at;
        assert!(comment.liked_by.is_empty());

        cache.set_many(std::slice::from_ref(&comment)).await;

        let children = cache.get_by_parent(&post.to_string()).await;
        assert_eq!(children.len(), 1);
        let got = &children[0];
        assert_eq!(got, &comment);
        assert_eq!(got.created_at, comment.created_at);
        assert!(got.liked_by.is_empty());
    }
}
