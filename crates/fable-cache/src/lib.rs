//! # Fable Cache
//!
//! Cache-aside read-through cache for hot, frequently-joined entities
//! (users, profiles, comments) sitting between GraphQL resolvers and the
//! primary document store.
//!
//! Resolvers consume the layer through [`CacheBackedLookup`]: check the
//! cache, fall back to the primary store on miss, populate the cache with
//! whatever the primary store returned. Cache failures are never visible to
//! resolvers; the worst case of a cache outage is added latency.

pub mod cache_keys;
pub mod codec;
mod entity;
mod entity_cache;
mod kinds;
mod lookup;
mod pool;
pub mod store;

pub use entity::CacheEntity;
pub use entity_cache::{EntityCache, DEFAULT_TTL};
pub use lookup::CacheBackedLookup;
pub use pool::{create_cache_pool, store_from_config};
pub use store::{InMemoryKvStore, KeyValueStore, RedisKvStore, StoreCommand};
