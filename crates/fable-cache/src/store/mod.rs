//! Key/value store contract and implementations.

mod kv_interface;
mod memory_store;
mod redis_store;

pub use kv_interface::{KeyValueStore, StoreCommand};
pub use memory_store::InMemoryKvStore;
pub use redis_store::{RedisKvStore, RedisKvStoreParameters};

#[cfg(test)]
pub use kv_interface::MockKeyValueStore;
