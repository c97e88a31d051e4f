//! Serialization of entities to and from their flat cache payloads.

use crate::entity::CacheEntity;
use fable_core::{FableError, FableResult};

/// Serializes an entity to its cache payload.
///
/// Total for any valid entity value; `None` optionals and empty lists
/// serialize without error.
pub fn encode<T: CacheEntity>(entity: &T) -> FableResult<String> {
    serde_json::to_string(entity)
        .map_err(|e| FableError::internal(format!("Failed to encode cache payload: {}", e)))
}

/// Deserializes a cache payload back into its entity type.
///
/// Identifier and timestamp fields come back as their semantic types, not
/// raw strings. A malformed payload yields `FableError::Deserialization`
/// carrying the offending key; the cache treats that as a miss for the one
/// key and leaves the rest of the batch untouched.
pub fn decode<T: CacheEntity>(key: &str, raw: &str) -> FableResult<T> {
    serde_json::from_str(raw).map_err(|e| FableError::deserialization(key, e.to_string()))
}
