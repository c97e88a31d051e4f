//! The contract an entity kind must satisfy to be cacheable.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity kind that can live in the cache.
///
/// The serde bounds are the typed schema for payload reconstruction: the
/// derive on each entity, together with `#[serde(transparent)]` ID wrappers
/// and chrono timestamps, restores identifier and date fields to their
/// semantic types after the text round trip.
pub trait CacheEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Entry-key prefix for this kind, e.g. `"comment"`.
    const KIND: &'static str;

    /// Prefix of the natural parent kind, e.g. `Some("post")` for comments.
    /// Kinds without a parent have no secondary index.
    const PARENT_KIND: Option<&'static str> = None;

    /// Stable external identifier of the entity, stringified.
    fn primary_key(&self) -> String;

    /// Stringified key of the natural parent, for parent-indexed kinds.
    fn parent_key(&self) -> Option<String> {
        None
    }
}
