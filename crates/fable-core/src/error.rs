//! Unified error types for the cache layer and its collaborators.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the Fable entity cache.
///
/// Cache-layer failures (`Cache`, `Deserialization`) are recovered locally by
/// the cache itself and never surfaced to resolvers; the remaining variants
/// exist for collaborators that share this error type.
#[derive(Error, Debug)]
pub enum FableError {
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Key/value store error (network, timeout, protocol)
    #[error("Cache error: {0}")]
    Cache(String),

    /// Cached payload could not be decoded back into its entity type
    #[error("Failed to decode cached payload for key '{key}': {message}")]
    Deserialization { key: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FableError {
    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates a deserialization error for a specific cache key.
    #[must_use]
    pub fn deserialization<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::Deserialization {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is recovered locally by the cache layer.
    ///
    /// Recoverable errors degrade to a cache miss on the read path and are
    /// logged and dropped on the write path.
    #[must_use]
    pub const fn is_cache_recoverable(&self) -> bool {
        matches!(self, Self::Cache(_) | Self::Deserialization { .. })
    }
}

impl From<serde_json::Error> for FableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let not_found = FableError::not_found("User", "123");
        assert!(not_found.to_string().contains("User"));

        let cache = FableError::cache("connection refused");
        assert!(cache.to_string().contains("connection refused"));

        let deser = FableError::deserialization("comment:c1", "unexpected EOF");
        assert!(deser.to_string().contains("comment:c1"));
        assert!(deser.to_string().contains("unexpected EOF"));

        let config = FableError::configuration("missing url");
        assert!(config.to_string().contains("missing url"));
    }

    #[test]
    fn test_cache_recoverable() {
        assert!(FableError::cache("timeout").is_cache_recoverable());
        assert!(FableError::deserialization("k", "bad json").is_cache_recoverable());
        assert!(!FableError::not_found("User", 1).is_cache_recoverable());
        assert!(!FableError::configuration("bad").is_cache_recoverable());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<u32>("not-a-number").unwrap_err();
        let fable: FableError = err.into();
        assert!(matches!(fable, FableError::Internal(_)));
    }
}
