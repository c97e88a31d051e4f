//! Result type aliases for the Fable entity cache.

use crate::FableError;

/// A specialized `Result` type for Fable operations.
pub type FableResult<T> = Result<T, FableError>;
