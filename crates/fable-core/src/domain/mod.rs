//! Domain model shared between the cache layer and the resolver layer.

pub mod entities;

pub use entities::*;
