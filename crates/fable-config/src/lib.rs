//! # Fable Config
//!
//! Configuration management for the Fable entity cache.
//! Supports layered configuration from files and environment variables,
//! with runtime refresh.

mod cache_config;
mod loader;

pub use cache_config::*;
pub use loader::*;
