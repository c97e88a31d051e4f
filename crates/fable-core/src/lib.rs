//! # Fable Core
//!
//! Core types, domain entities, and error definitions for the Fable
//! entity cache. This crate provides the typed identifiers and entity
//! shapes shared by the cache layer and its collaborators.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
