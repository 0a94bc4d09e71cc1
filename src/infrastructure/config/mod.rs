//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Configuration validation
//! - Type-safe config structs

/// Layered loading and validation
pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
