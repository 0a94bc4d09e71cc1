//! Domain layer for the shed configurator
//!
//! This module contains the configuration record, its invariants, and the
//! port traits for external collaborators.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
