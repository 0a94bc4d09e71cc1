//! Adapters implementing the domain ports.

pub mod assistant;
pub mod insurance;
