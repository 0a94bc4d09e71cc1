//! Insurance partner adapter implementations.

pub mod simulated;

pub use simulated::SimulatedInsurer;
