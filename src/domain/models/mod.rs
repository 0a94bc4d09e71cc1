//! Domain models for the shed configurator.

/// Runtime configuration
pub mod config;
pub mod estimate;
pub mod insurance;
pub mod proposal;
pub mod shed_spec;

pub use config::{
    AssistantConfig, Config, InsuranceConfig, LoggingConfig, TelemetryConfig, WeatherConfig,
};
pub use estimate::{CostEstimate, MaterialEstimate};
pub use insurance::{risk_score, InsuranceQuote, QuoteRequest, QuoteStatus};
pub use proposal::Proposal;
pub use shed_spec::{validate, Addon, Addons, ParseEnumError, PowerKit, ShedSpec, ShedStyle, Weather};
