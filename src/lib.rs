//! Shedwright - shed configuration engine
//!
//! Shedwright keeps a backyard-shed design valid while it is edited by a
//! user and by an untrusted natural-language assistant, and drives the
//! simulations a configurator shows alongside it: a power gauge and a
//! rain/snow overlay.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): the spec, its invariants, proposals, pricing and risk
//! - **Ports** (`domain::ports`): assistant and insurance collaborators
//! - **Service Layer** (`services`): merge protocol, assistant session, simulators
//! - **Adapters** (`adapters`): scripted assistant, simulated insurer
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use shedwright::services::proposal_merge::merge_value;
//! use shedwright::ShedSpec;
//!
//! let outcome = merge_value(&ShedSpec::default(), &json!({ "width": 999 }));
//! assert_eq!(outcome.spec.width, 16);
//! assert_eq!(outcome.changed_fields, vec!["width".to_string()]);
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    validate, Addon, Addons, Config, CostEstimate, InsuranceQuote, LoggingConfig, PowerKit,
    Proposal, QuoteRequest, QuoteStatus, ShedSpec, ShedStyle, Weather,
};
pub use domain::ports::{AssistantClient, AssistantError, InsuranceProvider};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    AssistantSession, MergeOutcome, PowerTelemetry, ProposalOutcome, WeatherSimulator,
};
