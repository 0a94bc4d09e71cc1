//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - AssistantClient: natural-language proposal source
//! - InsuranceProvider: insurance quote partners
//!
//! These traits define the contracts that allow the domain to be independent
//! of specific collaborator implementations.

pub mod assistant;
pub mod insurance;

pub use assistant::{AssistantClient, AssistantError, AssistantRequest};
pub use insurance::{InsuranceError, InsuranceProvider};
