//! Insurance Port
//!
//! Quote partners sit behind this trait so the configurator never depends
//! on a particular carrier's transport.

use async_trait::async_trait;

use crate::domain::models::{InsuranceQuote, QuoteRequest};

/// Error types for quote requests
#[derive(Debug, thiserror::Error)]
pub enum InsuranceError {
    /// Partner is not served
    #[error("Unknown partner: {0}")]
    UnknownPartner(String),
}

/// Port trait for insurance partners
#[async_trait]
pub trait InsuranceProvider: Send + Sync {
    /// Partners this provider can quote for
    fn partners(&self) -> &[String];

    /// Request a quote for a design
    async fn request_quote(&self, request: QuoteRequest) -> Result<InsuranceQuote, InsuranceError>;
}
