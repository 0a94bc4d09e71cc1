//! Simulated insurance partners.
//!
//! Stands in for carrier integrations: waits a configurable latency, then
//! decides from the request's risk score.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::domain::models::{InsuranceConfig, InsuranceQuote, QuoteRequest, QuoteStatus};
use crate::domain::ports::{InsuranceError, InsuranceProvider};

const DEFAULT_PARTNERS: [&str; 4] = ["intact", "desjardins", "td", "aviva"];

/// Insurer that quotes every configured partner locally.
pub struct SimulatedInsurer {
    partners: Vec<String>,
    latency: Duration,
    baseline_annual_premium: f64,
}

impl SimulatedInsurer {
    /// Insurer serving the default partners with the configured latency and baseline.
    pub fn new(config: &InsuranceConfig) -> Self {
        Self {
            partners: DEFAULT_PARTNERS.iter().map(ToString::to_string).collect(),
            latency: Duration::from_millis(config.quote_latency_ms),
            baseline_annual_premium: config.baseline_annual_premium,
        }
    }

    /// Replace the accepted partner names.
    #[must_use]
    pub fn with_partners<I, S>(mut self, partners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partners = partners.into_iter().map(Into::into).collect();
        self
    }

    fn quote_id() -> String {
        let id: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(9)
            .collect();
        format!("QT-{}", id.to_uppercase())
    }
}

#[async_trait]
impl InsuranceProvider for SimulatedInsurer {
    fn partners(&self) -> &[String] {
        &self.partners
    }

    async fn request_quote(&self, request: QuoteRequest) -> Result<InsuranceQuote, InsuranceError> {
        let partner = request.partner_id.to_lowercase();
        if !self.partners.iter().any(|p| p.eq_ignore_ascii_case(&partner)) {
            return Err(InsuranceError::UnknownPartner(request.partner_id));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let status = QuoteStatus::for_risk(request.risk_score);
        let annual_savings =
            (request.estimated_cost * 0.05 + (100.0 - request.risk_score) * 2.0).round();
        let monthly_premium = ((self.baseline_annual_premium - annual_savings) / 12.0)
            .round()
            .max(0.0);

        info!(
            partner = %partner,
            risk = request.risk_score,
            status = status.as_str(),
            "issued insurance quote"
        );

        Ok(InsuranceQuote {
            quote_id: Self::quote_id(),
            partner: partner.to_uppercase(),
            monthly_premium,
            annual_savings,
            status,
            issued_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ShedSpec;

    fn insurer() -> SimulatedInsurer {
        SimulatedInsurer::new(&InsuranceConfig {
            quote_latency_ms: 0,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_quote_math() {
        let mut request = QuoteRequest::new("td", ShedSpec::default(), 20_000.0);
        request.risk_score = 50.0;

        let quote = insurer().request_quote(request).await.unwrap();
        // 20000 * 0.05 + 50 * 2
        assert!((quote.annual_savings - 1100.0).abs() < f64::EPSILON);
        assert!((quote.monthly_premium - 8.0).abs() < f64::EPSILON);
        assert_eq!(quote.status, QuoteStatus::Approved);
        assert_eq!(quote.partner, "TD");
        assert!(quote.quote_id.starts_with("QT-"));
        assert_eq!(quote.quote_id.len(), 12);
    }

    #[tokio::test]
    async fn test_premium_never_negative() {
        let mut request = QuoteRequest::new("aviva", ShedSpec::default(), 40_000.0);
        request.risk_score = 20.0;

        let quote = insurer().request_quote(request).await.unwrap();
        // 40000 * 0.05 + 80 * 2 exceeds the 1200 baseline
        assert!((quote.annual_savings - 2160.0).abs() < f64::EPSILON);
        assert!(quote.monthly_premium.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unknown_partner() {
        let request = QuoteRequest::new("acme", ShedSpec::default(), 10_000.0);
        let result = insurer().request_quote(request).await;
        assert!(matches!(result, Err(InsuranceError::UnknownPartner(_))));
    }

    #[test]
    fn test_partner_lookup_ignores_case() {
        let request = QuoteRequest::new("Intact", ShedSpec::default(), 5_000.0);
        let quote = tokio_test::block_on(insurer().request_quote(request));
        assert_eq!(quote.unwrap().partner, "INTACT");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let insurer = SimulatedInsurer::new(&InsuranceConfig::default());
        let started = tokio::time::Instant::now();
        let request = QuoteRequest::new("intact", ShedSpec::default(), 10_000.0);
        insurer.request_quote(request).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2500));
    }
}
