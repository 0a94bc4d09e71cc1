//! Insurance risk scoring and quote records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shed_spec::{PowerKit, ShedSpec};

/// Lower bound of the risk score.
pub const MIN_RISK: f64 = 20.0;
/// Upper bound of the risk score.
pub const MAX_RISK: f64 = 100.0;

/// Structural risk score for a design, 20 (best) to 100 (worst).
///
/// Steep roofs shed snow, monitored power and solar suggest an engaged
/// owner, and oversized footprints add exposure.
pub fn risk_score(spec: &ShedSpec) -> f64 {
    let mut risk: f64 = 100.0;

    if spec.siding_type.eq_ignore_ascii_case("board") {
        risk -= 5.0;
    }
    if spec.pitch >= 8 {
        risk -= 8.0;
    }
    if spec.power_kit == PowerKit::Workshop30A {
        risk -= 10.0;
    }
    if spec.addons.solar {
        risk -= 12.0;
    }

    if spec.width > 12 {
        risk += 5.0;
    }
    if spec.depth > 20 {
        risk += 5.0;
    }

    let monitoring = if spec.power_kit.is_powered() { 85.0 } else { 60.0 };
    risk -= monitoring / 100.0 * 15.0;

    risk.clamp(MIN_RISK, MAX_RISK)
}

/// Underwriting decision on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// Accepted as quoted
    Approved,
    /// Awaiting underwriting
    Pending,
    /// Sent for manual review
    Referred,
}

impl QuoteStatus {
    /// Decision thresholds on the risk score.
    pub fn for_risk(risk: f64) -> Self {
        if risk > 80.0 {
            Self::Referred
        } else if risk > 60.0 {
            Self::Pending
        } else {
            Self::Approved
        }
    }

    /// Lowercase wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Referred => "referred",
        }
    }
}

/// What is sent to an insurance partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Partner key, matched case-insensitively
    pub partner_id: String,
    /// Design being insured
    pub spec: ShedSpec,
    /// Build cost in dollars
    pub estimated_cost: f64,
    /// Derived from the spec by [`risk_score`]
    pub risk_score: f64,
}

impl QuoteRequest {
    /// Build a request, scoring the spec.
    pub fn new(partner_id: impl Into<String>, spec: ShedSpec, estimated_cost: f64) -> Self {
        let risk = risk_score(&spec);
        Self {
            partner_id: partner_id.into(),
            spec,
            estimated_cost,
            risk_score: risk,
        }
    }
}

/// A partner's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceQuote {
    /// `QT-` plus nine characters
    pub quote_id: String,
    /// Partner name, uppercased
    pub partner: String,
    /// Dollars per month
    pub monthly_premium: f64,
    /// Dollars per year off the baseline premium
    pub annual_savings: f64,
    /// Underwriting decision
    pub status: QuoteStatus,
    /// When the quote was issued
    pub issued_at: DateTime<Utc>,
}
