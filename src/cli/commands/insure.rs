//! `insure` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::adapters::insurance::SimulatedInsurer;
use crate::cli::output::{currency, output, CommandOutput};
use crate::domain::models::{Config, InsuranceQuote, QuoteRequest};
use crate::domain::ports::InsuranceProvider;
use crate::services::cost_estimator::estimate;

use super::load_spec;

/// Arguments for `insure`.
#[derive(Args, Debug)]
pub struct InsureArgs {
    /// Spec file to insure
    pub file: PathBuf,

    /// Insurance partner
    #[arg(short, long, default_value = "intact")]
    pub partner: String,

    /// Skip the simulated partner latency
    #[arg(long)]
    pub instant: bool,
}

/// A quote with the inputs it was priced from.
#[derive(Debug, Serialize)]
pub struct InsureOutput {
    /// Structural risk, 20 to 100
    pub risk_score: f64,
    /// Total from the cost estimator
    pub estimated_cost: f64,
    /// Partner answer
    pub quote: InsuranceQuote,
}

impl CommandOutput for InsureOutput {
    fn to_human(&self) -> String {
        let q = &self.quote;
        [
            format!("Quote {} from {}", q.quote_id, q.partner),
            format!("Status:          {}", q.status.as_str()),
            format!("Risk score:      {:.1}", self.risk_score),
            format!("Insured value:   {}", currency(self.estimated_cost)),
            format!("Monthly premium: {}", currency(q.monthly_premium)),
            format!("Annual savings:  {}", currency(q.annual_savings)),
        ]
        .join("\n")
    }
}

/// Request an insurance quote for a spec file.
pub async fn execute(args: InsureArgs, mut config: Config, json_mode: bool) -> Result<()> {
    if args.instant {
        config.insurance.quote_latency_ms = 0;
    }
    let spec = load_spec(&args.file)?;
    let cost = estimate(&spec).total;

    let insurer = SimulatedInsurer::new(&config.insurance);
    let request = QuoteRequest::new(&args.partner, spec, cost);
    let risk_score = request.risk_score;

    let quote = insurer
        .request_quote(request)
        .await
        .with_context(|| format!("Quote request to {} failed", args.partner))?;

    let result = InsureOutput {
        risk_score,
        estimated_cost: cost,
        quote,
    };
    output(&result, json_mode);
    Ok(())
}
