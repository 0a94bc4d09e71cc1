//! `assist` command.
//!
//! Drives an assistant session offline: the assistant's reply is read from
//! a file, so the merge, timeout and advisory paths can be exercised
//! without a model behind them.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::assistant::{ScriptedAssistant, ScriptedReply};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, ShedSpec};
use crate::services::assistant_session::{AssistantSession, ProposalOutcome};

use super::merge::MergeOutput;
use super::load_spec;

/// Arguments for `assist`.
#[derive(Args, Debug)]
pub struct AssistArgs {
    /// Instruction for the assistant
    pub instruction: String,

    /// Current spec file; defaults to a fresh spec
    #[arg(short, long)]
    pub spec: Option<PathBuf>,

    /// File holding the assistant's raw reply; an empty proposal when omitted
    #[arg(short, long)]
    pub reply: Option<PathBuf>,

    /// Simulated assistant latency in milliseconds
    #[arg(long, default_value = "0")]
    pub delay_ms: u64,
}

/// Result of one assistant round.
#[derive(Debug, Serialize)]
pub struct AssistOutput {
    /// `applied`, `unavailable` or `stale`
    pub status: &'static str,
    /// Generation the request was issued under
    pub generation: u64,
    /// Why nothing was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Merge result when applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeOutput>,
}

impl CommandOutput for AssistOutput {
    fn to_human(&self) -> String {
        match (&self.merge, &self.reason) {
            (Some(merge), _) => merge.to_human(),
            (None, Some(reason)) => format!("No proposal applied: {reason}"),
            (None, None) => format!("No proposal applied ({})", self.status),
        }
    }
}

impl AssistOutput {
    fn from_outcome(outcome: ProposalOutcome, generation: u64) -> Self {
        match outcome {
            ProposalOutcome::Applied(merge) => Self {
                status: "applied",
                generation,
                reason: None,
                merge: Some(MergeOutput::from(merge)),
            },
            ProposalOutcome::Unavailable(err) => Self {
                status: "unavailable",
                generation,
                reason: Some(err.to_string()),
                merge: None,
            },
            ProposalOutcome::Stale { generation, latest } => Self {
                status: "stale",
                generation,
                reason: Some(format!("superseded by request {latest}")),
                merge: None,
            },
        }
    }
}

/// Run one assistant request against a scripted reply.
pub async fn execute(args: AssistArgs, config: Config, json_mode: bool) -> Result<()> {
    let current = match &args.spec {
        Some(path) => load_spec(path)?,
        None => ShedSpec::default(),
    };

    let reply = match &args.reply {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read reply from {}", path.display()))?;
            ScriptedReply::text(text)
        }
        None => ScriptedReply::default(),
    };
    let assistant = ScriptedAssistant::with_default_reply(
        reply.with_delay(Duration::from_millis(args.delay_ms)),
    );

    let session = AssistantSession::new(Arc::new(assistant), current, &config.assistant);
    let outcome = session.submit(&args.instruction).await;

    let result = AssistOutput::from_outcome(outcome, session.generation());
    output(&result, json_mode);
    Ok(())
}
