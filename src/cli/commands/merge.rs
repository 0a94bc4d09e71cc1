//! `merge` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{bullet_list, output, CommandOutput};
use crate::services::proposal_merge::{merge_value, MergeOutcome};

use super::{load_spec, read_document};

/// Arguments for `merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Current spec file
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Proposal file (a partial spec, as an assistant would return)
    #[arg(short, long)]
    pub proposal: PathBuf,
}

/// Merge outcome plus readable advisory text.
#[derive(Debug, Serialize)]
pub struct MergeOutput {
    /// Merged spec and change report
    #[serde(flatten)]
    pub outcome: MergeOutcome,
    /// One message per advisory
    pub advisory_messages: Vec<String>,
}

impl From<MergeOutcome> for MergeOutput {
    fn from(outcome: MergeOutcome) -> Self {
        let advisory_messages = outcome
            .advisories
            .iter()
            .map(|a| a.message().to_string())
            .collect();
        Self {
            outcome,
            advisory_messages,
        }
    }
}

impl CommandOutput for MergeOutput {
    fn to_human(&self) -> String {
        let outcome = &self.outcome;
        let mut lines = Vec::new();
        if let Some(explanation) = &outcome.explanation {
            lines.push(explanation.clone());
            lines.push(String::new());
        }
        if outcome.is_noop() {
            lines.push("No changes.".to_string());
        } else {
            lines.push("Changed:".to_string());
            lines.push(bullet_list(&outcome.changed_fields, "none"));
        }
        if !outcome.rejected_fields.is_empty() {
            lines.push("Rejected:".to_string());
            lines.push(bullet_list(&outcome.rejected_fields, "none"));
        }
        if !self.advisory_messages.is_empty() {
            lines.push("Notes:".to_string());
            lines.push(bullet_list(&self.advisory_messages, "none"));
        }
        lines.push(String::new());
        lines.push(serde_json::to_string_pretty(&outcome.spec).unwrap_or_default());
        lines.join("\n")
    }
}

/// Merge a proposal file into a spec file.
pub async fn execute(args: MergeArgs, json_mode: bool) -> Result<()> {
    let current = load_spec(&args.spec)?;
    let proposal = read_document(&args.proposal)
        .with_context(|| format!("Failed to load proposal from {}", args.proposal.display()))?;

    let result = MergeOutput::from(merge_value(&current, &proposal));
    output(&result, json_mode);
    Ok(())
}
