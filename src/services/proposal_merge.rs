//! Proposal merge protocol.
//!
//! Reconciles an untrusted partial proposal with the current spec. Fields
//! that fail type or enum checks are dropped, accepted fields are staged
//! over the current spec, and the staged result is run through `validate`.
//! Merging never fails: the worst case is "nothing changed".

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::models::{validate, Addon, PowerKit, Proposal, ShedSpec, ShedStyle};

/// Structural notes attached to a merge result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// 50A service needs a permit and a trenched feed. Flagged for human
    /// follow-up, never granted here.
    PermitRequired,
    /// AC was requested but there is no power kit to run it on.
    AcRequiresPower,
    /// Quaker saltbox roofs shed snow load to the rear.
    SaltboxSnowLoad,
    /// Wide footprints should sit on a gravel pad with skids.
    GravelPadFoundation,
}

impl Advisory {
    /// Text shown to the customer.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::PermitRequired => {
                "The 50A Guest kit requires an electrical permit and a trenched feed."
            }
            Self::AcRequiresPower => {
                "Climate control needs a power kit; AC was left off until one is selected."
            }
            Self::SaltboxSnowLoad => {
                "The Quaker's saltbox roof is excellent for shedding Atlantic snow loads on the rear side."
            }
            Self::GravelPadFoundation => {
                "For a structure this size, we recommend a gravel pad with 4x4 pressure-treated skids for maximum stability."
            }
        }
    }

    /// Topic word that, when present in the instruction, means the user is
    /// already asking about this and the note is redundant.
    pub const fn topic(&self) -> Option<&'static str> {
        match self {
            Self::SaltboxSnowLoad => Some("roof"),
            Self::GravelPadFoundation => Some("foundation"),
            Self::PermitRequired | Self::AcRequiresPower => None,
        }
    }
}

/// Result of merging a proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeOutcome {
    /// The merged, validated spec
    pub spec: ShedSpec,

    /// Assistant rationale, if one was supplied
    pub explanation: Option<String>,

    /// Fields whose value differs from the validated prior spec
    pub changed_fields: Vec<String>,

    /// Proposal keys that were dropped
    pub rejected_fields: Vec<String>,

    /// Structural notes for the caller to surface
    pub advisories: Vec<Advisory>,
}

impl MergeOutcome {
    /// True when nothing changed.
    pub fn is_noop(&self) -> bool {
        self.changed_fields.is_empty()
    }
}

/// Merge `proposal` into `current`. A `None` proposal yields
/// `validate(current)` with nothing changed.
pub fn merge(current: &ShedSpec, proposal: Option<&Proposal>) -> MergeOutcome {
    let baseline = validate(current.clone());

    let Some(proposal) = proposal else {
        return MergeOutcome {
            advisories: advisories_for(&baseline, false),
            spec: baseline,
            explanation: None,
            changed_fields: Vec::new(),
            rejected_fields: Vec::new(),
        };
    };

    let merged = validate(proposal.apply_to(&baseline));
    let changed_fields = baseline.diff(&merged);
    let ac_refused = proposal.requests(Addon::Ac) && !merged.addons.ac;

    if !proposal.rejected_fields.is_empty() {
        debug!(rejected = ?proposal.rejected_fields, "dropped proposal fields");
    }
    info!(
        changed = changed_fields.len(),
        rejected = proposal.rejected_fields.len(),
        ac_refused,
        "merged proposal"
    );

    MergeOutcome {
        advisories: advisories_for(&merged, ac_refused),
        spec: merged,
        explanation: proposal.explanation.clone(),
        changed_fields,
        rejected_fields: proposal.rejected_fields.clone(),
    }
}

/// Parse raw JSON and merge it. `null` behaves like an absent proposal.
pub fn merge_value(current: &ShedSpec, raw: &Value) -> MergeOutcome {
    if raw.is_null() {
        return merge(current, None);
    }
    let proposal = Proposal::from_value(raw);
    merge(current, Some(&proposal))
}

fn advisories_for(spec: &ShedSpec, ac_refused: bool) -> Vec<Advisory> {
    let mut notes = Vec::new();
    if spec.power_kit == PowerKit::Guest50A {
        notes.push(Advisory::PermitRequired);
    }
    if ac_refused {
        notes.push(Advisory::AcRequiresPower);
    }
    if spec.style == ShedStyle::Quaker {
        notes.push(Advisory::SaltboxSnowLoad);
    }
    if spec.width > 10 {
        notes.push(Advisory::GravelPadFoundation);
    }
    notes
}
