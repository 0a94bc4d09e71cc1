//! Assistant session: issues proposal requests and applies their results.
//!
//! Every request takes the next value of a generation counter. When a
//! response arrives it is merged only if its generation is still the
//! newest; anything older is discarded as stale. `cancel` bumps the
//! counter so an in-flight request can never land.
//!
//! Callers get one of three outcomes and can tell "the assistant never
//! answered" apart from "the assistant answered and nothing changed".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::domain::models::{validate, AssistantConfig, ShedSpec};
use crate::domain::ports::{AssistantClient, AssistantError, AssistantRequest};

use super::proposal_merge::{merge_value, MergeOutcome};

/// What happened to a submitted instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalOutcome {
    /// The proposal was merged. `changed_fields` may be empty.
    Applied(MergeOutcome),
    /// No proposal was obtained; the spec is unchanged.
    Unavailable(AssistantError),
    /// A newer request superseded this one; the result was discarded.
    Stale {
        /// Generation of the discarded request
        generation: u64,
        /// Newest generation at the time
        latest: u64,
    },
}

impl ProposalOutcome {
    /// Whether a proposal was merged.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The merge, when one happened.
    pub const fn merge(&self) -> Option<&MergeOutcome> {
        match self {
            Self::Applied(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Assistants answer either with a JSON object or with text holding one.
fn coerce_proposal(raw: Value) -> Result<Value, AssistantError> {
    match raw {
        Value::Object(_) => Ok(raw),
        Value::Null => Err(AssistantError::Unavailable("empty response".to_string())),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(AssistantError::Unavailable("empty response".to_string()));
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(parsed @ Value::Object(_)) => Ok(parsed),
                Ok(_) => Err(AssistantError::Malformed("expected a JSON object".to_string())),
                Err(e) => Err(AssistantError::Malformed(e.to_string())),
            }
        }
        _ => Err(AssistantError::Malformed("expected a JSON object".to_string())),
    }
}

/// One configurator session's spec plus its assistant.
#[derive(Clone)]
pub struct AssistantSession {
    assistant: Arc<dyn AssistantClient>,
    spec: Arc<RwLock<ShedSpec>>,
    generation: Arc<AtomicU64>,
    timeout: Duration,
    publisher: Arc<watch::Sender<ShedSpec>>,
}

impl AssistantSession {
    /// Session over `initial`, validated first.
    pub fn new(assistant: Arc<dyn AssistantClient>, initial: ShedSpec, config: &AssistantConfig) -> Self {
        let initial = validate(initial);
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            assistant,
            spec: Arc::new(RwLock::new(initial)),
            generation: Arc::new(AtomicU64::new(0)),
            timeout: Duration::from_millis(config.timeout_ms),
            publisher: Arc::new(publisher),
        }
    }

    /// Current spec.
    pub async fn spec(&self) -> ShedSpec {
        self.spec.read().await.clone()
    }

    /// Receiver that sees every committed spec. Simulators read from this.
    pub fn subscribe(&self) -> watch::Receiver<ShedSpec> {
        self.publisher.subscribe()
    }

    /// Newest generation issued so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidate every in-flight request.
    pub fn cancel(&self) -> u64 {
        let latest = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(latest, "cancelled in-flight proposals");
        latest
    }

    /// Apply a direct user edit. The result is validated before it is
    /// committed.
    pub async fn edit<F>(&self, f: F) -> ShedSpec
    where
        F: FnOnce(&mut ShedSpec),
    {
        let mut spec = self.spec.write().await;
        let mut edited = spec.clone();
        f(&mut edited);
        let edited = validate(edited);
        *spec = edited.clone();
        self.publisher.send_replace(edited.clone());
        edited
    }

    /// Ask the assistant to act on `instruction` and merge its answer.
    #[instrument(skip(self), fields(assistant = self.assistant.name()))]
    pub async fn submit(&self, instruction: &str) -> ProposalOutcome {
        if instruction.trim().is_empty() {
            return ProposalOutcome::Unavailable(AssistantError::EmptyInstruction);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = self.spec().await;
        let request = AssistantRequest::new(generation, instruction, snapshot);

        let response = tokio::time::timeout(self.timeout, self.assistant.propose(request)).await;

        let latest = self.generation();
        if latest != generation {
            debug!(generation, latest, "discarding stale proposal");
            return ProposalOutcome::Stale { generation, latest };
        }

        let raw = match response {
            Err(_) => {
                let ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(generation, timeout_ms = ms, "assistant timed out");
                return ProposalOutcome::Unavailable(AssistantError::Timeout(ms));
            }
            Ok(Err(err)) => {
                warn!(generation, error = %err, "assistant returned no proposal");
                return ProposalOutcome::Unavailable(err);
            }
            Ok(Ok(raw)) => raw,
        };

        let raw = match coerce_proposal(raw) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(generation, error = %err, "assistant proposal unusable");
                return ProposalOutcome::Unavailable(err);
            }
        };

        let mut spec = self.spec.write().await;
        // A newer request may have been issued while we waited for the lock
        let latest = self.generation();
        if latest != generation {
            debug!(generation, latest, "discarding stale proposal");
            return ProposalOutcome::Stale { generation, latest };
        }

        let mut outcome = merge_value(&spec, &raw);
        let lowered = instruction.to_lowercase();
        outcome
            .advisories
            .retain(|a| a.topic().map_or(true, |topic| !lowered.contains(topic)));

        *spec = outcome.spec.clone();
        self.publisher.send_replace(outcome.spec.clone());

        info!(
            generation,
            changed = ?outcome.changed_fields,
            "applied assistant proposal"
        );
        ProposalOutcome::Applied(outcome)
    }
}
