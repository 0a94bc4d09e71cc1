//! Assistant Port
//!
//! The natural-language assistant is an external collaborator: it takes an
//! instruction plus the current spec and answers with free-form JSON that
//! is supposed to look like a partial spec. Nothing about that answer is
//! trusted; the merge protocol type-checks every field.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::ShedSpec;

/// Request sent to an assistant backend
#[derive(Debug, Clone)]
pub struct AssistantRequest {
    /// Unique request identifier
    pub request_id: Uuid,

    /// Generation number assigned by the session; higher is newer
    pub generation: u64,

    /// The user's free-text instruction
    pub instruction: String,

    /// Snapshot of the spec the instruction refers to
    pub current_spec: ShedSpec,
}

impl AssistantRequest {
    /// Request stamped with a fresh id and the current time.
    pub fn new(generation: u64, instruction: impl Into<String>, current_spec: ShedSpec) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            generation,
            instruction: instruction.into(),
            current_spec,
        }
    }
}

/// Reasons no proposal could be obtained
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AssistantError {
    /// Backend could not answer
    #[error("Assistant unavailable: {0}")]
    Unavailable(String),

    /// No answer within the timeout, in milliseconds
    #[error("Assistant timed out after {0}ms")]
    Timeout(u64),

    /// Answer was not a JSON object
    #[error("Assistant returned unparsable output: {0}")]
    Malformed(String),

    /// Nothing to ask
    #[error("Instruction was empty")]
    EmptyInstruction,
}

/// Port trait for assistant implementations
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for concurrent use across tokio tasks.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Get human-readable name for this assistant backend
    fn name(&self) -> &str;

    /// Produce a proposal for `request`
    ///
    /// # Returns
    /// * `Ok(value)` - Raw JSON proposal, not yet validated
    /// * `Err(AssistantError)` - No proposal is available
    async fn propose(&self, request: AssistantRequest) -> Result<serde_json::Value, AssistantError>;
}
