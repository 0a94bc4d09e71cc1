//! Scripted assistant for tests, demos and offline use.
//!
//! Replies are chosen by the first registered keyword found in the
//! instruction, falling back to a default reply. Each reply can carry a
//! simulated latency so ordering and timeout behaviour can be exercised.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::ports::{AssistantClient, AssistantError, AssistantRequest};

/// Canned reply configuration.
#[derive(Debug, Clone)]
pub struct ScriptedReply {
    /// What to answer with
    pub payload: Result<Value, AssistantError>,
    /// Simulated latency
    pub delay: Duration,
}

impl Default for ScriptedReply {
    fn default() -> Self {
        Self {
            payload: Ok(Value::Object(serde_json::Map::new())),
            delay: Duration::ZERO,
        }
    }
}

impl ScriptedReply {
    /// Reply with a structured proposal.
    pub fn proposal(value: Value) -> Self {
        Self {
            payload: Ok(value),
            ..Default::default()
        }
    }

    /// Reply with raw model text, as a chat backend would.
    pub fn text(text: impl Into<String>) -> Self {
        Self::proposal(Value::String(text.into()))
    }

    /// Fail the request with `error`.
    pub fn failure(error: AssistantError) -> Self {
        Self {
            payload: Err(error),
            ..Default::default()
        }
    }

    /// Wait `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Assistant that replays configured replies.
pub struct ScriptedAssistant {
    default_reply: ScriptedReply,
    replies: Arc<RwLock<Vec<(String, ScriptedReply)>>>,
    received: Arc<RwLock<Vec<AssistantRequest>>>,
}

impl ScriptedAssistant {
    /// Assistant that answers every instruction with an empty proposal.
    pub fn new() -> Self {
        Self::with_default_reply(ScriptedReply::default())
    }

    /// Assistant that falls back to `reply` when no keyword matches.
    pub fn with_default_reply(reply: ScriptedReply) -> Self {
        Self {
            default_reply: reply,
            replies: Arc::new(RwLock::new(Vec::new())),
            received: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Answer instructions containing `keyword` (case-insensitive) with `reply`.
    pub async fn on(&self, keyword: impl Into<String>, reply: ScriptedReply) {
        let mut replies = self.replies.write().await;
        replies.push((keyword.into().to_lowercase(), reply));
    }

    /// Requests seen so far, in arrival order.
    pub async fn received(&self) -> Vec<AssistantRequest> {
        self.received.read().await.clone()
    }

    async fn reply_for(&self, instruction: &str) -> ScriptedReply {
        let lowered = instruction.to_lowercase();
        let replies = self.replies.read().await;
        replies
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword.as_str()))
            .map_or_else(|| self.default_reply.clone(), |(_, reply)| reply.clone())
    }
}

impl Default for ScriptedAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantClient for ScriptedAssistant {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn propose(&self, request: AssistantRequest) -> Result<Value, AssistantError> {
        let reply = self.reply_for(&request.instruction).await;
        self.received.write().await.push(request);

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.payload
    }
}
