//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use shedwright::adapters::assistant::{ScriptedAssistant, ScriptedReply};
use shedwright::domain::models::AssistantConfig;
use shedwright::{AssistantSession, PowerKit, ShedSpec, ShedStyle};

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write a JSON document into `dir` and return its path
pub fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Setup test logging
///
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A powered workshop with climate control and a bench
pub fn workshop_spec() -> ShedSpec {
    let mut spec = ShedSpec {
        style: ShedStyle::Utility,
        width: 10,
        depth: 20,
        power_kit: PowerKit::Workshop30A,
        ..Default::default()
    };
    spec.addons.ac = true;
    spec.addons.workbench = true;
    spec
}

/// Session around a scripted assistant with the given default reply
pub fn scripted_session(
    reply: ScriptedReply,
    timeout_ms: u64,
) -> (Arc<ScriptedAssistant>, AssistantSession) {
    let assistant = Arc::new(ScriptedAssistant::with_default_reply(reply));
    let session = AssistantSession::new(
        assistant.clone(),
        ShedSpec::default(),
        &AssistantConfig { timeout_ms },
    );
    (assistant, session)
}
