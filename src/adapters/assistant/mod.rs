//! Assistant adapter implementations.

pub mod scripted;

pub use scripted::{ScriptedAssistant, ScriptedReply};
