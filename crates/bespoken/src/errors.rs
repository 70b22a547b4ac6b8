use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Failures talking to the model backend process.
///
/// Only `BackendUnavailable` and `UnsupportedModel` ever reach a caller as errors. The
/// per-turn variants are rendered into the reply text by the conversation, which is why
/// their display strings are the bare diagnostic.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("{executable} CLI not found or not responding ({reason}). Install with:\nnpm install -g @anthropic-ai/claude-code")]
    BackendUnavailable { executable: String, reason: String },

    #[error("Model '{0}' is not supported, only claude models are available")]
    UnsupportedModel(String),

    #[error("{0}")]
    BackendInvocation(String),

    #[error("Request timed out after {}", describe_duration(.0))]
    BackendTimeout(Duration),

    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Io(err.to_string())
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Whole seconds read as `60 seconds`; anything finer falls back to milliseconds
fn describe_duration(duration: &Duration) -> String {
    match (duration.as_secs(), duration.subsec_nanos()) {
        (1, 0) => "1 second".to_string(),
        (secs, 0) => format!("{} seconds", secs),
        _ => format!("{} ms", duration.as_millis()),
    }
}
