use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ModelResult;

/// Token usage for one exchange.
///
/// The CLI backend reports no usage, so both sides are whitespace word counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl Usage {
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Approximate usage from the prompt that was sent and the text that came back
    pub fn estimate(prompt: &str, reply: &str) -> Self {
        Self::new(
            prompt.split_whitespace().count(),
            reply.split_whitespace().count(),
        )
    }
}

/// Base trait for model backends
///
/// A backend turns one fully composed prompt into one complete reply. History handling and
/// streaming live above this layer in the conversation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Name shown in diagnostics, usually the executable
    fn name(&self) -> &str;

    /// Probe the backend, returning its version string
    async fn version(&self) -> ModelResult<String>;

    /// Send a prompt and wait for the complete reply
    async fn complete(&self, prompt: &str, system: Option<&str>) -> ModelResult<String>;
}
