use std::sync::Arc;
use tracing::{debug, info};

use crate::conversation::{Conversation, ConversationConfig};
use crate::errors::{ModelError, ModelResult};
use crate::providers::base::Backend;
use crate::providers::claude::{BackendConfig, ClaudeCliBackend};
use crate::toolbox::Toolbox;

/// Entry point for talking to a model backend.
///
/// A `Model` only exists once its backend has answered a version probe, so every
/// conversation it hands out starts against a backend that was reachable.
pub struct Model {
    name: String,
    backend: Arc<dyn Backend>,
    config: ConversationConfig,
}

impl Model {
    /// Probe `backend` and wrap it, failing with `BackendUnavailable` if the probe fails
    pub async fn new<S: Into<String>>(name: S, backend: Arc<dyn Backend>) -> ModelResult<Self> {
        let version = backend
            .version()
            .await
            .map_err(|e| ModelError::BackendUnavailable {
                executable: backend.name().to_string(),
                reason: e.to_string(),
            })?;
        info!(backend = backend.name(), version = %version, "Backend available");

        Ok(Self {
            name: name.into(),
            backend,
            config: ConversationConfig::default(),
        })
    }

    /// Resolve a model name to a backend. Only claude models are served, through the CLI.
    pub async fn from_name(name: &str, config: BackendConfig) -> ModelResult<Self> {
        if !name.to_lowercase().contains("claude") {
            return Err(ModelError::UnsupportedModel(name.to_string()));
        }
        debug!(model = name, executable = %config.executable, "Resolving model");
        Self::new(name, Arc::new(ClaudeCliBackend::new(config))).await
    }

    /// Whether `backend` currently answers a version probe
    pub async fn available(backend: &dyn Backend) -> bool {
        backend.version().await.is_ok()
    }

    pub fn with_conversation_config(mut self, config: ConversationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        self.backend.clone()
    }

    /// Start a conversation with an optional system prompt and toolboxes
    pub fn conversation(
        &self,
        system: Option<String>,
        toolboxes: Vec<Arc<dyn Toolbox>>,
    ) -> Conversation {
        Conversation::new(self.backend.clone(), system, toolboxes, self.config.clone())
    }
}
