use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::message::Message;
use crate::models::role::Role;
use crate::providers::base::{Backend, Usage};
use crate::response::Response;
use crate::toolbox::Toolbox;

pub const DEFAULT_CONTEXT_WINDOW: usize = 6;
pub const DEFAULT_STREAM_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationConfig {
    /// How many of the most recent history entries are replayed to the backend
    pub context_window: usize,
    /// Pause after each word of a simulated stream
    pub stream_delay: Duration,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            stream_delay: DEFAULT_STREAM_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Text,
}

/// One piece of a streamed reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    pub text: String,
    pub kind: ChunkKind,
}

impl StreamChunk {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            kind: ChunkKind::Text,
        }
    }
}

/// A stateful session with the backend.
///
/// Every turn appends exactly two messages, the prompt and the reply, even when the backend
/// fails: the failure text is recorded as the reply. Only the last `context_window` entries
/// are replayed to the backend, but the full history is kept.
pub struct Conversation {
    backend: Arc<dyn Backend>,
    system: Option<String>,
    toolboxes: Vec<Arc<dyn Toolbox>>,
    history: Vec<Message>,
    config: ConversationConfig,
    last_turn: Option<Turn>,
}

/// What the newest exchange left behind besides its two history entries
#[derive(Debug, Clone, Copy)]
struct Turn {
    usage: Usage,
    failed: bool,
}

impl Conversation {
    pub fn new(
        backend: Arc<dyn Backend>,
        system: Option<String>,
        toolboxes: Vec<Arc<dyn Toolbox>>,
        config: ConversationConfig,
    ) -> Self {
        Self {
            backend,
            system,
            toolboxes,
            history: Vec::new(),
            config,
            last_turn: None,
        }
    }

    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn toolboxes(&self) -> &[Arc<dyn Toolbox>] {
        &self.toolboxes
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn config(&self) -> &ConversationConfig {
        &self.config
    }

    /// Send a prompt and wait for the whole reply.
    ///
    /// Never fails: a backend failure comes back as a response whose text starts with
    /// `Error: `.
    pub async fn chain(&mut self, prompt: &str) -> Response {
        let (text, usage, failed) = self.exchange(prompt).await;
        if failed {
            Response::failed(text, self.toolboxes.clone(), usage)
        } else {
            Response::new(text, self.toolboxes.clone(), usage)
        }
    }

    /// Send a prompt and replay the reply one word at a time.
    ///
    /// The backend has no incremental output, so the full reply is fetched when the first
    /// chunk is polled and then re-emitted word by word with `stream_delay` after each word.
    /// Every word but the last carries one trailing space. Running the stream again is a new
    /// turn, not a replay.
    pub fn stream<'a>(&'a mut self, prompt: &'a str) -> BoxStream<'a, StreamChunk> {
        Box::pin(async_stream::stream! {
            let (text, _usage, _failed) = self.exchange(prompt).await;
            let delay = self.config.stream_delay;

            let words: Vec<&str> = text.split_whitespace().collect();
            let last = words.len().saturating_sub(1);
            for (i, word) in words.iter().enumerate() {
                if i < last {
                    yield StreamChunk::text(format!("{} ", word));
                } else {
                    yield StreamChunk::text(*word);
                }
                tokio::time::sleep(delay).await;
            }
        })
    }

    /// Rebuild the response for the newest reply, e.g. to dispatch tools after streaming it
    pub fn last_response(&self) -> Option<Response> {
        let turn = self.last_turn?;
        let reply = self.history.last().filter(|m| m.role == Role::Assistant)?;
        let tools = self.toolboxes.clone();
        Some(if turn.failed {
            Response::failed(reply.content.clone(), tools, turn.usage)
        } else {
            Response::new(reply.content.clone(), tools, turn.usage)
        })
    }

    /// The text actually sent to the backend for `prompt`, given the history so far
    pub fn compose_prompt(&self, prompt: &str) -> String {
        if self.history.is_empty() {
            return prompt.to_string();
        }

        let start = self.history.len().saturating_sub(self.config.context_window);
        let context: Vec<String> = self.history[start..].iter().map(Message::render).collect();
        if context.is_empty() {
            return prompt.to_string();
        }
        format!("{}\n\n{}", context.join("\n\n"), Message::user(prompt).render())
    }

    /// One round trip: run the backend, then record the prompt and the reply together.
    ///
    /// Nothing is recorded until the backend answers, so a turn abandoned mid-call leaves
    /// history untouched.
    async fn exchange(&mut self, prompt: &str) -> (String, Usage, bool) {
        let composed = self.compose_prompt(prompt);

        let (text, failed) = match self.backend.complete(&composed, self.system()).await {
            Ok(text) => (text, false),
            Err(e) => {
                warn!(backend = self.backend.name(), "Backend call failed: {}", e);
                (format!("Error: {}", e), true)
            }
        };
        debug!(words = text.split_whitespace().count(), "Received reply");

        let usage = Usage::estimate(&composed, &text);
        self.history.push(Message::user(prompt));
        self.history.push(Message::assistant(text.clone()));
        self.last_turn = Some(Turn { usage, failed });
        (text, usage, failed)
    }
}
