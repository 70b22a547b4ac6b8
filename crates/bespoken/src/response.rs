use std::fmt;
use std::sync::Arc;

use crate::dispatch::{dispatch, find_calls, DispatchOutcome, ScrapedCall};
use crate::providers::base::Usage;
use crate::toolbox::Toolbox;

/// The reply to one `chain` call.
///
/// Building a response has no side effects. Tool calls in the text only run when the caller
/// asks for them with [`Response::dispatch_tools`].
#[derive(Clone)]
pub struct Response {
    text: String,
    tools: Vec<Arc<dyn Toolbox>>,
    usage: Usage,
    error: bool,
}

impl Response {
    pub fn new<S: Into<String>>(text: S, tools: Vec<Arc<dyn Toolbox>>, usage: Usage) -> Self {
        Self {
            text: text.into(),
            tools,
            usage,
            error: false,
        }
    }

    /// A response standing in for a failed backend call; the text carries the diagnostic
    pub(crate) fn failed<S: Into<String>>(
        text: S,
        tools: Vec<Arc<dyn Toolbox>>,
        usage: Usage,
    ) -> Self {
        Self {
            error: true,
            ..Self::new(text, tools, usage)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn tools(&self) -> &[Arc<dyn Toolbox>] {
        &self.tools
    }

    /// Whether the backend call behind this response failed
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Call-shaped substrings in the text, whether or not a toolbox declares them
    pub fn tool_calls(&self) -> Vec<ScrapedCall> {
        find_calls(&self.text)
    }

    /// Run the tool calls found in the text against this response's toolboxes
    pub async fn dispatch_tools(&self) -> Vec<DispatchOutcome> {
        dispatch(&self.text, &self.tools).await
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tools: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
        f.debug_struct("Response")
            .field("text", &self.text)
            .field("tools", &tools)
            .field("usage", &self.usage)
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
