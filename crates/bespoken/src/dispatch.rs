//! Recovering tool calls from free-form model output.
//!
//! The backend has no tool-calling protocol, so anything in the reply shaped like
//! `name(args)` is a candidate call. The first `)` ends a call, which means nested
//! parentheses are not supported: `foo(bar(1,2))` is `foo` called with `bar(1,2`.

use futures::FutureExt;
use lazy_static::lazy_static;
use regex::Regex;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error};

use crate::args::parse_args;
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::ToolCall;
use crate::toolbox::Toolbox;

lazy_static! {
    static ref CALL_PATTERN: Regex =
        Regex::new(r"\b(\w+)\s*\(\s*([^)]*)\s*\)").expect("call pattern is a valid regex");
}

/// A call-shaped substring of model output, before it is matched against any toolbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedCall {
    pub name: String,
    pub raw_arguments: String,
}

impl ScrapedCall {
    pub fn to_tool_call(&self) -> ToolCall {
        ToolCall::new(self.name.clone(), parse_args(&self.raw_arguments))
    }
}

/// The result of one dispatched call
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// Name of the toolbox that handled the call
    pub toolbox: String,
    pub call: ToolCall,
    pub result: AgentResult<String>,
}

/// Find every call-shaped substring in `text`, in order of appearance
pub fn find_calls(text: &str) -> Vec<ScrapedCall> {
    CALL_PATTERN
        .captures_iter(text)
        .map(|caps| ScrapedCall {
            name: caps[1].to_string(),
            raw_arguments: caps[2].to_string(),
        })
        .collect()
}

/// Run every call in `text` that names a declared tool.
///
/// Each call goes to the first toolbox declaring the name. Calls naming no declared tool are
/// skipped silently. A failing or panicking tool is logged and recorded in its outcome, and
/// dispatch moves on to the next call.
pub async fn dispatch(text: &str, toolboxes: &[Arc<dyn Toolbox>]) -> Vec<DispatchOutcome> {
    let mut outcomes = Vec::new();
    if toolboxes.is_empty() {
        return outcomes;
    }

    for scraped in find_calls(text) {
        let Some((toolbox, tool)) = toolboxes
            .iter()
            .find_map(|toolbox| toolbox.tool(&scraped.name).map(|tool| (toolbox, tool)))
        else {
            continue;
        };

        let call = scraped.to_tool_call();
        debug!(toolbox = toolbox.name(), tool = %call.name, arguments = ?call.arguments, "Dispatching tool call");

        let result = match tool.check_arity(call.arguments.len()) {
            Ok(()) => invoke(toolbox.as_ref(), call.clone()).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(output) => debug!(tool = %call.name, output = %output, "Tool returned"),
            Err(e) => error!(tool = %call.name, "Tool execution error: {}", e),
        }

        outcomes.push(DispatchOutcome {
            toolbox: toolbox.name().to_string(),
            call,
            result,
        });
    }

    outcomes
}

async fn invoke(toolbox: &dyn Toolbox, call: ToolCall) -> AgentResult<String> {
    let name = call.name.clone();
    match AssertUnwindSafe(toolbox.call(call)).catch_unwind().await {
        Ok(result) => result,
        Err(_) => Err(AgentError::Internal(format!("tool '{}' panicked", name))),
    }
}
