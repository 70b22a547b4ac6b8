use async_trait::async_trait;

use crate::errors::AgentResult;
use crate::models::tool::{Tool, ToolCall};

/// Core trait for a set of tools the model can call from its reply text
///
/// A toolbox declares its operations up front through `tools()`. The dispatcher only calls
/// names found in that declaration, and checks the argument count before calling.
#[async_trait]
pub trait Toolbox: Send + Sync {
    /// Get the name of the toolbox
    fn name(&self) -> &str;

    /// Get the toolbox description
    fn description(&self) -> &str;

    /// Get available tools
    fn tools(&self) -> &[Tool];

    /// Call a tool with positional string arguments, returning human-readable text
    async fn call(&self, tool_call: ToolCall) -> AgentResult<String>;

    /// Look up a declared tool by name
    fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools().iter().find(|tool| tool.name == name)
    }
}
