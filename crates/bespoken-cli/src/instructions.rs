use bespoken::toolbox::Toolbox;
use std::sync::Arc;

const PREAMBLE: &str = "You are a coding assistant running in the user's terminal.

You can act on the user's files by writing a tool call anywhere in your reply, in the form
name(\"argument\", \"argument\"). Quote every argument. Arguments marked with ? are optional.
Calls are run after your reply is shown, and you will not see their output until the next turn.";

/// The default system prompt, listing every tool the registered toolboxes declare
pub fn system_prompt(toolboxes: &[Arc<dyn Toolbox>]) -> String {
    let mut sections = vec![PREAMBLE.to_string()];
    for toolbox in toolboxes {
        let mut lines = vec![format!("{}: {}", toolbox.name(), toolbox.description())];
        for tool in toolbox.tools() {
            lines.push(format!("- {}: {}", tool.signature(), tool.description));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}
