use serde::{Deserialize, Serialize};

use crate::errors::{AgentError, AgentResult};

/// A positional parameter of a tool. Every argument arrives as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl ToolParameter {
    pub fn required<N, D>(name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        ToolParameter {
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional<N, D>(name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        ToolParameter {
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }
}

/// A tool that can be used by a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name of the tool, which is also the function name the model writes
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// Positional parameters in call order. Optional ones must come last.
    pub parameters: Vec<ToolParameter>,
}

impl Tool {
    /// Create a new tool with the given name and description
    pub fn new<N, D>(name: N, description: D, parameters: Vec<ToolParameter>) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// The call shape shown to the model, e.g. `write_file(path, content)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                if p.required {
                    p.name.clone()
                } else {
                    format!("{}?", p.name)
                }
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// Check that a positional argument count fits this tool's parameter list
    pub fn check_arity(&self, count: usize) -> AgentResult<()> {
        let required = self.parameters.iter().filter(|p| p.required).count();
        let total = self.parameters.len();
        if count < required || count > total {
            let expected = if required == total {
                format!("{}", total)
            } else {
                format!("{} to {}", required, total)
            };
            return Err(AgentError::InvalidParameters(format!(
                "{} takes {} argument(s) but {} were given",
                self.name, expected, count
            )));
        }
        Ok(())
    }
}

/// A tool call recovered from model output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The name of the tool to execute
    pub name: String,
    /// Positional arguments, already unquoted
    pub arguments: Vec<String>,
}

impl ToolCall {
    pub fn new<S: Into<String>>(name: S, arguments: Vec<String>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Fetch a positional argument or report which parameter is missing
    pub fn argument(&self, index: usize, name: &str) -> AgentResult<&str> {
        self.arguments
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| AgentError::InvalidParameters(format!("Missing '{}' parameter", name)))
    }

    /// Fetch an optional positional argument
    pub fn optional_argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_files() -> Tool {
        Tool::new(
            "list_files",
            "List files",
            vec![ToolParameter::optional("directory", "Directory to list")],
        )
    }

    #[test]
    fn test_signature_marks_optional_parameters() {
        assert_eq!(list_files().signature(), "list_files(directory?)");
        let write = Tool::new(
            "write_file",
            "Write",
            vec![
                ToolParameter::required("path", ""),
                ToolParameter::required("content", ""),
            ],
        );
        assert_eq!(write.signature(), "write_file(path, content)");
    }

    #[test]
    fn test_check_arity() {
        let tool = list_files();
        assert!(tool.check_arity(0).is_ok());
        assert!(tool.check_arity(1).is_ok());
        let err = tool.check_arity(2).unwrap_err();
        assert!(matches!(err, AgentError::InvalidParameters(_)));
        assert!(err.to_string().contains("0 to 1"));
    }

    #[test]
    fn test_missing_argument() {
        let call = ToolCall::new("read_file", vec![]);
        let err = call.argument(0, "path").unwrap_err();
        assert_eq!(
            err,
            AgentError::InvalidParameters("Missing 'path' parameter".into())
        );
    }
}
