use async_trait::async_trait;
use similar::TextDiff;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{AgentError, AgentResult};
use crate::models::tool::{Tool, ToolCall, ToolParameter};
use crate::toolbox::Toolbox;

/// Files longer than this are cut off when read
pub const READ_LIMIT: usize = 50_000;
const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// File operations rooted at a working directory
pub struct FileTools {
    tools: Vec<Tool>,
    working_directory: PathBuf,
}

impl FileTools {
    pub fn new<P: Into<PathBuf>>(working_directory: P) -> Self {
        let list_files = Tool::new(
            "list_files",
            "List files and directories. Defaults to the working directory.",
            vec![ToolParameter::optional(
                "directory",
                "Directory to list, absolute or relative to the working directory",
            )],
        );

        let read_file = Tool::new(
            "read_file",
            "Read content from a file.",
            vec![ToolParameter::required("file_path", "The file to read")],
        );

        let write_file = Tool::new(
            "write_file",
            "Write content to a file, creating parent directories as needed.",
            vec![
                ToolParameter::required("file_path", "The file to write"),
                ToolParameter::required("content", "The full new content of the file"),
            ],
        );

        let replace_in_file = Tool::new(
            "replace_in_file",
            "Replace every occurrence of a string in a file and show the diff.",
            vec![
                ToolParameter::required("file_path", "The file to edit"),
                ToolParameter::required("old_string", "The exact text to replace"),
                ToolParameter::required("new_string", "The replacement text"),
            ],
        );

        Self {
            tools: vec![list_files, read_file, write_file, replace_in_file],
            working_directory: working_directory.into(),
        }
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    // Helper method to resolve a path relative to the working directory
    fn resolve_path(&self, path_str: &str) -> PathBuf {
        let path = Path::new(path_str);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_directory.join(path)
        }
    }

    fn list_files(&self, directory: Option<&str>) -> AgentResult<String> {
        info!(
            "Listing files in {}",
            directory.unwrap_or("current directory")
        );
        let target = match directory {
            Some(dir) => self.resolve_path(dir),
            None => self.working_directory.clone(),
        };

        let entries = fs::read_dir(&target).map_err(|e| {
            AgentError::ExecutionError(format!("Failed to read directory: {}", e))
        })?;
        let mut entries = entries.collect::<Result<Vec<_>, _>>().map_err(|e| {
            AgentError::ExecutionError(format!("Failed to read directory entry: {}", e))
        })?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut items = Vec::new();
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let metadata = entry.metadata().map_err(|e| {
                AgentError::ExecutionError(format!("Failed to read metadata of {}: {}", name, e))
            })?;
            if metadata.is_dir() {
                items.push(format!("{}/ [DIR]", name));
            } else {
                items.push(format!("{} ({} bytes)", name, metadata.len()));
            }
        }

        if items.is_empty() {
            return Ok("No files found".to_string());
        }
        Ok(format!("Files in {}:\n{}", target.display(), items.join("\n")))
    }

    fn read_file(&self, file_path: &str) -> AgentResult<String> {
        info!("Reading file: {}", file_path);
        let bytes = fs::read(self.resolve_path(file_path))
            .map_err(|e| AgentError::ExecutionError(format!("Failed to read file: {}", e)))?;
        let content = String::from_utf8_lossy(&bytes);

        match content.char_indices().nth(READ_LIMIT) {
            Some((cut, _)) => Ok(format!("{}{}", &content[..cut], TRUNCATION_MARKER)),
            None => Ok(content.into_owned()),
        }
    }

    fn write_file(&self, file_path: &str, content: &str) -> AgentResult<String> {
        let characters = group_thousands(content.chars().count());
        info!("Writing {} characters to: {}", characters, file_path);

        let path = self.resolve_path(file_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AgentError::ExecutionError(format!("Failed to create directories: {}", e))
            })?;
        }
        fs::write(&path, content)
            .map_err(|e| AgentError::ExecutionError(format!("Failed to write file: {}", e)))?;

        Ok(format!("Wrote {} characters to '{}'", characters, file_path))
    }

    fn replace_in_file(
        &self,
        file_path: &str,
        old_string: &str,
        new_string: &str,
    ) -> AgentResult<String> {
        info!("Replacing text in: {}", file_path);
        if old_string.is_empty() {
            return Err(AgentError::InvalidParameters(
                "'old_string' must not be empty".into(),
            ));
        }

        let path = self.resolve_path(file_path);
        let original = fs::read_to_string(&path)
            .map_err(|e| AgentError::ExecutionError(format!("Failed to read file: {}", e)))?;
        let updated = original.replace(old_string, new_string);

        if updated == original {
            return Ok(format!("No changes made to '{}'", file_path));
        }

        let diff = TextDiff::from_lines(&original, &updated)
            .unified_diff()
            .context_radius(3)
            .header(
                &format!("{} (before)", file_path),
                &format!("{} (after)", file_path),
            )
            .to_string();

        fs::write(&path, &updated)
            .map_err(|e| AgentError::ExecutionError(format!("Failed to write file: {}", e)))?;

        Ok(format!("Replaced in '{}':\n{}", file_path, diff))
    }
}

impl Default for FileTools {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

#[async_trait]
impl Toolbox for FileTools {
    fn name(&self) -> &str {
        "FileTools"
    }

    fn description(&self) -> &str {
        "List, read, write and edit files in the working directory"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<String> {
        match tool_call.name.as_str() {
            "list_files" => self.list_files(tool_call.optional_argument(0)),
            "read_file" => self.read_file(tool_call.argument(0, "file_path")?),
            "write_file" => self.write_file(
                tool_call.argument(0, "file_path")?,
                tool_call.argument(1, "content")?,
            ),
            "replace_in_file" => self.replace_in_file(
                tool_call.argument(0, "file_path")?,
                tool_call.argument(1, "old_string")?,
                tool_call.argument(2, "new_string")?,
            ),
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}

/// Format a count with comma thousands separators, e.g. `12,345`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
