use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use super::base::Backend;
use crate::errors::{ModelError, ModelResult};

pub const DEFAULT_EXECUTABLE: &str = "claude";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Executable to run, looked up on PATH unless it is a path
    pub executable: String,
    pub request_timeout: Duration,
    pub version_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            version_timeout: DEFAULT_VERSION_TIMEOUT,
        }
    }
}

/// Backend that runs the claude CLI in print mode once per prompt
pub struct ClaudeCliBackend {
    config: BackendConfig,
}

impl ClaudeCliBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Command-line arguments for one prompt: `-p <prompt> [--system-prompt <system>]`
    pub fn arguments(prompt: &str, system: Option<&str>) -> Vec<String> {
        let mut args = vec!["-p".to_string(), prompt.to_string()];
        if let Some(system) = system {
            args.push("--system-prompt".to_string());
            args.push(system.to_string());
        }
        args
    }

    async fn run(&self, args: &[String], timeout: Duration) -> ModelResult<String> {
        debug!(command = %self.display_command(args), "Executing backend");

        let child = Command::new(&self.config.executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Dropping the pending wait on timeout kills the child
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => return Err(ModelError::BackendTimeout(timeout)),
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(status = %output.status, "Backend exited unsuccessfully");
            if stderr.is_empty() {
                Err(ModelError::BackendInvocation("Command failed".to_string()))
            } else {
                Err(ModelError::BackendInvocation(stderr))
            }
        }
    }

    fn display_command(&self, args: &[String]) -> String {
        let mut parts = vec![self.config.executable.clone()];
        parts.extend(args.iter().map(|arg| {
            if arg.contains(' ') {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        }));
        parts.join(" ")
    }
}

impl Default for ClaudeCliBackend {
    fn default() -> Self {
        Self::new(BackendConfig::default())
    }
}

#[async_trait]
impl Backend for ClaudeCliBackend {
    fn name(&self) -> &str {
        &self.config.executable
    }

    async fn version(&self) -> ModelResult<String> {
        self.run(&["--version".to_string()], self.config.version_timeout)
            .await
    }

    async fn complete(&self, prompt: &str, system: Option<&str>) -> ModelResult<String> {
        let args = Self::arguments(prompt, system);
        self.run(&args, self.config.request_timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_without_system_prompt() {
        assert_eq!(ClaudeCliBackend::arguments("hello", None), vec!["-p", "hello"]);
    }

    #[test]
    fn test_arguments_with_system_prompt() {
        assert_eq!(
            ClaudeCliBackend::arguments("hello", Some("be brief")),
            vec!["-p", "hello", "--system-prompt", "be brief"]
        );
    }

    #[test]
    fn test_display_command_quotes_spaces() {
        let backend = ClaudeCliBackend::default();
        let args = ClaudeCliBackend::arguments("two words", None);
        assert_eq!(backend.display_command(&args), "claude -p \"two words\"");
    }

    #[tokio::test]
    async fn test_missing_executable_is_an_io_error() {
        let backend = ClaudeCliBackend::new(BackendConfig {
            executable: "bespoken-test-no-such-binary".to_string(),
            ..BackendConfig::default()
        });
        let err = backend.version().await.unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
