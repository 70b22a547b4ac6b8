#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bespoken::errors::ModelError;
use bespoken::model::Model;
use bespoken::providers::base::Backend;
use bespoken::providers::claude::{BackendConfig, ClaudeCliBackend};
use bespoken::tools::FileTools;

/// Write an executable shell script standing in for the claude CLI
fn fake_cli(dir: &Path, body: &str) -> String {
    let path = dir.join("fake-claude");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_str().unwrap().to_string()
}

fn backend(executable: String) -> ClaudeCliBackend {
    ClaudeCliBackend::new(BackendConfig {
        executable,
        ..BackendConfig::default()
    })
}

#[tokio::test]
async fn test_prompt_and_system_are_passed_as_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend(fake_cli(dir.path(), r#"printf '%s\n' "$@""#));

    let reply = backend
        .complete("hello world", Some("be brief"))
        .await
        .unwrap();
    assert_eq!(reply, "-p\nhello world\n--system-prompt\nbe brief");

    let reply = backend.complete("hello", None).await.unwrap();
    assert_eq!(reply, "-p\nhello");
}

#[tokio::test]
async fn test_stdout_is_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend(fake_cli(dir.path(), "printf '\\n  hi there  \\n\\n'"));

    assert_eq!(backend.complete("x", None).await.unwrap(), "hi there");
}

#[tokio::test]
async fn test_failure_reports_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend(fake_cli(dir.path(), "echo 'rate limited' >&2\nexit 1"));

    let err = backend.complete("x", None).await.unwrap_err();
    assert_eq!(err, ModelError::BackendInvocation("rate limited".to_string()));
}

#[tokio::test]
async fn test_failure_without_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend(fake_cli(dir.path(), "exit 3"));

    let err = backend.complete("x", None).await.unwrap_err();
    assert_eq!(err.to_string(), "Command failed");
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let backend = ClaudeCliBackend::new(BackendConfig {
        executable: fake_cli(dir.path(), "sleep 5"),
        request_timeout: Duration::from_millis(200),
        ..BackendConfig::default()
    });

    let err = backend.complete("x", None).await.unwrap_err();
    assert_eq!(err, ModelError::BackendTimeout(Duration::from_millis(200)));
    assert_eq!(err.to_string(), "Request timed out after 200 ms");
}

#[tokio::test]
async fn test_hanging_version_probe_makes_backend_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let backend = ClaudeCliBackend::new(BackendConfig {
        executable: fake_cli(dir.path(), r#"[ "$1" = "--version" ] && sleep 5"#),
        version_timeout: Duration::from_millis(200),
        ..BackendConfig::default()
    });

    let err = Model::new("claude", Arc::new(backend)).await.err().unwrap();
    match err {
        ModelError::BackendUnavailable { reason, .. } => {
            assert_eq!(reason, "Request timed out after 200 ms");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_version_probe_gates_model_creation() {
    let dir = tempfile::tempdir().unwrap();
    let healthy = fake_cli(
        dir.path(),
        r#"[ "$1" = "--version" ] && echo "1.0.0 (fake)""#,
    );
    let model = Model::new("claude", Arc::new(backend(healthy))).await.unwrap();
    assert_eq!(model.name(), "claude");

    let missing = backend(dir.path().join("absent").to_str().unwrap().to_string());
    assert!(!Model::available(&missing).await);
    let err = Model::new("claude", Arc::new(missing)).await.err().unwrap();
    assert!(matches!(err, ModelError::BackendUnavailable { .. }));
}

#[tokio::test]
async fn test_reply_tool_calls_run_against_files() {
    let cli_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();
    let executable = fake_cli(
        cli_dir.path(),
        r#"[ "$1" = "--version" ] && { echo "1.0.0"; exit 0; }
echo 'Saving it: write_file("a.txt", "hi") then unknown_fn(1,2)'"#,
    );

    let model = Model::new("claude", Arc::new(backend(executable)))
        .await
        .unwrap();
    let mut conversation =
        model.conversation(None, vec![Arc::new(FileTools::new(work_dir.path()))]);

    let response = conversation.chain("save hi to a.txt").await;
    assert!(!response.is_error());
    assert_eq!(response.tool_calls().len(), 2);

    let outcomes = response.dispatch_tools().await;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].toolbox, "FileTools");
    assert_eq!(
        outcomes[0].result,
        Ok("Wrote 2 characters to 'a.txt'".to_string())
    );
    assert_eq!(
        fs::read_to_string(work_dir.path().join("a.txt")).unwrap(),
        "hi"
    );
}
