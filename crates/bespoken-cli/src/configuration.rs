use bespoken::conversation::ConversationConfig;
use bespoken::providers::claude::BackendConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, PartialEq)]
pub struct BackendSettings {
    #[serde(default = "default_executable")]
    pub executable: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_version_timeout_secs")]
    pub version_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            request_timeout_secs: default_request_timeout_secs(),
            version_timeout_secs: default_version_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ConversationSettings {
    #[serde(default = "default_context_window")]
    pub context_window: usize,
    #[serde(default = "default_stream_delay_ms")]
    pub stream_delay_ms: u64,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            context_window: default_context_window(),
            stream_delay_ms: default_stream_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct UiSettings {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_padding")]
    pub left_padding: usize,
    #[serde(default = "default_padding")]
    pub right_padding: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            style: default_style(),
            left_padding: default_padding(),
            right_padding: default_padding(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub conversation: ConversationSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Values given on the command line, which win over every other source
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub style: Option<String>,
    pub working_dir: Option<PathBuf>,
}

impl Settings {
    /// Load from the user config file (if any) and `BESPOKEN_*` environment variables
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(default_config_file().as_deref())
    }

    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().set_default("model", default_model())?;

        if let Some(path) = config_file {
            tracing::debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("BESPOKEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(system_prompt) = overrides.system_prompt {
            self.system_prompt = Some(system_prompt);
        }
        if let Some(style) = overrides.style {
            self.ui.style = style;
        }
        if let Some(working_dir) = overrides.working_dir {
            self.working_dir = Some(working_dir);
        }
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            executable: self.backend.executable.clone(),
            request_timeout: Duration::from_secs(self.backend.request_timeout_secs),
            version_timeout: Duration::from_secs(self.backend.version_timeout_secs),
        }
    }

    pub fn conversation_config(&self) -> ConversationConfig {
        ConversationConfig {
            context_window: self.conversation.context_window,
            stream_delay: Duration::from_millis(self.conversation.stream_delay_ms),
        }
    }
}

/// `<config dir>/bespoken/config.toml`, e.g. `~/.config/bespoken/config.toml` on Linux
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bespoken").join("config.toml"))
}

fn default_model() -> String {
    "claude".to_string()
}

fn default_executable() -> String {
    bespoken::providers::claude::DEFAULT_EXECUTABLE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    bespoken::providers::claude::DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_version_timeout_secs() -> u64 {
    bespoken::providers::claude::DEFAULT_VERSION_TIMEOUT.as_secs()
}

fn default_context_window() -> usize {
    bespoken::conversation::DEFAULT_CONTEXT_WINDOW
}

fn default_stream_delay_ms() -> u64 {
    bespoken::conversation::DEFAULT_STREAM_DELAY.as_millis() as u64
}

fn default_style() -> String {
    "default".to_string()
}

fn default_padding() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("BESPOKEN_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.model, "claude");
        assert_eq!(settings.system_prompt, None);
        assert_eq!(settings.working_dir, None);
        assert_eq!(settings.backend, BackendSettings::default());
        assert_eq!(settings.ui.style, "default");
        assert_eq!(settings.ui.left_padding, 2);
        assert_eq!(settings.ui.right_padding, 2);

        assert_eq!(settings.backend_config(), BackendConfig::default());
        assert_eq!(settings.conversation_config(), ConversationConfig::default());
    }

    #[test]
    #[serial]
    fn test_missing_config_file_is_ignored() {
        clean_env();
        let dir = tempfile::tempdir().unwrap();

        let settings = Settings::load(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(settings.model, "claude");
    }

    #[test]
    #[serial]
    fn test_file_then_environment_layering() {
        clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
model = "claude-sonnet"
system_prompt = "Be terse."

[conversation]
context_window = 10

[ui]
style = "hacker"
"#,
        )
        .unwrap();
        env::set_var("BESPOKEN_UI__STYLE", "fun");
        env::set_var("BESPOKEN_BACKEND__REQUEST_TIMEOUT_SECS", "5");

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.model, "claude-sonnet");
        assert_eq!(settings.system_prompt.as_deref(), Some("Be terse."));
        assert_eq!(settings.conversation.context_window, 10);
        assert_eq!(settings.conversation.stream_delay_ms, 20);
        assert_eq!(settings.ui.style, "fun");
        assert_eq!(
            settings.backend_config().request_timeout,
            Duration::from_secs(5)
        );

        env::remove_var("BESPOKEN_UI__STYLE");
        env::remove_var("BESPOKEN_BACKEND__REQUEST_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_command_line_overrides_win() {
        clean_env();
        env::set_var("BESPOKEN_MODEL", "claude-from-env");

        let mut settings = Settings::load(None).unwrap();
        assert_eq!(settings.model, "claude-from-env");

        settings.apply(Overrides {
            model: Some("claude-from-flag".to_string()),
            style: Some("minimal".to_string()),
            working_dir: Some(PathBuf::from("/tmp/project")),
            ..Overrides::default()
        });
        assert_eq!(settings.model, "claude-from-flag");
        assert_eq!(settings.ui.style, "minimal");
        assert_eq!(settings.working_dir, Some(PathBuf::from("/tmp/project")));
        assert_eq!(settings.system_prompt, None);

        env::remove_var("BESPOKEN_MODEL");
    }
}
