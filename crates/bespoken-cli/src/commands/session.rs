use anyhow::{Context, Result};
use std::sync::Arc;

use bespoken::model::Model;
use bespoken::toolbox::Toolbox;
use bespoken::tools::{FileTools, TodoTools};

use crate::configuration::Settings;
use crate::instructions::system_prompt;
use crate::prompt::rustyline::RustylinePrompt;
use crate::session::Session;
use crate::styles;

pub async fn execute(settings: Settings) -> Result<()> {
    let style = styles::find(&settings.ui.style)?;

    let working_dir = match &settings.working_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    tracing::info!("Working directory: {}", working_dir.display());

    let toolboxes: Vec<Arc<dyn Toolbox>> = vec![
        Arc::new(FileTools::new(working_dir)),
        Arc::new(TodoTools::new()),
    ];
    let system = settings
        .system_prompt
        .clone()
        .unwrap_or_else(|| system_prompt(&toolboxes));

    let model = Model::from_name(&settings.model, settings.backend_config())
        .await?
        .with_conversation_config(settings.conversation_config());
    let conversation = model.conversation(Some(system), toolboxes);

    let prompt = RustylinePrompt::new(style, settings.ui.left_padding, settings.ui.right_padding)?;
    Session::new(conversation, Box::new(prompt)).start().await
}
