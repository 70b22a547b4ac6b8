use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod configuration;
mod instructions;
mod prompt;
mod session;
mod styles;

use configuration::{Overrides, Settings};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log the backend command line and tool traffic
    #[arg(short, long)]
    debug: bool,

    /// Model to use, must be a claude model
    #[arg(short, long)]
    model: Option<String>,

    /// System prompt for the assistant, replacing the default tool instructions
    #[arg(short, long)]
    system: Option<String>,

    /// Banner style, see `bespoken styles`
    #[arg(long)]
    style: Option<String>,

    /// Directory the file tools work in (defaults to the current directory)
    #[arg(short, long)]
    working_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version
    Version,

    /// List the available banner styles
    Styles,
}

fn init_tracing(debug: bool) {
    let default_directives = if debug {
        "warn,bespoken=debug,bespoken_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Some(Command::Version) => return commands::version::execute(),
        Some(Command::Styles) => return commands::styles::execute(),
        None => {}
    }

    let mut settings = Settings::new().context("Failed to load configuration")?;
    settings.apply(Overrides {
        model: cli.model,
        system_prompt: cli.system,
        style: cli.style,
        working_dir: cli.working_dir,
    });

    commands::session::execute(settings).await
}
