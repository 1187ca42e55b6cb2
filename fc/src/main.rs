//! fossilchat CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use ollamaclient::OllamaClient;
use tracing::info;

use fossilchat::check::run_setup_check;
use fossilchat::cli::{Cli, Command};
use fossilchat::config::Config;
use fossilchat::prompts::list_templates;
use fossilchat::{chat, web};

fn setup_logging(verbose: bool) -> Result<()> {
    // Write to a log file, not stdout: the terminal belongs to the chat loop
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fossilchat")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("fossilchat.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "fossilchat loaded config: model={}, template={}",
        config.service.model, config.template.active
    );

    match cli.command {
        Some(Command::Chat { no_check }) => cmd_chat(&config, no_check).await,
        Some(Command::Serve { bind }) => web::serve(&config, bind.as_deref()).await,
        Some(Command::Check) => cmd_check(&config).await,
        Some(Command::Models) => cmd_models(&config).await,
        Some(Command::Show { model }) => cmd_show(&config, model.as_deref()).await,
        Some(Command::Templates) => cmd_templates(),
        None => {
            // Default: the interactive chat, preflight included
            cmd_chat(&config, false).await
        }
    }
}

/// Run the terminal chat, optionally after the preflight check
async fn cmd_chat(config: &Config, no_check: bool) -> Result<()> {
    if !no_check && !run_setup_check(config).await? {
        std::process::exit(1);
    }

    chat::run_interactive(config).await
}

/// Run the preflight check on its own
async fn cmd_check(config: &Config) -> Result<()> {
    if !run_setup_check(config).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// List the models installed in the service registry
async fn cmd_models(config: &Config) -> Result<()> {
    let mut client = OllamaClient::from_config(config.client_config())
        .map_err(|e| eyre::eyre!("Failed to create model service client: {}", e))?;

    let models = client
        .list_models()
        .await
        .map_err(|e| eyre::eyre!("Failed to list models: {}", e))?;

    if models.is_empty() {
        println!("Er zijn geen modellen beschikbaar in je Ollama installatie.");
        println!("Je kunt modellen downloaden met: ollama pull <model_naam>");
        return Ok(());
    }

    println!("Beschikbare modellen in je Ollama installatie:");
    for (i, model) in models.iter().enumerate() {
        println!("{}. {}", i + 1, model);
    }

    Ok(())
}

/// Print the metadata object for a model
async fn cmd_show(config: &Config, model: Option<&str>) -> Result<()> {
    let client = OllamaClient::from_config(config.client_config())
        .map_err(|e| eyre::eyre!("Failed to create model service client: {}", e))?;

    let info = client
        .model_info(model)
        .await
        .map_err(|e| eyre::eyre!("Failed to fetch model info: {}", e))?;

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// List the built-in prompt templates
fn cmd_templates() -> Result<()> {
    for name in list_templates() {
        println!("{}", name);
    }
    Ok(())
}
