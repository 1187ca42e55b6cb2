//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fossilchat - advisory chat over a local model service
#[derive(Parser)]
#[command(
    name = "fc",
    about = "Fossil and firefighting advisory chat over a local Ollama-compatible model service",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive terminal chat
    Chat {
        /// Skip the service preflight check
        #[arg(long)]
        no_check: bool,
    },

    /// Serve the web chat backend
    Serve {
        /// Bind address (overrides the configured one)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Verify the service is running and the configured model is installed
    Check,

    /// List models installed in the service registry
    Models,

    /// Show metadata for a model
    Show {
        /// Model name (defaults to the configured model)
        model: Option<String>,
    },

    /// List the built-in prompt templates
    Templates,
}
