use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{commands, context::AppContext, error::CliError};

#[derive(Debug, Parser)]
#[command(name = "refiner")]
#[command(about = "Critique a prompt and refine it over rounds of clarifying questions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// TOML file with provider, model and api_keys overrides
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file holding settings and session state
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a prompt and answer clarifying questions round by round
    Analyze {
        /// Prompt to analyze; omit with --resume to continue the saved session
        prompt: Option<String>,

        /// Continue the previously saved session
        #[arg(long, conflicts_with = "prompt")]
        resume: bool,

        /// Print one round as JSON and exit without asking questions
        #[arg(long)]
        json: bool,
    },

    /// Check that an API key works with a minimal request
    TestKey {
        /// Key to test (defaults to the configured key)
        #[arg(long)]
        key: Option<String>,

        /// Model to test against (defaults to the provider's default model)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Forget the saved session (settings are kept)
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Save the API key for the current provider
    SetKey {
        key: String,
    },

    /// Select the model
    SetModel {
        model: String,
    },

    /// Select the provider and reset the model to its default
    SetProvider {
        provider: String,
    },
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        let Some(command) = &self.command else {
            println!("refiner - iterative prompt refinement");
            println!("Run 'refiner --help' for usage information.");
            return Ok(());
        };

        let ctx = AppContext::from_paths(self.state.as_deref(), self.config.as_deref())?;

        match command {
            Commands::Analyze {
                prompt,
                resume,
                json,
            } => commands::analyze::run(&ctx, prompt.as_deref(), *resume, *json).await,
            Commands::TestKey { key, model } => {
                commands::test_key::run(&ctx, key.as_deref(), model.clone()).await
            }
            Commands::Config { action } => commands::config::run(&ctx, action).await,
            Commands::Clear => commands::clear::run(&ctx).await,
        }
    }
}
