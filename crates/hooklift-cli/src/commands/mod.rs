//! CLI command definitions and dispatch.

pub mod check;
pub mod list;
pub mod replay;

use clap::{Parser, Subcommand};

use hooklift_core::AppResult;
use hooklift_core::config::AppConfig;

use crate::output::OutputFormat;

/// Hooklift — lifecycle-hook orchestrator for plugin packages
#[derive(Debug, Parser)]
#[command(name = "hooklift", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay merged over config/default
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a host package-manager event feed through the hook engine
    Replay(replay::ReplayArgs),
    /// List installed plugins
    List(list::ListArgs),
    /// Check a plugin package manifest
    Check(check::CheckArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Replay(args) => replay::execute(args, config),
            Commands::List(args) => list::execute(args, config, self.format),
            Commands::Check(args) => check::execute(args, config),
        }
    }
}
