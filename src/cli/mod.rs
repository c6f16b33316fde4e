//! CLI interface for cc-scout

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod batch;
pub mod repo;

/// cc-scout: Conventional Commits adoption mining
#[derive(Parser)]
#[command(name = "cc-scout")]
#[command(about = "Mines Git commit histories to detect Conventional Commits adoption", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single local repository
    Repo(repo::RepoCommand),
    /// Analyze many local repositories concurrently
    Batch(batch::BatchCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Repo(repo_cmd) => repo_cmd.execute().await,
            Commands::Batch(batch_cmd) => batch_cmd.execute().await,
        }
    }
}
