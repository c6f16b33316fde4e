//! The `repo` subcommand: analyze one local repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use crate::analysis::config::Tunables;
use crate::analysis::detect::DetectionStrategy;
use crate::data::RepositoryMeta;
use crate::pipeline::{Pipeline, ProcessOutcome, RepositoryTask};

/// Analyzes a single local repository and prints its summary.
#[derive(Parser)]
pub struct RepoCommand {
    /// Path to the local repository (defaults to the current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Repository name; defaults to the directory name.
    #[arg(long)]
    pub name: Option<String>,

    /// Stable identifier used to name the record file.
    #[arg(long)]
    pub id: Option<String>,

    /// Primary language, recorded as metadata.
    #[arg(long)]
    pub language: Option<String>,

    /// Repository size in kilobytes, recorded as metadata.
    #[arg(long)]
    pub size: Option<u64>,

    /// Owner login, recorded as metadata.
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository creation date (YYYY-MM-DD); the adoption date for
    /// repositories that are conventional from day one.
    #[arg(long)]
    pub created_at: Option<NaiveDate>,

    /// Project homepage to probe for Conventional Commits indications.
    #[arg(long)]
    pub homepage: Option<String>,

    /// Probe the homepage over HTTP (off by default).
    #[arg(long)]
    pub check_homepage: bool,

    /// Change-point search strategy.
    #[arg(long, value_enum, default_value_t = DetectionStrategy::BinarySegmentation)]
    pub strategy: DetectionStrategy,

    /// Path to a tunables config file (defaults to ~/.cc-scout/config.json).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the full record into this directory instead of only printing
    /// the summary; existing records are not overwritten.
    #[arg(long)]
    pub results_dir: Option<PathBuf>,
}

impl RepoCommand {
    /// Executes the repo command.
    pub async fn execute(self) -> Result<()> {
        let tunables = match &self.config {
            Some(path) => Tunables::load_from_path(path)?,
            None => Tunables::load()?,
        };

        let name = match &self.name {
            Some(name) => name.clone(),
            None => directory_name(&self.path)?,
        };

        let task = RepositoryTask {
            path: self.path.clone(),
            meta: RepositoryMeta {
                name,
                id: self.id.clone(),
                language: self.language.clone(),
                size: self.size,
                owner: self.owner.clone(),
                created_at: self.created_at,
                homepage: self.homepage.clone(),
            },
        };

        let pipeline = Pipeline::new(tunables, self.strategy, self.check_homepage);

        if let Some(results_dir) = &self.results_dir {
            match pipeline.process_repository(&task, results_dir).await? {
                ProcessOutcome::Skipped { record_path } => {
                    println!("Record already exists: {}", record_path.display());
                }
                ProcessOutcome::Analyzed {
                    record_path,
                    summary,
                } => {
                    println!("{}", serde_yaml::to_string(&summary)?);
                    println!("Record written: {}", record_path.display());
                }
            }
        } else {
            let (_, summary) = pipeline.analyze(&task).await?;
            println!("{}", serde_yaml::to_string(&summary)?);
        }

        Ok(())
    }
}

/// Derives a repository name from the last path component.
fn directory_name(path: &std::path::Path) -> Result<String> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("Repository path has no final component")
}
