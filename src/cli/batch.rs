//! The `batch` subcommand: analyze many local repositories.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use tracing::{error, info};

use crate::analysis::config::Tunables;
use crate::analysis::detect::DetectionStrategy;
use crate::data::RepositoryMeta;
use crate::pipeline::{Pipeline, ProcessOutcome, RepositoryTask};

/// Analyzes a set of local repositories, one record per repository.
#[derive(Parser)]
pub struct BatchCommand {
    /// Paths to the local repositories.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory the records are written to.
    #[arg(long)]
    pub results_dir: PathBuf,

    /// Number of repositories processed concurrently.
    #[arg(long, default_value_t = 4)]
    pub jobs: usize,

    /// Change-point search strategy.
    #[arg(long, value_enum, default_value_t = DetectionStrategy::BinarySegmentation)]
    pub strategy: DetectionStrategy,

    /// Path to a tunables config file (defaults to ~/.cc-scout/config.json).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl BatchCommand {
    /// Executes the batch command.
    pub async fn execute(self) -> Result<()> {
        let tunables = match &self.config {
            Some(path) => Tunables::load_from_path(path)?,
            None => Tunables::load()?,
        };

        let jobs = self.jobs.max(1);
        let pipeline = Pipeline::new(tunables, self.strategy, false);

        let tasks: Vec<RepositoryTask> = self
            .paths
            .iter()
            .map(|path| task_for_path(path))
            .collect::<Result<_>>()?;

        info!("Processing {} repositories with {jobs} jobs", tasks.len());

        let results: Vec<(String, Result<ProcessOutcome>)> = stream::iter(tasks)
            .map(|task| {
                let pipeline = pipeline.clone();
                let results_dir = self.results_dir.clone();
                async move {
                    let outcome = pipeline.process_repository(&task, &results_dir).await;
                    (task.meta.name, outcome)
                }
            })
            .buffer_unordered(jobs)
            .collect()
            .await;

        let mut analyzed = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;

        for (name, result) in results {
            match result {
                Ok(ProcessOutcome::Analyzed { .. }) => analyzed += 1,
                Ok(ProcessOutcome::Skipped { .. }) => skipped += 1,
                Err(err) => {
                    failed += 1;
                    error!("Failed to process {name}: {err:#}");
                }
            }
        }

        println!("Analyzed {analyzed}, skipped {skipped}, failed {failed}");

        if failed > 0 && analyzed == 0 && skipped == 0 {
            anyhow::bail!("All {failed} repositories failed");
        }

        Ok(())
    }
}

/// Builds a task for a repository path, naming it after the directory.
fn task_for_path(path: &std::path::Path) -> Result<RepositoryTask> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let name = canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("Repository path has no final component")?;

    Ok(RepositoryTask {
        path: canonical,
        meta: RepositoryMeta {
            name,
            ..RepositoryMeta::default()
        },
    })
}
