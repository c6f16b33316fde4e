//! Repository processing pipeline.
//!
//! Sequences the per-repository steps: open → probe → load history → filter
//! bots → enrich → decide on the adoption verdict → persist. All algorithmic
//! work lives in [`crate::analysis`]; this module only wires it to the
//! repository on disk and the results directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::analysis::config::Tunables;
use crate::analysis::detect::{AdoptionDetector, DetectionStrategy};
use crate::analysis::enrich::{enrich_commits, EnrichedCommit};
use crate::analysis::gate::should_evaluate;
use crate::data::{RepositoryMeta, RepositoryRecord, RepositorySummary};
use crate::git::{is_bot_author, GitRepository};
use crate::probe;

/// One repository to process: a local clone plus its external metadata.
#[derive(Debug, Clone)]
pub struct RepositoryTask {
    /// Path to the local clone.
    pub path: PathBuf,
    /// Externally supplied metadata.
    pub meta: RepositoryMeta,
}

/// What the pipeline did for a repository.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// The record already existed; nothing was recomputed.
    Skipped {
        /// Path of the existing record.
        record_path: PathBuf,
    },
    /// The repository was analyzed and its record written.
    Analyzed {
        /// Path of the freshly written record.
        record_path: PathBuf,
        /// The summary that was persisted.
        summary: RepositorySummary,
    },
}

/// Drives the analysis for one repository at a time.
#[derive(Debug, Clone)]
pub struct Pipeline {
    tunables: Tunables,
    strategy: DetectionStrategy,
    probe_homepage: bool,
}

impl Pipeline {
    /// Creates a pipeline with the given thresholds and detection strategy.
    pub fn new(tunables: Tunables, strategy: DetectionStrategy, probe_homepage: bool) -> Self {
        Self {
            tunables,
            strategy,
            probe_homepage,
        }
    }

    /// Analyzes a local repository and returns the enriched commits plus the
    /// completed summary. Does not touch the results directory.
    pub async fn analyze(
        &self,
        task: &RepositoryTask,
    ) -> Result<(Vec<EnrichedCommit>, RepositorySummary)> {
        let repo = GitRepository::open_at(&task.path)?;

        let cc_indication = self.probe_indications(&repo, &task.meta).await;

        info!("Loading and analyzing commits for {}", task.meta.name);
        let history = repo.load_history()?;

        let before_filter = history.len();
        let history: Vec<_> = history
            .into_iter()
            .filter(|c| !is_bot_author(&c.author))
            .collect();
        let dropped = before_filter - history.len();
        if dropped > 0 {
            info!("Dropped {dropped} bot-authored commits");
        }

        let (enriched, counts) = enrich_commits(history, &self.tunables);

        let mut summary = RepositorySummary::from_counts(task.meta.clone(), &counts, cc_indication);

        if summary.overall_cc_adoption_rate >= self.tunables.consistent_rate {
            // Conventional from day one; no change-point search needed.
            info!("{} is consistently conventional", task.meta.name);
            summary.is_consistently_conventional = true;
            summary.cc_adoption_date = task
                .meta
                .created_at
                .or_else(|| oldest_commit_date(&enriched));
        } else if should_evaluate(counts.total_commits, counts.cc_type_commits, &self.tunables) {
            info!("Searching for the CC adoption date of {}", task.meta.name);
            let detector = AdoptionDetector::new(self.strategy, self.tunables.clone());
            summary.cc_adoption_date = detector.detect(&enriched);
        } else {
            info!(
                "{} does not meet the criteria for adoption-date analysis",
                task.meta.name
            );
        }

        Ok((enriched, summary))
    }

    /// Processes one repository end to end, skipping it if its record
    /// already exists. Running twice over the same data leaves the first
    /// record untouched.
    pub async fn process_repository(
        &self,
        task: &RepositoryTask,
        results_dir: &Path,
    ) -> Result<ProcessOutcome> {
        let record_path = results_dir.join(format!("{}.json", task.meta.record_key()));

        if record_path.exists() {
            info!(
                "Record for {} already exists, skipping",
                task.meta.name
            );
            return Ok(ProcessOutcome::Skipped { record_path });
        }

        info!("Processing repository {}", task.meta.name);
        let (enriched, summary) = self.analyze(task).await?;

        let record = RepositoryRecord::new(enriched, summary.clone());
        record
            .save(&record_path)
            .with_context(|| format!("Failed to persist record for {}", task.meta.name))?;

        Ok(ProcessOutcome::Analyzed {
            record_path,
            summary,
        })
    }

    /// Runs the working-tree probe and, when enabled and available, the
    /// homepage probe. Probe failures degrade to "no indication".
    async fn probe_indications(&self, repo: &GitRepository, meta: &RepositoryMeta) -> bool {
        let mut found = match repo.workdir() {
            Some(workdir) => probe::probe_working_tree(workdir),
            None => false,
        };

        if !found && self.probe_homepage {
            if let Some(homepage) = &meta.homepage {
                match probe::default_client() {
                    Ok(client) => match probe::check_homepage(&client, homepage).await {
                        Ok(hit) => found = hit,
                        Err(err) => warn!("Homepage probe for {homepage} failed: {err}"),
                    },
                    Err(err) => warn!("Homepage probe disabled: {err}"),
                }
            }
        }

        found
    }
}

/// Date of the oldest commit in a newest-first sequence.
fn oldest_commit_date(commits_newest_first: &[EnrichedCommit]) -> Option<NaiveDate> {
    commits_newest_first
        .last()
        .map(|c| c.committed_at.date_naive())
}
