//! Commit history loading with per-commit diff statistics.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use git2::{Commit, Repository};
use serde::{Deserialize, Serialize};

/// A single commit as read from the log walk, before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommit {
    /// Full SHA-1 hash of the commit.
    pub hash: String,
    /// Commit timestamp in UTC.
    pub committed_at: DateTime<Utc>,
    /// The commit message as written by the author.
    pub message: String,
    /// Author name.
    pub author: String,
    /// Lines added across all files in the commit.
    pub insertions: u64,
    /// Lines removed across all files in the commit.
    pub deletions: u64,
    /// Number of files touched by the commit.
    pub files_changed: u64,
}

impl RawCommit {
    /// Builds a `RawCommit` from a git2 commit, computing diff stats against
    /// the first parent. Merge commits carry zero stats, matching the
    /// shortstat output of a plain log walk.
    pub fn from_git_commit(repo: &Repository, commit: &Commit) -> Result<Self> {
        let hash = commit.id().to_string();

        let author = commit.author().name().unwrap_or("Unknown").to_string();

        let committed_at = DateTime::from_timestamp(commit.time().seconds(), 0)
            .context("Invalid commit timestamp")?;

        let message = commit.message().unwrap_or("").to_string();

        let (insertions, deletions, files_changed) = if commit.parent_count() > 1 {
            (0, 0, 0)
        } else {
            diff_stats(repo, commit)?
        };

        Ok(Self {
            hash,
            committed_at,
            message,
            author,
            insertions,
            deletions,
            files_changed,
        })
    }
}

/// Computes (insertions, deletions, files changed) for a non-merge commit.
fn diff_stats(repo: &Repository, commit: &Commit) -> Result<(u64, u64, u64)> {
    let commit_tree = commit.tree().context("Failed to get commit tree")?;

    let parent_tree = if commit.parent_count() > 0 {
        Some(
            commit
                .parent(0)
                .context("Failed to get parent commit")?
                .tree()
                .context("Failed to get parent tree")?,
        )
    } else {
        None
    };

    let diff = if let Some(parent_tree) = parent_tree {
        repo.diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)
            .context("Failed to create diff")?
    } else {
        // Initial commit - diff against empty tree
        repo.diff_tree_to_tree(None, Some(&commit_tree), None)
            .context("Failed to create diff for initial commit")?
    };

    let stats = diff.stats().context("Failed to get diff stats")?;

    Ok((
        stats.insertions() as u64,
        stats.deletions() as u64,
        stats.files_changed() as u64,
    ))
}

/// Walks the full history reachable from HEAD, newest first.
///
/// Commits without a valid timestamp are skipped rather than failing the
/// whole walk; the detector assumes every commit it sees carries one.
pub fn load_history(repo: &Repository) -> Result<Vec<RawCommit>> {
    let mut walker = repo.revwalk().context("Failed to create revwalk")?;
    walker.push_head().context("Failed to push HEAD")?;
    walker
        .set_sorting(git2::Sort::TIME)
        .context("Failed to set revwalk sorting")?;

    let mut commits = Vec::new();

    for oid in walker {
        let oid = oid.context("Failed to get commit OID from walker")?;
        let commit = repo.find_commit(oid).context("Failed to find commit")?;

        match RawCommit::from_git_commit(repo, &commit) {
            Ok(raw) => commits.push(raw),
            Err(err) => {
                tracing::warn!("Skipping commit {oid}: {err}");
            }
        }
    }

    Ok(commits)
}
