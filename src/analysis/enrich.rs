//! Commit enrichment and per-repository aggregation.
//!
//! Enrichment is a two-pass computation. The first pass classifies every
//! message and counts how often each non-standard type occurs; the custom-type
//! consistency set can only be derived once the whole history has been seen.
//! The second pass assigns final labels, demoting custom types outside the
//! consistency set to non-conventional, and accumulates the repository-level
//! distributions. The function is referentially transparent: same commits and
//! tunables in, same labels and counts out.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::classify::{classify, Classification};
use crate::analysis::config::Tunables;
use crate::git::RawCommit;

/// A commit with its classification labels attached.
///
/// Invariant: at most one of `cc_type` / `custom_type` is `Some`, and both
/// are `None` iff `is_conventional` is false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCommit {
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
    /// Whether the message follows the convention (standard or accepted custom).
    pub is_conventional: bool,
    /// Standard Conventional Commit type, if any.
    pub cc_type: Option<String>,
    /// Accepted custom type, if any.
    pub custom_type: Option<String>,
}

impl EnrichedCommit {
    fn unlabeled(raw: RawCommit) -> Self {
        Self {
            hash: raw.hash,
            committed_at: raw.committed_at,
            message: raw.message,
            author: raw.author,
            insertions: raw.insertions,
            deletions: raw.deletions,
            files_changed: raw.files_changed,
            is_conventional: false,
            cc_type: None,
            custom_type: None,
        }
    }
}

/// Aggregate counts produced by enrichment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentCounts {
    /// Total commits seen.
    pub total_commits: u64,
    /// Commits with a standard type.
    pub cc_type_commits: u64,
    /// Commits with an accepted custom type.
    pub custom_type_commits: u64,
    /// Standard type -> occurrence count.
    pub cc_type_distribution: BTreeMap<String, u64>,
    /// Accepted custom type -> occurrence count.
    pub custom_type_distribution: BTreeMap<String, u64>,
}

impl EnrichmentCounts {
    /// Commits counted as conventional, standard or custom.
    pub fn conventional_commits(&self) -> u64 {
        self.cc_type_commits + self.custom_type_commits
    }

    /// Commits counted as non-conventional.
    pub fn unconventional_commits(&self) -> u64 {
        self.total_commits - self.conventional_commits()
    }

    /// Share of commits with a standard type, as a percentage.
    pub fn overall_cc_adoption_rate(&self) -> f64 {
        if self.total_commits == 0 {
            return 0.0;
        }
        (self.cc_type_commits as f64 / self.total_commits as f64) * 100.0
    }
}

/// Derives the custom-type consistency set from first-pass counts.
///
/// A custom type is consistent when it occurs at least
/// `custom_type_min_count` times and makes up at least
/// `custom_type_min_percentage` percent of all commits. One-off tokens
/// before a colon never make a repository "conventional".
pub fn consistent_custom_types(
    custom_type_counter: &BTreeMap<String, u64>,
    total_commits: u64,
    tunables: &Tunables,
) -> BTreeSet<String> {
    let mut consistent = BTreeSet::new();

    if total_commits == 0 {
        return consistent;
    }

    for (custom_type, &count) in custom_type_counter {
        let percentage = (count as f64 / total_commits as f64) * 100.0;
        if count >= tunables.custom_type_min_count
            && percentage >= tunables.custom_type_min_percentage
        {
            consistent.insert(custom_type.clone());
        }
    }

    consistent
}

/// Classifies a commit sequence and aggregates repository-level counts.
///
/// Input order is preserved in the output (normally newest first, as a log
/// walk produces it); the adoption detector reverses to chronological order
/// itself.
pub fn enrich_commits(
    commits: Vec<RawCommit>,
    tunables: &Tunables,
) -> (Vec<EnrichedCommit>, EnrichmentCounts) {
    let total_commits = commits.len() as u64;
    info!("Enriching {total_commits} commits");

    // Pass 1: classify everything and count custom types, unfiltered.
    let classifications: Vec<Classification> =
        commits.iter().map(|c| classify(&c.message)).collect();

    let mut custom_type_counter: BTreeMap<String, u64> = BTreeMap::new();
    for classification in &classifications {
        if let Classification::Custom(custom_type) = classification {
            *custom_type_counter.entry(custom_type.clone()).or_default() += 1;
        }
    }

    let consistency_set = consistent_custom_types(&custom_type_counter, total_commits, tunables);
    debug!("Custom-type consistency set: {consistency_set:?}");

    // Pass 2: assign final labels, accepting custom types only from the
    // consistency set.
    let mut counts = EnrichmentCounts {
        total_commits,
        ..EnrichmentCounts::default()
    };

    let enriched = commits
        .into_iter()
        .zip(classifications)
        .map(|(raw, classification)| {
            let mut commit = EnrichedCommit::unlabeled(raw);
            match classification {
                Classification::Standard(cc_type) => {
                    counts.cc_type_commits += 1;
                    *counts
                        .cc_type_distribution
                        .entry(cc_type.clone())
                        .or_default() += 1;
                    commit.is_conventional = true;
                    commit.cc_type = Some(cc_type);
                }
                Classification::Custom(custom_type)
                    if consistency_set.contains(&custom_type) =>
                {
                    counts.custom_type_commits += 1;
                    *counts
                        .custom_type_distribution
                        .entry(custom_type.clone())
                        .or_default() += 1;
                    commit.is_conventional = true;
                    commit.custom_type = Some(custom_type);
                }
                // Inconsistent custom types and unparseable messages both
                // count as non-conventional.
                Classification::Custom(_) | Classification::Unconventional => {}
            }
            commit
        })
        .collect();

    (enriched, counts)
}
