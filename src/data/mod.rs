//! Persisted analysis records.
//!
//! One JSON document per repository: the enriched commit list, the observed
//! type vocabularies, and the analysis summary. A record is written once and
//! never mutated; re-runs skip repositories whose record already exists.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::enrich::{EnrichedCommit, EnrichmentCounts};

/// Externally supplied repository identity and metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryMeta {
    /// Repository name, used in logs and as a record key fallback.
    pub name: String,
    /// Stable identifier the record file is named after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Primary language, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Repository size in kilobytes, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Owner login or organization, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Repository creation date, if known. Used as the adoption date for
    /// repositories that are conventional from day one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
    /// Project homepage for the indication probe, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl RepositoryMeta {
    /// The key the record file is named after.
    pub fn record_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

/// Per-repository analysis outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository identity and metadata.
    #[serde(flatten)]
    pub meta: RepositoryMeta,
    /// Total commits analyzed (after bot filtering).
    pub total_commits: u64,
    /// Commits counted as conventional, standard or custom.
    pub conventional_commits: u64,
    /// Commits counted as non-conventional.
    pub unconventional_commits: u64,
    /// Commits with a standard type.
    pub cc_type_commits: u64,
    /// Commits with an accepted custom type.
    pub custom_type_commits: u64,
    /// Standard type -> occurrence count.
    pub cc_type_distribution: std::collections::BTreeMap<String, u64>,
    /// Accepted custom type -> occurrence count.
    pub custom_type_distribution: std::collections::BTreeMap<String, u64>,
    /// Share of commits with a standard type, as a percentage.
    pub overall_cc_adoption_rate: f64,
    /// Whether the repository exceeds the consistency threshold over its
    /// whole history.
    pub is_consistently_conventional: bool,
    /// Detected adoption date, or `None` when no durable adoption exists.
    pub cc_adoption_date: Option<NaiveDate>,
    /// Whether the working tree or homepage advertises the convention.
    pub cc_indication: bool,
}

impl RepositorySummary {
    /// Assembles a summary from metadata and enrichment counts. The adoption
    /// verdict fields start empty; the pipeline fills them in.
    pub fn from_counts(meta: RepositoryMeta, counts: &EnrichmentCounts, cc_indication: bool) -> Self {
        Self {
            meta,
            total_commits: counts.total_commits,
            conventional_commits: counts.conventional_commits(),
            unconventional_commits: counts.unconventional_commits(),
            cc_type_commits: counts.cc_type_commits,
            custom_type_commits: counts.custom_type_commits,
            cc_type_distribution: counts.cc_type_distribution.clone(),
            custom_type_distribution: counts.custom_type_distribution.clone(),
            overall_cc_adoption_rate: counts.overall_cc_adoption_rate(),
            is_consistently_conventional: false,
            cc_adoption_date: None,
            cc_indication,
        }
    }
}

/// The persisted JSON document for one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Enriched commits in log-walk order (newest first).
    pub commits: Vec<EnrichedCommit>,
    /// Custom types that made it into the distribution.
    pub custom_types: Vec<String>,
    /// Standard types observed in the history.
    pub cc_types: Vec<String>,
    /// The analysis summary.
    pub analysis_summary: RepositorySummary,
}

impl RepositoryRecord {
    /// Builds a record, deriving the type vocabularies from the summary's
    /// distributions.
    pub fn new(commits: Vec<EnrichedCommit>, analysis_summary: RepositorySummary) -> Self {
        let cc_types = analysis_summary
            .cc_type_distribution
            .keys()
            .cloned()
            .collect();
        let custom_types = analysis_summary
            .custom_type_distribution
            .keys()
            .cloned()
            .collect();

        Self {
            commits,
            custom_types,
            cc_types,
            analysis_summary,
        }
    }

    /// Writes the record as pretty-printed JSON, creating parent directories
    /// as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create results directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize record")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write record: {}", path.display()))?;

        Ok(())
    }

    /// Loads a previously written record.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read record: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse record: {}", path.display()))
    }
}
