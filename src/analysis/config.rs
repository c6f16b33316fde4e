//! Analysis thresholds and their configuration file.
//!
//! Every threshold the pipeline consults lives in [`Tunables`], so a study
//! can be re-run with different parameters without touching code. Values can
//! be loaded from `$HOME/.cc-scout/config.json` or an explicit path; missing
//! fields fall back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Minimum commits after a change point for it to count as durable adoption.
pub const MIN_COMMITS_AFTER_CP: usize = 50;

/// Minimum conventional-commit rate after a change point.
pub const MIN_CC_RATE: f64 = 0.5;

/// Overall adoption rate (percent) above which a repository counts as
/// conventional from day one.
pub const CONSISTENT_RATE: f64 = 80.0;

/// Thresholds governing classification, gating, and adoption detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Minimum absolute occurrences for a custom type to join the
    /// repository's consistency set.
    pub custom_type_min_count: u64,
    /// Minimum share (percent) of all commits for a custom type to join the
    /// consistency set. Zero disables the percentage criterion.
    pub custom_type_min_percentage: f64,
    /// Gate: minimum standard-CC rate to justify adoption-point search.
    pub gate_min_rate: f64,
    /// Gate: absolute standard-CC commit count that also justifies the
    /// search, regardless of rate.
    pub gate_min_commits: u64,
    /// Overall adoption rate (percent) that marks a repository as
    /// consistently conventional without running the detector.
    pub consistent_rate: f64,
    /// Stability check: minimum commits after the change point.
    pub min_commits_after_cp: usize,
    /// Stability check: minimum conventional rate after the change point.
    pub min_cc_rate: f64,
    /// Suffix scan: minimum conventional fraction of the accepted suffix.
    pub suffix_min_rate: f64,
    /// Suffix scan: minimum conventional commit count in the accepted suffix.
    pub suffix_min_commits: u64,
    /// Chunk scan: number of equal chronological chunks.
    pub chunk_count: usize,
    /// Chunk scan: minimum per-chunk conventional rate.
    pub chunk_min_rate: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            custom_type_min_count: 3,
            custom_type_min_percentage: 0.0,
            gate_min_rate: 0.10,
            gate_min_commits: 500,
            consistent_rate: CONSISTENT_RATE,
            min_commits_after_cp: MIN_COMMITS_AFTER_CP,
            min_cc_rate: MIN_CC_RATE,
            suffix_min_rate: 0.8,
            suffix_min_commits: 10,
            chunk_count: 20,
            chunk_min_rate: 0.8,
        }
    }
}

impl Tunables {
    /// Loads tunables from the default location, falling back to defaults
    /// when no config file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Loads tunables from a specific path. A missing file yields defaults;
    /// a present but malformed file is an error.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Returns the default config path.
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".cc-scout").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_study_parameters() {
        let tunables = Tunables::default();
        assert_eq!(tunables.custom_type_min_count, 3);
        assert!((tunables.gate_min_rate - 0.10).abs() < f64::EPSILON);
        assert_eq!(tunables.gate_min_commits, 500);
        assert_eq!(tunables.min_commits_after_cp, 50);
        assert!((tunables.min_cc_rate - 0.5).abs() < f64::EPSILON);
        assert!((tunables.consistent_rate - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tunables = Tunables::load_from_path("/nonexistent/config.json").expect("defaults");
        assert_eq!(tunables.gate_min_commits, 500);
    }

    #[test]
    fn partial_config_keeps_defaults_for_other_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"gate_min_commits": 200}}"#).expect("write");

        let tunables = Tunables::load_from_path(file.path()).expect("parse");
        assert_eq!(tunables.gate_min_commits, 200);
        assert_eq!(tunables.min_commits_after_cp, 50);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        assert!(Tunables::load_from_path(file.path()).is_err());
    }
}
