//! Adoption-point detection over a labeled commit history.
//!
//! The detector turns the chronological history into a binary signal
//! (1 = standard Conventional Commit type, 0 = anything else), asks one of
//! three interchangeable strategies for a candidate change-point index, and
//! accepts it only if the regime after the candidate is durable: enough
//! commits remain and their conventional rate holds up. A breakpoint right
//! before a short or noisy tail is rejected, which is where plain
//! change-point detection tends to go wrong.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::config::Tunables;
use crate::analysis::enrich::EnrichedCommit;

pub mod binseg;
pub mod chunk;
pub mod suffix;

/// The change-point search to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionStrategy {
    /// Binary segmentation with an L2 cost model (canonical).
    #[default]
    BinarySegmentation,
    /// Earliest suffix meeting rate and count thresholds.
    SuffixScan,
    /// Fixed-width chronological chunks scanned newest to oldest.
    ChunkScan,
}

/// Finds the earliest date from which Conventional Commit usage is durable.
#[derive(Debug, Clone)]
pub struct AdoptionDetector {
    strategy: DetectionStrategy,
    tunables: Tunables,
}

impl AdoptionDetector {
    /// Creates a detector with the given strategy and thresholds.
    pub fn new(strategy: DetectionStrategy, tunables: Tunables) -> Self {
        Self { strategy, tunables }
    }

    /// Detects the adoption date over a newest-first commit sequence, as the
    /// enricher produces it. Returns `None` when no durable switch exists.
    pub fn detect(&self, commits_newest_first: &[EnrichedCommit]) -> Option<NaiveDate> {
        if commits_newest_first.is_empty() {
            return None;
        }

        let chronological: Vec<&EnrichedCommit> =
            commits_newest_first.iter().rev().collect();
        let signal: Vec<u8> = chronological
            .iter()
            .map(|c| u8::from(c.cc_type.is_some()))
            .collect();

        // A history with no standard-typed commits at all has nothing to
        // segment.
        if signal.iter().all(|&s| s == 0) {
            return None;
        }

        let candidate = match self.strategy {
            DetectionStrategy::BinarySegmentation => binseg::single_change_point(&signal),
            DetectionStrategy::SuffixScan => suffix::suffix_threshold_index(
                &signal,
                self.tunables.suffix_min_rate,
                self.tunables.suffix_min_commits,
            ),
            DetectionStrategy::ChunkScan => chunk::chunked_scan_index(
                &signal,
                self.tunables.chunk_count,
                self.tunables.chunk_min_rate,
            ),
        };

        let Some(index) = candidate else {
            debug!("No significant change point found");
            return None;
        };

        if !self.is_stable_after(&signal[index..]) {
            debug!(index, "Change point rejected by stability check");
            return None;
        }

        let adoption_date = chronological[index].committed_at.date_naive();
        info!(index, %adoption_date, "CC usage became consistent");
        Some(adoption_date)
    }

    /// Post-hoc stability check on the segment after a candidate change
    /// point: enough commits must remain and their conventional rate must
    /// hold up through to the newest commit.
    fn is_stable_after(&self, suffix: &[u8]) -> bool {
        let remaining = suffix.len();
        if remaining < self.tunables.min_commits_after_cp {
            return false;
        }

        let conventional: u64 = suffix.iter().map(|&s| u64::from(s)).sum();
        let rate = conventional as f64 / remaining as f64;
        rate >= self.tunables.min_cc_rate
    }
}
