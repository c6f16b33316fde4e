//! Conventional Commits analysis: classification, enrichment, gating, and
//! adoption-point detection.

pub mod classify;
pub mod config;
pub mod detect;
pub mod enrich;
pub mod gate;

pub use classify::{classify, is_standard_type, parse_message, Classification, ParsedMessage};
pub use config::Tunables;
pub use detect::{AdoptionDetector, DetectionStrategy};
pub use enrich::{enrich_commits, EnrichedCommit, EnrichmentCounts};
pub use gate::should_evaluate;
