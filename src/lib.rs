//! # cc-scout
//!
//! Mines Git commit histories to study adoption of the Conventional Commits
//! convention: whether a repository uses it, when it durably switched to it,
//! how consistently, and what its commit-type distributions look like.
//!
//! The core is the adoption-point detector: a change-point search over the
//! per-commit conventional/non-conventional signal, guarded by a stability
//! check on the regime after the candidate switch.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod data;
pub mod git;
pub mod pipeline;
pub mod probe;

pub use crate::cli::Cli;

/// The current version of cc-scout.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
