//! Error types.
//!
//! A failed match is never an error. Only the asserting entry points
//! (`match_or_fail`), bounded normalization and configuration loading raise.

use std::path::PathBuf;

use thiserror::Error;

use crate::backend::models::Term;

/// Raised by `match_or_fail` when the caller asserted a match that did not hold
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("pattern {pattern} does not match {target}")]
    Mismatch { pattern: Term, target: Term },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// Rules were still applicable after `limit` steps; `term` is where it stopped
    #[error("no normal form within {limit} steps (last term: {term})")]
    StepLimitExceeded { limit: usize, term: Term },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),
}
