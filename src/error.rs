//! Error types for problem loading and solver configuration.
//!
//! Infeasible routes and incomplete chromosomes are not errors: the
//! evaluator reports them as `false` or as sentinel scores, and the
//! genetic operators discard such offspring.

use thiserror::Error;

/// Errors raised while building a problem or configuring the solver.
#[derive(Debug, Error)]
pub enum MdvrpError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A problem file line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number in the problem file.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The problem data violates a model invariant.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A JSON configuration file could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MdvrpError>;
