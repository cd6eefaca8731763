//! Error types for rank evaluation.

use thiserror::Error;

/// Rank evaluation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankEvalError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse metric config: {0}")]
    Parse(String),

    #[error("Failed to serialize metric config: {0}")]
    Serialize(String),

    #[error("Cannot combine an empty set of query scores")]
    EmptyInput,
}

/// Result type for rank evaluation operations
pub type Result<T> = std::result::Result<T, RankEvalError>;
