//! Error types for the ranking CLI surface
//!
//! Ranking itself never fails; these cover reading feed input and config.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid feed input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("Invalid feed input: {0}")]
    InvalidPayload(String),

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, RankingError>;
