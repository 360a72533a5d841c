//! Error types for the generator.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for generator operations.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt history file {file}: {reason}")]
    CorruptHistory { file: PathBuf, reason: String },

    #[error("Failed to rewrite history for {date}: {reason}")]
    HistoryWrite { date: NaiveDate, reason: String },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<csv::Error> for GeneratorError {
    fn from(e: csv::Error) -> Self {
        GeneratorError::Csv(e.to_string())
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
