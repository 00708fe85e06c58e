use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while assembling a system. Construction is
/// all-or-nothing: any of these aborts before a single step runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("decimal accuracy must be a positive integer")]
    NonPositivePrecision,

    #[error("tick period must be positive, got {0}")]
    NonPositiveTickPeriod(String),

    #[error("{field} is not a decimal number: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: String },

    #[error("solar body name must not be empty")]
    EmptyName,

    #[error("solar body name must be unique, {0:?} is already present")]
    DuplicateName(String),

    #[error("body {name:?} was built with {body_digits} digits but the system uses {system_digits}")]
    PrecisionMismatch {
        name: String,
        body_digits: u64,
        system_digits: u64,
    },
}
