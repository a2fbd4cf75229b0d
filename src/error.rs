//! Error types for column selection.

use std::io;
use thiserror::Error;

/// Errors that can occur while configuring or running a column selection.
///
/// Apart from `Io`, every variant describes a caller mistake and is fatal:
/// nothing is retried internally.
#[derive(Error, Debug)]
pub enum SelectError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("No selection criteria: supply column indexes or column names")]
    MissingSelectionCriteria,

    #[error("No matching columns in header for: {}", .wanted.join(", "))]
    NoMatchingColumns { wanted: Vec<String> },
}

pub type Result<T> = std::result::Result<T, SelectError>;
