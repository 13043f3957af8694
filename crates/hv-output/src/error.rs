//! Error types for hv-output.

use thiserror::Error;

/// Errors that can occur while recording or decoding position updates.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed message {input:?}: {reason}")]
    Message { input: String, reason: &'static str },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
