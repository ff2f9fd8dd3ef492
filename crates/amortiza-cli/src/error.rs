//! CLI error types.

use amortiza_core::error::AmortizaError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The request file failed to decode, or is missing a field its
    /// stereotype requires.
    #[error("Could not parse request: {0}")]
    InvalidRequest(String),

    /// An error raised by the amortization engine itself.
    #[error(transparent)]
    Engine(#[from] AmortizaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
