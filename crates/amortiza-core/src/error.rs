//! Error types shared across the amortization engine.
//!
//! The taxonomy is fixed at four kinds (see the design notes on error
//! handling): all are fatal and none are recovered internally. A lazy
//! sequence yields an error at the iteration step that first detects
//! the condition; anything already produced remains valid.

use thiserror::Error;

/// A specialized `Result` for amortization operations.
pub type AmortizaResult<T> = Result<T, AmortizaError>;

/// The error type produced by core, index, and engine operations.
#[derive(Error, Debug, Clone)]
pub enum AmortizaError {
    /// Caller-supplied data violates a documented constraint.
    #[error("validation error: {reason}")]
    Validation {
        /// Description of the violated constraint, naming the offending parameter.
        reason: String,
    },

    /// The underlying index provider cannot supply required data.
    #[error("backend error: {reason}")]
    Backend {
        /// Description of the backend failure.
        reason: String,
    },

    /// The schedule interleaver detected an unsorted or duplicated input.
    #[error("ordering error: {reason}")]
    Ordering {
        /// Description of the ordering violation.
        reason: String,
    },

    /// A permitted combination of index code and day-count convention
    /// has no implementation yet.
    #[error("not implemented: {reason}")]
    NotImplemented {
        /// Description of the unimplemented combination.
        reason: String,
    },
}

impl AmortizaError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a backend error.
    #[must_use]
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }

    /// Creates an ordering error.
    #[must_use]
    pub fn ordering(reason: impl Into<String>) -> Self {
        Self::Ordering {
            reason: reason.into(),
        }
    }

    /// Creates a not-implemented error.
    #[must_use]
    pub fn not_implemented(reason: impl Into<String>) -> Self {
        Self::NotImplemented {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AmortizaError::validation("amortization ratios sum to 1.02, expected 1.0");
        assert!(err.to_string().contains("validation error"));
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        assert!(matches!(
            AmortizaError::backend("no indexes"),
            AmortizaError::Backend { .. }
        ));
        assert!(matches!(
            AmortizaError::ordering("duplicate date"),
            AmortizaError::Ordering { .. }
        ));
        assert!(matches!(
            AmortizaError::not_implemented("IGPM daily normalization"),
            AmortizaError::NotImplemented { .. }
        ));
    }
}
