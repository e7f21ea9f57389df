//! Error types for core domain types.

use thiserror::Error;

use crate::types::Currency;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when building or combining core domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Unknown or malformed ISO currency code.
    #[error("Invalid currency code: {code}")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },

    /// Index definition is not usable.
    #[error("Invalid index: {reason}")]
    InvalidIndex {
        /// Description of the problem.
        reason: String,
    },

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Currency of the left-hand amount.
        expected: Currency,
        /// Currency of the right-hand amount.
        got: Currency,
    },
}

impl CoreError {
    /// Creates an invalid currency error.
    #[must_use]
    pub fn invalid_currency(code: impl Into<String>) -> Self {
        Self::InvalidCurrency { code: code.into() }
    }

    /// Creates an invalid index error.
    #[must_use]
    pub fn invalid_index(reason: impl Into<String>) -> Self {
        Self::InvalidIndex {
            reason: reason.into(),
        }
    }

    /// Creates a currency mismatch error.
    #[must_use]
    pub fn currency_mismatch(expected: Currency, got: Currency) -> Self {
        Self::CurrencyMismatch { expected, got }
    }
}
