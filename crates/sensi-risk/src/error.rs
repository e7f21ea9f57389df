//! Error types for sensitivity calculations.

use thiserror::Error;

use sensi_curves::CurveError;

use crate::config::ConfigError;

/// A specialized Result type for sensitivity calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during sensitivity calculations.
#[derive(Debug, Error)]
pub enum RiskError {
    /// A required input is missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The computation was cancelled between nodes.
    #[error("sensitivity computation cancelled after {completed} of {total} nodes")]
    Cancelled {
        /// Nodes finished before cancellation was observed.
        completed: usize,
        /// Total number of nodes requested.
        total: usize,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failure raised while bumping or pricing, passed through unchanged.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl RiskError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Returns true for errors raised before any pricing took place.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
