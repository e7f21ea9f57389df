//! Sensitivity configuration.
//!
//! A [`SensitivityConfig`] can be built in code or loaded from TOML or JSON:
//!
//! ```rust
//! use sensi_risk::config::{SensitivityConfig, Validate};
//! use sensi_risk::DifferenceMode;
//!
//! let config = SensitivityConfig::from_toml_str(
//!     r#"
//!     mode = "forward"
//!     bump_size = 1e-4
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.mode, DifferenceMode::Forward);
//! assert!(!config.parallel);
//! assert!(config.is_valid());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mode::DifferenceMode;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {0:?}")]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConfigError::Deserialization(err.to_string())
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns every validation error, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

/// Settings for a finite-difference sensitivity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    /// Finite-difference scheme.
    #[serde(default)]
    pub mode: DifferenceMode,

    /// Shift applied at each node.
    #[serde(default = "default_bump_size")]
    pub bump_size: f64,

    /// Reject a zero or non-finite bump size before pricing.
    ///
    /// Off by default: a zero bump then yields non-finite sensitivities.
    #[serde(default)]
    pub validate_bump_size: bool,

    /// Evaluate nodes on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    /// Below this many nodes evaluation stays sequential even when
    /// `parallel` is set.
    #[serde(default = "default_min_parallel_nodes")]
    pub min_parallel_nodes: usize,
}

fn default_bump_size() -> f64 {
    1.0e-6
}

fn default_min_parallel_nodes() -> usize {
    8
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            mode: DifferenceMode::default(),
            bump_size: default_bump_size(),
            validate_bump_size: false,
            parallel: false,
            min_parallel_nodes: default_min_parallel_nodes(),
        }
    }
}

impl SensitivityConfig {
    /// Parses a configuration from TOML.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Validate for SensitivityConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.bump_size.is_finite() {
            errors.push(ValidationError::new(
                "bump_size",
                format!("must be finite, got {}", self.bump_size),
            ));
        } else if self.validate_bump_size && self.bump_size == 0.0 {
            errors.push(ValidationError::new("bump_size", "must be non-zero"));
        }

        if self.parallel && self.min_parallel_nodes == 0 {
            errors.push(ValidationError::new(
                "min_parallel_nodes",
                "must be at least 1 when parallel evaluation is enabled",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SensitivityConfig::default();
        assert_eq!(config.mode, DifferenceMode::Central);
        assert_eq!(config.bump_size, 1e-6);
        assert!(!config.validate_bump_size);
        assert!(!config.parallel);
        assert_eq!(config.min_parallel_nodes, 8);
        assert!(config.is_valid());

        let empty = SensitivityConfig::from_toml_str("").unwrap();
        assert_eq!(empty, config);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SensitivityConfig {
            mode: DifferenceMode::Backward,
            bump_size: 1e-4,
            validate_bump_size: true,
            parallel: true,
            min_parallel_nodes: 4,
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("mode = \"backward\""));
        assert_eq!(SensitivityConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_json() {
        let config = SensitivityConfig::from_json_str(r#"{"mode": "forward", "parallel": true}"#)
            .unwrap();
        assert_eq!(config.mode, DifferenceMode::Forward);
        assert!(config.parallel);
        assert_eq!(config.bump_size, 1e-6);

        let back = SensitivityConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = SensitivityConfig::from_toml_str("mode = \"upwind\"").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));

        let err = SensitivityConfig::from_json_str(r#"{"mode": "upwind"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"central\"\nbump_size = 0.0001").unwrap();
        let config = SensitivityConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.bump_size, 1e-4);

        let missing = SensitivityConfig::from_toml_file("/definitely/not/here.toml");
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_validation() {
        let zero = SensitivityConfig {
            bump_size: 0.0,
            ..SensitivityConfig::default()
        };
        // Zero bump is only rejected when validation is switched on
        assert!(zero.is_valid());

        let strict = SensitivityConfig {
            validate_bump_size: true,
            ..zero
        };
        assert!(matches!(
            strict.validate_or_error(),
            Err(ConfigError::Validation { ref field, .. }) if field == "bump_size"
        ));

        let broken = SensitivityConfig {
            bump_size: f64::NAN,
            parallel: true,
            min_parallel_nodes: 0,
            ..SensitivityConfig::default()
        };
        assert!(matches!(
            broken.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(ref errs)) if errs.len() == 2
        ));
    }
}
