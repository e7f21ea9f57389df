//! Finite-difference schemes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RiskError;

/// The finite-difference scheme used to estimate a derivative.
///
/// With `h` the bump size and `pv(x)` the present value after shifting the
/// node by `x`:
///
/// | Mode     | Estimate                        |
/// |----------|---------------------------------|
/// | Forward  | `(pv(h) - pv(0)) / h`           |
/// | Backward | `(pv(0) - pv(-h)) / h`          |
/// | Central  | `(pv(h) - pv(-h)) / (2h)`       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifferenceMode {
    /// One-sided, bumping up.
    Forward,
    /// One-sided, bumping down.
    Backward,
    /// Two-sided.
    #[default]
    Central,
}

impl DifferenceMode {
    /// All supported modes.
    pub const ALL: [DifferenceMode; 3] = [
        DifferenceMode::Forward,
        DifferenceMode::Backward,
        DifferenceMode::Central,
    ];

    /// Returns the lowercase name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DifferenceMode::Forward => "forward",
            DifferenceMode::Backward => "backward",
            DifferenceMode::Central => "central",
        }
    }

    /// Returns true if the mode needs the unbumped present value.
    #[must_use]
    pub const fn needs_base_value(&self) -> bool {
        !matches!(self, DifferenceMode::Central)
    }

    /// Number of repricings per node.
    #[must_use]
    pub const fn pricings_per_node(&self) -> usize {
        match self {
            DifferenceMode::Forward | DifferenceMode::Backward => 1,
            DifferenceMode::Central => 2,
        }
    }
}

impl fmt::Display for DifferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifferenceMode {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(DifferenceMode::Forward),
            "backward" => Ok(DifferenceMode::Backward),
            "central" => Ok(DifferenceMode::Central),
            _ => Err(RiskError::invalid_argument(format!(
                "Can only handle forward, backward and central differencing, got '{s}'"
            ))),
        }
    }
}
