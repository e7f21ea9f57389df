//! Flat curve.

use crate::error::{CurveError, CurveResult};
use crate::term_structure::TermStructure;

/// A curve with the same value at every tenor.
///
/// Unbounded on the right unless [`with_max_tenor`](FlatCurve::with_max_tenor)
/// is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve {
    value: f64,
    max_tenor: f64,
}

impl FlatCurve {
    /// Creates a new flat curve.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            max_tenor: f64::INFINITY,
        }
    }

    /// Restricts the valid tenor range to `[0, max_tenor]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_tenor` is not positive.
    pub fn with_max_tenor(mut self, max_tenor: f64) -> CurveResult<Self> {
        if max_tenor.is_nan() || max_tenor <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "max tenor must be positive, got {max_tenor}"
            )));
        }
        self.max_tenor = max_tenor;
        Ok(self)
    }

    /// Returns the constant value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl TermStructure for FlatCurve {
    fn value_at(&self, _t: f64) -> f64 {
        self.value
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        (0.0, self.max_tenor)
    }
}
