//! Core term structure trait and type aliases.
//!
//! A term structure maps time (in years) to a value. What the value means is
//! decided by the market that holds the curve: continuously compounded zero
//! rates for discounting and forward curves, index levels for price-index curves.
//!
//! # Thread Safety
//!
//! All term structures are required to be `Send + Sync`, so a market snapshot
//! can be read from several threads while node bumps are evaluated in parallel.

use std::sync::Arc;

use crate::error::{CurveError, CurveResult};

/// Core abstraction for any term structure.
pub trait TermStructure: Send + Sync {
    /// Returns the raw value at time t (years).
    ///
    /// Implementations extrapolate outside [`tenor_bounds`](Self::tenor_bounds);
    /// use [`try_value_at`](Self::try_value_at) for bounds-checked access.
    fn value_at(&self, t: f64) -> f64;

    /// Returns the valid tenor range `(min, max)` for this curve.
    fn tenor_bounds(&self) -> (f64, f64);

    /// Fallible version of `value_at` that checks tenor bounds.
    fn try_value_at(&self, t: f64) -> CurveResult<f64> {
        let (min, max) = self.tenor_bounds();
        if !(min..=max).contains(&t) {
            return Err(CurveError::tenor_out_of_range(t, min, max));
        }
        Ok(self.value_at(t))
    }

    /// Returns true if the given tenor is within the curve's valid range.
    fn in_range(&self, t: f64) -> bool {
        let (min, max) = self.tenor_bounds();
        t >= min && t <= max
    }
}

/// Type alias for a shared, reference-counted term structure.
pub type CurveRef = Arc<dyn TermStructure>;

/// Blanket implementation allowing `Arc<T>` to be used as a `TermStructure`.
impl<T: TermStructure + ?Sized> TermStructure for Arc<T> {
    fn value_at(&self, t: f64) -> f64 {
        (**self).value_at(t)
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        (**self).tenor_bounds()
    }
}
