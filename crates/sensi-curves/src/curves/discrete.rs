//! Discrete curve implementation.
//!
//! A `DiscreteCurve` is constructed from a set of discrete data points
//! (tenor, value) with linear interpolation between points and flat
//! extrapolation outside them.

use crate::error::{CurveError, CurveResult};
use crate::term_structure::TermStructure;

/// A curve constructed from discrete point data.
///
/// # Example
///
/// ```rust
/// use sensi_curves::curves::DiscreteCurve;
/// use sensi_curves::TermStructure;
///
/// let curve = DiscreteCurve::new(vec![1.0, 2.0, 5.0], vec![0.02, 0.025, 0.03]).unwrap();
/// assert!((curve.value_at(1.5) - 0.0225).abs() < 1e-12);
/// assert_eq!(curve.value_at(10.0), 0.03);
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteCurve {
    /// Tenors in years, strictly increasing.
    tenors: Vec<f64>,
    /// Values at each tenor.
    values: Vec<f64>,
}

impl DiscreteCurve {
    /// Creates a new discrete curve from point data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Tenors and values have different lengths
    /// - Fewer than 2 points are provided
    /// - A tenor or value is not finite, or a tenor is negative
    /// - Tenors are not strictly increasing
    pub fn new(tenors: Vec<f64>, values: Vec<f64>) -> CurveResult<Self> {
        if tenors.len() != values.len() {
            return Err(CurveError::builder_error(format!(
                "Tenors ({}) and values ({}) must have same length",
                tenors.len(),
                values.len()
            )));
        }

        if tenors.len() < 2 {
            return Err(CurveError::insufficient_points(2, tenors.len()));
        }

        if let Some((i, _)) = tenors
            .iter()
            .zip(&values)
            .enumerate()
            .find(|(_, (t, v))| !t.is_finite() || !v.is_finite() || **t < 0.0)
        {
            return Err(CurveError::invalid_value(format!(
                "pillar {i} is not a finite point with a non-negative tenor"
            )));
        }

        for i in 1..tenors.len() {
            if tenors[i] <= tenors[i - 1] {
                return Err(CurveError::non_monotonic_tenors(i, tenors[i - 1], tenors[i]));
            }
        }

        Ok(Self { tenors, values })
    }

    /// Returns the pillar tenors.
    #[must_use]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Returns the pillar values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Finds the index i such that tenors[i] <= t < tenors[i+1].
    fn find_segment(&self, t: f64) -> usize {
        let last = self.tenors.len() - 2;
        match self
            .tenors
            .binary_search_by(|probe| probe.partial_cmp(&t).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }
}

impl TermStructure for DiscreteCurve {
    fn value_at(&self, t: f64) -> f64 {
        let n = self.tenors.len();
        if t <= self.tenors[0] {
            return self.values[0];
        }
        if t >= self.tenors[n - 1] {
            return self.values[n - 1];
        }

        let i = self.find_segment(t);
        let (t0, t1) = (self.tenors[i], self.tenors[i + 1]);
        let (v0, v1) = (self.values[i], self.values[i + 1]);
        v0 + (t - t0) / (t1 - t0) * (v1 - v0)
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        (0.0, self.tenors[self.tenors.len() - 1])
    }
}
