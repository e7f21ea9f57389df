//! Sensitivity results paired with their node times.

use serde::{Deserialize, Serialize};

use sensi_core::Currency;

use crate::mode::DifferenceMode;

/// Per-node sensitivities of one present value to one curve.
///
/// `values()[i]` is the sensitivity to the node at `node_times()[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSensitivities {
    curve: String,
    currency: Currency,
    mode: DifferenceMode,
    bump_size: f64,
    node_times: Vec<f64>,
    values: Vec<f64>,
}

impl NodeSensitivities {
    /// Pairs node times with their sensitivities.
    ///
    /// # Panics
    ///
    /// Panics if the two slices differ in length.
    #[must_use]
    pub(crate) fn new(
        curve: impl Into<String>,
        currency: Currency,
        mode: DifferenceMode,
        bump_size: f64,
        node_times: Vec<f64>,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(
            node_times.len(),
            values.len(),
            "one sensitivity per node time"
        );
        Self {
            curve: curve.into(),
            currency,
            mode,
            bump_size,
            node_times,
            values,
        }
    }

    /// Label of the bumped curve.
    #[must_use]
    pub fn curve(&self) -> &str {
        &self.curve
    }

    /// Currency the present value was read in.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Scheme used.
    #[must_use]
    pub fn mode(&self) -> DifferenceMode {
        self.mode
    }

    /// Bump size used.
    #[must_use]
    pub fn bump_size(&self) -> f64 {
        self.bump_size
    }

    /// Node times, in request order.
    #[must_use]
    pub fn node_times(&self) -> &[f64] {
        &self.node_times
    }

    /// Sensitivities, in request order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the result, returning the raw sensitivity vector.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// `(node_time, sensitivity)` pairs in request order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.node_times.iter().copied().zip(self.values.iter().copied())
    }

    /// Sensitivity at a node time, if that node was requested.
    #[must_use]
    pub fn at(&self, node_time: f64) -> Option<f64> {
        self.pairs()
            .find(|(t, _)| (t - node_time).abs() < sensi_curves::NODE_TIME_TOLERANCE)
            .map(|(_, v)| v)
    }

    /// Sum across nodes (the parallel-shift sensitivity).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no nodes were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true if every sensitivity is finite.
    #[must_use]
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Largest absolute difference to another result over the same nodes.
    ///
    /// Returns `None` if the node times differ.
    #[must_use]
    pub fn max_abs_difference(&self, other: &NodeSensitivities) -> Option<f64> {
        if self.node_times != other.node_times {
            return None;
        }
        Some(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> NodeSensitivities {
        NodeSensitivities::new(
            "EUR discounting",
            Currency::EUR,
            DifferenceMode::Central,
            1e-4,
            vec![1.0, 2.0, 5.0],
            vec![-10.0, -20.0, -400.0],
        )
    }

    #[test]
    fn test_accessors() {
        let s = sample();
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.curve(), "EUR discounting");
        assert_eq!(s.currency(), Currency::EUR);
        assert_relative_eq!(s.total(), -430.0);
        assert_eq!(s.at(2.0), Some(-20.0));
        assert_eq!(s.at(3.0), None);
        assert!(s.all_finite());
        assert_eq!(
            s.pairs().collect::<Vec<_>>(),
            vec![(1.0, -10.0), (2.0, -20.0), (5.0, -400.0)]
        );
    }

    #[test]
    fn test_max_abs_difference() {
        let a = sample();
        let mut b = sample();
        b.values[1] = -20.5;
        assert_relative_eq!(a.max_abs_difference(&b).unwrap(), 0.5);

        let other_nodes = NodeSensitivities::new(
            "EUR discounting",
            Currency::EUR,
            DifferenceMode::Central,
            1e-4,
            vec![1.0],
            vec![0.0],
        );
        assert!(a.max_abs_difference(&other_nodes).is_none());
    }

    #[test]
    #[should_panic(expected = "one sensitivity per node time")]
    fn test_length_mismatch_panics() {
        let _ = NodeSensitivities::new(
            "x",
            Currency::USD,
            DifferenceMode::Forward,
            1.0,
            vec![1.0],
            vec![],
        );
    }
}
