//! How a market is bumped, and in which currency the result is read.

use sensi_core::Currency;
use sensi_curves::{bump_market, CurveResult, CurveSelector, MulticurveProvider};

/// Produces node-bumped markets for one curve.
///
/// The currency is the one whose present value is differentiated; it is
/// the currency of the bumped curve.
pub trait BumpStrategy: Send + Sync {
    /// Returns `market` with the curve shifted by `amount` at `node_time`.
    fn bump<'a>(
        &'a self,
        market: &'a dyn MulticurveProvider,
        node_time: f64,
        amount: f64,
    ) -> CurveResult<Box<dyn MulticurveProvider + 'a>>;

    /// The currency in which present values are read.
    fn currency(&self) -> Currency;

    /// Short label used in logs.
    fn label(&self) -> String;
}

impl BumpStrategy for CurveSelector {
    fn bump<'a>(
        &'a self,
        market: &'a dyn MulticurveProvider,
        node_time: f64,
        amount: f64,
    ) -> CurveResult<Box<dyn MulticurveProvider + 'a>> {
        bump_market(market, self, node_time, amount)
    }

    fn currency(&self) -> Currency {
        CurveSelector::currency(self)
    }

    fn label(&self) -> String {
        self.to_string()
    }
}
