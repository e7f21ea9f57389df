//! The pricing function seam.

use sensi_core::MultipleCurrencyAmount;
use sensi_curves::{CurveResult, MulticurveProvider};

/// Computes the present value of an instrument against a market.
///
/// Any `Fn(&I, &dyn MulticurveProvider) -> CurveResult<MultipleCurrencyAmount>`
/// closure implements this trait.
pub trait PresentValueCalculator<I: ?Sized>: Send + Sync {
    /// Present value of `instrument` in every currency it pays in.
    fn present_value(
        &self,
        instrument: &I,
        market: &dyn MulticurveProvider,
    ) -> CurveResult<MultipleCurrencyAmount>;
}

impl<I, F> PresentValueCalculator<I> for F
where
    I: ?Sized,
    F: Fn(&I, &dyn MulticurveProvider) -> CurveResult<MultipleCurrencyAmount> + Send + Sync,
{
    fn present_value(
        &self,
        instrument: &I,
        market: &dyn MulticurveProvider,
    ) -> CurveResult<MultipleCurrencyAmount> {
        self(instrument, market)
    }
}
