//! The market snapshot contract.

use std::sync::Arc;

use sensi_core::{Currency, IborIndex, PriceIndex};

use super::CurveSelector;
use crate::error::{CurveError, CurveResult};

/// Read access to discounting, forward and price-index curves.
///
/// A provider is immutable. Node-bumped variants are built by wrapping a
/// provider in one of the decorators of [`crate::bumping`], which override a
/// single primitive and delegate everything else.
///
/// Only the three primitives and [`tenor_bounds`](Self::tenor_bounds) are
/// required; derived quantities such as forward rates are computed from the
/// primitives so that decorators only need to override one method.
pub trait MulticurveProvider: Send + Sync {
    /// Discount factor for `currency` at time `t`.
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64>;

    /// Pseudo-discount factor of the forward curve of `index` at time `t`.
    fn index_discount_factor(&self, index: &IborIndex, t: f64) -> CurveResult<f64>;

    /// Estimated level of `index` at time `t`.
    fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64>;

    /// Valid tenor range of the selected curve.
    fn tenor_bounds(&self, selector: &CurveSelector) -> CurveResult<(f64, f64)>;

    /// Simply compounded forward rate of `index` over `[start, end]`.
    ///
    /// `(P(start) / P(end) - 1) / accrual`, with `P` the pseudo-discount
    /// factors of the index forward curve.
    fn forward_rate(
        &self,
        index: &IborIndex,
        start: f64,
        end: f64,
        accrual: f64,
    ) -> CurveResult<f64> {
        if accrual == 0.0 || !accrual.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "accrual factor must be finite and non-zero, got {accrual}"
            )));
        }
        let df_start = self.index_discount_factor(index, start)?;
        let df_end = self.index_discount_factor(index, end)?;
        Ok((df_start / df_end - 1.0) / accrual)
    }

    /// Continuously compounded zero rate for `currency` at time `t > 0`.
    fn zero_rate(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "zero rate needs a positive time, got {t}"
            )));
        }
        let df = self.discount_factor(currency, t)?;
        Ok(-df.ln() / t)
    }
}

impl<T: MulticurveProvider + ?Sized> MulticurveProvider for Arc<T> {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        (**self).discount_factor(currency, t)
    }

    fn index_discount_factor(&self, index: &IborIndex, t: f64) -> CurveResult<f64> {
        (**self).index_discount_factor(index, t)
    }

    fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64> {
        (**self).price_index(index, t)
    }

    fn tenor_bounds(&self, selector: &CurveSelector) -> CurveResult<(f64, f64)> {
        (**self).tenor_bounds(selector)
    }
}

impl<T: MulticurveProvider + ?Sized> MulticurveProvider for Box<T> {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        (**self).discount_factor(currency, t)
    }

    fn index_discount_factor(&self, index: &IborIndex, t: f64) -> CurveResult<f64> {
        (**self).index_discount_factor(index, t)
    }

    fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64> {
        (**self).price_index(index, t)
    }

    fn tenor_bounds(&self, selector: &CurveSelector) -> CurveResult<(f64, f64)> {
        (**self).tenor_bounds(selector)
    }
}
