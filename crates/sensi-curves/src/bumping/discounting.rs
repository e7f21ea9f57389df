//! Discounting curve node bump.

use sensi_core::{Currency, IborIndex, PriceIndex};

use super::{hits_node, validate_node_time};
use crate::error::CurveResult;
use crate::market::{CurveSelector, MulticurveProvider};

/// A market whose discounting curve for one currency is bumped at one node.
///
/// The continuously compounded zero rate at the node is shifted by `shift`:
/// `P'(t) = P(t) * exp(-shift * t)` when `t` hits the node. All other
/// queries are answered by the base market.
#[derive(Clone, Copy)]
pub struct DiscountingTimeDecorated<'a> {
    /// The base market.
    base: &'a dyn MulticurveProvider,
    /// Currency whose discounting curve is bumped.
    currency: Currency,
    /// Node time in years.
    node_time: f64,
    /// Additive zero-rate shift.
    shift: f64,
}

impl std::fmt::Debug for DiscountingTimeDecorated<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountingTimeDecorated")
            .field("currency", &self.currency)
            .field("node_time", &self.node_time)
            .field("shift", &self.shift)
            .finish()
    }
}

impl<'a> DiscountingTimeDecorated<'a> {
    /// Wraps `base`, bumping the `currency` discounting curve at `node_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node time is not finite, the curve does not
    /// exist, or the node time is outside the curve's tenor bounds.
    pub fn new(
        base: &'a dyn MulticurveProvider,
        currency: Currency,
        node_time: f64,
        shift: f64,
    ) -> CurveResult<Self> {
        validate_node_time(base, &CurveSelector::Discounting(currency), node_time)?;
        Ok(Self {
            base,
            currency,
            node_time,
            shift,
        })
    }

    /// Returns the base market.
    #[must_use]
    pub fn base(&self) -> &'a dyn MulticurveProvider {
        self.base
    }

    /// Returns the bumped currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the node time.
    #[must_use]
    pub fn node_time(&self) -> f64 {
        self.node_time
    }

    /// Returns the shift.
    #[must_use]
    pub fn shift(&self) -> f64 {
        self.shift
    }
}

impl MulticurveProvider for DiscountingTimeDecorated<'_> {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        let df = self.base.discount_factor(currency, t)?;
        if currency == self.currency && hits_node(t, self.node_time) {
            Ok(df * (-self.shift * t).exp())
        } else {
            Ok(df)
        }
    }

    fn index_discount_factor(&self, index: &IborIndex, t: f64) -> CurveResult<f64> {
        self.base.index_discount_factor(index, t)
    }

    fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64> {
        self.base.price_index(index, t)
    }

    fn tenor_bounds(&self, selector: &CurveSelector) -> CurveResult<(f64, f64)> {
        self.base.tenor_bounds(selector)
    }
}
