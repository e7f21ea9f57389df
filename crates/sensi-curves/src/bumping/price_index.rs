//! Price-index curve node bump.

use sensi_core::{Currency, IborIndex, PriceIndex};

use super::{hits_node, validate_node_time};
use crate::error::CurveResult;
use crate::market::{CurveSelector, MulticurveProvider};

/// A market whose price-index curve is bumped at one node.
///
/// The bump is additive on the index level: `I'(t) = I(t) + shift`.
#[derive(Clone, Copy)]
pub struct PriceIndexTimeDecorated<'a> {
    base: &'a dyn MulticurveProvider,
    index: &'a PriceIndex,
    node_time: f64,
    shift: f64,
}

impl std::fmt::Debug for PriceIndexTimeDecorated<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceIndexTimeDecorated")
            .field("index", &self.index.name())
            .field("node_time", &self.node_time)
            .field("shift", &self.shift)
            .finish()
    }
}

impl<'a> PriceIndexTimeDecorated<'a> {
    /// Wraps `base`, bumping the curve of `index` at `node_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node time is not finite, the index has no
    /// curve, or the node time is outside its tenor bounds.
    pub fn new(
        base: &'a dyn MulticurveProvider,
        index: &'a PriceIndex,
        node_time: f64,
        shift: f64,
    ) -> CurveResult<Self> {
        validate_node_time(base, &CurveSelector::PriceIndex(index.clone()), node_time)?;
        Ok(Self {
            base,
            index,
            node_time,
            shift,
        })
    }

    /// Returns the base market.
    #[must_use]
    pub fn base(&self) -> &'a dyn MulticurveProvider {
        self.base
    }

    /// Returns the bumped index.
    #[must_use]
    pub fn index(&self) -> &'a PriceIndex {
        self.index
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

impl MulticurveProvider for PriceIndexTimeDecorated<'_> {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        self.base.discount_factor(currency, t)
    }

    fn index_discount_factor(&self, index: &IborIndex, t: f64) -> CurveResult<f64> {
        self.base.index_discount_factor(index, t)
    }

    fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64> {
        let level = self.base.price_index(index, t)?;
        if index == self.index && hits_node(t, self.node_time) {
            Ok(level + self.shift)
        } else {
            Ok(level)
        }
    }

    fn tenor_bounds(&self, selector: &CurveSelector) -> CurveResult<(f64, f64)> {
        self.base.tenor_bounds(selector)
    }
}
