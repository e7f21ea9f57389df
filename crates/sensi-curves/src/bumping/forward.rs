//! Forward curve node bump.

use sensi_core::{Currency, IborIndex, PriceIndex};

use super::{hits_node, validate_node_time};
use crate::error::CurveResult;
use crate::market::{CurveSelector, MulticurveProvider};

/// A market whose forward curve for one ibor index is bumped at one node.
///
/// The zero rate of the index pseudo-discount curve is shifted at the node,
/// so forward rates fixing or paying at the node move while the discounting
/// curves stay put.
#[derive(Clone, Copy)]
pub struct ForwardTimeDecorated<'a> {
    base: &'a dyn MulticurveProvider,
    index: &'a IborIndex,
    node_time: f64,
    shift: f64,
}

impl std::fmt::Debug for ForwardTimeDecorated<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardTimeDecorated")
            .field("index", &self.index.name())
            .field("node_time", &self.node_time)
            .field("shift", &self.shift)
            .finish()
    }
}

impl<'a> ForwardTimeDecorated<'a> {
    /// Wraps `base`, bumping the forward curve of `index` at `node_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node time is not finite, the index has no
    /// forward curve, or the node time is outside its tenor bounds.
    pub fn new(
        base: &'a dyn MulticurveProvider,
        index: &'a IborIndex,
        node_time: f64,
        shift: f64,
    ) -> CurveResult<Self> {
        validate_node_time(base, &CurveSelector::Forward(index.clone()), node_time)?;
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
    pub fn index(&self) -> &'a IborIndex {
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

impl MulticurveProvider for ForwardTimeDecorated<'_> {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        self.base.discount_factor(currency, t)
    }

    fn index_discount_factor(&self, index: &IborIndex, t: f64) -> CurveResult<f64> {
        let df = self.base.index_discount_factor(index, t)?;
        if index == self.index && hits_node(t, self.node_time) {
            Ok(df * (-self.shift * t).exp())
        } else {
            Ok(df)
        }
    }

    fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64> {
        self.base.price_index(index, t)
    }

    fn tenor_bounds(&self, selector: &CurveSelector) -> CurveResult<(f64, f64)> {
        self.base.tenor_bounds(selector)
    }
}
