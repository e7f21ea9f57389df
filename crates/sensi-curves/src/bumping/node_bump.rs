//! A single node bump, resolved to the matching decorator.

use serde::{Deserialize, Serialize};

use super::{DiscountingTimeDecorated, ForwardTimeDecorated, PriceIndexTimeDecorated};
use crate::error::CurveResult;
use crate::market::{CurveSelector, MulticurveProvider};

/// A shift of one curve at one node time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBump {
    /// The curve to bump.
    pub selector: CurveSelector,
    /// Node time in years.
    pub node_time: f64,
    /// Shift applied at the node.
    pub shift: f64,
}

impl NodeBump {
    /// Creates a new node bump.
    #[must_use]
    pub fn new(selector: CurveSelector, node_time: f64, shift: f64) -> Self {
        Self {
            selector,
            node_time,
            shift,
        }
    }

    /// Returns the same bump with the shift negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            node_time: self.node_time,
            shift: -self.shift,
        }
    }

    /// Wraps `market` in the decorator matching the selector.
    ///
    /// The base market is borrowed, never modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected curve is missing or the node time
    /// is not a valid time on it.
    pub fn apply<'a>(
        &'a self,
        market: &'a dyn MulticurveProvider,
    ) -> CurveResult<Box<dyn MulticurveProvider + 'a>> {
        bump_market(market, &self.selector, self.node_time, self.shift)
    }
}

/// Wraps `market` in the decorator matching `selector`, shifted at `node_time`.
///
/// # Errors
///
/// Returns an error if the selected curve is missing or the node time
/// is not a valid time on it.
pub fn bump_market<'a>(
    market: &'a dyn MulticurveProvider,
    selector: &'a CurveSelector,
    node_time: f64,
    shift: f64,
) -> CurveResult<Box<dyn MulticurveProvider + 'a>> {
    Ok(match selector {
        CurveSelector::Discounting(ccy) => Box::new(DiscountingTimeDecorated::new(
            market, *ccy, node_time, shift,
        )?),
        CurveSelector::Forward(index) => Box::new(ForwardTimeDecorated::new(
            market, index, node_time, shift,
        )?),
        CurveSelector::PriceIndex(index) => Box::new(PriceIndexTimeDecorated::new(
            market, index, node_time, shift,
        )?),
    })
}
