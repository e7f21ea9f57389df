//! Node bumping for finite-difference sensitivities.
//!
//! Each decorator wraps a base market by reference and perturbs one curve
//! at one node time:
//!
//! - [`DiscountingTimeDecorated`]: zero rate of a currency's discounting curve
//! - [`ForwardTimeDecorated`]: zero rate of an ibor index's pseudo-discount curve
//! - [`PriceIndexTimeDecorated`]: level of a price-index curve
//!
//! # Design
//!
//! Bumped markets apply the bump on the fly when queried; nothing is copied
//! from the base market. A query is affected only when its time lies within
//! [`NODE_TIME_TOLERANCE`] of the node time, so a bump at one node never
//! moves the curve anywhere else.
//!
//! # Example
//!
//! ```rust
//! use sensi_core::Currency;
//! use sensi_curves::bumping::NodeBump;
//! use sensi_curves::curves::FlatCurve;
//! use sensi_curves::market::{CurveSelector, MulticurveMarket, MulticurveProvider};
//!
//! let market = MulticurveMarket::builder()
//!     .discount(Currency::EUR, FlatCurve::new(0.03))
//!     .build()
//!     .unwrap();
//!
//! let bump = NodeBump::new(CurveSelector::Discounting(Currency::EUR), 5.0, 1e-4);
//! let bumped = bump.apply(&market).unwrap();
//!
//! let rate = bumped.zero_rate(Currency::EUR, 5.0).unwrap();
//! assert!((rate - 0.0301).abs() < 1e-12);
//! // Other times are untouched
//! let rate = bumped.zero_rate(Currency::EUR, 4.0).unwrap();
//! assert!((rate - 0.03).abs() < 1e-12);
//! ```

mod discounting;
mod forward;
mod node_bump;
mod price_index;

pub use discounting::DiscountingTimeDecorated;
pub use forward::ForwardTimeDecorated;
pub use node_bump::{bump_market, NodeBump};
pub use price_index::PriceIndexTimeDecorated;

use crate::error::{CurveError, CurveResult};
use crate::market::{CurveSelector, MulticurveProvider};

/// Distance (in years) within which a queried time counts as the bumped node.
pub const NODE_TIME_TOLERANCE: f64 = 1.0e-6;

/// Returns true if `t` is the bumped node.
#[inline]
#[must_use]
pub fn hits_node(t: f64, node_time: f64) -> bool {
    (t - node_time).abs() < NODE_TIME_TOLERANCE
}

/// Checks that `node_time` can be bumped on the selected curve of `base`.
fn validate_node_time(
    base: &dyn MulticurveProvider,
    selector: &CurveSelector,
    node_time: f64,
) -> CurveResult<()> {
    if !node_time.is_finite() {
        return Err(CurveError::invalid_value(format!(
            "node time must be finite, got {node_time}"
        )));
    }
    let (min, max) = base.tenor_bounds(selector)?;
    if node_time < min || node_time > max {
        return Err(CurveError::tenor_out_of_range(node_time, min, max));
    }
    Ok(())
}
