//! Market snapshots.
//!
//! - [`MulticurveProvider`]: the read interface every snapshot implements
//! - [`MulticurveMarket`]: a concrete snapshot built from shared curves
//! - [`CurveSelector`]: picks one curve (discounting, forward or price index)

mod multicurve;
mod provider;
mod selector;

pub use multicurve::{MulticurveMarket, MulticurveMarketBuilder};
pub use provider::MulticurveProvider;
pub use selector::CurveSelector;
