//! # Sensi
//!
//! Finite-difference curve sensitivities.
//!
//! This facade re-exports the public API of the workspace crates:
//!
//! - [`core`]: currencies, indices and multi-currency amounts
//! - [`curves`]: term structures, market snapshots and node bumping
//! - [`risk`]: the bump-and-reprice sensitivity calculator
//!
//! ```rust
//! use sensi::prelude::*;
//!
//! fn pv(t: &f64, market: &dyn MulticurveProvider) -> CurveResult<MultipleCurrencyAmount> {
//!     Ok(MultipleCurrencyAmount::of(Currency::CHF, market.discount_factor(Currency::CHF, *t)?))
//! }
//!
//! let market = MulticurveMarket::builder()
//!     .discount(Currency::CHF, FlatCurve::new(0.01))
//!     .build()
//!     .unwrap();
//!
//! let values = discounting_curve_sensitivity(
//!     &4.0_f64,
//!     &market,
//!     Currency::CHF,
//!     &[4.0],
//!     1e-6,
//!     &pv,
//!     DifferenceMode::Central,
//! )
//! .unwrap();
//! assert!((values[0] + 4.0 * (-0.04f64).exp()).abs() < 1e-6);
//! ```

#![warn(missing_docs)]

pub use sensi_core as core;
pub use sensi_curves as curves;
pub use sensi_risk as risk;

/// Everything needed to price and bump, in one import.
pub mod prelude {
    pub use sensi_core::prelude::*;
    pub use sensi_curves::prelude::*;
    pub use sensi_risk::prelude::*;
}
