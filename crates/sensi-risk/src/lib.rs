//! # Sensi Risk
//!
//! Finite-difference curve sensitivities by bump-and-reprice.
//!
//! For each requested node time, the selected curve is shifted at that node
//! only, the instrument is repriced against the shifted market, and the
//! change in present value is divided by the shift:
//!
//! - **Schemes**: forward, backward and central differences ([`DifferenceMode`])
//! - **Curves**: discounting, forward (ibor) and price-index curves, chosen with a
//!   [`CurveSelector`](sensi_curves::CurveSelector) or any [`BumpStrategy`]
//! - **Pricing**: any [`PresentValueCalculator`], including plain closures
//! - **Execution**: sequential or on the rayon pool, with cooperative cancellation
//! - **Configuration**: [`SensitivityConfig`] loaded from TOML or JSON
//!
//! ## Example
//!
//! ```rust
//! use sensi_core::{Currency, MultipleCurrencyAmount};
//! use sensi_curves::{CurveResult, CurveSelector, DiscreteCurve, MulticurveMarket, MulticurveProvider};
//! use sensi_risk::prelude::*;
//!
//! struct CashFlow {
//!     time: f64,
//!     amount: f64,
//! }
//!
//! fn pv(cf: &CashFlow, market: &dyn MulticurveProvider) -> CurveResult<MultipleCurrencyAmount> {
//!     let df = market.discount_factor(Currency::USD, cf.time)?;
//!     Ok(MultipleCurrencyAmount::of(Currency::USD, cf.amount * df))
//! }
//!
//! let market = MulticurveMarket::builder()
//!     .discount(
//!         Currency::USD,
//!         DiscreteCurve::new(vec![1.0, 2.0, 3.0], vec![0.04, 0.041, 0.042]).unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let cash_flow = CashFlow { time: 2.0, amount: 1_000_000.0 };
//! let sensitivities = SensitivityRequest::builder()
//!     .instrument(&cash_flow)
//!     .market(&market)
//!     .selector(CurveSelector::Discounting(Currency::USD))
//!     .node_times(&[1.0, 2.0, 3.0])
//!     .pricer(&pv)
//!     .bump_size(1e-4)
//!     .build()
//!     .unwrap()
//!     .compute()
//!     .unwrap();
//!
//! assert_eq!(sensitivities[0], 0.0);
//! assert!(sensitivities[1] < 0.0);
//! assert_eq!(sensitivities[2], 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod calculator;
mod cancel;
pub mod config;
mod error;
mod mode;
mod pricing;
mod request;
mod result;
mod strategy;

pub use calculator::{
    discounting_curve_sensitivity, forward_curve_sensitivity, price_index_curve_sensitivity,
    FiniteDifferenceCalculator,
};
pub use cancel::CancellationToken;
pub use config::{ConfigError, ConfigResult, SensitivityConfig, Validate, ValidationError};
pub use error::{RiskError, RiskResult};
pub use mode::DifferenceMode;
pub use pricing::PresentValueCalculator;
pub use request::{SensitivityRequest, SensitivityRequestBuilder};
pub use result::NodeSensitivities;
pub use strategy::BumpStrategy;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        discounting_curve_sensitivity, forward_curve_sensitivity, price_index_curve_sensitivity,
        BumpStrategy, CancellationToken, DifferenceMode, FiniteDifferenceCalculator,
        NodeSensitivities, PresentValueCalculator, RiskError, RiskResult, SensitivityConfig,
        SensitivityRequest,
    };
}
