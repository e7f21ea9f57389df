//! # Sensi Curves
//!
//! Term structures and multi-curve market snapshots for the Sensi curve
//! sensitivity library.
//!
//! This crate provides:
//!
//! - **Term Structures**: the [`TermStructure`] trait and concrete curves
//!   ([`DiscreteCurve`], [`FlatCurve`])
//! - **Markets**: the [`MulticurveProvider`] contract and the [`MulticurveMarket`]
//!   snapshot holding discounting, forward and price-index curves
//! - **Bumping**: read-only decorators that shift one curve at one node time
//!
//! ## Quick Start
//!
//! ```rust
//! use sensi_curves::prelude::*;
//! use sensi_core::{Currency, IborIndex};
//!
//! let market = MulticurveMarket::builder()
//!     .discount(Currency::EUR, DiscreteCurve::new(vec![1.0, 5.0], vec![0.02, 0.03]).unwrap())
//!     .forward(IborIndex::euribor_3m(), FlatCurve::new(0.025))
//!     .build()
//!     .unwrap();
//!
//! let bump = NodeBump::new(CurveSelector::Discounting(Currency::EUR), 5.0, 1e-4);
//! let bumped = bump.apply(&market).unwrap();
//!
//! let base = market.discount_factor(Currency::EUR, 5.0).unwrap();
//! let moved = bumped.discount_factor(Currency::EUR, 5.0).unwrap();
//! assert!(moved < base);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod bumping;
pub mod curves;
pub mod error;
pub mod market;
pub mod term_structure;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bumping::{
        bump_market, DiscountingTimeDecorated, ForwardTimeDecorated, NodeBump, PriceIndexTimeDecorated,
        NODE_TIME_TOLERANCE,
    };
    pub use crate::curves::{DiscreteCurve, FlatCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::market::{CurveSelector, MulticurveMarket, MulticurveProvider};
    pub use crate::term_structure::{CurveRef, TermStructure};
}

pub use bumping::{
    bump_market, DiscountingTimeDecorated, ForwardTimeDecorated, NodeBump, PriceIndexTimeDecorated,
    NODE_TIME_TOLERANCE,
};
pub use curves::{DiscreteCurve, FlatCurve};
pub use error::{CurveError, CurveResult};
pub use market::{CurveSelector, MulticurveMarket, MulticurveMarketBuilder, MulticurveProvider};
pub use term_structure::{CurveRef, TermStructure};
