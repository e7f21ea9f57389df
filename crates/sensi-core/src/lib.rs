//! # Sensi Core
//!
//! Core types for the Sensi curve sensitivity library.
//!
//! This crate provides the vocabulary shared by the curve and risk crates:
//!
//! - **Currencies**: ISO 4217 [`Currency`] codes
//! - **Indices**: [`IborIndex`] and [`PriceIndex`], each carrying its native currency
//! - **Amounts**: [`CurrencyAmount`] and [`MultipleCurrencyAmount`], the shape of a
//!   present value returned by a pricing function
//!
//! ## Example
//!
//! ```rust
//! use sensi_core::prelude::*;
//!
//! let pv = MultipleCurrencyAmount::of(Currency::EUR, 1_000.0)
//!     .plus(Currency::USD, 250.0);
//!
//! assert_eq!(pv.amount(Currency::EUR), 1_000.0);
//! assert_eq!(pv.amount(Currency::GBP), 0.0);
//! assert_eq!(IborIndex::euribor_3m().currency(), Currency::EUR);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Currency, CurrencyAmount, IborIndex, MultipleCurrencyAmount, PriceIndex};
}

pub use error::{CoreError, CoreResult};
pub use types::{Currency, CurrencyAmount, IborIndex, MultipleCurrencyAmount, PriceIndex};
