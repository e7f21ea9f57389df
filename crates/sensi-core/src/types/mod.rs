//! Domain types shared across the workspace.
//!
//! - [`Currency`]: ISO currency codes
//! - [`IborIndex`]: Interbank offered rate index with tenor and currency
//! - [`PriceIndex`]: Consumer price index with currency
//! - [`CurrencyAmount`]: An amount in one currency
//! - [`MultipleCurrencyAmount`]: Amounts in several currencies (pricing output)

mod amount;
mod currency;
mod index;

pub use amount::{CurrencyAmount, MultipleCurrencyAmount};
pub use currency::Currency;
pub use index::{IborIndex, PriceIndex};
