//! Currency amounts.
//!
//! A pricing function returns a [`MultipleCurrencyAmount`]; sensitivity code
//! reads the scalar present value out of it for one currency.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::Currency;
use crate::error::{CoreError, CoreResult};

/// An amount of money in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    currency: Currency,
    amount: f64,
}

impl CurrencyAmount {
    /// Creates a new currency amount.
    #[must_use]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Creates a zero amount.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0.0)
    }

    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Adds another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CurrencyMismatch` if the currencies differ.
    pub fn checked_add(&self, other: &CurrencyAmount) -> CoreResult<CurrencyAmount> {
        if self.currency != other.currency {
            return Err(CoreError::currency_mismatch(self.currency, other.currency));
        }
        Ok(Self::new(self.currency, self.amount + other.amount))
    }

    /// Subtracts another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CurrencyMismatch` if the currencies differ.
    pub fn checked_sub(&self, other: &CurrencyAmount) -> CoreResult<CurrencyAmount> {
        if self.currency != other.currency {
            return Err(CoreError::currency_mismatch(self.currency, other.currency));
        }
        Ok(Self::new(self.currency, self.amount - other.amount))
    }
}

impl Mul<f64> for CurrencyAmount {
    type Output = CurrencyAmount;

    fn mul(self, rhs: f64) -> Self::Output {
        CurrencyAmount::new(self.currency, self.amount * rhs)
    }
}

impl Neg for CurrencyAmount {
    type Output = CurrencyAmount;

    fn neg(self) -> Self::Output {
        CurrencyAmount::new(self.currency, -self.amount)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// Amounts in several currencies, at most one entry per currency.
///
/// Entries are kept ordered by currency so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultipleCurrencyAmount {
    /// Creates an empty amount.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an amount holding a single currency.
    #[must_use]
    pub fn of(currency: Currency, amount: f64) -> Self {
        Self::new().plus(currency, amount)
    }

    /// Adds `amount` in `currency`, accumulating onto any existing entry.
    #[must_use]
    pub fn plus(mut self, currency: Currency, amount: f64) -> Self {
        self.add_amount(currency, amount);
        self
    }

    /// Adds `amount` in `currency` in place.
    pub fn add_amount(&mut self, currency: Currency, amount: f64) {
        *self.amounts.entry(currency).or_insert(0.0) += amount;
    }

    /// Returns the amount in `currency`, or 0.0 if there is no entry.
    #[must_use]
    pub fn amount(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Returns the entry for `currency`, if any.
    #[must_use]
    pub fn get(&self, currency: Currency) -> Option<CurrencyAmount> {
        self.amounts
            .get(&currency)
            .map(|&a| CurrencyAmount::new(currency, a))
    }

    /// Returns true if there is an entry for `currency`.
    #[must_use]
    pub fn contains(&self, currency: Currency) -> bool {
        self.amounts.contains_key(&currency)
    }

    /// Returns the currencies present, in order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Iterates over the entries as [`CurrencyAmount`]s.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts
            .iter()
            .map(|(&ccy, &a)| CurrencyAmount::new(ccy, a))
    }

    /// Number of currencies present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl From<CurrencyAmount> for MultipleCurrencyAmount {
    fn from(value: CurrencyAmount) -> Self {
        Self::of(value.currency(), value.amount())
    }
}

impl FromIterator<CurrencyAmount> for MultipleCurrencyAmount {
    fn from_iter<T: IntoIterator<Item = CurrencyAmount>>(iter: T) -> Self {
        let mut result = Self::new();
        for ca in iter {
            result.add_amount(ca.currency(), ca.amount());
        }
        result
    }
}

impl Add for MultipleCurrencyAmount {
    type Output = MultipleCurrencyAmount;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (ccy, amount) in rhs.amounts {
            self.add_amount(ccy, amount);
        }
        self
    }
}

impl Sub for MultipleCurrencyAmount {
    type Output = MultipleCurrencyAmount;

    fn sub(mut self, rhs: Self) -> Self::Output {
        for (ccy, amount) in rhs.amounts {
            self.add_amount(ccy, -amount);
        }
        self
    }
}

impl Mul<f64> for MultipleCurrencyAmount {
    type Output = MultipleCurrencyAmount;

    fn mul(mut self, rhs: f64) -> Self::Output {
        for amount in self.amounts.values_mut() {
            *amount *= rhs;
        }
        self
    }
}
