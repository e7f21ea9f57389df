//! Rate and price index definitions.
//!
//! Both index types carry their native currency. The present value of an
//! instrument's exposure to an index curve is always read in that currency.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Currency;
use crate::error::{CoreError, CoreResult};

// ============================================================================
// Ibor Index
// ============================================================================

/// An interbank offered rate index (Euribor, Libor, term SOFR, ...).
///
/// Identified by name; the forward curve of a market snapshot is keyed by the
/// whole index value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IborIndex {
    name: String,
    currency: Currency,
    tenor_months: u32,
}

impl IborIndex {
    /// Creates a new ibor index.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the tenor is zero.
    pub fn new(name: impl Into<String>, currency: Currency, tenor_months: u32) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::invalid_index("ibor index name is empty"));
        }
        if tenor_months == 0 {
            return Err(CoreError::invalid_index(format!(
                "ibor index {name} has a zero tenor"
            )));
        }
        Ok(Self {
            name,
            currency,
            tenor_months,
        })
    }

    fn preset(name: &str, currency: Currency, tenor_months: u32) -> Self {
        Self {
            name: name.to_string(),
            currency,
            tenor_months,
        }
    }

    /// Euribor 3M.
    #[must_use]
    pub fn euribor_3m() -> Self {
        Self::preset("EURIBOR3M", Currency::EUR, 3)
    }

    /// Euribor 6M.
    #[must_use]
    pub fn euribor_6m() -> Self {
        Self::preset("EURIBOR6M", Currency::EUR, 6)
    }

    /// USD Libor 3M.
    #[must_use]
    pub fn usd_libor_3m() -> Self {
        Self::preset("USDLIBOR3M", Currency::USD, 3)
    }

    /// Term SOFR 3M.
    #[must_use]
    pub fn term_sofr_3m() -> Self {
        Self::preset("TERMSOFR3M", Currency::USD, 3)
    }

    /// GBP Libor 6M.
    #[must_use]
    pub fn gbp_libor_6m() -> Self {
        Self::preset("GBPLIBOR6M", Currency::GBP, 6)
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the native currency of the index.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the tenor in months.
    #[must_use]
    pub fn tenor_months(&self) -> u32 {
        self.tenor_months
    }

    /// Returns the tenor as a year fraction.
    #[must_use]
    pub fn tenor_years(&self) -> f64 {
        f64::from(self.tenor_months) / 12.0
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Price Index
// ============================================================================

/// A price index (inflation index) such as HICP or CPI-U.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceIndex {
    name: String,
    currency: Currency,
}

impl PriceIndex {
    /// Creates a new price index.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn new(name: impl Into<String>, currency: Currency) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::invalid_index("price index name is empty"));
        }
        Ok(Self { name, currency })
    }

    /// Euro area HICP excluding tobacco.
    #[must_use]
    pub fn eu_hicp_xt() -> Self {
        Self {
            name: "EUR HICPXT".to_string(),
            currency: Currency::EUR,
        }
    }

    /// US CPI for all urban consumers.
    #[must_use]
    pub fn us_cpi_u() -> Self {
        Self {
            name: "US CPI-U".to_string(),
            currency: Currency::USD,
        }
    }

    /// UK retail price index.
    #[must_use]
    pub fn uk_rpi() -> Self {
        Self {
            name: "UK RPI".to_string(),
            currency: Currency::GBP,
        }
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the native currency of the index.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for PriceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
