//! Multi-curve market snapshot.
//!
//! Provides a complete curve environment for pricing: discounting curves per
//! currency, forward curves per ibor index and estimation curves per price index.

use std::collections::HashMap;
use std::sync::Arc;

use sensi_core::{Currency, IborIndex, PriceIndex};

use super::{CurveSelector, MulticurveProvider};
use crate::error::{CurveError, CurveResult};
use crate::term_structure::{CurveRef, TermStructure};

/// A market snapshot built from shared curves.
///
/// Discounting and forward curves hold continuously compounded zero rates,
/// so `P(t) = exp(-r(t) * t)`. Price-index curves hold index levels.
///
/// Curves are `Arc`-shared: cloning the market, or wrapping it in a bump
/// decorator, never copies curve data.
///
/// # Example
///
/// ```rust
/// use sensi_core::{Currency, IborIndex};
/// use sensi_curves::curves::FlatCurve;
/// use sensi_curves::market::{MulticurveMarket, MulticurveProvider};
///
/// let market = MulticurveMarket::builder()
///     .discount(Currency::EUR, FlatCurve::new(0.02))
///     .forward(IborIndex::euribor_3m(), FlatCurve::new(0.025))
///     .build()
///     .unwrap();
///
/// let df = market.discount_factor(Currency::EUR, 1.0).unwrap();
/// assert!((df - (-0.02f64).exp()).abs() < 1e-15);
/// ```
#[derive(Clone, Default)]
pub struct MulticurveMarket {
    /// Discounting curves per currency.
    discount_curves: HashMap<Currency, CurveRef>,
    /// Forward curves per ibor index.
    forward_curves: HashMap<IborIndex, CurveRef>,
    /// Estimation curves per price index.
    price_index_curves: HashMap<PriceIndex, CurveRef>,
}

impl std::fmt::Debug for MulticurveMarket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MulticurveMarket")
            .field("discount_curves", &self.discount_curves.keys().collect::<Vec<_>>())
            .field("forward_curves", &self.forward_curves.keys().collect::<Vec<_>>())
            .field(
                "price_index_curves",
                &self.price_index_curves.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl MulticurveMarket {
    /// Creates a builder for constructing a market.
    #[must_use]
    pub fn builder() -> MulticurveMarketBuilder {
        MulticurveMarketBuilder::new()
    }

    /// Returns the discounting curve for a currency.
    pub fn discount_curve(&self, currency: Currency) -> CurveResult<&dyn TermStructure> {
        self.discount_curves
            .get(&currency)
            .map(|c| c.as_ref())
            .ok_or_else(|| CurveError::curve_not_found(format!("{currency} discounting")))
    }

    /// Returns the forward curve for an ibor index.
    pub fn forward_curve(&self, index: &IborIndex) -> CurveResult<&dyn TermStructure> {
        self.forward_curves
            .get(index)
            .map(|c| c.as_ref())
            .ok_or_else(|| CurveError::curve_not_found(format!("{index} forward")))
    }

    /// Returns the estimation curve for a price index.
    pub fn price_index_curve(&self, index: &PriceIndex) -> CurveResult<&dyn TermStructure> {
        self.price_index_curves
            .get(index)
            .map(|c| c.as_ref())
            .ok_or_else(|| CurveError::curve_not_found(format!("{index} price index")))
    }

    /// Returns the curve picked by a selector.
    pub fn curve(&self, selector: &CurveSelector) -> CurveResult<&dyn TermStructure> {
        match selector {
            CurveSelector::Discounting(ccy) => self.discount_curve(*ccy),
            CurveSelector::Forward(index) => self.forward_curve(index),
            CurveSelector::PriceIndex(index) => self.price_index_curve(index),
        }
    }

    /// Returns true if a discounting curve exists for the currency.
    #[must_use]
    pub fn has_discount(&self, currency: Currency) -> bool {
        self.discount_curves.contains_key(&currency)
    }

    /// Returns true if a forward curve exists for the index.
    #[must_use]
    pub fn has_forward(&self, index: &IborIndex) -> bool {
        self.forward_curves.contains_key(index)
    }

    /// Returns true if an estimation curve exists for the price index.
    #[must_use]
    pub fn has_price_index(&self, index: &PriceIndex) -> bool {
        self.price_index_curves.contains_key(index)
    }

    /// Returns all currencies with discounting curves.
    #[must_use]
    pub fn available_currencies(&self) -> Vec<Currency> {
        let mut ccys: Vec<Currency> = self.discount_curves.keys().copied().collect();
        ccys.sort();
        ccys
    }

    /// Returns all ibor indices with forward curves.
    #[must_use]
    pub fn available_ibor_indices(&self) -> Vec<&IborIndex> {
        self.forward_curves.keys().collect()
    }

    /// Returns all price indices with estimation curves.
    #[must_use]
    pub fn available_price_indices(&self) -> Vec<&PriceIndex> {
        self.price_index_curves.keys().collect()
    }

    /// Creates a new market with an additional/updated discounting curve.
    #[must_use]
    pub fn with_discount(mut self, currency: Currency, curve: CurveRef) -> Self {
        self.discount_curves.insert(currency, curve);
        self
    }

    /// Creates a new market with an additional/updated forward curve.
    #[must_use]
    pub fn with_forward(mut self, index: IborIndex, curve: CurveRef) -> Self {
        self.forward_curves.insert(index, curve);
        self
    }

    /// Creates a new market with an additional/updated price-index curve.
    #[must_use]
    pub fn with_price_index(mut self, index: PriceIndex, curve: CurveRef) -> Self {
        self.price_index_curves.insert(index, curve);
        self
    }
}

/// Rejects times a curve cannot be queried at.
fn check_time(t: f64) -> CurveResult<()> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(CurveError::invalid_value(format!(
            "curve time must be finite and non-negative, got {t}"
        )))
    }
}

impl MulticurveProvider for MulticurveMarket {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        check_time(t)?;
        let rate = self.discount_curve(currency)?.value_at(t);
        Ok((-rate * t).exp())
    }

    fn index_discount_factor(&self, index: &IborIndex, t: f64) -> CurveResult<f64> {
        check_time(t)?;
        let rate = self.forward_curve(index)?.value_at(t);
        Ok((-rate * t).exp())
    }

    fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64> {
        check_time(t)?;
        Ok(self.price_index_curve(index)?.value_at(t))
    }

    fn tenor_bounds(&self, selector: &CurveSelector) -> CurveResult<(f64, f64)> {
        Ok(self.curve(selector)?.tenor_bounds())
    }
}

/// Builder for constructing a [`MulticurveMarket`].
#[derive(Default)]
pub struct MulticurveMarketBuilder {
    discount_curves: HashMap<Currency, CurveRef>,
    forward_curves: HashMap<IborIndex, CurveRef>,
    price_index_curves: HashMap<PriceIndex, CurveRef>,
}

impl MulticurveMarketBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a discounting curve (zero rates) for a currency.
    #[must_use]
    pub fn discount(mut self, currency: Currency, curve: impl TermStructure + 'static) -> Self {
        self.discount_curves.insert(currency, Arc::new(curve));
        self
    }

    /// Adds a discounting curve from an Arc reference.
    #[must_use]
    pub fn discount_ref(mut self, currency: Currency, curve: CurveRef) -> Self {
        self.discount_curves.insert(currency, curve);
        self
    }

    /// Adds a forward curve (zero rates of the pseudo-discount curve) for an ibor index.
    #[must_use]
    pub fn forward(mut self, index: IborIndex, curve: impl TermStructure + 'static) -> Self {
        self.forward_curves.insert(index, Arc::new(curve));
        self
    }

    /// Adds a forward curve from an Arc reference.
    #[must_use]
    pub fn forward_ref(mut self, index: IborIndex, curve: CurveRef) -> Self {
        self.forward_curves.insert(index, curve);
        self
    }

    /// Adds an estimation curve (index levels) for a price index.
    #[must_use]
    pub fn price_index(mut self, index: PriceIndex, curve: impl TermStructure + 'static) -> Self {
        self.price_index_curves.insert(index, Arc::new(curve));
        self
    }

    /// Adds a price-index curve from an Arc reference.
    #[must_use]
    pub fn price_index_ref(mut self, index: PriceIndex, curve: CurveRef) -> Self {
        self.price_index_curves.insert(index, curve);
        self
    }

    /// Builds the market.
    ///
    /// # Errors
    ///
    /// Returns an error if no curve at all was added.
    pub fn build(self) -> CurveResult<MulticurveMarket> {
        if self.discount_curves.is_empty()
            && self.forward_curves.is_empty()
            && self.price_index_curves.is_empty()
        {
            return Err(CurveError::builder_error("market has no curves"));
        }

        Ok(MulticurveMarket {
            discount_curves: self.discount_curves,
            forward_curves: self.forward_curves,
            price_index_curves: self.price_index_curves,
        })
    }
}
