//! Curve selectors.

use serde::{Deserialize, Serialize};
use std::fmt;

use sensi_core::{Currency, IborIndex, PriceIndex};

/// Identifies exactly one curve inside a market snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "key")]
pub enum CurveSelector {
    /// The discounting curve of a currency.
    Discounting(Currency),
    /// The forward (projection) curve of an ibor index.
    Forward(IborIndex),
    /// The estimation curve of a price index.
    PriceIndex(PriceIndex),
}

impl CurveSelector {
    /// Returns the native currency of the selected curve.
    ///
    /// For index curves this is the index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            CurveSelector::Discounting(ccy) => *ccy,
            CurveSelector::Forward(index) => index.currency(),
            CurveSelector::PriceIndex(index) => index.currency(),
        }
    }

    /// Short label for the kind of curve selected.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CurveSelector::Discounting(_) => "discounting",
            CurveSelector::Forward(_) => "forward",
            CurveSelector::PriceIndex(_) => "price-index",
        }
    }
}

impl From<Currency> for CurveSelector {
    fn from(value: Currency) -> Self {
        CurveSelector::Discounting(value)
    }
}

impl From<IborIndex> for CurveSelector {
    fn from(value: IborIndex) -> Self {
        CurveSelector::Forward(value)
    }
}

impl From<PriceIndex> for CurveSelector {
    fn from(value: PriceIndex) -> Self {
        CurveSelector::PriceIndex(value)
    }
}

impl fmt::Display for CurveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveSelector::Discounting(ccy) => write!(f, "{ccy} discounting"),
            CurveSelector::Forward(index) => write!(f, "{index} forward"),
            CurveSelector::PriceIndex(index) => write!(f, "{index} price index"),
        }
    }
}
