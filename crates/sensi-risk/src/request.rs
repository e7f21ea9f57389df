//! Validated sensitivity requests.
//!
//! [`SensitivityRequest::builder`] collects the inputs of a computation and
//! checks them all in [`build`](SensitivityRequestBuilder::build), so that an
//! incomplete or malformed request fails before the pricer is ever called.

use sensi_curves::{CurveSelector, MulticurveProvider};

use crate::calculator::FiniteDifferenceCalculator;
use crate::cancel::CancellationToken;
use crate::config::SensitivityConfig;
use crate::error::{RiskError, RiskResult};
use crate::mode::DifferenceMode;
use crate::pricing::PresentValueCalculator;
use crate::result::NodeSensitivities;
use crate::strategy::BumpStrategy;

/// A complete, validated sensitivity computation.
pub struct SensitivityRequest<'a, I: ?Sized> {
    instrument: &'a I,
    market: &'a dyn MulticurveProvider,
    strategy: Box<dyn BumpStrategy + 'a>,
    node_times: Vec<f64>,
    pricer: &'a dyn PresentValueCalculator<I>,
    calculator: FiniteDifferenceCalculator,
    cancel: Option<CancellationToken>,
}

impl<I: ?Sized> std::fmt::Debug for SensitivityRequest<'_, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensitivityRequest")
            .field("curve", &self.strategy.label())
            .field("node_times", &self.node_times)
            .field("calculator", &self.calculator)
            .finish_non_exhaustive()
    }
}

impl<'a, I: ?Sized> SensitivityRequest<'a, I> {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> SensitivityRequestBuilder<'a, I> {
        SensitivityRequestBuilder::new()
    }

    /// Node times, in request order.
    #[must_use]
    pub fn node_times(&self) -> &[f64] {
        &self.node_times
    }

    /// The calculator that will run the request.
    #[must_use]
    pub fn calculator(&self) -> &FiniteDifferenceCalculator {
        &self.calculator
    }
}

impl<I: ?Sized + Sync> SensitivityRequest<'_, I> {
    /// Runs the computation, returning one sensitivity per node time.
    pub fn compute(&self) -> RiskResult<Vec<f64>> {
        match &self.cancel {
            Some(token) => self.calculator.curve_sensitivity_with_cancel(
                self.instrument,
                self.market,
                self.strategy.as_ref(),
                &self.node_times,
                self.pricer,
                token,
            ),
            None => self.calculator.curve_sensitivity(
                self.instrument,
                self.market,
                self.strategy.as_ref(),
                &self.node_times,
                self.pricer,
            ),
        }
    }

    /// Runs the computation, keeping node times alongside the values.
    pub fn compute_detailed(&self) -> RiskResult<NodeSensitivities> {
        self.calculator.node_sensitivities(
            self.instrument,
            self.market,
            self.strategy.as_ref(),
            &self.node_times,
            self.pricer,
            self.cancel.as_ref(),
        )
    }
}

/// Builder for [`SensitivityRequest`].
pub struct SensitivityRequestBuilder<'a, I: ?Sized> {
    instrument: Option<&'a I>,
    market: Option<&'a dyn MulticurveProvider>,
    strategy: Option<Box<dyn BumpStrategy + 'a>>,
    node_times: Option<Vec<f64>>,
    pricer: Option<&'a dyn PresentValueCalculator<I>>,
    config: Option<SensitivityConfig>,
    mode: Option<DifferenceMode>,
    mode_name: Option<String>,
    bump_size: Option<f64>,
    cancel: Option<CancellationToken>,
}

impl<I: ?Sized> Default for SensitivityRequestBuilder<'_, I> {
    fn default() -> Self {
        Self {
            instrument: None,
            market: None,
            strategy: None,
            node_times: None,
            pricer: None,
            config: None,
            mode: None,
            mode_name: None,
            bump_size: None,
            cancel: None,
        }
    }
}

impl<'a, I: ?Sized> SensitivityRequestBuilder<'a, I> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instrument to price.
    #[must_use]
    pub fn instrument(mut self, instrument: &'a I) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Sets the base market.
    #[must_use]
    pub fn market(mut self, market: &'a dyn MulticurveProvider) -> Self {
        self.market = Some(market);
        self
    }

    /// Selects the curve to bump.
    #[must_use]
    pub fn selector(mut self, selector: CurveSelector) -> Self {
        self.strategy = Some(Box::new(selector));
        self
    }

    /// Uses a custom bump strategy instead of a curve selector.
    #[must_use]
    pub fn strategy(mut self, strategy: impl BumpStrategy + 'a) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// Sets the node times to bump.
    #[must_use]
    pub fn node_times(mut self, node_times: &[f64]) -> Self {
        self.node_times = Some(node_times.to_vec());
        self
    }

    /// Sets the pricing function.
    #[must_use]
    pub fn pricer(mut self, pricer: &'a dyn PresentValueCalculator<I>) -> Self {
        self.pricer = Some(pricer);
        self
    }

    /// Starts from a configuration; explicit settings below override it.
    #[must_use]
    pub fn config(mut self, config: SensitivityConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the finite-difference scheme.
    #[must_use]
    pub fn mode(mut self, mode: DifferenceMode) -> Self {
        self.mode = Some(mode);
        self.mode_name = None;
        self
    }

    /// Sets the scheme by name; parsed in [`build`](Self::build).
    #[must_use]
    pub fn mode_name(mut self, name: impl Into<String>) -> Self {
        self.mode_name = Some(name.into());
        self.mode = None;
        self
    }

    /// Sets the bump size.
    #[must_use]
    pub fn bump_size(mut self, bump_size: f64) -> Self {
        self.bump_size = Some(bump_size);
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validates the inputs and builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidArgument`] if the instrument, market,
    /// curve, node times or pricer are missing, if no node time is given,
    /// or if the scheme name is not recognized. With bump validation enabled,
    /// a zero or non-finite bump size is also an invalid argument. Any other
    /// configuration that fails validation returns [`RiskError::Config`].
    pub fn build(self) -> RiskResult<SensitivityRequest<'a, I>> {
        let mode = match (self.mode, self.mode_name.as_deref()) {
            (_, Some(name)) => Some(name.parse::<DifferenceMode>()?),
            (mode, None) => mode,
        };

        let instrument = self
            .instrument
            .ok_or_else(|| RiskError::invalid_argument("instrument must be provided"))?;
        let pricer = self
            .pricer
            .ok_or_else(|| RiskError::invalid_argument("pricing function must be provided"))?;
        let market = self
            .market
            .ok_or_else(|| RiskError::invalid_argument("market must be provided"))?;
        let strategy = self
            .strategy
            .ok_or_else(|| RiskError::invalid_argument("curve selector must be provided"))?;
        let node_times = self
            .node_times
            .ok_or_else(|| RiskError::invalid_argument("node times must be provided"))?;
        if node_times.is_empty() {
            return Err(RiskError::invalid_argument("node times must not be empty"));
        }

        let mut config = self.config.unwrap_or_default();
        if let Some(mode) = mode {
            config.mode = mode;
        }
        if let Some(bump_size) = self.bump_size {
            config.bump_size = bump_size;
        }
        let calculator = FiniteDifferenceCalculator::from_config(&config)?;

        Ok(SensitivityRequest {
            instrument,
            market,
            strategy,
            node_times,
            pricer,
            calculator,
            cancel: self.cancel,
        })
    }
}
