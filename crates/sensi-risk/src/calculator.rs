//! Finite-difference curve sensitivities.
//!
//! A sensitivity is obtained by repricing an instrument against markets in
//! which one curve node has been shifted. The unbumped present value is
//! priced at most once per computation and never in central mode.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use sensi_core::{Currency, IborIndex, PriceIndex};
use sensi_curves::{CurveSelector, MulticurveProvider};

use crate::cancel::CancellationToken;
use crate::config::{SensitivityConfig, Validate};
use crate::error::{RiskError, RiskResult};
use crate::mode::DifferenceMode;
use crate::pricing::PresentValueCalculator;
use crate::result::NodeSensitivities;
use crate::strategy::BumpStrategy;

/// Bump-and-reprice sensitivity engine.
///
/// # Example
///
/// ```rust
/// use sensi_core::{Currency, MultipleCurrencyAmount};
/// use sensi_curves::{CurveResult, CurveSelector, FlatCurve, MulticurveMarket, MulticurveProvider};
/// use sensi_risk::{DifferenceMode, FiniteDifferenceCalculator};
///
/// // A zero-coupon payment of 100 EUR in five years
/// fn pv(maturity: &f64, market: &dyn MulticurveProvider) -> CurveResult<MultipleCurrencyAmount> {
///     let df = market.discount_factor(Currency::EUR, *maturity)?;
///     Ok(MultipleCurrencyAmount::of(Currency::EUR, 100.0 * df))
/// }
///
/// let market = MulticurveMarket::builder()
///     .discount(Currency::EUR, FlatCurve::new(0.03))
///     .build()
///     .unwrap();
///
/// let calculator = FiniteDifferenceCalculator::new(DifferenceMode::Central, 1e-4);
/// let sensi = calculator
///     .curve_sensitivity(&5.0_f64, &market, &CurveSelector::Discounting(Currency::EUR), &[5.0], &pv)
///     .unwrap();
///
/// let expected = -5.0 * 100.0 * (-0.15f64).exp();
/// assert!((sensi[0] / expected - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteDifferenceCalculator {
    mode: DifferenceMode,
    bump_size: f64,
    validate_bump_size: bool,
    parallel: bool,
    min_parallel_nodes: usize,
}

impl Default for FiniteDifferenceCalculator {
    fn default() -> Self {
        Self::from_validated(&SensitivityConfig::default())
    }
}

/// How each node's value is combined with the repriced values.
#[derive(Debug, Clone, Copy)]
enum Stencil {
    Forward { base: f64 },
    Backward { base: f64 },
    Central,
}

/// Borrowed inputs of one computation.
struct Job<'a, I: ?Sized> {
    instrument: &'a I,
    market: &'a dyn MulticurveProvider,
    strategy: &'a dyn BumpStrategy,
    pricer: &'a dyn PresentValueCalculator<I>,
    currency: Currency,
}

impl<I: ?Sized> Job<'_, I> {
    fn value(&self, market: &dyn MulticurveProvider) -> RiskResult<f64> {
        let pv = self.pricer.present_value(self.instrument, market)?;
        Ok(pv.amount(self.currency))
    }

    fn bumped_value(&self, node_time: f64, amount: f64) -> RiskResult<f64> {
        let bumped = self.strategy.bump(self.market, node_time, amount)?;
        self.value(bumped.as_ref())
    }
}

fn check_cancelled(
    cancel: Option<&CancellationToken>,
    completed: usize,
    total: usize,
) -> RiskResult<()> {
    match cancel {
        Some(token) if token.is_cancelled() => {
            debug!(completed, total, "curve sensitivity cancelled");
            Err(RiskError::Cancelled { completed, total })
        }
        _ => Ok(()),
    }
}

fn check_bump_size(enabled: bool, bump_size: f64) -> RiskResult<()> {
    if enabled && (!bump_size.is_finite() || bump_size == 0.0) {
        return Err(RiskError::invalid_argument(format!(
            "bump size must be finite and non-zero, got {bump_size}"
        )));
    }
    Ok(())
}

impl FiniteDifferenceCalculator {
    /// Creates a calculator with the given scheme and bump size.
    ///
    /// The bump size is not checked, so a zero, NaN or infinite bump yields
    /// non-finite sensitivities. [`with_bump_validation`](Self::with_bump_validation)
    /// rejects such bumps at run time; [`from_config`](Self::from_config)
    /// always rejects a non-finite one.
    #[must_use]
    pub fn new(mode: DifferenceMode, bump_size: f64) -> Self {
        Self {
            mode,
            bump_size,
            ..Self::default()
        }
    }

    /// Creates a calculator from a configuration, validating it first.
    ///
    /// With `validate_bump_size` set, a bad bump size is reported as
    /// [`RiskError::InvalidArgument`], as it is at run time. Other validation
    /// failures are [`RiskError::Config`].
    pub fn from_config(config: &SensitivityConfig) -> RiskResult<Self> {
        check_bump_size(config.validate_bump_size, config.bump_size)?;
        config.validate_or_error()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &SensitivityConfig) -> Self {
        Self {
            mode: config.mode,
            bump_size: config.bump_size,
            validate_bump_size: config.validate_bump_size,
            parallel: config.parallel,
            min_parallel_nodes: config.min_parallel_nodes,
        }
    }

    /// Rejects a zero or non-finite bump size before any pricing.
    #[must_use]
    pub fn with_bump_validation(mut self, enabled: bool) -> Self {
        self.validate_bump_size = enabled;
        self
    }

    /// Evaluates nodes on the rayon thread pool.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Smallest node count for which parallel evaluation kicks in.
    #[must_use]
    pub fn with_min_parallel_nodes(mut self, nodes: usize) -> Self {
        self.min_parallel_nodes = nodes.max(1);
        self
    }

    /// Returns the scheme.
    #[must_use]
    pub fn mode(&self) -> DifferenceMode {
        self.mode
    }

    /// Returns the bump size.
    #[must_use]
    pub fn bump_size(&self) -> f64 {
        self.bump_size
    }

    /// Returns true if parallel evaluation is enabled.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Sensitivity of the present value to each node of one curve.
    ///
    /// Returns one value per entry of `node_times`, in the same order. The
    /// present value is read in `strategy.currency()`.
    ///
    /// # Errors
    ///
    /// Failures raised while bumping or pricing are returned unchanged. No
    /// partial result is ever returned.
    pub fn curve_sensitivity<I: ?Sized + Sync>(
        &self,
        instrument: &I,
        market: &dyn MulticurveProvider,
        strategy: &dyn BumpStrategy,
        node_times: &[f64],
        pricer: &dyn PresentValueCalculator<I>,
    ) -> RiskResult<Vec<f64>> {
        let job = Job {
            instrument,
            market,
            strategy,
            pricer,
            currency: strategy.currency(),
        };
        self.run(&job, node_times, None)
    }

    /// Like [`curve_sensitivity`](Self::curve_sensitivity), checking `cancel`
    /// before every node.
    pub fn curve_sensitivity_with_cancel<I: ?Sized + Sync>(
        &self,
        instrument: &I,
        market: &dyn MulticurveProvider,
        strategy: &dyn BumpStrategy,
        node_times: &[f64],
        pricer: &dyn PresentValueCalculator<I>,
        cancel: &CancellationToken,
    ) -> RiskResult<Vec<f64>> {
        let job = Job {
            instrument,
            market,
            strategy,
            pricer,
            currency: strategy.currency(),
        };
        self.run(&job, node_times, Some(cancel))
    }

    /// Like [`curve_sensitivity`](Self::curve_sensitivity), keeping the node
    /// times and run parameters alongside the values.
    pub fn node_sensitivities<I: ?Sized + Sync>(
        &self,
        instrument: &I,
        market: &dyn MulticurveProvider,
        strategy: &dyn BumpStrategy,
        node_times: &[f64],
        pricer: &dyn PresentValueCalculator<I>,
        cancel: Option<&CancellationToken>,
    ) -> RiskResult<NodeSensitivities> {
        let job = Job {
            instrument,
            market,
            strategy,
            pricer,
            currency: strategy.currency(),
        };
        let values = self.run(&job, node_times, cancel)?;
        Ok(NodeSensitivities::new(
            strategy.label(),
            job.currency,
            self.mode,
            self.bump_size,
            node_times.to_vec(),
            values,
        ))
    }

    fn run<I: ?Sized + Sync>(
        &self,
        job: &Job<'_, I>,
        node_times: &[f64],
        cancel: Option<&CancellationToken>,
    ) -> RiskResult<Vec<f64>> {
        let total = node_times.len();
        check_bump_size(self.validate_bump_size, self.bump_size)?;

        debug!(
            mode = %self.mode,
            nodes = total,
            bump_size = self.bump_size,
            currency = %job.currency,
            curve = %job.strategy.label(),
            "starting curve sensitivity"
        );

        check_cancelled(cancel, 0, total)?;
        let stencil = match self.mode {
            DifferenceMode::Forward => Stencil::Forward {
                base: job.value(job.market)?,
            },
            DifferenceMode::Backward => Stencil::Backward {
                base: job.value(job.market)?,
            },
            DifferenceMode::Central => Stencil::Central,
        };

        let values = if self.parallel && total >= self.min_parallel_nodes {
            let completed = AtomicUsize::new(0);
            node_times
                .par_iter()
                .map(|&node_time| -> RiskResult<f64> {
                    check_cancelled(cancel, completed.load(Ordering::Relaxed), total)?;
                    let value = self.evaluate(job, stencil, node_time)?;
                    completed.fetch_add(1, Ordering::Relaxed);
                    Ok(value)
                })
                .collect::<RiskResult<Vec<f64>>>()?
        } else {
            let mut values = Vec::with_capacity(total);
            for (completed, &node_time) in node_times.iter().enumerate() {
                check_cancelled(cancel, completed, total)?;
                values.push(self.evaluate(job, stencil, node_time)?);
            }
            values
        };

        debug!(nodes = total, "finished curve sensitivity");
        Ok(values)
    }

    fn evaluate<I: ?Sized>(
        &self,
        job: &Job<'_, I>,
        stencil: Stencil,
        node_time: f64,
    ) -> RiskResult<f64> {
        let h = self.bump_size;
        let value = match stencil {
            Stencil::Forward { base } => (job.bumped_value(node_time, h)? - base) / h,
            Stencil::Backward { base } => (base - job.bumped_value(node_time, -h)?) / h,
            Stencil::Central => {
                let up = job.bumped_value(node_time, h)?;
                let down = job.bumped_value(node_time, -h)?;
                (up - down) / (2.0 * h)
            }
        };

        trace!(node_time, sensitivity = value, "node sensitivity");
        if !value.is_finite() {
            warn!(node_time, bump_size = h, "non-finite node sensitivity");
        }
        Ok(value)
    }
}

/// Sensitivity to the nodes of the discounting curve of `currency`.
pub fn discounting_curve_sensitivity<I: ?Sized + Sync>(
    instrument: &I,
    market: &dyn MulticurveProvider,
    currency: Currency,
    node_times: &[f64],
    bump_size: f64,
    pricer: &dyn PresentValueCalculator<I>,
    mode: DifferenceMode,
) -> RiskResult<Vec<f64>> {
    FiniteDifferenceCalculator::new(mode, bump_size).curve_sensitivity(
        instrument,
        market,
        &CurveSelector::Discounting(currency),
        node_times,
        pricer,
    )
}

/// Sensitivity to the nodes of the forward curve of `index`.
///
/// The present value is read in the index currency.
pub fn forward_curve_sensitivity<I: ?Sized + Sync>(
    instrument: &I,
    market: &dyn MulticurveProvider,
    index: &IborIndex,
    node_times: &[f64],
    bump_size: f64,
    pricer: &dyn PresentValueCalculator<I>,
    mode: DifferenceMode,
) -> RiskResult<Vec<f64>> {
    FiniteDifferenceCalculator::new(mode, bump_size).curve_sensitivity(
        instrument,
        market,
        &CurveSelector::Forward(index.clone()),
        node_times,
        pricer,
    )
}

/// Sensitivity to the nodes of the estimation curve of a price index.
///
/// The present value is read in the index currency.
pub fn price_index_curve_sensitivity<I: ?Sized + Sync>(
    instrument: &I,
    market: &dyn MulticurveProvider,
    index: &PriceIndex,
    node_times: &[f64],
    bump_size: f64,
    pricer: &dyn PresentValueCalculator<I>,
    mode: DifferenceMode,
) -> RiskResult<Vec<f64>> {
    FiniteDifferenceCalculator::new(mode, bump_size).curve_sensitivity(
        instrument,
        market,
        &CurveSelector::PriceIndex(index.clone()),
        node_times,
        pricer,
    )
}
