//! Bump-and-reprice sensitivities against simple instruments with known
//! analytic derivatives.

use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;
use proptest::prelude::*;

use sensi_core::{Currency, IborIndex, MultipleCurrencyAmount, PriceIndex};
use sensi_curves::{
    CurveError, CurveResult, CurveSelector, DiscreteCurve, FlatCurve, MulticurveMarket,
    MulticurveProvider,
};
use sensi_risk::prelude::*;

// =============================================================================
// Instruments and pricers
// =============================================================================

/// A single payment.
struct FixedCashFlow {
    currency: Currency,
    time: f64,
    amount: f64,
}

/// A floating coupon fixing on an ibor index, paid at the end of its period.
struct IborCoupon {
    index: IborIndex,
    start: f64,
    end: f64,
    accrual: f64,
    notional: f64,
}

/// Pays `notional * (I(maturity) / base_level - 1)` at maturity.
struct InflationZeroCoupon {
    index: PriceIndex,
    maturity: f64,
    base_level: f64,
    notional: f64,
}

fn price_cash_flow(
    cf: &FixedCashFlow,
    market: &dyn MulticurveProvider,
) -> CurveResult<MultipleCurrencyAmount> {
    let df = market.discount_factor(cf.currency, cf.time)?;
    Ok(MultipleCurrencyAmount::of(cf.currency, cf.amount * df))
}

fn price_ibor_coupon(
    coupon: &IborCoupon,
    market: &dyn MulticurveProvider,
) -> CurveResult<MultipleCurrencyAmount> {
    let ccy = coupon.index.currency();
    let rate = market.forward_rate(&coupon.index, coupon.start, coupon.end, coupon.accrual)?;
    let df = market.discount_factor(ccy, coupon.end)?;
    Ok(MultipleCurrencyAmount::of(
        ccy,
        coupon.notional * coupon.accrual * rate * df,
    ))
}

fn price_inflation(
    zc: &InflationZeroCoupon,
    market: &dyn MulticurveProvider,
) -> CurveResult<MultipleCurrencyAmount> {
    let ccy = zc.index.currency();
    let level = market.price_index(&zc.index, zc.maturity)?;
    let df = market.discount_factor(ccy, zc.maturity)?;
    Ok(MultipleCurrencyAmount::of(
        ccy,
        zc.notional * (level / zc.base_level - 1.0) * df,
    ))
}

fn flat_eur_market(rate: f64) -> MulticurveMarket {
    MulticurveMarket::builder()
        .discount(Currency::EUR, FlatCurve::new(rate))
        .build()
        .unwrap()
}

fn full_market() -> MulticurveMarket {
    let tenors = vec![0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0];
    MulticurveMarket::builder()
        .discount(
            Currency::EUR,
            DiscreteCurve::new(
                tenors.clone(),
                vec![0.020, 0.021, 0.023, 0.025, 0.027, 0.028, 0.030],
            )
            .unwrap(),
        )
        .discount(Currency::USD, FlatCurve::new(0.04))
        .forward(
            IborIndex::euribor_3m(),
            DiscreteCurve::new(
                tenors,
                vec![0.024, 0.025, 0.027, 0.029, 0.031, 0.032, 0.034],
            )
            .unwrap(),
        )
        .price_index(
            PriceIndex::eu_hicp_xt(),
            DiscreteCurve::new(vec![0.0, 5.0, 10.0], vec![118.0, 130.0, 144.0]).unwrap(),
        )
        .build()
        .unwrap()
}

fn five_year_cash_flow() -> FixedCashFlow {
    FixedCashFlow {
        currency: Currency::EUR,
        time: 5.0,
        amount: 100.0,
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn central_matches_analytic_derivative() {
    let market = flat_eur_market(0.03);
    let cf = five_year_cash_flow();

    let values = discounting_curve_sensitivity(
        &cf,
        &market,
        Currency::EUR,
        &[5.0],
        1e-4,
        &price_cash_flow,
        DifferenceMode::Central,
    )
    .unwrap();

    let expected = -5.0 * 100.0 * (-0.03f64 * 5.0).exp();
    assert_eq!(values.len(), 1);
    assert_relative_eq!(values[0], expected, max_relative = 1e-6);
}

#[test]
fn all_modes_agree_for_small_bump() {
    let market = flat_eur_market(0.03);
    let cf = five_year_cash_flow();
    let selector = CurveSelector::Discounting(Currency::EUR);

    let results: Vec<f64> = DifferenceMode::ALL
        .iter()
        .map(|&mode| {
            FiniteDifferenceCalculator::new(mode, 1e-6)
                .curve_sensitivity(&cf, &market, &selector, &[5.0], &price_cash_flow)
                .unwrap()[0]
        })
        .collect();

    assert_relative_eq!(results[0], results[2], max_relative = 1e-4);
    assert_relative_eq!(results[1], results[2], max_relative = 1e-4);
}

#[test]
fn only_the_paying_node_is_sensitive() {
    let market = flat_eur_market(0.03);
    let cf = FixedCashFlow {
        currency: Currency::EUR,
        time: 2.0,
        amount: 100.0,
    };

    let values = FiniteDifferenceCalculator::default()
        .curve_sensitivity(
            &cf,
            &market,
            &CurveSelector::Discounting(Currency::EUR),
            &[1.0, 2.0, 3.0],
            &price_cash_flow,
        )
        .unwrap();

    assert_eq!(values[0], 0.0);
    assert_ne!(values[1], 0.0);
    assert_eq!(values[2], 0.0);
}

#[test]
fn unrecognized_mode_fails_before_pricing() {
    let market = flat_eur_market(0.03);
    let cf = five_year_cash_flow();
    let calls = AtomicUsize::new(0);
    let pricer = |cf: &FixedCashFlow, market: &dyn MulticurveProvider| {
        calls.fetch_add(1, Ordering::SeqCst);
        price_cash_flow(cf, market)
    };

    let err = SensitivityRequest::builder()
        .instrument(&cf)
        .market(&market)
        .selector(CurveSelector::Discounting(Currency::EUR))
        .node_times(&[5.0])
        .pricer(&pricer)
        .mode_name("sideways")
        .build()
        .unwrap_err();

    assert!(matches!(err, RiskError::InvalidArgument(_)));
    assert!(err
        .to_string()
        .contains("Can only handle forward, backward and central differencing"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_instrument_fails_before_pricing() {
    let market = flat_eur_market(0.03);
    let calls = AtomicUsize::new(0);
    let pricer = |cf: &FixedCashFlow, market: &dyn MulticurveProvider| {
        calls.fetch_add(1, Ordering::SeqCst);
        price_cash_flow(cf, market)
    };

    let err = SensitivityRequest::<FixedCashFlow>::builder()
        .market(&market)
        .selector(CurveSelector::Discounting(Currency::EUR))
        .node_times(&[5.0])
        .pricer(&pricer)
        .build()
        .unwrap_err();

    assert!(matches!(err, RiskError::InvalidArgument(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn zero_bump_with_validation_fails_before_pricing() {
    let market = flat_eur_market(0.03);
    let cf = five_year_cash_flow();
    let calls = AtomicUsize::new(0);
    let pricer = |cf: &FixedCashFlow, market: &dyn MulticurveProvider| {
        calls.fetch_add(1, Ordering::SeqCst);
        price_cash_flow(cf, market)
    };

    let config = SensitivityConfig {
        validate_bump_size: true,
        bump_size: 0.0,
        ..SensitivityConfig::default()
    };
    let err = SensitivityRequest::builder()
        .instrument(&cf)
        .market(&market)
        .selector(CurveSelector::Discounting(Currency::EUR))
        .node_times(&[5.0])
        .pricer(&pricer)
        .config(config.clone())
        .build()
        .unwrap_err();
    assert!(err.is_invalid_argument());

    // An explicit bump overriding a valid configured one is checked the same way
    let err = SensitivityRequest::builder()
        .instrument(&cf)
        .market(&market)
        .selector(CurveSelector::Discounting(Currency::EUR))
        .node_times(&[5.0])
        .pricer(&pricer)
        .config(SensitivityConfig {
            bump_size: 1e-4,
            ..config
        })
        .bump_size(0.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, RiskError::InvalidArgument(_)));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn central_never_prices_the_base_market() {
    let market = flat_eur_market(0.03);
    let cf = five_year_cash_flow();
    let base_addr = std::ptr::addr_of!(market).cast::<()>() as usize;

    let pricer = |cf: &FixedCashFlow, m: &dyn MulticurveProvider| {
        let addr = m as *const _ as *const () as usize;
        if addr == base_addr {
            return Err(CurveError::pricing_error("unbumped market priced"));
        }
        price_cash_flow(cf, m)
    };
    let selector = CurveSelector::Discounting(Currency::EUR);

    let central = FiniteDifferenceCalculator::new(DifferenceMode::Central, 1e-4)
        .curve_sensitivity(&cf, &market, &selector, &[5.0], &pricer);
    assert!(central.is_ok());

    // The stub does detect base pricing
    let forward = FiniteDifferenceCalculator::new(DifferenceMode::Forward, 1e-4)
        .curve_sensitivity(&cf, &market, &selector, &[5.0], &pricer);
    assert!(matches!(
        forward,
        Err(RiskError::Curve(CurveError::PricingError { .. }))
    ));
}

#[test]
fn modes_coincide_for_linear_pricing() {
    let market = full_market();
    let zc = InflationZeroCoupon {
        index: PriceIndex::eu_hicp_xt(),
        maturity: 5.0,
        base_level: 118.0,
        notional: 1_000_000.0,
    };

    let values: Vec<f64> = DifferenceMode::ALL
        .iter()
        .map(|&mode| {
            price_index_curve_sensitivity(
                &zc,
                &market,
                &PriceIndex::eu_hicp_xt(),
                &[5.0],
                1.0,
                &price_inflation,
                mode,
            )
            .unwrap()[0]
        })
        .collect();

    let expected = 1_000_000.0 / 118.0 * market.discount_factor(Currency::EUR, 5.0).unwrap();
    for value in values {
        assert_relative_eq!(value, expected, max_relative = 1e-9);
    }
}

#[test]
fn backward_equals_forward_with_flipped_bump() {
    let market = full_market();
    let cf = FixedCashFlow {
        currency: Currency::EUR,
        time: 3.0,
        amount: 1_000.0,
    };
    let selector = CurveSelector::Discounting(Currency::EUR);
    let nodes = [2.0, 3.0, 5.0];

    let backward = FiniteDifferenceCalculator::new(DifferenceMode::Backward, 1e-4)
        .curve_sensitivity(&cf, &market, &selector, &nodes, &price_cash_flow)
        .unwrap();
    let forward = FiniteDifferenceCalculator::new(DifferenceMode::Forward, -1e-4)
        .curve_sensitivity(&cf, &market, &selector, &nodes, &price_cash_flow)
        .unwrap();

    for (b, f) in backward.iter().zip(&forward) {
        assert_relative_eq!(*b, *f, max_relative = 1e-12);
    }
}

#[test]
fn forward_curve_sensitivity_reads_index_currency() {
    let market = full_market();
    let coupon = IborCoupon {
        index: IborIndex::euribor_3m(),
        start: 2.0,
        end: 2.25,
        accrual: 0.25,
        notional: 10_000_000.0,
    };

    let values = forward_curve_sensitivity(
        &coupon,
        &market,
        &IborIndex::euribor_3m(),
        &[2.0, 2.25, 5.0],
        1e-6,
        &price_ibor_coupon,
        DifferenceMode::Central,
    )
    .unwrap();

    // A lower start discount factor lowers the forward, a lower end factor raises it
    assert!(values[0] < 0.0);
    assert!(values[1] > 0.0);
    assert_eq!(values[2], 0.0);

    // dPV/dr(start) = -N * start * P_fwd(start)/P_fwd(end) * P(end)
    let p_start = market
        .index_discount_factor(&IborIndex::euribor_3m(), 2.0)
        .unwrap();
    let p_end = market
        .index_discount_factor(&IborIndex::euribor_3m(), 2.25)
        .unwrap();
    let df = market.discount_factor(Currency::EUR, 2.25).unwrap();
    let expected = -10_000_000.0 * 2.0 * p_start / p_end * df;
    assert_relative_eq!(values[0], expected, max_relative = 1e-5);
}

#[test]
fn other_currency_amounts_are_ignored() {
    let market = full_market();
    let pricer = |_: &(), m: &dyn MulticurveProvider| -> CurveResult<MultipleCurrencyAmount> {
        let eur = m.discount_factor(Currency::EUR, 5.0)?;
        let usd = m.discount_factor(Currency::USD, 5.0)?;
        Ok(MultipleCurrencyAmount::of(Currency::EUR, 100.0 * eur).plus(Currency::USD, 1e9 * usd))
    };

    let eur = FiniteDifferenceCalculator::new(DifferenceMode::Central, 1e-5)
        .curve_sensitivity(
            &(),
            &market,
            &CurveSelector::Discounting(Currency::EUR),
            &[5.0],
            &pricer,
        )
        .unwrap();
    let expected = -5.0 * 100.0 * market.discount_factor(Currency::EUR, 5.0).unwrap();
    assert_relative_eq!(eur[0], expected, max_relative = 1e-6);
}

#[test]
fn pricer_failures_propagate_unchanged() {
    let market = full_market();
    let failing = |_: &(), _: &dyn MulticurveProvider| -> CurveResult<MultipleCurrencyAmount> {
        Err(CurveError::pricing_error("no fixing"))
    };

    let err = FiniteDifferenceCalculator::default()
        .curve_sensitivity(
            &(),
            &market,
            &CurveSelector::Discounting(Currency::EUR),
            &[1.0],
            &failing,
        )
        .unwrap_err();
    assert!(matches!(err, RiskError::Curve(CurveError::PricingError { .. })));
    assert_eq!(err.to_string(), CurveError::pricing_error("no fixing").to_string());
}

#[test]
fn invalid_nodes_propagate_curve_errors() {
    let market = full_market();
    let cf = five_year_cash_flow();

    let beyond = FiniteDifferenceCalculator::default().curve_sensitivity(
        &cf,
        &market,
        &CurveSelector::Discounting(Currency::EUR),
        &[1.0, 12.0],
        &price_cash_flow,
    );
    assert!(matches!(
        beyond,
        Err(RiskError::Curve(CurveError::TenorOutOfRange { .. }))
    ));

    let missing = FiniteDifferenceCalculator::default().curve_sensitivity(
        &cf,
        &market,
        &CurveSelector::Discounting(Currency::JPY),
        &[1.0],
        &price_cash_flow,
    );
    assert!(matches!(
        missing,
        Err(RiskError::Curve(CurveError::CurveNotFound { .. }))
    ));
}

#[test]
fn base_market_is_not_modified() {
    let market = full_market();
    let cf = five_year_cash_flow();
    let before = price_cash_flow(&cf, &market).unwrap();

    FiniteDifferenceCalculator::new(DifferenceMode::Forward, 0.01)
        .curve_sensitivity(
            &cf,
            &market,
            &CurveSelector::Discounting(Currency::EUR),
            &[1.0, 5.0, 10.0],
            &price_cash_flow,
        )
        .unwrap();

    assert_eq!(price_cash_flow(&cf, &market).unwrap(), before);
}

// =============================================================================
// Execution
// =============================================================================

fn portfolio() -> Vec<FixedCashFlow> {
    (1..=20)
        .map(|i| FixedCashFlow {
            currency: Currency::EUR,
            time: f64::from(i) * 0.5,
            amount: 1_000.0 * f64::from(i),
        })
        .collect()
}

fn price_portfolio(
    flows: &[FixedCashFlow],
    market: &dyn MulticurveProvider,
) -> CurveResult<MultipleCurrencyAmount> {
    flows.iter().try_fold(MultipleCurrencyAmount::new(), |acc, cf| {
        Ok(acc + price_cash_flow(cf, market)?)
    })
}

#[test]
fn parallel_matches_sequential() {
    let market = full_market();
    let flows = portfolio();
    let nodes: Vec<f64> = flows.iter().map(|cf| cf.time).collect();
    let selector = CurveSelector::Discounting(Currency::EUR);

    let sequential = FiniteDifferenceCalculator::new(DifferenceMode::Central, 1e-6)
        .curve_sensitivity(flows.as_slice(), &market, &selector, &nodes, &price_portfolio)
        .unwrap();
    let parallel = FiniteDifferenceCalculator::new(DifferenceMode::Central, 1e-6)
        .with_parallel(true)
        .with_min_parallel_nodes(4)
        .curve_sensitivity(flows.as_slice(), &market, &selector, &nodes, &price_portfolio)
        .unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn cancelled_token_stops_before_any_pricing() {
    let market = full_market();
    let cf = five_year_cash_flow();
    let calls = AtomicUsize::new(0);
    let pricer = |cf: &FixedCashFlow, m: &dyn MulticurveProvider| {
        calls.fetch_add(1, Ordering::SeqCst);
        price_cash_flow(cf, m)
    };

    let token = CancellationToken::new();
    token.cancel();

    for mode in DifferenceMode::ALL {
        let err = FiniteDifferenceCalculator::new(mode, 1e-4)
            .curve_sensitivity_with_cancel(
                &cf,
                &market,
                &CurveSelector::Discounting(Currency::EUR),
                &[1.0, 5.0],
                &pricer,
                &token,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RiskError::Cancelled {
                completed: 0,
                total: 2
            }
        ));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn cancellation_between_nodes_returns_no_partial_result() {
    let market = full_market();
    let cf = five_year_cash_flow();
    let token = CancellationToken::new();
    let calls = AtomicUsize::new(0);
    let remote = token.clone();
    let pricer = |cf: &FixedCashFlow, m: &dyn MulticurveProvider| {
        // Central mode prices twice per node; cancel while pricing the second node
        if calls.fetch_add(1, Ordering::SeqCst) == 2 {
            remote.cancel();
        }
        price_cash_flow(cf, m)
    };

    let err = SensitivityRequest::builder()
        .instrument(&cf)
        .market(&market)
        .selector(CurveSelector::Discounting(Currency::EUR))
        .node_times(&[1.0, 2.0, 3.0, 5.0, 7.0])
        .pricer(&pricer)
        .cancellation(token)
        .build()
        .unwrap()
        .compute()
        .unwrap_err();

    assert!(matches!(
        err,
        RiskError::Cancelled {
            completed: 2,
            total: 5
        }
    ));
}

#[test]
fn detailed_result_pairs_nodes_with_values() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let market = full_market();
    let flows = portfolio();
    let nodes = [0.5, 5.0, 10.0];

    let detailed = SensitivityRequest::builder()
        .instrument(flows.as_slice())
        .market(&market)
        .selector(CurveSelector::Discounting(Currency::EUR))
        .node_times(&nodes)
        .pricer(&price_portfolio)
        .mode(DifferenceMode::Forward)
        .bump_size(1e-6)
        .build()
        .unwrap()
        .compute_detailed()
        .unwrap();

    assert_eq!(detailed.len(), 3);
    assert_eq!(detailed.currency(), Currency::EUR);
    assert_eq!(detailed.mode(), DifferenceMode::Forward);
    assert_eq!(detailed.curve(), "EUR discounting");
    assert!(detailed.all_finite());
    assert!(detailed.values().iter().all(|v| *v < 0.0));

    let (t, v) = detailed.pairs().nth(1).unwrap();
    assert_eq!(t, 5.0);
    assert_eq!(detailed.at(5.0), Some(v));
}

#[test]
fn config_file_drives_the_request() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "mode = \"backward\"\nbump_size = 1e-5\nparallel = true\nmin_parallel_nodes = 2"
    )
    .unwrap();
    let config = SensitivityConfig::from_toml_file(file.path()).unwrap();

    let market = full_market();
    let cf = five_year_cash_flow();
    let request = SensitivityRequest::builder()
        .instrument(&cf)
        .market(&market)
        .selector(CurveSelector::Discounting(Currency::EUR))
        .node_times(&[3.0, 5.0, 7.0])
        .pricer(&price_cash_flow)
        .config(config)
        .build()
        .unwrap();

    assert_eq!(request.calculator().mode(), DifferenceMode::Backward);
    assert!(request.calculator().is_parallel());
    let values = request.compute().unwrap();
    assert_eq!(values[0], 0.0);
    assert!(values[1] < 0.0);
    assert_eq!(values[2], 0.0);
}

// =============================================================================
// Property-based tests
// =============================================================================

const GRID: [f64; 7] = [0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0];

proptest! {
    #[test]
    fn one_value_per_node_in_order(
        nodes in proptest::sample::subsequence(GRID.to_vec(), 1..=GRID.len()),
        bump in 1e-6f64..1e-3,
    ) {
        let market = full_market();
        let flows = portfolio();
        let values = FiniteDifferenceCalculator::new(DifferenceMode::Central, bump)
            .curve_sensitivity(
                flows.as_slice(),
                &market,
                &CurveSelector::Discounting(Currency::EUR),
                &nodes,
                &price_portfolio,
            )
            .unwrap();

        prop_assert_eq!(values.len(), nodes.len());
        for (node, value) in nodes.iter().zip(&values) {
            let single = FiniteDifferenceCalculator::new(DifferenceMode::Central, bump)
                .curve_sensitivity(
                    flows.as_slice(),
                    &market,
                    &CurveSelector::Discounting(Currency::EUR),
                    &[*node],
                    &price_portfolio,
                )
                .unwrap();
            prop_assert_eq!(single[0], *value);
        }
    }

    #[test]
    fn permuting_nodes_permutes_results(
        nodes in Just(GRID.to_vec()).prop_shuffle(),
    ) {
        let market = full_market();
        let flows = portfolio();
        let selector = CurveSelector::Discounting(Currency::EUR);
        let calculator = FiniteDifferenceCalculator::new(DifferenceMode::Forward, 1e-6);

        let reference = calculator
            .curve_sensitivity(flows.as_slice(), &market, &selector, &GRID, &price_portfolio)
            .unwrap();
        let shuffled = calculator
            .curve_sensitivity(flows.as_slice(), &market, &selector, &nodes, &price_portfolio)
            .unwrap();

        for (node, value) in nodes.iter().zip(&shuffled) {
            let i = GRID.iter().position(|t| t == node).unwrap();
            prop_assert_eq!(reference[i], *value);
        }
    }
}
