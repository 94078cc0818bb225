//! Internal Rate of Return (IRR) calculation
//!
//! The IRR is the periodic rate at which the NPV of a cash-flow series is
//! zero. Newton-Raphson runs first; when it stalls or runs out of budget the
//! search falls back to bisection on [`IRR_FALLBACK_BRACKET`].

use super::{npv_unchecked, CashFlow};
use crate::error::{FinanceError, Result};
use crate::solver::{bisect, newton_raphson, RootOutcome, SolverConfig};

/// Newton-Raphson starting rate
pub const IRR_SEED: f64 = 0.10;

/// Half-width of the central difference used for dNPV/drate
pub const IRR_DERIVATIVE_STEP: f64 = 1e-4;

/// Bracket for the bisection fallback (-99% to 200% per period)
pub const IRR_FALLBACK_BRACKET: (f64, f64) = (-0.99, 2.0);

/// An IRR exists only if some flow is strictly negative and some strictly positive
fn check_sign_change(flows: &[CashFlow]) -> Result<()> {
    let has_negative = flows.iter().any(|cf| cf.value < 0.0);
    let has_positive = flows.iter().any(|cf| cf.value > 0.0);
    if !has_negative || !has_positive {
        return Err(FinanceError::NoSignChange);
    }
    Ok(())
}

/// IRR using the default solver configuration
pub fn internal_rate_of_return(flows: &[CashFlow]) -> Result<RootOutcome> {
    internal_rate_of_return_with(flows, &SolverConfig::default())
}

/// IRR with an explicit solver configuration
pub fn internal_rate_of_return_with(flows: &[CashFlow], config: &SolverConfig) -> Result<RootOutcome> {
    check_sign_change(flows)?;

    let npv = |rate: f64| npv_unchecked(flows, rate);

    let newton = newton_raphson(npv, IRR_SEED, IRR_DERIVATIVE_STEP, config);
    if let Some(outcome @ RootOutcome::Converged { .. }) = newton {
        return Ok(outcome);
    }

    log::debug!("IRR Newton-Raphson did not converge ({:?}), falling back to bisection", newton);

    // Bisection wants a positive residual when the root is above the midpoint.
    // For an investment-then-returns profile NPV falls with the rate and already
    // has that shape; otherwise flip it.
    let orientation = if npv(IRR_FALLBACK_BRACKET.0) >= 0.0 { 1.0 } else { -1.0 };
    let fallback = bisect(|rate| orientation * npv(rate), IRR_FALLBACK_BRACKET, config);

    let best = match (newton, fallback) {
        (_, RootOutcome::Converged { .. }) => fallback,
        (Some(estimate), _) if npv(estimate.value()).abs() < npv(fallback.value()).abs() => estimate,
        _ => fallback,
    };
    Ok(best)
}

/// Newton-Raphson only, no bisection fallback.
///
/// `Ok(None)` when the derivative vanishes before a root is found.
pub fn internal_rate_of_return_newton(flows: &[CashFlow], config: &SolverConfig) -> Result<Option<RootOutcome>> {
    check_sign_change(flows)?;
    Ok(newton_raphson(
        |rate| npv_unchecked(flows, rate),
        IRR_SEED,
        IRR_DERIVATIVE_STEP,
        config,
    ))
}

/// Convert a periodic rate to the effective rate over `periods_per_year` periods
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powf(periods_per_year as f64) - 1.0
}
