//! Solving an annuity for its periodic rate
//!
//! No closed form exists, so the rate is bracketed on
//! [`ANNUITY_RATE_BRACKET`] and bisected until the implied value is within
//! tolerance of the target. A target outside what the bracket can produce
//! comes back as a best-effort estimate, never an error.

use super::{future_value_factor, present_value_factor, AnnuityTiming};
use crate::error::{FinanceError, Result};
use crate::solver::{bisect, RootOutcome, SolverConfig};

/// Search interval for the periodic rate
pub const ANNUITY_RATE_BRACKET: (f64, f64) = (0.0001, 1.0);

fn validate_periods(periods: f64) -> Result<()> {
    if periods <= 0.0 || !periods.is_finite() {
        return Err(FinanceError::invalid_term(format!(
            "annuity needs a positive number of periods, got {periods}"
        )));
    }
    Ok(())
}

/// Rate at which `periods` payments of `payment` are worth `present_value` today
pub fn rate_from_present(present_value: f64, payment: f64, periods: f64, timing: AnnuityTiming) -> Result<RootOutcome> {
    rate_from_present_with(present_value, payment, periods, timing, &SolverConfig::default())
}

/// [`rate_from_present`] with an explicit solver configuration
pub fn rate_from_present_with(
    present_value: f64,
    payment: f64,
    periods: f64,
    timing: AnnuityTiming,
    config: &SolverConfig,
) -> Result<RootOutcome> {
    validate_periods(periods)?;

    // PV falls as the rate rises: an implied PV above target means the rate is too low
    let residual = |rate: f64| {
        payment * timing.payment_factor(rate) * present_value_factor(rate, periods) - present_value
    };

    Ok(bisect(residual, ANNUITY_RATE_BRACKET, config))
}

/// Rate at which `periods` payments of `payment` accumulate to `future_value`
pub fn rate_from_future(future_value: f64, payment: f64, periods: f64, timing: AnnuityTiming) -> Result<RootOutcome> {
    rate_from_future_with(future_value, payment, periods, timing, &SolverConfig::default())
}

/// [`rate_from_future`] with an explicit solver configuration
pub fn rate_from_future_with(
    future_value: f64,
    payment: f64,
    periods: f64,
    timing: AnnuityTiming,
    config: &SolverConfig,
) -> Result<RootOutcome> {
    validate_periods(periods)?;

    // FV rises with the rate: an implied FV below target means the rate is too low
    let residual = |rate: f64| {
        future_value - payment * timing.payment_factor(rate) * future_value_factor(rate, periods)
    };

    Ok(bisect(residual, ANNUITY_RATE_BRACKET, config))
}
