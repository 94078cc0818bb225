//! Level annuities
//!
//! Closed forms for an ordinary annuity (payment at period end):
//! - `PV = A·(1 - (1+i)^-n)/i`
//! - `FV = A·((1+i)^n - 1)/i`
//!
//! plus their algebraic inverses for the payment and the period count. An
//! annuity due (payment at period start) is the ordinary annuity with the
//! payment scaled by `(1+i)`. At a zero rate the limits `A·n` are used.
//!
//! The rate has no closed form and is found by bisection, see
//! [`rate_from_present`] and [`rate_from_future`].

mod query;
mod rate;

pub use query::{AnnuityAnswer, AnnuityQuery};
pub use rate::{rate_from_future, rate_from_future_with, rate_from_present, rate_from_present_with, ANNUITY_RATE_BRACKET};

use serde::{Deserialize, Serialize};

use crate::error::{growth_factor, nonzero, positive_log_arg, FinanceError, Result};

/// When in each period the payment falls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnuityTiming {
    /// End of period (vencida)
    #[default]
    #[serde(alias = "vencida", alias = "ordinaria")]
    Ordinary,
    /// Start of period (anticipada)
    #[serde(alias = "anticipada")]
    Due,
}

impl AnnuityTiming {
    /// Multiplier turning a payment into its ordinary-annuity equivalent
    pub fn payment_factor(&self, rate: f64) -> f64 {
        match self {
            AnnuityTiming::Ordinary => 1.0,
            AnnuityTiming::Due => 1.0 + rate,
        }
    }
}

/// `(1 - (1+i)^-n)/i`, or `n` at a zero rate. Caller guarantees `i > -1`.
pub(crate) fn present_value_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return periods;
    }
    (1.0 - (1.0 + rate).powf(-periods)) / rate
}

/// `((1+i)^n - 1)/i`, or `n` at a zero rate. Caller guarantees `i > -1`.
pub(crate) fn future_value_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return periods;
    }
    ((1.0 + rate).powf(periods) - 1.0) / rate
}

/// Present value of `periods` payments of `payment`
pub fn present_value(payment: f64, rate: f64, periods: f64, timing: AnnuityTiming) -> Result<f64> {
    growth_factor("annuity present_value", rate)?;
    Ok(payment * timing.payment_factor(rate) * present_value_factor(rate, periods))
}

/// Future value of `periods` payments of `payment`
pub fn future_value(payment: f64, rate: f64, periods: f64, timing: AnnuityTiming) -> Result<f64> {
    growth_factor("annuity future_value", rate)?;
    Ok(payment * timing.payment_factor(rate) * future_value_factor(rate, periods))
}

/// Level payment that amortizes `present_value` over `periods`
pub fn payment_from_present(present_value: f64, rate: f64, periods: f64, timing: AnnuityTiming) -> Result<f64> {
    growth_factor("annuity payment_from_present", rate)?;
    let factor = nonzero(
        "annuity payment_from_present",
        "present value factor",
        present_value_factor(rate, periods),
    )?;
    Ok(present_value / factor / timing.payment_factor(rate))
}

/// Level payment that accumulates to `future_value` over `periods`
pub fn payment_from_future(future_value: f64, rate: f64, periods: f64, timing: AnnuityTiming) -> Result<f64> {
    growth_factor("annuity payment_from_future", rate)?;
    let factor = nonzero(
        "annuity payment_from_future",
        "future value factor",
        future_value_factor(rate, periods),
    )?;
    Ok(future_value / factor / timing.payment_factor(rate))
}

/// `n = -ln(1 - PV·i/A) / ln(1+i)`
///
/// Fails with a domain error when `PV·i/A >= 1`: the payment never covers the
/// interest on the present value.
pub fn periods_from_present(present_value: f64, payment: f64, rate: f64, timing: AnnuityTiming) -> Result<f64> {
    const OP: &str = "annuity periods_from_present";
    let growth = growth_factor(OP, rate)?;
    let payment = nonzero(OP, "payment", payment * timing.payment_factor(rate))?;

    if rate == 0.0 {
        return Ok(present_value / payment);
    }

    let coverage = present_value * rate / payment;
    if coverage >= 1.0 {
        return Err(FinanceError::domain(
            OP,
            format!("payment does not cover interest (PV*rate/payment = {coverage})"),
        ));
    }

    Ok(-(1.0 - coverage).ln() / growth.ln())
}

/// `n = ln(1 + FV·i/A) / ln(1+i)`
pub fn periods_from_future(future_value: f64, payment: f64, rate: f64, timing: AnnuityTiming) -> Result<f64> {
    const OP: &str = "annuity periods_from_future";
    let growth = growth_factor(OP, rate)?;
    let payment = nonzero(OP, "payment", payment * timing.payment_factor(rate))?;

    if rate == 0.0 {
        return Ok(future_value / payment);
    }

    let log_arg = positive_log_arg(OP, "1 + FV*rate/payment", 1.0 + future_value * rate / payment)?;
    Ok(log_arg / growth.ln())
}
