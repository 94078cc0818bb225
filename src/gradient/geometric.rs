//! Geometric gradient: each installment grows by a constant rate
//!
//! When the effective rate equals the growth rate the closed forms degenerate
//! to 0/0 and the L'Hôpital limits are used instead:
//! `PV = C1·n/(1+r)` and `FV = C1·n·(1+r)^(n-1)`.

use super::{CapitalizationSystem, GradientSeriesResult, Installment, SeriesTerms};
use crate::error::{growth_factor, nonzero, Result};

/// Rates closer than this are treated as equal
const RATE_EQUALITY_EPSILON: f64 = 1e-12;

fn installments(initial_payment: f64, growth_rate: f64, periods: u32) -> Vec<Installment> {
    (1..=periods)
        .map(|period_number| Installment {
            period_number,
            amount: initial_payment * (1.0 + growth_rate).powi(period_number as i32 - 1),
        })
        .collect()
}

fn rates_coincide(rate: f64, growth_rate: f64) -> bool {
    (rate - growth_rate).abs() < RATE_EQUALITY_EPSILON
}

/// Value today of a unit first installment
fn present_factor(rate: f64, growth_rate: f64, n: i32) -> f64 {
    if rates_coincide(rate, growth_rate) {
        return n as f64 / (1.0 + rate);
    }
    (1.0 - ((1.0 + growth_rate) / (1.0 + rate)).powi(n)) / (rate - growth_rate)
}

/// Value at period `n` of a unit first installment
fn future_factor(rate: f64, growth_rate: f64, n: i32) -> f64 {
    if rates_coincide(rate, growth_rate) {
        return n as f64 * (1.0 + rate).powi(n - 1);
    }
    ((1.0 + rate).powi(n) - (1.0 + growth_rate).powi(n)) / (rate - growth_rate)
}

/// Series growing at `growth_rate` per period, with PV and FV each from its own closed form
pub fn geometric_gradient(
    initial_payment: f64,
    growth_rate: f64,
    periods: u32,
    rate: f64,
    capitalization: CapitalizationSystem,
) -> Result<GradientSeriesResult> {
    const OP: &str = "geometric_gradient";
    let terms = SeriesTerms::new(OP, periods, rate, capitalization)?;
    growth_factor(OP, growth_rate)?;
    let r = terms.effective_rate;

    let present_value = initial_payment * present_factor(r, growth_rate, terms.exponent);
    let future_value = initial_payment * future_factor(r, growth_rate, terms.exponent);

    Ok(terms.into_result(
        initial_payment,
        growth_rate,
        present_value,
        future_value,
        installments(initial_payment, growth_rate, periods),
    ))
}

/// First installment of a series growing at `growth_rate` that is worth `present_value`
pub fn geometric_initial_from_present(
    present_value: f64,
    growth_rate: f64,
    periods: u32,
    rate: f64,
    capitalization: CapitalizationSystem,
) -> Result<f64> {
    const OP: &str = "geometric_initial_from_present";
    let terms = SeriesTerms::new(OP, periods, rate, capitalization)?;
    growth_factor(OP, growth_rate)?;

    let factor = present_factor(terms.effective_rate, growth_rate, terms.exponent);
    Ok(present_value / nonzero(OP, "present value factor", factor)?)
}

/// First installment of a series growing at `growth_rate` that accumulates to `future_value`
pub fn geometric_initial_from_future(
    future_value: f64,
    growth_rate: f64,
    periods: u32,
    rate: f64,
    capitalization: CapitalizationSystem,
) -> Result<f64> {
    const OP: &str = "geometric_initial_from_future";
    let terms = SeriesTerms::new(OP, periods, rate, capitalization)?;
    growth_factor(OP, growth_rate)?;

    let factor = future_factor(terms.effective_rate, growth_rate, terms.exponent);
    Ok(future_value / nonzero(OP, "accumulation factor", factor)?)
}
