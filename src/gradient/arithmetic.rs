//! Arithmetic gradient: each installment grows by a constant amount

use super::{CapitalizationSystem, GradientSeriesResult, Installment, SeriesTerms};
use crate::error::{nonzero, Result};

fn installments(initial_payment: f64, gradient: f64, periods: u32) -> Vec<Installment> {
    (1..=periods)
        .map(|period_number| Installment {
            period_number,
            amount: initial_payment + (period_number - 1) as f64 * gradient,
        })
        .collect()
}

/// Below this the closed forms cancel catastrophically and the factors are summed directly
const SMALL_RATE: f64 = 1e-4;

/// Present-value factors `(a, g)` with `PV = C1·a + G·g`
fn present_factors(rate: f64, periods: u32) -> (f64, f64) {
    if rate.abs() < SMALL_RATE {
        return (1..=periods).fold((0.0, 0.0), |(a, g), t| {
            let discount = (1.0 + rate).powf(-(t as f64));
            (a + discount, g + (t - 1) as f64 * discount)
        });
    }
    let n = periods as f64;
    let annuity = (1.0 - (1.0 + rate).powf(-n)) / rate;
    let gradient = (annuity - n / (1.0 + rate).powf(n)) / rate;
    (annuity, gradient)
}

/// Future-value factors `(s, h)` with `FV = C1·s + G·h`
fn future_factors(rate: f64, periods: u32) -> (f64, f64) {
    if rate.abs() < SMALL_RATE {
        return (1..=periods).fold((0.0, 0.0), |(s, h), t| {
            let growth = (1.0 + rate).powf((periods - t) as f64);
            (s + growth, h + (t - 1) as f64 * growth)
        });
    }
    let n = periods as f64;
    let annuity = ((1.0 + rate).powf(n) - 1.0) / rate;
    let gradient = (annuity - n) / rate;
    (annuity, gradient)
}

/// Series valued from its present value; `FV = PV·(1+r_eff)^n`
pub fn arithmetic_gradient_present(
    initial_payment: f64,
    gradient: f64,
    periods: u32,
    rate: f64,
    capitalization: CapitalizationSystem,
) -> Result<GradientSeriesResult> {
    let terms = SeriesTerms::new("arithmetic_gradient_present", periods, rate, capitalization)?;
    let (a, g) = present_factors(terms.effective_rate, periods);

    let present_value = initial_payment * a + gradient * g;
    let future_value = present_value * terms.accumulation();

    Ok(terms.into_result(
        initial_payment,
        gradient,
        present_value,
        future_value,
        installments(initial_payment, gradient, periods),
    ))
}

/// Series valued directly at period `n`; `PV = FV/(1+r_eff)^n`
pub fn arithmetic_gradient_future(
    initial_payment: f64,
    gradient: f64,
    periods: u32,
    rate: f64,
    capitalization: CapitalizationSystem,
) -> Result<GradientSeriesResult> {
    let terms = SeriesTerms::new("arithmetic_gradient_future", periods, rate, capitalization)?;
    let (s, h) = future_factors(terms.effective_rate, periods);

    let future_value = initial_payment * s + gradient * h;
    let present_value = future_value / terms.accumulation();

    Ok(terms.into_result(
        initial_payment,
        gradient,
        present_value,
        future_value,
        installments(initial_payment, gradient, periods),
    ))
}

/// First installment whose series with increment `gradient` is worth `present_value`
pub fn arithmetic_initial_from_present(
    present_value: f64,
    gradient: f64,
    periods: u32,
    rate: f64,
    capitalization: CapitalizationSystem,
) -> Result<f64> {
    const OP: &str = "arithmetic_initial_from_present";
    let terms = SeriesTerms::new(OP, periods, rate, capitalization)?;
    let (a, g) = present_factors(terms.effective_rate, periods);
    Ok((present_value - gradient * g) / nonzero(OP, "annuity factor", a)?)
}

/// First installment whose series with increment `gradient` accumulates to `future_value`
pub fn arithmetic_initial_from_future(
    future_value: f64,
    gradient: f64,
    periods: u32,
    rate: f64,
    capitalization: CapitalizationSystem,
) -> Result<f64> {
    const OP: &str = "arithmetic_initial_from_future";
    let terms = SeriesTerms::new(OP, periods, rate, capitalization)?;
    let (s, h) = future_factors(terms.effective_rate, periods);
    Ok((future_value - gradient * h) / nonzero(OP, "accumulation factor", s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_installments_grow_linearly() {
        let result = arithmetic_gradient_present(1000.0, 50.0, 6, 0.02, CapitalizationSystem::Monthly).unwrap();

        assert_eq!(result.installments.len(), 6);
        assert_eq!(result.installments[0].period_number, 1);
        assert_eq!(result.installments[0].amount, 1000.0);
        assert_eq!(result.installments[5].amount, 1250.0);
    }

    #[test]
    fn test_present_value_matches_discounted_sum() {
        let result = arithmetic_gradient_present(1000.0, 50.0, 12, 0.015, CapitalizationSystem::Monthly).unwrap();
        let discounted: f64 = result
            .installments
            .iter()
            .map(|inst| inst.amount / 1.015_f64.powi(inst.period_number as i32))
            .sum();

        assert_relative_eq!(result.present_value, discounted, max_relative = 1e-10);
    }

    #[test]
    fn test_future_equals_present_accumulated() {
        for system in [CapitalizationSystem::Monthly, CapitalizationSystem::Quarterly, CapitalizationSystem::Annual] {
            let forward = arithmetic_gradient_present(500.0, -10.0, 24, 0.03, system).unwrap();
            let direct = arithmetic_gradient_future(500.0, -10.0, 24, 0.03, system).unwrap();
            let growth = (1.0 + forward.effective_rate).powi(24);

            assert_relative_eq!(forward.future_value, forward.present_value * growth, max_relative = 1e-6);
            assert_relative_eq!(direct.future_value, direct.present_value * growth, max_relative = 1e-6);
            assert_relative_eq!(direct.present_value, forward.present_value, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_zero_rate_limit() {
        let result = arithmetic_gradient_present(100.0, 10.0, 5, 0.0, CapitalizationSystem::Monthly).unwrap();
        assert_eq!(result.present_value, 100.0 * 5.0 + 10.0 * 5.0 * 4.0 / 2.0);
        assert_eq!(result.future_value, result.present_value);

        let direct = arithmetic_gradient_future(100.0, 10.0, 5, 0.0, CapitalizationSystem::Monthly).unwrap();
        assert_eq!(direct.future_value, 600.0);
    }

    #[test]
    fn test_rates_just_above_zero_match_discounted_sum() {
        for rate in [1e-12, 1e-10, 1e-8, 1e-6, 2e-4] {
            let result = arithmetic_gradient_present(100.0, 10.0, 12, rate, CapitalizationSystem::Monthly).unwrap();
            let discounted: f64 = result
                .installments
                .iter()
                .map(|inst| inst.amount / (1.0 + rate).powi(inst.period_number as i32))
                .sum();

            assert_relative_eq!(result.present_value, discounted, max_relative = 1e-9);
            assert_relative_eq!(result.present_value, 1860.0, max_relative = 1e-2);

            let direct = arithmetic_gradient_future(100.0, 10.0, 12, rate, CapitalizationSystem::Monthly).unwrap();
            assert_relative_eq!(direct.present_value, discounted, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_inverses_at_tiny_rate() {
        let rate = 1e-10;
        let result = arithmetic_gradient_present(100.0, 10.0, 12, rate, CapitalizationSystem::Monthly).unwrap();

        let from_pv =
            arithmetic_initial_from_present(result.present_value, 10.0, 12, rate, CapitalizationSystem::Monthly).unwrap();
        let from_fv =
            arithmetic_initial_from_future(result.future_value, 10.0, 12, rate, CapitalizationSystem::Monthly).unwrap();

        assert_relative_eq!(from_pv, 100.0, max_relative = 1e-9);
        assert_relative_eq!(from_fv, 100.0, max_relative = 1e-9);
    }

    #[test]
    fn test_irr_recovers_effective_rate() {
        let result = arithmetic_gradient_present(1000.0, 100.0, 12, 0.12, CapitalizationSystem::Quarterly).unwrap();
        let irr = result.internal_rate_of_return.unwrap();

        assert!(irr.is_converged());
        assert!((irr.value() - result.effective_rate).abs() < 1e-6, "{:?}", irr);
    }

    #[test]
    fn test_inverses_recover_initial_payment() {
        let result = arithmetic_gradient_present(750.0, 25.0, 18, 0.01, CapitalizationSystem::Semiannual).unwrap();

        let from_pv =
            arithmetic_initial_from_present(result.present_value, 25.0, 18, 0.01, CapitalizationSystem::Semiannual)
                .unwrap();
        let from_fv =
            arithmetic_initial_from_future(result.future_value, 25.0, 18, 0.01, CapitalizationSystem::Semiannual)
                .unwrap();

        assert_relative_eq!(from_pv, 750.0, max_relative = 1e-9);
        assert_relative_eq!(from_fv, 750.0, max_relative = 1e-9);
    }

    #[test]
    fn test_inverse_at_zero_rate() {
        let initial = arithmetic_initial_from_present(600.0, 10.0, 5, 0.0, CapitalizationSystem::Monthly).unwrap();
        assert_eq!(initial, 100.0);
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert!(arithmetic_gradient_present(100.0, 10.0, 0, 0.01, CapitalizationSystem::Monthly).is_err());
        assert!(arithmetic_initial_from_future(100.0, 10.0, 0, 0.01, CapitalizationSystem::Monthly).is_err());
    }
}
