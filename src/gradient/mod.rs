//! Gradient payment series
//!
//! Two families of growing payment streams over `n` periods:
//! - **Arithmetic**: `installment_i = C1 + (i-1)·G`
//! - **Geometric**: `installment_i = C1·(1+g)^(i-1)`
//!
//! # Capitalization
//!
//! The nominal periodic rate is first converted to an effective rate for the
//! chosen [`CapitalizationSystem`], `r_eff = (1+r)^(1/k) - 1`. Every present
//! and future value in a [`GradientSeriesResult`] is computed at `r_eff`, so
//! `future_value = present_value·(1+r_eff)^n`.
//!
//! # IRR
//!
//! Each result carries the IRR of the flows `-PV` at period 0 followed by the
//! installments. This path runs Newton-Raphson only; a stalled search yields
//! `None` rather than a bisection estimate.

mod arithmetic;
mod geometric;

pub use arithmetic::{
    arithmetic_gradient_future, arithmetic_gradient_present, arithmetic_initial_from_future,
    arithmetic_initial_from_present,
};
pub use geometric::{geometric_gradient, geometric_initial_from_future, geometric_initial_from_present};

use serde::{Deserialize, Serialize};

use crate::cashflow::{internal_rate_of_return_newton, CashFlow};
use crate::error::{growth_factor, period_exponent, FinanceError, Result};
use crate::solver::{RootOutcome, SolverConfig};

/// How often interest capitalizes relative to the monthly base period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalizationSystem {
    #[default]
    #[serde(alias = "mensual")]
    Monthly,
    #[serde(alias = "trimestral")]
    Quarterly,
    #[serde(alias = "semestral")]
    Semiannual,
    #[serde(alias = "anual")]
    Annual,
}

impl CapitalizationSystem {
    /// Base periods per capitalization period (`k`)
    pub fn periods_per_capitalization(&self) -> u32 {
        match self {
            CapitalizationSystem::Monthly => 1,
            CapitalizationSystem::Quarterly => 3,
            CapitalizationSystem::Semiannual => 6,
            CapitalizationSystem::Annual => 12,
        }
    }

    /// `(1+r)^(1/k) - 1`; the monthly base case returns `rate` untouched
    pub fn effective_rate(&self, rate: f64) -> f64 {
        match self.periods_per_capitalization() {
            1 => rate,
            k => (1.0 + rate).powf(1.0 / k as f64) - 1.0,
        }
    }
}

/// One payment of a gradient series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based
    pub period_number: u32,
    pub amount: f64,
}

/// A generated series with its values at the effective rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSeriesResult {
    pub initial_payment: f64,
    /// Constant increment (arithmetic) or growth rate (geometric)
    pub gradient: f64,
    pub periods: u32,
    /// Nominal rate as supplied
    pub periodic_rate: f64,
    /// Rate after the capitalization adjustment
    pub effective_rate: f64,
    pub present_value: f64,
    pub future_value: f64,
    pub installments: Vec<Installment>,
    pub internal_rate_of_return: Option<RootOutcome>,
    pub capitalization_system: CapitalizationSystem,
}

/// Inputs shared by every gradient calculation, validated once
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeriesTerms {
    pub periods: u32,
    /// `periods` as a `powi` exponent
    pub exponent: i32,
    pub periodic_rate: f64,
    pub effective_rate: f64,
    pub capitalization: CapitalizationSystem,
}

impl SeriesTerms {
    pub(crate) fn new(
        operation: &'static str,
        periods: u32,
        rate: f64,
        capitalization: CapitalizationSystem,
    ) -> Result<Self> {
        if periods == 0 {
            return Err(FinanceError::invalid_term("gradient series needs at least one period"));
        }
        let exponent = period_exponent(periods)?;
        growth_factor(operation, rate)?;

        Ok(Self {
            periods,
            exponent,
            periodic_rate: rate,
            effective_rate: capitalization.effective_rate(rate),
            capitalization,
        })
    }

    /// `(1+r_eff)^n`
    pub(crate) fn accumulation(&self) -> f64 {
        (1.0 + self.effective_rate).powi(self.exponent)
    }

    pub(crate) fn into_result(
        self,
        initial_payment: f64,
        gradient: f64,
        present_value: f64,
        future_value: f64,
        installments: Vec<Installment>,
    ) -> GradientSeriesResult {
        let internal_rate_of_return = series_irr(present_value, &installments);
        GradientSeriesResult {
            initial_payment,
            gradient,
            periods: self.periods,
            periodic_rate: self.periodic_rate,
            effective_rate: self.effective_rate,
            present_value,
            future_value,
            installments,
            internal_rate_of_return,
            capitalization_system: self.capitalization,
        }
    }
}

/// IRR of investing `present_value` at period 0 and receiving the installments
fn series_irr(present_value: f64, installments: &[Installment]) -> Option<RootOutcome> {
    let flows: Vec<CashFlow> = std::iter::once(CashFlow::new(0, -present_value))
        .chain(
            installments
                .iter()
                .map(|inst| CashFlow::new(inst.period_number, inst.amount)),
        )
        .collect();

    match internal_rate_of_return_newton(&flows, &SolverConfig::default()) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::debug!("Gradient series has no IRR: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_rate_monthly_is_identity() {
        assert_eq!(CapitalizationSystem::Monthly.effective_rate(0.0137), 0.0137);
    }

    #[test]
    fn test_effective_rate_compounds_back() {
        for system in [
            CapitalizationSystem::Quarterly,
            CapitalizationSystem::Semiannual,
            CapitalizationSystem::Annual,
        ] {
            let k = system.periods_per_capitalization() as i32;
            let effective = system.effective_rate(0.12);
            assert_relative_eq!((1.0 + effective).powi(k), 1.12, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_capitalization_from_spanish_names() {
        let system: CapitalizationSystem = serde_json::from_str(r#""trimestral""#).unwrap();
        assert_eq!(system, CapitalizationSystem::Quarterly);
        let system: CapitalizationSystem = serde_json::from_str(r#""anual""#).unwrap();
        assert_eq!(system, CapitalizationSystem::Annual);
    }

    #[test]
    fn test_terms_validation() {
        assert!(matches!(
            SeriesTerms::new("test", 0, 0.01, CapitalizationSystem::Monthly),
            Err(FinanceError::InvalidTerm { .. })
        ));
        assert!(matches!(
            SeriesTerms::new("test", 12, -1.0, CapitalizationSystem::Monthly),
            Err(FinanceError::Domain { .. })
        ));
        assert!(matches!(
            SeriesTerms::new("test", u32::MAX, 0.01, CapitalizationSystem::Monthly),
            Err(FinanceError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_series_irr_without_sign_change() {
        let installments = vec![Installment { period_number: 1, amount: 100.0 }];
        assert!(series_irr(-50.0, &installments).is_none());
    }
}
