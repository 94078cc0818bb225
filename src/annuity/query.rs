//! One closed enumeration over the annuity unknowns

use serde::{Deserialize, Serialize};

use super::{
    future_value, payment_from_future, payment_from_present, periods_from_future, periods_from_present,
    present_value, rate_from_future, rate_from_present, AnnuityTiming,
};
use crate::error::Result;

/// Which annuity quantity to solve for, with the known inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum AnnuityQuery {
    PresentValue { payment: f64, rate: f64, periods: f64 },
    FutureValue { payment: f64, rate: f64, periods: f64 },
    PaymentFromPresent { present_value: f64, rate: f64, periods: f64 },
    PaymentFromFuture { future_value: f64, rate: f64, periods: f64 },
    PeriodsFromPresent { present_value: f64, payment: f64, rate: f64 },
    PeriodsFromFuture { future_value: f64, payment: f64, rate: f64 },
    RateFromPresent { present_value: f64, payment: f64, periods: f64 },
    RateFromFuture { future_value: f64, payment: f64, periods: f64 },
}

/// Solved quantity; `converged` is false only for a best-effort rate estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityAnswer {
    pub value: f64,
    pub converged: bool,
}

impl AnnuityAnswer {
    fn exact(value: f64) -> Self {
        Self { value, converged: true }
    }
}

impl AnnuityQuery {
    pub fn solve(&self, timing: AnnuityTiming) -> Result<AnnuityAnswer> {
        let answer = match *self {
            AnnuityQuery::PresentValue { payment, rate, periods } => {
                AnnuityAnswer::exact(present_value(payment, rate, periods, timing)?)
            }
            AnnuityQuery::FutureValue { payment, rate, periods } => {
                AnnuityAnswer::exact(future_value(payment, rate, periods, timing)?)
            }
            AnnuityQuery::PaymentFromPresent { present_value, rate, periods } => {
                AnnuityAnswer::exact(payment_from_present(present_value, rate, periods, timing)?)
            }
            AnnuityQuery::PaymentFromFuture { future_value, rate, periods } => {
                AnnuityAnswer::exact(payment_from_future(future_value, rate, periods, timing)?)
            }
            AnnuityQuery::PeriodsFromPresent { present_value, payment, rate } => {
                AnnuityAnswer::exact(periods_from_present(present_value, payment, rate, timing)?)
            }
            AnnuityQuery::PeriodsFromFuture { future_value, payment, rate } => {
                AnnuityAnswer::exact(periods_from_future(future_value, payment, rate, timing)?)
            }
            AnnuityQuery::RateFromPresent { present_value, payment, periods } => {
                let outcome = rate_from_present(present_value, payment, periods, timing)?;
                AnnuityAnswer {
                    value: outcome.value(),
                    converged: outcome.is_converged(),
                }
            }
            AnnuityQuery::RateFromFuture { future_value, payment, periods } => {
                let outcome = rate_from_future(future_value, payment, periods, timing)?;
                AnnuityAnswer {
                    value: outcome.value(),
                    converged: outcome.is_converged(),
                }
            }
        };
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_form_queries_are_exact() {
        let answer = AnnuityQuery::PresentValue {
            payment: 1_000_000.0,
            rate: 0.05,
            periods: 10.0,
        }
        .solve(AnnuityTiming::Ordinary)
        .unwrap();

        assert!(answer.converged);
        assert!((answer.value - 7_721_734.93).abs() < 0.01);
    }

    #[test]
    fn test_rate_query_flags_approximation() {
        let answer = AnnuityQuery::RateFromPresent {
            present_value: 5_000.0,
            payment: 100.0,
            periods: 10.0,
        }
        .solve(AnnuityTiming::Ordinary)
        .unwrap();

        assert!(!answer.converged);
    }

    #[test]
    fn test_query_propagates_domain_error() {
        let result = AnnuityQuery::PeriodsFromPresent {
            present_value: 100_000.0,
            payment: 1_000.0,
            rate: 0.05,
        }
        .solve(AnnuityTiming::Ordinary);

        assert!(result.is_err());
    }

    #[test]
    fn test_query_from_json() {
        let query: AnnuityQuery =
            serde_json::from_str(r#"{"solve_for":"payment_from_future","future_value":1200.0,"rate":0.0,"periods":12.0}"#)
                .unwrap();
        let answer = query.solve(AnnuityTiming::Due).unwrap();
        assert_eq!(answer.value, 100.0);
    }
}
