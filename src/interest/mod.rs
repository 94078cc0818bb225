//! Simple and compound interest
//!
//! Closed-form solvers for future value, rate and time. Every function is
//! O(1); the only failures are domain violations.

mod growth;
mod time;

pub use growth::{compare_growth, GrowthPath, GrowthSystem};
pub use time::TimeSpan;

use serde::{Deserialize, Serialize};

use crate::error::{growth_factor, nonzero, positive_log_arg, FinanceError, Result};

/// Simple interest summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub capital: f64,
    pub rate: f64,
    pub time: f64,
    pub future_value: f64,
    pub interest_earned: f64,
}

/// Compound interest summary (one compounding per period)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub capital: f64,
    pub rate: f64,
    pub periods: f64,
    pub future_value: f64,
    pub total_interest: f64,
}

/// Compounding frequency within one nominal rate period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    #[default]
    Annual,
    Semiannual,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    /// Compoundings per nominal period
    pub fn per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::Semiannual => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

/// F = P(1 + i·t)
pub fn future_value_simple(capital: f64, rate: f64, time: f64) -> f64 {
    capital * (1.0 + rate * time)
}

/// i = (F - P) / (P·t)
pub fn rate_simple(capital: f64, future_value: f64, time: f64) -> Result<f64> {
    let denominator = nonzero("rate_simple", "capital x time", capital * time)?;
    Ok((future_value - capital) / denominator)
}

/// t = (F - P) / (P·i)
pub fn time_simple(capital: f64, future_value: f64, rate: f64) -> Result<f64> {
    let denominator = nonzero("time_simple", "capital x rate", capital * rate)?;
    Ok((future_value - capital) / denominator)
}

/// Simple interest earned together with the resulting amount
pub fn simple_interest(capital: f64, rate: f64, time: f64) -> SimpleInterestResult {
    let interest_earned = capital * rate * time;
    SimpleInterestResult {
        capital,
        rate,
        time,
        future_value: capital + interest_earned,
        interest_earned,
    }
}

/// F = P(1 + i/m)^(n·m)
pub fn future_value_compound(capital: f64, rate: f64, periods: f64, frequency: u32) -> Result<f64> {
    let m = frequency_as_f64("future_value_compound", frequency)?;
    let factor = growth_factor("future_value_compound", rate / m)?;
    Ok(capital * factor.powf(periods * m))
}

/// i = m·((F/P)^(1/(n·m)) - 1)
pub fn rate_compound(capital: f64, future_value: f64, periods: f64, frequency: u32) -> Result<f64> {
    let m = frequency_as_f64("rate_compound", frequency)?;
    nonzero("rate_compound", "capital", capital)?;
    let exponent_base = nonzero("rate_compound", "periods x frequency", periods * m)?;

    let ratio = future_value / capital;
    if ratio < 0.0 {
        return Err(FinanceError::domain(
            "rate_compound",
            format!("future value and capital have opposite signs (ratio {ratio})"),
        ));
    }

    Ok(m * (ratio.powf(1.0 / exponent_base) - 1.0))
}

/// n = ln(F/P) / (m·ln(1 + i/m))
pub fn time_compound(capital: f64, future_value: f64, rate: f64, frequency: u32) -> Result<f64> {
    let m = frequency_as_f64("time_compound", frequency)?;
    nonzero("time_compound", "capital", capital)?;

    let numerator = positive_log_arg("time_compound", "future value / capital", future_value / capital)?;
    let log_growth = positive_log_arg("time_compound", "1 + rate / frequency", 1.0 + rate / m)?;
    let denominator = nonzero("time_compound", "frequency x ln(1 + rate / frequency)", m * log_growth)?;

    Ok(numerator / denominator)
}

/// Compound interest earned with one compounding per period
pub fn compound_interest(capital: f64, rate: f64, periods: f64) -> Result<CompoundInterestResult> {
    let future_value = future_value_compound(capital, rate, periods, 1)?;
    Ok(CompoundInterestResult {
        capital,
        rate,
        periods,
        future_value,
        total_interest: future_value - capital,
    })
}

/// F = P·e^(i·t)
pub fn future_value_continuous(capital: f64, rate: f64, time: f64) -> f64 {
    capital * (rate * time).exp()
}

fn frequency_as_f64(operation: &'static str, frequency: u32) -> Result<f64> {
    if frequency == 0 {
        return Err(FinanceError::domain(operation, "compounding frequency must be at least 1"));
    }
    Ok(frequency as f64)
}

/// Which unknown an interest calculation solves for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum InterestQuery {
    SimpleFutureValue { capital: f64, rate: f64, time: f64 },
    SimpleRate { capital: f64, future_value: f64, time: f64 },
    SimpleTime { capital: f64, future_value: f64, rate: f64 },
    CompoundFutureValue { capital: f64, rate: f64, periods: f64, frequency: u32 },
    CompoundRate { capital: f64, future_value: f64, periods: f64, frequency: u32 },
    CompoundTime { capital: f64, future_value: f64, rate: f64, frequency: u32 },
}

impl InterestQuery {
    /// Solve for the unknown this query names
    pub fn solve(&self) -> Result<f64> {
        match *self {
            InterestQuery::SimpleFutureValue { capital, rate, time } => {
                Ok(future_value_simple(capital, rate, time))
            }
            InterestQuery::SimpleRate { capital, future_value, time } => {
                rate_simple(capital, future_value, time)
            }
            InterestQuery::SimpleTime { capital, future_value, rate } => {
                time_simple(capital, future_value, rate)
            }
            InterestQuery::CompoundFutureValue { capital, rate, periods, frequency } => {
                future_value_compound(capital, rate, periods, frequency)
            }
            InterestQuery::CompoundRate { capital, future_value, periods, frequency } => {
                rate_compound(capital, future_value, periods, frequency)
            }
            InterestQuery::CompoundTime { capital, future_value, rate, frequency } => {
                time_compound(capital, future_value, rate, frequency)
            }
        }
    }
}
