//! Error types for the financial calculation engine
//!
//! Every domain violation is reported as a specific [`FinanceError`] variant.
//! Non-convergent root searches are not errors; they come back as
//! [`crate::solver::RootOutcome::MaxIterationsReached`].

use thiserror::Error;

/// Result type alias using [`FinanceError`]
pub type Result<T> = std::result::Result<T, FinanceError>;

/// Unified error type for all engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    /// Mathematically undefined operation (division by zero, log of a non-positive number)
    #[error("Domain error in {operation}: {reason}")]
    Domain {
        operation: &'static str,
        reason: String,
    },

    /// Non-positive period count or negative rate
    #[error("Invalid term: {reason}")]
    InvalidTerm { reason: String },

    /// Grace periods cover the whole term
    #[error("Grace periods ({grace_periods}) must be fewer than the total term ({total_term})")]
    InvalidGracePeriod { grace_periods: u32, total_term: u32 },

    /// Cash-flow series lacks a strictly negative or a strictly positive value
    #[error("Cash flows need at least one negative and one positive value for an IRR to exist")]
    NoSignChange,
}

impl FinanceError {
    /// Create a domain error
    pub fn domain(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Domain {
            operation,
            reason: reason.into(),
        }
    }

    /// Create an invalid term error
    pub fn invalid_term(reason: impl Into<String>) -> Self {
        Self::InvalidTerm {
            reason: reason.into(),
        }
    }
}

/// Fail with a domain error unless `denominator` is non-zero
pub(crate) fn nonzero(operation: &'static str, what: &str, denominator: f64) -> Result<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(FinanceError::domain(
            operation,
            format!("division by zero ({what} is {denominator})"),
        ));
    }
    Ok(denominator)
}

/// Fail with a domain error unless `argument` is a valid logarithm argument
pub(crate) fn positive_log_arg(operation: &'static str, what: &str, argument: f64) -> Result<f64> {
    if argument <= 0.0 || argument.is_nan() {
        return Err(FinanceError::domain(
            operation,
            format!("logarithm of non-positive {what} ({argument})"),
        ));
    }
    Ok(argument.ln())
}

/// Fail with a domain error when `1 + rate` is not positive
pub(crate) fn growth_factor(operation: &'static str, rate: f64) -> Result<f64> {
    let factor = 1.0 + rate;
    if factor <= 0.0 || factor.is_nan() {
        return Err(FinanceError::domain(
            operation,
            format!("rate {rate} is at or below -100%"),
        ));
    }
    Ok(factor)
}

/// Period count as an integer exponent for `powi`
pub(crate) fn period_exponent(periods: u32) -> Result<i32> {
    i32::try_from(periods).map_err(|_| {
        FinanceError::invalid_term(format!("{periods} periods exceeds the supported maximum of {}", i32::MAX))
    })
}
