//! Loan amortization schedules
//!
//! Three conventions share one loop over installments `i = 1..=term`:
//! - **French**: fixed payment, interest on the outstanding balance
//! - **German**: fixed principal, payment falls as the balance shrinks
//! - **American**: interest only, full principal repaid with the last payment
//!
//! The balance on the last row is set to exactly `0.0` rather than left with
//! floating-point residue. [`schedule_with_grace`] prefixes any of the three
//! with interest-only grace periods.

mod schedule;

pub use schedule::{AmortizationRow, ScheduleSummary};

use serde::{Deserialize, Serialize};

use crate::error::{period_exponent, FinanceError, Result};

/// Amortization convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationMethod {
    /// Fixed payment
    #[serde(alias = "frances")]
    French,
    /// Fixed principal
    #[serde(alias = "aleman")]
    German,
    /// Interest only until maturity
    #[serde(alias = "americano")]
    American,
}

impl AmortizationMethod {
    /// Build the schedule for this convention
    pub fn schedule(&self, principal: f64, rate: f64, term: u32) -> Result<Vec<AmortizationRow>> {
        match self {
            AmortizationMethod::French => french_schedule(principal, rate, term),
            AmortizationMethod::German => german_schedule(principal, rate, term),
            AmortizationMethod::American => american_schedule(principal, rate, term),
        }
    }
}

/// Returns the term as a `powi` exponent
fn validate_term(rate: f64, term: u32) -> Result<i32> {
    if term == 0 {
        return Err(FinanceError::invalid_term("term must be at least one period"));
    }
    if rate < 0.0 || rate.is_nan() {
        return Err(FinanceError::invalid_term(format!("rate must be non-negative, got {rate}")));
    }
    period_exponent(term)
}

/// Fixed French installment: `P·i·(1+i)^n / ((1+i)^n - 1)`, or `P/n` at a zero rate
pub fn french_payment(principal: f64, rate: f64, term: u32) -> Result<f64> {
    let n = validate_term(rate, term)?;
    if rate == 0.0 {
        return Ok(principal / term as f64);
    }
    let growth = (1.0 + rate).powi(n);
    Ok(principal * rate * growth / (growth - 1.0))
}

/// French schedule: fixed payment
pub fn french_schedule(principal: f64, rate: f64, term: u32) -> Result<Vec<AmortizationRow>> {
    let payment = french_payment(principal, rate, term)?;
    let mut rows = Vec::with_capacity(term as usize);
    let mut balance = principal;

    for i in 1..=term {
        let interest = balance * rate;
        let principal_paid = payment - interest;
        balance -= principal_paid;

        if i == term {
            balance = 0.0;
        }

        rows.push(AmortizationRow {
            installment_number: i,
            payment,
            interest,
            principal: principal_paid,
            remaining_balance: balance,
        });
    }

    Ok(rows)
}

/// German schedule: fixed principal `P/n`
pub fn german_schedule(principal: f64, rate: f64, term: u32) -> Result<Vec<AmortizationRow>> {
    validate_term(rate, term)?;
    let principal_paid = principal / term as f64;
    let mut rows = Vec::with_capacity(term as usize);
    let mut balance = principal;

    for i in 1..=term {
        let interest = balance * rate;
        balance -= principal_paid;

        if i == term {
            balance = 0.0;
        }

        rows.push(AmortizationRow {
            installment_number: i,
            payment: principal_paid + interest,
            interest,
            principal: principal_paid,
            remaining_balance: balance,
        });
    }

    Ok(rows)
}

/// American schedule: interest every period, principal with the last payment
pub fn american_schedule(principal: f64, rate: f64, term: u32) -> Result<Vec<AmortizationRow>> {
    validate_term(rate, term)?;
    let interest = principal * rate;

    let rows = (1..=term)
        .map(|i| {
            if i == term {
                AmortizationRow {
                    installment_number: i,
                    payment: principal + interest,
                    interest,
                    principal,
                    remaining_balance: 0.0,
                }
            } else {
                AmortizationRow::interest_only(i, principal, rate)
            }
        })
        .collect();

    Ok(rows)
}

/// Schedule with `grace_periods` interest-only installments up front.
///
/// The remaining `total_term - grace_periods` installments follow `method` on
/// the full principal, numbered from `grace_periods + 1`.
pub fn schedule_with_grace(
    principal: f64,
    rate: f64,
    total_term: u32,
    grace_periods: u32,
    method: AmortizationMethod,
) -> Result<Vec<AmortizationRow>> {
    if grace_periods >= total_term {
        return Err(FinanceError::InvalidGracePeriod {
            grace_periods,
            total_term,
        });
    }

    let amortizing = method.schedule(principal, rate, total_term - grace_periods)?;
    let mut rows = Vec::with_capacity(total_term as usize);

    rows.extend((1..=grace_periods).map(|i| AmortizationRow::interest_only(i, principal, rate)));
    rows.extend(amortizing.into_iter().map(|row| AmortizationRow {
        installment_number: row.installment_number + grace_periods,
        ..row
    }));

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const METHODS: [AmortizationMethod; 3] = [
        AmortizationMethod::French,
        AmortizationMethod::German,
        AmortizationMethod::American,
    ];

    #[test]
    fn test_french_concrete_loan() {
        let rows = french_schedule(10_000_000.0, 0.01, 36).unwrap();
        let expected = 10_000_000.0 * 0.01 * 1.01_f64.powi(36) / (1.01_f64.powi(36) - 1.0);

        assert_eq!(rows.len(), 36);
        assert_eq!(rows[0].payment, expected);
        assert!((rows[0].payment - 332_143.0).abs() < 1.0);
        assert_eq!(rows[35].remaining_balance, 0.0);
    }

    #[test]
    fn test_balance_invariants_all_methods() {
        for method in METHODS {
            for &(principal, rate, term) in &[
                (10_000_000.0, 0.01, 36),
                (250_000.0, 0.0, 12),
                (1_500.0, 0.035, 1),
                (80_000.0, 0.2, 60),
            ] {
                let rows = method.schedule(principal, rate, term).unwrap();
                assert_eq!(rows.len(), term as usize);
                assert_eq!(rows.last().unwrap().remaining_balance, 0.0, "{:?}", method);

                let principal_sum: f64 = rows.iter().map(|r| r.principal).sum();
                assert_abs_diff_eq!(principal_sum, principal, epsilon = 1e-6 * principal.max(1.0));

                for pair in rows.windows(2) {
                    assert!(pair[1].remaining_balance <= pair[0].remaining_balance + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_french_payment_constant() {
        let rows = french_schedule(5_000_000.0, 0.015, 24).unwrap();
        let payment = rows[0].payment;
        for row in &rows {
            assert!((row.payment - payment).abs() < 1e-9);
            assert!((row.interest + row.principal - row.payment).abs() < 1e-6);
        }
    }

    #[test]
    fn test_german_principal_constant() {
        let rows = german_schedule(1_200_000.0, 0.02, 12).unwrap();
        for row in &rows {
            assert_eq!(row.principal, 100_000.0);
            assert!((row.interest + row.principal - row.payment).abs() < 1e-9);
        }
        assert!(rows[0].payment > rows[11].payment);
    }

    #[test]
    fn test_american_interest_only() {
        let rows = american_schedule(1_000_000.0, 0.02, 6).unwrap();
        for row in &rows[..5] {
            assert_eq!(row.principal, 0.0);
            assert_eq!(row.payment, 20_000.0);
            assert_eq!(row.remaining_balance, 1_000_000.0);
        }
        assert_eq!(rows[5].principal, 1_000_000.0);
        assert_eq!(rows[5].payment, 1_020_000.0);
        assert_eq!(rows[5].remaining_balance, 0.0);
    }

    #[test]
    fn test_invalid_term() {
        for method in METHODS {
            assert!(matches!(
                method.schedule(1000.0, 0.01, 0),
                Err(FinanceError::InvalidTerm { .. })
            ));
            assert!(matches!(
                method.schedule(1000.0, -0.01, 12),
                Err(FinanceError::InvalidTerm { .. })
            ));
        }
    }

    #[test]
    fn test_term_beyond_exponent_range() {
        for method in METHODS {
            assert!(matches!(
                method.schedule(1000.0, 0.01, u32::MAX),
                Err(FinanceError::InvalidTerm { .. })
            ));
        }
        assert!(french_payment(1000.0, 0.01, i32::MAX as u32 + 1).is_err());
    }

    #[test]
    fn test_grace_period_offsetting() {
        let principal = 10_000_000.0;
        let rate = 0.01;
        let rows = schedule_with_grace(principal, rate, 36, 6, AmortizationMethod::French).unwrap();
        let standalone = french_schedule(principal, rate, 30).unwrap();

        assert_eq!(rows.len(), 36);
        for row in &rows[..6] {
            assert_eq!(row.principal, 0.0);
            assert_eq!(row.interest, principal * rate);
            assert_eq!(row.remaining_balance, principal);
        }

        assert_eq!(rows[6].installment_number, 7);
        assert_eq!(rows[6].payment, standalone[0].payment);
        assert_eq!(rows[6].interest, standalone[0].interest);
        assert_eq!(rows[6].principal, standalone[0].principal);
        assert_eq!(rows[35].installment_number, 36);
        assert_eq!(rows[35].remaining_balance, 0.0);
    }

    #[test]
    fn test_invalid_grace_period() {
        let err = schedule_with_grace(1000.0, 0.01, 12, 12, AmortizationMethod::German).unwrap_err();
        assert_eq!(
            err,
            FinanceError::InvalidGracePeriod {
                grace_periods: 12,
                total_term: 12
            }
        );
        assert!(schedule_with_grace(1000.0, 0.01, 12, 20, AmortizationMethod::American).is_err());
    }

    #[test]
    fn test_method_aliases() {
        let method: AmortizationMethod = serde_json::from_str("\"frances\"").unwrap();
        assert_eq!(method, AmortizationMethod::French);
        let method: AmortizationMethod = serde_json::from_str("\"german\"").unwrap();
        assert_eq!(method, AmortizationMethod::German);
    }

    #[test]
    fn test_summary_of_french_loan() {
        let rows = french_schedule(1_000_000.0, 0.02, 12).unwrap();
        let summary = ScheduleSummary::from_rows(&rows);

        assert_eq!(summary.first_payment, rows[0].payment);
        assert_abs_diff_eq!(summary.total_paid, rows[0].payment * 12.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            summary.total_interest,
            summary.total_paid - 1_000_000.0,
            epsilon = 1e-6
        );
    }
}
