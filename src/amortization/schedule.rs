//! Schedule output structures for amortization

use serde::{Deserialize, Serialize};

/// A single installment of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based installment number
    pub installment_number: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this installment; exactly 0.0 on the last row
    pub remaining_balance: f64,
}

impl AmortizationRow {
    /// Interest-only row: the balance is left untouched
    pub fn interest_only(installment_number: u32, balance: f64, rate: f64) -> Self {
        let interest = balance * rate;
        Self {
            installment_number,
            payment: interest,
            interest,
            principal: 0.0,
            remaining_balance: balance,
        }
    }
}

/// Totals for a schedule, as shown on a loan summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub installments: u32,
    /// Amount of the first installment (the quoted installment)
    pub first_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}

impl ScheduleSummary {
    /// Summarise a schedule; an empty slice gives all zeros
    pub fn from_rows(rows: &[AmortizationRow]) -> Self {
        let total_paid: f64 = rows.iter().map(|r| r.payment).sum();
        let total_interest: f64 = rows.iter().map(|r| r.interest).sum();
        let total_principal: f64 = rows.iter().map(|r| r.principal).sum();

        Self {
            installments: rows.len() as u32,
            first_payment: rows.first().map(|r| r.payment).unwrap_or(0.0),
            total_paid,
            total_interest,
            total_principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_only_row() {
        let row = AmortizationRow::interest_only(3, 1_000_000.0, 0.02);
        assert_eq!(row.installment_number, 3);
        assert!((row.interest - 20_000.0).abs() < 1e-9);
        assert_eq!(row.payment, row.interest);
        assert_eq!(row.principal, 0.0);
        assert_eq!(row.remaining_balance, 1_000_000.0);
    }

    #[test]
    fn test_summary_totals() {
        let rows = [
            AmortizationRow {
                installment_number: 1,
                payment: 60.0,
                interest: 10.0,
                principal: 50.0,
                remaining_balance: 50.0,
            },
            AmortizationRow {
                installment_number: 2,
                payment: 55.0,
                interest: 5.0,
                principal: 50.0,
                remaining_balance: 0.0,
            },
        ];
        let summary = ScheduleSummary::from_rows(&rows);

        assert_eq!(summary.installments, 2);
        assert_eq!(summary.first_payment, 60.0);
        assert_eq!(summary.total_paid, 115.0);
        assert_eq!(summary.total_interest, 15.0);
        assert_eq!(summary.total_principal, 100.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ScheduleSummary::from_rows(&[]);
        assert_eq!(summary.installments, 0);
        assert_eq!(summary.first_payment, 0.0);
    }
}
