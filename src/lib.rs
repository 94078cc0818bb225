//! Finance Engine - Closed-form and iterative solvers for loan and investment math
//!
//! This library provides:
//! - Simple, compound and continuous interest, with every unknown solvable
//! - Amortization schedules (French, German, American) with grace periods
//! - Ordinary and due annuities, including bisection rate solving
//! - Arithmetic and geometric gradient series with capitalization adjustment
//! - Net Present Value and Internal Rate of Return analysis
//!
//! Every function is pure: validated scalars in, a value or a series out.

pub mod error;
pub mod solver;
pub mod interest;
pub mod amortization;
pub mod annuity;
pub mod cashflow;
pub mod gradient;

// Re-export commonly used types
pub use error::{FinanceError, Result};
pub use solver::{RootOutcome, SolverConfig};
pub use interest::{InterestQuery, TimeSpan};
pub use amortization::{schedule_with_grace, AmortizationMethod, AmortizationRow, ScheduleSummary};
pub use annuity::{AnnuityAnswer, AnnuityQuery, AnnuityTiming};
pub use cashflow::{analyze_cash_flows, internal_rate_of_return, net_present_value, CashFlow, CashFlowAnalysis};
pub use gradient::{CapitalizationSystem, GradientSeriesResult, Installment};
