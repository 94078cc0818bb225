//! Cash-flow analysis: Net Present Value and Internal Rate of Return

mod irr;

pub use irr::{
    annualize, internal_rate_of_return, internal_rate_of_return_newton, internal_rate_of_return_with,
    IRR_DERIVATIVE_STEP, IRR_FALLBACK_BRACKET, IRR_SEED,
};

use serde::{Deserialize, Serialize};

use crate::error::{growth_factor, FinanceError, Result};
use crate::solver::RootOutcome;

/// Reference discount rate for [`analyze_cash_flows`] when the caller has none
pub const DEFAULT_REFERENCE_RATE: f64 = 0.10;

/// A single flow; period 0 is conventionally the (negative) investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub period: u32,
    pub value: f64,
}

impl CashFlow {
    pub fn new(period: u32, value: f64) -> Self {
        Self { period, value }
    }
}

/// Number the values 0, 1, 2, ... as consecutive periods
pub fn flows_from_values(values: &[f64]) -> Vec<CashFlow> {
    values
        .iter()
        .enumerate()
        .map(|(t, &value)| CashFlow::new(t as u32, value))
        .collect()
}

/// NPV with the rate already known to exceed -100%
pub(crate) fn npv_unchecked(flows: &[CashFlow], rate: f64) -> f64 {
    flows
        .iter()
        .map(|cf| cf.value / (1.0 + rate).powf(cf.period as f64))
        .sum()
}

/// `NPV = Σ value / (1+rate)^period`
pub fn net_present_value(flows: &[CashFlow], rate: f64) -> Result<f64> {
    growth_factor("net_present_value", rate)?;
    Ok(npv_unchecked(flows, rate))
}

/// NPV of plain values, the i-th value falling in period i
pub fn npv(values: &[f64], rate: f64) -> Result<f64> {
    growth_factor("npv", rate)?;
    Ok(values
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powf(t as f64))
        .sum())
}

/// NPV at a reference rate together with the IRR, when one exists
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowAnalysis {
    pub reference_rate: f64,
    pub net_present_value: f64,
    /// `None` when the flows never change sign
    pub internal_rate_of_return: Option<RootOutcome>,
}

/// Analyse a cash-flow series at `reference_rate`
pub fn analyze_cash_flows(flows: &[CashFlow], reference_rate: f64) -> Result<CashFlowAnalysis> {
    let net_present_value = net_present_value(flows, reference_rate)?;
    let internal_rate_of_return = match internal_rate_of_return(flows) {
        Ok(outcome) => Some(outcome),
        Err(FinanceError::NoSignChange) => None,
        Err(e) => return Err(e),
    };

    Ok(CashFlowAnalysis {
        reference_rate,
        net_present_value,
        internal_rate_of_return,
    })
}
