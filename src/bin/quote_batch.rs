//! Quote a batch of loan requests
//!
//! Reads `amount,rate,term,method,grace` rows, builds each schedule in
//! parallel and writes one summary row per request.
//! Accepts config via environment variables:
//!   QUOTE_INPUT  (default loan_requests.csv)
//!   QUOTE_OUTPUT (default loan_quotes.csv)

use anyhow::{Context, Result};
use finance_engine::{schedule_with_grace, AmortizationMethod, ScheduleSummary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct LoanRequest {
    amount: f64,
    rate: f64,
    term: u32,
    /// French/German/American, English or Spanish
    method: AmortizationMethod,
    /// Missing column or empty field means no grace
    #[serde(default, deserialize_with = "csv::invalid_option")]
    grace: Option<u32>,
}

impl LoanRequest {
    fn grace(&self) -> u32 {
        self.grace.unwrap_or(0)
    }
}

#[derive(Debug, Serialize)]
struct LoanQuote {
    row: usize,
    amount: f64,
    rate: f64,
    term: u32,
    method: AmortizationMethod,
    grace: u32,
    first_payment: Option<f64>,
    total_paid: Option<f64>,
    total_interest: Option<f64>,
    error: Option<String>,
}

impl LoanQuote {
    fn new(row: usize, request: &LoanRequest) -> Self {
        Self {
            row,
            amount: request.amount,
            rate: request.rate,
            term: request.term,
            method: request.method,
            grace: request.grace(),
            first_payment: None,
            total_paid: None,
            total_interest: None,
            error: None,
        }
    }
}

fn quote(row: usize, request: &LoanRequest) -> LoanQuote {
    let mut quote = LoanQuote::new(row, request);
    match schedule_with_grace(request.amount, request.rate, request.term, request.grace(), request.method) {
        Ok(rows) => {
            let summary = ScheduleSummary::from_rows(&rows);
            quote.first_payment = Some(summary.first_payment);
            quote.total_paid = Some(summary.total_paid);
            quote.total_interest = Some(summary.total_interest);
        }
        Err(e) => {
            log::warn!("Request {} rejected: {}", row, e);
            quote.error = Some(e.to_string());
        }
    }
    quote
}

fn main() -> Result<()> {
    env_logger::init();

    let input_path = env::var("QUOTE_INPUT").unwrap_or_else(|_| "loan_requests.csv".to_string());
    let output_path = env::var("QUOTE_OUTPUT").unwrap_or_else(|_| "loan_quotes.csv".to_string());

    let start = Instant::now();
    println!("Loading loan requests from {}...", input_path);

    let mut reader = csv::Reader::from_path(&input_path)
        .with_context(|| format!("Failed to open {}", input_path))?;
    let requests: Vec<LoanRequest> = reader
        .deserialize()
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Failed to parse {}", input_path))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let quote_start = Instant::now();
    let quotes: Vec<LoanQuote> = requests
        .par_iter()
        .enumerate()
        .map(|(i, request)| quote(i + 1, request))
        .collect();
    println!("Quoted in {:?}", quote_start.elapsed());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create {}", output_path))?;
    for quote in &quotes {
        writer.serialize(quote)?;
    }
    writer.flush()?;

    let rejected = quotes.iter().filter(|q| q.error.is_some()).count();
    println!(
        "Wrote {} quotes ({} rejected) to {} in {:?}",
        quotes.len(),
        rejected,
        output_path,
        start.elapsed()
    );

    Ok(())
}
