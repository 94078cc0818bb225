//! Finance Engine CLI
//!
//! ```bash
//! # French schedule for 10,000,000 at 1% monthly over 36 months, 6 of them grace
//! finance amortize --amount 10000000 --rate 0.01 --term 36 --grace 6 --csv schedule.csv
//!
//! # Present value of 10 payments of 1,000,000 at 5%
//! finance annuity present-value --payment 1000000 --rate 0.05 --periods 10
//!
//! # Arithmetic gradient with quarterly capitalization
//! finance gradient --kind arithmetic --initial 1000 --gradient 100 --periods 12 --rate 0.12 --capitalization quarterly
//!
//! # IRR and NPV at 10%
//! finance irr --flows=-1000000,300000,400000,500000
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use finance_engine::{
    amortization::french_payment,
    cashflow::{flows_from_values, DEFAULT_REFERENCE_RATE},
    gradient::{arithmetic_gradient_future, arithmetic_gradient_present, geometric_gradient},
    interest::{compare_growth, compound_interest, simple_interest, GrowthSystem, TimeSpan},
    analyze_cash_flows, schedule_with_grace, AmortizationMethod, AnnuityQuery, AnnuityTiming,
    CapitalizationSystem, ScheduleSummary,
};

/// Loan and investment calculator
#[derive(Parser)]
#[command(name = "finance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an amortization schedule
    Amortize(AmortizeArgs),
    /// Solve a level annuity for one unknown
    Annuity(AnnuityArgs),
    /// Generate a gradient payment series
    Gradient(GradientArgs),
    /// NPV at a reference rate and the IRR of a cash-flow series
    Irr(IrrArgs),
    /// Simple or compound interest on a capital
    Interest(InterestArgs),
}

#[derive(Args)]
struct AmortizeArgs {
    #[arg(long)]
    amount: f64,
    /// Periodic rate as a decimal (0.01 = 1%)
    #[arg(long)]
    rate: f64,
    /// Total number of installments, grace included
    #[arg(long)]
    term: u32,
    #[arg(long, value_enum, default_value = "french")]
    method: MethodArg,
    /// Interest-only periods before amortization starts
    #[arg(long, default_value_t = 0)]
    grace: u32,
    /// Write the schedule to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    French,
    German,
    American,
}

impl From<MethodArg> for AmortizationMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::French => AmortizationMethod::French,
            MethodArg::German => AmortizationMethod::German,
            MethodArg::American => AmortizationMethod::American,
        }
    }
}

#[derive(Args)]
struct AnnuityArgs {
    /// Quantity to solve for
    #[arg(value_enum)]
    solve_for: AnnuityUnknown,
    #[arg(long, value_enum, default_value = "ordinary")]
    timing: TimingArg,
    #[arg(long)]
    payment: Option<f64>,
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long)]
    periods: Option<f64>,
    #[arg(long)]
    present_value: Option<f64>,
    #[arg(long)]
    future_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AnnuityUnknown {
    PresentValue,
    FutureValue,
    PaymentFromPresent,
    PaymentFromFuture,
    PeriodsFromPresent,
    PeriodsFromFuture,
    RateFromPresent,
    RateFromFuture,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimingArg {
    Ordinary,
    Due,
}

impl From<TimingArg> for AnnuityTiming {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::Ordinary => AnnuityTiming::Ordinary,
            TimingArg::Due => AnnuityTiming::Due,
        }
    }
}

#[derive(Args)]
struct GradientArgs {
    #[arg(long, value_enum, default_value = "arithmetic")]
    kind: GradientKind,
    /// First installment
    #[arg(long)]
    initial: f64,
    /// Constant increment (arithmetic) or growth rate (geometric)
    #[arg(long, allow_hyphen_values = true)]
    gradient: f64,
    #[arg(long)]
    periods: u32,
    /// Nominal periodic rate as a decimal
    #[arg(long)]
    rate: f64,
    #[arg(long, value_enum, default_value = "monthly")]
    capitalization: CapitalizationArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GradientKind {
    /// Arithmetic, valued from the present
    Arithmetic,
    /// Arithmetic, valued directly at the horizon
    ArithmeticFuture,
    Geometric,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CapitalizationArg {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl From<CapitalizationArg> for CapitalizationSystem {
    fn from(arg: CapitalizationArg) -> Self {
        match arg {
            CapitalizationArg::Monthly => CapitalizationSystem::Monthly,
            CapitalizationArg::Quarterly => CapitalizationSystem::Quarterly,
            CapitalizationArg::Semiannual => CapitalizationSystem::Semiannual,
            CapitalizationArg::Annual => CapitalizationSystem::Annual,
        }
    }
}

#[derive(Args)]
struct IrrArgs {
    /// Comma-separated flows, period 0 first
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    flows: Vec<f64>,
    /// Discount rate for the NPV
    #[arg(long, default_value_t = DEFAULT_REFERENCE_RATE)]
    reference_rate: f64,
}

#[derive(Args)]
struct InterestArgs {
    #[arg(long)]
    capital: f64,
    #[arg(long)]
    rate: f64,
    /// Years (simple) or periods (compound)
    #[arg(long)]
    time: f64,
    #[arg(long)]
    compound: bool,
    /// Also compare capitalization systems over `time` whole periods
    #[arg(long)]
    compare: bool,
}

fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn required(value: Option<f64>, name: &str) -> Result<f64> {
    value.ok_or_else(|| anyhow!("--{name} is required for this annuity calculation"))
}

fn run_amortize(args: AmortizeArgs, json: bool) -> Result<()> {
    let method = AmortizationMethod::from(args.method);
    let rows = schedule_with_grace(args.amount, args.rate, args.term, args.grace, method)?;
    let summary = ScheduleSummary::from_rows(&rows);

    if let Some(path) = &args.csv {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::info!("Wrote {} rows to {}", rows.len(), path.display());
    }

    if json {
        return print_json(&serde_json::json!({ "summary": summary, "rows": rows }));
    }

    if method == AmortizationMethod::French {
        let payment = french_payment(args.amount, args.rate, args.term - args.grace)?;
        println!("Fixed installment: {:.2}", payment);
    }
    println!("{:>5} {:>16} {:>16} {:>16} {:>18}", "No", "Payment", "Interest", "Principal", "Balance");
    println!("{}", "-".repeat(75));
    for row in &rows {
        println!(
            "{:>5} {:>16.2} {:>16.2} {:>16.2} {:>18.2}",
            row.installment_number, row.payment, row.interest, row.principal, row.remaining_balance
        );
    }
    println!("{}", "-".repeat(75));
    println!("Total paid:     {:.2}", summary.total_paid);
    println!("Total interest: {:.2}", summary.total_interest);
    Ok(())
}

fn run_annuity(args: AnnuityArgs, json: bool) -> Result<()> {
    let query = match args.solve_for {
        AnnuityUnknown::PresentValue => AnnuityQuery::PresentValue {
            payment: required(args.payment, "payment")?,
            rate: required(args.rate, "rate")?,
            periods: required(args.periods, "periods")?,
        },
        AnnuityUnknown::FutureValue => AnnuityQuery::FutureValue {
            payment: required(args.payment, "payment")?,
            rate: required(args.rate, "rate")?,
            periods: required(args.periods, "periods")?,
        },
        AnnuityUnknown::PaymentFromPresent => AnnuityQuery::PaymentFromPresent {
            present_value: required(args.present_value, "present-value")?,
            rate: required(args.rate, "rate")?,
            periods: required(args.periods, "periods")?,
        },
        AnnuityUnknown::PaymentFromFuture => AnnuityQuery::PaymentFromFuture {
            future_value: required(args.future_value, "future-value")?,
            rate: required(args.rate, "rate")?,
            periods: required(args.periods, "periods")?,
        },
        AnnuityUnknown::PeriodsFromPresent => AnnuityQuery::PeriodsFromPresent {
            present_value: required(args.present_value, "present-value")?,
            payment: required(args.payment, "payment")?,
            rate: required(args.rate, "rate")?,
        },
        AnnuityUnknown::PeriodsFromFuture => AnnuityQuery::PeriodsFromFuture {
            future_value: required(args.future_value, "future-value")?,
            payment: required(args.payment, "payment")?,
            rate: required(args.rate, "rate")?,
        },
        AnnuityUnknown::RateFromPresent => AnnuityQuery::RateFromPresent {
            present_value: required(args.present_value, "present-value")?,
            payment: required(args.payment, "payment")?,
            periods: required(args.periods, "periods")?,
        },
        AnnuityUnknown::RateFromFuture => AnnuityQuery::RateFromFuture {
            future_value: required(args.future_value, "future-value")?,
            payment: required(args.payment, "payment")?,
            periods: required(args.periods, "periods")?,
        },
    };

    let answer = query.solve(args.timing.into())?;
    if json {
        return print_json(&answer);
    }

    println!("{:?}: {:.6}", args.solve_for, answer.value);
    if !answer.converged {
        println!("(approximate: the search did not reach tolerance)");
    }
    Ok(())
}

fn run_gradient(args: GradientArgs, json: bool) -> Result<()> {
    let capitalization = CapitalizationSystem::from(args.capitalization);
    let result = match args.kind {
        GradientKind::Arithmetic => {
            arithmetic_gradient_present(args.initial, args.gradient, args.periods, args.rate, capitalization)?
        }
        GradientKind::ArithmeticFuture => {
            arithmetic_gradient_future(args.initial, args.gradient, args.periods, args.rate, capitalization)?
        }
        GradientKind::Geometric => {
            geometric_gradient(args.initial, args.gradient, args.periods, args.rate, capitalization)?
        }
    };

    if json {
        return print_json(&result);
    }

    println!("Effective rate: {:.6}", result.effective_rate);
    println!("Present value:  {:.2}", result.present_value);
    println!("Future value:   {:.2}", result.future_value);
    match result.internal_rate_of_return {
        Some(irr) => println!("IRR:            {:.6}", irr.value()),
        None => println!("IRR:            n/a"),
    }
    println!();
    for installment in &result.installments {
        println!("{:>5} {:>16.2}", installment.period_number, installment.amount);
    }
    Ok(())
}

fn run_irr(args: IrrArgs, json: bool) -> Result<()> {
    let flows = flows_from_values(&args.flows);
    let analysis = analyze_cash_flows(&flows, args.reference_rate)?;

    if json {
        return print_json(&analysis);
    }

    println!("NPV @ {:.2}%: {:.2}", analysis.reference_rate * 100.0, analysis.net_present_value);
    match analysis.internal_rate_of_return {
        Some(irr) if irr.is_converged() => println!("IRR: {:.4}%", irr.value() * 100.0),
        Some(irr) => println!("IRR: {:.4}% (approximate)", irr.value() * 100.0),
        None => println!("IRR: none (flows never change sign)"),
    }
    Ok(())
}

fn run_interest(args: InterestArgs, json: bool) -> Result<()> {
    if args.compound {
        let result = compound_interest(args.capital, args.rate, args.time)?;
        if json {
            return print_json(&result);
        }
        println!("Future value:   {:.2}", result.future_value);
        println!("Total interest: {:.2}", result.total_interest);
    } else {
        let result = simple_interest(args.capital, args.rate, args.time);
        if json {
            return print_json(&result);
        }
        println!("Future value:    {:.2}", result.future_value);
        println!("Interest earned: {:.2}", result.interest_earned);
        println!("Time:            {}", TimeSpan::from_years(args.time));
    }

    if args.compare {
        let systems = [
            GrowthSystem::Simple,
            GrowthSystem::Compound,
            GrowthSystem::Continuous,
            GrowthSystem::Periodic { frequency: 12 },
            GrowthSystem::Anticipated,
            GrowthSystem::Deferred { start: 1 },
        ];
        println!();
        for path in compare_growth(args.capital, args.rate, args.time.round() as u32, &systems) {
            println!("{:<12} {:>16.2}", path.system.name(), path.final_amount);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Amortize(args) => run_amortize(args, cli.json)?,
        Commands::Annuity(args) => run_annuity(args, cli.json)?,
        Commands::Gradient(args) => run_gradient(args, cli.json)?,
        Commands::Irr(args) => run_irr(args, cli.json)?,
        Commands::Interest(args) => run_interest(args, cli.json)?,
    }

    Ok(())
}
