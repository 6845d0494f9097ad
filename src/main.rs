//! Credit Simulator CLI
//!
//! Command-line interface for running a single loan simulation

use anyhow::Context;
use clap::{Parser, ValueEnum};

use credit_sim::{
    Currency, GraceRegime, LoanParameters, RateBasis, SimulationResult, Simulator, TermUnit,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RateBasisArg {
    Effective,
    Nominal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TermUnitArg {
    Years,
    Months,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraceArg {
    None,
    Total,
    Partial,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CurrencyArg {
    Pen,
    Usd,
}

/// Simulate a fixed-installment housing loan and appraise its cash flows
#[derive(Debug, Parser)]
#[command(name = "credit_sim", version)]
struct Cli {
    /// Loan principal before any subsidy
    #[arg(long, default_value_t = 150_000.0)]
    amount: f64,

    /// Annual rate in percent
    #[arg(long, default_value_t = 8.5)]
    rate: f64,

    /// How the annual rate is quoted
    #[arg(long, value_enum, default_value = "effective")]
    rate_basis: RateBasisArg,

    /// Capitalization frequency for nominal rates (1, 2, 4 or 12)
    #[arg(long, default_value_t = 12)]
    capitalization: u32,

    /// Term length, interpreted per --term-unit
    #[arg(long, default_value_t = 20.0)]
    term: f64,

    #[arg(long, value_enum, default_value = "years")]
    term_unit: TermUnitArg,

    /// Grace period regime
    #[arg(long, value_enum, default_value = "none")]
    grace: GraceArg,

    /// Grace period length in months
    #[arg(long, default_value_t = 0)]
    grace_months: u32,

    /// Housing subsidy (bono) deducted from the principal
    #[arg(long, default_value_t = 0.0)]
    subsidy: f64,

    #[arg(long, value_enum, default_value = "pen")]
    currency: CurrencyArg,

    /// Annual discount rate in percent for the NPV appraisal
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Write the full schedule to this CSV file
    #[arg(long)]
    output: Option<String>,

    /// Number of schedule rows to print to the console
    #[arg(long, default_value_t = 24)]
    print_rows: usize,
}

impl Cli {
    fn to_params(&self) -> LoanParameters {
        LoanParameters {
            principal: self.amount,
            currency: match self.currency {
                CurrencyArg::Pen => Currency::Pen,
                CurrencyArg::Usd => Currency::Usd,
            },
            annual_rate: self.rate,
            rate_basis: match self.rate_basis {
                RateBasisArg::Effective => RateBasis::Effective,
                RateBasisArg::Nominal => RateBasis::Nominal,
            },
            capitalization: self.capitalization,
            term_value: self.term,
            term_unit: match self.term_unit {
                TermUnitArg::Years => TermUnit::Years,
                TermUnitArg::Months => TermUnit::Months,
            },
            grace_regime: match self.grace {
                GraceArg::None => GraceRegime::None,
                GraceArg::Total => GraceRegime::Total,
                GraceArg::Partial => GraceRegime::Partial,
            },
            grace_months: self.grace_months,
            subsidy: self.subsidy,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.to_params();
    let symbol = params.currency.symbol();

    println!("Credit Simulator v0.1.0");
    println!("=======================\n");

    println!("Loan:");
    println!("  Principal: {symbol} {:.2}", params.principal);
    if params.subsidy > 0.0 {
        println!("  Subsidy:   {symbol} {:.2}", params.subsidy);
        println!("  Financed:  {symbol} {:.2}", params.financed_amount());
    }
    println!(
        "  Rate:      {:.4}% {:?}",
        params.annual_rate, params.rate_basis
    );
    println!("  Term:      {} months", params.term_months());
    if params.grace_regime != GraceRegime::None {
        println!(
            "  Grace:     {:?}, {} months",
            params.grace_regime, params.grace_months
        );
    }
    println!();

    let result = Simulator::new(cli.discount_rate)
        .simulate(&params)
        .context("simulation failed")?;

    println!(
        "Monthly payment: {symbol} {:.2}\n",
        result.monthly_payment
    );

    // Print the leading rows to the console
    println!(
        "{:>6} {:>14} {:>14} {:>14} {:>16}",
        "Period", "Payment", "Interest", "Principal", "Balance"
    );
    println!("{}", "-".repeat(68));
    for row in result.schedule.rows.iter().take(cli.print_rows) {
        println!(
            "{:>6} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
            row.period, row.payment, row.interest, row.principal, row.balance
        );
    }
    if result.schedule.len() > cli.print_rows {
        println!("... ({} more periods)", result.schedule.len() - cli.print_rows);
    }

    if let Some(path) = &cli.output {
        write_schedule_csv(path, &result)
            .with_context(|| format!("failed to write schedule to {path}"))?;
        println!("\nFull schedule written to: {path}");
    }

    let summary = result.schedule.summary();
    println!("\nSummary:");
    println!("  Total Months:    {}", summary.total_months);
    println!("  Total Paid:      {symbol} {:.2}", summary.total_paid);
    println!("  Total Interest:  {symbol} {:.2}", summary.total_interest);
    println!("  Total Principal: {symbol} {:.2}", summary.total_principal);

    if let Some(npv) = result.appraisal.npv {
        println!("  NPV:             {symbol} {:.2}", npv);
    }
    match result.appraisal.irr {
        Some(irr) if irr.converged => println!("  IRR:             {:.4}%", irr.annual_pct),
        Some(irr) => println!("  IRR:             {:.4}% (not fully converged)", irr.annual_pct),
        None => println!("  IRR:             not found for this cash-flow shape"),
    }

    Ok(())
}

/// Write every schedule row to a CSV file
fn write_schedule_csv(path: &str, result: &SimulationResult) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in &result.schedule.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
