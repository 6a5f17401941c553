use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::loan::emi::{self, EmiInput};

use crate::input;

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate (e.g. 8.5 for 8.5% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: EmiInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EmiInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            annual_rate_pct: args
                .annual_rate_pct
                .ok_or("--annual-rate-pct is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let result = emi::calculate_emi(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}
