use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::charges::brokerage::{self, BrokerageInput};
use fincalc_core::charges::income_tax::{self, TaxInput};
use fincalc_core::types::TransactionType;

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TransactionTypeArg {
    Intraday,
    Delivery,
}

impl From<TransactionTypeArg> for TransactionType {
    fn from(arg: TransactionTypeArg) -> Self {
        match arg {
            TransactionTypeArg::Intraday => TransactionType::Intraday,
            TransactionTypeArg::Delivery => TransactionType::Delivery,
        }
    }
}

/// Arguments for the brokerage charge sheet
#[derive(Args)]
pub struct BrokerageArgs {
    /// Buy price per share
    #[arg(long)]
    pub buy_price: Option<Decimal>,

    /// Sell price per share
    #[arg(long)]
    pub sell_price: Option<Decimal>,

    /// Number of shares traded
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Brokerage as a percentage of turnover (e.g. 0.05)
    #[arg(long)]
    pub brokerage_pct: Option<Decimal>,

    /// Intraday or delivery
    #[arg(long, value_enum)]
    pub transaction_type: Option<TransactionTypeArg>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the income-tax regime comparison
#[derive(Args)]
pub struct TaxArgs {
    /// Gross annual income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Total deductions claimed under the old regime
    #[arg(long, default_value = "0")]
    pub deductions: Decimal,

    /// Senior citizen (60+ years)
    #[arg(long)]
    pub senior: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_brokerage(args: BrokerageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let brokerage_input: BrokerageInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => BrokerageInput {
            buy_price: args
                .buy_price
                .ok_or("--buy-price is required (or provide --input)")?,
            sell_price: args
                .sell_price
                .ok_or("--sell-price is required (or provide --input)")?,
            quantity: args
                .quantity
                .ok_or("--quantity is required (or provide --input)")?,
            brokerage_pct: args
                .brokerage_pct
                .ok_or("--brokerage-pct is required (or provide --input)")?,
            transaction_type: args
                .transaction_type
                .ok_or("--transaction-type is required (or provide --input)")?
                .into(),
        },
    };

    let result = brokerage::calculate_brokerage(&brokerage_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input: TaxInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => TaxInput {
            income: args.income.ok_or("--income is required (or provide --input)")?,
            deductions: args.deductions,
            is_senior: args.senior,
        },
    };

    let result = income_tax::calculate_tax(&tax_input)?;
    Ok(serde_json::to_value(result)?)
}
