use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fincalc_core::options::black_scholes::{self, BlackScholesInput};

use crate::input;

/// Arguments for Black-Scholes pricing
#[derive(Args)]
pub struct BlackScholesArgs {
    /// Current price of the underlying (S)
    #[arg(long, alias = "spot")]
    pub spot_price: Option<Decimal>,

    /// Option strike (K)
    #[arg(long, alias = "strike")]
    pub strike_price: Option<Decimal>,

    /// Time to expiry in years (e.g. 0.25 for 3 months)
    #[arg(long, alias = "expiry")]
    pub time_to_expiry_years: Option<Decimal>,

    /// Annualized volatility (e.g. 20 for 20%)
    #[arg(long, alias = "vol")]
    pub volatility_pct: Option<Decimal>,

    /// Annual risk-free rate (e.g. 5 for 5%); defaults to 5
    #[arg(long, alias = "rate")]
    pub risk_free_rate_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_black_scholes(args: BlackScholesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bs_input: BlackScholesInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => BlackScholesInput {
            spot_price: args
                .spot_price
                .ok_or("--spot-price is required (or provide --input)")?,
            strike_price: args
                .strike_price
                .ok_or("--strike-price is required (or provide --input)")?,
            time_to_expiry_years: args
                .time_to_expiry_years
                .ok_or("--time-to-expiry-years is required (or provide --input)")?,
            volatility_pct: args
                .volatility_pct
                .ok_or("--volatility-pct is required (or provide --input)")?,
            risk_free_rate_pct: args.risk_free_rate_pct.unwrap_or(dec!(5)),
        },
    };

    let result = black_scholes::calculate_black_scholes(&bs_input)?;
    Ok(serde_json::to_value(result)?)
}
