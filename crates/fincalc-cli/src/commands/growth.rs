use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::growth::lumpsum::{self, LumpsumInput};
use fincalc_core::growth::nps::{self, NpsInput};
use fincalc_core::growth::sip::{self, SipInput, StepUpSipInput};
use fincalc_core::growth::stp::{self, StpInput};
use fincalc_core::growth::swp::{self, SwpInput};

use crate::input;

/// Arguments for SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Monthly contribution
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Investment period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return (e.g. 12 for 12% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_return_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for step-up SIP projection
#[derive(Args)]
pub struct StepUpSipArgs {
    /// First-year monthly contribution
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Yearly increase in the contribution (e.g. 10 for 10%)
    #[arg(long)]
    pub annual_step_up_pct: Option<Decimal>,

    /// Investment period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return (e.g. 12 for 12% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_return_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for lumpsum compounding
#[derive(Args)]
pub struct LumpsumArgs {
    /// One-time investment amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Holding period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return (e.g. 12 for 12% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_return_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for NPS projection
#[derive(Args)]
pub struct NpsArgs {
    /// Monthly contribution
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Current age in years
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Retirement age in years
    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Expected annual return (e.g. 10 for 10% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_return_pct: Option<Decimal>,

    /// Share of the corpus used to buy an annuity (40-100)
    #[arg(long)]
    pub annuity_pct: Option<Decimal>,

    /// Annual annuity rate (e.g. 6 for 6%)
    #[arg(long)]
    pub annuity_rate_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for SWP drawdown
#[derive(Args)]
pub struct SwpArgs {
    /// Starting corpus
    #[arg(long)]
    pub total_investment: Option<Decimal>,

    /// Fixed monthly withdrawal
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,

    /// Expected annual return (e.g. 8 for 8% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_return_pct: Option<Decimal>,

    /// Withdrawal period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for STP transfer
#[derive(Args)]
pub struct StpArgs {
    /// Initial deposit parked in the debt fund
    #[arg(long)]
    pub lump_sum_amount: Option<Decimal>,

    /// Fixed monthly transfer into the equity fund
    #[arg(long)]
    pub monthly_transfer_amount: Option<Decimal>,

    /// Transfer period in years
    #[arg(long)]
    pub transfer_period_years: Option<u32>,

    /// Expected equity fund return (% p.a.)
    #[arg(long)]
    pub equity_return_pct: Option<Decimal>,

    /// Expected debt fund return (% p.a.)
    #[arg(long)]
    pub debt_return_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            annual_return_pct: args
                .annual_return_pct
                .ok_or("--annual-return-pct is required (or provide --input)")?,
        },
    };

    let result = sip::calculate_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_step_up_sip(args: StepUpSipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let step_input: StepUpSipInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => StepUpSipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            annual_step_up_pct: args
                .annual_step_up_pct
                .ok_or("--annual-step-up-pct is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            annual_return_pct: args
                .annual_return_pct
                .ok_or("--annual-return-pct is required (or provide --input)")?,
        },
    };

    let result = sip::calculate_step_up_sip(&step_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_lumpsum(args: LumpsumArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lumpsum_input: LumpsumInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LumpsumInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            annual_return_pct: args
                .annual_return_pct
                .ok_or("--annual-return-pct is required (or provide --input)")?,
        },
    };

    let result = lumpsum::calculate_lumpsum(&lumpsum_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_nps(args: NpsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let nps_input: NpsInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => NpsInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            current_age: args
                .current_age
                .ok_or("--current-age is required (or provide --input)")?,
            retirement_age: args
                .retirement_age
                .ok_or("--retirement-age is required (or provide --input)")?,
            annual_return_pct: args
                .annual_return_pct
                .ok_or("--annual-return-pct is required (or provide --input)")?,
            annuity_pct: args
                .annuity_pct
                .ok_or("--annuity-pct is required (or provide --input)")?,
            annuity_rate_pct: args
                .annuity_rate_pct
                .ok_or("--annuity-rate-pct is required (or provide --input)")?,
        },
    };

    let result = nps::calculate_nps(&nps_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_swp(args: SwpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let swp_input: SwpInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SwpInput {
            total_investment: args
                .total_investment
                .ok_or("--total-investment is required (or provide --input)")?,
            monthly_withdrawal: args
                .monthly_withdrawal
                .ok_or("--monthly-withdrawal is required (or provide --input)")?,
            annual_return_pct: args
                .annual_return_pct
                .ok_or("--annual-return-pct is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let result = swp::calculate_swp(&swp_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_stp(args: StpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let stp_input: StpInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => StpInput {
            lump_sum_amount: args
                .lump_sum_amount
                .ok_or("--lump-sum-amount is required (or provide --input)")?,
            monthly_transfer_amount: args
                .monthly_transfer_amount
                .ok_or("--monthly-transfer-amount is required (or provide --input)")?,
            transfer_period_years: args
                .transfer_period_years
                .ok_or("--transfer-period-years is required (or provide --input)")?,
            equity_return_pct: args
                .equity_return_pct
                .ok_or("--equity-return-pct is required (or provide --input)")?,
            debt_return_pct: args
                .debt_return_pct
                .ok_or("--debt-return-pct is required (or provide --input)")?,
        },
    };

    let result = stp::calculate_stp(&stp_input)?;
    Ok(serde_json::to_value(result)?)
}
