use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fincalc_core::margin::commodity::{self, CommodityMarginInput};
use fincalc_core::margin::currency::{self, CurrencyMarginInput};
use fincalc_core::margin::equity::{self, EquityMarginInput};
use fincalc_core::margin::fo::{self, FoMarginInput};
use fincalc_core::margin::futures::{self, EquityFuturesInput};
use fincalc_core::margin::mtf::{self, MtfInput};
use fincalc_core::types::{OptionType, PositionType};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OptionTypeArg {
    Call,
    Put,
}

impl From<OptionTypeArg> for OptionType {
    fn from(arg: OptionTypeArg) -> Self {
        match arg {
            OptionTypeArg::Call => OptionType::Call,
            OptionTypeArg::Put => OptionType::Put,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PositionTypeArg {
    Long,
    Short,
}

impl From<PositionTypeArg> for PositionType {
    fn from(arg: PositionTypeArg) -> Self {
        match arg {
            PositionTypeArg::Long => PositionType::Long,
            PositionTypeArg::Short => PositionType::Short,
        }
    }
}

/// Arguments for the F&O option margin estimate
#[derive(Args)]
pub struct FoMarginArgs {
    /// Underlying price (S)
    #[arg(long)]
    pub stock_price: Option<Decimal>,

    /// Option strike (K)
    #[arg(long)]
    pub strike_price: Option<Decimal>,

    /// Contract lot size
    #[arg(long)]
    pub lot_size: Option<u32>,

    /// Annualized volatility (e.g. 20 for 20%)
    #[arg(long, alias = "vol")]
    pub volatility_pct: Option<Decimal>,

    /// Annual risk-free rate (e.g. 5 for 5%); defaults to 5
    #[arg(long, alias = "rate")]
    pub risk_free_rate_pct: Option<Decimal>,

    /// Call or put
    #[arg(long, value_enum)]
    pub option_type: Option<OptionTypeArg>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the equity option margin estimate
#[derive(Args)]
pub struct EquityMarginArgs {
    /// Call or put
    #[arg(long, value_enum)]
    pub option_type: Option<OptionTypeArg>,

    /// Long or short
    #[arg(long, value_enum)]
    pub position_type: Option<PositionTypeArg>,

    /// Underlying price
    #[arg(long)]
    pub underlying_price: Option<Decimal>,

    /// Option strike
    #[arg(long)]
    pub strike_price: Option<Decimal>,

    /// Contract lot size
    #[arg(long)]
    pub lot_size: Option<u32>,

    /// Implied volatility (e.g. 25 for 25%)
    #[arg(long, alias = "vol")]
    pub volatility_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for commodity futures margin
#[derive(Args)]
pub struct CommodityMarginArgs {
    /// Commodity price per unit
    #[arg(long)]
    pub commodity_price: Option<Decimal>,

    /// Contract lot size
    #[arg(long)]
    pub lot_size: Option<u32>,

    /// SPAN requirement as % of contract value
    #[arg(long)]
    pub span_factor_pct: Option<Decimal>,

    /// Exposure requirement as % of contract value
    #[arg(long)]
    pub exposure_factor_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for currency derivatives margin
#[derive(Args)]
pub struct CurrencyMarginArgs {
    /// USD/INR exchange rate
    #[arg(long)]
    pub usdinr_price: Option<Decimal>,

    /// Contract size in USD
    #[arg(long)]
    pub lot_size_usd: Option<u32>,

    /// SPAN margin as % of contract value
    #[arg(long)]
    pub span_pct: Option<Decimal>,

    /// Exposure margin as % of contract value
    #[arg(long)]
    pub exposure_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the equity futures round trip
#[derive(Args)]
pub struct EquityFuturesArgs {
    /// Entry price
    #[arg(long)]
    pub entry_price: Option<Decimal>,

    /// Exit price
    #[arg(long)]
    pub exit_price: Option<Decimal>,

    /// Contract lot size
    #[arg(long)]
    pub lot_size: Option<u32>,

    /// Margin requirement as % of contract value
    #[arg(long)]
    pub margin_pct: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for margin trading facility costing
#[derive(Args)]
pub struct MtfArgs {
    /// Stock price
    #[arg(long)]
    pub stock_price: Option<Decimal>,

    /// Number of shares
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Investor margin as % of position value
    #[arg(long)]
    pub margin_requirement_pct: Option<Decimal>,

    /// Annual interest on the broker-funded portion (e.g. 12 for 12%)
    #[arg(long, alias = "rate")]
    pub interest_rate_pct: Option<Decimal>,

    /// Holding period in days
    #[arg(long)]
    pub holding_period_days: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_fo_margin(args: FoMarginArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fo_input: FoMarginInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FoMarginInput {
            stock_price: args
                .stock_price
                .ok_or("--stock-price is required (or provide --input)")?,
            strike_price: args
                .strike_price
                .ok_or("--strike-price is required (or provide --input)")?,
            lot_size: args
                .lot_size
                .ok_or("--lot-size is required (or provide --input)")?,
            volatility_pct: args
                .volatility_pct
                .ok_or("--volatility-pct is required (or provide --input)")?,
            risk_free_rate_pct: args.risk_free_rate_pct.unwrap_or(dec!(5)),
            option_type: args
                .option_type
                .ok_or("--option-type is required (or provide --input)")?
                .into(),
        },
    };

    let result = fo::calculate_fo_margin(&fo_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_equity_margin(args: EquityMarginArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let equity_input: EquityMarginInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EquityMarginInput {
            option_type: args
                .option_type
                .ok_or("--option-type is required (or provide --input)")?
                .into(),
            position_type: args
                .position_type
                .ok_or("--position-type is required (or provide --input)")?
                .into(),
            underlying_price: args
                .underlying_price
                .ok_or("--underlying-price is required (or provide --input)")?,
            strike_price: args
                .strike_price
                .ok_or("--strike-price is required (or provide --input)")?,
            lot_size: args
                .lot_size
                .ok_or("--lot-size is required (or provide --input)")?,
            volatility_pct: args
                .volatility_pct
                .ok_or("--volatility-pct is required (or provide --input)")?,
        },
    };

    let result = equity::calculate_equity_margin(&equity_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_commodity_margin(
    args: CommodityMarginArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let commodity_input: CommodityMarginInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => CommodityMarginInput {
            commodity_price: args
                .commodity_price
                .ok_or("--commodity-price is required (or provide --input)")?,
            lot_size: args
                .lot_size
                .ok_or("--lot-size is required (or provide --input)")?,
            span_factor_pct: args
                .span_factor_pct
                .ok_or("--span-factor-pct is required (or provide --input)")?,
            exposure_factor_pct: args
                .exposure_factor_pct
                .ok_or("--exposure-factor-pct is required (or provide --input)")?,
        },
    };

    let result = commodity::calculate_commodity_margin(&commodity_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_currency_margin(
    args: CurrencyMarginArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let currency_input: CurrencyMarginInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => CurrencyMarginInput {
            usdinr_price: args
                .usdinr_price
                .ok_or("--usdinr-price is required (or provide --input)")?,
            lot_size_usd: args
                .lot_size_usd
                .ok_or("--lot-size-usd is required (or provide --input)")?,
            span_pct: args
                .span_pct
                .ok_or("--span-pct is required (or provide --input)")?,
            exposure_pct: args
                .exposure_pct
                .ok_or("--exposure-pct is required (or provide --input)")?,
        },
    };

    let result = currency::calculate_currency_margin(&currency_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_equity_futures(args: EquityFuturesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let futures_input: EquityFuturesInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EquityFuturesInput {
            entry_price: args
                .entry_price
                .ok_or("--entry-price is required (or provide --input)")?,
            exit_price: args
                .exit_price
                .ok_or("--exit-price is required (or provide --input)")?,
            lot_size: args
                .lot_size
                .ok_or("--lot-size is required (or provide --input)")?,
            margin_pct: args
                .margin_pct
                .ok_or("--margin-pct is required (or provide --input)")?,
        },
    };

    let result = futures::calculate_equity_futures(&futures_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_mtf(args: MtfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mtf_input: MtfInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => MtfInput {
            stock_price: args
                .stock_price
                .ok_or("--stock-price is required (or provide --input)")?,
            quantity: args
                .quantity
                .ok_or("--quantity is required (or provide --input)")?,
            margin_requirement_pct: args
                .margin_requirement_pct
                .ok_or("--margin-requirement-pct is required (or provide --input)")?,
            interest_rate_pct: args
                .interest_rate_pct
                .ok_or("--interest-rate-pct is required (or provide --input)")?,
            holding_period_days: args
                .holding_period_days
                .ok_or("--holding-period-days is required (or provide --input)")?,
        },
    };

    let result = mtf::calculate_mtf(&mtf_input)?;
    Ok(serde_json::to_value(result)?)
}
