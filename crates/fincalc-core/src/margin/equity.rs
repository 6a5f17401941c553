use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::math;
use crate::options::black_scholes;
use crate::types::{with_metadata, ComputationOutput, Money, OptionType, Percent, PositionType};
use crate::FinCalcResult;

use super::NEAR_MONTH_YEARS;

/// Risk-free rate convention when the caller supplies none (flat 5% p.a.).
const DEFAULT_RISK_FREE_PCT: Decimal = dec!(5);
/// Flat exposure charge on contract value for short positions.
const EXPOSURE_RATE: Decimal = dec!(0.05);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityMarginInput {
    pub option_type: OptionType,
    pub position_type: PositionType,
    pub underlying_price: Money,
    pub strike_price: Money,
    pub lot_size: u32,
    pub volatility_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityMarginOutput {
    pub contract_value: Money,
    pub option_premium: Money,
    pub span_margin: Money,
    pub exposure_margin: Money,
    pub total_margin: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Margin for an equity option position. A long position only ever pays the
/// premium, so its SPAN and exposure components are zero. A short position
/// posts a volatility-scaled SPAN proxy plus a flat exposure charge on the
/// contract value.
pub fn calculate_equity_margin(
    input: &EquityMarginInput,
) -> FinCalcResult<ComputationOutput<EquityMarginOutput>> {
    let start = Instant::now();

    if input.underlying_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "underlying_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.strike_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "strike_price".into(),
            reason: "must not be negative".into(),
        });
    }

    let s = input.underlying_price;
    let k = input.strike_price;
    let lot = Decimal::from(input.lot_size);
    let contract_value = s * lot;

    let (call, put) = black_scholes::price_pair(
        s,
        k,
        NEAR_MONTH_YEARS,
        input.volatility_pct,
        DEFAULT_RISK_FREE_PCT,
    );
    let unit_premium = match input.option_type {
        OptionType::Call => call,
        OptionType::Put => put,
    };
    let option_premium = unit_premium * lot;

    let (span_margin, exposure_margin, total_margin) = match input.position_type {
        PositionType::Long => (Decimal::ZERO, Decimal::ZERO, option_premium),
        PositionType::Short => {
            let span = contract_value * input.volatility_pct / dec!(100)
                * math::sqrt(NEAR_MONTH_YEARS);
            let exposure = contract_value * EXPOSURE_RATE;
            (span, exposure, span + exposure)
        }
    };

    let output = EquityMarginOutput {
        contract_value,
        option_premium,
        span_margin,
        exposure_margin,
        total_margin: total_margin.max(Decimal::ZERO),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Long pays premium; short posts vol-scaled SPAN proxy plus flat exposure",
        &serde_json::json!({
            "position_type": input.position_type,
            "option_type": input.option_type,
            "risk_free_rate_pct": DEFAULT_RISK_FREE_PCT.to_string(),
            "expiry_years": NEAR_MONTH_YEARS.to_string(),
        }),
        vec![],
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
