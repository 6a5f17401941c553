use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityFuturesInput {
    pub entry_price: Money,
    pub exit_price: Money,
    pub lot_size: u32,
    pub margin_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityFuturesOutput {
    pub contract_value: Money,
    pub required_margin: Money,
    pub points_captured: Decimal,
    pub realized_pnl: Money,
    /// P&L over the margin posted, as a percentage. Zero when no margin is
    /// required.
    pub return_on_margin: Decimal,
}

/// Round-trip P&L on an equity futures lot against the margin posted at
/// entry.
pub fn calculate_equity_futures(
    input: &EquityFuturesInput,
) -> FinCalcResult<ComputationOutput<EquityFuturesOutput>> {
    let start = Instant::now();

    if input.entry_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "entry_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.exit_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "exit_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.margin_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "margin_pct".into(),
            reason: "must not be negative".into(),
        });
    }

    let lot = Decimal::from(input.lot_size);
    let contract_value = input.entry_price * lot;
    let required_margin = contract_value * input.margin_pct / dec!(100);

    let points_captured = input.exit_price - input.entry_price;
    let realized_pnl = points_captured * lot;

    let return_on_margin = if required_margin.is_zero() {
        Decimal::ZERO
    } else {
        realized_pnl / required_margin * dec!(100)
    };

    let output = EquityFuturesOutput {
        contract_value,
        required_margin,
        points_captured,
        realized_pnl,
        return_on_margin,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Futures round trip: points times lot against percentage margin",
        &serde_json::json!({
            "margin_pct": input.margin_pct.to_string(),
        }),
        vec![],
        elapsed,
        output,
    ))
}
