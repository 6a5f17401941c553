use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommodityMarginInput {
    pub commodity_price: Money,
    pub lot_size: u32,
    /// SPAN requirement as a percentage of contract value.
    pub span_factor_pct: Percent,
    /// Exposure requirement as a percentage of contract value.
    pub exposure_factor_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommodityMarginOutput {
    pub contract_value: Money,
    pub span_margin: Money,
    pub exposure_margin: Money,
    pub total_margin: Money,
}

/// Commodity futures margin: contract value times the SPAN and exposure
/// percentages.
pub fn calculate_commodity_margin(
    input: &CommodityMarginInput,
) -> FinCalcResult<ComputationOutput<CommodityMarginOutput>> {
    let start = Instant::now();

    if input.commodity_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "commodity_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.span_factor_pct < Decimal::ZERO || input.exposure_factor_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "span_factor_pct".into(),
            reason: "margin factors must not be negative".into(),
        });
    }

    let contract_value = input.commodity_price * Decimal::from(input.lot_size);
    let span_margin = contract_value * input.span_factor_pct / dec!(100);
    let exposure_margin = contract_value * input.exposure_factor_pct / dec!(100);

    let output = CommodityMarginOutput {
        contract_value,
        span_margin,
        exposure_margin,
        total_margin: span_margin + exposure_margin,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Contract value times SPAN and exposure percentages",
        &serde_json::json!({
            "span_factor_pct": input.span_factor_pct.to_string(),
            "exposure_factor_pct": input.exposure_factor_pct.to_string(),
        }),
        vec![],
        elapsed,
        output,
    ))
}
