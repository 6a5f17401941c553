use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::math;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpsumInput {
    pub principal: Money,
    pub years: u32,
    pub annual_return_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpsumOutput {
    pub total_investment: Money,
    pub total_value: Money,
    pub estimated_returns: Money,
}

/// Single-deposit compounding: FV = P * (1 + r/100)^years.
pub fn calculate_lumpsum(input: &LumpsumInput) -> FinCalcResult<ComputationOutput<LumpsumOutput>> {
    let start = Instant::now();

    if input.principal < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "principal".into(),
            reason: "must not be negative".into(),
        });
    }

    let annual_rate = input.annual_return_pct / dec!(100);
    let total_value = input.principal * math::compound(annual_rate, input.years);

    let output = LumpsumOutput {
        total_investment: input.principal,
        total_value,
        estimated_returns: total_value - input.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annual compounding of a single deposit",
        &serde_json::json!({
            "annual_rate": annual_rate.to_string(),
            "years": input.years,
        }),
        vec![],
        elapsed,
        output,
    ))
}
