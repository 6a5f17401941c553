use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyMarginInput {
    pub usdinr_price: Money,
    /// Contract size in USD.
    pub lot_size_usd: u32,
    pub span_pct: Percent,
    pub exposure_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyMarginOutput {
    /// Rupee value of the USD lot.
    pub contract_value: Money,
    pub span_margin: Money,
    pub exposure_margin: Money,
    pub total_margin: Money,
}

/// Currency derivatives margin: the rupee contract value (USD lot times the
/// USD/INR rate) times the SPAN and exposure percentages.
pub fn calculate_currency_margin(
    input: &CurrencyMarginInput,
) -> FinCalcResult<ComputationOutput<CurrencyMarginOutput>> {
    let start = Instant::now();

    if input.usdinr_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "usdinr_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.span_pct < Decimal::ZERO || input.exposure_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "span_pct".into(),
            reason: "margin percentages must not be negative".into(),
        });
    }

    let contract_value = input.usdinr_price * Decimal::from(input.lot_size_usd);
    let span_margin = contract_value * input.span_pct / dec!(100);
    let exposure_margin = contract_value * input.exposure_pct / dec!(100);

    let output = CurrencyMarginOutput {
        contract_value,
        span_margin,
        exposure_margin,
        total_margin: span_margin + exposure_margin,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rupee contract value times SPAN and exposure percentages",
        &serde_json::json!({
            "span_pct": input.span_pct.to_string(),
            "exposure_pct": input.exposure_pct.to_string(),
        }),
        vec![],
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_margin_reference() {
        // $1000 at 83.50 = 83,500; 2% SPAN + 1% exposure = 2505
        let result = calculate_currency_margin(&CurrencyMarginInput {
            usdinr_price: dec!(83.5),
            lot_size_usd: 1000,
            span_pct: dec!(2),
            exposure_pct: dec!(1),
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.contract_value, dec!(83_500));
        assert_eq!(out.span_margin, dec!(1_670));
        assert_eq!(out.exposure_margin, dec!(835));
        assert_eq!(out.total_margin, dec!(2_505));
    }

    #[test]
    fn test_currency_margin_negative_rate_rejected() {
        assert!(calculate_currency_margin(&CurrencyMarginInput {
            usdinr_price: dec!(-83.5),
            lot_size_usd: 1000,
            span_pct: dec!(2),
            exposure_pct: dec!(1),
        })
        .is_err());
    }
}
