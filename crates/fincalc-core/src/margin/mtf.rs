use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MtfInput {
    pub stock_price: Money,
    pub quantity: u32,
    /// Investor's share of the position value, as a percentage.
    pub margin_requirement_pct: Percent,
    /// Annual interest rate charged on the broker-funded portion.
    pub interest_rate_pct: Percent,
    pub holding_period_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MtfOutput {
    pub total_value: Money,
    pub required_margin: Money,
    pub broker_funding: Money,
    pub interest_cost: Money,
    /// Investor outlay: margin posted plus funding interest.
    pub total_cost: Money,
}

/// Margin trading facility: the investor posts a percentage of the position,
/// the broker funds the rest and charges simple interest on it, pro-rated
/// over the holding period on a 365-day year.
pub fn calculate_mtf(input: &MtfInput) -> FinCalcResult<ComputationOutput<MtfOutput>> {
    let start = Instant::now();

    if input.stock_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "stock_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.margin_requirement_pct < Decimal::ZERO || input.margin_requirement_pct > dec!(100) {
        return Err(FinCalcError::InvalidInput {
            field: "margin_requirement_pct".into(),
            reason: "must be between 0 and 100".into(),
        });
    }
    if input.interest_rate_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "interest_rate_pct".into(),
            reason: "must not be negative".into(),
        });
    }

    let total_value = input.stock_price * Decimal::from(input.quantity);
    let required_margin = total_value * input.margin_requirement_pct / dec!(100);
    let broker_funding = total_value - required_margin;

    let interest_cost = broker_funding * input.interest_rate_pct / dec!(100)
        * Decimal::from(input.holding_period_days)
        / dec!(365);

    let output = MtfOutput {
        total_value,
        required_margin,
        broker_funding,
        interest_cost,
        total_cost: required_margin + interest_cost,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Broker-funded position with simple interest on the funded portion",
        &serde_json::json!({
            "margin_requirement_pct": input.margin_requirement_pct.to_string(),
            "interest_rate_pct": input.interest_rate_pct.to_string(),
            "holding_period_days": input.holding_period_days,
        }),
        vec![],
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_input() -> MtfInput {
        MtfInput {
            stock_price: dec!(1_000),
            quantity: 100,
            margin_requirement_pct: dec!(25),
            interest_rate_pct: dec!(12),
            holding_period_days: 30,
        }
    }

    #[test]
    fn test_mtf_reference_position() {
        let result = calculate_mtf(&default_input()).unwrap();
        let out = &result.result;
        assert_eq!(out.total_value, dec!(100_000));
        assert_eq!(out.required_margin, dec!(25_000));
        assert_eq!(out.broker_funding, dec!(75_000));
        // 75000 * 12% * 30/365 = 739.726...
        assert!((out.interest_cost - dec!(739.73)).abs() < dec!(0.01));
        assert_eq!(out.total_cost, out.required_margin + out.interest_cost);
    }

    #[test]
    fn test_mtf_full_margin_has_no_funding_cost() {
        let result = calculate_mtf(&MtfInput {
            margin_requirement_pct: dec!(100),
            ..default_input()
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.broker_funding, Decimal::ZERO);
        assert_eq!(out.interest_cost, Decimal::ZERO);
        assert_eq!(out.total_cost, out.required_margin);
    }

    #[test]
    fn test_mtf_interest_scales_with_holding_period() {
        let month = calculate_mtf(&default_input()).unwrap();
        let quarter = calculate_mtf(&MtfInput {
            holding_period_days: 90,
            ..default_input()
        })
        .unwrap();
        let diff = (quarter.result.interest_cost - month.result.interest_cost * dec!(3)).abs();
        assert!(diff < dec!(0.0000001), "diff {}", diff);
    }

    #[test]
    fn test_mtf_margin_above_100_rejected() {
        assert!(calculate_mtf(&MtfInput {
            margin_requirement_pct: dec!(120),
            ..default_input()
        })
        .is_err());
    }
}
