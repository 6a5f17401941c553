use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::math;
use crate::options::black_scholes;
use crate::types::{with_metadata, ComputationOutput, Money, OptionType, Percent};
use crate::FinCalcResult;

use super::NEAR_MONTH_YEARS;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoMarginInput {
    pub stock_price: Money,
    pub strike_price: Money,
    pub lot_size: u32,
    pub volatility_pct: Percent,
    pub risk_free_rate_pct: Percent,
    pub option_type: OptionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoMarginOutput {
    /// Theoretical premium for the full lot at the near-month expiry.
    pub option_premium: Money,
    /// How far out of the money the strike sits, per lot.
    pub otm_amount: Money,
    /// Volatility-scaled one-month move on the contract value.
    pub exposure_margin: Money,
    pub total_margin: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Margin for a short F&O option position: the lot premium plus a
/// volatility-derived exposure, reduced by the out-of-the-money cushion.
/// The exposure offset can never push the margin below the premium itself.
pub fn calculate_fo_margin(
    input: &FoMarginInput,
) -> FinCalcResult<ComputationOutput<FoMarginOutput>> {
    let start = Instant::now();

    if input.stock_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "stock_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.strike_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "strike_price".into(),
            reason: "must not be negative".into(),
        });
    }

    let s = input.stock_price;
    let k = input.strike_price;
    let lot = Decimal::from(input.lot_size);

    let (call, put) = black_scholes::price_pair(
        s,
        k,
        NEAR_MONTH_YEARS,
        input.volatility_pct,
        input.risk_free_rate_pct,
    );
    let unit_premium = match input.option_type {
        OptionType::Call => call,
        OptionType::Put => put,
    };
    let option_premium = unit_premium * lot;

    let otm_amount = match input.option_type {
        OptionType::Call => (k - s).max(Decimal::ZERO) * lot,
        OptionType::Put => (s - k).max(Decimal::ZERO) * lot,
    };

    let contract_value = s * lot;
    let exposure_margin =
        contract_value * input.volatility_pct / dec!(100) * math::sqrt(NEAR_MONTH_YEARS);

    let total_margin = option_premium + (exposure_margin - otm_amount).max(Decimal::ZERO);

    let output = FoMarginOutput {
        option_premium,
        otm_amount,
        exposure_margin,
        total_margin,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Premium plus volatility-scaled exposure, offset by OTM cushion",
        &serde_json::json!({
            "option_type": input.option_type,
            "expiry_years": NEAR_MONTH_YEARS.to_string(),
            "volatility_pct": input.volatility_pct.to_string(),
        }),
        vec![],
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> FoMarginInput {
        FoMarginInput {
            stock_price: dec!(100),
            strike_price: dec!(100),
            lot_size: 1000,
            volatility_pct: dec!(20),
            risk_free_rate_pct: dec!(5),
            option_type: OptionType::Call,
        }
    }

    #[test]
    fn test_atm_margin_is_premium_plus_full_exposure() {
        // ATM has no OTM cushion, so the exposure applies in full
        let result = calculate_fo_margin(&atm_call()).unwrap();
        let out = &result.result;
        assert_eq!(out.otm_amount, Decimal::ZERO);
        assert_eq!(out.total_margin, out.option_premium + out.exposure_margin);
        assert!(out.option_premium > Decimal::ZERO);
        assert!(out.exposure_margin > Decimal::ZERO);
    }

    #[test]
    fn test_otm_cushion_reduces_margin() {
        let atm = calculate_fo_margin(&atm_call()).unwrap();
        let otm = calculate_fo_margin(&FoMarginInput {
            strike_price: dec!(105),
            ..atm_call()
        })
        .unwrap();
        assert!(otm.result.otm_amount > Decimal::ZERO);
        assert!(otm.result.total_margin < atm.result.total_margin);
    }

    #[test]
    fn test_deep_otm_margin_floors_at_premium() {
        // OTM cushion exceeds exposure; the offset floors at zero and only
        // the (tiny) premium remains
        let result = calculate_fo_margin(&FoMarginInput {
            strike_price: dec!(150),
            ..atm_call()
        })
        .unwrap();
        let out = &result.result;
        assert!(out.otm_amount > out.exposure_margin);
        assert_eq!(out.total_margin, out.option_premium);
        assert!(out.total_margin >= Decimal::ZERO);
    }

    #[test]
    fn test_put_mirror() {
        // For a put, the OTM side flips: spot above strike is the cushion
        let result = calculate_fo_margin(&FoMarginInput {
            stock_price: dec!(110),
            strike_price: dec!(100),
            option_type: OptionType::Put,
            ..atm_call()
        })
        .unwrap();
        assert_eq!(result.result.otm_amount, dec!(10) * dec!(1000));
    }

    #[test]
    fn test_higher_volatility_raises_margin() {
        let calm = calculate_fo_margin(&atm_call()).unwrap();
        let wild = calculate_fo_margin(&FoMarginInput {
            volatility_pct: dec!(40),
            ..atm_call()
        })
        .unwrap();
        assert!(wild.result.total_margin > calm.result.total_margin);
    }
}
