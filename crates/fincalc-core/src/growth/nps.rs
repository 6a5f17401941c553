use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::math;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpsInput {
    pub monthly_investment: Money,
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_return_pct: Percent,
    /// Share of the corpus converted to an annuity at retirement (40–100 by
    /// scheme rules; any 0–100 value is accepted here).
    pub annuity_pct: Percent,
    /// Flat annual annuity rate used to convert the annuity value into a
    /// monthly pension.
    pub annuity_rate_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpsOutput {
    pub total_investment: Money,
    pub total_interest: Money,
    pub total_corpus: Money,
    pub annuity_value: Money,
    pub lump_sum_value: Money,
    pub monthly_pension: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// NPS accumulation and annuitization: SIP-style accumulation until
/// retirement, then the corpus splits into an annuity purchase and a lump-sum
/// withdrawal. Pension = annuity value * annuity rate / 1200.
pub fn calculate_nps(input: &NpsInput) -> FinCalcResult<ComputationOutput<NpsOutput>> {
    let start = Instant::now();

    if input.monthly_investment < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "monthly_investment".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.retirement_age <= input.current_age {
        return Err(FinCalcError::InvalidInput {
            field: "retirement_age".into(),
            reason: "must be greater than current_age".into(),
        });
    }
    if input.annuity_pct < Decimal::ZERO || input.annuity_pct > dec!(100) {
        return Err(FinCalcError::InvalidInput {
            field: "annuity_pct".into(),
            reason: "must be between 0 and 100".into(),
        });
    }

    let investment_years = input.retirement_age - input.current_age;
    let n = investment_years * 12;
    let i = input.annual_return_pct / dec!(1200);

    let total_investment = input.monthly_investment * Decimal::from(n);
    let total_corpus = if i.is_zero() {
        total_investment
    } else {
        let factor = math::compound(i, n);
        input.monthly_investment * ((factor - Decimal::ONE) / i) * (Decimal::ONE + i)
    };

    let annuity_value = total_corpus * input.annuity_pct / dec!(100);
    let lump_sum_value = total_corpus - annuity_value;
    let monthly_pension = annuity_value * input.annuity_rate_pct / dec!(1200);

    let output = NpsOutput {
        total_investment,
        total_interest: total_corpus - total_investment,
        total_corpus,
        annuity_value,
        lump_sum_value,
        monthly_pension,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP accumulation to retirement, then flat-rate annuitization",
        &serde_json::json!({
            "investment_years": investment_years,
            "monthly_rate": i.to_string(),
            "annuity_pct": input.annuity_pct.to_string(),
            "annuity_rate_pct": input.annuity_rate_pct.to_string(),
        }),
        vec![],
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
