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
pub struct SipInput {
    pub monthly_investment: Money,
    pub years: u32,
    pub annual_return_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepUpSipInput {
    pub monthly_investment: Money,
    /// Percentage increase applied to the contribution at each year boundary.
    pub annual_step_up_pct: Percent,
    pub years: u32,
    pub annual_return_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    pub total_investment: Money,
    pub total_value: Money,
    pub estimated_returns: Money,
    pub breakdown: Vec<SipYear>,
}

/// One year in the accumulation schedule. Values are cumulative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipYear {
    pub year: u32,
    pub invested: Money,
    pub returns: Money,
    pub total: Money,
}

// ---------------------------------------------------------------------------
// SIP
// ---------------------------------------------------------------------------

/// Future value of a monthly SIP via the annuity-due closed form:
/// FV = P * (((1+i)^n - 1) / i) * (1+i) with i = r/1200, n = 12*years.
/// A zero rate degenerates to linear accumulation.
pub fn calculate_sip(input: &SipInput) -> FinCalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();

    if input.monthly_investment < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "monthly_investment".into(),
            reason: "must not be negative".into(),
        });
    }

    let i = input.annual_return_pct / dec!(1200);

    let mut breakdown = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        let months = year * 12;
        let invested = input.monthly_investment * Decimal::from(months);
        let total = annuity_due_fv(input.monthly_investment, i, months);
        breakdown.push(SipYear {
            year,
            invested,
            returns: total - invested,
            total,
        });
    }

    let n = input.years * 12;
    let total_investment = input.monthly_investment * Decimal::from(n);
    let total_value = annuity_due_fv(input.monthly_investment, i, n);

    let output = SipOutput {
        total_investment,
        total_value,
        estimated_returns: total_value - total_investment,
        breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Future value of annuity-due (monthly compounding)",
        &serde_json::json!({
            "monthly_rate": i.to_string(),
            "months": n,
        }),
        vec![],
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Step-up SIP
// ---------------------------------------------------------------------------

/// Step-up SIP has no closed form because the contribution changes at each
/// year boundary; it is simulated month by month. Each month the contribution
/// is added, then the running balance earns one month of interest.
pub fn calculate_step_up_sip(
    input: &StepUpSipInput,
) -> FinCalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();

    if input.monthly_investment < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "monthly_investment".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.annual_step_up_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_step_up_pct".into(),
            reason: "must not be negative".into(),
        });
    }

    let i = input.annual_return_pct / dec!(1200);
    let step_factor = Decimal::ONE + input.annual_step_up_pct / dec!(100);
    let n = input.years * 12;

    let mut contribution = input.monthly_investment;
    let mut value = Decimal::ZERO;
    let mut invested = Decimal::ZERO;
    let mut breakdown = Vec::with_capacity(input.years as usize);

    for month in 0..n {
        if month > 0 && month % 12 == 0 {
            contribution *= step_factor;
        }
        invested += contribution;
        value = (value + contribution) * (Decimal::ONE + i);

        if (month + 1) % 12 == 0 {
            breakdown.push(SipYear {
                year: (month + 1) / 12,
                invested,
                returns: value - invested,
                total: value,
            });
        }
    }

    let output = SipOutput {
        total_investment: invested,
        total_value: value,
        estimated_returns: value - invested,
        breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Month-by-month SIP simulation with annual contribution step-up",
        &serde_json::json!({
            "monthly_rate": i.to_string(),
            "step_up_factor": step_factor.to_string(),
            "months": n,
        }),
        vec![],
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// FV of `pmt` contributed at the start of each of `n` months at monthly
/// rate `i`. i = 0 collapses to pmt * n; the division is guarded.
fn annuity_due_fv(pmt: Money, i: Decimal, n: u32) -> Money {
    if i.is_zero() {
        return pmt * Decimal::from(n);
    }
    let factor = math::compound(i, n);
    pmt * ((factor - Decimal::ONE) / i) * (Decimal::ONE + i)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
