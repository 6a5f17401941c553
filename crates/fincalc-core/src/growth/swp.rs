use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpInput {
    pub total_investment: Money,
    pub monthly_withdrawal: Money,
    pub annual_return_pct: Percent,
    pub years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpOutput {
    pub total_withdrawal: Money,
    pub total_interest: Money,
    pub final_balance: Money,
    pub breakdown: Vec<SwpYear>,
}

/// Year-end snapshot. `withdrawn` and `interest` are cumulative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpYear {
    pub year: u32,
    pub withdrawn: Money,
    pub interest: Money,
    pub balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Month-by-month drawdown: the balance earns one month of interest, then the
/// fixed withdrawal is taken. A withdrawal is capped at the available balance
/// so the corpus can never go negative, and total interest reconciles exactly
/// as final_balance + total_withdrawn - total_investment.
pub fn calculate_swp(input: &SwpInput) -> FinCalcResult<ComputationOutput<SwpOutput>> {
    let start = Instant::now();

    if input.total_investment < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "total_investment".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.monthly_withdrawal < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "monthly_withdrawal".into(),
            reason: "must not be negative".into(),
        });
    }

    let i = input.annual_return_pct / dec!(1200);
    let n = input.years * 12;

    let mut balance = input.total_investment;
    let mut total_withdrawn = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut breakdown = Vec::with_capacity(input.years as usize);
    let mut exhausted_at: Option<u32> = None;

    for month in 1..=n {
        let interest = balance * i;
        balance += interest;
        total_interest += interest;

        let withdrawal = input.monthly_withdrawal.min(balance);
        balance -= withdrawal;
        total_withdrawn += withdrawal;

        if exhausted_at.is_none() && withdrawal < input.monthly_withdrawal {
            exhausted_at = Some(month);
        }

        if month % 12 == 0 {
            breakdown.push(SwpYear {
                year: month / 12,
                withdrawn: total_withdrawn,
                interest: total_interest,
                balance,
            });
        }
    }

    let mut warnings = Vec::new();
    if let Some(month) = exhausted_at {
        warnings.push(format!(
            "Corpus exhausted in month {month}; later withdrawals were reduced"
        ));
    }

    let output = SwpOutput {
        total_withdrawal: total_withdrawn,
        total_interest: balance + total_withdrawn - input.total_investment,
        final_balance: balance,
        breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Month-by-month withdrawal simulation (interest first, then withdrawal)",
        &serde_json::json!({
            "monthly_rate": i.to_string(),
            "months": n,
        }),
        warnings,
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

    fn default_input() -> SwpInput {
        SwpInput {
            total_investment: dec!(1_000_000),
            monthly_withdrawal: dec!(8_000),
            annual_return_pct: dec!(8),
            years: 10,
        }
    }

    #[test]
    fn test_swp_interest_reconciliation() {
        let result = calculate_swp(&default_input()).unwrap();
        let out = &result.result;
        assert_eq!(
            out.total_interest,
            out.final_balance + out.total_withdrawal - dec!(1_000_000)
        );
        // Withdrawals outpace interest slightly, so the corpus erodes but
        // survives the full term
        assert!(out.final_balance > Decimal::ZERO);
        assert!(out.final_balance < dec!(1_000_000));
        assert_eq!(out.total_withdrawal, dec!(8_000) * Decimal::from(120u32));
    }

    #[test]
    fn test_swp_floors_at_zero_when_overdrawn() {
        // 50k/month from 10L at 6% exhausts the corpus well before 10 years
        let result = calculate_swp(&SwpInput {
            total_investment: dec!(1_000_000),
            monthly_withdrawal: dec!(50_000),
            annual_return_pct: dec!(6),
            years: 10,
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.final_balance, Decimal::ZERO);
        // Cannot withdraw more than was ever in the fund
        assert!(out.total_withdrawal < dec!(50_000) * Decimal::from(120u32));
        assert!(!result.warnings.is_empty());
        // Every snapshot balance is non-negative
        assert!(out.breakdown.iter().all(|y| y.balance >= Decimal::ZERO));
    }

    #[test]
    fn test_swp_yearly_snapshots() {
        let result = calculate_swp(&default_input()).unwrap();
        let breakdown = &result.result.breakdown;
        assert_eq!(breakdown.len(), 10);
        assert_eq!(breakdown.last().unwrap().balance, result.result.final_balance);
        // Cumulative withdrawn is non-decreasing
        for pair in breakdown.windows(2) {
            assert!(pair[1].withdrawn >= pair[0].withdrawn);
        }
    }

    #[test]
    fn test_swp_zero_rate() {
        // No growth: withdrawals simply drain the corpus
        let result = calculate_swp(&SwpInput {
            total_investment: dec!(120_000),
            monthly_withdrawal: dec!(10_000),
            annual_return_pct: Decimal::ZERO,
            years: 1,
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.final_balance, Decimal::ZERO);
        assert_eq!(out.total_withdrawal, dec!(120_000));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_swp_negative_withdrawal_rejected() {
        let mut input = default_input();
        input.monthly_withdrawal = dec!(-1);
        assert!(calculate_swp(&input).is_err());
    }
}
