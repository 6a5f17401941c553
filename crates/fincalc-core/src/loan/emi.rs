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
pub struct EmiInput {
    pub loan_amount: Money,
    pub annual_rate_pct: Percent,
    pub years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub monthly_emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub amortization: Vec<AmortizationMonth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationMonth {
    pub month: u32,
    pub principal: Money,
    pub interest: Money,
    pub total_payment: Money,
    pub balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Standard amortizing loan: EMI = L*i*(1+i)^n / ((1+i)^n - 1) with
/// i = r/1200, n = 12*years, then a month-by-month split of each payment
/// into interest (balance * i) and principal (EMI - interest).
///
/// Degenerate inputs (zero term or non-positive loan) produce a zero result
/// with an empty schedule; a zero rate produces equal principal installments
/// with no interest. The closing balance is clamped to zero on the final
/// month so decimal residue never leaks into the schedule.
pub fn calculate_emi(input: &EmiInput) -> FinCalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();

    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "must not be negative".into(),
        });
    }

    let n = input.years * 12;
    if n == 0 || input.loan_amount <= Decimal::ZERO {
        let output = EmiOutput {
            monthly_emi: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            amortization: vec![],
        };
        let elapsed = start.elapsed().as_micros() as u64;
        return Ok(with_metadata(
            "Amortizing loan (degenerate input, empty schedule)",
            &serde_json::json!({ "months": n }),
            vec![],
            elapsed,
            output,
        ));
    }

    let i = input.annual_rate_pct / dec!(1200);
    let loan = input.loan_amount;

    let output = if i.is_zero() {
        // Interest-free loan: equal principal installments
        let monthly_emi = loan / Decimal::from(n);
        let mut amortization = Vec::with_capacity(n as usize);
        for month in 1..=n {
            let balance = if month == n {
                Decimal::ZERO
            } else {
                loan - monthly_emi * Decimal::from(month)
            };
            amortization.push(AmortizationMonth {
                month,
                principal: monthly_emi,
                interest: Decimal::ZERO,
                total_payment: monthly_emi,
                balance: balance.max(Decimal::ZERO),
            });
        }
        EmiOutput {
            monthly_emi,
            total_interest: Decimal::ZERO,
            total_payment: loan,
            amortization,
        }
    } else {
        let factor = math::compound(i, n);
        let monthly_emi = loan * i * factor / (factor - Decimal::ONE);
        let total_payment = monthly_emi * Decimal::from(n);

        let mut amortization = Vec::with_capacity(n as usize);
        let mut balance = loan;
        for month in 1..=n {
            let interest = balance * i;
            let principal = monthly_emi - interest;
            balance -= principal;
            // Final month carries the decimal residue; clamp it away
            if month == n || balance < Decimal::ZERO {
                balance = Decimal::ZERO;
            }
            amortization.push(AmortizationMonth {
                month,
                principal,
                interest,
                total_payment: monthly_emi,
                balance,
            });
        }

        EmiOutput {
            monthly_emi,
            total_interest: total_payment - loan,
            total_payment,
            amortization,
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortizing loan (equated monthly installment)",
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
// Tests
// ---------------------------------------------------------------------------
