use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxInput {
    pub income: Money,
    /// Chapter VI-A style deductions; honored only under the old regime.
    pub deductions: Money,
    pub is_senior: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    Old,
    New,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxOutput {
    pub old_regime: RegimeTax,
    pub new_regime: RegimeTax,
    pub recommended: Regime,
    pub savings: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeTax {
    pub taxable_income: Money,
    pub slabs: Vec<SlabTax>,
    pub base_tax: Money,
    pub cess: Money,
    pub total_tax: Money,
}

/// One slab line for display: the bracket description and the tax it raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabTax {
    pub slab: String,
    pub tax: Money,
}

/// Health & education cess applied on top of the slab total.
const CESS_RATE: Decimal = dec!(0.04);

// ---------------------------------------------------------------------------
// Slab schedules. Upper bound None marks the open top bracket.
// ---------------------------------------------------------------------------

struct Slab {
    upper: Option<Decimal>,
    rate: Rate,
}

fn old_regime_slabs(is_senior: bool) -> Vec<Slab> {
    let exemption = if is_senior { dec!(300_000) } else { dec!(250_000) };
    vec![
        Slab { upper: Some(exemption), rate: Decimal::ZERO },
        Slab { upper: Some(dec!(500_000)), rate: dec!(0.05) },
        Slab { upper: Some(dec!(1_000_000)), rate: dec!(0.20) },
        Slab { upper: None, rate: dec!(0.30) },
    ]
}

fn new_regime_slabs() -> Vec<Slab> {
    vec![
        Slab { upper: Some(dec!(300_000)), rate: Decimal::ZERO },
        Slab { upper: Some(dec!(600_000)), rate: dec!(0.05) },
        Slab { upper: Some(dec!(900_000)), rate: dec!(0.10) },
        Slab { upper: Some(dec!(1_200_000)), rate: dec!(0.15) },
        Slab { upper: Some(dec!(1_500_000)), rate: dec!(0.20) },
        Slab { upper: None, rate: dec!(0.30) },
    ]
}

// ---------------------------------------------------------------------------
// Shared progressive-slab evaluator
// ---------------------------------------------------------------------------

/// Walk the ordered slabs, taxing only the portion of income that falls
/// inside each bracket, and record per-slab detail for display.
fn evaluate_slabs(taxable: Money, slabs: &[Slab]) -> RegimeTax {
    let mut lines = Vec::with_capacity(slabs.len());
    let mut base_tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for slab in slabs {
        let in_bracket = match slab.upper {
            Some(upper) => (taxable.min(upper) - lower).max(Decimal::ZERO),
            None => (taxable - lower).max(Decimal::ZERO),
        };
        let tax = in_bracket * slab.rate;
        base_tax += tax;

        let pct = (slab.rate * dec!(100)).normalize();
        let label = match slab.upper {
            Some(upper) => format!("{} - {} @ {}%", lower, upper, pct),
            None => format!("Above {} @ {}%", lower, pct),
        };
        lines.push(SlabTax { slab: label, tax });

        if let Some(upper) = slab.upper {
            lower = upper;
        }
    }

    let cess = base_tax * CESS_RATE;
    RegimeTax {
        taxable_income: taxable,
        slabs: lines,
        base_tax,
        cess,
        total_tax: base_tax + cess,
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Tax under both regimes: the old regime taxes deduction-adjusted income on
/// the 5/20/30 schedule (higher exemption for seniors); the new regime taxes
/// gross income on its wider bands with no deductions. The cheaper regime is
/// recommended; a tie keeps the old regime.
pub fn calculate_tax(input: &TaxInput) -> FinCalcResult<ComputationOutput<TaxOutput>> {
    let start = Instant::now();

    if input.income < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "income".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.deductions < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "deductions".into(),
            reason: "must not be negative".into(),
        });
    }

    let old_taxable = (input.income - input.deductions).max(Decimal::ZERO);
    let old_regime = evaluate_slabs(old_taxable, &old_regime_slabs(input.is_senior));
    let new_regime = evaluate_slabs(input.income, &new_regime_slabs());

    let recommended = if new_regime.total_tax < old_regime.total_tax {
        Regime::New
    } else {
        Regime::Old
    };
    let savings = (old_regime.total_tax - new_regime.total_tax).abs();

    let output = TaxOutput {
        old_regime,
        new_regime,
        recommended,
        savings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Progressive slab evaluation under both regimes with 4% cess",
        &serde_json::json!({
            "is_senior": input.is_senior,
            "cess_rate": CESS_RATE.to_string(),
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
    use pretty_assertions::assert_eq;

    fn reference_input() -> TaxInput {
        TaxInput {
            income: dec!(1_000_000),
            deductions: dec!(150_000),
            is_senior: false,
        }
    }

    #[test]
    fn test_reference_old_regime() {
        // Taxable 8.5L: 2.5L @ 0 + 2.5L @ 5% (12500) + 3.5L @ 20% (70000)
        // = 82500, + 4% cess = 85800
        let result = calculate_tax(&reference_input()).unwrap();
        let old = &result.result.old_regime;
        assert_eq!(old.taxable_income, dec!(850_000));
        assert_eq!(old.base_tax, dec!(82_500));
        assert_eq!(old.cess, dec!(3_300));
        assert_eq!(old.total_tax, dec!(85_800));
    }

    #[test]
    fn test_reference_new_regime() {
        // Gross 10L: 3L @ 0 + 3L @ 5% (15000) + 3L @ 10% (30000)
        // + 1L @ 15% (15000) = 60000, + 4% cess = 62400
        let result = calculate_tax(&reference_input()).unwrap();
        let new = &result.result.new_regime;
        assert_eq!(new.taxable_income, dec!(1_000_000));
        assert_eq!(new.base_tax, dec!(60_000));
        assert_eq!(new.total_tax, dec!(62_400));
    }

    #[test]
    fn test_reference_recommends_cheaper_regime() {
        let result = calculate_tax(&reference_input()).unwrap();
        let out = &result.result;
        assert_eq!(out.recommended, Regime::New);
        assert_eq!(out.savings, dec!(23_400));
    }

    #[test]
    fn test_senior_exemption_widens_old_regime_zero_slab() {
        let junior = calculate_tax(&TaxInput {
            income: dec!(600_000),
            deductions: Decimal::ZERO,
            is_senior: false,
        })
        .unwrap();
        let senior = calculate_tax(&TaxInput {
            income: dec!(600_000),
            deductions: Decimal::ZERO,
            is_senior: true,
        })
        .unwrap();
        // The extra 50k of exemption saves 50k * 5% * 1.04 = 2600
        let saved = junior.result.old_regime.total_tax - senior.result.old_regime.total_tax;
        assert_eq!(saved, dec!(2_600));
    }

    #[test]
    fn test_income_below_exemption_pays_nothing() {
        let result = calculate_tax(&TaxInput {
            income: dec!(240_000),
            deductions: Decimal::ZERO,
            is_senior: false,
        })
        .unwrap();
        assert_eq!(result.result.old_regime.total_tax, Decimal::ZERO);
        assert_eq!(result.result.new_regime.total_tax, Decimal::ZERO);
        // A tie keeps the old regime
        assert_eq!(result.result.recommended, Regime::Old);
        assert_eq!(result.result.savings, Decimal::ZERO);
    }

    #[test]
    fn test_deductions_cannot_drive_taxable_negative() {
        let result = calculate_tax(&TaxInput {
            income: dec!(200_000),
            deductions: dec!(500_000),
            is_senior: false,
        })
        .unwrap();
        assert_eq!(result.result.old_regime.taxable_income, Decimal::ZERO);
        assert_eq!(result.result.old_regime.total_tax, Decimal::ZERO);
    }

    #[test]
    fn test_slab_detail_sums_to_base_tax() {
        let result = calculate_tax(&TaxInput {
            income: dec!(2_000_000),
            deductions: dec!(150_000),
            is_senior: false,
        })
        .unwrap();
        for regime in [&result.result.old_regime, &result.result.new_regime] {
            let sum: Decimal = regime.slabs.iter().map(|s| s.tax).sum();
            assert_eq!(sum, regime.base_tax);
        }
    }

    #[test]
    fn test_high_income_hits_top_bracket_in_both_regimes() {
        let result = calculate_tax(&TaxInput {
            income: dec!(5_000_000),
            deductions: Decimal::ZERO,
            is_senior: false,
        })
        .unwrap();
        let old_top = result.result.old_regime.slabs.last().unwrap();
        let new_top = result.result.new_regime.slabs.last().unwrap();
        // Old: (50L - 10L) * 30% = 12L; New: (50L - 15L) * 30% = 10.5L
        assert_eq!(old_top.tax, dec!(1_200_000));
        assert_eq!(new_top.tax, dec!(1_050_000));
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(calculate_tax(&TaxInput {
            income: dec!(-1),
            deductions: Decimal::ZERO,
            is_senior: false,
        })
        .is_err());
    }
}
