use fincalc_core::loan::emi::{calculate_emi, EmiInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization invariants
// ===========================================================================

#[test]
fn test_principal_column_sums_to_loan_across_terms() {
    // EMI invariant: for r > 0, principal repayments sum to the loan and the
    // balance closes at exactly zero, for a spread of loan shapes
    let cases = [
        (dec!(100_000), dec!(7.5), 1u32),
        (dec!(500_000), dec!(9), 5),
        (dec!(2_500_000), dec!(8.5), 20),
        (dec!(10_000_000), dec!(10.25), 40),
    ];

    for (loan, rate, years) in cases {
        let result = calculate_emi(&EmiInput {
            loan_amount: loan,
            annual_rate_pct: rate,
            years,
        })
        .unwrap();
        let schedule = &result.result.amortization;

        assert_eq!(schedule.len() as u32, years * 12, "schedule length for {years}y");

        let principal_sum: Decimal = schedule.iter().map(|m| m.principal).sum();
        let rel = ((principal_sum - loan) / loan).abs();
        assert!(
            rel < dec!(0.000001),
            "principal sum off by {} for loan {}",
            rel,
            loan
        );
        assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);
    }
}

#[test]
fn test_each_payment_splits_into_principal_and_interest() {
    let result = calculate_emi(&EmiInput {
        loan_amount: dec!(1_000_000),
        annual_rate_pct: dec!(9),
        years: 10,
    })
    .unwrap();
    let emi = result.result.monthly_emi;
    for row in &result.result.amortization {
        assert_eq!(row.total_payment, emi);
        let diff = (row.principal + row.interest - emi).abs();
        assert!(diff < dec!(0.0000001), "month {} split broken", row.month);
    }
}

#[test]
fn test_total_payment_is_emi_times_months() {
    let result = calculate_emi(&EmiInput {
        loan_amount: dec!(750_000),
        annual_rate_pct: dec!(11),
        years: 7,
    })
    .unwrap();
    let out = &result.result;
    assert_eq!(out.total_payment, out.monthly_emi * Decimal::from(84u32));
    assert_eq!(out.total_interest, out.total_payment - dec!(750_000));
}

// ===========================================================================
// Zero-rate case
// ===========================================================================

#[test]
fn test_zero_rate_emi_is_exact_division() {
    // monthlyEMI = L / (12 * years) exactly, totalInterest = 0
    let result = calculate_emi(&EmiInput {
        loan_amount: dec!(600_000),
        annual_rate_pct: Decimal::ZERO,
        years: 5,
    })
    .unwrap();
    let out = &result.result;
    assert_eq!(out.monthly_emi, dec!(10_000));
    assert_eq!(out.total_interest, Decimal::ZERO);
    assert_eq!(out.amortization.len(), 60);
    for row in &out.amortization {
        assert_eq!(row.interest, Decimal::ZERO);
        assert_eq!(row.principal, dec!(10_000));
    }
}

// ===========================================================================
// Degenerate inputs
// ===========================================================================

#[test]
fn test_zero_term_and_zero_loan_yield_empty_schedules() {
    for input in [
        EmiInput {
            loan_amount: dec!(100_000),
            annual_rate_pct: dec!(8),
            years: 0,
        },
        EmiInput {
            loan_amount: Decimal::ZERO,
            annual_rate_pct: dec!(8),
            years: 10,
        },
        EmiInput {
            loan_amount: dec!(-5),
            annual_rate_pct: dec!(8),
            years: 10,
        },
    ] {
        let result = calculate_emi(&input).unwrap();
        assert_eq!(result.result.monthly_emi, Decimal::ZERO);
        assert_eq!(result.result.total_payment, Decimal::ZERO);
        assert!(result.result.amortization.is_empty());
    }
}

// ===========================================================================
// Longest supported schedule
// ===========================================================================

#[test]
fn test_forty_year_schedule_has_480_months() {
    let result = calculate_emi(&EmiInput {
        loan_amount: dec!(5_000_000),
        annual_rate_pct: dec!(8),
        years: 40,
    })
    .unwrap();
    let schedule = &result.result.amortization;
    assert_eq!(schedule.len(), 480);
    // Months are numbered 1..=480 in order
    for (idx, row) in schedule.iter().enumerate() {
        assert_eq!(row.month as usize, idx + 1);
    }
}
