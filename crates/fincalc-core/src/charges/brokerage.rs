use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, TransactionType};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Regulatory charge rates. These are domain constants fixed by exchange and
// statute, not tunable parameters.
// ---------------------------------------------------------------------------

/// Flat ceiling on the brokerage fee for an intraday round trip.
const INTRADAY_BROKERAGE_CAP: Decimal = dec!(40);
/// Securities transaction tax: intraday, on the sell value only.
const STT_INTRADAY_SELL: Decimal = dec!(0.00025);
/// Securities transaction tax: delivery, on both legs (turnover).
const STT_DELIVERY: Decimal = dec!(0.001);
/// Exchange transaction charge on turnover.
const EXCHANGE_TXN_CHARGE: Decimal = dec!(0.0000325);
/// GST on brokerage plus exchange transaction charge.
const GST_RATE: Decimal = dec!(0.18);
/// SEBI turnover fee (Rs 10 per crore).
const SEBI_FEE: Decimal = dec!(0.000001);
/// Stamp duty on the buy value.
const STAMP_INTRADAY: Decimal = dec!(0.00003);
const STAMP_DELIVERY: Decimal = dec!(0.00015);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerageInput {
    pub buy_price: Money,
    pub sell_price: Money,
    pub quantity: u32,
    pub brokerage_pct: Percent,
    pub transaction_type: TransactionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerageOutput {
    pub buy_value: Money,
    pub sell_value: Money,
    pub turnover: Money,
    pub gross_pnl: Money,
    pub brokerage_charge: Money,
    pub stt: Money,
    pub transaction_charge: Money,
    pub gst: Money,
    pub sebi_charge: Money,
    pub stamp_duty: Money,
    pub total_charges: Money,
    pub net_pnl: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Full charge sheet for an equity round trip. Every line is a fixed-rate
/// percentage of turnover or of one leg's value; net P&L is gross P&L less
/// the sum of all charges.
pub fn calculate_brokerage(
    input: &BrokerageInput,
) -> FinCalcResult<ComputationOutput<BrokerageOutput>> {
    let start = Instant::now();

    if input.buy_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "buy_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.sell_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "sell_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.brokerage_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "brokerage_pct".into(),
            reason: "must not be negative".into(),
        });
    }

    let qty = Decimal::from(input.quantity);
    let buy_value = input.buy_price * qty;
    let sell_value = input.sell_price * qty;
    let turnover = buy_value + sell_value;
    let gross_pnl = sell_value - buy_value;

    let brokerage_raw = turnover * input.brokerage_pct / dec!(100);
    let brokerage_charge = match input.transaction_type {
        TransactionType::Intraday => brokerage_raw.min(INTRADAY_BROKERAGE_CAP),
        TransactionType::Delivery => brokerage_raw,
    };

    let stt = match input.transaction_type {
        TransactionType::Intraday => sell_value * STT_INTRADAY_SELL,
        TransactionType::Delivery => turnover * STT_DELIVERY,
    };

    let transaction_charge = turnover * EXCHANGE_TXN_CHARGE;
    let gst = (brokerage_charge + transaction_charge) * GST_RATE;
    let sebi_charge = turnover * SEBI_FEE;

    let stamp_duty = match input.transaction_type {
        TransactionType::Intraday => buy_value * STAMP_INTRADAY,
        TransactionType::Delivery => buy_value * STAMP_DELIVERY,
    };

    let total_charges = brokerage_charge + stt + transaction_charge + gst + sebi_charge + stamp_duty;

    let output = BrokerageOutput {
        buy_value,
        sell_value,
        turnover,
        gross_pnl,
        brokerage_charge,
        stt,
        transaction_charge,
        gst,
        sebi_charge,
        stamp_duty,
        total_charges,
        net_pnl: gross_pnl - total_charges,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate regulatory charge sheet on turnover",
        &serde_json::json!({
            "transaction_type": input.transaction_type,
            "brokerage_pct": input.brokerage_pct.to_string(),
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

    /// Worked reference: buy 100 @ 100, sell 100 @ 110, 0.05% brokerage,
    /// intraday.
    fn reference_intraday() -> BrokerageInput {
        BrokerageInput {
            buy_price: dec!(100),
            sell_price: dec!(110),
            quantity: 100,
            brokerage_pct: dec!(0.05),
            transaction_type: TransactionType::Intraday,
        }
    }

    #[test]
    fn test_intraday_reference_charge_sheet() {
        let result = calculate_brokerage(&reference_intraday()).unwrap();
        let out = &result.result;

        assert_eq!(out.buy_value, dec!(10_000));
        assert_eq!(out.sell_value, dec!(11_000));
        assert_eq!(out.turnover, dec!(21_000));
        assert_eq!(out.gross_pnl, dec!(1_000));

        // 0.05% of 21000 = 10.5, below the 40 cap
        assert_eq!(out.brokerage_charge, dec!(10.5));
        // 0.025% of sell value 11000
        assert_eq!(out.stt, dec!(2.75));
        // 0.00325% of turnover
        assert_eq!(out.transaction_charge, dec!(0.6825));
        // 18% of (10.5 + 0.6825)
        assert_eq!(out.gst, dec!(2.012850));
        // 0.0001% of turnover
        assert_eq!(out.sebi_charge, dec!(0.021));
        // 0.003% of buy value
        assert_eq!(out.stamp_duty, dec!(0.3));

        assert_eq!(
            out.total_charges,
            out.brokerage_charge
                + out.stt
                + out.transaction_charge
                + out.gst
                + out.sebi_charge
                + out.stamp_duty
        );
        assert_eq!(out.net_pnl, out.gross_pnl - out.total_charges);
    }

    #[test]
    fn test_intraday_brokerage_cap_applies() {
        // 1% of a 2L turnover would be 2000; the cap holds it at 40
        let result = calculate_brokerage(&BrokerageInput {
            buy_price: dec!(1_000),
            sell_price: dec!(1_000),
            quantity: 100,
            brokerage_pct: dec!(1),
            transaction_type: TransactionType::Intraday,
        })
        .unwrap();
        assert_eq!(result.result.brokerage_charge, dec!(40));
    }

    #[test]
    fn test_delivery_brokerage_uncapped() {
        let result = calculate_brokerage(&BrokerageInput {
            buy_price: dec!(1_000),
            sell_price: dec!(1_000),
            quantity: 100,
            brokerage_pct: dec!(1),
            transaction_type: TransactionType::Delivery,
        })
        .unwrap();
        assert_eq!(result.result.brokerage_charge, dec!(2_000));
    }

    #[test]
    fn test_delivery_stt_and_stamp_rates() {
        let result = calculate_brokerage(&BrokerageInput {
            transaction_type: TransactionType::Delivery,
            ..reference_intraday()
        })
        .unwrap();
        let out = &result.result;
        // 0.1% of turnover 21000
        assert_eq!(out.stt, dec!(21));
        // 0.015% of buy value 10000
        assert_eq!(out.stamp_duty, dec!(1.5));
    }

    #[test]
    fn test_losing_trade_has_negative_net_pnl() {
        let result = calculate_brokerage(&BrokerageInput {
            buy_price: dec!(110),
            sell_price: dec!(100),
            quantity: 100,
            brokerage_pct: dec!(0.05),
            transaction_type: TransactionType::Intraday,
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.gross_pnl, dec!(-1_000));
        assert!(out.net_pnl < out.gross_pnl);
    }

    #[test]
    fn test_zero_quantity_is_all_zero() {
        let result = calculate_brokerage(&BrokerageInput {
            quantity: 0,
            ..reference_intraday()
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.turnover, Decimal::ZERO);
        assert_eq!(out.total_charges, Decimal::ZERO);
        assert_eq!(out.net_pnl, Decimal::ZERO);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut input = reference_intraday();
        input.buy_price = dec!(-1);
        assert!(calculate_brokerage(&input).is_err());
    }
}
