//! Simplified margin models for derivative and leveraged positions. These
//! are conceptual approximations of exchange SPAN/exposure collateral, not
//! exchange-accurate figures; margins are floored at zero throughout.

pub mod commodity;
pub mod currency;
pub mod equity;
pub mod fo;
pub mod futures;
pub mod mtf;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Expiry convention used when a margin model prices an option without an
/// explicit tenor: the near-month contract, 30 calendar days out.
pub(crate) const NEAR_MONTH_YEARS: Decimal = dec!(0.0821917808219178);
