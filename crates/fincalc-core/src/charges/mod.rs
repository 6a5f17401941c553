//! Statutory charge arithmetic: brokerage/regulatory charges on a trade and
//! the old-vs-new income-tax regime comparison.

pub mod brokerage;
pub mod income_tax;
