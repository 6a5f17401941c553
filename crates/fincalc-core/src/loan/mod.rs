//! Loan amortization.

pub mod emi;
