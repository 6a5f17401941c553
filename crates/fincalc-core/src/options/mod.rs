//! European option pricing.

pub mod black_scholes;
