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
pub struct BlackScholesInput {
    pub spot_price: Money,
    pub strike_price: Money,
    pub time_to_expiry_years: Decimal,
    /// Annualized volatility as a percentage (20 = 20%).
    pub volatility_pct: Percent,
    /// Annual risk-free rate as a percentage.
    pub risk_free_rate_pct: Percent,
}

/// Prices and Greeks for both sides of the chain. Vega and rho are scaled
/// per 1% move (divided by 100); theta is per calendar day (annual / 365).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackScholesOutput {
    pub call_price: Money,
    pub put_price: Money,
    pub call_delta: Decimal,
    pub put_delta: Decimal,
    pub gamma: Decimal,
    pub vega: Decimal,
    pub call_theta: Decimal,
    pub put_theta: Decimal,
    pub call_rho: Decimal,
    pub put_rho: Decimal,
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Degenerate inputs (expired, worthless, or vol-free) collapse to intrinsic
/// value: no time value, all Greeks zero except the step-function delta.
fn intrinsic_only(s: Decimal, k: Decimal) -> BlackScholesOutput {
    BlackScholesOutput {
        call_price: (s - k).max(Decimal::ZERO),
        put_price: (k - s).max(Decimal::ZERO),
        call_delta: if s > k { Decimal::ONE } else { Decimal::ZERO },
        put_delta: if s < k { -Decimal::ONE } else { Decimal::ZERO },
        gamma: Decimal::ZERO,
        vega: Decimal::ZERO,
        call_theta: Decimal::ZERO,
        put_theta: Decimal::ZERO,
        call_rho: Decimal::ZERO,
        put_rho: Decimal::ZERO,
    }
}

fn price_and_greeks(
    s: Decimal,
    k: Decimal,
    t: Decimal,
    vol: Decimal,
    r: Decimal,
) -> BlackScholesOutput {
    let sqrt_t = math::sqrt(t);
    let vol_sqrt_t = vol * sqrt_t;
    let d1 = (math::ln(s / k) + (r + vol * vol / dec!(2)) * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    let nd1 = math::norm_cdf(d1);
    let nd2 = math::norm_cdf(d2);
    let pdf_d1 = math::norm_pdf(d1);
    let disc = math::exp(-r * t);

    let call_price = s * nd1 - k * disc * nd2;
    let put_price = k * disc * math::norm_cdf(-d2) - s * math::norm_cdf(-d1);

    // Shared curvature and vol sensitivity
    let gamma = pdf_d1 / (s * vol_sqrt_t);
    let vega = s * pdf_d1 * sqrt_t / dec!(100);

    // Theta: annual decay converted to a per-day figure
    let decay = -s * pdf_d1 * vol / (dec!(2) * sqrt_t);
    let call_theta = (decay - r * k * disc * nd2) / dec!(365);
    let put_theta = (decay + r * k * disc * math::norm_cdf(-d2)) / dec!(365);

    // Rho: per 1% rate move
    let call_rho = k * t * disc * nd2 / dec!(100);
    let put_rho = -k * t * disc * math::norm_cdf(-d2) / dec!(100);

    BlackScholesOutput {
        call_price,
        put_price,
        call_delta: nd1,
        put_delta: nd1 - Decimal::ONE,
        gamma,
        vega,
        call_theta,
        put_theta,
        call_rho,
        put_rho,
    }
}

/// Price both sides at the given market parameters. Used by the margin
/// heuristics, which need raw per-unit premiums without the envelope.
pub(crate) fn price_pair(
    s: Decimal,
    k: Decimal,
    t: Decimal,
    volatility_pct: Decimal,
    risk_free_rate_pct: Decimal,
) -> (Money, Money) {
    if t <= Decimal::ZERO
        || s <= Decimal::ZERO
        || k <= Decimal::ZERO
        || volatility_pct <= Decimal::ZERO
    {
        let out = intrinsic_only(s, k);
        return (out.call_price, out.put_price);
    }
    let out = price_and_greeks(
        s,
        k,
        t,
        volatility_pct / dec!(100),
        risk_free_rate_pct / dec!(100),
    );
    (out.call_price, out.put_price)
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Black-Scholes European pricer with Greeks, on the Abramowitz–Stegun
/// normal-CDF approximation. Percentage inputs are converted to fractions
/// internally.
pub fn calculate_black_scholes(
    input: &BlackScholesInput,
) -> FinCalcResult<ComputationOutput<BlackScholesOutput>> {
    let start = Instant::now();

    if input.spot_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "spot_price".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.strike_price < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "strike_price".into(),
            reason: "must not be negative".into(),
        });
    }

    let s = input.spot_price;
    let k = input.strike_price;
    let t = input.time_to_expiry_years;

    let degenerate = t <= Decimal::ZERO
        || s <= Decimal::ZERO
        || k <= Decimal::ZERO
        || input.volatility_pct <= Decimal::ZERO;

    let output = if degenerate {
        intrinsic_only(s, k)
    } else {
        price_and_greeks(
            s,
            k,
            t,
            input.volatility_pct / dec!(100),
            input.risk_free_rate_pct / dec!(100),
        )
    };

    let methodology = if degenerate {
        "Intrinsic value (degenerate parameters)"
    } else {
        "Black-Scholes closed form with Abramowitz-Stegun normal CDF"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "volatility_pct": input.volatility_pct.to_string(),
            "risk_free_rate_pct": input.risk_free_rate_pct.to_string(),
            "time_to_expiry_years": t.to_string(),
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

    fn approx_eq(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    fn atm_input() -> BlackScholesInput {
        BlackScholesInput {
            spot_price: dec!(100),
            strike_price: dec!(100),
            time_to_expiry_years: dec!(1),
            volatility_pct: dec!(20),
            risk_free_rate_pct: dec!(5),
        }
    }

    #[test]
    fn test_atm_call_and_put_reference() {
        // S=K=100, T=1, vol=20%, r=5%: call ~ 10.4506, put ~ 5.5735
        let result = calculate_black_scholes(&atm_input()).unwrap();
        let out = &result.result;
        assert!(
            approx_eq(out.call_price, dec!(10.4506), dec!(0.001)),
            "call {}",
            out.call_price
        );
        assert!(
            approx_eq(out.put_price, dec!(5.5735), dec!(0.001)),
            "put {}",
            out.put_price
        );
    }

    #[test]
    fn test_put_call_parity() {
        // C - P = S - K*e^(-rT)
        let result = calculate_black_scholes(&atm_input()).unwrap();
        let out = &result.result;
        let lhs = out.call_price - out.put_price;
        let rhs = dec!(100) - dec!(100) * math::exp(dec!(-0.05));
        assert!(
            approx_eq(lhs, rhs, dec!(0.0001)),
            "parity violated: {} vs {}",
            lhs,
            rhs
        );
    }

    #[test]
    fn test_deltas_bracket_and_relate() {
        let result = calculate_black_scholes(&atm_input()).unwrap();
        let out = &result.result;
        assert!(out.call_delta > Decimal::ZERO && out.call_delta < Decimal::ONE);
        assert!(out.put_delta < Decimal::ZERO && out.put_delta > -Decimal::ONE);
        // put delta = call delta - 1
        assert_eq!(out.put_delta, out.call_delta - Decimal::ONE);
    }

    #[test]
    fn test_greek_signs() {
        let result = calculate_black_scholes(&atm_input()).unwrap();
        let out = &result.result;
        assert!(out.gamma > Decimal::ZERO);
        assert!(out.vega > Decimal::ZERO);
        assert!(out.call_theta < Decimal::ZERO);
        assert!(out.put_theta < Decimal::ZERO);
        assert!(out.call_rho > Decimal::ZERO);
        assert!(out.put_rho < Decimal::ZERO);
    }

    #[test]
    fn test_greek_scaling_conventions() {
        // Vega ~ 0.3752 per 1% vol move; call rho ~ 0.5323 per 1% rate move;
        // call theta ~ -0.01757 per day (known ATM reference values)
        let result = calculate_black_scholes(&atm_input()).unwrap();
        let out = &result.result;
        assert!(approx_eq(out.vega, dec!(0.3752), dec!(0.001)), "vega {}", out.vega);
        assert!(
            approx_eq(out.call_rho, dec!(0.5323), dec!(0.001)),
            "rho {}",
            out.call_rho
        );
        assert!(
            approx_eq(out.call_theta, dec!(-0.01757), dec!(0.0005)),
            "theta {}",
            out.call_theta
        );
    }

    #[test]
    fn test_expired_option_is_intrinsic_only() {
        let result = calculate_black_scholes(&BlackScholesInput {
            spot_price: dec!(120),
            strike_price: dec!(100),
            time_to_expiry_years: Decimal::ZERO,
            volatility_pct: dec!(20),
            risk_free_rate_pct: dec!(5),
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.call_price, dec!(20));
        assert_eq!(out.put_price, Decimal::ZERO);
        assert_eq!(out.call_delta, Decimal::ONE);
        assert_eq!(out.put_delta, Decimal::ZERO);
        assert_eq!(out.gamma, Decimal::ZERO);
        assert_eq!(out.vega, Decimal::ZERO);
        assert_eq!(out.call_theta, Decimal::ZERO);
        assert_eq!(out.call_rho, Decimal::ZERO);
    }

    #[test]
    fn test_zero_volatility_is_intrinsic_only() {
        let result = calculate_black_scholes(&BlackScholesInput {
            spot_price: dec!(90),
            strike_price: dec!(100),
            time_to_expiry_years: dec!(0.5),
            volatility_pct: Decimal::ZERO,
            risk_free_rate_pct: dec!(5),
        })
        .unwrap();
        let out = &result.result;
        assert_eq!(out.call_price, Decimal::ZERO);
        assert_eq!(out.put_price, dec!(10));
        assert_eq!(out.put_delta, -Decimal::ONE);
    }

    #[test]
    fn test_deep_itm_call_approaches_forward_intrinsic() {
        let result = calculate_black_scholes(&BlackScholesInput {
            spot_price: dec!(200),
            strike_price: dec!(100),
            ..atm_input()
        })
        .unwrap();
        let lower_bound = dec!(200) - dec!(100) * math::exp(dec!(-0.05));
        assert!(result.result.call_price >= lower_bound - dec!(0.01));
        assert!(result.result.call_delta > dec!(0.99));
    }

    #[test]
    fn test_deep_otm_call_is_near_zero() {
        let result = calculate_black_scholes(&BlackScholesInput {
            spot_price: dec!(50),
            strike_price: dec!(200),
            ..atm_input()
        })
        .unwrap();
        assert!(result.result.call_price < dec!(0.01));
    }

    #[test]
    fn test_negative_spot_rejected() {
        let mut input = atm_input();
        input.spot_price = dec!(-1);
        assert!(calculate_black_scholes(&input).is_err());
    }
}
