//! Decimal transcendental helpers shared by the growth, options, and margin
//! calculators. Everything stays in `Decimal`; no f64 round-trips.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Compute (1 + rate)^n via exponentiation by squaring (avoids powd drift).
pub fn compound(rate: Decimal, n: u32) -> Decimal {
    pow(Decimal::ONE + rate, n)
}

/// Integer power of a Decimal.
pub fn pow(base: Decimal, exp: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result *= b;
        }
        b *= b;
        e >>= 1;
    }
    result
}

/// Taylor series exp(x) with range reduction for |x| > 2.
/// exp(x) = exp(x/2)^2 when |x| > 2, then Taylor with 25 terms.
pub fn exp(x: Decimal) -> Decimal {
    let two = dec!(2);

    if x > two || x < -two {
        let half = exp(x / two);
        return half * half;
    }

    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1u32..=25 {
        term = term * x / Decimal::from(n);
        sum += term;
    }
    sum
}

/// Newton's method sqrt: y_{n+1} = (y_n + x/y_n) / 2, 25 iterations.
pub fn sqrt(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if x == Decimal::ONE {
        return Decimal::ONE;
    }
    let two = dec!(2);
    let mut guess = x / two;
    if x > dec!(100) {
        guess = dec!(10);
    } else if x < dec!(0.01) {
        guess = dec!(0.1);
    }
    for _ in 0..25 {
        guess = (guess + x / guess) / two;
    }
    guess
}

/// Natural log via Newton's method: find y such that exp(y) = x. 30 iterations.
pub fn ln(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        // ln of non-positive is undefined; return a large negative as sentinel
        return dec!(-999);
    }
    if x == Decimal::ONE {
        return Decimal::ZERO;
    }

    // Initial guess: for x near 1, use (x-1); otherwise count powers of e
    let mut y = if x > dec!(0.5) && x < dec!(2) {
        x - Decimal::ONE
    } else {
        let mut approx = Decimal::ZERO;
        let mut v = x;
        let e_approx = dec!(2.718281828459045);
        if x > Decimal::ONE {
            while v > e_approx {
                v /= e_approx;
                approx += Decimal::ONE;
            }
            approx + (v - Decimal::ONE)
        } else {
            while v < Decimal::ONE / e_approx {
                v *= e_approx;
                approx -= Decimal::ONE;
            }
            approx + (v - Decimal::ONE)
        }
    };

    // y_{n+1} = y_n - (exp(y_n) - x) / exp(y_n) = y_n - 1 + x / exp(y_n)
    for _ in 0..30 {
        let ey = exp(y);
        if ey == Decimal::ZERO {
            break;
        }
        y = y - Decimal::ONE + x / ey;
    }
    y
}

/// Standard normal PDF: phi(x) = exp(-x^2/2) / sqrt(2*pi)
pub fn norm_pdf(x: Decimal) -> Decimal {
    let two_pi = dec!(6.283185307179586);
    let exponent = -(x * x) / dec!(2);
    exp(exponent) / sqrt(two_pi)
}

/// Standard normal CDF using the Abramowitz & Stegun five-term approximation.
/// Phi(x) = 1 - phi(x) * (b1*t + b2*t^2 + b3*t^3 + b4*t^4 + b5*t^5)
/// where t = 1 / (1 + 0.2316419 * |x|)
/// For x < 0: Phi(x) = 1 - Phi(-x)
pub fn norm_cdf(x: Decimal) -> Decimal {
    let b1 = dec!(0.319381530);
    let b2 = dec!(-0.356563782);
    let b3 = dec!(1.781477937);
    let b4 = dec!(-1.821255978);
    let b5 = dec!(1.330274429);
    let p = dec!(0.2316419);

    let abs_x = if x < Decimal::ZERO { -x } else { x };
    let t = Decimal::ONE / (Decimal::ONE + p * abs_x);

    // Horner form: poly = t * (b1 + t * (b2 + t * (b3 + t * (b4 + t * b5))))
    let poly = t * (b1 + t * (b2 + t * (b3 + t * (b4 + t * b5))));

    let cdf_pos = Decimal::ONE - norm_pdf(abs_x) * poly;

    if x < Decimal::ZERO {
        Decimal::ONE - cdf_pos
    } else {
        cdf_pos
    }
}
