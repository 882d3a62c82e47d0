use crate::calculus::finite_difference::CalculusError;
use std::fmt;

/// Enum to represent the quadrature rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureRule {
    Trapezoidal,
    SimpsonOneThird,
    SimpsonThreeEighth,
}

impl fmt::Display for QuadratureRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureRule::Trapezoidal => write!(f, "trapezoidal"),
            QuadratureRule::SimpsonOneThird => write!(f, "simpson 1/3"),
            QuadratureRule::SimpsonThreeEighth => write!(f, "simpson 3/8"),
        }
    }
}

/// One quadrature node: the integral estimate is exactly
/// sum(weight * fx) over these rows.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureSample {
    pub index: usize,
    pub x: f64,
    pub fx: f64,
    pub weight: f64,
}

/// Integral estimate together with the node table that produced it.
#[derive(Debug, Clone)]
pub struct QuadratureResult {
    pub rule: QuadratureRule,
    pub value: f64,
    pub segments: usize,
    pub samples: Vec<QuadratureSample>,
}

fn check_interval(a: f64, b: f64, n: usize) {
    assert!(a.is_finite() && b.is_finite(), "Integration limits should be finite numbers.");
    assert!(b >= a, "Upper limit should not be below the lower limit.");
    assert!(n > 0, "At least one segment is required.");
}

fn accumulate<F>(
    f: F,
    a: f64,
    h: f64,
    n: usize,
    rule: QuadratureRule,
    weight_of: impl Fn(usize) -> f64,
) -> Result<QuadratureResult, CalculusError>
where
    F: Fn(f64) -> f64,
{
    let mut samples = Vec::with_capacity(n + 1);
    let mut value = 0.0;
    for i in 0..=n {
        let x = a + i as f64 * h;
        let fx = f(x);
        if !fx.is_finite() {
            return Err(CalculusError::NonFiniteValue { x });
        }
        let weight = weight_of(i);
        value += weight * fx;
        samples.push(QuadratureSample {
            index: i,
            x,
            fx,
            weight,
        });
    }
    Ok(QuadratureResult {
        rule,
        value,
        segments: n,
        samples,
    })
}

/// Composite trapezoidal rule over n equal segments:
/// h * (f_0/2 + f_1 + ... + f_{n-1} + f_n/2).
pub fn trapezoidal<F>(f: F, a: f64, b: f64, n: usize) -> Result<QuadratureResult, CalculusError>
where
    F: Fn(f64) -> f64,
{
    check_interval(a, b, n);
    let h = (b - a) / n as f64;
    accumulate(f, a, h, n, QuadratureRule::Trapezoidal, |i| {
        if i == 0 || i == n { h / 2.0 } else { h }
    })
}

/// One trapezoid over the whole interval.
pub fn trapezoidal_single<F>(f: F, a: f64, b: f64) -> Result<QuadratureResult, CalculusError>
where
    F: Fn(f64) -> f64,
{
    trapezoidal(f, a, b, 1)
}

/// Composite Simpson's 1/3 rule, weights h/3 * [1, 4, 2, 4, ..., 4, 1].
/// The segment count must be even; exact through cubics.
pub fn simpson_one_third<F>(
    f: F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<QuadratureResult, CalculusError>
where
    F: Fn(f64) -> f64,
{
    check_interval(a, b, n);
    if n % 2 != 0 {
        return Err(CalculusError::OddIntervalCount { n });
    }
    let h = (b - a) / n as f64;
    accumulate(f, a, h, n, QuadratureRule::SimpsonOneThird, |i| {
        if i == 0 || i == n {
            h / 3.0
        } else if i % 2 == 1 {
            4.0 * h / 3.0
        } else {
            2.0 * h / 3.0
        }
    })
}

/// Single application of Simpson's 1/3 rule (two segments).
pub fn simpson_one_third_single<F>(f: F, a: f64, b: f64) -> Result<QuadratureResult, CalculusError>
where
    F: Fn(f64) -> f64,
{
    simpson_one_third(f, a, b, 2)
}

/// Composite Simpson's 3/8 rule, weights 3h/8 * [1, 3, 3, 2, 3, 3, 2, ..., 1].
/// The segment count must be a multiple of three; exact through cubics.
pub fn simpson_three_eighth<F>(
    f: F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<QuadratureResult, CalculusError>
where
    F: Fn(f64) -> f64,
{
    check_interval(a, b, n);
    if n % 3 != 0 {
        return Err(CalculusError::IntervalCountNotDivisibleByThree { n });
    }
    let h = (b - a) / n as f64;
    accumulate(f, a, h, n, QuadratureRule::SimpsonThreeEighth, |i| {
        if i == 0 || i == n {
            3.0 * h / 8.0
        } else if i % 3 == 0 {
            6.0 * h / 8.0
        } else {
            9.0 * h / 8.0
        }
    })
}

/// Single application of Simpson's 3/8 rule (three segments).
pub fn simpson_three_eighth_single<F>(
    f: F,
    a: f64,
    b: f64,
) -> Result<QuadratureResult, CalculusError>
where
    F: Fn(f64) -> f64,
{
    simpson_three_eighth(f, a, b, 3)
}
