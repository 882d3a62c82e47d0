use crate::interpolate::newton_difference::{InterpolationError, assert_nodes};
use std::fmt;

/// Enum to represent the spline degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineDegree {
    Linear,
    Quadratic,
    Cubic,
}

impl fmt::Display for SplineDegree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SplineDegree::Linear => write!(f, "linear"),
            SplineDegree::Quadratic => write!(f, "quadratic"),
            SplineDegree::Cubic => write!(f, "cubic"),
        }
    }
}

/// Piecewise polynomial in shifted power form: on segment i the value is
/// a + b t + c t^2 + d t^3 with t = x - x_i. Evaluation is defined on the
/// closed knot range only; outside of it the spline answers with an error
/// rather than extrapolating.
#[derive(Debug, Clone)]
pub struct Spline {
    pub degree: SplineDegree,
    knots: Vec<f64>,
    coeffs: Vec<[f64; 4]>,
}

impl Spline {
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// [a, b, c, d] of segment i
    pub fn segment_coefficients(&self, i: usize) -> [f64; 4] {
        self.coeffs[i]
    }

    pub fn segments(&self) -> usize {
        self.coeffs.len()
    }

    fn segment_index(&self, x: f64) -> Result<usize, InterpolationError> {
        let lo = self.knots[0];
        let hi = *self.knots.last().unwrap();
        if x < lo || x > hi {
            return Err(InterpolationError::OutsideKnots { x, lo, hi });
        }
        // the right end of the range belongs to the last segment
        let mut i = self.knots.len() - 2;
        for k in 0..self.knots.len() - 1 {
            if x < self.knots[k + 1] {
                i = k;
                break;
            }
        }
        Ok(i)
    }

    pub fn evaluate(&self, x: f64) -> Result<f64, InterpolationError> {
        let i = self.segment_index(x)?;
        let t = x - self.knots[i];
        let [a, b, c, d] = self.coeffs[i];
        Ok(a + t * (b + t * (c + t * d)))
    }

    pub fn derivative(&self, x: f64) -> Result<f64, InterpolationError> {
        let i = self.segment_index(x)?;
        let t = x - self.knots[i];
        let [_, b, c, d] = self.coeffs[i];
        Ok(b + t * (2.0 * c + t * 3.0 * d))
    }
}

fn check_spline_nodes(x: &[f64], y: &[f64]) {
    assert_nodes(x, y);
    for i in 0..x.len() - 1 {
        assert!(
            x[i + 1] > x[i],
            "Spline knots should be strictly increasing."
        );
    }
}

/// Piecewise straight lines between consecutive knots.
pub fn linear_spline(x: &[f64], y: &[f64]) -> Spline {
    check_spline_nodes(x, y);
    let coeffs = (0..x.len() - 1)
        .map(|i| [y[i], (y[i + 1] - y[i]) / (x[i + 1] - x[i]), 0.0, 0.0])
        .collect();
    Spline {
        degree: SplineDegree::Linear,
        knots: x.to_vec(),
        coeffs,
    }
}

/// Quadratic spline with the curvature of the first segment pinned to zero
/// and every later curvature propagated left to right through the slope
/// continuity condition b_{i+1} = b_i + 2 c_i h_i. The one-directional
/// propagation means noise in the left data amplifies toward the right
/// end; the scheme is kept in that exact classroom form.
pub fn quadratic_spline(x: &[f64], y: &[f64]) -> Spline {
    check_spline_nodes(x, y);
    let n = x.len();
    let mut coeffs = Vec::with_capacity(n - 1);
    let mut b_prev = (y[1] - y[0]) / (x[1] - x[0]);
    let mut c_prev = 0.0;
    let mut h_prev = x[1] - x[0];
    for i in 0..n - 1 {
        let h = x[i + 1] - x[i];
        let b = if i == 0 {
            b_prev
        } else {
            b_prev + 2.0 * c_prev * h_prev
        };
        let c = ((y[i + 1] - y[i]) / h - b) / h;
        coeffs.push([y[i], b, c, 0.0]);
        b_prev = b;
        c_prev = c;
        h_prev = h;
    }
    Spline {
        degree: SplineDegree::Quadratic,
        knots: x.to_vec(),
        coeffs,
    }
}

/// Natural cubic spline: second derivative zero at both ends, interior
/// curvatures from the standard tridiagonal recurrence. The system is
/// strictly diagonally dominant for any strictly increasing knots, so the
/// construction cannot fail once the knots pass the boundary checks.
pub fn cubic_spline(x: &[f64], y: &[f64]) -> Spline {
    check_spline_nodes(x, y);
    assert!(
        x.len() >= 3,
        "At least three knots are required for a natural cubic spline."
    );
    let n = x.len();
    let h: Vec<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();

    let mut alpha = vec![0.0; n];
    for i in 1..n - 1 {
        alpha[i] = 3.0 / h[i] * (y[i + 1] - y[i]) - 3.0 / h[i - 1] * (y[i] - y[i - 1]);
    }

    let mut l = vec![1.0; n];
    let mut mu = vec![0.0; n];
    let mut z = vec![0.0; n];
    for i in 1..n - 1 {
        l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
        mu[i] = h[i] / l[i];
        z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
    }

    let mut c = vec![0.0; n];
    let mut coeffs = vec![[0.0; 4]; n - 1];
    for j in (0..n - 1).rev() {
        c[j] = z[j] - mu[j] * c[j + 1];
        let b = (y[j + 1] - y[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
        let d = (c[j + 1] - c[j]) / (3.0 * h[j]);
        coeffs[j] = [y[j], b, c[j], d];
    }
    Spline {
        degree: SplineDegree::Cubic,
        knots: x.to_vec(),
        coeffs,
    }
}
