use std::fmt;

/// spacing deviations above this relative tolerance reject the grid
pub const SPACING_RTOL: f64 = 1e-9;
/// nodes closer than this are treated as duplicates
pub const NODE_EPS: f64 = 1e-12;

/// Error types for the interpolation family. Duplicate or too few nodes are
/// caller bugs and fault at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// the difference formulas need an equally spaced grid
    UnevenSpacing { index: usize },
    /// spline evaluation outside the knot range
    OutsideKnots { x: f64, lo: f64, hi: f64 },
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InterpolationError::UnevenSpacing { index } => {
                write!(f, "grid is not equally spaced at node {}", index)
            }
            InterpolationError::OutsideKnots { x, lo, hi } => {
                write!(f, "x = {} lies outside the knot range [{}, {}]", x, lo, hi)
            }
        }
    }
}

impl std::error::Error for InterpolationError {}

pub(crate) fn assert_nodes(x: &[f64], y: &[f64]) {
    assert!(x.len() >= 2, "At least two interpolation nodes are required.");
    assert_eq!(x.len(), y.len(), "x and y sizes should agree.");
    for i in 0..x.len() {
        assert!(
            x[i].is_finite() && y[i].is_finite(),
            "Interpolation nodes should be finite numbers."
        );
        for j in (i + 1)..x.len() {
            assert!(
                (x[i] - x[j]).abs() > NODE_EPS,
                "Interpolation nodes should be distinct."
            );
        }
    }
}

/// Forward difference table, column by column: column 0 is y itself, column
/// k holds the k-th differences (n - k entries).
pub fn difference_table(y: &[f64]) -> Vec<Vec<f64>> {
    let n = y.len();
    let mut table: Vec<Vec<f64>> = Vec::with_capacity(n);
    table.push(y.to_vec());
    for k in 1..n {
        let prev = &table[k - 1];
        let col: Vec<f64> = (0..n - k).map(|i| prev[i + 1] - prev[i]).collect();
        table.push(col);
    }
    table
}

/// Divided difference table for arbitrary node spacing; column k holds
/// f[x_i, ..., x_{i+k}].
pub fn divided_difference_table(x: &[f64], y: &[f64]) -> Vec<Vec<f64>> {
    assert_nodes(x, y);
    let n = y.len();
    let mut table: Vec<Vec<f64>> = Vec::with_capacity(n);
    table.push(y.to_vec());
    for k in 1..n {
        let prev = &table[k - 1];
        let col: Vec<f64> = (0..n - k)
            .map(|i| (prev[i + 1] - prev[i]) / (x[i + k] - x[i]))
            .collect();
        table.push(col);
    }
    table
}

/// Returns the common step of an equally spaced grid, or which node breaks it.
pub fn uniform_step(x: &[f64]) -> Result<f64, InterpolationError> {
    assert!(x.len() >= 2, "At least two grid nodes are required.");
    let h = x[1] - x[0];
    for i in 1..x.len() - 1 {
        let hi = x[i + 1] - x[i];
        if (hi - h).abs() > SPACING_RTOL * h.abs().max(NODE_EPS) {
            return Err(InterpolationError::UnevenSpacing { index: i + 1 });
        }
    }
    Ok(h)
}

/// Newton-Gregory forward interpolation anchored at the first node,
/// P(x) = y_0 + s dy_0 + s(s-1)/2! d2y_0 + ... with s = (x - x_0)/h.
/// Extrapolation beyond the grid is allowed.
pub fn newton_forward(x: &[f64], y: &[f64], x_eval: f64) -> Result<f64, InterpolationError> {
    assert_nodes(x, y);
    let h = uniform_step(x)?;
    let table = difference_table(y);
    let s = (x_eval - x[0]) / h;
    let mut value = table[0][0];
    let mut factor = 1.0;
    let mut fact = 1.0;
    for k in 1..x.len() {
        factor *= s - (k as f64 - 1.0);
        fact *= k as f64;
        value += factor / fact * table[k][0];
    }
    Ok(value)
}

/// Newton-Gregory backward interpolation anchored at the last node,
/// P(x) = y_n + s ny_n + s(s+1)/2! n2y_n + ... with s = (x - x_n)/h.
pub fn newton_backward(x: &[f64], y: &[f64], x_eval: f64) -> Result<f64, InterpolationError> {
    assert_nodes(x, y);
    let h = uniform_step(x)?;
    let table = difference_table(y);
    let n = x.len();
    let s = (x_eval - x[n - 1]) / h;
    let mut value = table[0][n - 1];
    let mut factor = 1.0;
    let mut fact = 1.0;
    for k in 1..n {
        factor *= s + (k as f64 - 1.0);
        fact *= k as f64;
        value += factor / fact * table[k][n - 1 - k];
    }
    Ok(value)
}

/// Gauss forward central interpolation anchored at the middle node
/// m = (n - 1) / 2; successive terms walk the difference table outward,
/// d^k y_{m - floor(k/2)}, for as long as the table admits them. With the
/// anchor in the middle the formula reaches full order n - 1 for every n.
pub fn gauss_central(x: &[f64], y: &[f64], x_eval: f64) -> Result<f64, InterpolationError> {
    assert_nodes(x, y);
    let h = uniform_step(x)?;
    let table = difference_table(y);
    let n = x.len();
    let m = (n - 1) / 2;
    let p = (x_eval - x[m]) / h;
    let mut value = table[0][m];
    let mut factor = 1.0;
    let mut fact = 1.0;
    for k in 1..n {
        let idx = m as isize - (k / 2) as isize;
        if idx < 0 || (idx as usize) > n - 1 - k {
            break;
        }
        let offset = if k % 2 == 0 {
            -((k / 2) as f64)
        } else {
            ((k - 1) / 2) as f64
        };
        factor *= p + offset;
        fact *= k as f64;
        value += factor / fact * table[k][idx as usize];
    }
    Ok(value)
}

/// Newton interpolation over divided differences, for unequal spacing. The
/// coefficients are the top row of the divided difference table.
pub fn newton_divided(x: &[f64], y: &[f64], x_eval: f64) -> f64 {
    let table = divided_difference_table(x, y);
    let mut value = table[0][0];
    let mut product = 1.0;
    for k in 1..x.len() {
        product *= x_eval - x[k - 1];
        value += table[k][0] * product;
    }
    value
}
