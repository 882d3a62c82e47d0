use nalgebra::{DMatrix, DVector};
use std::fmt;

/// x spreads at or below this are a degenerate design
pub const SPREAD_EPS: f64 = 1e-12;

/// pivot threshold for the pivoted normal-equation elimination
pub(crate) const NORMAL_PIVOT_EPS: f64 = 1e-12;

/// Error types for the regression family. Note that non-positive data fed
/// to the linearized models is not an error: the logarithms go NaN and the
/// NaN flows through the sums into the coefficients without a word. Callers
/// that want a diagnosis check `coefficients[0].is_nan()`.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// all x values coincide, the design has no spread to fit against
    DegenerateDesign,
    /// the normal equations lost rank even under partial pivoting
    SingularNormalEquations { row: usize },
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegressionError::DegenerateDesign => {
                write!(f, "all x values coincide, nothing to fit")
            }
            RegressionError::SingularNormalEquations { row } => {
                write!(f, "normal equations are singular at row {}", row)
            }
        }
    }
}

impl std::error::Error for RegressionError {}

/// Enum to represent the fitted model family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegressionKind {
    /// y = c0 + c1 x
    Linear,
    /// y = c0 + c1 x1 + ... + ck xk
    MultipleLinear { features: usize },
    /// y = c0 + c1 x + ... + cm x^m
    Polynomial { degree: usize },
    /// y = c0 * exp(c1 x)
    Exponential,
    /// y = c0 * x^c1
    Power,
}

impl fmt::Display for RegressionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegressionKind::Linear => write!(f, "linear"),
            RegressionKind::MultipleLinear { features } => {
                write!(f, "multiple linear ({} features)", features)
            }
            RegressionKind::Polynomial { degree } => write!(f, "polynomial (degree {})", degree),
            RegressionKind::Exponential => write!(f, "exponential"),
            RegressionKind::Power => write!(f, "power"),
        }
    }
}

/// A fitted model: coefficients in the layout of its `RegressionKind`, the
/// coefficient of determination on the original data scale, and optionally
/// the value at the query point the caller asked for.
#[derive(Debug, Clone)]
pub struct RegressionModel {
    pub kind: RegressionKind,
    pub coefficients: DVector<f64>,
    pub r_squared: f64,
    pub prediction: Option<f64>,
}

impl RegressionModel {
    pub fn predict(&self, x: f64) -> f64 {
        let c = &self.coefficients;
        match self.kind {
            RegressionKind::Linear => c[0] + c[1] * x,
            RegressionKind::MultipleLinear { .. } => {
                panic!("Multiple linear models take a feature row; use predict_multi.")
            }
            RegressionKind::Polynomial { .. } => {
                // Horner over ascending coefficients
                let mut value = 0.0;
                for k in (0..c.len()).rev() {
                    value = value * x + c[k];
                }
                value
            }
            RegressionKind::Exponential => c[0] * (c[1] * x).exp(),
            RegressionKind::Power => c[0] * x.powf(c[1]),
        }
    }

    /// Value of a fitted multiple linear model at one observation row.
    pub fn predict_multi(&self, features: &[f64]) -> f64 {
        match self.kind {
            RegressionKind::MultipleLinear { features: k } => {
                assert_eq!(
                    features.len(),
                    k,
                    "Feature count should match the fitted model."
                );
                let c = &self.coefficients;
                let mut value = c[0];
                for (i, v) in features.iter().enumerate() {
                    value += c[i + 1] * v;
                }
                value
            }
            _ => panic!("predict_multi only applies to multiple linear models."),
        }
    }
}

/// R^2 = 1 - SS_res / SS_tot against the given predictions. Constant data
/// makes SS_tot zero and the ratio NaN; that is left to the caller to read.
pub fn coefficient_of_determination(y: &[f64], y_hat: &[f64]) -> f64 {
    let n = y.len() as f64;
    let mean = y.iter().sum::<f64>() / n;
    let ss_tot: f64 = y.iter().map(|v| (v - mean) * (v - mean)).sum();
    let ss_res: f64 = y
        .iter()
        .zip(y_hat.iter())
        .map(|(v, vh)| (v - vh) * (v - vh))
        .sum();
    1.0 - ss_res / ss_tot
}

pub(crate) fn check_samples(x: &[f64], y: &[f64], min_points: usize) {
    assert_eq!(x.len(), y.len(), "x and y sizes should agree.");
    assert!(
        x.len() >= min_points,
        "At least {} points are required for this fit.",
        min_points
    );
}

pub(crate) fn spread_check(x: &[f64]) -> Result<(), RegressionError> {
    let lo = x.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo <= SPREAD_EPS {
        return Err(RegressionError::DegenerateDesign);
    }
    Ok(())
}

fn line_through(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let sx: f64 = x.iter().sum();
    let sy: f64 = y.iter().sum();
    let sxy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sxx: f64 = x.iter().map(|a| a * a).sum();
    let slope = (n * sxy - sx * sy) / (n * sxx - sx * sx);
    let intercept = (sy - slope * sx) / n;
    (intercept, slope)
}

/// Least-squares straight line through the closed-form normal equations
/// over the running sums. Coefficients come back as [intercept, slope].
pub fn fit_linear(
    x: &[f64],
    y: &[f64],
    predict_at: Option<f64>,
) -> Result<RegressionModel, RegressionError> {
    check_samples(x, y, 2);
    spread_check(x)?;
    let (intercept, slope) = line_through(x, y);
    let y_hat: Vec<f64> = x.iter().map(|v| intercept + slope * v).collect();
    let model = RegressionModel {
        kind: RegressionKind::Linear,
        coefficients: DVector::from_vec(vec![intercept, slope]),
        r_squared: coefficient_of_determination(y, &y_hat),
        prediction: None,
    };
    let prediction = predict_at.map(|q| model.predict(q));
    Ok(RegressionModel { prediction, ..model })
}

/// Shared with the linearized fits: straight line over transformed samples.
pub(crate) fn transformed_line(u: &[f64], z: &[f64]) -> (f64, f64) {
    line_through(u, z)
}

/// Gaussian elimination with partial pivoting, used for the normal
/// equations only. This is the one place in the kernel where rows are
/// exchanged; the plain solvers stay naive on purpose, but normal matrices
/// of multi-feature and higher-degree fits are ill-conditioned enough to
/// need the swap.
pub(crate) fn solve_normal_equations(
    mut g: DMatrix<f64>,
    mut rhs: DVector<f64>,
) -> Result<DVector<f64>, RegressionError> {
    let n = g.nrows();
    for k in 0..n {
        let mut pivot_row = k;
        for i in (k + 1)..n {
            if g[(i, k)].abs() > g[(pivot_row, k)].abs() {
                pivot_row = i;
            }
        }
        if g[(pivot_row, k)].abs() < NORMAL_PIVOT_EPS {
            return Err(RegressionError::SingularNormalEquations { row: k });
        }
        if pivot_row != k {
            g.swap_rows(k, pivot_row);
            rhs.swap_rows(k, pivot_row);
        }
        for i in (k + 1)..n {
            let factor = g[(i, k)] / g[(k, k)];
            for j in k..n {
                g[(i, j)] -= factor * g[(k, j)];
            }
            rhs[i] -= factor * rhs[k];
        }
    }
    let mut c = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut s = rhs[i];
        for j in (i + 1)..n {
            s -= g[(i, j)] * c[j];
        }
        c[i] = s / g[(i, i)];
    }
    Ok(c)
}

/// Least-squares hyperplane through the normal equations (X^T X) w = X^T y
/// over the design matrix with a leading bias column. Rows of `x` are
/// observations, columns are features; coefficients come back as
/// [intercept, b1, ..., bk].
pub fn fit_multiple_linear(
    x: &DMatrix<f64>,
    y: &[f64],
    predict_at: Option<&[f64]>,
) -> Result<RegressionModel, RegressionError> {
    let k = x.ncols();
    assert!(k > 0, "At least one feature is required.");
    assert_eq!(x.nrows(), y.len(), "x and y sizes should agree.");
    assert!(
        x.nrows() >= k + 1,
        "At least {} points are required for this fit.",
        k + 1
    );
    if let Some(q) = predict_at {
        assert_eq!(
            q.len(),
            k,
            "Prediction point should have one value per feature."
        );
    }

    let n = x.nrows();
    let mut design = DMatrix::zeros(n, k + 1);
    for i in 0..n {
        design[(i, 0)] = 1.0;
        for j in 0..k {
            design[(i, j + 1)] = x[(i, j)];
        }
    }
    let g = design.transpose() * &design;
    let rhs = design.transpose() * DVector::from_column_slice(y);
    let coefficients = solve_normal_equations(g, rhs)?;

    let model = RegressionModel {
        kind: RegressionKind::MultipleLinear { features: k },
        coefficients,
        r_squared: 0.0,
        prediction: None,
    };
    let y_hat: Vec<f64> = (0..n)
        .map(|i| {
            let mut v = model.coefficients[0];
            for j in 0..k {
                v += model.coefficients[j + 1] * x[(i, j)];
            }
            v
        })
        .collect();
    Ok(RegressionModel {
        r_squared: coefficient_of_determination(y, &y_hat),
        prediction: predict_at.map(|q| model.predict_multi(q)),
        ..model
    })
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line_is_recovered() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let model = fit_linear(&x, &y, None).unwrap();
        assert_relative_eq!(model.coefficients[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(model.coefficients[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(model.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_textbook_five_point_fit() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 3.0, 5.0, 4.0, 6.0];
        let model = fit_linear(&x, &y, Some(6.0)).unwrap();
        assert_relative_eq!(model.coefficients[0], 1.3, epsilon = 1e-12);
        assert_relative_eq!(model.coefficients[1], 0.9, epsilon = 1e-12);
        assert_relative_eq!(model.r_squared, 0.81, epsilon = 1e-12);
        assert_relative_eq!(model.prediction.unwrap(), 6.7, epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_x_is_degenerate() {
        let x = [2.0, 2.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(fit_linear(&x, &y, None).unwrap_err(), RegressionError::DegenerateDesign);
    }

    #[test]
    fn test_constant_y_makes_r_squared_nan() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 4.0, 4.0];
        let model = fit_linear(&x, &y, None).unwrap();
        assert_relative_eq!(model.coefficients[1], 0.0, epsilon = 1e-12);
        // SS_tot is zero, the ratio is NaN and stays NaN
        assert!(model.r_squared.is_nan());
    }

    #[test]
    #[should_panic(expected = "At least 2")]
    fn test_single_point_faults() {
        let _ = fit_linear(&[1.0], &[1.0], None);
    }

    #[test]
    fn test_exact_plane_is_recovered() {
        // samples of y = 1 + 2 x1 + 3 x2
        let x = DMatrix::from_row_slice(
            5,
            2,
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0],
        );
        let y = [1.0, 3.0, 4.0, 6.0, 8.0];
        let model = fit_multiple_linear(&x, &y, Some(&[2.0, 2.0])).unwrap();
        assert_relative_eq!(model.coefficients[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(model.coefficients[1], 2.0, epsilon = 1e-10);
        assert_relative_eq!(model.coefficients[2], 3.0, epsilon = 1e-10);
        assert_relative_eq!(model.r_squared, 1.0, epsilon = 1e-10);
        assert_relative_eq!(model.prediction.unwrap(), 11.0, epsilon = 1e-10);
    }

    #[test]
    fn test_one_feature_matches_the_single_fit() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 3.0, 5.0, 4.0, 6.0];
        let single = fit_linear(&xs, &y, None).unwrap();
        let design = DMatrix::from_column_slice(5, 1, &xs);
        let multi = fit_multiple_linear(&design, &y, None).unwrap();
        assert_relative_eq!(multi.coefficients[0], single.coefficients[0], epsilon = 1e-10);
        assert_relative_eq!(multi.coefficients[1], single.coefficients[1], epsilon = 1e-10);
        assert_relative_eq!(multi.r_squared, single.r_squared, epsilon = 1e-10);
    }

    #[test]
    fn test_collinear_features_are_singular() {
        // second column is twice the first, X^T X loses rank
        let x = DMatrix::from_row_slice(
            4,
            2,
            &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0],
        );
        let y = [1.0, 2.0, 3.0, 4.0];
        let err = fit_multiple_linear(&x, &y, None).unwrap_err();
        assert!(matches!(err, RegressionError::SingularNormalEquations { .. }));
    }

    #[test]
    #[should_panic(expected = "feature row")]
    fn test_scalar_predict_faults_on_multiple_model() {
        let x = DMatrix::from_row_slice(
            5,
            2,
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0],
        );
        let y = [1.0, 3.0, 4.0, 6.0, 8.0];
        let model = fit_multiple_linear(&x, &y, None).unwrap();
        let _ = model.predict(1.0);
    }
}
