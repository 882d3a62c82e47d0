use crate::regression::linear_fit::{
    RegressionError, RegressionKind, RegressionModel, check_samples,
    coefficient_of_determination, solve_normal_equations,
};
use nalgebra::{DMatrix, DVector};

/// Least-squares polynomial of the given degree. The normal matrix holds
/// the power sums G[j][k] = sum x^(j+k) and the right side sum y x^j;
/// coefficients come back ascending, [c0, c1, ..., cm].
pub fn fit_polynomial(
    x: &[f64],
    y: &[f64],
    degree: usize,
    predict_at: Option<f64>,
) -> Result<RegressionModel, RegressionError> {
    check_samples(x, y, degree + 1);
    let m = degree + 1;

    // power sums up to x^(2m - 2), computed once
    let mut sums = vec![0.0; 2 * m - 1];
    for &xi in x {
        let mut p = 1.0;
        for s in sums.iter_mut() {
            *s += p;
            p *= xi;
        }
    }
    let g = DMatrix::from_fn(m, m, |j, k| sums[j + k]);
    let rhs = DVector::from_fn(m, |j, _| {
        x.iter().zip(y.iter()).map(|(&xi, &yi)| yi * xi.powi(j as i32)).sum()
    });

    let coefficients = solve_normal_equations(g, rhs)?;
    let model = RegressionModel {
        kind: RegressionKind::Polynomial { degree },
        coefficients,
        r_squared: 0.0,
        prediction: None,
    };
    let y_hat: Vec<f64> = x.iter().map(|&v| model.predict(v)).collect();
    Ok(RegressionModel {
        r_squared: coefficient_of_determination(y, &y_hat),
        prediction: predict_at.map(|q| model.predict(q)),
        ..model
    })
}
