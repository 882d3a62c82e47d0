/// Least-squares straight line over closed-form normal equations, plus the
/// shared `RegressionModel` result (coefficients, R^2 on the original data
/// scale, optional prediction at a query point).
/// ```
/// use RustedNumLab::regression::linear_fit::fit_linear;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 3.0, 5.0, 4.0, 6.0];
/// let model = fit_linear(&x, &y, Some(6.0)).unwrap();
/// assert!((model.coefficients[1] - 0.9).abs() < 1e-12);
/// assert!((model.r_squared - 0.81).abs() < 1e-12);
/// ```
pub mod linear_fit;
/// Polynomial least squares through power-sum normal equations, solved with
/// the kernel's only partially pivoted elimination.
/// ```
/// use RustedNumLab::regression::poly_fit::fit_polynomial;
/// let x = [-2.0, -1.0, 0.0, 1.0, 2.0];
/// let y: Vec<f64> = x.iter().map(|v| v * v + 1.0).collect();
/// let model = fit_polynomial(&x, &y, 2, None).unwrap();
/// assert!((model.coefficients[2] - 1.0).abs() < 1e-10);
/// ```
pub mod poly_fit;
/// Exponential y = a e^(bx) and power y = a x^b models fitted on the
/// logarithmic scale. Non-positive data is not rejected: the logarithms go
/// NaN and the NaN surfaces in the coefficients.
pub mod nonlinear_fit;
