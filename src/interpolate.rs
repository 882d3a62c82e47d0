/// Finite difference tables and the Newton-Gregory forward, backward and
/// Gauss central interpolation formulas for equally spaced grids, plus
/// Newton's divided differences for arbitrary spacing.
/// ```
/// use RustedNumLab::interpolate::newton_difference::newton_forward;
/// // y = x^2 + 1 tabulated on an unit grid
/// let value = newton_forward(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 5.0, 10.0], 1.5).unwrap();
/// assert!((value - 3.25).abs() < 1e-12);
/// ```
pub mod newton_difference;
/// Lagrange interpolation built directly from the basis polynomials.
/// ```
/// use RustedNumLab::interpolate::lagrange::lagrange_interpolate;
/// let value = lagrange_interpolate(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0], 1.5);
/// assert!((value - 3.25).abs() < 1e-12);
/// ```
pub mod lagrange;
/// Piecewise interpolation: linear, quadratic (left-to-right curvature
/// propagation with the first segment flat) and natural cubic splines.
/// Splines never extrapolate; evaluation outside the knots is an error.
/// ```
/// use RustedNumLab::interpolate::splines::cubic_spline;
/// let spline = cubic_spline(&[1.0, 2.0, 3.0], &[2.0, 3.0, 5.0]);
/// assert!((spline.evaluate(1.5).unwrap() - 2.40625).abs() < 1e-12);
/// assert!(spline.evaluate(5.0).is_err());
/// ```
pub mod splines;
