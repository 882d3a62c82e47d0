/// Scalar root finding: bisection, false position, Newton-Raphson, secant
/// and fixed-point iteration over a user closure f(x) -> f64.
///
/// All five solvers share the same contract: strictly positive tolerance and
/// iteration budget are asserted at the boundary, numeric breakdown mid-run
/// (same-sign bracket, NaN from the callback, vanished derivative, zero
/// denominator) comes back as `Err(RootFindingError)`, and simply running out
/// of iterations is a regular `Ok` with `converged = false`. Every iteration
/// is appended to a history table whose first record carries no error
/// estimate, because the metric |new - old| / max(|new|, 1e-12) needs two
/// candidates.
///
/// Newton-Raphson never takes an analytic derivative; it always uses the
/// central difference (f(x+h) - f(x-h)) / 2h with h = 1e-8.
/// ```
/// use RustedNumLab::roots::scalar_root_solvers::bisection;
/// let res = bisection(|x| x * x * x - x - 2.0, 1.0, 2.0, 1e-6, 60).unwrap();
/// assert!(res.converged);
/// assert!((res.root - 1.521380).abs() < 1e-4);
/// ```
/// The dispatcher runs any method from one entry point:
/// ```
/// use RustedNumLab::roots::scalar_root_solvers::{solve_with_method, RootMethod, RootSeed};
/// let res = solve_with_method(
///     |x: f64| x.exp() - 2.0,
///     RootMethod::NewtonRaphson,
///     RootSeed::Seed { x0: 1.0 },
///     1e-8,
///     50,
/// )
/// .unwrap();
/// assert!((res.root - std::f64::consts::LN_2).abs() < 1e-7);
/// ```
pub mod scalar_root_solvers;
