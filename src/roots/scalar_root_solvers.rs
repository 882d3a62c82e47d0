use log::{debug, warn};
use std::fmt;

/// floor for the relative-error denominator: |new - old| / max(|new|, REL_ERR_FLOOR)
pub const REL_ERR_FLOOR: f64 = 1e-12;
/// fixed step of the central difference used by Newton-Raphson instead of an analytic derivative
pub const NEWTON_DIFF_STEP: f64 = 1e-8;
/// a derivative below this magnitude is treated as vanished
pub const DERIVATIVE_EPS: f64 = 1e-12;

/// Enum to represent the root finding methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootMethod {
    Bisection,
    FalsePosition,
    NewtonRaphson,
    Secant,
    FixedPoint,
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RootMethod::Bisection => write!(f, "bisection"),
            RootMethod::FalsePosition => write!(f, "false position"),
            RootMethod::NewtonRaphson => write!(f, "newton-raphson"),
            RootMethod::Secant => write!(f, "secant"),
            RootMethod::FixedPoint => write!(f, "fixed point"),
        }
    }
}

/// Error types for root finding methods. These are the soft, mid-run numeric
/// failures; bad call parameters (non-finite seeds, zero tolerance) fault at
/// the function boundary instead.
#[derive(Debug, Clone, PartialEq)]
pub enum RootFindingError {
    /// f(a) and f(b) do not enclose a sign change
    NoSignChange { fa: f64, fb: f64 },
    /// the function returned NaN or an infinity
    NonFiniteValue { x: f64 },
    /// a step formula divided by exactly zero
    ZeroDenominator { iteration: usize },
    /// numerical derivative is (near-)zero or non-finite
    DerivativeVanished { x: f64, derivative: f64 },
}

impl fmt::Display for RootFindingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RootFindingError::NoSignChange { fa, fb } => write!(
                f,
                "function has the same sign on both bracket ends: f(a) = {}, f(b) = {}",
                fa, fb
            ),
            RootFindingError::NonFiniteValue { x } => {
                write!(f, "function value is not finite at x = {}", x)
            }
            RootFindingError::ZeroDenominator { iteration } => {
                write!(f, "zero denominator in step formula at iteration {}", iteration)
            }
            RootFindingError::DerivativeVanished { x, derivative } => write!(
                f,
                "derivative vanished at x = {} (f' = {})",
                x, derivative
            ),
        }
    }
}

impl std::error::Error for RootFindingError {}

/// One row of a solver run. `x0`/`x1` hold the bracket for bisection and
/// false position, the previous two iterates for the secant method and the
/// incoming iterate (duplicated) for Newton-Raphson and fixed-point
/// iteration. `rel_error` is `None` on the first record of every run.
#[derive(Debug, Clone, PartialEq)]
pub struct RootIterationRecord {
    pub index: usize,
    pub x0: f64,
    pub x1: f64,
    pub candidate: f64,
    pub f_candidate: f64,
    pub rel_error: Option<f64>,
}

/// Result structure shared by all scalar root finders
#[derive(Debug, Clone)]
pub struct RootFindingResult {
    pub root: f64,
    pub function_value: f64,
    pub iterations: usize,
    pub converged: bool,
    pub method: RootMethod,
    pub history: Vec<RootIterationRecord>,
}

/// |new - old| / max(|new|, 1e-12) - the convergence metric used across the kernel
pub fn relative_error(new: f64, old: f64) -> f64 {
    (new - old).abs() / new.abs().max(REL_ERR_FLOOR)
}

fn eval_checked<F>(f: &F, x: f64) -> Result<f64, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    let fx = f(x);
    if !fx.is_finite() {
        return Err(RootFindingError::NonFiniteValue { x });
    }
    Ok(fx)
}

fn check_params(tol: f64, max_iter: usize) {
    assert!(tol > 0.0, "Tolerance should be a positive number.");
    assert!(max_iter > 0, "Max iterations should be a positive number.");
}

/// Bisection method. Requires that f(a) and f(b) have opposite signs.
///
/// Every pass records the bracket, the midpoint candidate and f(midpoint).
/// Success when f(midpoint) is exactly zero or the relative step error drops
/// to `tol`; running out of the iteration budget is not an error and comes
/// back as `converged = false` with max_iter + 1 records.
pub fn bisection<F>(
    f: F,
    mut a: f64,
    mut b: f64,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    check_params(tol, max_iter);
    assert!(a.is_finite() && b.is_finite(), "Bracket ends should be finite numbers.");

    let mut fa = eval_checked(&f, a)?;
    let fb = eval_checked(&f, b)?;
    if fa * fb > 0.0 {
        return Err(RootFindingError::NoSignChange { fa, fb });
    }

    let mut history: Vec<RootIterationRecord> = Vec::new();
    let mut prev: Option<f64> = None;
    let mut x1 = a;
    let mut fx1 = fa;
    for i in 0..=max_iter {
        x1 = (a + b) / 2.0;
        fx1 = eval_checked(&f, x1)?;
        let err = prev.map(|p| relative_error(x1, p));
        history.push(RootIterationRecord {
            index: i + 1,
            x0: a,
            x1: b,
            candidate: x1,
            f_candidate: fx1,
            rel_error: err,
        });
        debug!("bisection iteration = {}, x = {}, error = {:?}", i + 1, x1, err);
        if fx1 == 0.0 || err.map_or(false, |e| e <= tol) {
            return Ok(RootFindingResult {
                root: x1,
                function_value: fx1,
                iterations: history.len(),
                converged: true,
                method: RootMethod::Bisection,
                history,
            });
        }
        // move the bound that shares the candidate's sign; only f(a) is
        // needed for the next sign test
        if fa * fx1 < 0.0 {
            b = x1;
        } else {
            a = x1;
            fa = fx1;
        }
        prev = Some(x1);
    }
    warn!("bisection: maximum iterations reached without meeting tolerance");
    Ok(RootFindingResult {
        root: x1,
        function_value: fx1,
        iterations: history.len(),
        converged: false,
        method: RootMethod::Bisection,
        history,
    })
}

/// False position (regula falsi). Same bracket narrowing as bisection, but
/// the candidate is the secant intercept (a*f(b) - b*f(a)) / (f(b) - f(a)).
pub fn false_position<F>(
    f: F,
    mut a: f64,
    mut b: f64,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    check_params(tol, max_iter);
    assert!(a.is_finite() && b.is_finite(), "Bracket ends should be finite numbers.");

    let mut fa = eval_checked(&f, a)?;
    let mut fb = eval_checked(&f, b)?;
    if fa * fb > 0.0 {
        return Err(RootFindingError::NoSignChange { fa, fb });
    }

    let mut history: Vec<RootIterationRecord> = Vec::new();
    let mut prev: Option<f64> = None;
    let mut x1 = a;
    let mut fx1 = fa;
    for i in 0..=max_iter {
        let denom = fb - fa;
        if denom == 0.0 {
            return Err(RootFindingError::ZeroDenominator { iteration: i + 1 });
        }
        x1 = (a * fb - b * fa) / denom;
        fx1 = eval_checked(&f, x1)?;
        let err = prev.map(|p| relative_error(x1, p));
        history.push(RootIterationRecord {
            index: i + 1,
            x0: a,
            x1: b,
            candidate: x1,
            f_candidate: fx1,
            rel_error: err,
        });
        debug!("false position iteration = {}, x = {}, error = {:?}", i + 1, x1, err);
        if fx1 == 0.0 || err.map_or(false, |e| e <= tol) {
            return Ok(RootFindingResult {
                root: x1,
                function_value: fx1,
                iterations: history.len(),
                converged: true,
                method: RootMethod::FalsePosition,
                history,
            });
        }
        if fa * fx1 < 0.0 {
            b = x1;
            fb = fx1;
        } else {
            a = x1;
            fa = fx1;
        }
        prev = Some(x1);
    }
    warn!("false position: maximum iterations reached without meeting tolerance");
    Ok(RootFindingResult {
        root: x1,
        function_value: fx1,
        iterations: history.len(),
        converged: false,
        method: RootMethod::FalsePosition,
        history,
    })
}

/// Newton-Raphson with the derivative always taken as the central difference
/// (f(x+h) - f(x-h)) / 2h at fixed h = 1e-8. The method never receives an
/// analytic derivative; that keeps every run comparable to the classroom
/// presentation of the scheme.
pub fn newton_raphson<F>(
    f: F,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    check_params(tol, max_iter);
    assert!(x0.is_finite(), "Initial guess should be a finite number.");

    let h = NEWTON_DIFF_STEP;
    let mut history: Vec<RootIterationRecord> = Vec::new();
    let mut prev: Option<f64> = None;
    let mut x = x0;
    let mut x_new = x0;
    let mut f_new = eval_checked(&f, x0)?;
    for i in 0..=max_iter {
        let fx = eval_checked(&f, x)?;
        let fp = eval_checked(&f, x + h)?;
        let fm = eval_checked(&f, x - h)?;
        let d = (fp - fm) / (2.0 * h);
        if !d.is_finite() || d.abs() < DERIVATIVE_EPS {
            return Err(RootFindingError::DerivativeVanished { x, derivative: d });
        }
        x_new = x - fx / d;
        f_new = eval_checked(&f, x_new)?;
        let err = prev.map(|p| relative_error(x_new, p));
        history.push(RootIterationRecord {
            index: i + 1,
            x0: x,
            x1: x,
            candidate: x_new,
            f_candidate: f_new,
            rel_error: err,
        });
        debug!("newton-raphson iteration = {}, x = {}, error = {:?}", i + 1, x_new, err);
        if err.map_or(false, |e| e <= tol) {
            return Ok(RootFindingResult {
                root: x_new,
                function_value: f_new,
                iterations: history.len(),
                converged: true,
                method: RootMethod::NewtonRaphson,
                history,
            });
        }
        prev = Some(x_new);
        x = x_new;
    }
    warn!("newton-raphson: maximum iterations reached without meeting tolerance");
    Ok(RootFindingResult {
        root: x_new,
        function_value: f_new,
        iterations: history.len(),
        converged: false,
        method: RootMethod::NewtonRaphson,
        history,
    })
}

/// Secant method over the last two iterates x0, x1.
pub fn secant<F>(
    f: F,
    mut x0: f64,
    mut x1: f64,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    check_params(tol, max_iter);
    assert!(
        x0.is_finite() && x1.is_finite(),
        "Initial guesses should be finite numbers."
    );

    let mut f0 = eval_checked(&f, x0)?;
    let mut f1 = eval_checked(&f, x1)?;
    let mut history: Vec<RootIterationRecord> = Vec::new();
    let mut prev: Option<f64> = None;
    let mut x2 = x1;
    let mut f2 = f1;
    for i in 0..=max_iter {
        let denom = f1 - f0;
        if denom == 0.0 {
            return Err(RootFindingError::ZeroDenominator { iteration: i + 1 });
        }
        x2 = x1 - f1 * (x1 - x0) / denom;
        f2 = eval_checked(&f, x2)?;
        let err = prev.map(|p| relative_error(x2, p));
        history.push(RootIterationRecord {
            index: i + 1,
            x0,
            x1,
            candidate: x2,
            f_candidate: f2,
            rel_error: err,
        });
        debug!("secant iteration = {}, x = {}, error = {:?}", i + 1, x2, err);
        if err.map_or(false, |e| e <= tol) {
            return Ok(RootFindingResult {
                root: x2,
                function_value: f2,
                iterations: history.len(),
                converged: true,
                method: RootMethod::Secant,
                history,
            });
        }
        x0 = x1;
        f0 = f1;
        x1 = x2;
        f1 = f2;
        prev = Some(x2);
    }
    warn!("secant: maximum iterations reached without meeting tolerance");
    Ok(RootFindingResult {
        root: x2,
        function_value: f2,
        iterations: history.len(),
        converged: false,
        method: RootMethod::Secant,
        history,
    })
}

/// Fixed-point iteration x_{n+1} = g(x_n). No divergence detection beyond
/// the iteration budget; a non-finite g value still comes back as Err. For
/// this method the recorded function value is the g evaluation, i.e. the
/// candidate itself.
pub fn fixed_point<G>(
    g: G,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult, RootFindingError>
where
    G: Fn(f64) -> f64,
{
    check_params(tol, max_iter);
    assert!(x0.is_finite(), "Initial guess should be a finite number.");

    let mut history: Vec<RootIterationRecord> = Vec::new();
    let mut prev: Option<f64> = None;
    let mut x = x0;
    let mut gx = x0;
    for i in 0..=max_iter {
        gx = eval_checked(&g, x)?;
        let err = prev.map(|p| relative_error(gx, p));
        history.push(RootIterationRecord {
            index: i + 1,
            x0: x,
            x1: x,
            candidate: gx,
            f_candidate: gx,
            rel_error: err,
        });
        debug!("fixed point iteration = {}, x = {}, error = {:?}", i + 1, gx, err);
        if err.map_or(false, |e| e <= tol) {
            return Ok(RootFindingResult {
                root: gx,
                function_value: gx,
                iterations: history.len(),
                converged: true,
                method: RootMethod::FixedPoint,
                history,
            });
        }
        prev = Some(gx);
        x = gx;
    }
    warn!("fixed point: maximum iterations reached without meeting tolerance");
    Ok(RootFindingResult {
        root: gx,
        function_value: gx,
        iterations: history.len(),
        converged: false,
        method: RootMethod::FixedPoint,
        history,
    })
}

/// Starting data for `solve_with_method`: a bracket for the enclosure
/// methods, one seed for Newton-Raphson/fixed point, two for secant.
#[derive(Debug, Clone, Copy)]
pub enum RootSeed {
    Bracket { a: f64, b: f64 },
    Seed { x0: f64 },
    Pair { x0: f64, x1: f64 },
}

/// Uniform dispatcher over the five solvers, so callers (demo binary,
/// comparison tests) can drive any of them through one entry point.
/// A method/seed mismatch is a caller bug and faults immediately.
pub fn solve_with_method<F>(
    f: F,
    method: RootMethod,
    seed: RootSeed,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    match (method, seed) {
        (RootMethod::Bisection, RootSeed::Bracket { a, b }) => bisection(f, a, b, tol, max_iter),
        (RootMethod::FalsePosition, RootSeed::Bracket { a, b }) => {
            false_position(f, a, b, tol, max_iter)
        }
        (RootMethod::NewtonRaphson, RootSeed::Seed { x0 }) => newton_raphson(f, x0, tol, max_iter),
        (RootMethod::Secant, RootSeed::Pair { x0, x1 }) => secant(f, x0, x1, tol, max_iter),
        (RootMethod::FixedPoint, RootSeed::Seed { x0 }) => fixed_point(f, x0, tol, max_iter),
        (method, seed) => panic!(
            "seed {:?} does not match the {} method",
            seed, method
        ),
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cubic(x: f64) -> f64 {
        x * x * x - x - 2.0
    }

    #[test]
    fn test_bisection_classic_cubic() {
        let res = bisection(cubic, 1.0, 2.0, 1e-6, 50).unwrap();
        assert!(res.converged);
        assert_relative_eq!(res.root, 1.521380, epsilon = 1e-5);
        assert!(res.function_value.abs() < 1e-5);
        // first record never carries an error estimate
        assert_eq!(res.history[0].rel_error, None);
        assert!(res.history[1].rel_error.is_some());
        assert_eq!(res.iterations, res.history.len());
    }

    #[test]
    fn test_bisection_bracket_halves() {
        let res = bisection(cubic, 1.0, 2.0, 1e-10, 30).unwrap();
        for pair in res.history.windows(2) {
            let w0 = pair[0].x1 - pair[0].x0;
            let w1 = pair[1].x1 - pair[1].x0;
            assert_relative_eq!(w1, w0 / 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bisection_rejects_same_sign_bracket() {
        let err = bisection(cubic, 2.0, 3.0, 1e-6, 50).unwrap_err();
        match err {
            RootFindingError::NoSignChange { fa, fb } => {
                assert!(fa > 0.0 && fb > 0.0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bisection_budget_exhaustion_is_not_an_error() {
        let res = bisection(cubic, 1.0, 2.0, 1e-15, 5).unwrap();
        assert!(!res.converged);
        // one error-free first record plus max_iter measured ones
        assert_eq!(res.history.len(), 6);
    }

    #[test]
    fn test_bisection_is_deterministic() {
        let a = bisection(cubic, 1.0, 2.0, 1e-8, 60).unwrap();
        let b = bisection(cubic, 1.0, 2.0, 1e-8, 60).unwrap();
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_false_position_classic_cubic() {
        let res = false_position(cubic, 1.0, 2.0, 1e-6, 100).unwrap();
        assert!(res.converged);
        assert_relative_eq!(res.root, 1.5213797, epsilon = 1e-4);
    }

    #[test]
    fn test_newton_raphson_classic_cubic() {
        let res = newton_raphson(cubic, 1.5, 1e-8, 50).unwrap();
        assert!(res.converged);
        assert_relative_eq!(res.root, 1.5213797068, epsilon = 1e-7);
        assert!(res.iterations < 10);
    }

    #[test]
    fn test_newton_raphson_flat_function_errs() {
        // constant function: central difference is exactly zero everywhere
        let err = newton_raphson(|_| 3.0, 0.0, 1e-6, 20).unwrap_err();
        match err {
            RootFindingError::DerivativeVanished { .. } => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_newton_raphson_non_finite_value_errs() {
        let err = newton_raphson(|x| (x - 1.0).ln(), 0.5, 1e-6, 20).unwrap_err();
        match err {
            RootFindingError::NonFiniteValue { .. } => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_secant_classic_cubic() {
        let res = secant(cubic, 1.0, 2.0, 1e-8, 50).unwrap();
        assert!(res.converged);
        assert_relative_eq!(res.root, 1.5213797068, epsilon = 1e-7);
    }

    #[test]
    fn test_secant_zero_denominator() {
        // symmetric parabola: f(-1) == f(1), denominator is exactly zero
        let err = secant(|x| x * x + 1.0, -1.0, 1.0, 1e-6, 50).unwrap_err();
        assert_eq!(err, RootFindingError::ZeroDenominator { iteration: 1 });
    }

    #[test]
    fn test_fixed_point_cosine() {
        // x = cos(x) has the Dottie fixed point near 0.7390851
        let res = fixed_point(|x| x.cos(), 0.5, 1e-8, 200).unwrap();
        assert!(res.converged);
        assert_relative_eq!(res.root, 0.7390851332, epsilon = 1e-6);
    }

    #[test]
    fn test_fixed_point_budget_exhaustion() {
        // g(x) = 2x diverges from any nonzero seed, the budget just runs out
        let res = fixed_point(|x| 2.0 * x, 1.0, 1e-6, 20).unwrap();
        assert!(!res.converged);
        assert_eq!(res.history.len(), 21);
    }

    #[test]
    fn test_dispatcher_routes_each_method() {
        let bracket = RootSeed::Bracket { a: 1.0, b: 2.0 };
        let res = solve_with_method(cubic, RootMethod::Bisection, bracket, 1e-6, 60).unwrap();
        assert_eq!(res.method, RootMethod::Bisection);
        let res =
            solve_with_method(cubic, RootMethod::FalsePosition, bracket, 1e-6, 100).unwrap();
        assert_eq!(res.method, RootMethod::FalsePosition);
        let res = solve_with_method(
            cubic,
            RootMethod::NewtonRaphson,
            RootSeed::Seed { x0: 1.5 },
            1e-8,
            50,
        )
        .unwrap();
        assert_eq!(res.method, RootMethod::NewtonRaphson);
        let res = solve_with_method(
            cubic,
            RootMethod::Secant,
            RootSeed::Pair { x0: 1.0, x1: 2.0 },
            1e-8,
            50,
        )
        .unwrap();
        assert_eq!(res.method, RootMethod::Secant);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_dispatcher_rejects_mismatched_seed() {
        let _ = solve_with_method(
            cubic,
            RootMethod::Bisection,
            RootSeed::Seed { x0: 1.0 },
            1e-6,
            50,
        );
    }

    #[test]
    #[should_panic(expected = "Tolerance")]
    fn test_non_positive_tolerance_faults() {
        let _ = bisection(cubic, 1.0, 2.0, 0.0, 50);
    }
}
