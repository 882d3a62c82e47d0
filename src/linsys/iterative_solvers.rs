use crate::linsys::direct_solvers::{LinearSolveError, PIVOT_EPS};
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Enum to represent the iterative solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterativeMethod {
    Jacobi,
    GaussSeidel,
    ConjugateGradient,
}

impl fmt::Display for IterativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IterativeMethod::Jacobi => write!(f, "jacobi"),
            IterativeMethod::GaussSeidel => write!(f, "gauss-seidel"),
            IterativeMethod::ConjugateGradient => write!(f, "conjugate gradient"),
        }
    }
}

/// One row of an iterative run: the iterate after sweep `index` and the
/// error against the previous iterate. Record 0 is the initial guess and
/// carries no error.
#[derive(Debug, Clone, PartialEq)]
pub struct LinIterationRecord {
    pub index: usize,
    pub x: DVector<f64>,
    pub error: Option<f64>,
}

/// Result of an iterative run. `iterations` counts update sweeps; the
/// history additionally holds the seed record, so it is one entry longer.
#[derive(Debug, Clone)]
pub struct IterativeSolveResult {
    pub x: DVector<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub method: IterativeMethod,
    pub history: Vec<LinIterationRecord>,
}

/// max_i |x_new_i - x_old_i| / x_new_i with the signed new component in the
/// denominator, substituting 1.0 when the component is exactly zero. The
/// metric goes negative when the dominant component is negative, which can
/// stop a run early; the behavior is kept exactly as taught.
pub fn iteration_error(x_new: &DVector<f64>, x_old: &DVector<f64>) -> f64 {
    let mut worst = f64::NEG_INFINITY;
    for i in 0..x_new.len() {
        let denom = if x_new[i] == 0.0 { 1.0 } else { x_new[i] };
        let e = (x_new[i] - x_old[i]).abs() / denom;
        if e > worst {
            worst = e;
        }
    }
    worst
}

fn check_iterative(a: &DMatrix<f64>, b: &DVector<f64>, x0: &DVector<f64>, tol: f64, max_iter: usize) {
    assert!(a.nrows() > 0, "System should have at least one equation.");
    assert_eq!(a.nrows(), a.ncols(), "Matrix should be square.");
    assert_eq!(
        a.nrows(),
        b.len(),
        "Matrix and right-hand side sizes should agree."
    );
    assert_eq!(
        a.nrows(),
        x0.len(),
        "Matrix and initial guess sizes should agree."
    );
    assert!(tol > 0.0, "Tolerance should be a positive number.");
    assert!(max_iter > 0, "Max iterations should be a positive number.");
}

fn zero_diagonal_check(a: &DMatrix<f64>) -> Result<(), LinearSolveError> {
    // exact zero only; a tiny but nonzero diagonal is allowed to iterate
    for i in 0..a.nrows() {
        if a[(i, i)] == 0.0 {
            return Err(LinearSolveError::ZeroDiagonal { row: i });
        }
    }
    Ok(())
}

/// Jacobi iteration: every component of the next iterate is computed from
/// the previous iterate only.
pub fn jacobi(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    x0: &DVector<f64>,
    tol: f64,
    max_iter: usize,
) -> Result<IterativeSolveResult, LinearSolveError> {
    check_iterative(a, b, x0, tol, max_iter);
    zero_diagonal_check(a)?;
    let n = a.nrows();

    let mut history = vec![LinIterationRecord {
        index: 0,
        x: x0.clone(),
        error: None,
    }];
    let mut x = x0.clone();
    let mut prev_err: Option<f64> = None;
    for k in 1..=max_iter {
        let mut x_new = DVector::zeros(n);
        for i in 0..n {
            let mut s = 0.0;
            for j in 0..n {
                if j != i {
                    s += a[(i, j)] * x[j];
                }
            }
            x_new[i] = (b[i] - s) / a[(i, i)];
        }
        let err = iteration_error(&x_new, &x);
        history.push(LinIterationRecord {
            index: k,
            x: x_new.clone(),
            error: Some(err),
        });
        debug!("jacobi iteration = {}, error = {}", k, err);
        if let Some(p) = prev_err {
            if err > p {
                warn!("jacobi: error is increasing at iteration {}", k);
            }
        }
        if err <= tol {
            return Ok(IterativeSolveResult {
                x: x_new,
                iterations: k,
                converged: true,
                method: IterativeMethod::Jacobi,
                history,
            });
        }
        x = x_new;
        prev_err = Some(err);
    }
    warn!("jacobi: maximum iterations reached without meeting tolerance");
    Ok(IterativeSolveResult {
        x,
        iterations: max_iter,
        converged: false,
        method: IterativeMethod::Jacobi,
        history,
    })
}

/// Gauss-Seidel iteration: each sweep reuses the components already updated
/// in the same sweep, which usually halves the iteration count against
/// Jacobi on the same system.
pub fn gauss_seidel(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    x0: &DVector<f64>,
    tol: f64,
    max_iter: usize,
) -> Result<IterativeSolveResult, LinearSolveError> {
    check_iterative(a, b, x0, tol, max_iter);
    zero_diagonal_check(a)?;
    let n = a.nrows();

    let mut history = vec![LinIterationRecord {
        index: 0,
        x: x0.clone(),
        error: None,
    }];
    let mut x = x0.clone();
    let mut prev_err: Option<f64> = None;
    for k in 1..=max_iter {
        let x_prev = x.clone();
        for i in 0..n {
            let mut s = 0.0;
            for j in 0..n {
                if j != i {
                    s += a[(i, j)] * x[j];
                }
            }
            x[i] = (b[i] - s) / a[(i, i)];
        }
        let err = iteration_error(&x, &x_prev);
        history.push(LinIterationRecord {
            index: k,
            x: x.clone(),
            error: Some(err),
        });
        debug!("gauss-seidel iteration = {}, error = {}", k, err);
        if let Some(p) = prev_err {
            if err > p {
                warn!("gauss-seidel: error is increasing at iteration {}", k);
            }
        }
        if err <= tol {
            return Ok(IterativeSolveResult {
                x,
                iterations: k,
                converged: true,
                method: IterativeMethod::GaussSeidel,
                history,
            });
        }
        prev_err = Some(err);
    }
    warn!("gauss-seidel: maximum iterations reached without meeting tolerance");
    Ok(IterativeSolveResult {
        x,
        iterations: max_iter,
        converged: false,
        method: IterativeMethod::GaussSeidel,
        history,
    })
}

/// Conjugate gradient for symmetric positive definite systems. Positive
/// definiteness is assumed, never verified; an indefinite matrix surfaces as
/// an `IterationBreakdown` when p^T A p collapses. The run always starts
/// from the zero vector, and the error column holds the residual 2-norm
/// rather than the componentwise metric of the stationary methods.
pub fn conjugate_gradient(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    tol: f64,
    max_iter: usize,
) -> Result<IterativeSolveResult, LinearSolveError> {
    let mut x = DVector::zeros(b.len());
    check_iterative(a, b, &x, tol, max_iter);

    let mut history = vec![LinIterationRecord {
        index: 0,
        x: x.clone(),
        error: None,
    }];
    let mut r = b.clone();
    let mut p = r.clone();
    let mut rs_old = r.dot(&r);
    for k in 1..=max_iter {
        let ap = a * &p;
        let denom = p.dot(&ap);
        if !denom.is_finite() || denom.abs() < PIVOT_EPS {
            warn!(
                "conjugate gradient: breakdown at iteration {}, p^T A p = {}",
                k, denom
            );
            return Err(LinearSolveError::IterationBreakdown {
                iteration: k,
                denominator: denom,
            });
        }
        let alpha = rs_old / denom;
        x += alpha * &p;
        r -= alpha * &ap;
        let rs_new = r.dot(&r);
        let err = rs_new.sqrt();
        history.push(LinIterationRecord {
            index: k,
            x: x.clone(),
            error: Some(err),
        });
        debug!("conjugate gradient iteration = {}, residual norm = {}", k, err);
        if err <= tol {
            return Ok(IterativeSolveResult {
                x,
                iterations: k,
                converged: true,
                method: IterativeMethod::ConjugateGradient,
                history,
            });
        }
        let beta = rs_new / rs_old;
        p = &r + beta * &p;
        rs_old = rs_new;
    }
    warn!("conjugate gradient: maximum iterations reached without meeting tolerance");
    Ok(IterativeSolveResult {
        x,
        iterations: max_iter,
        converged: false,
        method: IterativeMethod::ConjugateGradient,
        history,
    })
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::linsys::direct_solvers::gaussian_elimination;
    use approx::assert_relative_eq;

    fn dominant_system() -> (DMatrix<f64>, DVector<f64>) {
        (
            DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]),
            DVector::from_vec(vec![5.0, 4.0]),
        )
    }

    #[test]
    fn test_jacobi_converges_on_dominant_system() {
        let (a, b) = dominant_system();
        let x0 = DVector::zeros(2);
        let res = jacobi(&a, &b, &x0, 1e-10, 200).unwrap();
        assert!(res.converged);
        assert_relative_eq!(res.x[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(res.x[1], 1.0, epsilon = 1e-8);
        assert_eq!(res.history.len(), res.iterations + 1);
        assert_eq!(res.history[0].error, None);
        assert_eq!(res.history[0].x, x0);
    }

    #[test]
    fn test_jacobi_matches_direct_solution() {
        let (a, b) = dominant_system();
        let x0 = DVector::zeros(2);
        let direct = gaussian_elimination(&a, &b).unwrap();
        let iterative = jacobi(&a, &b, &x0, 1e-12, 500).unwrap();
        for i in 0..2 {
            assert_relative_eq!(iterative.x[i], direct[i], epsilon = 1e-8);
        }
    }

    #[test]
    fn test_gauss_seidel_needs_no_more_sweeps_than_jacobi() {
        let (a, b) = dominant_system();
        let x0 = DVector::zeros(2);
        let j = jacobi(&a, &b, &x0, 1e-10, 200).unwrap();
        let gs = gauss_seidel(&a, &b, &x0, 1e-10, 200).unwrap();
        assert!(gs.converged);
        assert!(gs.iterations <= j.iterations);
        assert_relative_eq!(gs.x[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(gs.x[1], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_diagonal_is_rejected_before_iterating() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        let x0 = DVector::zeros(2);
        let err = jacobi(&a, &b, &x0, 1e-6, 50).unwrap_err();
        assert_eq!(err, LinearSolveError::ZeroDiagonal { row: 0 });
        let err = gauss_seidel(&a, &b, &x0, 1e-6, 50).unwrap_err();
        assert_eq!(err, LinearSolveError::ZeroDiagonal { row: 0 });
    }

    #[test]
    fn test_budget_exhaustion_is_not_an_error() {
        // spectral radius 2: iterates double every sweep and stay positive,
        // so the error hovers near 0.5 until the budget runs out
        let a = DMatrix::from_row_slice(2, 2, &[1.0, -2.0, -2.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        let x0 = DVector::zeros(2);
        let res = jacobi(&a, &b, &x0, 1e-10, 10).unwrap();
        assert!(!res.converged);
        assert_eq!(res.iterations, 10);
        assert_eq!(res.history.len(), 11);
    }

    #[test]
    fn test_error_metric_is_signed() {
        // solution components are negative, so the first sweep error is -1
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 4.0]);
        let b = DVector::from_vec(vec![-5.0, -5.0]);
        let x0 = DVector::zeros(2);
        let res = jacobi(&a, &b, &x0, 1e-6, 100).unwrap();
        // the signed metric dips below the tolerance immediately and stops
        // the run one sweep in, well short of the true solution [-1, -1]
        assert!(res.converged);
        assert_eq!(res.iterations, 1);
        assert_relative_eq!(res.history[1].error.unwrap(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(res.x[0], -1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_error_metric_substitutes_one_for_zero_component() {
        let x_new = DVector::from_vec(vec![0.0, 2.0]);
        let x_old = DVector::from_vec(vec![0.0, 1.0]);
        // first component divides by the substituted 1.0, not by 0.0
        assert_relative_eq!(iteration_error(&x_new, &x_old), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let (a, b) = dominant_system();
        let x0 = DVector::zeros(2);
        let r1 = jacobi(&a, &b, &x0, 1e-10, 200).unwrap();
        let r2 = jacobi(&a, &b, &x0, 1e-10, 200).unwrap();
        assert_eq!(r1.history, r2.history);
    }

    #[test]
    fn test_conjugate_gradient_converges_on_spd_system() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        let res = conjugate_gradient(&a, &b, 1e-10, 50).unwrap();
        assert!(res.converged);
        assert_relative_eq!(res.x[0], 1.0 / 11.0, epsilon = 1e-8);
        assert_relative_eq!(res.x[1], 7.0 / 11.0, epsilon = 1e-8);
        // exact-arithmetic termination bound: n steps for an n x n system
        assert!(res.iterations <= 2);
    }

    #[test]
    fn test_conjugate_gradient_records_residual_norms() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        let res = conjugate_gradient(&a, &b, 1e-10, 50).unwrap();
        assert_eq!(res.history[0].error, None);
        assert_eq!(res.history[0].x, DVector::zeros(2));
        for rec in &res.history[1..] {
            let r = &b - &a * &rec.x;
            assert_relative_eq!(rec.error.unwrap(), r.norm(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_conjugate_gradient_breaks_down_on_indefinite_matrix() {
        // the first direction already gives p^T A p = 0
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        match conjugate_gradient(&a, &b, 1e-10, 50) {
            Err(LinearSolveError::IterationBreakdown {
                iteration,
                denominator,
            }) => {
                assert_eq!(iteration, 1);
                assert!(denominator.abs() < 1e-12);
            }
            other => panic!("expected IterationBreakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_conjugate_gradient_budget_exhaustion() {
        let a = DMatrix::from_row_slice(
            3,
            3,
            &[4.0, -2.0, 1.0, -2.0, 4.0, -2.0, 1.0, -2.0, 4.0],
        );
        let b = DVector::from_vec(vec![11.0, -16.0, 17.0]);
        let res = conjugate_gradient(&a, &b, 1e-14, 1).unwrap();
        assert!(!res.converged);
        assert_eq!(res.iterations, 1);
        assert_eq!(res.history.len(), 2);

        let full = conjugate_gradient(&a, &b, 1e-12, 50).unwrap();
        let direct = gaussian_elimination(&a, &b).unwrap();
        for i in 0..3 {
            assert_relative_eq!(full.x[i], direct[i], epsilon = 1e-8);
        }
    }
}
