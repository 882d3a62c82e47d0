/// Dense linear system solvers over nalgebra DMatrix/DVector.
///
/// Direct route: naive Gaussian elimination (no row exchanges), Gauss-Jordan
/// reduction, Doolittle LU, Cholesky for symmetric positive definite
/// matrices, Cramer's rule over cofactor determinants and Gauss-Jordan
/// matrix inversion, all rejecting pivots below 1e-12 through
/// `LinearSolveError`.
/// ```
/// use RustedNumLab::linsys::direct_solvers::gaussian_elimination;
/// use nalgebra::{DMatrix, DVector};
/// let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![3.0, 5.0]);
/// let x = gaussian_elimination(&a, &b).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-12 && (x[1] - 1.4).abs() < 1e-12);
/// ```
pub mod direct_solvers;
/// Iterative solvers: Jacobi and Gauss-Seidel sweeps with an exactly-zero
/// diagonal check up front, and conjugate gradient for SPD systems. The
/// stationary methods share a convergence metric that divides by the signed
/// new component (1.0 substituted for an exact zero), so it is not a norm;
/// see `iteration_error`. Conjugate gradient records the residual 2-norm
/// instead. All three keep a per-sweep history seeded with record 0.
/// ```
/// use RustedNumLab::linsys::iterative_solvers::gauss_seidel;
/// use nalgebra::{DMatrix, DVector};
/// let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![5.0, 4.0]);
/// let res = gauss_seidel(&a, &b, &DVector::zeros(2), 1e-10, 100).unwrap();
/// assert!(res.converged && (res.x[0] - 1.0).abs() < 1e-8);
/// ```
pub mod iterative_solvers;
