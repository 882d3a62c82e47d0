use log::error;
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// pivots and Cholesky diagonals below this magnitude reject the matrix
pub const PIVOT_EPS: f64 = 1e-12;

/// Error types shared by the direct and iterative linear solvers. Shape
/// mismatches are caller bugs and fault at the boundary instead of coming
/// back through this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum LinearSolveError {
    /// |pivot| < 1e-12 during elimination or factorization
    NearZeroPivot { row: usize, pivot: f64 },
    /// a[i][j] != a[j][i], so the Cholesky factorization is not defined
    NotSymmetric { row: usize, col: usize },
    /// the Cholesky diagonal radicand went non-positive
    NotPositiveDefinite { row: usize, radicand: f64 },
    /// |det(A)| < 1e-12, Cramer's rule has nothing to divide by
    SingularMatrix { determinant: f64 },
    /// an iterative sweep would divide by an exactly zero diagonal entry
    ZeroDiagonal { row: usize },
    /// p^T A p collapsed during a conjugate gradient step
    IterationBreakdown { iteration: usize, denominator: f64 },
}

impl fmt::Display for LinearSolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinearSolveError::NearZeroPivot { row, pivot } => {
                write!(f, "near-zero pivot {} in row {}", pivot, row)
            }
            LinearSolveError::NotSymmetric { row, col } => {
                write!(f, "matrix is not symmetric at ({}, {})", row, col)
            }
            LinearSolveError::NotPositiveDefinite { row, radicand } => {
                write!(
                    f,
                    "matrix is not positive definite (radicand {} at row {})",
                    radicand, row
                )
            }
            LinearSolveError::SingularMatrix { determinant } => {
                write!(f, "matrix is singular (determinant = {})", determinant)
            }
            LinearSolveError::ZeroDiagonal { row } => {
                write!(f, "zero diagonal entry in row {}", row)
            }
            LinearSolveError::IterationBreakdown {
                iteration,
                denominator,
            } => {
                write!(
                    f,
                    "conjugate gradient breakdown at iteration {}: p^T A p = {}",
                    iteration, denominator
                )
            }
        }
    }
}

impl std::error::Error for LinearSolveError {}

/// Enum to choose a direct solver through `solve_direct`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectMethod {
    GaussianElimination,
    GaussJordan,
    Lu,
    Cholesky,
    Cramer,
    Inversion,
}

impl fmt::Display for DirectMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DirectMethod::GaussianElimination => write!(f, "gaussian elimination"),
            DirectMethod::GaussJordan => write!(f, "gauss-jordan"),
            DirectMethod::Lu => write!(f, "lu decomposition"),
            DirectMethod::Cholesky => write!(f, "cholesky"),
            DirectMethod::Cramer => write!(f, "cramer's rule"),
            DirectMethod::Inversion => write!(f, "matrix inversion"),
        }
    }
}

fn check_system(a: &DMatrix<f64>, b: &DVector<f64>) {
    assert!(a.nrows() > 0, "System should have at least one equation.");
    assert_eq!(a.nrows(), a.ncols(), "Matrix should be square.");
    assert_eq!(
        a.nrows(),
        b.len(),
        "Matrix and right-hand side sizes should agree."
    );
}

/// Naive Gaussian elimination with back substitution. Rows are never
/// exchanged, so a (near-)zero value on the diagonal rejects the system even
/// when a row swap would solve it. The normal-equation path in the
/// regression family is the only place partial pivoting is used.
pub fn gaussian_elimination(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, LinearSolveError> {
    check_system(a, b);
    let n = a.nrows();
    let mut m = a.clone();
    let mut rhs = b.clone();

    for k in 0..n {
        let pivot = m[(k, k)];
        if pivot.abs() < PIVOT_EPS {
            error!("gaussian elimination: near-zero pivot {} in row {}", pivot, k);
            return Err(LinearSolveError::NearZeroPivot { row: k, pivot });
        }
        for i in (k + 1)..n {
            let factor = m[(i, k)] / pivot;
            for j in k..n {
                m[(i, j)] -= factor * m[(k, j)];
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut s = rhs[i];
        for j in (i + 1)..n {
            s -= m[(i, j)] * x[j];
        }
        x[i] = s / m[(i, i)];
    }
    Ok(x)
}

/// Gauss-Jordan elimination: the augmented matrix is reduced all the way to
/// the identity, the solution is read off the last column. Same naive
/// no-exchange pivoting as `gaussian_elimination`.
pub fn gauss_jordan(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, LinearSolveError> {
    check_system(a, b);
    let n = a.nrows();
    let mut aug = DMatrix::zeros(n, n + 1);
    for i in 0..n {
        for j in 0..n {
            aug[(i, j)] = a[(i, j)];
        }
        aug[(i, n)] = b[i];
    }

    for k in 0..n {
        let pivot = aug[(k, k)];
        if pivot.abs() < PIVOT_EPS {
            error!("gauss-jordan: near-zero pivot {} in row {}", pivot, k);
            return Err(LinearSolveError::NearZeroPivot { row: k, pivot });
        }
        for j in 0..=n {
            aug[(k, j)] /= pivot;
        }
        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = aug[(i, k)];
            for j in 0..=n {
                aug[(i, j)] -= factor * aug[(k, j)];
            }
        }
    }

    Ok(DVector::from_iterator(n, (0..n).map(|i| aug[(i, n)])))
}

/// Doolittle LU factorization, L with unit diagonal, A = L * U.
pub fn lu_decompose(
    a: &DMatrix<f64>,
) -> Result<(DMatrix<f64>, DMatrix<f64>), LinearSolveError> {
    assert!(a.nrows() > 0, "System should have at least one equation.");
    assert_eq!(a.nrows(), a.ncols(), "Matrix should be square.");
    let n = a.nrows();
    let mut l: DMatrix<f64> = DMatrix::zeros(n, n);
    let mut u: DMatrix<f64> = DMatrix::zeros(n, n);

    for i in 0..n {
        for j in i..n {
            let mut s = 0.0;
            for k in 0..i {
                s += l[(i, k)] * u[(k, j)];
            }
            u[(i, j)] = a[(i, j)] - s;
        }
        let pivot = u[(i, i)];
        if pivot.abs() < PIVOT_EPS {
            return Err(LinearSolveError::NearZeroPivot { row: i, pivot });
        }
        l[(i, i)] = 1.0;
        for j in (i + 1)..n {
            let mut s = 0.0;
            for k in 0..i {
                s += l[(j, k)] * u[(k, i)];
            }
            l[(j, i)] = (a[(j, i)] - s) / pivot;
        }
    }
    Ok((l, u))
}

/// Solves A x = b through the LU route: L y = b forward, U x = y backward.
pub fn lu_solve(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, LinearSolveError> {
    check_system(a, b);
    let n = a.nrows();
    let (l, u) = lu_decompose(a)?;

    let mut y = DVector::zeros(n);
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= l[(i, k)] * y[k];
        }
        y[i] = s; // l[(i, i)] == 1
    }

    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut s = y[i];
        for k in (i + 1)..n {
            s -= u[(i, k)] * x[k];
        }
        x[i] = s / u[(i, i)];
    }
    Ok(x)
}

/// Cholesky factorization A = L * L^T for symmetric positive definite
/// matrices. Symmetry is compared entrywise and exactly; classroom inputs
/// are literal matrices, not computed ones.
pub fn cholesky_decompose(a: &DMatrix<f64>) -> Result<DMatrix<f64>, LinearSolveError> {
    assert!(a.nrows() > 0, "System should have at least one equation.");
    assert_eq!(a.nrows(), a.ncols(), "Matrix should be square.");
    let n = a.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            if a[(i, j)] != a[(j, i)] {
                return Err(LinearSolveError::NotSymmetric { row: i, col: j });
            }
        }
    }

    let mut l: DMatrix<f64> = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..=i {
            let mut s = 0.0;
            for k in 0..j {
                s += l[(i, k)] * l[(j, k)];
            }
            if i == j {
                let d = a[(i, i)] - s;
                if d <= 0.0 {
                    return Err(LinearSolveError::NotPositiveDefinite { row: i, radicand: d });
                }
                l[(i, i)] = d.sqrt();
            } else {
                l[(i, j)] = (a[(i, j)] - s) / l[(j, j)];
            }
        }
    }
    Ok(l)
}

/// Solves A x = b for symmetric positive definite A through L L^T.
pub fn cholesky_solve(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, LinearSolveError> {
    check_system(a, b);
    let n = a.nrows();
    let l = cholesky_decompose(a)?;

    let mut y = DVector::zeros(n);
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= l[(i, k)] * y[k];
        }
        y[i] = s / l[(i, i)];
    }

    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut s = y[i];
        for k in (i + 1)..n {
            s -= l[(k, i)] * x[k];
        }
        x[i] = s / l[(i, i)];
    }
    Ok(x)
}

/// Determinant by cofactor expansion along the first row. Exponential in n,
/// which is fine for the small classroom matrices Cramer's rule is meant for.
pub fn determinant(a: &DMatrix<f64>) -> f64 {
    assert!(a.nrows() > 0, "System should have at least one equation.");
    assert_eq!(a.nrows(), a.ncols(), "Matrix should be square.");
    let n = a.nrows();
    if n == 1 {
        return a[(0, 0)];
    }
    if n == 2 {
        return a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)];
    }
    let mut det = 0.0;
    for j in 0..n {
        let mut minor = DMatrix::zeros(n - 1, n - 1);
        for i in 1..n {
            let mut col = 0;
            for k in 0..n {
                if k == j {
                    continue;
                }
                minor[(i - 1, col)] = a[(i, k)];
                col += 1;
            }
        }
        let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
        det += sign * a[(0, j)] * determinant(&minor);
    }
    det
}

/// Cramer's rule: x_j = det(A_j) / det(A), where A_j is A with column j
/// replaced by b. Solves one determinant per unknown plus one for A itself.
pub fn cramer(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, LinearSolveError> {
    check_system(a, b);
    let n = a.nrows();
    let det = determinant(a);
    if det.abs() < PIVOT_EPS {
        error!("cramer: matrix is singular, determinant = {}", det);
        return Err(LinearSolveError::SingularMatrix { determinant: det });
    }
    let mut x = DVector::zeros(n);
    for j in 0..n {
        let mut replaced = a.clone();
        for i in 0..n {
            replaced[(i, j)] = b[i];
        }
        x[j] = determinant(&replaced) / det;
    }
    Ok(x)
}

/// Inverts A by running Gauss-Jordan on the doubled system [A | I]. The same
/// no-exchange pivot rule applies, so matrices needing a row swap are
/// rejected even when invertible.
pub fn invert_matrix(a: &DMatrix<f64>) -> Result<DMatrix<f64>, LinearSolveError> {
    assert!(a.nrows() > 0, "System should have at least one equation.");
    assert_eq!(a.nrows(), a.ncols(), "Matrix should be square.");
    let n = a.nrows();
    let mut aug = DMatrix::zeros(n, 2 * n);
    for i in 0..n {
        for j in 0..n {
            aug[(i, j)] = a[(i, j)];
        }
        aug[(i, n + i)] = 1.0;
    }

    for k in 0..n {
        let pivot = aug[(k, k)];
        if pivot.abs() < PIVOT_EPS {
            error!("matrix inversion: near-zero pivot {} in row {}", pivot, k);
            return Err(LinearSolveError::NearZeroPivot { row: k, pivot });
        }
        for j in 0..2 * n {
            aug[(k, j)] /= pivot;
        }
        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = aug[(i, k)];
            for j in 0..2 * n {
                aug[(i, j)] -= factor * aug[(k, j)];
            }
        }
    }

    let mut inv = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            inv[(i, j)] = aug[(i, n + j)];
        }
    }
    Ok(inv)
}

/// Solves A x = b as x = A^{-1} b. Wasteful next to elimination but kept for
/// comparison against the cheaper routes.
pub fn solve_via_inverse(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, LinearSolveError> {
    check_system(a, b);
    let inv = invert_matrix(a)?;
    Ok(&inv * b)
}

/// Uniform dispatcher over the six direct solvers.
pub fn solve_direct(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    method: DirectMethod,
) -> Result<DVector<f64>, LinearSolveError> {
    match method {
        DirectMethod::GaussianElimination => gaussian_elimination(a, b),
        DirectMethod::GaussJordan => gauss_jordan(a, b),
        DirectMethod::Lu => lu_solve(a, b),
        DirectMethod::Cholesky => cholesky_solve(a, b),
        DirectMethod::Cramer => cramer(a, b),
        DirectMethod::Inversion => solve_via_inverse(a, b),
    }
}

/// Euclidean norm of the residual b - A x, handy for demos and sanity checks.
pub fn residual_norm(a: &DMatrix<f64>, b: &DVector<f64>, x: &DVector<f64>) -> f64 {
    (b - a * x).norm()
}
