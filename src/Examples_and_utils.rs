//! Canonical classroom problems with known answers, used across tests,
//! benches and the demo binary, plus random well-behaved system generators
//! for solver-agreement checks.
use crate::symbolic::symbolic_engine::Expr;
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use std::fmt;
use strum_macros::EnumIter;

/// Classic scalar root-finding problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ClassicProblem {
    /// x^3 - x - 2, one real root near 1.5213797
    Cubic,
    /// cos(x) - x, the Dottie equation
    CosineCrossing,
    /// exp(-x) - x, root at the omega constant
    ExpDecay,
}

impl fmt::Display for ClassicProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassicProblem::Cubic => write!(f, "x^3 - x - 2"),
            ClassicProblem::CosineCrossing => write!(f, "cos(x) - x"),
            ClassicProblem::ExpDecay => write!(f, "exp(-x) - x"),
        }
    }
}

impl ClassicProblem {
    /// The problem as a plain closure for the numeric solvers.
    pub fn f(&self) -> Box<dyn Fn(f64) -> f64> {
        match self {
            ClassicProblem::Cubic => Box::new(|x: f64| x * x * x - x - 2.0),
            ClassicProblem::CosineCrossing => Box::new(|x: f64| x.cos() - x),
            ClassicProblem::ExpDecay => Box::new(|x: f64| (-x).exp() - x),
        }
    }

    /// The same problem as a symbolic expression in `x`.
    pub fn expr(&self) -> Expr {
        let x = Expr::Var("x".to_string());
        match self {
            ClassicProblem::Cubic => {
                x.clone().pow(Expr::Const(3.0)) - x - Expr::Const(2.0)
            }
            ClassicProblem::CosineCrossing => Expr::cos(x.clone().boxed()) - x,
            ClassicProblem::ExpDecay => (-x.clone()).exp() - x,
        }
    }

    /// A bracket with a sign change, ready for bisection or false position.
    pub fn bracket(&self) -> (f64, f64) {
        match self {
            ClassicProblem::Cubic => (1.0, 2.0),
            ClassicProblem::CosineCrossing => (0.0, 1.0),
            ClassicProblem::ExpDecay => (0.0, 1.0),
        }
    }

    pub fn reference_root(&self) -> f64 {
        match self {
            ClassicProblem::Cubic => 1.5213797068045676,
            ClassicProblem::CosineCrossing => 0.7390851332151607,
            ClassicProblem::ExpDecay => 0.5671432904097838,
        }
    }
}

/// Small linear systems with known exact solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ClassicSystem {
    /// [[4,1],[1,3]] x = [1,2], symmetric positive definite
    SpdTwoByTwo,
    /// [[2,1],[1,3]] x = [3,5], the textbook elimination example
    TextbookTwoByTwo,
    /// [[10,1,1],[1,10,1],[1,1,10]] x = [15,24,33], strictly diagonally dominant
    DominantThreeByThree,
}

impl fmt::Display for ClassicSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassicSystem::SpdTwoByTwo => write!(f, "2x2 SPD system"),
            ClassicSystem::TextbookTwoByTwo => write!(f, "2x2 textbook system"),
            ClassicSystem::DominantThreeByThree => {
                write!(f, "3x3 diagonally dominant system")
            }
        }
    }
}

impl ClassicSystem {
    pub fn matrix(&self) -> DMatrix<f64> {
        match self {
            ClassicSystem::SpdTwoByTwo => {
                DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0])
            }
            ClassicSystem::TextbookTwoByTwo => {
                DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0])
            }
            ClassicSystem::DominantThreeByThree => DMatrix::from_row_slice(
                3,
                3,
                &[10.0, 1.0, 1.0, 1.0, 10.0, 1.0, 1.0, 1.0, 10.0],
            ),
        }
    }

    pub fn rhs(&self) -> DVector<f64> {
        match self {
            ClassicSystem::SpdTwoByTwo => DVector::from_row_slice(&[1.0, 2.0]),
            ClassicSystem::TextbookTwoByTwo => DVector::from_row_slice(&[3.0, 5.0]),
            ClassicSystem::DominantThreeByThree => {
                DVector::from_row_slice(&[15.0, 24.0, 33.0])
            }
        }
    }

    pub fn reference_solution(&self) -> DVector<f64> {
        match self {
            ClassicSystem::SpdTwoByTwo => {
                DVector::from_row_slice(&[1.0 / 11.0, 7.0 / 11.0])
            }
            ClassicSystem::TextbookTwoByTwo => DVector::from_row_slice(&[0.8, 1.4]),
            ClassicSystem::DominantThreeByThree => {
                DVector::from_row_slice(&[1.0, 2.0, 3.0])
            }
        }
    }
}

/// Random strictly diagonally dominant system built from a known solution,
/// returned as (A, b, x_true). Every generated matrix converges under both
/// Jacobi and Gauss-Seidel; entries and solution are kept positive so the
/// relative sweep metric never sees a sign flip mid-run.
pub fn random_diagonally_dominant_system(
    n: usize,
) -> (DMatrix<f64>, DVector<f64>, DVector<f64>) {
    assert!(n > 0, "System size should be positive.");
    let mut rng = rand::rng();
    let mut a = DMatrix::from_fn(n, n, |_, _| rng.random_range(0.0..0.1_f64));
    for i in 0..n {
        let off_diagonal: f64 = (0..n)
            .filter(|&j| j != i)
            .map(|j| a[(i, j)].abs())
            .sum();
        a[(i, i)] = off_diagonal + rng.random_range(1.0..2.0);
    }
    let x_true = DVector::from_fn(n, |_, _| rng.random_range(1.0..5.0));
    let b = &a * &x_true;
    (a, b, x_true)
}

/// Random SPD system A = M^T M + n*I built from a known solution,
/// returned as (A, b, x_true).
pub fn random_spd_system(n: usize) -> (DMatrix<f64>, DVector<f64>, DVector<f64>) {
    assert!(n > 0, "System size should be positive.");
    let mut rng = rand::rng();
    let m = DMatrix::from_fn(n, n, |_, _| rng.random_range(-1.0..1.0));
    let a = m.transpose() * &m + DMatrix::identity(n, n) * (n as f64);
    let x_true = DVector::from_fn(n, |_, _| rng.random_range(-5.0..5.0));
    let b = &a * &x_true;
    (a, b, x_true)
}
