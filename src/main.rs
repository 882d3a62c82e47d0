#![allow(non_snake_case)]
pub mod Examples_and_utils;
pub mod Utils;
pub mod calculus;
pub mod interpolate;
pub mod linsys;
pub mod regression;
pub mod roots;
pub mod symbolic;

use crate::Examples_and_utils::{ClassicProblem, ClassicSystem};
use crate::Utils::logger::{init_console_logging, save_history_to_csv};
use crate::Utils::reports::{
    linsys_history_table, quadrature_table, root_history_rows, root_history_table,
    solution_summary,
};
use crate::calculus::finite_difference::{
    Accuracy, DerivativeOrder, DiffDirection, Stencil, differentiate,
};
use crate::calculus::quadrature::{simpson_one_third, trapezoidal};
use crate::calculus::taylor::taylor_series;
use crate::interpolate::lagrange::lagrange_detailed;
use crate::interpolate::newton_difference::{
    difference_table, gauss_central, newton_backward, newton_divided, newton_forward,
};
use crate::interpolate::splines::{cubic_spline, linear_spline, quadratic_spline};
use crate::linsys::direct_solvers::{DirectMethod, residual_norm, solve_direct};
use crate::linsys::iterative_solvers::{conjugate_gradient, gauss_seidel, jacobi};
use crate::regression::linear_fit::fit_linear;
use crate::regression::nonlinear_fit::fit_exponential;
use crate::regression::poly_fit::fit_polynomial;
use crate::roots::scalar_root_solvers::{RootMethod, RootSeed, solve_with_method};
use crate::symbolic::symbolic_engine::Expr;
use nalgebra::{DMatrix, DVector};
use simplelog::LevelFilter;
use strum::IntoEnumIterator;

fn main() {
    init_console_logging(LevelFilter::Info);
    let example = 0;
    match example {
        0 => {
            // ROOT FINDING
            // the whole gallery of classroom problems, every method that applies
            for problem in ClassicProblem::iter() {
                println!("\n f(x) = {}, root near {}", problem, problem.reference_root());
                let (a, b) = problem.bracket();
                let f = problem.f();
                let runs = [
                    (RootMethod::Bisection, RootSeed::Bracket { a, b }),
                    (RootMethod::FalsePosition, RootSeed::Bracket { a, b }),
                    (RootMethod::NewtonRaphson, RootSeed::Seed { x0: b }),
                    (RootMethod::Secant, RootSeed::Pair { x0: a, x1: b }),
                ];
                for (method, seed) in runs {
                    match solve_with_method(&f, method, seed, 1e-8, 100) {
                        Ok(res) => println!(
                            "  {:<15} root = {:.10}, f(root) = {:+.3e}, {} iterations, converged = {}",
                            method.to_string(),
                            res.root,
                            res.function_value,
                            res.iterations,
                            res.converged
                        ),
                        Err(e) => println!("  {:<15} failed: {}", method.to_string(), e),
                    }
                }
            }
            // full iteration history of one run, the way a worksheet would print it
            let res = solve_with_method(
                |x: f64| x * x * x - x - 2.0,
                RootMethod::Bisection,
                RootSeed::Bracket { a: 1.0, b: 2.0 },
                1e-6,
                60,
            )
            .unwrap();
            println!("\n{}", root_history_table(&res));
            // the same table lands in a csv next to the binary
            let (headers, rows) = root_history_rows(&res);
            save_history_to_csv(&headers, &rows, "bisection_history.csv").unwrap();
            println!("history saved to bisection_history.csv");
        }
        1 => {
            // DIRECT LINEAR SOLVERS
            // six routes to the same answer; elimination is deliberately naive,
            // a system that needs a row swap is rejected instead of silently botched
            let system = ClassicSystem::TextbookTwoByTwo;
            let (a, b) = (system.matrix(), system.rhs());
            println!("solving {}: A = {} b = {}", system, a, b);
            for method in [
                DirectMethod::GaussianElimination,
                DirectMethod::GaussJordan,
                DirectMethod::Lu,
                DirectMethod::Cholesky,
                DirectMethod::Cramer,
                DirectMethod::Inversion,
            ] {
                match solve_direct(&a, &b, method) {
                    Ok(x) => println!(
                        "  {:<22} {}  residual = {:.3e}",
                        method.to_string(),
                        solution_summary(&x),
                        residual_norm(&a, &b, &x)
                    ),
                    Err(e) => println!("  {:<22} failed: {}", method.to_string(), e),
                }
            }
            // cholesky refuses an indefinite matrix mid-factorization
            let indefinite = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
            let rhs = DVector::from_vec(vec![1.0, 1.0]);
            match solve_direct(&indefinite, &rhs, DirectMethod::Cholesky) {
                Ok(_) => unreachable!(),
                Err(e) => println!("\n indefinite matrix: {}", e),
            }
        }
        2 => {
            // ITERATIVE LINEAR SOLVERS
            let system = ClassicSystem::DominantThreeByThree;
            let (a, b) = (system.matrix(), system.rhs());
            let x0 = DVector::zeros(3);
            let jac = jacobi(&a, &b, &x0, 1e-10, 100).unwrap();
            let gs = gauss_seidel(&a, &b, &x0, 1e-10, 100).unwrap();
            println!(
                "jacobi: {} sweeps, gauss-seidel: {} sweeps to the same tolerance",
                jac.iterations, gs.iterations
            );
            println!("\n gauss-seidel history:\n{}", linsys_history_table(&gs));
            // conjugate gradient on an SPD system, residual norms in the error column
            let spd = ClassicSystem::SpdTwoByTwo;
            let cg = conjugate_gradient(&spd.matrix(), &spd.rhs(), 1e-12, 50).unwrap();
            println!(
                " conjugate gradient on {}: {} after {} iterations",
                spd,
                solution_summary(&cg.x),
                cg.iterations
            );
        }
        3 => {
            // INTERPOLATION AND DIFFERENCE TABLES
            // y = x^2 + 1 tabulated on the unit grid
            let x = [0.0, 1.0, 2.0, 3.0];
            let y = [1.0, 2.0, 5.0, 10.0];
            println!("difference table of {:?}:", y);
            for (k, col) in difference_table(&y).iter().enumerate() {
                println!("  order {}: {:?}", k, col);
            }
            let target = 1.5;
            println!("newton forward  at {}: {}", target, newton_forward(&x, &y, target).unwrap());
            println!("newton backward at {}: {}", target, newton_backward(&x, &y, target).unwrap());
            println!("gauss central   at {}: {}", target, gauss_central(&x, &y, target).unwrap());
            // unequal spacing goes through divided differences
            let xu = [0.0, 0.5, 2.0, 3.5];
            let yu: Vec<f64> = xu.iter().map(|v| 2.0 * v * v - v + 1.0).collect();
            println!("newton divided at 1.0: {}", newton_divided(&xu, &yu, 1.0));
            // lagrange with the per-node contributions spelled out
            let (value, terms) = lagrange_detailed(&x[..3], &y[..3], target);
            println!("\n lagrange at {} = {}", target, value);
            for t in terms {
                println!(
                    "  node {}: L = {:+.6}, y = {}, contribution = {:+.6}",
                    t.index, t.basis_value, t.y, t.contribution
                );
            }
        }
        4 => {
            // SPLINES
            let x = [0.0, 1.0, 2.0, 4.0];
            let y = [1.0, 3.0, 2.0, 5.0];
            for spline in [linear_spline(&x, &y), quadratic_spline(&x, &y), cubic_spline(&x, &y)] {
                println!("\n {} spline:", spline.degree);
                for i in 0..spline.segments() {
                    let [a, b, c, d] = spline.segment_coefficients(i);
                    println!(
                        "  [{}, {}]: {:+.4} {:+.4} t {:+.4} t^2 {:+.4} t^3",
                        spline.knots()[i],
                        spline.knots()[i + 1],
                        a,
                        b,
                        c,
                        d
                    );
                }
                println!("  s(1.7) = {:.6}", spline.evaluate(1.7).unwrap());
                // no extrapolation: outside the knots the spline refuses
                println!("  s(9.0) -> {}", spline.evaluate(9.0).unwrap_err());
            }
        }
        5 => {
            // REGRESSION
            let x = [1.0, 2.0, 3.0, 4.0, 5.0];
            let y = [2.0, 3.0, 5.0, 4.0, 6.0];
            let line = fit_linear(&x, &y, Some(6.0)).unwrap();
            println!(
                "line: y = {:.4} + {:.4} x, R^2 = {:.4}, y(6) = {:.4}",
                line.coefficients[0],
                line.coefficients[1],
                line.r_squared,
                line.prediction.unwrap()
            );
            let xp = [-2.0, -1.0, 0.0, 1.0, 2.0];
            let yp: Vec<f64> = xp.iter().map(|v| v * v + 1.0).collect();
            let parab = fit_polynomial(&xp, &yp, 2, None).unwrap();
            println!(
                "parabola: coefficients = {:?}, R^2 = {:.4}",
                parab.coefficients.as_slice(),
                parab.r_squared
            );
            let xe = [0.0_f64, 1.0, 2.0, 3.0];
            let ye: Vec<f64> = xe.iter().map(|v| 3.0 * (0.5 * v).exp()).collect();
            let expo = fit_exponential(&xe, &ye, Some(4.0)).unwrap();
            println!(
                "exponential: y = {:.4} exp({:.4} x), y(4) = {:.4}",
                expo.coefficients[0],
                expo.coefficients[1],
                expo.prediction.unwrap()
            );
            // the documented trap: a negative y poisons the logarithms and the
            // fit comes back full of NaN instead of an error
            let bad = fit_exponential(&[0.0, 1.0, 2.0], &[2.0, -1.0, 3.0], None).unwrap();
            println!("negative data: a = {}, b = {}", bad.coefficients[0], bad.coefficients[1]);
        }
        6 => {
            // QUADRATURE
            let f = |x: f64| x * x + 1.0;
            let trap = trapezoidal(f, 0.0, 2.0, 4).unwrap();
            println!("trapezoid, 4 segments: {:.6}", trap.value);
            println!("{}", quadrature_table(&trap));
            let simp = simpson_one_third(f, 0.0, 2.0, 4).unwrap();
            // exact for this parabola: 14/3
            println!("simpson 1/3, 4 segments: {:.10} (exact {:.10})", simp.value, 14.0 / 3.0);
            match simpson_one_third(f, 0.0, 2.0, 5) {
                Ok(_) => unreachable!(),
                Err(e) => println!("simpson with 5 segments: {}", e),
            }
        }
        7 => {
            // FINITE DIFFERENCE DERIVATIVES
            // the full stencil menu on f = sin at x = 0.5
            let x: f64 = 0.5;
            let h = 1e-3;
            println!("f' exact = {:.12}, f'' exact = {:.12}", x.cos(), -x.sin());
            for direction in DiffDirection::iter() {
                for order in DerivativeOrder::iter() {
                    for accuracy in Accuracy::iter() {
                        let stencil = Stencil { direction, order, accuracy };
                        match differentiate(|t: f64| t.sin(), x, h, stencil) {
                            Ok(d) => println!("  {:<40} {:+.12}", stencil.to_string(), d),
                            Err(e) => println!("  {:<40} {}", stencil.to_string(), e),
                        }
                    }
                }
            }
        }
        8 => {
            // TAYLOR SERIES
            // expand exp(x) around 0 and follow the partial sums toward e
            let f = Expr::Var("x".to_string()).exp();
            let res = taylor_series(&f, "x", 0.0, 1.0, 10).unwrap();
            for t in &res.terms {
                println!(
                    "  order {:>2}: term = {:+.3e}, partial sum = {:.12}",
                    t.order, t.term, t.partial_sum
                );
            }
            println!("10 terms give {:.12}, e = {:.12}", res.value, std::f64::consts::E);
            // a polynomial is its own taylor expansion, the tail is exactly zero
            let cubic = ClassicProblem::Cubic.expr();
            let exact = taylor_series(&cubic, "x", 1.0, 2.5, 4).unwrap();
            println!("cubic at 2.5 rebuilt from x0 = 1: {}", exact.value);
        }
        _ => {
            println!("there is no example with number {}", example);
        }
    }
}
