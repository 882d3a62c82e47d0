use crate::calculus::finite_difference::CalculusError;
use crate::symbolic::symbolic_engine::Expr;
use log::debug;

/// One row of a Taylor expansion: the i-th derivative at the center, the
/// finished term f^(i)(x0) (x-x0)^i / i!, and the running sum through it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorTerm {
    pub order: usize,
    pub derivative_at_center: f64,
    pub term: f64,
    pub partial_sum: f64,
}

/// Value of a truncated Taylor series together with its term table.
#[derive(Debug, Clone)]
pub struct TaylorResult {
    pub value: f64,
    pub center: f64,
    pub terms: Vec<TaylorTerm>,
}

/// Evaluates the Taylor polynomial of `expr` around `x0` at `x`, keeping
/// `terms` terms (orders 0 through terms-1). Each derivative is taken
/// symbolically with `diff` and simplified before the next pass, then
/// evaluated at the center through `lambdify1D`; a non-finite derivative
/// value there (a pole, a log of a non-positive center) is a soft error.
pub fn taylor_series(
    expr: &Expr,
    var: &str,
    x0: f64,
    x: f64,
    terms: usize,
) -> Result<TaylorResult, CalculusError> {
    assert!(
        x0.is_finite() && x.is_finite(),
        "Expansion points should be finite numbers."
    );
    assert!(terms > 0, "At least one term is required.");

    let mut current = expr.clone();
    let mut factorial = 1.0;
    let mut value = 0.0;
    let mut rows = Vec::with_capacity(terms);
    for order in 0..terms {
        if order > 0 {
            current = current.diff(var).simplify();
            factorial *= order as f64;
        }
        let derivative_at_center = current.lambdify1D()(x0);
        if !derivative_at_center.is_finite() {
            return Err(CalculusError::NonFiniteValue { x: x0 });
        }
        let term = derivative_at_center * (x - x0).powi(order as i32) / factorial;
        value += term;
        debug!(
            "taylor order = {}, f^({})({}) = {}, term = {}",
            order, order, x0, derivative_at_center, term
        );
        rows.push(TaylorTerm {
            order,
            derivative_at_center,
            term,
            partial_sum: value,
        });
    }
    Ok(TaylorResult {
        value,
        center: x0,
        terms: rows,
    })
}
