/// Finite-difference differentiation from a fixed menu of literal stencils:
/// forward/backward at O(h) and O(h^2), central at O(h^2) and O(h^4), first
/// and second derivatives. Combinations outside the menu come back as
/// `Err(UnsupportedStencil)`, a non-positive step as `Err(NonPositiveStep)`.
/// ```
/// use RustedNumLab::calculus::finite_difference::{
///     differentiate, Accuracy, DerivativeOrder, DiffDirection, Stencil,
/// };
/// let stencil = Stencil {
///     direction: DiffDirection::Central,
///     order: DerivativeOrder::First,
///     accuracy: Accuracy::Oh4,
/// };
/// let d = differentiate(|x: f64| x.sin(), 0.5, 1e-3, stencil).unwrap();
/// assert!((d - 0.5_f64.cos()).abs() < 1e-10);
/// ```
pub mod finite_difference;
/// Newton-Cotes quadrature: trapezoidal, Simpson 1/3 and Simpson 3/8, single
/// and composite, each returning the integral together with the full node
/// table (x, f(x), weight). Segment-count misfits are soft errors.
/// ```
/// use RustedNumLab::calculus::quadrature::trapezoidal;
/// let res = trapezoidal(|x| x * x + 1.0, 0.0, 2.0, 4).unwrap();
/// assert!((res.value - 4.75).abs() < 1e-12);
/// ```
pub mod quadrature;
/// Taylor expansion of a symbolic expression: derivatives are taken with
/// `Expr::diff`, evaluated at the center through `lambdify1D`, and the term
/// table records every order alongside its partial sum.
/// ```
/// use RustedNumLab::calculus::taylor::taylor_series;
/// use RustedNumLab::symbolic::symbolic_engine::Expr;
/// let f = Expr::Var("x".to_string()).exp();
/// let res = taylor_series(&f, "x", 0.0, 1.0, 12).unwrap();
/// assert!((res.value - std::f64::consts::E).abs() < 1e-7);
/// ```
pub mod taylor;
