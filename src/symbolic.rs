/// # Symbolic engine
/// a module that
/// 1) builds symbolic expressions from operators and helper constructors
/// 2) differentiates them analytically with `diff`
/// 3) turns them into Rust closures with `lambdify1D`
/// 4) renders them as strings for printing and control of results
///
/// There is no string parser here: expressions are assembled in code.
///# Example#
/// ```
/// use RustedNumLab::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// // f = x^3 - x - 2, the classic cubic
/// let f = x.clone().pow(Expr::Const(3.0)) - x.clone() - Expr::Const(2.0);
/// println!("f = {}", f);
/// // differentiate, simplify, then evaluate both at a point
/// let df = f.diff("x").simplify();
/// let f_fn = f.lambdify1D();
/// let df_fn = df.lambdify1D();
/// assert!((f_fn(1.5213797) - 0.0).abs() < 1e-5);
/// assert!((df_fn(2.0) - 11.0).abs() < 1e-12);
/// // pretty print for logs
/// println!("df/dx = {}", df.sym_to_str("x"));
/// ```
pub mod symbolic_engine;
