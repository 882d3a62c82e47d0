use crate::interpolate::newton_difference::{
    InterpolationError, assert_nodes, difference_table, uniform_step,
};
use std::fmt;
use strum_macros::EnumIter;

/// Error types for the calculus family.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculusError {
    /// the function returned NaN or an infinity at a sample point
    NonFiniteValue { x: f64 },
    /// the differentiation step must be positive and finite
    NonPositiveStep { h: f64 },
    /// the requested direction/order/accuracy combination has no formula
    UnsupportedStencil { stencil: Stencil },
    /// composite Simpson 1/3 pairs segments, the count must be even
    OddIntervalCount { n: usize },
    /// composite Simpson 3/8 groups segments in threes
    IntervalCountNotDivisibleByThree { n: usize },
    /// tabulated differentiation needs an equally spaced grid
    UnevenGrid { index: usize },
}

impl fmt::Display for CalculusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalculusError::NonFiniteValue { x } => {
                write!(f, "function value is not finite at x = {}", x)
            }
            CalculusError::NonPositiveStep { h } => {
                write!(f, "step size must be positive, got {}", h)
            }
            CalculusError::UnsupportedStencil { stencil } => {
                write!(f, "no finite-difference formula for {}", stencil)
            }
            CalculusError::OddIntervalCount { n } => {
                write!(f, "simpson 1/3 needs an even segment count, got {}", n)
            }
            CalculusError::IntervalCountNotDivisibleByThree { n } => {
                write!(
                    f,
                    "simpson 3/8 needs a segment count divisible by three, got {}",
                    n
                )
            }
            CalculusError::UnevenGrid { index } => {
                write!(f, "grid is not equally spaced at node {}", index)
            }
        }
    }
}

impl std::error::Error for CalculusError {}

/// Enum to represent where the stencil takes its samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum DiffDirection {
    Forward,
    Backward,
    Central,
}

impl fmt::Display for DiffDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiffDirection::Forward => write!(f, "forward"),
            DiffDirection::Backward => write!(f, "backward"),
            DiffDirection::Central => write!(f, "central"),
        }
    }
}

/// Enum to represent the derivative order of a stencil
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum DerivativeOrder {
    First,
    Second,
}

impl fmt::Display for DerivativeOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DerivativeOrder::First => write!(f, "first"),
            DerivativeOrder::Second => write!(f, "second"),
        }
    }
}

/// Enum to represent the truncation order of a stencil
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Accuracy {
    Oh,
    Oh2,
    Oh4,
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Accuracy::Oh => write!(f, "O(h)"),
            Accuracy::Oh2 => write!(f, "O(h^2)"),
            Accuracy::Oh4 => write!(f, "O(h^4)"),
        }
    }
}

/// One entry of the fixed stencil menu consumed by `differentiate`.
/// One-sided stencils exist at O(h) and O(h^2), central ones at O(h^2) and
/// O(h^4); asking for anything else is an `UnsupportedStencil` error rather
/// than a silently wrong formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stencil {
    pub direction: DiffDirection,
    pub order: DerivativeOrder,
    pub accuracy: Accuracy,
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} derivative at {}",
            self.direction, self.order, self.accuracy
        )
    }
}

fn sample<F>(f: &F, x: f64) -> Result<f64, CalculusError>
where
    F: Fn(f64) -> f64,
{
    let fx = f(x);
    if !fx.is_finite() {
        return Err(CalculusError::NonFiniteValue { x });
    }
    Ok(fx)
}

/// Derivative of f at x by the chosen fixed-coefficient stencil. The
/// formulas are written out literally rather than generated, one line per
/// menu entry.
pub fn differentiate<F>(f: F, x: f64, h: f64, stencil: Stencil) -> Result<f64, CalculusError>
where
    F: Fn(f64) -> f64,
{
    assert!(x.is_finite(), "Evaluation point should be a finite number.");
    if !(h > 0.0) || !h.is_finite() {
        return Err(CalculusError::NonPositiveStep { h });
    }
    use Accuracy::*;
    use DerivativeOrder::*;
    use DiffDirection::*;
    let value = match (stencil.direction, stencil.order, stencil.accuracy) {
        (Forward, First, Oh) => (sample(&f, x + h)? - sample(&f, x)?) / h,
        (Forward, First, Oh2) => {
            (-3.0 * sample(&f, x)? + 4.0 * sample(&f, x + h)? - sample(&f, x + 2.0 * h)?)
                / (2.0 * h)
        }
        (Backward, First, Oh) => (sample(&f, x)? - sample(&f, x - h)?) / h,
        (Backward, First, Oh2) => {
            (3.0 * sample(&f, x)? - 4.0 * sample(&f, x - h)? + sample(&f, x - 2.0 * h)?)
                / (2.0 * h)
        }
        (Central, First, Oh2) => (sample(&f, x + h)? - sample(&f, x - h)?) / (2.0 * h),
        (Central, First, Oh4) => {
            (-sample(&f, x + 2.0 * h)? + 8.0 * sample(&f, x + h)? - 8.0 * sample(&f, x - h)?
                + sample(&f, x - 2.0 * h)?)
                / (12.0 * h)
        }
        (Forward, Second, Oh) => {
            (sample(&f, x + 2.0 * h)? - 2.0 * sample(&f, x + h)? + sample(&f, x)?) / (h * h)
        }
        (Forward, Second, Oh2) => {
            (-sample(&f, x + 3.0 * h)? + 4.0 * sample(&f, x + 2.0 * h)?
                - 5.0 * sample(&f, x + h)?
                + 2.0 * sample(&f, x)?)
                / (h * h)
        }
        (Backward, Second, Oh) => {
            (sample(&f, x)? - 2.0 * sample(&f, x - h)? + sample(&f, x - 2.0 * h)?) / (h * h)
        }
        (Backward, Second, Oh2) => {
            (2.0 * sample(&f, x)? - 5.0 * sample(&f, x - h)? + 4.0 * sample(&f, x - 2.0 * h)?
                - sample(&f, x - 3.0 * h)?)
                / (h * h)
        }
        (Central, Second, Oh2) => {
            (sample(&f, x + h)? - 2.0 * sample(&f, x)? + sample(&f, x - h)?) / (h * h)
        }
        (Central, Second, Oh4) => {
            (-sample(&f, x + 2.0 * h)? + 16.0 * sample(&f, x + h)? - 30.0 * sample(&f, x)?
                + 16.0 * sample(&f, x - h)?
                - sample(&f, x - 2.0 * h)?)
                / (12.0 * h * h)
        }
        _ => return Err(CalculusError::UnsupportedStencil { stencil }),
    };
    Ok(value)
}

/// First derivative at the textbook defaults: one-sided stencils at O(h),
/// the central one at O(h^2).
pub fn first_derivative<F>(
    f: F,
    x: f64,
    h: f64,
    direction: DiffDirection,
) -> Result<f64, CalculusError>
where
    F: Fn(f64) -> f64,
{
    let accuracy = match direction {
        DiffDirection::Central => Accuracy::Oh2,
        _ => Accuracy::Oh,
    };
    differentiate(
        f,
        x,
        h,
        Stencil {
            direction,
            order: DerivativeOrder::First,
            accuracy,
        },
    )
}

/// Second derivative by the three-point central stencil
/// (f(x+h) - 2 f(x) + f(x-h)) / h^2.
pub fn second_derivative<F>(f: F, x: f64, h: f64) -> Result<f64, CalculusError>
where
    F: Fn(f64) -> f64,
{
    differentiate(
        f,
        x,
        h,
        Stencil {
            direction: DiffDirection::Central,
            order: DerivativeOrder::Second,
            accuracy: Accuracy::Oh2,
        },
    )
}

/// First derivative of tabulated, equally spaced data at node `at_index`,
/// from the Newton-Gregory forward expansion differentiated at its anchor:
/// f'(x_i) = (dy_i - d2y_i/2 + d3y_i/3 - ...) / h, using every difference
/// the table still holds to the right of the node. The last node has no
/// forward differences, so the backward expansion is differentiated there
/// instead: f'(x_n) = (dy_{n-1} + d2y_{n-2}/2 + d3y_{n-3}/3 + ...) / h.
pub fn tabulated_first_derivative(
    x: &[f64],
    y: &[f64],
    at_index: usize,
) -> Result<f64, CalculusError> {
    assert_nodes(x, y);
    assert!(at_index < x.len(), "Node index is out of range.");
    let h = uniform_step(x).map_err(|e| match e {
        InterpolationError::UnevenSpacing { index } => CalculusError::UnevenGrid { index },
        // uniform_step only ever reports uneven spacing
        _ => unreachable!(),
    })?;
    let table = difference_table(y);
    let mut acc = 0.0;
    if at_index == x.len() - 1 {
        // backward differences anchored at the last node, all signs positive
        for k in 1..x.len() {
            acc += table[k][at_index - k] / k as f64;
        }
    } else {
        let mut sign = 1.0;
        for k in 1..x.len() - at_index {
            acc += sign * table[k][at_index] / k as f64;
            sign = -sign;
        }
    }
    Ok(acc / h)
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_central_first_derivative_of_sine() {
        let d = first_derivative(|x: f64| x.sin(), 0.5, 1e-5, DiffDirection::Central).unwrap();
        assert_relative_eq!(d, 0.5_f64.cos(), epsilon = 1e-8);
    }

    #[test]
    fn test_one_sided_stencils_are_first_order() {
        let exact = 0.5_f64.cos();
        let h = 1e-3;
        let fwd = first_derivative(|x: f64| x.sin(), 0.5, h, DiffDirection::Forward).unwrap();
        let bwd = first_derivative(|x: f64| x.sin(), 0.5, h, DiffDirection::Backward).unwrap();
        let ctr = first_derivative(|x: f64| x.sin(), 0.5, h, DiffDirection::Central).unwrap();
        assert!((fwd - exact).abs() < 1e-3);
        assert!((bwd - exact).abs() < 1e-3);
        // the central stencil wins by an order of h on the same step
        assert!((ctr - exact).abs() < (fwd - exact).abs() / 100.0);
    }

    #[test]
    fn test_central_stencil_is_exact_for_parabolas() {
        // the h^2 truncation term vanishes, even a coarse step is exact
        let d = first_derivative(|x| x * x + 1.0, 1.5, 0.5, DiffDirection::Central).unwrap();
        assert_relative_eq!(d, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_second_derivative_of_sine() {
        let d = second_derivative(|x: f64| x.sin(), 0.5, 1e-4).unwrap();
        assert_relative_eq!(d, -(0.5_f64.sin()), epsilon = 1e-6);
    }

    #[test]
    fn test_whole_stencil_menu_on_sine() {
        let h = 1e-3;
        let x = 0.5;
        for direction in DiffDirection::iter() {
            for order in DerivativeOrder::iter() {
                for accuracy in Accuracy::iter() {
                    let stencil = Stencil {
                        direction,
                        order,
                        accuracy,
                    };
                    let supported = !matches!(
                        (direction, accuracy),
                        (DiffDirection::Central, Accuracy::Oh)
                            | (DiffDirection::Forward, Accuracy::Oh4)
                            | (DiffDirection::Backward, Accuracy::Oh4)
                    );
                    let result = differentiate(|t: f64| t.sin(), x, h, stencil);
                    if !supported {
                        assert_eq!(
                            result.unwrap_err(),
                            CalculusError::UnsupportedStencil { stencil }
                        );
                        continue;
                    }
                    let exact = match order {
                        DerivativeOrder::First => x.cos(),
                        DerivativeOrder::Second => -x.sin(),
                    };
                    let tol = match accuracy {
                        Accuracy::Oh => 5e-3,
                        Accuracy::Oh2 => 1e-5,
                        Accuracy::Oh4 => 1e-8,
                    };
                    let got = result.unwrap();
                    assert!(
                        (got - exact).abs() < tol,
                        "{}: got {}, exact {}",
                        stencil,
                        got,
                        exact
                    );
                }
            }
        }
    }

    #[test]
    fn test_five_point_first_derivative_is_exact_for_cubics() {
        let stencil = Stencil {
            direction: DiffDirection::Central,
            order: DerivativeOrder::First,
            accuracy: Accuracy::Oh4,
        };
        let d = differentiate(|x| x * x * x - x - 2.0, 1.2, 0.25, stencil).unwrap();
        assert_relative_eq!(d, 3.0 * 1.2 * 1.2 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_sample_errs() {
        let err = first_derivative(|x: f64| x.ln(), 0.5, 1.0, DiffDirection::Central).unwrap_err();
        assert_eq!(err, CalculusError::NonFiniteValue { x: -0.5 });
    }

    #[test]
    fn test_non_positive_step_is_a_soft_error() {
        let stencil = Stencil {
            direction: DiffDirection::Forward,
            order: DerivativeOrder::First,
            accuracy: Accuracy::Oh,
        };
        let err = differentiate(|x| x, 0.0, 0.0, stencil).unwrap_err();
        assert_eq!(err, CalculusError::NonPositiveStep { h: 0.0 });
        let err = differentiate(|x| x, 0.0, -1e-3, stencil).unwrap_err();
        assert_eq!(err, CalculusError::NonPositiveStep { h: -1e-3 });
    }

    #[test]
    fn test_tabulated_derivative_is_exact_for_a_cubic() {
        let x: Vec<f64> = (0..5).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v.powi(3) - 2.0 * v).collect();
        // f' = 3x^2 - 2; three or more differences make the cubic exact
        assert_relative_eq!(
            tabulated_first_derivative(&x, &y, 0).unwrap(),
            -2.0,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            tabulated_first_derivative(&x, &y, 1).unwrap(),
            1.0,
            epsilon = 1e-10
        );
        // the last node runs on backward differences and stays exact
        assert_relative_eq!(
            tabulated_first_derivative(&x, &y, 4).unwrap(),
            46.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_tabulated_derivative_of_a_straight_line_at_every_node() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        for i in 0..x.len() {
            assert_relative_eq!(
                tabulated_first_derivative(&x, &y, i).unwrap(),
                1.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_tabulated_derivative_needs_a_uniform_grid() {
        let x = [0.0, 1.0, 2.5, 3.0];
        let y = [0.0, 1.0, 2.0, 3.0];
        let err = tabulated_first_derivative(&x, &y, 0).unwrap_err();
        assert_eq!(err, CalculusError::UnevenGrid { index: 2 });
    }
}
