use crate::interpolate::newton_difference::assert_nodes;

/// One additive term of a Lagrange evaluation, y_j * L_j(x), kept around so
/// a report can show how each node pulls the interpolant.
#[derive(Debug, Clone, PartialEq)]
pub struct LagrangeTerm {
    pub index: usize,
    pub basis_value: f64,
    pub y: f64,
    pub contribution: f64,
}

/// j-th Lagrange basis polynomial L_j(x) over the given nodes.
pub fn lagrange_basis(x: &[f64], j: usize, x_eval: f64) -> f64 {
    let mut l = 1.0;
    for (i, xi) in x.iter().enumerate() {
        if i != j {
            l *= (x_eval - xi) / (x[j] - xi);
        }
    }
    l
}

/// Lagrange interpolation P(x) = sum_j y_j L_j(x). Works for any distinct
/// node layout and allows extrapolation; the value is built directly from
/// the basis polynomials with no coefficient extraction.
pub fn lagrange_interpolate(x: &[f64], y: &[f64], x_eval: f64) -> f64 {
    assert_nodes(x, y);
    let mut value = 0.0;
    for j in 0..x.len() {
        value += y[j] * lagrange_basis(x, j, x_eval);
    }
    value
}

/// Same evaluation as `lagrange_interpolate`, but every term is returned
/// alongside the value.
pub fn lagrange_detailed(x: &[f64], y: &[f64], x_eval: f64) -> (f64, Vec<LagrangeTerm>) {
    assert_nodes(x, y);
    let mut value = 0.0;
    let mut terms = Vec::with_capacity(x.len());
    for j in 0..x.len() {
        let basis_value = lagrange_basis(x, j, x_eval);
        let contribution = y[j] * basis_value;
        value += contribution;
        terms.push(LagrangeTerm {
            index: j,
            basis_value,
            y: y[j],
            contribution,
        });
    }
    (value, terms)
}

/// Straight line through two points, the n = 1 case written out.
pub fn linear_interpolation(x: &[f64], y: &[f64], x_eval: f64) -> f64 {
    assert_nodes(x, y);
    assert_eq!(x.len(), 2, "Linear interpolation takes exactly two points.");
    y[0] + (y[1] - y[0]) * (x_eval - x[0]) / (x[1] - x[0])
}

/// Parabola through three points, the n = 2 case written out term by term.
pub fn quadratic_interpolation(x: &[f64], y: &[f64], x_eval: f64) -> f64 {
    assert_nodes(x, y);
    assert_eq!(
        x.len(),
        3,
        "Quadratic interpolation takes exactly three points."
    );
    let t0 = y[0] * (x_eval - x[1]) * (x_eval - x[2]) / ((x[0] - x[1]) * (x[0] - x[2]));
    let t1 = y[1] * (x_eval - x[0]) * (x_eval - x[2]) / ((x[1] - x[0]) * (x[1] - x[2]));
    let t2 = y[2] * (x_eval - x[0]) * (x_eval - x[1]) / ((x[2] - x[0]) * (x[2] - x[1]));
    t0 + t1 + t2
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::newton_difference::newton_divided;
    use approx::assert_relative_eq;

    #[test]
    fn test_lagrange_on_three_points() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 2.0, 5.0];
        assert_relative_eq!(lagrange_interpolate(&x, &y, 1.5), 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_lagrange_passes_through_the_nodes() {
        let x = [-1.0, 0.5, 2.0, 4.0];
        let y = [3.0, -2.0, 0.0, 7.0];
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert_relative_eq!(lagrange_interpolate(&x, &y, *xi), *yi, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_basis_polynomials_sum_to_one() {
        let x = [-2.0, 0.0, 1.0, 3.0, 5.5];
        for x_eval in [-1.0, 0.3, 4.9, 7.0] {
            let total: f64 = (0..x.len()).map(|j| lagrange_basis(&x, j, x_eval)).sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lagrange_matches_newton_divided() {
        let x = [0.0, 0.7, 1.9, 3.2, 4.0];
        let y = [1.0, -0.3, 2.2, 5.0, 4.1];
        for x_eval in [0.5, 1.0, 2.5, 3.9] {
            assert_relative_eq!(
                lagrange_interpolate(&x, &y, x_eval),
                newton_divided(&x, &y, x_eval),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_detailed_terms_sum_to_the_value() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 2.0, 5.0];
        let (value, terms) = lagrange_detailed(&x, &y, 1.5);
        assert_relative_eq!(value, 3.25, epsilon = 1e-12);
        assert_eq!(terms.len(), 3);
        let total: f64 = terms.iter().map(|t| t.contribution).sum();
        assert_relative_eq!(total, value, epsilon = 1e-12);
        for (j, term) in terms.iter().enumerate() {
            assert_eq!(term.index, j);
            assert_relative_eq!(
                term.contribution,
                term.y * term.basis_value,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_detailed_terms_at_a_node_pick_one_basis() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 2.0, 5.0];
        let (value, terms) = lagrange_detailed(&x, &y, 1.0);
        assert_relative_eq!(value, 2.0, epsilon = 1e-12);
        assert_relative_eq!(terms[1].basis_value, 1.0, epsilon = 1e-12);
        assert_relative_eq!(terms[0].basis_value, 0.0, epsilon = 1e-12);
        assert_relative_eq!(terms[2].basis_value, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_interpolation_is_the_two_point_line() {
        let x = [1.0, 3.0];
        let y = [2.0, 8.0];
        assert_relative_eq!(linear_interpolation(&x, &y, 2.0), 5.0, epsilon = 1e-12);
        assert_relative_eq!(
            linear_interpolation(&x, &y, 2.0),
            lagrange_interpolate(&x, &y, 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_quadratic_interpolation_reproduces_a_parabola() {
        // samples of 2x^2 - 3x + 1
        let x = [0.0, 1.0, 3.0];
        let y = [1.0, 0.0, 10.0];
        for x_eval in [-1.0, 0.5, 2.0, 4.0] {
            let expected = 2.0 * x_eval * x_eval - 3.0 * x_eval + 1.0;
            assert_relative_eq!(
                quadratic_interpolation(&x, &y, x_eval),
                expected,
                epsilon = 1e-10
            );
        }
    }

    #[test]
    #[should_panic(expected = "exactly two points")]
    fn test_linear_interpolation_rejects_extra_points() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 2.0, 5.0];
        let _ = linear_interpolation(&x, &y, 0.5);
    }
}
