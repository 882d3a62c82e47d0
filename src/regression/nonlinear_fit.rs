use crate::regression::linear_fit::{
    RegressionError, RegressionKind, RegressionModel, check_samples,
    coefficient_of_determination, spread_check, transformed_line,
};
use nalgebra::DVector;

/// Exponential model y = a e^(bx), fitted by taking ln y and dropping onto
/// the straight-line machinery. A zero or negative y makes the logarithm
/// NaN (or -inf) and the contamination rides the sums straight into the
/// coefficients; no error is raised, the caller reads NaN.
pub fn fit_exponential(
    x: &[f64],
    y: &[f64],
    predict_at: Option<f64>,
) -> Result<RegressionModel, RegressionError> {
    check_samples(x, y, 2);
    spread_check(x)?;
    let z: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    let (intercept, slope) = transformed_line(x, &z);
    let model = RegressionModel {
        kind: RegressionKind::Exponential,
        coefficients: DVector::from_vec(vec![intercept.exp(), slope]),
        r_squared: 0.0,
        prediction: None,
    };
    let y_hat: Vec<f64> = x.iter().map(|&v| model.predict(v)).collect();
    Ok(RegressionModel {
        r_squared: coefficient_of_determination(y, &y_hat),
        prediction: predict_at.map(|q| model.predict(q)),
        ..model
    })
}

/// Power model y = a x^b, fitted on the doubly logarithmic scale. Same
/// silent NaN contract as the exponential fit, now for x as well as y.
pub fn fit_power(
    x: &[f64],
    y: &[f64],
    predict_at: Option<f64>,
) -> Result<RegressionModel, RegressionError> {
    check_samples(x, y, 2);
    spread_check(x)?;
    let u: Vec<f64> = x.iter().map(|v| v.ln()).collect();
    let z: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    let (intercept, slope) = transformed_line(&u, &z);
    let model = RegressionModel {
        kind: RegressionKind::Power,
        coefficients: DVector::from_vec(vec![intercept.exp(), slope]),
        r_squared: 0.0,
        prediction: None,
    };
    let y_hat: Vec<f64> = x.iter().map(|&v| model.predict(v)).collect();
    Ok(RegressionModel {
        r_squared: coefficient_of_determination(y, &y_hat),
        prediction: predict_at.map(|q| model.predict(q)),
        ..model
    })
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_exponential_is_recovered() {
        let x = [0.0_f64, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * (0.5 * v).exp()).collect();
        let model = fit_exponential(&x, &y, Some(4.0)).unwrap();
        assert_relative_eq!(model.coefficients[0], 3.0, epsilon = 1e-10);
        assert_relative_eq!(model.coefficients[1], 0.5, epsilon = 1e-10);
        assert_relative_eq!(model.r_squared, 1.0, epsilon = 1e-10);
        assert_relative_eq!(model.prediction.unwrap(), 3.0 * 2.0_f64.exp(), epsilon = 1e-8);
    }

    #[test]
    fn test_exact_power_law_is_recovered() {
        let x = [1.0_f64, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v.powf(1.5)).collect();
        let model = fit_power(&x, &y, None).unwrap();
        assert_relative_eq!(model.coefficients[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(model.coefficients[1], 1.5, epsilon = 1e-10);
        assert_relative_eq!(model.r_squared, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_y_poisons_the_exponential_fit_silently() {
        let x = [0.0, 1.0, 2.0];
        let y = [2.0, -1.0, 3.0];
        // no Err: the NaN from ln(-1) just flows into every output
        let model = fit_exponential(&x, &y, Some(1.0)).unwrap();
        assert!(model.coefficients[0].is_nan());
        assert!(model.coefficients[1].is_nan());
        assert!(model.r_squared.is_nan());
        assert!(model.prediction.unwrap().is_nan());
    }

    #[test]
    fn test_zero_y_poisons_the_exponential_fit_silently() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 0.0, 2.0];
        let model = fit_exponential(&x, &y, None).unwrap();
        assert!(model.coefficients[1].is_nan());
    }

    #[test]
    fn test_non_positive_x_poisons_the_power_fit_silently() {
        let x = [-1.0, 1.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        let model = fit_power(&x, &y, None).unwrap();
        assert!(model.coefficients[1].is_nan());
    }

    #[test]
    fn test_coincident_x_is_still_degenerate() {
        let x = [1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(
            fit_exponential(&x, &y, None).unwrap_err(),
            RegressionError::DegenerateDesign
        );
    }
}
