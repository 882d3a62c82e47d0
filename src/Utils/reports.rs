use itertools::Itertools;
use tabled::{builder::Builder, settings::Style};

use crate::calculus::quadrature::QuadratureResult;
use crate::linsys::iterative_solvers::IterativeSolveResult;
use crate::roots::scalar_root_solvers::RootFindingResult;

fn fmt(v: f64) -> String {
    format!("{:.6e}", v)
}

fn render(records: Vec<Vec<String>>) -> String {
    let mut table = Builder::from(records).build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Header plus one string row per iteration record. Shared by the table
/// renderer below and the CSV export in `Utils::logger`.
pub fn root_history_rows(result: &RootFindingResult) -> (Vec<String>, Vec<Vec<String>>) {
    let headers: Vec<String> = ["i", "x0", "x1", "candidate", "f(candidate)", "rel error"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<String>> = result
        .history
        .iter()
        .map(|rec| {
            vec![
                rec.index.to_string(),
                fmt(rec.x0),
                fmt(rec.x1),
                fmt(rec.candidate),
                fmt(rec.f_candidate),
                rec.rel_error.map_or("-".to_string(), fmt),
            ]
        })
        .collect();
    (headers, rows)
}

/// Full iteration history of a scalar root-finding run as a rounded table.
pub fn root_history_table(result: &RootFindingResult) -> String {
    let (headers, rows) = root_history_rows(result);
    let mut records = vec![headers];
    records.extend(rows);
    render(records)
}

pub fn linsys_history_rows(result: &IterativeSolveResult) -> (Vec<String>, Vec<Vec<String>>) {
    let n = result.x.len();
    let mut headers = vec!["sweep".to_string()];
    headers.extend((0..n).map(|j| format!("x[{}]", j)));
    headers.push("error".to_string());
    let rows: Vec<Vec<String>> = result
        .history
        .iter()
        .map(|rec| {
            let mut row = vec![rec.index.to_string()];
            row.extend(rec.x.iter().map(|v| fmt(*v)));
            row.push(rec.error.map_or("-".to_string(), fmt));
            row
        })
        .collect();
    (headers, rows)
}

/// Sweep-by-sweep table of an iterative linear-system run, one column per
/// unknown.
pub fn linsys_history_table(result: &IterativeSolveResult) -> String {
    let (headers, rows) = linsys_history_rows(result);
    let mut records = vec![headers];
    records.extend(rows);
    render(records)
}

pub fn quadrature_rows(result: &QuadratureResult) -> (Vec<String>, Vec<Vec<String>>) {
    let headers: Vec<String> = ["i", "x", "f(x)", "weight"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<String>> = result
        .samples
        .iter()
        .map(|s| {
            vec![
                s.index.to_string(),
                fmt(s.x),
                fmt(s.fx),
                fmt(s.weight),
            ]
        })
        .collect();
    (headers, rows)
}

/// Node table of a quadrature run, one row per sample point.
pub fn quadrature_table(result: &QuadratureResult) -> String {
    let (headers, rows) = quadrature_rows(result);
    let mut records = vec![headers];
    records.extend(rows);
    render(records)
}

/// One-line summary of a solution vector for log output,
/// e.g. `x = [8.000000e-1, 1.400000e0]`.
pub fn solution_summary(x: &nalgebra::DVector<f64>) -> String {
    format!("x = [{}]", x.iter().map(|v| fmt(*v)).join(", "))
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////
//  TESTS
/////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculus::quadrature::trapezoidal;
    use crate::linsys::iterative_solvers::jacobi;
    use crate::roots::scalar_root_solvers::bisection;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_root_history_rows_shape() {
        let f = |x: f64| x * x * x - x - 2.0;
        let result = bisection(f, 1.0, 2.0, 1e-6, 50).unwrap();
        let (headers, rows) = root_history_rows(&result);
        assert_eq!(headers.len(), 6);
        assert_eq!(rows.len(), result.history.len());
        // seed record carries no error
        assert_eq!(rows[0][5], "-");
        let table = root_history_table(&result);
        assert!(table.contains("candidate"));
        assert!(table.lines().count() > result.history.len());
    }

    #[test]
    fn test_linsys_history_rows_one_column_per_unknown() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        let x0 = DVector::zeros(2);
        let result = jacobi(&a, &b, &x0, 1e-10, 100).unwrap();
        let (headers, rows) = linsys_history_rows(&result);
        assert_eq!(headers, vec!["sweep", "x[0]", "x[1]", "error"]);
        assert_eq!(rows[0].len(), 4);
        let table = linsys_history_table(&result);
        assert!(table.contains("x[1]"));
    }

    #[test]
    fn test_quadrature_table_lists_every_sample() {
        let result = trapezoidal(|x: f64| x * x + 1.0, 0.0, 2.0, 4).unwrap();
        let (_, rows) = quadrature_rows(&result);
        assert_eq!(rows.len(), 5);
        let table = quadrature_table(&result);
        assert!(table.contains("weight"));
    }

    #[test]
    fn test_solution_summary_joins_components() {
        let x = DVector::from_row_slice(&[0.8, 1.4]);
        let line = solution_summary(&x);
        assert!(line.starts_with("x = ["));
        assert!(line.contains(", "));
    }
}
