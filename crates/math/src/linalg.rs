//! Least-squares line fitting.

use ndarray::{Array1, Array2};

use crate::MathError;

/// Result of a first-degree least-squares fit `y ≈ slope * x + intercept`.
#[derive(Debug, Clone)]
pub struct LinearFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Residuals `y - (slope * x + intercept)`.
    pub residuals: Array1<f64>,
}

/// Fit a straight line by ordinary least squares.
///
/// Solves the normal equations of the design matrix `[x | 1]`, the same
/// problem a first-degree polynomial fit minimizes.
///
/// # Arguments
/// * `x` - Regressor (n,)
/// * `y` - Response (n,)
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if lengths differ,
/// `MathError::EmptyData` for fewer than two points, and
/// `MathError::LinearAlgebra` if `x` is constant.
pub fn linear_fit(x: &Array1<f64>, y: &Array1<f64>) -> Result<LinearFit, MathError> {
    let n = x.len();
    if y.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: y.len() });
    }
    if n < 2 {
        return Err(MathError::EmptyData);
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite input".to_string()));
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(MathError::LinearAlgebra("regressor is constant".to_string()));
    }

    let mut design = Array2::ones((n, 2));
    design.column_mut(0).assign(x);

    let xtx = design.t().dot(&design);
    let xty = design.t().dot(y);
    let coefficients = solve_linear_system(&xtx, &xty)?;

    let residuals = y - &design.dot(&coefficients);

    Ok(LinearFit { slope: coefficients[0], intercept: coefficients[1], residuals })
}

/// Solve a linear system Ax = b using Gaussian elimination with partial pivoting.
fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }
    if b.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: b.len() });
    }

    // Pivots are judged relative to the largest entry
    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = scale * 1e-12;

    // Augmented matrix [A | b]
    let mut aug = Array2::zeros((n, n + 1));
    aug.slice_mut(ndarray::s![.., ..n]).assign(a);
    aug.column_mut(n).assign(b);

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val <= tolerance {
            return Err(MathError::LinearAlgebra(
                "matrix is singular or nearly singular".to_string(),
            ));
        }

        if max_row != col {
            for j in 0..=n {
                aug.swap([col, j], [max_row, j]);
            }
        }

        for row in (col + 1)..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            for j in col..=n {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    // Back substitution
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = aug[[i, n]];
        for j in (i + 1)..n {
            sum -= aug[[i, j]] * x[j];
        }
        x[i] = sum / aug[[i, i]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn exact_line_is_recovered() {
        let x = array![0.01, 0.02, 0.03];
        let y = array![0.02, 0.04, 0.06];

        let fit = linear_fit(&x, &y).unwrap();

        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-10);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
        assert!(fit.residuals.iter().all(|r| r.abs() < 1e-12));
    }

    #[test]
    fn noisy_fit_residuals_sum_to_zero() {
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = array![1.1, 1.9, 3.2, 3.8, 5.1];

        let fit = linear_fit(&x, &y).unwrap();

        // With an intercept the residuals are orthogonal to the ones vector
        assert_relative_eq!(fit.residuals.sum(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(fit.slope, 0.99, epsilon = 1e-10);
        assert_relative_eq!(fit.intercept, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn constant_regressor_is_rejected() {
        let x = array![0.01, 0.01, 0.01];
        let y = array![0.02, 0.03, 0.04];
        assert!(matches!(linear_fit(&x, &y), Err(MathError::LinearAlgebra(_))));
    }

    #[test]
    fn constant_response_fits_flat_line() {
        let x = array![0.01, 0.02, 0.03];
        let y = array![0.02, 0.02, 0.02];

        let fit = linear_fit(&x, &y).unwrap();

        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-10);
        assert_relative_eq!(fit.intercept, 0.02, epsilon = 1e-12);
        assert!(fit.residuals.iter().all(|r| r.abs() < 1e-12));
    }

    #[test]
    fn too_few_points() {
        let x = array![0.01];
        let y = array![0.02];
        assert!(matches!(linear_fit(&x, &y), Err(MathError::EmptyData)));
    }

    #[test]
    fn length_mismatch() {
        let x = array![0.01, 0.02];
        let y = array![0.02];
        assert!(matches!(
            linear_fit(&x, &y),
            Err(MathError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }
}
