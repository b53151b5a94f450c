//! Descriptive statistics over plain slices.
//!
//! Every function here takes already-aligned, null-free data; callers drop
//! missing observations before calling in.

use crate::MathError;

/// Arithmetic mean, `None` for empty input.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// `ddof = 0` is the population deviation, `ddof = 1` the sample deviation.
/// Returns `None` when there are not more than `ddof` observations.
#[must_use]
pub fn std_dev(values: &[f64], ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    let mu = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - mu).powi(2)).sum();
    Some((ss / (values.len() - ddof) as f64).sqrt())
}

/// Pearson correlation of two equal-length series.
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if lengths differ,
/// `MathError::EmptyData` for fewer than two pairs, and
/// `MathError::NumericalInstability` if either series is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, MathError> {
    if x.len() != y.len() {
        return Err(MathError::DimensionMismatch { expected: x.len(), actual: y.len() });
    }
    if x.len() < 2 {
        return Err(MathError::EmptyData);
    }

    let mx = mean(x).ok_or(MathError::EmptyData)?;
    let my = mean(y).ok_or(MathError::EmptyData)?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 || is_constant(x) || is_constant(y) {
        return Err(MathError::NumericalInstability("zero variance series".to_string()));
    }

    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Compounded return `prod(1 + r) - 1`, `None` for empty input.
#[must_use]
pub fn cumulative_return(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    Some(returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0)
}

/// Running compounded return after each period.
#[must_use]
pub fn cumulative_path(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |wealth, r| {
            *wealth *= 1.0 + r;
            Some(*wealth - 1.0)
        })
        .collect()
}

/// Mean of absolute values, `None` for empty input.
#[must_use]
pub fn mean_absolute(values: &[f64]) -> Option<f64> {
    let abs: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    mean(&abs)
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Square root of the mean square, `None` for empty input.
#[must_use]
pub fn root_mean_square(values: &[f64]) -> Option<f64> {
    let squares: Vec<f64> = values.iter().map(|v| v * v).collect();
    mean(&squares).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn mean_and_empty() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
        assert!(mean(&[]).is_none());
    }

    #[rstest]
    #[case(0, 1.118_033_988_749_895)]
    #[case(1, 1.290_994_448_735_805_6)]
    fn std_dev_ddof(#[case] ddof: usize, #[case] expected: f64) {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(std_dev(&values, ddof).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn std_dev_needs_enough_points() {
        assert!(std_dev(&[1.0], 1).is_none());
        assert_relative_eq!(std_dev(&[1.0], 0).unwrap(), 0.0);
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let x = [0.01, 0.02, 0.03];
        assert_relative_eq!(pearson(&x, &[0.02, 0.04, 0.06]).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&x, &[0.06, 0.04, 0.02]).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn pearson_degenerate() {
        assert!(matches!(pearson(&[1.0, 1.0], &[1.0, 2.0]), Err(MathError::NumericalInstability(_))));
        assert!(matches!(
            pearson(&[0.01, 0.02, 0.03], &[0.02, 0.02, 0.02]),
            Err(MathError::NumericalInstability(_))
        ));
        assert!(matches!(pearson(&[1.0], &[1.0]), Err(MathError::EmptyData)));
        assert!(matches!(pearson(&[1.0, 2.0], &[1.0]), Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn compounding() {
        assert_relative_eq!(cumulative_return(&[0.1, -0.1]).unwrap(), -0.01, epsilon = 1e-12);
        assert!(cumulative_return(&[]).is_none());

        let path = cumulative_path(&[0.1, 0.1, -0.5]);
        assert_relative_eq!(path[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(path[1], 0.21, epsilon = 1e-12);
        assert_relative_eq!(path[2], -0.395, epsilon = 1e-12);
    }

    #[test]
    fn error_magnitudes() {
        let residuals = [0.01, -0.03];
        assert_relative_eq!(mean_absolute(&residuals).unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(
            root_mean_square(&residuals).unwrap(),
            0.0005_f64.sqrt(),
            epsilon = 1e-12
        );
        assert!(root_mean_square(&[]).is_none());
    }
}
