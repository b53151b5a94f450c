//! Error types for numerical routines.

/// Errors that can occur in the numerical routines.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Quantile bucketing needs at least two buckets.
    #[error("invalid bucket count: {0} (must be at least 2)")]
    InvalidBucketCount(usize),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Numerical instability (NaN or Inf).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MathError::InvalidBucketCount(1);
        assert!(err.to_string().contains("at least 2"));

        let err = MathError::DimensionMismatch { expected: 10, actual: 5 };
        assert!(err.to_string().contains("10") && err.to_string().contains("5"));
    }
}
