//! Error types for utility functions.

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Date text that does not match the expected format.
    #[error("invalid date in column {column}: {value:?} does not match {format:?}")]
    InvalidDate {
        /// Column holding the value.
        column: String,
        /// Offending value.
        value: String,
        /// Expected format.
        format: String,
    },
}
