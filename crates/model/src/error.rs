//! Error types for portfolio construction and analysis.

use nozawa_math::MathError;
use nozawa_primitives::DecileError;
use nozawa_traits::SourceError;
use nozawa_utils::UtilsError;

/// Errors that can occur while building or analyzing decile portfolios.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Raw source normalization error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Decile label error.
    #[error("decile error: {0}")]
    Decile(#[from] DecileError),

    /// Date handling error.
    #[error(transparent)]
    Utils(UtilsError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The benchmark series has no dated rows.
    #[error("benchmark series has no dates")]
    EmptyBenchmark,

    /// A date column contains nulls where every row needs a date.
    #[error("null date in column {0}")]
    NullDate(String),

    /// Calendar arithmetic left the representable date range.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// A date's cross-section cannot be split into deciles.
    #[error("cannot form deciles on {date} from {observations} observations")]
    DegenerateCrossSection {
        /// Date of the cross-section.
        date: String,
        /// Number of bonds on that date.
        observations: usize,
    },

    /// A decile shares no valid observation with its benchmark.
    #[error("no overlapping observations for decile {0}")]
    NoOverlap(String),
}

impl From<UtilsError> for ModelError {
    fn from(err: UtilsError) -> Self {
        match err {
            UtilsError::MissingColumn(name) => Self::MissingColumn(name),
            UtilsError::Polars(err) => Self::Polars(err),
            other => Self::Utils(other),
        }
    }
}

impl ModelError {
    /// Returns whether this error is recoverable.
    ///
    /// Recoverable errors concern a single date or decile and are handled by
    /// excluding that slice; every other error aborts the run.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateCrossSection { .. } | Self::NoOverlap(_))
    }
}
