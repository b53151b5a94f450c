//! Raw bond dataset normalizer trait definitions.

use nozawa_utils::UtilsError;
use polars::prelude::*;

/// Errors that can occur while normalizing a raw dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] PolarsError),

    /// Date parsing or column bookkeeping error.
    #[error(transparent)]
    Utils(UtilsError),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<UtilsError> for SourceError {
    fn from(err: UtilsError) -> Self {
        match err {
            UtilsError::MissingColumn(name) => Self::MissingColumn(name),
            UtilsError::Polars(err) => Self::Polars(err),
            other => Self::Utils(other),
        }
    }
}

/// The role a raw dataset plays in the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Bond returns matched to a maturity-equivalent treasury.
    TreasuryMatched,
    /// Bond characteristics and realized returns.
    BondCharacteristics,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TreasuryMatched => write!(f, "treasury-matched"),
            Self::BondCharacteristics => write!(f, "bond-characteristics"),
        }
    }
}

/// Normalizer for one raw bond dataset.
///
/// Implementations parse dates, rescale percentage fields, attach the
/// composite bond-date key, and sort the rows.
pub trait BondSource: Send + Sync {
    /// Configuration type for this source.
    type Config: Default + Clone + Send + Sync;

    /// Create a new source with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Returns the source configuration.
    fn config(&self) -> &Self::Config;

    /// Returns the name of this source.
    fn name(&self) -> &str;

    /// Returns the role of this source in the merge.
    fn kind(&self) -> SourceKind;

    /// Columns that must be present in the raw frame.
    fn required_columns(&self) -> &[&str];

    /// Check the raw frame carries every required column.
    ///
    /// # Errors
    /// Returns `SourceError::MissingColumn` naming the first absent column.
    fn validate(&self, raw: &DataFrame) -> Result<(), SourceError> {
        nozawa_utils::require_columns(raw, self.required_columns())?;
        Ok(())
    }

    /// Normalize a raw frame into its canonical shape.
    ///
    /// # Errors
    /// Returns `SourceError` if a required column is missing or a date is malformed.
    fn normalize(&self, raw: DataFrame) -> Result<DataFrame, SourceError>;
}
