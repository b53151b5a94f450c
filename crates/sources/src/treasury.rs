//! Treasury-matched bond returns.

use nozawa_primitives::columns;
use nozawa_traits::{BondSource, SourceError, SourceKind};
use nozawa_utils::{has_column, parse_date_column};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::{composite_keys, float, rescaled};

/// Configuration for the treasury-matched source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasuryConfig {
    /// `chrono` format of the `DATE` column.
    pub date_format: String,
    /// Divisor turning whole-number percentages into decimals.
    pub percent_scale: f64,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self { date_format: "%Y%m%d".to_string(), percent_scale: 100.0 }
    }
}

/// Normalizer for the treasury-matched bond file.
///
/// Parses `DATE`, divides `tr_return` and `tr_ytm_match` by the percent
/// scale, attaches the `cusip_date` key and sorts by `DATE`.
#[derive(Debug, Clone)]
pub struct TreasurySource {
    config: TreasuryConfig,
}

impl TreasurySource {
    /// Create a new treasury source with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TreasuryConfig::default())
    }
}

impl Default for TreasurySource {
    fn default() -> Self {
        Self::new()
    }
}

impl BondSource for TreasurySource {
    type Config = TreasuryConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &str {
        "bondret_treasury"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::TreasuryMatched
    }

    fn required_columns(&self) -> &[&str] {
        &[
            columns::TREASURY_DATE,
            columns::TREASURY_CUSIP,
            columns::TREASURY_RETURN,
            columns::TREASURY_YTM,
        ]
    }

    fn normalize(&self, raw: DataFrame) -> Result<DataFrame, SourceError> {
        self.validate(&raw)?;
        if self.config.percent_scale == 0.0 {
            return Err(SourceError::InvalidConfig("percent_scale must be non-zero".to_string()));
        }

        let mut df = raw;
        let dates = parse_date_column(&df, columns::TREASURY_DATE, &self.config.date_format)?;
        df.with_column(dates)?;
        let ids = df.column(columns::TREASURY_CUSIP)?.cast(&DataType::String)?;
        df.with_column(ids)?;
        let keys = composite_keys(&df, columns::TREASURY_CUSIP, columns::TREASURY_DATE)?;
        df.with_column(keys)?;

        let mut numeric = vec![
            rescaled(columns::TREASURY_RETURN, self.config.percent_scale),
            rescaled(columns::TREASURY_YTM, self.config.percent_scale),
        ];
        if has_column(&df, columns::TREASURY_TAU) {
            numeric.push(float(columns::TREASURY_TAU));
        }

        let sort_options =
            SortMultipleOptions::new().with_maintain_order(true).with_nulls_last(true);
        let normalized = df
            .lazy()
            .with_columns(numeric)
            .sort([columns::TREASURY_DATE], sort_options)
            .collect()?;

        debug!(source = self.name(), rows = normalized.height(), "normalized treasury-matched bonds");
        Ok(normalized)
    }
}
