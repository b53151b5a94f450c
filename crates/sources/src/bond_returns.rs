//! Bond characteristics and realized returns.

use nozawa_primitives::columns;
use nozawa_traits::{BondSource, SourceError, SourceKind};
use nozawa_utils::{forward_values, has_column, parse_date_column};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::{composite_keys, float, rescaled, year_column};

/// Numeric characteristics cast from text when present.
const NUMERIC_COLUMNS: [&str; 5] = [
    columns::YIELD,
    columns::RETURN,
    columns::AMOUNT_OUTSTANDING,
    columns::TIME_TO_MATURITY,
    columns::PRICE,
];

/// Configuration for the bond characteristics source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondReturnsConfig {
    /// `chrono` format of the `date` column.
    pub date_format: String,
    /// Divisor turning the whole-number `t_yld_pt` into a decimal.
    pub percent_scale: f64,
}

impl Default for BondReturnsConfig {
    fn default() -> Self {
        Self { date_format: "%Y-%m-%d".to_string(), percent_scale: 100.0 }
    }
}

/// Normalizer for the bond characteristics file.
///
/// Parses `date`, derives `year`, divides `t_yld_pt` by the percent scale,
/// attaches the `cusip_date` key, sorts by bond then date and adds the
/// forward return `ret_eom_fwd`: the next observation's `ret_eom` for the
/// same bond, null on each bond's last observation.
#[derive(Debug, Clone)]
pub struct BondReturnsSource {
    config: BondReturnsConfig,
}

impl BondReturnsSource {
    /// Create a new bond returns source with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BondReturnsConfig::default())
    }
}

impl Default for BondReturnsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl BondSource for BondReturnsSource {
    type Config = BondReturnsConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &str {
        "crsp_bond_returns"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::BondCharacteristics
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::DATE, columns::CUSIP, columns::YIELD, columns::YIELD_POINT, columns::RETURN]
    }

    fn normalize(&self, raw: DataFrame) -> Result<DataFrame, SourceError> {
        self.validate(&raw)?;
        if self.config.percent_scale == 0.0 {
            return Err(SourceError::InvalidConfig("percent_scale must be non-zero".to_string()));
        }

        let mut df = raw;
        let dates = parse_date_column(&df, columns::DATE, &self.config.date_format)?;
        df.with_column(dates)?;
        let ids = df.column(columns::CUSIP)?.cast(&DataType::String)?;
        df.with_column(ids)?;
        let years = year_column(&df, columns::DATE)?;
        df.with_column(years)?;
        let keys = composite_keys(&df, columns::CUSIP, columns::DATE)?;
        df.with_column(keys)?;

        let mut numeric = vec![rescaled(columns::YIELD_POINT, self.config.percent_scale)];
        numeric.extend(
            NUMERIC_COLUMNS.iter().filter(|&&name| has_column(&df, name)).map(|&name| float(name)),
        );

        let normalized = forward_values(
            df.lazy().with_columns(numeric),
            columns::RETURN,
            &[columns::CUSIP, columns::DATE],
            columns::CUSIP,
            columns::FORWARD_RETURN,
        )
        .collect()?;

        debug!(source = self.name(), rows = normalized.height(), "normalized bond returns");
        Ok(normalized)
    }
}
