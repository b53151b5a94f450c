//! End-to-end processing of the two raw bond files.

use nozawa_primitives::{Date, columns};
use nozawa_sources::{BondReturnsConfig, BondReturnsSource, TreasuryConfig, TreasurySource};
use nozawa_traits::BondSource;
use nozawa_utils::restrict_to_window;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ModelError, PortfolioConfig, merge_bond_data, process_merged_bond_data};

/// Configuration of every stage up to decile assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Treasury-matched normalizer settings.
    pub treasury: TreasuryConfig,
    /// Bond characteristics normalizer settings.
    pub bonds: BondReturnsConfig,
    /// Decile assignment settings.
    pub portfolio: PortfolioConfig,
    /// First observation date kept, inclusive.
    pub sample_start: Option<Date>,
    /// Last observation date kept, inclusive.
    pub sample_end: Option<Date>,
}

impl PipelineConfig {
    /// Check the sample window is not inverted.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` if `sample_start` is after `sample_end`.
    pub fn validate(&self) -> Result<(), ModelError> {
        match (self.sample_start, self.sample_end) {
            (Some(start), Some(end)) if start > end => Err(ModelError::InvalidConfig(format!(
                "sample_start {start} is after sample_end {end}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Output of [`process_all_data`].
#[derive(Debug, Clone)]
pub struct ProcessedBondData {
    /// Normalized treasury-matched frame.
    pub treasury: DataFrame,
    /// Normalized bond characteristics frame with forward returns.
    pub bonds: DataFrame,
    /// Merged frame with yield spreads and deciles.
    pub merged: DataFrame,
}

/// Normalize both raw files, merge them and assign yield-spread deciles.
///
/// Forward returns are computed before the sample window is applied, so a
/// bond's last in-window observation keeps the return of the following month
/// when the raw file has it.
///
/// # Errors
/// Propagates normalization, merge and decile assignment errors, and returns
/// `ModelError::InvalidConfig` for an inverted sample window.
pub fn process_all_data(
    treasury_raw: DataFrame,
    bond_raw: DataFrame,
    config: &PipelineConfig,
) -> Result<ProcessedBondData, ModelError> {
    config.validate()?;

    let treasury_source = TreasurySource::with_config(config.treasury.clone());
    let bond_source = BondReturnsSource::with_config(config.bonds.clone());

    let treasury = within_window(treasury_source.normalize(treasury_raw)?, columns::TREASURY_DATE, config)?;
    let bonds = within_window(bond_source.normalize(bond_raw)?, columns::DATE, config)?;

    let merged = merge_bond_data(&bonds, &treasury)?;
    let merged = process_merged_bond_data(&merged, &config.portfolio)?;

    info!(
        treasury_rows = treasury.height(),
        bond_rows = bonds.height(),
        merged_rows = merged.height(),
        "processed bond data"
    );
    Ok(ProcessedBondData { treasury, bonds, merged })
}

fn within_window(df: DataFrame, date_col: &str, config: &PipelineConfig) -> Result<DataFrame, ModelError> {
    if config.sample_start.is_none() && config.sample_end.is_none() {
        return Ok(df);
    }
    Ok(restrict_to_window(df.lazy(), date_col, config.sample_start, config.sample_end).collect()?)
}
