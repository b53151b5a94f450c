//! Outer merge of the two normalized bond datasets.

use nozawa_primitives::columns;
use nozawa_utils::{move_columns_to_front, require_columns};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::ModelError;

/// Suffix given to treasury-side columns whose names collide with bond-side ones.
pub const TREASURY_SUFFIX: &str = "_open";

/// Outer-join normalized bond returns with normalized treasury-matched data.
///
/// Rows are matched on `cusip_date`; unmatched rows from either side are
/// kept. `date` and `cusip` are completed from the treasury side's `DATE`
/// and `CUSIP`, which are then dropped. The result leads with `date`,
/// `cusip` and `cusip_date`.
///
/// # Arguments
/// * `bonds` - Output of the bond characteristics normalizer
/// * `treasury` - Output of the treasury-matched normalizer
///
/// # Errors
/// Returns `ModelError::MissingColumn` if a key column is absent on either side.
pub fn merge_bond_data(bonds: &DataFrame, treasury: &DataFrame) -> Result<DataFrame, ModelError> {
    require_columns(bonds, &[columns::CUSIP_DATE, columns::DATE, columns::CUSIP])?;
    require_columns(
        treasury,
        &[columns::CUSIP_DATE, columns::TREASURY_DATE, columns::TREASURY_CUSIP],
    )?;

    warn_on_duplicate_keys(bonds, "bond returns")?;
    warn_on_duplicate_keys(treasury, "treasury-matched")?;

    let join_args = JoinArgs::new(JoinType::Full)
        .with_coalesce(JoinCoalesce::CoalesceColumns)
        .with_suffix(Some(TREASURY_SUFFIX.into()));

    let merged = bonds
        .clone()
        .lazy()
        .join(
            treasury.clone().lazy(),
            [col(columns::CUSIP_DATE)],
            [col(columns::CUSIP_DATE)],
            join_args,
        )
        .with_columns([
            col(columns::DATE).fill_null(col(columns::TREASURY_DATE)).alias(columns::DATE),
            col(columns::CUSIP).fill_null(col(columns::TREASURY_CUSIP)).alias(columns::CUSIP),
        ])
        .drop([columns::TREASURY_DATE, columns::TREASURY_CUSIP])
        .collect()?;

    debug!(
        bond_rows = bonds.height(),
        treasury_rows = treasury.height(),
        merged_rows = merged.height(),
        "merged bond datasets"
    );

    Ok(move_columns_to_front(&merged, &[columns::DATE, columns::CUSIP, columns::CUSIP_DATE])?)
}

fn warn_on_duplicate_keys(df: &DataFrame, side: &str) -> Result<(), ModelError> {
    let unique = df.column(columns::CUSIP_DATE)?.n_unique()?;
    if unique < df.height() {
        warn!(side, duplicates = df.height() - unique, "composite keys are not unique");
    }
    Ok(())
}
