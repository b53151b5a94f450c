//! Yield-spread decile assignment and value-weighted portfolio returns.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array1;
use nozawa_math::{QuantileBinner, value_weight_xsection};
use nozawa_primitives::{Date, DecileLabel, columns};
use nozawa_utils::{
    add_months, date_column, day_values, days_to_date, month_end, require_columns,
};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::{MissingReturnPolicy, ModelError, PortfolioConfig};

/// Add yield spreads, clean amounts outstanding and assign deciles.
///
/// - `yield_spread = yield - tr_ytm_match`, and `TTM_diff = tmt - tau` when
///   both maturities are present.
/// - Rows without a finite yield spread are dropped.
/// - Negative amounts outstanding are multiplied by
///   `config.negative_outstanding_scale`.
/// - Rows are sorted by date (stable), and each date's cross-section is split
///   into ten equal-population yield-spread buckets labeled 11..=20. A date
///   whose cross-section cannot form ten buckets keeps its rows with a null
///   decile.
///
/// # Errors
/// Returns `ModelError::MissingColumn` if `date`, `yield`, `tr_ytm_match` or
/// `amount_outstanding` is absent.
pub fn process_merged_bond_data(
    merged: &DataFrame,
    config: &PortfolioConfig,
) -> Result<DataFrame, ModelError> {
    require_columns(
        merged,
        &[columns::DATE, columns::YIELD, columns::TREASURY_YTM, columns::AMOUNT_OUTSTANDING],
    )?;

    let mut lf = merged
        .clone()
        .lazy()
        .with_column((col(columns::YIELD) - col(columns::TREASURY_YTM)).alias(columns::YIELD_SPREAD));

    if require_columns(merged, &[columns::TIME_TO_MATURITY, columns::TREASURY_TAU]).is_ok() {
        lf = lf.with_column(
            (col(columns::TIME_TO_MATURITY) - col(columns::TREASURY_TAU)).alias(columns::TTM_DIFF),
        );
    }

    let amount = col(columns::AMOUNT_OUTSTANDING);
    let sort_options = SortMultipleOptions::new().with_maintain_order(true).with_nulls_last(true);
    let mut processed = lf
        .filter(col(columns::YIELD_SPREAD).is_not_null().and(col(columns::YIELD_SPREAD).is_not_nan()))
        .with_column(
            when(amount.clone().lt(lit(0.0)))
                .then(amount.clone() * lit(config.negative_outstanding_scale))
                .otherwise(amount)
                .alias(columns::AMOUNT_OUTSTANDING),
        )
        .sort([columns::DATE], sort_options)
        .collect()?;

    let deciles = assign_deciles(&processed)?;
    processed.with_column(deciles)?;

    debug!(
        input_rows = merged.height(),
        rows = processed.height(),
        unassigned = processed.column(columns::DECILE)?.null_count(),
        "assigned yield-spread deciles"
    );
    Ok(processed)
}

/// Decile label of every row of a date-sorted frame with yield spreads.
fn assign_deciles(df: &DataFrame) -> Result<Column, ModelError> {
    let binner = QuantileBinner::new(DecileLabel::COUNT)?;
    let days = day_values(df, columns::DATE)?;
    let spreads: Vec<Option<f64>> = df.column(columns::YIELD_SPREAD)?.f64()?.into_iter().collect();

    let mut labels: Vec<Option<i32>> = Vec::with_capacity(df.height());
    let mut start = 0;
    while start < days.len() {
        let day = days[start];
        let end = start + days[start..].iter().take_while(|&&d| d == day).count();

        let Some(day) = day else {
            // Rows without a date belong to no cross-section
            labels.extend(std::iter::repeat_n(None, end - start));
            start = end;
            continue;
        };

        let cross_section: Array1<f64> =
            spreads[start..end].iter().map(|s| s.unwrap_or(f64::NAN)).collect();
        match date_deciles(&binner, day, &cross_section) {
            Ok(assigned) => {
                labels.extend(assigned.into_iter().map(|label| Some(i32::from(label.value()))));
            }
            Err(err) if err.is_recoverable() => {
                warn!(%err, "excluding date from decile portfolios");
                labels.extend(std::iter::repeat_n(None, end - start));
            }
            Err(err) => return Err(err),
        }
        start = end;
    }

    Ok(Column::new(columns::DECILE.into(), labels))
}

/// Deciles of one date's cross-section.
fn date_deciles(
    binner: &QuantileBinner,
    day: i32,
    cross_section: &Array1<f64>,
) -> Result<Vec<DecileLabel>, ModelError> {
    let buckets = binner.assign(cross_section).ok_or_else(|| ModelError::DegenerateCrossSection {
        date: days_to_date(day).map_or_else(|| day.to_string(), |d| d.to_string()),
        observations: cross_section.len(),
    })?;
    buckets.into_iter().map(|b| DecileLabel::from_bucket(b).map_err(ModelError::from)).collect()
}

/// Wide decile return tables.
#[derive(Debug, Clone)]
pub struct DecileReturns {
    /// Returns stamped at the formation date `t`.
    pub forward: DataFrame,
    /// The same returns stamped at the end of the holding period.
    pub normalized: DataFrame,
}

/// Value-weighted decile portfolio builder.
///
/// Each (date, decile) portfolio weights its bonds by amount outstanding
/// and earns the weighted forward return of its bonds.
#[derive(Debug, Clone, Default)]
pub struct DecilePortfolioBuilder {
    config: PortfolioConfig,
}

impl DecilePortfolioBuilder {
    /// Create a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PortfolioConfig::default())
    }

    /// Create a new builder with custom configuration.
    #[must_use]
    pub const fn with_config(config: PortfolioConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// Attach `weight` and `weighted_ret` to every bond with a decile.
    ///
    /// Rows with a null decile are dropped. NaN amounts outstanding and NaN
    /// forward returns count as missing: a missing amount leaves the bond
    /// out of the weight denominator. Under
    /// [`MissingReturnPolicy::Renormalize`] rows with a missing forward
    /// return are dropped before weighting.
    ///
    /// # Errors
    /// Returns `ModelError::MissingColumn` if a required column is absent.
    pub fn value_weights(&self, df: &DataFrame) -> Result<DataFrame, ModelError> {
        require_columns(
            df,
            &[columns::DATE, columns::DECILE, columns::AMOUNT_OUTSTANDING, columns::FORWARD_RETURN],
        )?;

        let mut lf = df
            .clone()
            .lazy()
            .filter(col(columns::DECILE).is_not_null())
            .with_columns([nan_to_null(columns::AMOUNT_OUTSTANDING), nan_to_null(columns::FORWARD_RETURN)]);
        if self.config.missing_returns == MissingReturnPolicy::Renormalize {
            lf = lf.filter(col(columns::FORWARD_RETURN).is_not_null());
        }

        let sort_options = SortMultipleOptions::new().with_maintain_order(true);
        Ok(lf
            .with_column(
                value_weight_xsection(columns::AMOUNT_OUTSTANDING, &[columns::DATE, columns::DECILE])
                    .alias(columns::WEIGHT),
            )
            .with_column(
                (col(columns::WEIGHT) * col(columns::FORWARD_RETURN)).alias(columns::WEIGHTED_RETURN),
            )
            .sort([columns::DATE], sort_options)
            .collect()?)
    }

    /// Value-weighted forward returns per date and decile, in wide form.
    ///
    /// The forward table has one row per date (ascending) and one column per
    /// decile present, named by its label. Missing weighted returns count as
    /// zero in the portfolio sum. When `drop_last_period` is set the most
    /// recent date is removed. The normalized table carries the same values
    /// with each date moved forward by `normalized_month_offset` months.
    ///
    /// # Errors
    /// Returns `ModelError::MissingColumn` if a required column is absent and
    /// `ModelError::DateOutOfRange` if a shifted date is not representable.
    pub fn calculate_decile_returns(&self, df: &DataFrame) -> Result<DecileReturns, ModelError> {
        let weighted = self.value_weights(df)?;

        let grouped = weighted
            .lazy()
            .group_by([col(columns::DATE), col(columns::DECILE)])
            .agg([col(columns::WEIGHTED_RETURN).sum()])
            .collect()?;

        let mut table = pivot_deciles(&grouped)?;
        if self.config.drop_last_period {
            table.pop_last();
        }

        let forward = wide_frame(&table, Ok)?;
        let normalized = wide_frame(&table, |date| self.normalized_date(date))?;

        info!(
            dates = forward.height(),
            deciles = forward.width().saturating_sub(1),
            "calculated decile portfolio returns"
        );
        Ok(DecileReturns { forward, normalized })
    }

    fn normalized_date(&self, date: Date) -> Result<Date, ModelError> {
        let shifted = add_months(date, self.config.normalized_month_offset)
            .ok_or_else(|| ModelError::DateOutOfRange(date.to_string()))?;
        Ok(if self.config.snap_to_month_end { month_end(shifted) } else { shifted })
    }
}

type DecileTable = BTreeMap<Date, BTreeMap<DecileLabel, f64>>;

/// Long `(date, decile, weighted_ret)` rows into a date-keyed table.
/// `name` as `Float64` with NaN replaced by null.
fn nan_to_null(name: &str) -> Expr {
    let value = col(name).cast(DataType::Float64);
    when(value.clone().is_nan()).then(lit(NULL)).otherwise(value).alias(name)
}

fn pivot_deciles(grouped: &DataFrame) -> Result<DecileTable, ModelError> {
    let days = day_values(grouped, columns::DATE)?;
    let deciles = grouped.column(columns::DECILE)?.cast(&DataType::Int32)?;
    let returns = grouped.column(columns::WEIGHTED_RETURN)?.cast(&DataType::Float64)?;

    let mut table = DecileTable::new();
    for ((day, decile), ret) in
        days.into_iter().zip(deciles.i32()?.into_iter()).zip(returns.f64()?.into_iter())
    {
        let (Some(date), Some(decile)) = (day.and_then(days_to_date), decile) else {
            continue;
        };
        let label = DecileLabel::try_from(decile)?;
        table.entry(date).or_default().insert(label, ret.unwrap_or(0.0));
    }
    Ok(table)
}

/// Render a decile table as `date` plus one column per decile present.
fn wide_frame(
    table: &DecileTable,
    stamp: impl Fn(Date) -> Result<Date, ModelError>,
) -> Result<DataFrame, ModelError> {
    let labels: BTreeSet<DecileLabel> =
        table.values().flat_map(|row| row.keys().copied()).collect();

    let dates = table.keys().map(|&d| stamp(d).map(Some)).collect::<Result<Vec<_>, _>>()?;
    let mut frame = vec![date_column(columns::DATE, &dates)?];
    for label in labels {
        let values: Vec<Option<f64>> = table.values().map(|row| row.get(&label).copied()).collect();
        frame.push(Column::new(label.to_string().into(), values));
    }
    Ok(DataFrame::new(frame)?)
}
