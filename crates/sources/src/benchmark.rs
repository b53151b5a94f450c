//! Benchmark test-asset returns.
//!
//! The benchmark factor file carries twenty bond portfolios on a monthly
//! `yyyymm` grid: `US_bonds_1..10` are treasury deciles and
//! `US_bonds_11..20` the corporate yield-spread deciles.

use nozawa_primitives::{DecileLabel, columns};
use nozawa_traits::SourceError;
use nozawa_utils::{date_column, has_column, parse_year_month_column};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::float;

/// Configuration for benchmark file processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Year-month column of the raw file.
    pub date_column: String,
    /// Prefix of the test-asset columns.
    pub column_prefix: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            date_column: columns::BENCHMARK_YYYYMM.to_string(),
            column_prefix: columns::BENCHMARK_PREFIX.to_string(),
        }
    }
}

/// The two benchmark groups, each dated at month end.
#[derive(Debug, Clone)]
pub struct BenchmarkSeries {
    /// `date` plus `US_bonds_1..10`.
    pub treasury: DataFrame,
    /// `date` plus `US_bonds_11..20`.
    pub corporate: DataFrame,
}

/// Split the raw benchmark file into treasury and corporate decile series.
///
/// `yyyymm` becomes `date` rolled to the last day of the month. Columns are
/// grouped by their numeric suffix, and each group independently drops the
/// rows where every one of its columns is missing.
///
/// # Errors
/// Returns `SourceError::MissingColumn` if the date column or every corporate
/// decile column is absent, and `SourceError::Utils` for malformed year-months.
pub fn process_benchmark_factors(
    raw: &DataFrame,
    config: &BenchmarkConfig,
) -> Result<BenchmarkSeries, SourceError> {
    let dates = parse_year_month_column(raw, &config.date_column)?;
    let mut df = raw.clone();
    df.with_column(date_column(columns::DATE, &dates)?)?;

    let prefix = &config.column_prefix;
    let treasury_cols: Vec<String> =
        (1..=10).map(|n| format!("{prefix}{n}")).filter(|c| has_column(&df, c)).collect();
    let corporate_cols: Vec<String> = DecileLabel::all()
        .map(|label| label.benchmark_column(prefix))
        .filter(|c| has_column(&df, c))
        .collect();

    if corporate_cols.is_empty() {
        return Err(SourceError::MissingColumn(DecileLabel::FIRST.benchmark_column(prefix)));
    }

    let treasury = benchmark_group(&df, &treasury_cols)?;
    let corporate = benchmark_group(&df, &corporate_cols)?;

    debug!(
        treasury_rows = treasury.height(),
        corporate_rows = corporate.height(),
        "processed benchmark factors"
    );
    Ok(BenchmarkSeries { treasury, corporate })
}

/// `date` plus `group` as floats, without rows where the whole group is missing.
fn benchmark_group(df: &DataFrame, group: &[String]) -> Result<DataFrame, SourceError> {
    let mut selection = vec![col(columns::DATE)];
    selection.extend(group.iter().map(|c| float(c)));

    let lf = df.clone().lazy().select(selection);
    let any_present = group
        .iter()
        .map(|c| col(c.as_str()).is_not_null().and(col(c.as_str()).is_not_nan()))
        .reduce(|acc, present| acc.or(present));

    let result = match any_present {
        Some(mask) => lf.filter(mask).collect()?,
        None => lf.filter(lit(false)).collect()?,
    };
    Ok(result)
}
