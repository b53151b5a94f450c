//! Per-series summaries and plot-ready return paths.

use nozawa_math::{cumulative_path, cumulative_return, mean, std_dev};
use nozawa_primitives::{Date, SeriesSummary, columns};
use nozawa_utils::{date_column, date_values, require_columns};
use polars::prelude::*;

use crate::ModelError;

/// Values of every non-date column as `f64`, with the column name.
fn series_columns(frame: &DataFrame) -> Result<Vec<(String, Vec<Option<f64>>)>, ModelError> {
    frame
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != columns::DATE)
        .map(|c| {
            let values = c.cast(&DataType::Float64)?.f64()?.into_iter().collect();
            Ok((c.name().to_string(), values))
        })
        .collect()
}

fn valid(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Mean, sample standard deviation, cumulative return and date range of
/// every non-date column.
///
/// Only valid (non-missing, non-NaN) observations count. A column without
/// any valid observation gets an all-missing summary.
///
/// # Errors
/// Returns `ModelError::MissingColumn` if `frame` lacks `date`.
pub fn summary_statistics(frame: &DataFrame) -> Result<Vec<SeriesSummary>, ModelError> {
    require_columns(frame, &[columns::DATE])?;
    let dates = date_values(frame, columns::DATE)?;

    series_columns(frame)?
        .into_iter()
        .map(|(series, values)| {
            let (observed_dates, observed): (Vec<Option<Date>>, Vec<f64>) = dates
                .iter()
                .zip(values)
                .filter_map(|(date, value)| valid(value).map(|v| (*date, v)))
                .unzip();
            let observed_dates = observed_dates.into_iter().flatten();

            Ok(SeriesSummary {
                series,
                mean: mean(&observed),
                std: std_dev(&observed, 1),
                cumulative_return: cumulative_return(&observed),
                start_date: observed_dates.clone().min(),
                end_date: observed_dates.max(),
            })
        })
        .collect()
}

/// One row per summary: `series, mean, std, cumulative_return, start_date,
/// end_date`.
///
/// # Errors
/// Returns a polars error if the frame cannot be built.
pub fn summary_frame(summaries: &[SeriesSummary]) -> Result<DataFrame, ModelError> {
    let starts: Vec<Option<Date>> = summaries.iter().map(|s| s.start_date).collect();
    let ends: Vec<Option<Date>> = summaries.iter().map(|s| s.end_date).collect();

    Ok(DataFrame::new(vec![
        Column::new("series".into(), summaries.iter().map(|s| s.series.as_str()).collect::<Vec<_>>()),
        Column::new("mean".into(), summaries.iter().map(|s| s.mean).collect::<Vec<_>>()),
        Column::new("std".into(), summaries.iter().map(|s| s.std).collect::<Vec<_>>()),
        Column::new(
            "cumulative_return".into(),
            summaries.iter().map(|s| s.cumulative_return).collect::<Vec<_>>(),
        ),
        date_column("start_date", &starts)?,
        date_column("end_date", &ends)?,
    ])?)
}

/// Running compounded return of every non-date column, sorted by date.
///
/// A missing observation stays missing in the path and leaves the running
/// product untouched for later dates.
///
/// # Errors
/// Returns `ModelError::MissingColumn` if `frame` lacks `date`.
pub fn cumulative_return_paths(frame: &DataFrame) -> Result<DataFrame, ModelError> {
    require_columns(frame, &[columns::DATE])?;
    let sorted = frame
        .clone()
        .lazy()
        .sort([columns::DATE], SortMultipleOptions::new().with_maintain_order(true))
        .collect()?;

    let mut paths = vec![sorted.column(columns::DATE)?.clone()];
    for (name, values) in series_columns(&sorted)? {
        let observed: Vec<f64> = values.iter().filter_map(|v| valid(*v)).collect();
        let mut compounded = cumulative_path(&observed).into_iter();
        let path: Vec<Option<f64>> =
            values.into_iter().map(|v| valid(v).and_then(|_| compounded.next())).collect();
        paths.push(Column::new(name.into(), path));
    }
    Ok(DataFrame::new(paths)?)
}

/// Cross-sectional mean of `yield` and `tr_ytm_match` per date.
///
/// # Errors
/// Returns `ModelError::MissingColumn` if a required column is absent.
pub fn average_yields(merged: &DataFrame) -> Result<DataFrame, ModelError> {
    require_columns(merged, &[columns::DATE, columns::YIELD, columns::TREASURY_YTM])?;

    Ok(merged
        .clone()
        .lazy()
        .filter(col(columns::DATE).is_not_null())
        .group_by([col(columns::DATE)])
        .agg([
            col(columns::YIELD).cast(DataType::Float64).mean(),
            col(columns::TREASURY_YTM).cast(DataType::Float64).mean(),
        ])
        .sort([columns::DATE], SortMultipleOptions::default())
        .collect()?)
}
