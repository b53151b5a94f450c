//! Date parsing and calendar arithmetic.
//!
//! Polars stores `Date` columns as days since 1970-01-01 in an `Int32`
//! physical array; the helpers here convert between that and [`Date`].

use chrono::{Datelike, Months};
use nozawa_primitives::Date;
use polars::prelude::*;

use crate::{UtilsError, require_columns};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a date to polars' physical day count.
#[must_use]
pub fn date_to_days(date: Date) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Convert polars' physical day count to a date.
#[must_use]
pub fn days_to_date(days: i32) -> Option<Date> {
    days.checked_add(EPOCH_DAYS_FROM_CE).and_then(Date::from_num_days_from_ce_opt)
}

/// Last calendar day of the month containing `date`.
#[must_use]
pub fn month_end(date: Date) -> Date {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Shift a date by whole calendar months, clamping to the target month's last day.
///
/// 2020-01-31 plus one month is 2020-02-29.
#[must_use]
pub fn add_months(date: Date, months: u32) -> Option<Date> {
    date.checked_add_months(Months::new(months))
}

/// Parse one date value strictly.
///
/// # Errors
/// Returns `UtilsError::InvalidDate` if `value` does not match `format`.
pub fn parse_date(value: &str, format: &str, column: &str) -> Result<Date, UtilsError> {
    Date::parse_from_str(value.trim(), format).map_err(|_| UtilsError::InvalidDate {
        column: column.to_string(),
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// Parse a `YYYYMM` value and roll it to the last day of that month.
///
/// # Errors
/// Returns `UtilsError::InvalidDate` if `value` is not a valid year-month.
pub fn parse_year_month_end(value: &str, column: &str) -> Result<Date, UtilsError> {
    let first = parse_date(&format!("{}01", value.trim()), "%Y%m%d", column).map_err(|_| {
        UtilsError::InvalidDate {
            column: column.to_string(),
            value: value.to_string(),
            format: "%Y%m".to_string(),
        }
    })?;
    Ok(month_end(first))
}

/// Build a polars `Date` column from optional dates.
///
/// # Errors
/// Returns an error if the cast to `Date` fails.
pub fn date_column(name: &str, dates: &[Option<Date>]) -> Result<Column, UtilsError> {
    let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(date_to_days)).collect();
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    Ok(Column::from(series))
}

/// Physical day counts of a date-like column.
///
/// `Datetime` columns are truncated to their calendar date.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if the column is absent, or a polars
/// error if it cannot be cast to `Date`.
pub fn day_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>, UtilsError> {
    require_columns(df, &[name])?;
    let physical = df.column(name)?.cast(&DataType::Date)?.cast(&DataType::Int32)?;
    Ok(physical.i32()?.into_iter().collect())
}

/// Dates of a date-like column.
///
/// # Errors
/// Same conditions as [`day_values`].
pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<Date>>, UtilsError> {
    Ok(day_values(df, name)?.into_iter().map(|d| d.and_then(days_to_date)).collect())
}

/// Parse a raw date column into a polars `Date` column of the same name.
///
/// `Date` columns pass through, `Datetime` columns are truncated, and
/// anything else is rendered as text and parsed with `format`. Nulls and
/// blank strings stay null; every other value must parse.
///
/// # Errors
/// Returns `UtilsError::InvalidDate` on the first malformed value.
pub fn parse_date_column(df: &DataFrame, name: &str, format: &str) -> Result<Column, UtilsError> {
    require_columns(df, &[name])?;
    let column = df.column(name)?;

    match column.dtype() {
        DataType::Date => Ok(column.clone()),
        DataType::Datetime(_, _) => Ok(column.cast(&DataType::Date)?),
        _ => {
            let text = column.cast(&DataType::String)?;
            let dates = text
                .str()?
                .into_iter()
                .map(|value| match value {
                    Some(v) if !v.trim().is_empty() => parse_date(v, format, name).map(Some),
                    _ => Ok(None),
                })
                .collect::<Result<Vec<_>, _>>()?;
            date_column(name, &dates)
        }
    }
}

/// Parse a raw `YYYYMM` column into month-end dates.
///
/// # Errors
/// Returns `UtilsError::InvalidDate` on the first malformed value.
pub fn parse_year_month_column(df: &DataFrame, name: &str) -> Result<Vec<Option<Date>>, UtilsError> {
    require_columns(df, &[name])?;
    let text = df.column(name)?.cast(&DataType::String)?;
    text.str()?
        .into_iter()
        .map(|value| match value {
            Some(v) if !v.trim().is_empty() => parse_year_month_end(v, name).map(Some),
            _ => Ok(None),
        })
        .collect()
}

/// Keep rows whose `date_col` falls inside the inclusive window.
///
/// An open bound (`None`) does not filter.
pub fn restrict_to_window(
    df: LazyFrame,
    date_col: &str,
    start: Option<Date>,
    end: Option<Date>,
) -> LazyFrame {
    let mut lf = df;
    if let Some(start) = start {
        lf = lf.filter(col(date_col).gt_eq(lit(date_to_days(start)).cast(DataType::Date)));
    }
    if let Some(end) = end {
        lf = lf.filter(col(date_col).lt_eq(lit(date_to_days(end)).cast(DataType::Date)));
    }
    lf
}
