//! Shared column builders for the normalizers.

use chrono::Datelike;
use nozawa_primitives::{BondDateKey, Cusip, columns};
use nozawa_traits::SourceError;
use nozawa_utils::date_values;
use polars::prelude::*;

/// Build the `cusip_date` key column from an identifier and a parsed date column.
///
/// Rows missing either part get a null key.
pub(crate) fn composite_keys(
    df: &DataFrame,
    id_col: &str,
    date_col: &str,
) -> Result<Column, SourceError> {
    let ids = df.column(id_col)?.cast(&DataType::String)?;
    let dates = date_values(df, date_col)?;

    let keys: Vec<Option<String>> = ids
        .str()?
        .into_iter()
        .zip(dates)
        .map(|(id, date)| match (id, date) {
            (Some(id), Some(date)) => Some(BondDateKey::new(Cusip::from(id), date).to_string()),
            _ => None,
        })
        .collect();

    Ok(Column::new(columns::CUSIP_DATE.into(), keys))
}

/// Calendar year of each parsed date, as `Int32`.
pub(crate) fn year_column(df: &DataFrame, date_col: &str) -> Result<Column, SourceError> {
    let years: Vec<Option<i32>> =
        date_values(df, date_col)?.into_iter().map(|d| d.map(|d| d.year())).collect();
    Ok(Column::new(columns::YEAR.into(), years))
}

/// Cast a column to `Float64`; unparsable text becomes null.
pub(crate) fn float(name: &str) -> Expr {
    col(name).cast(DataType::Float64)
}

/// Cast a percentage column to `Float64` and divide by `scale`.
pub(crate) fn rescaled(name: &str, scale: f64) -> Expr {
    (float(name) / lit(scale)).alias(name)
}

#[cfg(test)]
mod tests {
    use nozawa_utils::date_column;

    use super::*;

    #[test]
    fn keys_join_identifier_and_date() {
        let dates = [
            nozawa_primitives::Date::from_ymd_opt(2020, 1, 31),
            None,
            nozawa_primitives::Date::from_ymd_opt(2020, 2, 29),
        ];
        let df = DataFrame::new(vec![
            Column::new("CUSIP".into(), &[Some("00077TAA2"), Some("B"), None]),
            date_column("DATE", &dates).unwrap(),
        ])
        .unwrap();

        let keys = composite_keys(&df, "CUSIP", "DATE").unwrap();
        let keys: Vec<Option<&str>> = keys.str().unwrap().into_iter().collect();
        assert_eq!(keys, vec![Some("00077TAA2_20200131"), None, None]);
    }
}
