//! Column bookkeeping helpers.

use polars::prelude::*;

use crate::UtilsError;

/// Check that every required column is present.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` naming the first absent column.
pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), UtilsError> {
    match required.iter().find(|name| df.column(name).is_err()) {
        Some(missing) => Err(UtilsError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}

/// Whether `df` has a column called `name`.
#[must_use]
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Reorder columns so `front` comes first, keeping the rest in place.
///
/// Names in `front` that are absent from `df` are skipped.
///
/// # Errors
/// Returns a polars error if the selection fails.
pub fn move_columns_to_front(df: &DataFrame, front: &[&str]) -> Result<DataFrame, UtilsError> {
    let present: Vec<String> =
        df.get_column_names().iter().map(|name| name.to_string()).collect();

    let mut order: Vec<String> = front
        .iter()
        .filter(|name| present.iter().any(|p| p == *name))
        .map(|name| (*name).to_string())
        .collect();
    order.extend(present.into_iter().filter(|name| !front.contains(&name.as_str())));

    Ok(df.select(order)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_columns_reports_first_missing() {
        let df = df! { "a" => &[1], "b" => &[2] }.unwrap();
        assert!(require_columns(&df, &["a", "b"]).is_ok());
        assert!(has_column(&df, "b") && !has_column(&df, "c"));
        match require_columns(&df, &["a", "c", "d"]) {
            Err(UtilsError::MissingColumn(name)) => assert_eq!(name, "c"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn move_columns_to_front_keeps_rest_in_order() {
        let df = df! {
            "x" => &[1], "date" => &[2], "y" => &[3], "cusip" => &[4],
        }
        .unwrap();

        let moved = move_columns_to_front(&df, &["date", "cusip", "cusip_date"]).unwrap();
        let names: Vec<String> =
            moved.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["date", "cusip", "x", "y"]);
    }
}
