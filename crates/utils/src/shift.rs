//! Forward-looking values within partitions.

use polars::prelude::*;

/// Attach the next period's value of `target` to each row.
///
/// Rows are sorted by `sort_cols` (stable), then `target` is shifted one row
/// back within each `over_col` partition. The last row of every partition
/// has no successor and receives null.
///
/// # Arguments
/// * `df` - Input LazyFrame
/// * `target` - Column to look ahead on (typically the period return)
/// * `sort_cols` - Columns to sort by (typically identifier, then date)
/// * `over_col` - Column to partition by (typically the identifier)
/// * `alias` - Name of the forward column
///
/// # Returns
/// LazyFrame with the forward column appended.
pub fn forward_values(
    df: LazyFrame,
    target: &str,
    sort_cols: &[&str],
    over_col: &str,
    alias: &str,
) -> LazyFrame {
    let sort_options = SortMultipleOptions::new().with_maintain_order(true).with_nulls_last(true);

    df.sort(sort_cols.to_vec(), sort_options)
        .with_column(col(target).shift(lit(-1)).over([col(over_col)]).alias(alias))
}
