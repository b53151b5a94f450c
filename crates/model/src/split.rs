//! Replication and out-of-sample partition of decile returns.

use nozawa_primitives::{Date, columns};
use nozawa_utils::{date_to_days, date_values, require_columns};
use polars::prelude::*;
use tracing::info;

use crate::ModelError;

/// Decile returns partitioned at the benchmark's last date.
#[derive(Debug, Clone)]
pub struct SplitSamples {
    /// Last benchmark date.
    pub cutoff: Date,
    /// Rows dated on or before the cutoff.
    pub replication: DataFrame,
    /// Rows dated after the cutoff.
    pub out_of_sample: DataFrame,
}

/// Split decile returns at the last date of the benchmark series.
///
/// Both halves are sorted by date; every input row lands in exactly one.
///
/// # Errors
/// Returns `ModelError::EmptyBenchmark` if the benchmark has no dates and
/// `ModelError::NullDate` if a decile return row has no date.
pub fn split_decile_returns(
    decile_returns: &DataFrame,
    benchmark: &DataFrame,
) -> Result<SplitSamples, ModelError> {
    require_columns(decile_returns, &[columns::DATE])?;
    let cutoff = date_values(benchmark, columns::DATE)?
        .into_iter()
        .flatten()
        .max()
        .ok_or(ModelError::EmptyBenchmark)?;

    if decile_returns.column(columns::DATE)?.null_count() > 0 {
        return Err(ModelError::NullDate(columns::DATE.to_string()));
    }

    let sorted = decile_returns
        .clone()
        .lazy()
        .sort([columns::DATE], SortMultipleOptions::new().with_maintain_order(true));
    let cutoff_lit = lit(date_to_days(cutoff)).cast(DataType::Date);

    let replication = sorted.clone().filter(col(columns::DATE).lt_eq(cutoff_lit.clone())).collect()?;
    let out_of_sample = sorted.filter(col(columns::DATE).gt(cutoff_lit)).collect()?;

    info!(
        %cutoff,
        replication = replication.height(),
        out_of_sample = out_of_sample.height(),
        "split decile returns"
    );
    Ok(SplitSamples { cutoff, replication, out_of_sample })
}

/// Keep benchmark rows dated on or after the first replication date.
///
/// An empty replication sample leaves no benchmark rows.
///
/// # Errors
/// Returns `ModelError::MissingColumn` if either frame lacks `date`.
pub fn align_to_start(benchmark: &DataFrame, replication: &DataFrame) -> Result<DataFrame, ModelError> {
    require_columns(benchmark, &[columns::DATE])?;
    let start = date_values(replication, columns::DATE)?.into_iter().flatten().min();

    let lf = benchmark.clone().lazy();
    let aligned = match start {
        Some(start) => lf.filter(col(columns::DATE).gt_eq(lit(date_to_days(start)).cast(DataType::Date))),
        None => lf.filter(lit(false)),
    };
    Ok(aligned.collect()?)
}

#[cfg(test)]
mod tests {
    use nozawa_utils::date_column;
    use rstest::rstest;

    use super::*;

    fn month_ends(months: &[(i32, u32, u32)]) -> Vec<Option<Date>> {
        months.iter().map(|&(y, m, d)| Date::from_ymd_opt(y, m, d)).collect()
    }

    fn returns() -> DataFrame {
        let dates = month_ends(&[(2012, 3, 31), (2012, 1, 31), (2012, 2, 29), (2012, 4, 30)]);
        DataFrame::new(vec![
            date_column("date", &dates).unwrap(),
            Column::new("11".into(), &[0.03, 0.01, 0.02, 0.04]),
        ])
        .unwrap()
    }

    fn benchmark(last: (i32, u32, u32)) -> DataFrame {
        let dates = month_ends(&[(2011, 12, 31), last]);
        DataFrame::new(vec![
            date_column("date", &dates).unwrap(),
            Column::new("US_bonds_11".into(), &[0.01, 0.02]),
        ])
        .unwrap()
    }

    #[rstest]
    #[case((2012, 2, 29), 2)]
    #[case((2011, 12, 31), 0)]
    #[case((2012, 4, 30), 4)]
    #[case((2012, 2, 15), 1)]
    fn partition_at_cutoff(#[case] last: (i32, u32, u32), #[case] n_replication: usize) {
        let split = split_decile_returns(&returns(), &benchmark(last)).unwrap();

        assert_eq!(split.replication.height(), n_replication);
        assert_eq!(split.replication.height() + split.out_of_sample.height(), 4);

        let rep = date_values(&split.replication, "date").unwrap();
        let oos = date_values(&split.out_of_sample, "date").unwrap();
        assert!(rep.iter().flatten().all(|d| *d <= split.cutoff));
        assert!(oos.iter().flatten().all(|d| *d > split.cutoff));
        assert!(rep.windows(2).all(|w| w[0] <= w[1]));
        assert!(oos.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn empty_benchmark_is_an_error() {
        let empty = benchmark((2012, 1, 31)).head(Some(0));
        assert!(matches!(split_decile_returns(&returns(), &empty), Err(ModelError::EmptyBenchmark)));
    }

    #[test]
    fn null_dates_are_an_error() {
        let dates = vec![Date::from_ymd_opt(2012, 1, 31), None];
        let df = DataFrame::new(vec![
            date_column("date", &dates).unwrap(),
            Column::new("11".into(), &[0.01, 0.02]),
        ])
        .unwrap();
        assert!(matches!(
            split_decile_returns(&df, &benchmark((2012, 1, 31))),
            Err(ModelError::NullDate(_))
        ));
    }

    #[test]
    fn align_drops_earlier_benchmark_rows() {
        let aligned = align_to_start(&benchmark((2012, 1, 31)), &returns()).unwrap();
        assert_eq!(date_values(&aligned, "date").unwrap(), month_ends(&[(2012, 1, 31)]));

        let none = align_to_start(&benchmark((2012, 1, 31)), &returns().head(Some(0))).unwrap();
        assert_eq!(none.height(), 0);
    }
}
