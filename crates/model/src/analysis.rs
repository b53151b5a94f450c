//! Fit of replicated decile returns against the benchmark.

use ndarray::Array1;
use nozawa_math::{linear_fit, mean_absolute, pearson, root_mean_square, std_dev};
use nozawa_primitives::{AnalysisRecord, DecileLabel, columns};
use nozawa_utils::{has_column, require_columns};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::{AnalysisConfig, ModelError};

/// Compares replicated decile returns with benchmark decile returns.
#[derive(Debug, Clone, Default)]
pub struct DecileAnalyzer {
    config: AnalysisConfig,
}

impl DecileAnalyzer {
    /// Create a new analyzer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create a new analyzer with custom configuration.
    #[must_use]
    pub const fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Dates present in both frames, with the replicated decile columns
    /// followed by the matching benchmark columns.
    ///
    /// # Errors
    /// Returns `ModelError::MissingColumn` if either frame lacks `date`.
    pub fn comparison_frame(
        &self,
        replicated: &DataFrame,
        benchmark: &DataFrame,
    ) -> Result<DataFrame, ModelError> {
        require_columns(replicated, &[columns::DATE])?;
        require_columns(benchmark, &[columns::DATE])?;

        let mut left = vec![col(columns::DATE)];
        let mut right = vec![col(columns::DATE)];
        for label in DecileLabel::all() {
            let rep = label.to_string();
            let bench = label.benchmark_column(&self.config.benchmark_prefix);
            if has_column(replicated, &rep) {
                left.push(col(rep.as_str()).cast(DataType::Float64));
            }
            if has_column(benchmark, &bench) {
                right.push(col(bench.as_str()).cast(DataType::Float64));
            }
        }

        Ok(replicated
            .clone()
            .lazy()
            .select(left)
            .join(
                benchmark.clone().lazy().select(right),
                [col(columns::DATE)],
                [col(columns::DATE)],
                JoinArgs::new(JoinType::Inner),
            )
            .sort([columns::DATE], SortMultipleOptions::default())
            .collect()?)
    }

    /// Fit statistics for every decile label 11..=20.
    ///
    /// A decile whose replicated or benchmark column is absent, or whose two
    /// series share no date with both values present, gets an all-missing
    /// record. For the rest the benchmark is regressed on the replication:
    ///
    /// - correlation and R² of the two series,
    /// - slope and intercept of the least-squares line,
    /// - MAE and RMSE of the line's residuals,
    /// - tracking error, the population standard deviation of
    ///   `benchmark - replicated`.
    ///
    /// With a single overlapping date only the tracking error is defined. A
    /// constant replication leaves the correlation and the fit undefined; a
    /// constant benchmark leaves only the correlation and R² undefined.
    ///
    /// # Errors
    /// Returns `ModelError::MissingColumn` if either frame lacks `date`.
    pub fn calculate_decile_analysis(
        &self,
        replicated: &DataFrame,
        benchmark: &DataFrame,
    ) -> Result<Vec<AnalysisRecord>, ModelError> {
        let common = self.comparison_frame(replicated, benchmark)?;
        debug!(overlapping_dates = common.height(), "joined replication with benchmark");

        DecileLabel::all()
            .map(|label| match self.decile_pairs(&common, label) {
                Ok((x, y)) => Ok(decile_metrics(label, &x, &y)),
                Err(err) if err.is_recoverable() => {
                    warn!(%err, "no analysis for decile");
                    Ok(AnalysisRecord::missing(label))
                }
                Err(err) => Err(err),
            })
            .collect()
    }

    /// Replicated and benchmark values on dates where both are valid.
    fn decile_pairs(
        &self,
        common: &DataFrame,
        label: DecileLabel,
    ) -> Result<(Vec<f64>, Vec<f64>), ModelError> {
        let rep = label.to_string();
        let bench = label.benchmark_column(&self.config.benchmark_prefix);
        if !has_column(common, &rep) || !has_column(common, &bench) {
            return Err(ModelError::NoOverlap(rep));
        }

        let (x, y): (Vec<f64>, Vec<f64>) = common
            .column(&rep)?
            .f64()?
            .into_iter()
            .zip(common.column(&bench)?.f64()?.into_iter())
            .filter_map(|pair| match pair {
                (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some((x, y)),
                _ => None,
            })
            .unzip();

        if x.is_empty() {
            return Err(ModelError::NoOverlap(rep));
        }
        Ok((x, y))
    }
}

/// Metrics of one decile from aligned, valid observation pairs.
fn decile_metrics(decile: DecileLabel, replicated: &[f64], benchmark: &[f64]) -> AnalysisRecord {
    let differences: Vec<f64> = benchmark.iter().zip(replicated).map(|(y, x)| y - x).collect();
    let tracking_error = std_dev(&differences, 0);

    let correlation = pearson(replicated, benchmark).ok();
    let fit = linear_fit(&Array1::from_vec(replicated.to_vec()), &Array1::from_vec(benchmark.to_vec())).ok();
    let residuals = fit.as_ref().map(|fit| fit.residuals.to_vec());

    AnalysisRecord {
        decile,
        correlation,
        r_squared: correlation.map(|c| c * c),
        slope: fit.as_ref().map(|fit| fit.slope),
        intercept: fit.as_ref().map(|fit| fit.intercept),
        mae: residuals.as_deref().and_then(mean_absolute),
        rmse: residuals.as_deref().and_then(root_mean_square),
        tracking_error,
    }
}

/// One row per analysis record.
///
/// # Errors
/// Returns a polars error if the frame cannot be built.
pub fn analysis_frame(records: &[AnalysisRecord]) -> Result<DataFrame, ModelError> {
    let metric = |name: &str, f: fn(&AnalysisRecord) -> Option<f64>| {
        Column::new(name.into(), records.iter().map(f).collect::<Vec<_>>())
    };

    Ok(DataFrame::new(vec![
        Column::new(
            columns::DECILE.into(),
            records.iter().map(|r| i32::from(r.decile.value())).collect::<Vec<_>>(),
        ),
        metric("correlation", |r| r.correlation),
        metric("r_squared", |r| r.r_squared),
        metric("slope", |r| r.slope),
        metric("intercept", |r| r.intercept),
        metric("mae", |r| r.mae),
        metric("rmse", |r| r.rmse),
        metric("tracking_error", |r| r.tracking_error),
    ])?)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nozawa_primitives::Date;
    use nozawa_utils::date_column;

    use super::*;

    fn dates(n: usize) -> Vec<Option<Date>> {
        [(1, 31), (2, 29), (3, 31), (4, 30)][..n]
            .iter()
            .map(|&(m, d)| Date::from_ymd_opt(2020, m, d))
            .collect()
    }

    fn replicated() -> DataFrame {
        DataFrame::new(vec![
            date_column("date", &dates(3)).unwrap(),
            Column::new("11".into(), &[0.01, 0.02, 0.03]),
            Column::new("12".into(), &[Some(0.01), None, Some(0.01)]),
        ])
        .unwrap()
    }

    fn benchmark() -> DataFrame {
        DataFrame::new(vec![
            date_column("date", &dates(3)).unwrap(),
            Column::new("US_bonds_11".into(), &[0.02, 0.04, 0.06]),
            Column::new("US_bonds_12".into(), &[0.02, 0.03, 0.05]),
            Column::new("US_bonds_13".into(), &[0.02, 0.03, 0.05]),
        ])
        .unwrap()
    }

    fn record(records: &[AnalysisRecord], decile: u8) -> &AnalysisRecord {
        records.iter().find(|r| r.decile.value() == decile).unwrap()
    }

    #[test]
    fn perfect_linear_relation() {
        let records = DecileAnalyzer::new().calculate_decile_analysis(&replicated(), &benchmark()).unwrap();
        assert_eq!(records.len(), 10);

        let r = record(&records, 11);
        assert_relative_eq!(r.correlation.unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(r.r_squared.unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(r.slope.unwrap(), 2.0, epsilon = 1e-8);
        assert_relative_eq!(r.intercept.unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(r.mae.unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(r.rmse.unwrap(), 0.0, epsilon = 1e-10);
        // Differences equal the replication itself: population std of [0.01, 0.02, 0.03]
        assert_relative_eq!(r.tracking_error.unwrap(), (2.0_f64 / 3.0).sqrt() * 0.01, epsilon = 1e-12);
    }

    #[test]
    fn constant_replication_keeps_tracking_error() {
        let records = DecileAnalyzer::new().calculate_decile_analysis(&replicated(), &benchmark()).unwrap();

        // Decile 12 overlaps on two dates with a constant replicated return
        let r = record(&records, 12);
        assert!(r.correlation.is_none() && r.slope.is_none() && r.rmse.is_none());
        assert_relative_eq!(r.tracking_error.unwrap(), 0.015, epsilon = 1e-12);
    }

    #[test]
    fn constant_benchmark_keeps_the_fit() {
        let mut flat = benchmark();
        flat.with_column(Column::new("US_bonds_11".into(), &[0.02, 0.02, 0.02])).unwrap();
        let records = DecileAnalyzer::new().calculate_decile_analysis(&replicated(), &flat).unwrap();

        let r = record(&records, 11);
        assert!(r.correlation.is_none() && r.r_squared.is_none());
        assert_relative_eq!(r.slope.unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(r.intercept.unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(r.mae.unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(r.rmse.unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(r.tracking_error.unwrap(), (2.0_f64 / 3.0).sqrt() * 0.01, epsilon = 1e-12);
    }

    #[test]
    fn absent_columns_give_missing_records() {
        let records = DecileAnalyzer::new().calculate_decile_analysis(&replicated(), &benchmark()).unwrap();
        assert!(record(&records, 13).is_missing());
        assert!(record(&records, 20).is_missing());
    }

    #[test]
    fn disjoint_dates_never_raise() {
        let later = DataFrame::new(vec![
            date_column("date", &[Date::from_ymd_opt(2021, 1, 31)]).unwrap(),
            Column::new("US_bonds_11".into(), &[0.02]),
        ])
        .unwrap();

        let records = DecileAnalyzer::new().calculate_decile_analysis(&replicated(), &later).unwrap();
        assert!(records.iter().all(AnalysisRecord::is_missing));
    }

    #[test]
    fn comparison_frame_keeps_common_dates() {
        let extended = DataFrame::new(vec![
            date_column("date", &dates(4)).unwrap(),
            Column::new("US_bonds_11".into(), &[0.02, 0.04, 0.06, 0.08]),
        ])
        .unwrap();

        let common = DecileAnalyzer::new().comparison_frame(&replicated(), &extended).unwrap();
        assert_eq!(common.height(), 3);
        let names: Vec<&str> = common.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["date", "11", "12", "US_bonds_11"]);
    }

    #[test]
    fn analysis_frame_layout() {
        let records = DecileAnalyzer::new().calculate_decile_analysis(&replicated(), &benchmark()).unwrap();
        let frame = analysis_frame(&records).unwrap();

        assert_eq!(frame.shape(), (10, 8));
        let deciles: Vec<Option<i32>> = frame.column("decile").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(deciles.first(), Some(&Some(11)));
        assert_eq!(frame.column("slope").unwrap().null_count(), 9);
    }

    #[test]
    fn custom_benchmark_prefix() {
        let mut renamed = benchmark();
        renamed.rename("US_bonds_11", "HKM_11".into()).unwrap();
        // polars 0.46 `rename` leaves the cached schema stale; `lazy()` would still see the old name.
        renamed.clear_schema();
        let analyzer = DecileAnalyzer::with_config(AnalysisConfig { benchmark_prefix: "HKM_".to_string() });

        let records = analyzer.calculate_decile_analysis(&replicated(), &renamed).unwrap();
        assert!(!record(&records, 11).is_missing());
        assert!(record(&records, 12).is_missing());
    }
}
