//! Analysis output records.

use serde::{Deserialize, Serialize};

use crate::{Date, DecileLabel};

/// Fit of one replicated decile series against its benchmark.
///
/// Every metric is `None` when the two series share no valid observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Decile being compared.
    pub decile: DecileLabel,
    /// Pearson correlation.
    pub correlation: Option<f64>,
    /// Squared correlation.
    pub r_squared: Option<f64>,
    /// Slope of benchmark regressed on replication.
    pub slope: Option<f64>,
    /// Intercept of benchmark regressed on replication.
    pub intercept: Option<f64>,
    /// Mean absolute regression residual.
    pub mae: Option<f64>,
    /// Root mean squared regression residual.
    pub rmse: Option<f64>,
    /// Population standard deviation of benchmark minus replication.
    pub tracking_error: Option<f64>,
}

impl AnalysisRecord {
    /// Record with every metric missing.
    #[must_use]
    pub const fn missing(decile: DecileLabel) -> Self {
        Self {
            decile,
            correlation: None,
            r_squared: None,
            slope: None,
            intercept: None,
            mae: None,
            rmse: None,
            tracking_error: None,
        }
    }

    /// Whether every metric is missing.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.correlation.is_none()
            && self.r_squared.is_none()
            && self.slope.is_none()
            && self.intercept.is_none()
            && self.mae.is_none()
            && self.rmse.is_none()
            && self.tracking_error.is_none()
    }
}

/// Descriptive statistics of one return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Column name of the series.
    pub series: String,
    /// Mean of valid observations.
    pub mean: Option<f64>,
    /// Sample standard deviation of valid observations.
    pub std: Option<f64>,
    /// Product of (1 + r) over valid observations, minus one.
    pub cumulative_return: Option<f64>,
    /// First date with a valid observation.
    pub start_date: Option<Date>,
    /// Last date with a valid observation.
    pub end_date: Option<Date>,
}
