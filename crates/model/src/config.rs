//! Portfolio and analysis configuration.

use nozawa_primitives::columns;
use serde::{Deserialize, Serialize};

/// How a bond without a forward return enters its portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReturnPolicy {
    /// The bond keeps its weight and contributes zero return.
    ///
    /// A portfolio whose bonds all lack forward returns earns 0.0.
    #[default]
    ZeroContribution,
    /// The bond is left out of both the weights and the return.
    ///
    /// A portfolio whose bonds all lack forward returns is missing.
    Renormalize,
}

/// Configuration for decile assignment and portfolio returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Treatment of missing forward returns.
    pub missing_returns: MissingReturnPolicy,
    /// Factor applied to negative amounts outstanding.
    pub negative_outstanding_scale: f64,
    /// Drop the most recent date, whose forward return is undefined.
    pub drop_last_period: bool,
    /// Months added to each date of the normalized table.
    pub normalized_month_offset: u32,
    /// Roll normalized dates to the last day of their month.
    pub snap_to_month_end: bool,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            missing_returns: MissingReturnPolicy::ZeroContribution,
            negative_outstanding_scale: -0.001,
            drop_last_period: true,
            normalized_month_offset: 1,
            snap_to_month_end: false,
        }
    }
}

/// Configuration for the benchmark comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Prefix of the benchmark decile columns.
    pub benchmark_prefix: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { benchmark_prefix: columns::BENCHMARK_PREFIX.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_config_defaults() {
        let config = PortfolioConfig::default();
        assert_eq!(config.missing_returns, MissingReturnPolicy::ZeroContribution);
        assert!((config.negative_outstanding_scale + 0.001).abs() < 1e-15);
        assert!(config.drop_last_period);
        assert_eq!(config.normalized_month_offset, 1);
        assert!(!config.snap_to_month_end);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: PortfolioConfig =
            serde_json::from_str(r#"{ "missing_returns": "renormalize" }"#).unwrap();
        assert_eq!(config.missing_returns, MissingReturnPolicy::Renormalize);
        assert!(config.drop_last_period);

        let analysis: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(analysis.benchmark_prefix, "US_bonds_");
    }
}
