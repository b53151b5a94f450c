//! Run settings: JSON file first, command-line overrides second.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use nozawa::{
    model::{AnalysisConfig, PipelineConfig},
    sources::BenchmarkConfig,
};
use serde::{Deserialize, Serialize};

use crate::Args;

/// Everything a replication run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Directory holding the raw input files.
    pub(crate) data_dir: PathBuf,
    /// Directory receiving every output table.
    pub(crate) output_dir: PathBuf,
    /// Treasury-matched bond file name.
    pub(crate) treasury_file: String,
    /// Bond characteristics file name.
    pub(crate) bond_returns_file: String,
    /// Benchmark factor file name.
    pub(crate) benchmark_file: String,
    /// Normalization, merge and decile settings.
    pub(crate) pipeline: PipelineConfig,
    /// Benchmark file settings.
    pub(crate) benchmark: BenchmarkConfig,
    /// Analysis settings.
    pub(crate) analysis: AnalysisConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("_data"),
            output_dir: PathBuf::from("_output"),
            treasury_file: "bondret_treasury.csv".to_string(),
            bond_returns_file: "CRSP_bond_returns.csv".to_string(),
            benchmark_file: "He_Kelly_Manela_Factors_And_Test_Assets_monthly.csv".to_string(),
            pipeline: PipelineConfig::default(),
            benchmark: BenchmarkConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Settings {
    /// Defaults, or the JSON file at `path` with missing keys defaulted.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&text)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply the command-line overrides.
    pub(crate) fn with_args(mut self, args: &Args) -> Self {
        if let Some(dir) = &args.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(start) = args.start {
            self.pipeline.sample_start = Some(start);
        }
        if let Some(end) = args.end {
            self.pipeline.sample_end = Some(end);
        }
        if args.snap_to_month_end {
            self.pipeline.portfolio.snap_to_month_end = true;
        }
        self
    }

    pub(crate) fn data_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub(crate) fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

/// `YYYY-MM-DD` command-line dates.
pub(crate) fn parse_cli_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("invalid date {value:?}: {e}"))
}
