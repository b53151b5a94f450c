//! Nozawa yield-spread decile replication.
//!
//! Reads the treasury-matched bond file, the bond characteristics file and
//! the benchmark factor file, builds the decile portfolios and writes every
//! intermediate and result table as CSV.
//!
//! Usage: `cargo run --features cli --bin replicate -- [--config settings.json] [--data-dir DIR] [--output-dir DIR]`
//! Example: `cargo run --features cli --bin replicate -- --start 2002-07-01 --end 2022-12-31`

mod io;
mod settings;

use std::{path::PathBuf, process};

use chrono::NaiveDate;
use clap::Parser;
use nozawa::{
    model::{
        DecileAnalyzer, DecilePortfolioBuilder, ModelError, align_to_start, analysis_frame, average_yields,
        cumulative_return_paths, process_all_data, split_decile_returns, summary_frame, summary_statistics,
    },
    sources::process_benchmark_factors,
};
use polars::prelude::DataFrame;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    io::{read_text_csv, write_csv},
    settings::{Settings, parse_cli_date},
};

#[derive(Debug, Parser)]
#[command(name = "replicate")]
#[command(about = "Replicate the Nozawa corporate bond yield-spread decile portfolios", long_about = None)]
#[command(version)]
pub(crate) struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the raw input files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory receiving the output tables
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// First bond observation date kept (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    start: Option<NaiveDate>,

    /// Last bond observation date kept (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    end: Option<NaiveDate>,

    /// Roll normalized decile return dates to month end
    #[arg(long)]
    snap_to_month_end: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?.with_args(&args);
    std::fs::create_dir_all(&settings.output_dir)?;

    let treasury_raw = read_text_csv(&settings.data_path(&settings.treasury_file))?;
    let bond_raw = read_text_csv(&settings.data_path(&settings.bond_returns_file))?;
    let benchmark_raw = read_text_csv(&settings.data_path(&settings.benchmark_file))?;

    let data = process_all_data(treasury_raw, bond_raw, &settings.pipeline)?;
    write_csv(&data.merged, &settings.output_path("merged_bond_data.csv"))?;
    write_csv(&average_yields(&data.merged)?, &settings.output_path("avg_yields.csv"))?;

    let builder = DecilePortfolioBuilder::with_config(settings.pipeline.portfolio.clone());
    let returns = builder.calculate_decile_returns(&data.merged)?;
    write_csv(&returns.forward, &settings.output_path("nozawa_decile_returns_fwd.csv"))?;
    write_csv(&returns.normalized, &settings.output_path("nozawa_decile_returns.csv"))?;
    write_csv(&cumulative_return_paths(&returns.normalized)?, &settings.output_path("cumulative_returns.csv"))?;

    let benchmark = process_benchmark_factors(&benchmark_raw, &settings.benchmark)?;
    write_csv(&benchmark.corporate, &settings.output_path("us_corp_bonds.csv"))?;

    let split = split_decile_returns(&returns.normalized, &benchmark.corporate)?;
    write_csv(&split.replication, &settings.output_path("nozawa_replication.csv"))?;
    write_csv(&split.out_of_sample, &settings.output_path("nozawa_updated.csv"))?;

    let analyzer = DecileAnalyzer::with_config(settings.analysis.clone());
    let records = analyzer.calculate_decile_analysis(&returns.normalized, &benchmark.corporate)?;
    write_csv(&analysis_frame(&records)?, &settings.output_path("analysis.csv"))?;

    let aligned = align_to_start(&benchmark.corporate, &split.replication)?;
    let replication_summary = summarize(&analyzer.comparison_frame(&split.replication, &aligned)?)?;
    write_csv(&replication_summary, &settings.output_path("summary_replication.csv"))?;
    write_csv(&summarize(&split.out_of_sample)?, &settings.output_path("summary_updated.csv"))?;

    info!(
        output_dir = %settings.output_dir.display(),
        cutoff = %split.cutoff,
        replication = split.replication.height(),
        out_of_sample = split.out_of_sample.height(),
        "replication complete"
    );
    Ok(())
}

fn summarize(frame: &DataFrame) -> Result<DataFrame, ModelError> {
    summary_frame(&summary_statistics(frame)?)
}
