//! Benchmarks for decile assignment and portfolio returns.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nozawa_model::{DecilePortfolioBuilder, PortfolioConfig, process_merged_bond_data};
use nozawa_primitives::Date;
use nozawa_utils::date_column;
use polars::prelude::*;
use rand::Rng;

/// Merged-style frame with `n_bonds` bonds observed over `n_months` month ends.
fn random_merged(n_bonds: usize, n_months: u32) -> DataFrame {
    let mut rng = rand::thread_rng();
    let start = Date::from_ymd_opt(2003, 1, 1).unwrap_or_default();

    let mut dates = Vec::new();
    for month in 0..n_months {
        let date = nozawa_utils::add_months(start, month).map(nozawa_utils::month_end);
        dates.extend(std::iter::repeat_n(date, n_bonds));
    }
    let n = dates.len();

    DataFrame::new(vec![
        date_column("date", &dates).unwrap(),
        Column::new("yield".into(), (0..n).map(|_| rng.r#gen::<f64>() * 0.08 + 0.01).collect::<Vec<_>>()),
        Column::new("tr_ytm_match".into(), (0..n).map(|_| rng.r#gen::<f64>() * 0.03).collect::<Vec<_>>()),
        Column::new(
            "amount_outstanding".into(),
            (0..n).map(|_| rng.r#gen::<f64>() * 1e6 + 1e4).collect::<Vec<_>>(),
        ),
        Column::new("ret_eom_fwd".into(), (0..n).map(|_| rng.r#gen::<f64>() * 0.04 - 0.02).collect::<Vec<_>>()),
    ])
    .unwrap()
}

fn bench_decile_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("decile_assignment");
    group.sample_size(30);

    let scenarios = [(200, 12, "small"), (1000, 24, "medium"), (3000, 60, "full_trace_era")];

    for (n_bonds, n_months, name) in scenarios {
        group.throughput(Throughput::Elements((n_bonds * n_months as usize) as u64));
        group.bench_with_input(BenchmarkId::new("scenario", name), &(n_bonds, n_months), |b, &(n_bonds, n_months)| {
            let merged = random_merged(n_bonds, n_months);
            let config = PortfolioConfig::default();
            b.iter(|| process_merged_bond_data(black_box(&merged), black_box(&config)).unwrap());
        });
    }

    group.finish();
}

fn bench_decile_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("decile_returns");
    group.sample_size(30);

    for n_bonds in [200, 1000, 3000] {
        let processed = process_merged_bond_data(&random_merged(n_bonds, 24), &PortfolioConfig::default()).unwrap();
        group.throughput(Throughput::Elements(processed.height() as u64));
        group.bench_with_input(BenchmarkId::new("bonds", n_bonds), &processed, |b, processed| {
            let builder = DecilePortfolioBuilder::new();
            b.iter(|| builder.calculate_decile_returns(black_box(processed)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decile_assignment, bench_decile_returns);
criterion_main!(benches);
