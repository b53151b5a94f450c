//! Benchmarks for nozawa-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::Array1;
use nozawa_math::{QuantileBinner, linear_fit, pearson};
use rand::Rng;

fn random_spreads(n: usize) -> Array1<f64> {
    let mut rng = rand::thread_rng();
    Array1::from_iter((0..n).map(|_| rng.r#gen::<f64>() * 0.08 - 0.005))
}

fn bench_quantile_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile_assign");
    let binner = QuantileBinner::new(10).unwrap();

    for size in [100, 1000, 5000, 20000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let data = random_spreads(size);
            b.iter(|| binner.assign(black_box(&data)));
        });
    }

    group.finish();
}

fn bench_linear_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_fit");

    for months in [120, 240, 480] {
        group.throughput(Throughput::Elements(months as u64));
        group.bench_with_input(BenchmarkId::new("months", months), &months, |b, &months| {
            let x = random_spreads(months);
            let y = &x * 0.9 + random_spreads(months) * 0.1;
            b.iter(|| linear_fit(black_box(&x), black_box(&y)).unwrap());
        });
    }

    group.finish();
}

fn bench_pearson(c: &mut Criterion) {
    let mut group = c.benchmark_group("pearson");

    for months in [120, 480] {
        group.bench_with_input(BenchmarkId::new("months", months), &months, |b, &months| {
            let x = random_spreads(months).to_vec();
            let y = random_spreads(months).to_vec();
            b.iter(|| pearson(black_box(&x), black_box(&y)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_quantile_assign, bench_linear_fit, bench_pearson);

criterion_main!(benches);
