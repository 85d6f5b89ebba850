use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DMatrix;
use rand::prelude::*;
use rand_distr::Normal;
use tvc_derive::{derive, temporal_derivative, DeriveConfig};
use tvc_core::{DimOrd, TimeSeries};

/// Generate a (time, node) matrix of standard normal noise
fn generate_series(n_time: usize, n_nodes: usize, seed: u64) -> DMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    DMatrix::from_fn(n_time, n_nodes, |_, _| normal.sample(&mut rng))
}

fn bench_weighted_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("WeightedMethods");
    let configs = [
        ("jackknife", DeriveConfig::new("jackknife")),
        ("slidingwindow", DeriveConfig::new("slidingwindow").with_windowsize(20)),
        (
            "taperedslidingwindow",
            DeriveConfig::new("taperedslidingwindow")
                .with_windowsize(20)
                .with_distribution("norm", vec![0.0, 5.0]),
        ),
        ("distance", DeriveConfig::new("distance").with_distance("euclidean")),
    ];

    for n_nodes in [10, 50] {
        let data = generate_series(200, n_nodes, 42);
        for (name, config) in &configs {
            group.bench_with_input(BenchmarkId::new(*name, n_nodes), &data, |b, data| {
                b.iter(|| derive(black_box(data), config))
            });
        }
    }

    group.finish();
}

fn bench_temporal_derivative(c: &mut Criterion) {
    let mut group = c.benchmark_group("TemporalDerivative");
    for n_time in [100, 500, 1000] {
        let series = TimeSeries::new(generate_series(n_time, 20, 7), DimOrd::TimeNode).unwrap();
        group.bench_with_input(BenchmarkId::new("k7", n_time), &series, |b, series| {
            b.iter(|| temporal_derivative(black_box(series), 7))
        });
    }
    group.finish();
}

fn bench_postprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("PostProcessing");
    let data = generate_series(200, 20, 3);
    for postpro in ["fisher", "fisher+standardize", "fisher+boxcox+standardize"] {
        let config = DeriveConfig::new("slidingwindow")
            .with_windowsize(30)
            .with_postpro(postpro);
        group.bench_with_input(BenchmarkId::from_parameter(postpro), &data, |b, data| {
            b.iter(|| derive(black_box(data), &config))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_weighted_methods,
    bench_temporal_derivative,
    bench_postprocessing
);
criterion_main!(benches);
