//! Shared utilities for integration tests

#![allow(dead_code)]

use nalgebra::DMatrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

pub use approx::assert_relative_eq;

pub const EPSILON: f64 = 1e-10;

/// Install a test subscriber honouring `RUST_LOG`; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Seeded standard normal data in `time,node` orientation
pub fn random_data(n_time: usize, n_nodes: usize, seed: u64) -> DMatrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    DMatrix::from_fn(n_time, n_nodes, |_, _| normal.sample(&mut rng))
}

/// Two blocks of nodes driven by independent latent signals, so that
/// within-block edges are strongly positive
pub fn block_data(n_time: usize, block: usize, seed: u64) -> DMatrix<f64> {
    let latent = random_data(n_time, 2, seed);
    let noise = random_data(n_time, 2 * block, seed + 1);
    DMatrix::from_fn(n_time, 2 * block, |t, n| {
        latent[(t, n / block)] + 0.3 * noise[(t, n)]
    })
}
