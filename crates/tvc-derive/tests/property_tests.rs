//! Property-based tests for the derivation engine

use nalgebra::DMatrix;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tvc_derive::{derive, DeriveConfig};

fn random_data(n_time: usize, n_nodes: usize, seed: u64) -> DMatrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    DMatrix::from_fn(n_time, n_nodes, |_, _| normal.sample(&mut rng))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Property: sliding window yields T - k + 1 symmetric slices bounded by 1
    #[test]
    fn prop_sliding_window_bounded(
        n_time in 5usize..60,
        n_nodes in 2usize..6,
        k_frac in 0.1f64..1.0,
        seed in 0u64..1000
    ) {
        let windowsize = ((n_time as f64 * k_frac) as usize).max(3);
        let data = random_data(n_time, n_nodes, seed);
        let config = DeriveConfig::new("slidingwindow").with_windowsize(windowsize);
        let derivation = derive(&data, &config).unwrap();

        prop_assert_eq!(derivation.shape(), (n_nodes, n_nodes, n_time - windowsize + 1));
        prop_assert!(derivation.tensor.is_symmetric(1e-12));
        for &v in derivation.tensor.values() {
            prop_assert!(v.abs() <= 1.0 + 1e-12);
        }
    }

    // Property: the temporal derivative always has depth T - k
    #[test]
    fn prop_temporal_derivative_depth(
        n_time in 3usize..80,
        windowsize in 1usize..20,
        seed in 0u64..1000
    ) {
        prop_assume!(windowsize < n_time);
        let data = random_data(n_time, 3, seed);
        let config = DeriveConfig::new("temporal derivative").with_windowsize(windowsize);
        let derivation = derive(&data, &config).unwrap();
        prop_assert_eq!(derivation.tensor.n_slices(), n_time - windowsize);
    }

    // Property: distance weights are finite, so every slice is a valid correlation
    #[test]
    fn prop_distance_slices_per_observation(
        n_time in 4usize..30,
        seed in 0u64..1000
    ) {
        let data = random_data(n_time, 4, seed);
        let config = DeriveConfig::new("distance").with_distance("euclidean");
        let derivation = derive(&data, &config).unwrap();
        prop_assert_eq!(derivation.tensor.n_slices(), n_time);
        for &v in derivation.tensor.values() {
            prop_assert!(v.abs() <= 1.0 + 1e-12);
        }
    }
}
