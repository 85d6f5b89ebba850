//! Integration tests for the post-processing pipeline

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tvc_core::utils::{mean, population_std};
use tvc_core::{ConnectivityTensor, DerivationReport, Error, ReportEntry};
use tvc_postpro::{postprocess, Pipeline};

/// Symmetric tensor of noisy correlation-like values in (-0.9, 0.9)
fn random_tensor(n: usize, w: usize, seed: u64) -> ConnectivityTensor {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 0.3).unwrap();
    let mut tensor = ConnectivityTensor::zeros(n, w);
    for t in 0..w {
        for i in 0..n {
            tensor.set(i, i, t, 1.0);
            for j in (i + 1)..n {
                let v: f64 = normal.sample(&mut rng);
                let v = v.clamp(-0.9, 0.9);
                tensor.set(i, j, t, v);
                tensor.set(j, i, t, v);
            }
        }
    }
    tensor
}

#[test]
fn test_full_pipeline_order_and_shape() {
    let tensor = random_tensor(4, 30, 7);
    let (out, report) =
        postprocess(tensor, "fisher+boxcox+standardize", DerivationReport::new()).unwrap();

    assert_eq!(out.shape(), (4, 4, 30));
    let steps = report.steps();
    assert_eq!(&steps[..3], &["fisher", "boxcox", "standardize"]);

    match report.find("boxcox") {
        Some(ReportEntry::Boxcox {
            performed, lambda, ..
        }) => {
            assert!(*performed);
            assert_eq!(lambda.len(), 6);
        }
        other => panic!("unexpected boxcox entry {other:?}"),
    }

    for (i, j) in out.upper_triangle().collect::<Vec<_>>() {
        let series = out.edge_series(i, j);
        assert_abs_diff_eq!(mean(&series), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(population_std(&series), 1.0, epsilon = 1e-9);
    }
    assert!(out.is_symmetric(1e-12));
}

#[test]
fn test_unknown_transform_applies_nothing() {
    let err = postprocess(random_tensor(3, 5, 1), "fisher+rank", DerivationReport::new())
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_report_json_after_boxcox() {
    let (_, report) = postprocess(random_tensor(3, 20, 3), "boxcox", DerivationReport::new())
        .unwrap();
    let json = report.to_json().unwrap();
    let entry = &json["entries"][0];
    assert_eq!(entry["step"], "boxcox");
    assert_eq!(entry["shifted_to"], 1.0);
    assert!(entry.get("failure_reason").is_none());
}

proptest! {
    #[test]
    fn prop_fisher_leaves_no_infinities(values in prop::collection::vec(-1.0f64..=1.0, 8)) {
        let tensor = ConnectivityTensor::from_vec(2, 2, values).unwrap();
        let pipeline = Pipeline::parse("fisher").unwrap();
        let mut tensor = tensor;
        pipeline.run(&mut tensor);
        prop_assert!(tensor.values().iter().all(|v| !v.is_infinite()));
    }

    #[test]
    fn prop_standardize_is_scale_invariant(seed in 0u64..500, factor in 0.1f64..10.0) {
        let base = random_tensor(3, 12, seed);
        let mut scaled = base.clone();
        scaled.scale(factor);

        let (a, _) = postprocess(base, "standardize", DerivationReport::new()).unwrap();
        let (b, _) = postprocess(scaled, "standardize", DerivationReport::new()).unwrap();
        for (x, y) in a.values().iter().zip(b.values()) {
            prop_assert!((x - y).abs() < 1e-9);
        }
    }
}
