//! Derivation through post-processing to temporal networks

mod common;

use common::{assert_relative_eq, block_data, init_tracing, random_data, EPSILON};
use nalgebra::DMatrix;
use tvc::derive::derive_with_generator;
use tvc::network::{EdgeQuery, Threshold, ThresholdSign};
use tvc::prelude::*;

/// Generator that records how many steps preceded it
struct StepCounter;

impl ReportGenerator for StepCounter {
    fn name(&self) -> &str {
        "step_counter"
    }

    fn generate(
        &self,
        _tensor: &ConnectivityTensor,
        report: &DerivationReport,
    ) -> tvc::Result<ReportEntry> {
        Ok(ReportEntry::InfinitiesZeroed {
            count: report.entries().len(),
        })
    }
}

#[test]
fn test_sliding_window_to_binary_network() -> anyhow::Result<()> {
    init_tracing();
    let data = block_data(80, 3, 21);
    let config = DeriveConfig::new("slidingwindow")
        .with_windowsize(20)
        .with_postpro("fisher+standardize")
        .with_report(true)
        .with_analysis_id("sub-01");
    let derivation = derive(&data, &config)?;
    assert_eq!(derivation.shape(), (6, 6, 61));
    assert_eq!(
        derivation.report.steps(),
        vec!["method", "sliding_window", "fisher", "standardize", "summary"]
    );
    assert_eq!(derivation.report.method(), Some("slidingwindow"));

    let mut network = TemporalNetwork::from_array(derivation.tensor, None, false);
    assert_eq!(network.nettype(), NetworkType::Wu);
    network.binarize(Threshold::Percent(0.5), ThresholdSign::Pos)?;
    assert_eq!(network.nettype(), NetworkType::Bu);

    let dense = network.to_dense();
    for t in 0..61 {
        for i in 0..6 {
            assert_eq!(dense.get(i, i, t), 0.0);
        }
    }
    // floor(61 * 0.5) slices survive for every edge
    for (i, j) in dense.upper_triangle() {
        let kept: f64 = dense.edge_series(i, j).iter().sum();
        assert_eq!(kept, 30.0);
    }
    Ok(())
}

#[test]
fn test_jackknife_sparse_queries() -> anyhow::Result<()> {
    let data = block_data(40, 2, 4);
    let derivation = derive(&data, &DeriveConfig::new("jackknife"))?;
    let network = TemporalNetwork::from_array(derivation.tensor.clone(), None, true);
    assert!(network.is_sparse());

    let edges = network.edges_when(&EdgeQuery::new().ij([0]).t([7]))?;
    assert_eq!(edges.len(), 3);
    for e in edges {
        assert!(e.i == 0 || e.j == 0);
        assert_relative_eq!(e.weight, derivation.tensor.get(e.i, e.j, 7), epsilon = EPSILON);
    }
    Ok(())
}

#[test]
fn test_postprocess_after_derivation_matches_inline() -> anyhow::Result<()> {
    let data = random_data(50, 4, 8);
    let inline = derive(
        &data,
        &DeriveConfig::new("slidingwindow")
            .with_windowsize(10)
            .with_postpro("fisher+standardize"),
    )?;

    let raw = derive(&data, &DeriveConfig::new("slidingwindow").with_windowsize(10))?;
    let (tensor, report) = postprocess(raw.tensor, "fisher+standardize", raw.report)?;

    assert_eq!(report.steps(), inline.report.steps());
    for (a, b) in tensor.values().iter().zip(inline.tensor.values()) {
        assert_relative_eq!(*a, *b, epsilon = EPSILON);
    }
    Ok(())
}

#[test]
fn test_custom_report_generator_runs_last() -> anyhow::Result<()> {
    let data = random_data(30, 3, 2);
    let config = DeriveConfig::new("temporalderivative")
        .with_windowsize(3)
        .with_report(true);
    let derivation = derive_with_generator(&data, &config, &StepCounter)?;
    assert_eq!(derivation.shape(), (3, 3, 27));
    assert_eq!(
        derivation.report.entries().last(),
        Some(&ReportEntry::InfinitiesZeroed { count: 2 })
    );
    Ok(())
}

#[test]
fn test_group_average_of_static_connectivity() -> anyhow::Result<()> {
    let subjects: Vec<DMatrix<f64>> = (0..4)
        .map(|s| tvc::functional_connectivity(&block_data(60, 2, 100 + s), DimOrd::TimeNode))
        .collect::<tvc::Result<_>>()?;
    let average = tvc::group_average(&subjects)?;
    assert_eq!(average.shape(), (4, 4));
    assert!(average[(0, 1)] > 0.5);
    assert_relative_eq!(average[(0, 1)], average[(1, 0)], epsilon = EPSILON);
    Ok(())
}

#[test]
fn test_json_configuration_round_trip() -> anyhow::Result<()> {
    let config = DeriveConfig::from_json(
        r#"{
            "method": "taperedslidingwindow",
            "windowsize": 9,
            "distribution": "norm",
            "distribution_params": [0, 3],
            "postpro": "fisher",
            "report": true
        }"#,
    )?;
    let derivation = derive(&random_data(40, 3, 13), &config)?;
    let json = derivation.to_json()?;
    assert_eq!(json["shape"], serde_json::json!([3, 3, 32]));
    let steps: Vec<&str> = json["report"]["entries"]
        .as_array()
        .map(|entries| entries.iter().filter_map(|e| e["step"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(steps[0], "method");
    assert!(steps.contains(&"taper"));
    assert_eq!(steps.last(), Some(&"summary"));
    Ok(())
}

#[test]
fn test_batch_keeps_per_subject_errors() {
    let ok = random_data(20, 3, 1);
    let short = random_data(4, 3, 2);
    let config = DeriveConfig::new("slidingwindow").with_windowsize(5);
    let results = derive_batch(&[ok, short], &config);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::Configuration(_))));
}

#[test]
fn test_version_is_set() {
    assert!(!tvc::VERSION.is_empty());
}
