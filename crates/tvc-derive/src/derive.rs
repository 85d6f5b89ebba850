//! Derivation entry point

use nalgebra::DMatrix;
use serde::Serialize;
use tracing::{debug, info, instrument};
use tvc_core::{ConnectivityTensor, DerivationReport, ReportEntry, Result, TimeSeries};
use tvc_postpro::Pipeline;
use tvc_report::{ReportGenerator, SummaryReportGenerator};
use tvc_weights::WeightScheme;

use crate::config::{DeriveConfig, Method};
use crate::correlation::WeightedCorrelationEngine;
use crate::derivative::temporal_derivative;

/// Result of a derivation: the (N, N, W) tensor and its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub tensor: ConnectivityTensor,
    pub report: DerivationReport,
}

impl Derivation {
    pub fn shape(&self) -> (usize, usize, usize) {
        self.tensor.shape()
    }

    pub fn into_parts(self) -> (ConnectivityTensor, DerivationReport) {
        (self.tensor, self.report)
    }
}

/// Serialisable view of a derivation, tensor flattened slice-major
#[derive(Debug, Serialize)]
struct DerivationJson<'a> {
    shape: (usize, usize, usize),
    values: &'a [f64],
    report: &'a DerivationReport,
}

impl Derivation {
    /// JSON with `shape`, slice-major `values` and `report`
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(DerivationJson {
            shape: self.tensor.shape(),
            values: self.tensor.values(),
            report: &self.report,
        })?)
    }
}

/// Derive time-varying connectivity from `data`
///
/// `data` is oriented according to `config.dimord`. The summary generator
/// is used when `config.report` is set.
///
/// # Errors
///
/// Unknown names and missing parameters
/// ([`tvc_core::Error::Configuration`]) are reported before any computation.
/// Window sizes are checked against the series length. Malformed data is
/// [`tvc_core::Error::InvalidInput`].
pub fn derive(data: &DMatrix<f64>, config: &DeriveConfig) -> Result<Derivation> {
    derive_with_generator(data, config, &SummaryReportGenerator::new())
}

/// [`derive`] with a caller-chosen report generator
#[instrument(skip(data, config, generator), fields(method = ?config.method, generator = generator.name()))]
pub fn derive_with_generator(
    data: &DMatrix<f64>,
    config: &DeriveConfig,
    generator: &dyn ReportGenerator,
) -> Result<Derivation> {
    let method = config.method()?;
    let pipeline = Pipeline::parse(&config.postpro)?;
    let series = TimeSeries::new(data.clone(), config.dimord)?;

    let mut report = DerivationReport::single(ReportEntry::Method {
        method: method.name().to_string(),
        dimord: config.dimord.as_str().to_string(),
        analysis_id: config.analysis_id.clone(),
    });

    let (mut tensor, steps) = compute(&series, &method)?;
    report = report.merge(steps);
    report = report.merge(pipeline.run(&mut tensor));

    if config.report {
        let entry = generator.generate(&tensor, &report)?;
        report.push(entry);
    }

    info!(
        method = method.name(),
        shape = ?tensor.shape(),
        "derivation complete"
    );
    Ok(Derivation { tensor, report })
}

/// Connectivity tensor of an already canonical series, before post-processing
pub fn compute(
    series: &TimeSeries,
    method: &Method,
) -> Result<(ConnectivityTensor, DerivationReport)> {
    match method {
        Method::Weighted(builder) => {
            let (weights, report) = builder.build(series)?;
            let mut tensor = WeightedCorrelationEngine::new().correlate(series, &weights)?;
            if matches!(builder.scheme(), WeightScheme::Jackknife) {
                debug!("inverting jackknife estimates");
                tensor.scale(-1.0);
            }
            Ok((tensor, report))
        }
        Method::TemporalDerivative { windowsize } => temporal_derivative(series, *windowsize),
    }
}
