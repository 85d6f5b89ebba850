//! Descriptive reports for connectivity tensors
//!
//! A [`ReportGenerator`] turns a derived tensor (and the provenance gathered
//! so far) into one more [`ReportEntry`]. The derivation engine calls the
//! configured generator last, so its entry is always the final step of a
//! [`DerivationReport`].
//!
//! [`SummaryReportGenerator`] is the built-in implementation: descriptive
//! statistics over the finite upper-triangle values of the tensor.
//!
//! # Example
//!
//! ```rust
//! use tvc_core::{ConnectivityTensor, DerivationReport, ReportEntry};
//! use tvc_report::{ReportGenerator, SummaryReportGenerator};
//!
//! let tensor = ConnectivityTensor::from_fn(3, 4, |i, j, t| {
//!     if i == j { 1.0 } else { 0.1 * t as f64 }
//! });
//! let entry = SummaryReportGenerator::new()
//!     .generate(&tensor, &DerivationReport::new())
//!     .unwrap();
//! match entry {
//!     ReportEntry::Summary(summary) => assert_eq!(summary.count, 12),
//!     _ => unreachable!(),
//! }
//! ```

use statrs::statistics::Statistics;
use tracing::debug;
use tvc_core::utils::{quantile_sorted, sorted};
use tvc_core::{ConnectivityTensor, DerivationReport, ReportEntry, Result, TensorSummary};

/// Produces a report entry describing a derived tensor
pub trait ReportGenerator: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Describe `tensor`; `report` holds every entry recorded before this one
    fn generate(&self, tensor: &ConnectivityTensor, report: &DerivationReport)
        -> Result<ReportEntry>;
}

/// Descriptive statistics of the finite off-diagonal upper triangle
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReportGenerator;

impl SummaryReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the summary without wrapping it in a report entry
    pub fn summarize(&self, tensor: &ConnectivityTensor) -> TensorSummary {
        let (n_nodes, _, n_slices) = tensor.shape();
        let pairs: Vec<(usize, usize)> = tensor.upper_triangle().collect();

        let mut finite = Vec::with_capacity(pairs.len() * n_slices);
        let mut nan_count = 0;
        let mut slice_means = Vec::with_capacity(n_slices);

        for t in 0..n_slices {
            let mut slice_values = Vec::with_capacity(pairs.len());
            for &(i, j) in &pairs {
                let v = tensor.get(i, j, t);
                if v.is_finite() {
                    slice_values.push(v);
                } else if v.is_nan() {
                    nan_count += 1;
                }
            }
            slice_means.push(Statistics::mean(slice_values.as_slice()));
            finite.extend(slice_values);
        }

        let values = finite.as_slice();
        let ordered = sorted(values);
        TensorSummary {
            n_nodes,
            n_slices,
            count: values.len(),
            nan_count,
            mean: Statistics::mean(values),
            std: Statistics::population_std_dev(values),
            min: Statistics::min(values),
            q25: quantile_sorted(&ordered, 0.25),
            median: quantile_sorted(&ordered, 0.5),
            q75: quantile_sorted(&ordered, 0.75),
            max: Statistics::max(values),
            slice_means,
        }
    }
}

impl ReportGenerator for SummaryReportGenerator {
    fn name(&self) -> &str {
        "summary"
    }

    fn generate(
        &self,
        tensor: &ConnectivityTensor,
        report: &DerivationReport,
    ) -> Result<ReportEntry> {
        let summary = self.summarize(tensor);
        debug!(
            count = summary.count,
            nan_count = summary.nan_count,
            prior_steps = report.entries().len(),
            "tensor summary computed"
        );
        Ok(ReportEntry::Summary(summary))
    }
}

/// Render a report as pretty-printed JSON
///
/// Non-finite statistics (e.g. the mean of an all-NaN tensor) are written
/// as `null`.
pub fn render_json(report: &DerivationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
