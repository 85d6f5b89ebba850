//! Weighted Pearson correlation
//!
//! For a weight vector `w` over time points the weighted mean, covariance
//! and correlation of nodes `i` and `j` are
//!
//! ```text
//! m_i    = Σ w_t x_ti / Σ w_t
//! c_ij   = Σ w_t (x_ti - m_i)(x_tj - m_j) / Σ w_t
//! r_ij   = c_ij / sqrt(c_ii c_jj)
//! ```
//!
//! Weights are not normalised beyond the division by their sum. A weight row
//! summing to zero, or a node that is constant under the weighting, yields
//! NaN entries.

use nalgebra::DMatrix;
use tracing::{debug, trace};
use tvc_core::{ConnectivityTensor, Error, Result, TimeSeries};

/// Weighted Pearson correlation matrix of the columns of `data`
///
/// `data` is (T, N) and `weights` has length T.
pub fn weighted_correlation(data: &DMatrix<f64>, weights: &[f64]) -> DMatrix<f64> {
    let (n_time, n_nodes) = data.shape();
    debug_assert_eq!(weights.len(), n_time);
    let total: f64 = weights.iter().sum();

    let means: Vec<f64> = (0..n_nodes)
        .map(|j| {
            data.column(j)
                .iter()
                .zip(weights)
                .map(|(x, w)| w * x)
                .sum::<f64>()
                / total
        })
        .collect();

    let centered = DMatrix::from_fn(n_time, n_nodes, |t, j| data[(t, j)] - means[j]);
    let weighted = DMatrix::from_fn(n_time, n_nodes, |t, j| centered[(t, j)] * weights[t]);
    let covariance = (centered.transpose() * weighted) / total;

    DMatrix::from_fn(n_nodes, n_nodes, |i, j| {
        covariance[(i, j)] / (covariance[(i, i)] * covariance[(j, j)]).sqrt()
    })
}

/// Reduces a (W, T) weight matrix against a time series
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedCorrelationEngine;

impl WeightedCorrelationEngine {
    pub fn new() -> Self {
        Self
    }

    /// One weighted correlation matrix per weight row, stacked to (N, N, W)
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the weight matrix does not have one column
    /// per time point.
    pub fn correlate(
        &self,
        series: &TimeSeries,
        weights: &DMatrix<f64>,
    ) -> Result<ConnectivityTensor> {
        if weights.ncols() != series.n_time() {
            return Err(Error::size_mismatch(
                series.n_time(),
                weights.ncols(),
                "weight matrix columns vs number of time points",
            ));
        }
        debug!(
            slices = weights.nrows(),
            nodes = series.n_nodes(),
            "computing weighted correlations"
        );

        let data = series.matrix();
        let slices: Vec<DMatrix<f64>> = weights
            .row_iter()
            .enumerate()
            .map(|(w, row)| {
                let row: Vec<f64> = row.iter().copied().collect();
                trace!(slice = w, weight_sum = row.iter().sum::<f64>(), "slice");
                weighted_correlation(data, &row)
            })
            .collect();

        if slices.is_empty() {
            return Ok(ConnectivityTensor::zeros(series.n_nodes(), 0));
        }
        ConnectivityTensor::from_slices(&slices)
    }
}
