//! Multiplication of temporal derivatives
//!
//! Coupling between two nodes at time `t` is the product of their first
//! differences, each scaled by its population standard deviation. The
//! coupling series is smoothed with a moving average of `windowsize`
//! samples, so a (T, N) series gives an (N, N, T - windowsize) tensor.

use tracing::{debug, instrument};
use tvc_core::utils::population_std;
use tvc_core::{ConnectivityTensor, DerivationReport, Error, ReportEntry, Result, TimeSeries};

/// First differences of every node, each divided by its population std
///
/// Returned node-major: `diffs[node][t]`. A node whose differences are
/// constant divides by zero and yields NaN or ±∞.
fn normalised_differences(series: &TimeSeries) -> Vec<Vec<f64>> {
    (0..series.n_nodes())
        .map(|node| {
            let course = series.node(node);
            let diff: Vec<f64> = course.windows(2).map(|w| w[1] - w[0]).collect();
            let sd = population_std(&diff);
            diff.into_iter().map(|d| d / sd).collect()
        })
        .collect()
}

/// Simple moving average; output length is `len - width + 1`
fn moving_average(values: &[f64], width: usize) -> Vec<f64> {
    values
        .windows(width)
        .map(|w| w.iter().sum::<f64>() / width as f64)
        .collect()
}

/// Temporal derivative coupling of `series`
///
/// # Errors
///
/// [`Error::Configuration`] if `windowsize` is 0 or larger than the number
/// of differences (`T - 1`).
#[instrument(skip(series), fields(n_time = series.n_time(), n_nodes = series.n_nodes()))]
pub fn temporal_derivative(
    series: &TimeSeries,
    windowsize: usize,
) -> Result<(ConnectivityTensor, DerivationReport)> {
    let n_diff = series.n_time().saturating_sub(1);
    if windowsize == 0 {
        return Err(Error::Configuration(
            "windowsize must be at least 1".to_string(),
        ));
    }
    if windowsize > n_diff {
        return Err(Error::window_too_large(windowsize, n_diff));
    }

    let n = series.n_nodes();
    let diffs = normalised_differences(series);
    let depth = n_diff + 1 - windowsize;
    let mut tensor = ConnectivityTensor::zeros(n, depth);

    for i in 0..n {
        for j in i..n {
            let coupling: Vec<f64> = diffs[i].iter().zip(&diffs[j]).map(|(a, b)| a * b).collect();
            let smoothed = moving_average(&coupling, windowsize);
            tensor.set_edge_series(i, j, &smoothed);
            if i != j {
                tensor.set_edge_series(j, i, &smoothed);
            }
        }
    }

    debug!(windowsize, depth, "temporal derivative coupling computed");
    Ok((
        tensor,
        DerivationReport::single(ReportEntry::TemporalDerivative { windowsize }),
    ))
}
