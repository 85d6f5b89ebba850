//! Static functional connectivity and group averaging

use nalgebra::DMatrix;
use tracing::debug;
use tvc_core::{DimOrd, Error, Result, TimeSeries};

use crate::correlation::weighted_correlation;

/// Pearson correlation matrix over the whole series
pub fn functional_connectivity(data: &DMatrix<f64>, dimord: DimOrd) -> Result<DMatrix<f64>> {
    let series = TimeSeries::new(data.clone(), dimord)?;
    let weights = vec![1.0; series.n_time()];
    Ok(weighted_correlation(series.matrix(), &weights))
}

/// Average correlation matrices in Fisher z space
///
/// Every matrix is transformed with `atanh`, averaged elementwise, and
/// mapped back with `tanh`. Perfect correlations (including the diagonal)
/// stay exactly ±1.
pub fn group_average(matrices: &[DMatrix<f64>]) -> Result<DMatrix<f64>> {
    let first = matrices
        .first()
        .ok_or(Error::InsufficientData {
            expected: 1,
            actual: 0,
        })?;
    let shape = first.shape();
    if let Some(bad) = matrices.iter().find(|m| m.shape() != shape) {
        return Err(Error::InvalidInput(format!(
            "group members must share shape {shape:?}, found {:?}",
            bad.shape()
        )));
    }
    debug!(members = matrices.len(), ?shape, "averaging connectivity in z space");

    let mut sum = DMatrix::zeros(shape.0, shape.1);
    for m in matrices {
        sum += m.map(f64::atanh);
    }
    Ok((sum / matrices.len() as f64).map(f64::tanh))
}
