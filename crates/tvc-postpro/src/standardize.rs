//! Per-edge z-scoring across time

use tvc_core::utils::zscore;
use tvc_core::{ConnectivityTensor, ReportEntry};

/// Z-score every off-diagonal edge series over the time axis
///
/// Uses the population standard deviation. A constant edge series becomes
/// NaN. The diagonal is set to 1.
pub fn standardize(tensor: &mut ConnectivityTensor) -> ReportEntry {
    let n = tensor.n_nodes();
    for i in 0..n {
        for j in 0..n {
            if i != j {
                let z = zscore(&tensor.edge_series(i, j));
                tensor.set_edge_series(i, j, &z);
            }
        }
    }
    tensor.set_diagonal(1.0);
    ReportEntry::Standardize {
        method: "Z-score".to_string(),
    }
}
