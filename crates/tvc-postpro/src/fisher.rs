//! Fisher z-transform

use tvc_core::{ConnectivityTensor, ReportEntry};

/// Elementwise inverse hyperbolic tangent
///
/// `|r| = 1` maps to ±∞; the pipeline replaces those with 0 once every
/// transform has run (see [`zero_infinities`]). Values outside [-1, 1]
/// become NaN.
pub fn fisher(tensor: &mut ConnectivityTensor) -> ReportEntry {
    tensor.map_inplace(f64::atanh);
    ReportEntry::Fisher
}

/// Replace ±∞ with 0, returning how many entries changed
pub fn zero_infinities(tensor: &mut ConnectivityTensor) -> usize {
    let mut count = 0;
    for v in tensor.values_mut() {
        if v.is_infinite() {
            *v = 0.0;
            count += 1;
        }
    }
    count
}
