//! Box-Cox power transform of edge time series
//!
//! Box-Cox needs strictly positive input. The tensor is first shifted so
//! that the minimum of its off-diagonal edges becomes 1; the shift is
//! recorded. The diagonal does not take part, so a Fisher-transformed
//! jackknife diagonal (-∞) does not poison the shift. Each upper-triangle
//! edge series then gets its own exponent, fitted by maximum likelihood, and
//! the transformed series is mirrored into the lower triangle. The diagonal
//! is set to 0.
//!
//! If any transformed edge ends up constant or non-finite, the step is
//! reported as failed and the tensor is left exactly as it was.

use tracing::{debug, warn};
use tvc_core::utils::{nanmin, population_variance, zscore};
use tvc_core::{ConnectivityTensor, EdgeLambda, ReportEntry};

const LAMBDA_BOUNDS: (f64, f64) = (-5.0, 5.0);
const GOLDEN_TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 200;

/// Box-Cox transform of a positive value
pub fn boxcox_value(x: f64, lambda: f64) -> f64 {
    if lambda.abs() < 1e-12 {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

/// Profile log-likelihood of `lambda` for positive data
pub fn boxcox_llf(data: &[f64], lambda: f64) -> f64 {
    let n = data.len() as f64;
    let log_sum: f64 = data.iter().map(|x| x.ln()).sum();
    let transformed: Vec<f64> = data.iter().map(|&x| boxcox_value(x, lambda)).collect();
    (lambda - 1.0) * log_sum - n / 2.0 * population_variance(&transformed).ln()
}

/// Maximum likelihood exponent for positive data
///
/// Golden-section search on [-5, 5]; the log-likelihood is concave in
/// lambda.
pub fn boxcox_lambda(data: &[f64]) -> f64 {
    let inv_phi = (5f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = LAMBDA_BOUNDS;
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = boxcox_llf(data, c);
    let mut fd = boxcox_llf(data, d);

    for _ in 0..MAX_ITERATIONS {
        if (b - a).abs() < GOLDEN_TOLERANCE {
            break;
        }
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = boxcox_llf(data, c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = boxcox_llf(data, d);
        }
    }
    (a + b) / 2.0
}

/// Box-Cox transform every edge series of `tensor`
pub fn boxcox(tensor: &mut ConnectivityTensor) -> ReportEntry {
    let edge_values: Vec<f64> = tensor
        .upper_triangle()
        .flat_map(|(i, j)| tensor.edge_series(i, j))
        .collect();
    let shift = 1.0 - nanmin(&edge_values);
    let n = tensor.n_nodes();
    let mut transformed = ConnectivityTensor::zeros(n, tensor.n_slices());
    let mut lambdas = Vec::new();
    let mut degenerate = false;

    let pairs: Vec<(usize, usize)> = tensor.upper_triangle().collect();
    for (i, j) in pairs {
        let series: Vec<f64> = tensor.edge_series(i, j).iter().map(|v| v + shift).collect();
        let lambda = boxcox_lambda(&series);
        let values: Vec<f64> = series.iter().map(|&x| boxcox_value(x, lambda)).collect();

        if zscore(&values).iter().any(|v| !v.is_finite()) {
            degenerate = true;
        }
        transformed.set_edge_series(i, j, &values);
        transformed.set_edge_series(j, i, &values);
        lambdas.push(EdgeLambda { i, j, lambda });
    }

    if degenerate {
        warn!(
            shift,
            "Box-Cox produced edges with uniform or non-finite values through time; transform skipped"
        );
        return ReportEntry::Boxcox {
            performed: false,
            shift,
            shifted_to: 1.0,
            lambda: Vec::new(),
            failure_reason: Some(
                "Box-Cox transform returned edges with uniform or non-finite values through time"
                    .to_string(),
            ),
        };
    }

    debug!(shift, edges = lambdas.len(), "Box-Cox transform applied");
    *tensor = transformed;
    ReportEntry::Boxcox {
        performed: true,
        shift,
        shifted_to: 1.0,
        lambda: lambdas,
        failure_reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_boxcox_value_limits() {
        assert_abs_diff_eq!(boxcox_value(std::f64::consts::E, 0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(boxcox_value(3.0, 1.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(boxcox_value(4.0, 0.5), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lambda_for_lognormal_shape() {
        // Logs equally spaced and symmetric: lambda = 0 is the stationary point
        let data: Vec<f64> = (0..13).map(|k| (k as f64 * 0.25).exp()).collect();
        let lambda = boxcox_lambda(&data);
        assert_abs_diff_eq!(lambda, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_lambda_maximises_llf() {
        let data = [1.2, 1.9, 2.2, 3.5, 4.1, 7.7, 9.0, 15.0];
        let lambda = boxcox_lambda(&data);
        let best = boxcox_llf(&data, lambda);
        for delta in [-0.1, -0.01, 0.01, 0.1] {
            assert!(best >= boxcox_llf(&data, lambda + delta) - 1e-9);
        }
    }

    #[test]
    fn test_boxcox_tensor() {
        let mut tensor = ConnectivityTensor::from_fn(3, 12, |i, j, t| {
            if i == j {
                1.0
            } else {
                (((i + j) as f64) * 0.2 + (t as f64) * 0.31).sin().exp() - 0.5
            }
        });
        let entry = boxcox(&mut tensor);

        let ReportEntry::Boxcox { performed, shift, lambda, .. } = entry else {
            panic!("expected boxcox entry");
        };
        assert!(performed);
        assert_eq!(lambda.len(), 3);
        assert!(shift > 0.0);
        assert!(tensor.is_symmetric(0.0));
        for t in 0..12 {
            for i in 0..3 {
                assert_eq!(tensor.get(i, i, t), 0.0);
            }
        }
    }

    #[test]
    fn test_shift_ignores_diagonal() {
        let mut tensor = ConnectivityTensor::from_fn(3, 10, |i, j, t| {
            if i == j {
                f64::NEG_INFINITY
            } else {
                ((i + j) as f64 + t as f64 * 0.7).cos() * 0.4
            }
        });
        let off_diagonal_min = tensor
            .values()
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::INFINITY, f64::min);

        let ReportEntry::Boxcox { performed, shift, .. } = boxcox(&mut tensor) else {
            panic!("expected boxcox entry");
        };
        assert!(performed);
        assert_abs_diff_eq!(shift, 1.0 - off_diagonal_min, epsilon = 1e-12);
        assert!(tensor.values().iter().all(|v| v.is_finite()));
        assert_eq!(tensor.get(1, 1, 4), 0.0);
    }

    #[test]
    fn test_constant_edge_fails_and_leaves_tensor() {
        let original = ConnectivityTensor::from_fn(2, 5, |i, j, _| if i == j { 1.0 } else { 0.3 });
        let mut tensor = original.clone();
        let entry = boxcox(&mut tensor);
        match entry {
            ReportEntry::Boxcox { performed, failure_reason, .. } => {
                assert!(!performed);
                assert!(failure_reason.is_some());
            }
            other => panic!("unexpected entry {other:?}"),
        }
        assert_eq!(tensor, original);
    }
}
