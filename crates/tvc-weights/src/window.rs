//! Time-point weightings: jackknife and (tapered) sliding windows

use crate::taper::{taper_window, TaperDistribution};
use nalgebra::DMatrix;
use tracing::debug;
use tvc_core::{Error, ReportEntry, Result};

/// Leave-one-out weights: a T×T all-ones matrix with a zero diagonal
///
/// Row `t` weights every observation except `t`.
pub fn jackknife(n_time: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n_time, n_time, |i, j| if i == j { 0.0 } else { 1.0 })
}

/// Rows are cyclic rotations of `base` by `0..=n_time - windowsize`
fn rolled_rows(base: &[f64], windowsize: usize) -> DMatrix<f64> {
    let n_time = base.len();
    let n_rows = n_time + 1 - windowsize;
    DMatrix::from_fn(n_rows, n_time, |row, col| {
        base[(col + n_time - row) % n_time]
    })
}

fn check_window(windowsize: usize, n_time: usize) -> Result<()> {
    if windowsize == 0 {
        return Err(Error::Configuration(
            "windowsize must be at least 1".to_string(),
        ));
    }
    if windowsize > n_time {
        return Err(Error::window_too_large(windowsize, n_time));
    }
    Ok(())
}

/// Uniform sliding window of `windowsize` contiguous time points
///
/// Produces `n_time - windowsize + 1` rows; row `w` has ones at
/// `w..w + windowsize`.
pub fn sliding_window(n_time: usize, windowsize: usize) -> Result<DMatrix<f64>> {
    check_window(windowsize, n_time)?;
    let mut base = vec![0.0; n_time];
    base[..windowsize].fill(1.0);
    debug!(n_time, windowsize, "building sliding window weights");
    Ok(rolled_rows(&base, windowsize))
}

/// Sliding window whose profile follows `distribution`
///
/// The taper and its abscissa are returned as a report entry.
pub fn tapered_sliding_window(
    n_time: usize,
    windowsize: usize,
    distribution: &TaperDistribution,
) -> Result<(DMatrix<f64>, ReportEntry)> {
    check_window(windowsize, n_time)?;
    let window = taper_window(windowsize);
    let taper = distribution.evaluate(&window);

    let mut base = vec![0.0; n_time];
    base[..windowsize].copy_from_slice(&taper);
    debug!(
        n_time,
        windowsize,
        distribution = distribution.name(),
        "building tapered sliding window weights"
    );

    let entry = ReportEntry::Taper {
        windowsize,
        distribution: distribution.name().to_string(),
        distribution_params: distribution.params().to_vec(),
        taper,
        taper_window: window,
    };
    Ok((rolled_rows(&base, windowsize), entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_jackknife_shape() {
        let w = jackknife(5);
        assert_eq!(w.shape(), (5, 5));
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(w[(i, j)], if i == j { 0.0 } else { 1.0 });
            }
        }
    }

    #[test]
    fn test_sliding_window_rows() {
        let w = sliding_window(10, 3).unwrap();
        assert_eq!(w.shape(), (8, 10));
        for row in 0..8 {
            let ones: Vec<usize> = (0..10).filter(|&c| w[(row, c)] == 1.0).collect();
            assert_eq!(ones, vec![row, row + 1, row + 2]);
            assert_eq!(w.row(row).sum(), 3.0);
        }
    }

    #[test]
    fn test_window_equal_to_length() {
        let w = sliding_window(4, 4).unwrap();
        assert_eq!(w.shape(), (1, 4));
        assert_eq!(w.row(0).sum(), 4.0);
    }

    #[test]
    fn test_window_too_large() {
        assert!(matches!(
            sliding_window(10, 11),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(sliding_window(10, 0), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_tapered_window_is_symmetric() {
        let dist = TaperDistribution::new("norm", &[0.0, 2.0]).unwrap();
        let (w, entry) = tapered_sliding_window(12, 5, &dist).unwrap();
        assert_eq!(w.shape(), (8, 12));

        let ReportEntry::Taper { taper, taper_window, .. } = entry else {
            panic!("expected taper entry");
        };
        assert_eq!(taper_window, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        for k in 0..taper.len() {
            assert_abs_diff_eq!(taper[k], taper[taper.len() - 1 - k], epsilon = 1e-15);
        }

        // Row 3 carries the taper starting at column 3
        for (k, &value) in taper.iter().enumerate() {
            assert_abs_diff_eq!(w[(3, 3 + k)], value, epsilon = 1e-15);
        }
        assert_eq!(w[(3, 2)], 0.0);
        assert_eq!(w[(3, 8)], 0.0);
    }
}
