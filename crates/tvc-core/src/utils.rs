//! Utility functions for working with data slices
//!
//! All helpers follow the NaN contract of the crate: degenerate input
//! (empty slices, zero variance) yields NaN instead of an error.

use std::cmp::Ordering;

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use tvc_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    });
    sorted
}

/// Arithmetic mean, NaN for empty slices
///
/// ```rust
/// use tvc_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population variance (divides by n), NaN for empty slices
pub fn population_variance(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divides by n)
///
/// ```rust
/// use tvc_core::utils::population_std;
///
/// let sd = population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((sd - 2.0).abs() < 1e-12);
/// ```
pub fn population_std(data: &[f64]) -> f64 {
    population_variance(data).sqrt()
}

/// Z-score a series with its population statistics
///
/// A constant series produces NaN everywhere.
pub fn zscore(data: &[f64]) -> Vec<f64> {
    let m = mean(data);
    let sd = population_std(data);
    data.iter().map(|&x| (x - m) / sd).collect()
}

/// Minimum ignoring NaN, NaN if nothing remains
pub fn nanmin(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, |acc, v| if acc.is_nan() || v < acc { v } else { acc })
}

/// Maximum ignoring NaN, NaN if nothing remains
pub fn nanmax(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, |acc, v| if acc.is_nan() || v > acc { v } else { acc })
}

/// Linearly interpolated quantile of already sorted, NaN-free data
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let h = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}
