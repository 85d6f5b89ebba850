//! Inverse-distance weighting between observations
//!
//! Each time point is described by its cross-node pattern (a row of the
//! canonical time × node matrix). Time points whose patterns are close
//! contribute more to each other's correlation estimate.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use tvc_core::utils::{nanmax, nanmin};
use tvc_core::{Error, Result, TimeSeries};

/// Distance between two equally long vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    Euclidean,
    SqEuclidean,
    Cityblock,
    Chebyshev,
    Cosine,
    Correlation,
    Canberra,
    BrayCurtis,
    Hamming,
    Jaccard,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 10] = [
        DistanceMetric::Euclidean,
        DistanceMetric::SqEuclidean,
        DistanceMetric::Cityblock,
        DistanceMetric::Chebyshev,
        DistanceMetric::Cosine,
        DistanceMetric::Correlation,
        DistanceMetric::Canberra,
        DistanceMetric::BrayCurtis,
        DistanceMetric::Hamming,
        DistanceMetric::Jaccard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::SqEuclidean => "sqeuclidean",
            DistanceMetric::Cityblock => "cityblock",
            DistanceMetric::Chebyshev => "chebyshev",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Correlation => "correlation",
            DistanceMetric::Canberra => "canberra",
            DistanceMetric::BrayCurtis => "braycurtis",
            DistanceMetric::Hamming => "hamming",
            DistanceMetric::Jaccard => "jaccard",
        }
    }

    /// Distance between `u` and `v`
    pub fn distance(&self, u: &[f64], v: &[f64]) -> f64 {
        debug_assert_eq!(u.len(), v.len());
        let pairs = u.iter().zip(v.iter());
        match self {
            DistanceMetric::Euclidean => DistanceMetric::SqEuclidean.distance(u, v).sqrt(),
            DistanceMetric::SqEuclidean => pairs.map(|(a, b)| (a - b) * (a - b)).sum(),
            DistanceMetric::Cityblock => pairs.map(|(a, b)| (a - b).abs()).sum(),
            DistanceMetric::Chebyshev => pairs.map(|(a, b)| (a - b).abs()).fold(0.0, f64::max),
            DistanceMetric::Cosine => {
                let dot: f64 = pairs.map(|(a, b)| a * b).sum();
                let nu = u.iter().map(|a| a * a).sum::<f64>().sqrt();
                let nv = v.iter().map(|b| b * b).sum::<f64>().sqrt();
                1.0 - dot / (nu * nv)
            }
            DistanceMetric::Correlation => {
                let mu = u.iter().sum::<f64>() / u.len() as f64;
                let mv = v.iter().sum::<f64>() / v.len() as f64;
                let cu: Vec<f64> = u.iter().map(|a| a - mu).collect();
                let cv: Vec<f64> = v.iter().map(|b| b - mv).collect();
                DistanceMetric::Cosine.distance(&cu, &cv)
            }
            DistanceMetric::Canberra => pairs
                .map(|(a, b)| {
                    let denom = a.abs() + b.abs();
                    if denom == 0.0 {
                        0.0
                    } else {
                        (a - b).abs() / denom
                    }
                })
                .sum(),
            DistanceMetric::BrayCurtis => {
                let num: f64 = pairs.clone().map(|(a, b)| (a - b).abs()).sum();
                let denom: f64 = pairs.map(|(a, b)| (a + b).abs()).sum();
                num / denom
            }
            DistanceMetric::Hamming => {
                pairs.filter(|(a, b)| a != b).count() as f64 / u.len() as f64
            }
            DistanceMetric::Jaccard => {
                let (differ, nonzero) = pairs.fold((0usize, 0usize), |(d, n), (a, b)| {
                    let either = *a != 0.0 || *b != 0.0;
                    (
                        d + usize::from(either && a != b),
                        n + usize::from(either),
                    )
                });
                if nonzero == 0 {
                    0.0
                } else {
                    differ as f64 / nonzero as f64
                }
            }
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == needle)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.name()).collect();
                Error::unknown("distance metric", s, &names)
            })
    }
}

/// Inverse-distance weight matrix over the observations of `series`
///
/// The result is T × T: `w[a, b]` is `1 / d(row a, row b)`, min-max
/// normalised over the off-diagonal entries, with the diagonal fixed to 1.
/// If every off-diagonal entry is equal the normalisation is 0/0 and those
/// entries are NaN.
pub fn spatial_distance(series: &TimeSeries, metric: DistanceMetric) -> DMatrix<f64> {
    let n = series.n_time();
    let rows: Vec<Vec<f64>> = (0..n).map(|t| series.observation(t)).collect();

    let mut inverse = DMatrix::from_element(n, n, f64::NAN);
    for a in 0..n {
        for b in 0..n {
            if a != b {
                inverse[(a, b)] = 1.0 / metric.distance(&rows[a], &rows[b]);
            }
        }
    }

    let lo = nanmin(inverse.as_slice());
    let hi = nanmax(inverse.as_slice());
    debug!(metric = metric.name(), n, lo, hi, "normalising inverse distances");
    if hi.is_infinite() {
        warn!(
            metric = metric.name(),
            "identical observations produce infinite inverse distance"
        );
    }

    let mut weights = inverse.map(|v| (v - lo) / (hi - lo));
    weights.fill_diagonal(1.0);
    weights
}
